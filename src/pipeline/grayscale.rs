use image::{Pixel, RgbaImage};

/// Replaces each pixel's color channels with its luma while keeping
/// alpha, so the output stays RGBA and channel depth never changes.
pub fn apply(img: &RgbaImage) -> RgbaImage {
  let mut out = img.clone();
  for pixel in out.pixels_mut() {
    let luma = pixel.to_luma()[0];
    pixel[0] = luma;
    pixel[1] = luma;
    pixel[2] = luma;
  }
  out
}
