use image::{Rgba, RgbaImage};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};
use rand::Rng;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Rotates the image about its center by a random angle in
/// `[-limit_deg, +limit_deg]`. Corners exposed by the rotation are
/// filled with white, spatial dimensions are unchanged.
pub fn apply<R: Rng>(img: &RgbaImage, limit_deg: f32, rng: &mut R) -> RgbaImage {
  let angle = rng.gen_range(-limit_deg..=limit_deg);
  rotate_about_center(img, angle.to_radians(), Interpolation::Bilinear, BACKGROUND)
}
