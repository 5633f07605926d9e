use image::imageops::{self, FilterType};
use image::RgbaImage;
use rand::Rng;

use super::TransformError;

/// Zooms into the image: upscale by a random factor in
/// `[1.0, 1.0 + limit]`, then center-crop back to the source
/// dimensions so the output size matches the input.
pub fn apply<R: Rng>(img: &RgbaImage, limit: f32, rng: &mut R) -> Result<RgbaImage, TransformError> {
  let (width, height) = img.dimensions();
  if width == 0 || height == 0 {
    return Err(TransformError::EmptyImage);
  }

  let factor = rng.gen_range(1.0..=1.0 + limit);
  let scaled = imageops::resize(
    img,
    (width as f32 * factor).round() as u32,
    (height as f32 * factor).round() as u32,
    FilterType::Triangle,
  );

  Ok(center_crop(&scaled, width, height))
}

/// Center-crops to at most `width` x `height`. The crop rectangle is
/// clamped to the image bounds, so a crop larger than the image yields
/// the whole image instead of failing.
pub fn center_crop(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
  let (source_width, source_height) = img.dimensions();
  let crop_width = width.min(source_width);
  let crop_height = height.min(source_height);
  let x = (source_width - crop_width) / 2;
  let y = (source_height - crop_height) / 2;

  imageops::crop_imm(img, x, y, crop_width, crop_height).to_image()
}
