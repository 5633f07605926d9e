use image::imageops;
use image::RgbaImage;
use rand::Rng;

/// Applies a random brightness shift and a random contrast change. Both
/// limits are fractions of the full 8-bit range: a brightness limit of
/// 0.3 allows shifts up to +-76 levels, a contrast limit of 0.3 allows
/// contrast changes up to +-30 percent.
pub fn apply<R: Rng>(
  img: &RgbaImage,
  brightness_limit: f32,
  contrast_limit: f32,
  rng: &mut R,
) -> RgbaImage {
  let shift = (rng.gen_range(-brightness_limit..=brightness_limit) * 255.0).round() as i32;
  let percent = rng.gen_range(-contrast_limit..=contrast_limit) * 100.0;

  imageops::contrast(&imageops::brighten(img, shift), percent)
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::Rgba;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn preserves_dimensions_and_alpha() {
    let img = RgbaImage::from_pixel(16, 16, Rgba([100, 150, 200, 255]));
    let mut rng = StdRng::seed_from_u64(7);

    let out = apply(&img, 0.3, 0.3, &mut rng);
    assert_eq!(out.dimensions(), (16, 16));
    assert_eq!(out.get_pixel(0, 0)[3], 255);
  }

  #[test]
  fn zero_limits_are_identity() {
    let img = RgbaImage::from_pixel(4, 4, Rgba([100, 150, 200, 255]));
    let mut rng = StdRng::seed_from_u64(7);

    let out = apply(&img, 0.0, 0.0, &mut rng);
    assert_eq!(out.get_pixel(2, 2), img.get_pixel(2, 2));
  }

  #[test]
  fn same_seed_gives_same_output() {
    let img = RgbaImage::from_pixel(8, 8, Rgba([90, 90, 90, 255]));

    let a = apply(&img, 0.3, 0.3, &mut StdRng::seed_from_u64(42));
    let b = apply(&img, 0.3, 0.3, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
  }
}
