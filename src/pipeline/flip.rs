use image::imageops;
use image::RgbaImage;

pub fn horizontal(img: &RgbaImage) -> RgbaImage {
  imageops::flip_horizontal(img)
}

pub fn vertical(img: &RgbaImage) -> RgbaImage {
  imageops::flip_vertical(img)
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::Rgba;

  fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
      Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
    })
  }

  #[test]
  fn horizontal_reverses_columns() {
    let img = gradient(100, 100);
    let flipped = horizontal(&img);

    assert_eq!(flipped.dimensions(), (100, 100));
    for y in 0..100 {
      for x in 0..100 {
        assert_eq!(flipped.get_pixel(x, y), img.get_pixel(99 - x, y));
      }
    }
  }

  #[test]
  fn vertical_reverses_rows() {
    let img = gradient(10, 20);
    let flipped = vertical(&img);

    assert_eq!(flipped.dimensions(), (10, 20));
    for y in 0..20 {
      for x in 0..10 {
        assert_eq!(flipped.get_pixel(x, y), img.get_pixel(x, 19 - y));
      }
    }
  }
}
