use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use super::AugmentError;

/// Decodes uploaded bytes (JPEG, PNG and whatever else the image crate
/// accepts) and normalizes to RGBA8 so every operation sees the same
/// channel layout.
pub fn decode_rgba8(name: &str, data: &[u8]) -> Result<RgbaImage, AugmentError> {
  let img = image::load_from_memory(data).map_err(|source| AugmentError::Decode {
    name: name.to_owned(),
    source,
  })?;

  Ok(img.to_rgba8())
}

/// Encodes an augmented image as PNG. Every archive entry uses the same
/// lossless format regardless of the upload's original one.
pub fn encode_png(name: &str, img: &RgbaImage) -> Result<Vec<u8>, AugmentError> {
  let mut buffer = Cursor::new(Vec::new());
  img
    .write_to(&mut buffer, ImageFormat::Png)
    .map_err(|source| AugmentError::Encode {
      name: name.to_owned(),
      source,
    })?;

  Ok(buffer.into_inner())
}
