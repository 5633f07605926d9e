use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::path::Path;

use rand::Rng;
use thiserror::Error;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::pipeline::{Operation, TransformError};

pub mod codec;

/// One file received from the upload form: original filename plus the
/// raw bytes as sent by the browser.
#[derive(Debug, Clone)]
pub struct UploadedImage {
  pub name: String,
  pub data: Vec<u8>,
}

#[derive(Error, Debug)]
pub enum AugmentError {
  #[error("failed to decode {name}: {source}")]
  Decode {
    name: String,
    #[source]
    source: image::ImageError,
  },
  #[error("failed to apply {op} to {name}: {source}")]
  Transform {
    name: String,
    op: &'static str,
    #[source]
    source: TransformError,
  },
  #[error("failed to encode {name}: {source}")]
  Encode {
    name: String,
    #[source]
    source: image::ImageError,
  },
  #[error("failed to assemble archive: {0}")]
  Archive(#[from] zip::result::ZipError),
  #[error("failed to write archive entry: {0}")]
  Io(#[from] std::io::Error),
}

/// Augments every uploaded image with every operation and packs the
/// results into an in-memory ZIP archive.
///
/// Each operation is applied to a fresh copy of the decoded original,
/// so the archive holds `images.len() * operations.len()` PNG entries
/// named `{operation}_{original stem}.png`. The first decode, transform
/// or encode failure aborts the whole batch; no partial archive is
/// returned.
pub fn run<R: Rng>(
  images: &[UploadedImage],
  operations: &[Operation],
  rng: &mut R,
) -> Result<Vec<u8>, AugmentError> {
  let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
  let entry_options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
  let mut used_names = HashSet::new();

  for image in images {
    let decoded = codec::decode_rgba8(&image.name, &image.data)?;

    for operation in operations {
      let augmented = operation
        .apply(&decoded, rng)
        .map_err(|source| AugmentError::Transform {
          name: image.name.clone(),
          op: operation.label(),
          source,
        })?;

      let encoded = codec::encode_png(&image.name, &augmented)?;
      let entry_name = derive_name(operation.label(), &image.name, &mut used_names);
      debug!("archiving {} ({} bytes)", entry_name, encoded.len());

      writer.start_file(entry_name, entry_options)?;
      writer.write_all(&encoded)?;
    }
  }

  let cursor = writer.finish()?;
  Ok(cursor.into_inner())
}

/// `{label}_{stem}.png`, with a `-N` suffix when two uploads share a
/// stem, so entry names stay unique within one archive.
fn derive_name(label: &str, original: &str, used: &mut HashSet<String>) -> String {
  let stem = Path::new(original)
    .file_stem()
    .and_then(|s| s.to_str())
    .unwrap_or("image");

  let mut name = format!("{}_{}.png", label, stem);
  let mut suffix = 1;
  while !used.insert(name.clone()) {
    name = format!("{}_{}-{}.png", label, stem, suffix);
    suffix += 1;
  }

  name
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::pipeline::{self, Params, Selection};
  use image::{Rgba, RgbaImage};
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use std::io::Read;

  fn sample_upload(name: &str, width: u32, height: u32) -> UploadedImage {
    let img = RgbaImage::from_fn(width, height, |x, y| {
      Rgba([(x % 256) as u8, (y % 256) as u8, 100, 255])
    });
    let mut buffer = Cursor::new(Vec::new());
    img
      .write_to(&mut buffer, image::ImageFormat::Png)
      .expect("failed to encode test image");

    UploadedImage {
      name: name.to_owned(),
      data: buffer.into_inner(),
    }
  }

  fn open_archive(bytes: Vec<u8>) -> zip::ZipArchive<Cursor<Vec<u8>>> {
    zip::ZipArchive::new(Cursor::new(bytes)).expect("failed to open archive")
  }

  fn all_operations() -> Vec<Operation> {
    pipeline::build(
      &Selection {
        rotate: true,
        horizontal_flip: true,
        vertical_flip: true,
        brightness_contrast: true,
        zoom: true,
        grayscale: true,
      },
      &Params::default(),
    )
  }

  #[test]
  fn archive_holds_one_entry_per_image_and_operation() {
    let images = vec![sample_upload("a.png", 20, 20), sample_upload("b.png", 16, 24)];
    let operations = all_operations();
    let mut rng = StdRng::seed_from_u64(7);

    let archive = run(&images, &operations, &mut rng).unwrap();
    let zip = open_archive(archive);
    assert_eq!(zip.len(), images.len() * operations.len());
  }

  #[test]
  fn entry_names_are_unique_even_for_duplicate_stems() {
    let images = vec![sample_upload("photo.png", 8, 8), sample_upload("photo.jpg", 8, 8)];
    let operations = vec![Operation::Grayscale];
    let mut rng = StdRng::seed_from_u64(7);

    let archive = run(&images, &operations, &mut rng).unwrap();
    let zip = open_archive(archive);

    let names: Vec<String> = zip.file_names().map(|n| n.to_owned()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"grayscale_photo.png".to_owned()));
    assert!(names.contains(&"grayscale_photo-1.png".to_owned()));
  }

  #[test]
  fn entries_decode_back_to_rgba() {
    let images = vec![sample_upload("a.png", 12, 12)];
    let operations = vec![Operation::Grayscale];
    let mut rng = StdRng::seed_from_u64(7);

    let archive = run(&images, &operations, &mut rng).unwrap();
    let mut zip = open_archive(archive);

    let mut bytes = Vec::new();
    zip
      .by_name("grayscale_a.png")
      .unwrap()
      .read_to_end(&mut bytes)
      .unwrap();

    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!(decoded.color(), image::ColorType::Rgba8);
    assert_eq!(decoded.width(), 12);
    assert_eq!(decoded.height(), 12);
  }

  #[test]
  fn undecodable_upload_aborts_the_batch() {
    let images = vec![
      sample_upload("good.png", 8, 8),
      UploadedImage {
        name: "broken.png".to_owned(),
        data: vec![0, 1, 2, 3],
      },
    ];
    let operations = vec![Operation::HorizontalFlip];
    let mut rng = StdRng::seed_from_u64(7);

    let err = run(&images, &operations, &mut rng).unwrap_err();
    match err {
      AugmentError::Decode { name, .. } => assert_eq!(name, "broken.png"),
      other => panic!("expected decode error, got {other}"),
    }
  }

  #[test]
  fn empty_pipeline_yields_empty_archive() {
    let images = vec![sample_upload("a.png", 8, 8)];
    let mut rng = StdRng::seed_from_u64(7);

    let archive = run(&images, &[], &mut rng).unwrap();
    let zip = open_archive(archive);
    assert_eq!(zip.len(), 0);
  }

  #[test]
  fn horizontal_flip_entry_has_reversed_columns() {
    let images = vec![sample_upload("strip.png", 100, 100)];
    let operations = vec![Operation::HorizontalFlip];
    let mut rng = StdRng::seed_from_u64(7);

    let archive = run(&images, &operations, &mut rng).unwrap();
    let mut zip = open_archive(archive);

    let mut bytes = Vec::new();
    zip
      .by_name("horizontalflip_strip.png")
      .unwrap()
      .read_to_end(&mut bytes)
      .unwrap();

    let flipped = image::load_from_memory(&bytes).unwrap().to_rgba8();
    let original = codec::decode_rgba8("strip.png", &images[0].data).unwrap();
    for y in 0..100 {
      for x in 0..100 {
        assert_eq!(flipped.get_pixel(x, y), original.get_pixel(99 - x, y));
      }
    }
  }
}
