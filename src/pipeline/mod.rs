use image::RgbaImage;
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

pub mod brightness;
pub mod flip;
pub mod grayscale;
pub mod rotate;
pub mod zoom;

/// Per-request transformation flags, as submitted by the upload form.
/// Flags missing from the JSON default to off.
#[derive(Deserialize, Debug, Default, Clone, ToSchema)]
#[serde(default)]
pub struct Selection {
  pub rotate: bool,
  pub horizontal_flip: bool,
  pub vertical_flip: bool,
  pub brightness_contrast: bool,
  pub zoom: bool,
  pub grayscale: bool,
}

impl Selection {
  pub fn any(&self) -> bool {
    self.rotate
      || self.horizontal_flip
      || self.vertical_flip
      || self.brightness_contrast
      || self.zoom
      || self.grayscale
  }
}

/// Transformation limits. Each limit bounds the randomly sampled
/// strength of one operation; every operation always applies.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Params {
  pub rotation_limit_deg: f32,
  pub brightness_limit: f32,
  pub contrast_limit: f32,
  pub zoom_limit: f32,
}

impl Default for Params {
  fn default() -> Self {
    Params {
      rotation_limit_deg: 45.0,
      brightness_limit: 0.3,
      contrast_limit: 0.3,
      zoom_limit: 0.3,
    }
  }
}

/// One unit of work in the augmentation pipeline. The tag (not the
/// underlying library call) drives output-file naming.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
  Rotate { limit_deg: f32 },
  HorizontalFlip,
  VerticalFlip,
  BrightnessContrast { brightness_limit: f32, contrast_limit: f32 },
  Zoom { limit: f32 },
  Grayscale,
}

#[derive(Error, Debug)]
pub enum TransformError {
  #[error("image has zero area")]
  EmptyImage,
}

impl Operation {
  /// Stable identifier used as the archive-entry filename prefix.
  pub fn label(&self) -> &'static str {
    match self {
      Operation::Rotate { .. } => "rotate",
      Operation::HorizontalFlip => "horizontalflip",
      Operation::VerticalFlip => "verticalflip",
      Operation::BrightnessContrast { .. } => "brightnesscontrast",
      Operation::Zoom { .. } => "zoom",
      Operation::Grayscale => "grayscale",
    }
  }

  pub fn apply<R: Rng>(&self, img: &RgbaImage, rng: &mut R) -> Result<RgbaImage, TransformError> {
    match self {
      Operation::Rotate { limit_deg } => Ok(rotate::apply(img, *limit_deg, rng)),
      Operation::HorizontalFlip => Ok(flip::horizontal(img)),
      Operation::VerticalFlip => Ok(flip::vertical(img)),
      Operation::BrightnessContrast {
        brightness_limit,
        contrast_limit,
      } => Ok(brightness::apply(img, *brightness_limit, *contrast_limit, rng)),
      Operation::Zoom { limit } => zoom::apply(img, *limit, rng),
      Operation::Grayscale => Ok(grayscale::apply(img)),
    }
  }
}

/// Builds the operation list for one request. Order is fixed: rotate,
/// horizontal flip, vertical flip, brightness/contrast, zoom, grayscale.
/// It determines archive-entry ordering, so changing it is a breaking
/// change for consumers that rely on entry positions.
pub fn build(selection: &Selection, params: &Params) -> Vec<Operation> {
  let mut operations = Vec::new();

  if selection.rotate {
    operations.push(Operation::Rotate {
      limit_deg: params.rotation_limit_deg,
    });
  }
  if selection.horizontal_flip {
    operations.push(Operation::HorizontalFlip);
  }
  if selection.vertical_flip {
    operations.push(Operation::VerticalFlip);
  }
  if selection.brightness_contrast {
    operations.push(Operation::BrightnessContrast {
      brightness_limit: params.brightness_limit,
      contrast_limit: params.contrast_limit,
    });
  }
  if selection.zoom {
    operations.push(Operation::Zoom {
      limit: params.zoom_limit,
    });
  }
  if selection.grayscale {
    operations.push(Operation::Grayscale);
  }

  operations
}
