use axum::{
  extract::{self, State},
  http::{header, StatusCode},
  response::IntoResponse,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::error;

use crate::batch::{self, UploadedImage};
use crate::http::error::AppError;
use crate::http::AppState;
use crate::pipeline;

const ARCHIVE_FILENAME: &str = "augmented_images.zip";

/// Accepts a multipart form with repeated `images` file parts and one
/// `selection` JSON part, and responds with a ZIP archive holding one
/// transformed PNG per (image, selected transformation) pair.
#[utoipa::path(
  post,
  path = "/api/v1/augment",
  request_body(
    content = Vec<u8>,
    content_type = "multipart/form-data",
    description = "repeated `images` file parts plus one `selection` JSON part"
  ),
  responses(
    (status = 200, description = "ZIP archive of augmented images", body = Vec<u8>, content_type = "application/zip"),
    (status = 400, description = "missing images, empty selection or undecodable upload")
  )
)]
pub async fn augment_images(
  State(state): State<AppState>,
  mut multipart: extract::Multipart,
) -> Result<impl IntoResponse, AppError> {
  let mut selection: Option<pipeline::Selection> = None;
  let mut images: Vec<UploadedImage> = Vec::new();

  while let Some(field) = multipart
    .next_field()
    .await
    .map_err(|e| AppError::BadRequest(e.to_string()))?
  {
    let name = field.name().unwrap_or("");

    match name {
      "images" | "image" => {
        let file_name = field.file_name().unwrap_or("image").to_owned();
        let data = field
          .bytes()
          .await
          .map_err(|e| AppError::BadRequest(e.to_string()))?;
        images.push(UploadedImage {
          name: file_name,
          data: data.to_vec(),
        });
      }
      "selection" => {
        let bytes = field
          .bytes()
          .await
          .map_err(|e| AppError::BadRequest(e.to_string()))?;
        selection =
          Some(serde_json::from_slice(&bytes).map_err(|e| AppError::BadRequest(e.to_string()))?);
      }
      _ => {}
    }
  }

  let selection = selection.ok_or_else(|| AppError::BadRequest("missing selection".to_owned()))?;
  if images.is_empty() {
    return Err(AppError::BadRequest("no images uploaded".to_owned()));
  }

  let operations = pipeline::build(&selection, &state.params);
  if operations.is_empty() {
    return Err(AppError::BadRequest("no transformations selected".to_owned()));
  }

  // Run the CPU-bound augmentation in a thread from the thread pool
  let seed = state.seed;
  let (send, recv) = tokio::sync::oneshot::channel();
  rayon::spawn(move || {
    let mut rng = match seed {
      Some(s) => StdRng::seed_from_u64(s),
      None => StdRng::from_entropy(),
    };

    let _ = send.send(batch::run(&images, &operations, &mut rng));
  });

  let archive = recv.await.map_err(|e| {
    error!("failed to receive: {}", e);
    AppError::InternalServerError(e.to_string())
  })??;

  let headers = [
    (header::CONTENT_TYPE, "application/zip".to_owned()),
    (
      header::CONTENT_DISPOSITION,
      format!("attachment; filename=\"{}\"", ARCHIVE_FILENAME),
    ),
  ];

  Ok((StatusCode::OK, headers, archive))
}
