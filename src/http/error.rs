use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::batch::AugmentError;

#[derive(Error, Debug)]
pub enum AppError {
  #[error("bad request {0}")]
  BadRequest(String),
  #[error("internal server error {0}")]
  InternalServerError(String),
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    match self {
      AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
      AppError::InternalServerError(_msg) => {
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
      }
    }
  }
}

impl From<AugmentError> for AppError {
  fn from(err: AugmentError) -> Self {
    match err {
      // The user can fix a broken upload; everything else is on us
      AugmentError::Decode { .. } => AppError::BadRequest(err.to_string()),
      _ => AppError::InternalServerError(err.to_string()),
    }
  }
}
