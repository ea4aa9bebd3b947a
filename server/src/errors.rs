// server/src/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use archiplan_core::{FieldErrors, FlowError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation failed: {0}")]
  Validation(FieldErrors),

  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  NotFound(String),

  /// The resource exists but cannot be used (inactive project).
  #[error("{0}")]
  Unavailable(String),

  #[error("{0}")]
  InvalidTransition(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Workflow Error: {0}")]
  Workflow(#[from] FlowError),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<sqlx::migrate::MigrateError> for AppError {
  fn from(err: sqlx::migrate::MigrateError) -> Self {
    AppError::Internal(format!("Migration failed: {}", err))
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::BadRequest(_) | AppError::Unavailable(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::InvalidTransition(_) => StatusCode::CONFLICT,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Workflow(_) | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with server error");
    } else {
      tracing::debug!(application_error = %self, status = status.as_u16(), "Responding with client error");
    }

    let mut builder = HttpResponse::build(status);
    match self {
      AppError::Validation(errors) => builder.json(json!({
        "success": false,
        "error": "Validation failed",
        "errors": errors,
      })),
      AppError::BadRequest(m) | AppError::NotFound(m) | AppError::Unavailable(m) | AppError::InvalidTransition(m) => {
        builder.json(json!({ "error": m }))
      }
      AppError::Sqlx(_) => builder.json(json!({ "error": "Database operation failed" })),
      AppError::Config(_) | AppError::Workflow(_) | AppError::Internal(_) => {
        builder.json(json!({ "error": "An internal error occurred" }))
      }
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
