// demos/marketplace_app/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use rifa::{CheckoutError, FlowError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Conflicting State: {0}")]
  Conflict(String),

  #[error("Upstream Error: {0}")]
  Upstream(String), // Backend or gateway leg failed

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

// Every flow surfaces CheckoutError; fold it into the HTTP taxonomy and
// keep the user-facing message the protocol chose.
impl From<CheckoutError> for AppError {
  fn from(err: CheckoutError) -> Self {
    let surface = err.surface_message();
    match err {
      CheckoutError::Validation(_) => AppError::Validation(surface),
      CheckoutError::Unauthorized => AppError::Auth("Sesión no válida o expirada.".to_string()),
      CheckoutError::NotFound(what) => AppError::NotFound(what),
      CheckoutError::IllegalTransition { from, to } => {
        AppError::Conflict(format!("payment cannot move from {} to {}", from, to))
      }
      CheckoutError::Backend { .. } | CheckoutError::Transport { .. } => AppError::Upstream(surface),
      CheckoutError::Flow { source } => AppError::Internal(source.to_string()),
      CheckoutError::Internal(m) => AppError::Internal(m),
    }
  }
}

impl From<FlowError> for AppError {
  fn from(err: FlowError) -> Self {
    AppError::Internal(err.to_string())
  }
}

// Handlers occasionally use `?` on anyhow::Result internals.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(err.to_string())
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::Auth(m) => HttpResponse::Unauthorized().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::Conflict(m) => HttpResponse::Conflict().json(json!({"error": m})),
      AppError::Upstream(m) => HttpResponse::BadGateway().json(json!({"error": m})),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
