//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Status mapping is by error kind, never by message text: validation and
//! unsupported-request failures are the caller's fault (400); everything
//! else — including an unparseable body — is a 500.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use rollcall_core::ValidationError;
use serde_json::json;
use thiserror::Error;

/// An error raised while handling a request. Every variant is caught at the
/// handler boundary and converted to a JSON response; none escape.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Payload failed a required-field or required-shape check.
  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// Request body is not parseable JSON. Maps to 500, not 400 — the
  /// reference behavior's asymmetry with the validation path, preserved.
  #[error("malformed request body: {0}")]
  MalformedInput(String),

  /// Backend read/write failure. Not retried.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// Event-bus failure after a successful write. Not retried; the record
  /// stays persisted.
  #[error("publish error: {0}")]
  Publish(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// Wrong method, unknown path, or a POST with no body.
  #[error("unsupported method or missing payload")]
  UnsupportedRequest,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match &self {
      ApiError::Validation(e) => {
        tracing::warn!(error = %e, "payload rejected");
        (
          StatusCode::BAD_REQUEST,
          Json(json!({ "message": e.to_string() })),
        )
          .into_response()
      }
      ApiError::UnsupportedRequest => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": "Unsupported method or missing payload" })),
      )
        .into_response(),
      ApiError::MalformedInput(detail) => internal(detail),
      ApiError::Store(e) => internal(&e.to_string()),
      ApiError::Publish(e) => internal(&e.to_string()),
    }
  }
}

fn internal(detail: &str) -> Response {
  tracing::error!(error = detail, "request failed");
  (
    StatusCode::INTERNAL_SERVER_ERROR,
    Json(json!({ "message": "Internal server error", "error": detail })),
  )
    .into_response()
}
