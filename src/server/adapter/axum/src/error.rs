/* src/server/adapter/axum/src/error.rs */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rsp_engine::{LoadError, RenderError};
use tracing::error;

/// Error response for a failed render.
///
/// Newtype over the engine error because `IntoResponse` and `RenderError`
/// are both foreign to this crate.
#[derive(Debug)]
pub struct AxumError {
  status: StatusCode,
  code: &'static str,
  message: String,
}

impl AxumError {
  pub fn internal(message: impl Into<String>) -> Self {
    Self {
      status: StatusCode::INTERNAL_SERVER_ERROR,
      code: "INTERNAL_ERROR",
      message: message.into(),
    }
  }

  pub fn status(&self) -> StatusCode {
    self.status
  }

  pub fn code(&self) -> &'static str {
    self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }
}

impl From<RenderError> for AxumError {
  fn from(err: RenderError) -> Self {
    match err {
      RenderError::Load(LoadError::NotFound { .. }) => {
        Self { status: StatusCode::NOT_FOUND, code: "NOT_FOUND", message: err.to_string() }
      }
      other => Self::internal(other.to_string()),
    }
  }
}

impl IntoResponse for AxumError {
  fn into_response(self) -> Response {
    if self.status.is_server_error() {
      error!(code = self.code, message = %self.message, "render failed");
    }
    let body = serde_json::json!({
      "ok": false,
      "error": {
        "code": self.code,
        "message": self.message,
      }
    });
    (self.status, axum::Json(body)).into_response()
  }
}
