use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::errors::ServiceError;

/// Request-level failure. Only unwritable storage reaches this point;
/// missing or corrupt table files are absorbed inside the store and never
/// surface to the caller.
#[derive(Debug)]
pub struct ApiError(pub String);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let msg = self.0;
        error!(error = %msg, "request failed");
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        (status, Json(serde_json::json!({"error": msg}))).into_response()
    }
}
