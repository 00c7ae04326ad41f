use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scamrisk_core::QueryError;
use thiserror::Error;

/// Query failures mapped onto HTTP responses.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct ApiError(#[from] pub QueryError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            QueryError::NotFound { .. } => StatusCode::NOT_FOUND,
            QueryError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.0.to_string() });
        (self.status(), axum::Json(body)).into_response()
    }
}
