use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use irs_core::RepositoryError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Failure of a query route. Always rendered as `500 {"error": "..."}`.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] RepositoryError);

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "store query failed");
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
