//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use produk_domain::error::{ErrorKind, ProdukError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Everything a handler can fail with, rendered as an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    /// Error raised by the application layer.
    Domain(ProdukError),
    /// The item identifier in the path is not a decimal integer.
    InvalidId(String),
    /// The item endpoint was addressed without an identifier.
    MissingId,
    /// The request body could not be decoded as the expected JSON shape.
    MalformedBody(JsonRejection),
}

impl From<ProdukError> for ApiError {
    fn from(err: ProdukError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection)
    }
}

/// Status code for each domain error class.
#[must_use]
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Domain(ProdukError::Validation(err)) => {
                (status_for(ErrorKind::BadRequest), err.to_string())
            }
            Self::Domain(ProdukError::NotFound(err)) => {
                (status_for(ErrorKind::NotFound), err.to_string())
            }
            Self::Domain(ProdukError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    status_for(ErrorKind::Internal),
                    "internal server error".to_string(),
                )
            }
            Self::InvalidId(raw) => (StatusCode::BAD_REQUEST, format!("invalid id: {raw:?}")),
            Self::MissingId => (StatusCode::BAD_REQUEST, "missing id".to_string()),
            Self::MalformedBody(rejection) => {
                tracing::debug!(error = %rejection, "rejected request body");
                (StatusCode::BAD_REQUEST, rejection.body_text())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
