use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cinelang_core::error::CoreError;
use serde_json::json;

/// Application-level error type for the non-catalog HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{ "error", "code" }` JSON bodies.
/// Catalog responses never use this type; see [`crate::catalog`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cinelang_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The requested catalog is not available to the caller.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Neither the token nor the server provides a TMDB key.
    #[error("No TMDB API key available")]
    NoApiKey,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::InvalidToken(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_TOKEN", msg.clone())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Upstream(msg) => {
                    tracing::error!(error = %msg, "Upstream catalogue error");
                    (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_ERROR",
                        "The movie catalogue could not be fetched".to_string(),
                    )
                }
                CoreError::Cache(msg) | CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::NoApiKey => (
                StatusCode::BAD_REQUEST,
                "NO_API_KEY",
                "No TMDB API key is configured for this token".to_string(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
