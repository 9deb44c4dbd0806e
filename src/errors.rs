use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::validation::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// User-correctable field errors; never logged as system faults.
    #[error("validation failed")]
    Validation(FieldErrors),

    /// Unparseable request body; same category as a validation failure.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Storage-layer failure. The caller sees only the generic message; the
    /// underlying cause goes to the log.
    #[error("{message}")]
    Storage {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                axum::Json(serde_json::json!({
                    "error": "Validation failed",
                    "errors": errors,
                })),
            )
                .into_response(),
            AppError::InvalidBody(detail) => {
                tracing::debug!(detail = %detail, "rejected unparseable request body");
                (
                    StatusCode::BAD_REQUEST,
                    axum::Json(serde_json::json!({ "error": "Invalid request body" })),
                )
                    .into_response()
            }
            AppError::Storage { message, source } => {
                tracing::error!(error = %format!("{source:#}"), "{message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(serde_json::json!({ "error": message })),
                )
                    .into_response()
            }
        }
    }
}
