//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tomes_storage::StorageError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Language has no documents.
    #[error("Language not found: {0}")]
    LanguageNotFound(String),

    /// Document store failure.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Response body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Resolution did not settle.
    #[error("Resolution superseded: {0}")]
    Superseded(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::LanguageNotFound(language) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Language not found", "language": language}),
            ),
            Self::Storage(e) => {
                tracing::warn!(error = %e, "Storage error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": e.to_string()}),
                )
            }
            Self::Serialization(e) => {
                tracing::error!(error = %e, "Failed to serialize response");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Serialization error"}),
                )
            }
            Self::Superseded(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({"error": self.to_string()}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_not_found_status() {
        let response = ServerError::LanguageNotFound("xx".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_error_status() {
        let response = ServerError::from(StorageError::not_found("en/a.md")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_serialization_error_status() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

        let response = ServerError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
