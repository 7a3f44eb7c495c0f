//! Error types and error handling for the application
//!
//! This module defines the error type shared by services and HTTP handlers.
//! `AppError` implements `IntoResponse` to provide consistent error formatting.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message returned to callers for errors that are not part of the domain
const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Application-level error types
///
/// Services raise `NotFound` and `Validation` at the point of detection; both
/// travel unchanged to the handler boundary. Anything else is `Internal`.
#[derive(Error, Debug)]
pub enum AppError {
    /// A referenced film or user id has no corresponding entity
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller supplied data violating a field constraint or a business rule
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Extractor rejections share the JSON error body of domain errors. A path
// segment that does not parse as an id cannot name an entity, hence 404.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => {
                AppError::NotFound(err.body_text())
            }
            other => AppError::Internal(anyhow::anyhow!(other.body_text())),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match &self {
            AppError::NotFound(_) | AppError::Validation(_) => self.to_string(),
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "Unexpected error while handling request");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("film 1".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation("bad".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    async fn response_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_domain_error_message_reaches_response() {
        let (status, body) = response_json(AppError::Validation(
            "Login must not contain whitespace".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Login must not contain whitespace"));
    }

    #[tokio::test]
    async fn test_json_rejection_is_validation() {
        use axum::extract::rejection::MissingJsonContentType;

        let err = AppError::from(JsonRejection::from(MissingJsonContentType::default()));
        assert!(matches!(err, AppError::Validation(_)));

        let (status, body) = response_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert!(body["error"].as_str().unwrap().contains("Content-Type"));
    }

    #[tokio::test]
    async fn test_internal_error_does_not_leak_detail() {
        let err = AppError::Internal(anyhow::anyhow!("lock poisoned at storage.rs:42"));
        assert!(err.to_string().contains("lock poisoned"));

        let (status, body) = response_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], 500);
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    }
}
