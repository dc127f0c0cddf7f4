use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::jobs::driver::DriverError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Messages never carry the caller's API key.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required form field (file, key, keywords) was not supplied.
    #[error("{0}")]
    MissingInput(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Could not extract text from document: {0}")]
    Extraction(String),

    #[error("No text chunks to analyze")]
    EmptyInput,

    #[error("The API key was rejected by the language model provider")]
    Authentication,

    #[error("Language model service error: {0}")]
    RateLimitOrService(String),

    #[error("Browser navigation failed: {0}")]
    Navigation(String),

    #[error("Search results did not render after {attempts} attempt(s)")]
    NavigationTimeout { attempts: u32 },
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Unauthorized { .. } => AppError::Authentication,
            other => AppError::RateLimitOrService(other.to_string()),
        }
    }
}

impl From<DriverError> for AppError {
    fn from(err: DriverError) -> Self {
        AppError::Navigation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::MissingInput(msg) => {
                tracing::warn!("Missing input: {msg}");
                (StatusCode::BAD_REQUEST, "MISSING_INPUT")
            }
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Extraction(_) => (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_ERROR"),
            AppError::EmptyInput => (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_INPUT"),
            AppError::Authentication => (StatusCode::UNAUTHORIZED, "AUTHENTICATION_ERROR"),
            AppError::RateLimitOrService(msg) => {
                tracing::error!("LLM error: {msg}");
                (StatusCode::BAD_GATEWAY, "LLM_SERVICE_ERROR")
            }
            AppError::Navigation(msg) => {
                tracing::error!("Navigation error: {msg}");
                (StatusCode::BAD_GATEWAY, "NAVIGATION_ERROR")
            }
            AppError::NavigationTimeout { attempts } => {
                tracing::error!("Search results never rendered ({attempts} attempts)");
                (StatusCode::GATEWAY_TIMEOUT, "NAVIGATION_TIMEOUT")
            }
        };

        let message = self.to_string();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_llm_error_maps_to_authentication() {
        let err: AppError = LlmError::Unauthorized { status: 401 }.into();
        assert!(matches!(err, AppError::Authentication));
    }

    #[test]
    fn test_rate_limit_maps_to_service_error() {
        let err: AppError = LlmError::RateLimited { retries: 3 }.into();
        assert!(matches!(err, AppError::RateLimitOrService(_)));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::MissingInput("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Extraction("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::EmptyInput, StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::Authentication, StatusCode::UNAUTHORIZED),
            (AppError::Navigation("x".into()), StatusCode::BAD_GATEWAY),
            (
                AppError::NavigationTimeout { attempts: 5 },
                StatusCode::GATEWAY_TIMEOUT,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
