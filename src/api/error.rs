//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use crate::chat::ChatError;
use crate::wellness::PlannerError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The resource is busy with another request
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Service unavailable (collaborator not configured, limits reached)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The text-generation service failed; its message is passed through
    #[error("{0}")]
    BadGateway(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::EmptyInput => ApiError::Validation(e.to_string()),
            ChatError::Busy => ApiError::Conflict(e.to_string()),
            ChatError::Unconfigured => ApiError::ServiceUnavailable(e.to_string()),
        }
    }
}

impl From<PlannerError> for ApiError {
    fn from(e: PlannerError) -> Self {
        match &e {
            PlannerError::Busy => ApiError::Conflict(e.to_string()),
            PlannerError::Validation(_) => ApiError::Validation(e.to_string()),
            PlannerError::Unconfigured => ApiError::ServiceUnavailable(e.to_string()),
            PlannerError::Collaborator(inner) => ApiError::BadGateway(inner.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "BUSY"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ApiError::BadGateway(_) => (StatusCode::BAD_GATEWAY, "AI_SERVICE_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        // Client mistakes are not worth an error-level log
        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::debug!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiError;
    use crate::wellness::ValidationError;

    fn status_of(e: impl Into<ApiError>) -> StatusCode {
        let e: ApiError = e.into();
        e.into_response().status()
    }

    #[test]
    fn test_chat_error_statuses() {
        assert_eq!(status_of(ChatError::EmptyInput), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ChatError::Busy), StatusCode::CONFLICT);
        assert_eq!(status_of(ChatError::Unconfigured), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_planner_error_statuses() {
        assert_eq!(
            status_of(PlannerError::Validation(ValidationError::Missing("age"))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(PlannerError::Unconfigured), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            status_of(PlannerError::Collaborator(AiError::Timeout)),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_collaborator_message_passes_through() {
        let e: ApiError = PlannerError::Collaborator(AiError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        })
        .into();
        assert_eq!(e.to_string(), "API error 429: quota exceeded");
    }
}
