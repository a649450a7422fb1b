//! Response types for the scheduler API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Whether the same request may succeed if retried.
    #[serde(default)]
    pub retryable: bool,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            retryable: false,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying a validation error.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<SchedulerError> for ApiErrorResponse {
    fn from(error: SchedulerError) -> Self {
        let retryable = error.is_retryable();
        let message = error.to_string();

        let (status, mut api_error) = match error {
            SchedulerError::ConfigNotFound { .. }
            | SchedulerError::ConfigParseError { .. }
            | SchedulerError::InvalidConfig { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            SchedulerError::CrewNotFound { crew_id } => (
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "CREW_NOT_FOUND",
                    message,
                    format!("No crew with id '{}' is configured", crew_id),
                ),
            ),
            SchedulerError::MemberNotAssigned { member_id } => (
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "MEMBER_NOT_ASSIGNED",
                    message,
                    format!("Member '{}' appears in no crew roster", member_id),
                ),
            ),
            SchedulerError::InvalidDateRange { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_DATE_RANGE",
                    message,
                    "Month must be between 1 and 12",
                ),
            ),
            SchedulerError::RecordNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("RECORD_NOT_FOUND", message),
            ),
            SchedulerError::StorageConflict { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("STORAGE_CONFLICT", message),
            ),
            SchedulerError::StorageUnavailable { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::new("STORAGE_UNAVAILABLE", message),
            ),
        };

        api_error.retryable = retryable;
        ApiErrorResponse {
            status,
            error: api_error,
        }
    }
}
