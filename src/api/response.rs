//! Response types for the timesheet API.
//!
//! This module defines the error response structures and the mapping from
//! [`TimesheetError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, TimesheetError};

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
    /// Per-row validation problems.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            field_errors: Vec::new(),
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

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an error for a bad path or header.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
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
    /// A 400 response.
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

impl From<TimesheetError> for ApiErrorResponse {
    fn from(error: TimesheetError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            TimesheetError::PermissionDenied { .. } => (
                StatusCode::FORBIDDEN,
                ApiError::new("PERMISSION_DENIED", message),
            ),
            TimesheetError::InvalidTransition { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("INVALID_TRANSITION", message),
            ),
            TimesheetError::ReadOnlyViolation { .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "READ_ONLY",
                    message,
                    "Entries can only be edited while the timesheet is draft or rejected",
                ),
            ),
            TimesheetError::FutureMonthDisallowed { current, .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "FUTURE_MONTH",
                    message,
                    format!("The latest open month is {}", current),
                ),
            ),
            TimesheetError::Validation { errors } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError {
                    field_errors: errors,
                    ..ApiError::new("VALIDATION_ERROR", message)
                },
            ),
            TimesheetError::ConcurrentModification { .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "CONCURRENT_MODIFICATION",
                    message,
                    "Reload the timesheet and try again",
                ),
            ),
            TimesheetError::Configuration { .. }
            | TimesheetError::ConfigNotFound { .. }
            | TimesheetError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            TimesheetError::EmployeeNotFound { .. } | TimesheetError::TimesheetNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("NOT_FOUND", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}
