//! Error types for the timesheet engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while starting, editing and
//! reviewing monthly timesheets.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ReviewAction, TimesheetStatus, YearMonth};

/// A single field-level validation problem.
///
/// Reconciler errors are reported per affected date so that callers can
/// highlight the offending rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The date of the row the error belongs to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// The field that failed validation (e.g. "duration").
    pub field: String,
    /// A description of the problem.
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date {
            Some(date) => write!(f, "{} {}: {}", date, self.field, self.message),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

/// The main error type for the timesheet engine.
///
/// # Example
///
/// ```
/// use timesheet_engine::error::TimesheetError;
///
/// let error = TimesheetError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum TimesheetError {
    /// The acting user does not hold the role the action requires.
    #[error("Permission denied for '{action}': {reason}")]
    PermissionDenied {
        /// The attempted action.
        action: String,
        /// Why the actor was refused.
        reason: String,
    },

    /// The action is not valid from the timesheet's current status.
    #[error("Cannot {action} a timesheet in status {}", describe_status(.from))]
    InvalidTransition {
        /// The attempted action.
        action: ReviewAction,
        /// The current status, `None` when no timesheet exists yet.
        from: Option<TimesheetStatus>,
    },

    /// Daily entries were edited outside draft/rejected.
    #[error("Timesheet is read-only while {status}")]
    ReadOnlyViolation {
        /// The status that forbids editing.
        status: TimesheetStatus,
    },

    /// A timesheet was started or submitted for a month after the current one.
    #[error("Timesheets for {requested} are not open yet (current month is {current})")]
    FutureMonthDisallowed {
        /// The month that was requested.
        requested: YearMonth,
        /// The current month, to fall back to.
        current: YearMonth,
    },

    /// Submitted data failed validation. Nothing was written.
    #[error("Validation failed: {}", join_field_errors(.errors))]
    Validation {
        /// Every problem found in the batch.
        errors: Vec<FieldError>,
    },

    /// Another request changed the timesheet first.
    #[error("Timesheet for employee '{employee_id}' in {month} was modified concurrently")]
    ConcurrentModification {
        /// The employee whose timesheet was contended.
        employee_id: String,
        /// The contended month.
        month: YearMonth,
    },

    /// A required configuration value is missing or inconsistent.
    #[error("Configuration error: {message}")]
    Configuration {
        /// A description of the configuration problem.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No employee is registered under the identifier.
    #[error("Employee not found: {identifier}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        identifier: String,
    },

    /// No timesheet has been started for the employee and month.
    #[error("No timesheet for employee '{employee_id}' in {month}")]
    TimesheetNotFound {
        /// The employee identifier.
        employee_id: String,
        /// The requested month.
        month: YearMonth,
    },
}

fn describe_status(status: &Option<TimesheetStatus>) -> String {
    match status {
        Some(status) => status.to_string(),
        None => "not started".to_string(),
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl TimesheetError {
    /// Builds a single-field validation error.
    pub fn validation(
        date: Option<NaiveDate>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            errors: vec![FieldError {
                date,
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    /// Builds a permission error for `action`.
    pub fn permission_denied(action: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self::PermissionDenied {
            action: action.to_string(),
            reason: reason.into(),
        }
    }

    /// Builds a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return TimesheetError.
pub type TimesheetResult<T> = Result<T, TimesheetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = TimesheetError::ConfigNotFound {
            path: "/missing/settings.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/settings.yaml"
        );
    }

    #[test]
    fn test_invalid_transition_without_record() {
        let error = TimesheetError::InvalidTransition {
            action: ReviewAction::Submit,
            from: None,
        };
        assert_eq!(
            error.to_string(),
            "Cannot submit a timesheet in status not started"
        );
    }

    #[test]
    fn test_invalid_transition_displays_status() {
        let error = TimesheetError::InvalidTransition {
            action: ReviewAction::Verify,
            from: Some(TimesheetStatus::Draft),
        };
        assert_eq!(error.to_string(), "Cannot verify a timesheet in status draft");
    }

    #[test]
    fn test_validation_lists_every_field() {
        let error = TimesheetError::Validation {
            errors: vec![
                FieldError {
                    date: NaiveDate::from_ymd_opt(2024, 4, 1),
                    field: "date".to_string(),
                    message: "outside 2024-03".to_string(),
                },
                FieldError {
                    date: None,
                    field: "duration".to_string(),
                    message: "must be a whole number".to_string(),
                },
            ],
        };
        assert_eq!(
            error.to_string(),
            "Validation failed: 2024-04-01 date: outside 2024-03; duration: must be a whole number"
        );
    }

    #[test]
    fn test_future_month_displays_both_months() {
        let error = TimesheetError::FutureMonthDisallowed {
            requested: YearMonth::new(2024, 4).unwrap(),
            current: YearMonth::new(2024, 3).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Timesheets for 2024-04 are not open yet (current month is 2024-03)"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<TimesheetError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> TimesheetResult<()> {
            Err(TimesheetError::EmployeeNotFound {
                identifier: "E404".to_string(),
            })
        }

        fn propagates_error() -> TimesheetResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
