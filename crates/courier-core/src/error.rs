//! Unified application error types for Courier.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The HTTP status mapping lives in
//! `courier-api`; this crate stays transport-free.

use std::fmt;

use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested notification was not found.
    NotFound,
    /// Input validation failed (empty fields, bad type, bad attachment).
    Validation,
    /// SMS was requested but the tenant has no SMS sender configured.
    SmsDisabled,
    /// The notification is no longer in a state that permits the mutation.
    NotEditable,
    /// A requested schedule time is not in the future.
    SchedulePast,
    /// A conflict occurred (duplicate notification id).
    Conflict,
    /// Authentication failed (missing or mismatched bearer token).
    Authentication,
    /// A provider dispatch attempt failed.
    Dispatch,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// The operation was cancelled by shutdown or caller deadline.
    Cancelled,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::SmsDisabled => write!(f, "SMS_DISABLED"),
            Self::NotEditable => write!(f, "NOT_EDITABLE"),
            Self::SchedulePast => write!(f, "SCHEDULE_PAST"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Dispatch => write!(f, "DISPATCH"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Courier.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an SMS-disabled error.
    pub fn sms_disabled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SmsDisabled, message)
    }

    /// Create a not-editable error.
    pub fn not_editable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotEditable, message)
    }

    /// Create a schedule-in-the-past error.
    pub fn schedule_past(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SchedulePast, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create a dispatch error.
    pub fn dispatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Dispatch, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a cancelled error.
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cancelled, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this error represents a provider dispatch failure, which the
    /// retry worker records on the row instead of propagating.
    pub fn is_dispatch_failure(&self) -> bool {
        matches!(self.kind, ErrorKind::Dispatch | ErrorKind::Cancelled)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = AppError::not_found("notification missing");
        assert_eq!(err.to_string(), "NOT_FOUND: notification missing");
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = AppError::with_source(ErrorKind::Database, "commit failed", io);
        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::Database);
        assert!(cloned.source.is_none());
    }

    #[test]
    fn test_dispatch_failure_classification() {
        assert!(AppError::dispatch("provider 500").is_dispatch_failure());
        assert!(AppError::cancelled("deadline").is_dispatch_failure());
        assert!(!AppError::validation("empty recipient").is_dispatch_failure());
    }
}
