//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// A single rejected input field. Guest forms collect these per field;
/// dates fail fast on the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be at least {min} characters long")]
    TooShort { field: String, min: usize },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Date range is invalid: start {start} must be before end {end}")]
    InvalidRange { start: String, end: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn too_short(field: impl Into<String>, min: usize) -> Self {
        ValidationError::TooShort {
            field: field.into(),
            min,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// End on or before start.
    pub fn invalid_range(start: impl fmt::Display, end: impl fmt::Display) -> Self {
        ValidationError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

/// Machine-readable failure codes, surfaced as `error_code` over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,

    RoomNotFound,
    ReservationNotFound,
    UserNotFound,

    /// Unknown email or wrong password; the two are not distinguished.
    InvalidCredentials,

    /// A store call ran past its statement deadline.
    Timeout,
    DatabaseError,
    /// The visitor session store could not be read or written.
    SessionUnavailable,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::RoomNotFound => "ROOM_NOT_FOUND",
            ErrorCode::ReservationNotFound => "RESERVATION_NOT_FOUND",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::SessionUnavailable => "SESSION_UNAVAILABLE",
        };
        write!(f, "{}", s)
    }
}

/// Failure reported by a repository port.
///
/// Store adapters surface every failure as a `DomainError`; callers treat
/// anything outside the not-found codes as opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a database error wrapping a driver message.
    pub fn database(context: &str, err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
    }

    /// Creates a timeout error for an operation that exceeded its deadline.
    pub fn timeout(operation: &str) -> Self {
        Self::new(
            ErrorCode::Timeout,
            format!("Operation '{}' exceeded its deadline", operation),
        )
        .with_detail("operation", operation)
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// True for the not-found family of codes.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::RoomNotFound | ErrorCode::ReservationNotFound | ErrorCode::UserNotFound
        )
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(ErrorCode::ValidationFailed, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_names_the_field() {
        let err = ValidationError::empty_field("first_name");
        assert_eq!(format!("{}", err), "Field 'first_name' cannot be empty");
    }

    #[test]
    fn too_short_states_the_minimum() {
        let err = ValidationError::too_short("first_name", 3);
        assert_eq!(
            format!("{}", err),
            "Field 'first_name' must be at least 3 characters long"
        );
    }

    #[test]
    fn invalid_range_shows_both_dates() {
        let err = ValidationError::invalid_range("2050-01-02", "2050-01-01");
        assert!(err.to_string().contains("2050-01-02"));
        assert!(err.to_string().contains("2050-01-01"));
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::RoomNotFound, "Room not found: 3");
        assert_eq!(format!("{}", err), "[ROOM_NOT_FOUND] Room not found: 3");
    }

    #[test]
    fn timeout_error_records_operation() {
        let err = DomainError::timeout("insert_reservation");
        assert_eq!(err.code, ErrorCode::Timeout);
        assert_eq!(
            err.details.get("operation"),
            Some(&"insert_reservation".to_string())
        );
    }

    #[test]
    fn not_found_codes_are_classified() {
        assert!(DomainError::new(ErrorCode::ReservationNotFound, "x").is_not_found());
        assert!(!DomainError::new(ErrorCode::DatabaseError, "x").is_not_found());
    }
}
