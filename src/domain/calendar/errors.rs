//! Calendar-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::SessionStoreError;

/// Errors from building or editing the admin calendar.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalendarError {
    #[error("Invalid month: {0}")]
    InvalidMonth(#[from] ValidationError),

    /// A store call failed; edits applied before it are not rolled back.
    #[error("Store error: {0}")]
    Store(#[from] DomainError),

    #[error("Session error: {0}")]
    Session(String),
}

impl CalendarError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CalendarError::InvalidMonth(_) => ErrorCode::ValidationFailed,
            CalendarError::Store(err) => err.code,
            CalendarError::Session(_) => ErrorCode::SessionUnavailable,
        }
    }
}

impl From<SessionStoreError> for CalendarError {
    fn from(err: SessionStoreError) -> Self {
        CalendarError::Session(err.to_string())
    }
}
