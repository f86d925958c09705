//! Login and account errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::reservation::FormErrors;
use crate::ports::SessionStoreError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("Login form has errors in: {}", .0.fields().collect::<Vec<_>>().join(", "))]
    Validation(FormErrors),

    /// Unknown email or wrong password.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Store error: {0}")]
    Store(DomainError),

    #[error("Session error: {0}")]
    Session(String),
}

impl AuthError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AuthError::Validation(_) => ErrorCode::ValidationFailed,
            AuthError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AuthError::UserNotFound(_) => ErrorCode::UserNotFound,
            AuthError::Store(err) => err.code,
            AuthError::Session(_) => ErrorCode::SessionUnavailable,
        }
    }

    /// Short message suitable for a one-shot flash.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "Please correct the highlighted fields",
            AuthError::InvalidCredentials => "Invalid login credentials",
            AuthError::UserNotFound(_) => "Can't find user",
            AuthError::Store(_) | AuthError::Session(_) => "Something went wrong, please try again",
        }
    }
}

impl From<DomainError> for AuthError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidCredentials => AuthError::InvalidCredentials,
            _ => AuthError::Store(err),
        }
    }
}

impl From<SessionStoreError> for AuthError {
    fn from(err: SessionStoreError) -> Self {
        AuthError::Session(err.to_string())
    }
}
