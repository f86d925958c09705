//! Reservation-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ReservationId, RoomId};
use crate::ports::SessionStoreError;

use super::{DraftState, FormErrors};

/// Illegal draft state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Cannot {action} a draft in state {from}")]
    InvalidTransition {
        from: DraftState,
        action: &'static str,
    },

    #[error("Draft chose room {expected} but room {actual} was supplied")]
    RoomMismatch { expected: RoomId, actual: RoomId },
}

impl DraftError {
    pub fn invalid_transition(from: DraftState, action: &'static str) -> Self {
        DraftError::InvalidTransition { from, action }
    }
}

/// Errors surfaced by the booking flow and reservation admin.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReservationError {
    /// No usable draft in session; the flow restarts from search.
    #[error("No reservation in progress")]
    NoDraft,

    /// Field-level validation failures, for redisplay.
    #[error("Reservation form has errors in: {}", .0.fields().collect::<Vec<_>>().join(", "))]
    Validation(FormErrors),

    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    #[error("Reservation not found: {0}")]
    NotFound(ReservationId),

    #[error(transparent)]
    Draft(#[from] DraftError),

    /// The reservation row exists but its occupancy lock was not written.
    #[error("Reservation {reservation_id} saved without a room restriction: {reason}")]
    RestrictionNotRecorded {
        reservation_id: ReservationId,
        reason: String,
    },

    #[error("Store error: {0}")]
    Store(DomainError),

    #[error("Session error: {0}")]
    Session(String),
}

impl ReservationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ReservationError::NoDraft => ErrorCode::ValidationFailed,
            ReservationError::Validation(_) => ErrorCode::ValidationFailed,
            ReservationError::RoomNotFound(_) => ErrorCode::RoomNotFound,
            ReservationError::NotFound(_) => ErrorCode::ReservationNotFound,
            ReservationError::Draft(_) => ErrorCode::ValidationFailed,
            ReservationError::RestrictionNotRecorded { .. } => ErrorCode::DatabaseError,
            ReservationError::Store(err) => err.code,
            ReservationError::Session(_) => ErrorCode::SessionUnavailable,
        }
    }

    /// Short message suitable for a one-shot flash.
    pub fn user_message(&self) -> String {
        match self {
            ReservationError::NoDraft => "Can't get reservation from session".to_string(),
            ReservationError::Validation(_) => "Please correct the highlighted fields".to_string(),
            ReservationError::RoomNotFound(_) => "Can't find room".to_string(),
            ReservationError::NotFound(_) => "Can't find reservation".to_string(),
            ReservationError::Draft(_) => "Please start your search again".to_string(),
            ReservationError::RestrictionNotRecorded { .. } => {
                "Your reservation was saved but could not be confirmed; please contact us".to_string()
            }
            ReservationError::Store(_) | ReservationError::Session(_) => {
                "Something went wrong, please try again".to_string()
            }
        }
    }
}

impl From<DomainError> for ReservationError {
    fn from(err: DomainError) -> Self {
        ReservationError::Store(err)
    }
}

impl From<SessionStoreError> for ReservationError {
    fn from(err: SessionStoreError) -> Self {
        ReservationError::Session(err.to_string())
    }
}
