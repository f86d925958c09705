//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the booking domain.

mod errors;
mod ids;
mod stay_dates;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ReservationId, RestrictionId, RoomId, SessionToken, UserId};
pub use stay_dates::{format_date, parse_date, StayDates, DATE_LAYOUT};
pub use timestamp::Timestamp;
