//! Room repository port.
//!
//! Rooms are reference data; the only interesting queries are the two
//! availability searches, which apply the half-open overlap predicate
//! `existing.start < requested.end AND existing.end > requested.start`
//! against room restrictions.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RoomId, StayDates};
use crate::domain::reservation::Room;

/// Repository port for rooms and availability.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// All rooms ordered by id.
    async fn all_rooms(&self) -> Result<Vec<Room>, DomainError>;

    /// Find a room by id.
    ///
    /// # Errors
    ///
    /// - `RoomNotFound` if no such room exists
    /// - `DatabaseError` / `Timeout` on store failure
    async fn get_room_by_id(&self, id: RoomId) -> Result<Room, DomainError>;

    /// True iff no restriction for `room_id` overlaps `stay`.
    ///
    /// Touching ranges (checkout day equal to check-in day) do not overlap.
    async fn search_availability_by_dates_by_room_id(
        &self,
        stay: StayDates,
        room_id: RoomId,
    ) -> Result<bool, DomainError>;

    /// Rooms with no restriction overlapping `stay`, ordered by id.
    ///
    /// An empty result is not an error.
    async fn search_availability_for_all_rooms(
        &self,
        stay: StayDates,
    ) -> Result<Vec<Room>, DomainError>;
}
