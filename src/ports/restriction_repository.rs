//! Room restriction repository port.
//!
//! Restrictions are the date-range locks behind availability: one row per
//! reservation plus one row per owner block.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, RestrictionId, RoomId};
use crate::domain::reservation::{NewRoomRestriction, RoomRestriction};

#[async_trait]
pub trait RestrictionRepository: Send + Sync {
    /// Insert a restriction row and return its id.
    async fn insert_room_restriction(
        &self,
        restriction: &NewRoomRestriction,
    ) -> Result<RestrictionId, DomainError>;

    /// Rows for `room_id` touching `[first, last]`.
    ///
    /// Uses `first < row.end AND last >= row.start`, so a row ending on
    /// `first` is excluded and a row starting on `last` is included.
    async fn get_restrictions_for_room_by_date(
        &self,
        room_id: RoomId,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<RoomRestriction>, DomainError>;

    /// Insert a single-night owner block starting on `date`.
    async fn insert_block_for_room(
        &self,
        room_id: RoomId,
        date: NaiveDate,
    ) -> Result<RestrictionId, DomainError>;

    /// Delete a restriction row by id. A row that is already gone is not
    /// an error.
    async fn delete_block_by_id(&self, id: RestrictionId) -> Result<(), DomainError>;
}
