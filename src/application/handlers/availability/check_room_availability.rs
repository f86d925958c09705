//! CheckRoomAvailabilityHandler - single-room availability for the JSON
//! endpoint used by the room pages.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{format_date, RoomId, StayDates};
use crate::domain::reservation::ReservationError;
use crate::ports::RoomRepository;

#[derive(Debug, Clone)]
pub struct CheckRoomAvailabilityQuery {
    pub room_id: RoomId,
    pub stay: StayDates,
}

/// JSON body returned to the room page's availability widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityCheck {
    pub ok: bool,
    pub message: String,
    pub room_id: String,
    pub start_date: String,
    pub end_date: String,
}

impl AvailabilityCheck {
    pub fn new(available: bool, room_id: RoomId, stay: StayDates) -> Self {
        Self {
            ok: available,
            message: String::new(),
            room_id: room_id.to_string(),
            start_date: format_date(stay.start()),
            end_date: format_date(stay.end()),
        }
    }

    /// Body for a request that could not be answered.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            room_id: String::new(),
            start_date: String::new(),
            end_date: String::new(),
        }
    }
}

pub struct CheckRoomAvailabilityHandler {
    rooms: Arc<dyn RoomRepository>,
}

impl CheckRoomAvailabilityHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn handle(
        &self,
        query: CheckRoomAvailabilityQuery,
    ) -> Result<AvailabilityCheck, ReservationError> {
        let available = self
            .rooms
            .search_availability_by_dates_by_room_id(query.stay, query.room_id)
            .await?;
        Ok(AvailabilityCheck::new(available, query.room_id, query.stay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryBookingStore;
    use crate::domain::foundation::parse_date;
    use crate::ports::RestrictionRepository;

    fn query(start: &str, end: &str) -> CheckRoomAvailabilityQuery {
        CheckRoomAvailabilityQuery {
            room_id: RoomId::new(1),
            stay: StayDates::parse(start, end).unwrap(),
        }
    }

    #[tokio::test]
    async fn touching_ranges_are_available() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        store
            .insert_block_for_room(RoomId::new(1), parse_date("d", "2050-01-02").unwrap())
            .await
            .unwrap();
        let handler = CheckRoomAvailabilityHandler::new(store);

        let check = handler.handle(query("2050-01-01", "2050-01-02")).await.unwrap();

        assert!(check.ok);
        assert_eq!(check.room_id, "1");
        assert_eq!(check.start_date, "2050-01-01");
        assert_eq!(check.end_date, "2050-01-02");
    }

    #[tokio::test]
    async fn overlapping_block_makes_room_unavailable() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        store
            .insert_block_for_room(RoomId::new(1), parse_date("d", "2050-01-02").unwrap())
            .await
            .unwrap();
        let handler = CheckRoomAvailabilityHandler::new(store);

        let check = handler.handle(query("2050-01-01", "2050-01-03")).await.unwrap();
        assert!(!check.ok);
    }

    #[test]
    fn failed_check_serializes_with_message() {
        let json = serde_json::to_value(AvailabilityCheck::failed("Error querying database")).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["message"], "Error querying database");
    }
}
