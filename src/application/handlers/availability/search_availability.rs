//! SearchAvailabilityHandler - finds every room free for a date range.

use std::sync::Arc;

use crate::domain::foundation::StayDates;
use crate::domain::reservation::{ReservationDraft, ReservationError, Room, DRAFT_SESSION_KEY};
use crate::ports::{RoomRepository, SessionHandle};

/// Query for rooms free over `stay`.
#[derive(Debug, Clone)]
pub struct SearchAvailabilityQuery {
    pub stay: StayDates,
}

/// Outcome of a successful search. No availability is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Available { stay: StayDates, rooms: Vec<Room> },
    NoAvailability,
}

/// Handler for the public availability search.
///
/// A non-empty result starts a draft in the visitor's session.
pub struct SearchAvailabilityHandler {
    rooms: Arc<dyn RoomRepository>,
}

impl SearchAvailabilityHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn handle(
        &self,
        session: &SessionHandle,
        query: SearchAvailabilityQuery,
    ) -> Result<SearchOutcome, ReservationError> {
        let rooms = self
            .rooms
            .search_availability_for_all_rooms(query.stay)
            .await?;

        if rooms.is_empty() {
            tracing::info!(stay = %query.stay, "No rooms available");
            return Ok(SearchOutcome::NoAvailability);
        }

        let draft = ReservationDraft::select_range(query.stay);
        session.put(DRAFT_SESSION_KEY, &draft).await?;

        tracing::debug!(stay = %query.stay, available = rooms.len(), "Availability search matched");
        Ok(SearchOutcome::Available {
            stay: query.stay,
            rooms,
        })
    }
}
