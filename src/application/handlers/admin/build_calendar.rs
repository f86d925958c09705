//! BuildCalendarHandler - the admin month view of reservations and blocks.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::calendar::{
    block_map_session_key, CachedBlocks, CalendarError, CalendarMonth, RoomCalendar,
};
use crate::ports::{RestrictionRepository, RoomRepository, SessionHandle};

/// Every room's day maps for one month, plus navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarView {
    pub month: CalendarMonth,
    pub previous: CalendarMonth,
    pub next: CalendarMonth,
    pub rooms: Vec<RoomCalendar>,
}

/// Builds the month view and caches each room's block map in the session
/// for the next edit submission.
pub struct BuildCalendarHandler {
    rooms: Arc<dyn RoomRepository>,
    restrictions: Arc<dyn RestrictionRepository>,
}

impl BuildCalendarHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>, restrictions: Arc<dyn RestrictionRepository>) -> Self {
        Self {
            rooms,
            restrictions,
        }
    }

    pub async fn handle(
        &self,
        session: &SessionHandle,
        month: CalendarMonth,
    ) -> Result<CalendarView, CalendarError> {
        let rooms = self.rooms.all_rooms().await?;
        let mut calendars = Vec::with_capacity(rooms.len());

        for room in rooms {
            let rows = self
                .restrictions
                .get_restrictions_for_room_by_date(room.id, month.first_day(), month.last_day())
                .await?;
            let calendar = RoomCalendar::build(&month, room, &rows);
            let cached = CachedBlocks::new(month, calendar.blocks.clone());
            session
                .put(&block_map_session_key(calendar.room.id), &cached)
                .await?;
            calendars.push(calendar);
        }

        tracing::debug!(month = %month, rooms = calendars.len(), "Calendar built");
        Ok(CalendarView {
            month,
            previous: month.previous(),
            next: month.next(),
            rooms: calendars,
        })
    }
}
