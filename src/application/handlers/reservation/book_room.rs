//! BookRoomHandler - direct booking link from a room page.

use std::sync::Arc;

use crate::domain::foundation::{RoomId, StayDates};
use crate::domain::reservation::{ReservationDraft, ReservationError, DRAFT_SESSION_KEY};
use crate::ports::{RoomRepository, SessionHandle};

use super::room_lookup_error;

/// Command carrying the `id`, `s` and `e` query parameters.
#[derive(Debug, Clone)]
pub struct BookRoomCommand {
    pub room_id: RoomId,
    pub stay: StayDates,
}

/// Starts a draft with the room already resolved, replacing any draft the
/// visitor had.
pub struct BookRoomHandler {
    rooms: Arc<dyn RoomRepository>,
}

impl BookRoomHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn handle(
        &self,
        session: &SessionHandle,
        cmd: BookRoomCommand,
    ) -> Result<ReservationDraft, ReservationError> {
        let room = self
            .rooms
            .get_room_by_id(cmd.room_id)
            .await
            .map_err(room_lookup_error(cmd.room_id))?;

        let draft = ReservationDraft::for_room(room, cmd.stay);
        session.put(DRAFT_SESSION_KEY, &draft).await?;
        Ok(draft)
    }
}
