//! ChooseRoomHandler - picks a room from the search results.

use crate::domain::foundation::RoomId;
use crate::domain::reservation::{ReservationDraft, ReservationError, DRAFT_SESSION_KEY};
use crate::ports::SessionHandle;

use super::load_draft;

#[derive(Debug, Clone)]
pub struct ChooseRoomCommand {
    pub room_id: RoomId,
}

/// Records the chosen room on the visitor's draft. The room itself is
/// looked up when the reservation form is shown.
#[derive(Debug, Default)]
pub struct ChooseRoomHandler;

impl ChooseRoomHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        session: &SessionHandle,
        cmd: ChooseRoomCommand,
    ) -> Result<ReservationDraft, ReservationError> {
        let draft = load_draft(session).await?.choose_room(cmd.room_id)?;
        session.put(DRAFT_SESSION_KEY, &draft).await?;
        tracing::debug!(room_id = %cmd.room_id, "Room chosen");
        Ok(draft)
    }
}
