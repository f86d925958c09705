//! ShowReservationFormHandler - prepares the guest details form.

use std::sync::Arc;

use crate::domain::reservation::{
    DraftError, GuestForm, ReservationDraft, ReservationError, Room, DRAFT_SESSION_KEY,
};
use crate::ports::{RoomRepository, SessionHandle};

use super::{load_draft, room_lookup_error};

/// What the reservation page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationFormView {
    pub room: Room,
    pub form: GuestForm,
    pub draft: ReservationDraft,
}

pub struct ShowReservationFormHandler {
    rooms: Arc<dyn RoomRepository>,
}

impl ShowReservationFormHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn handle(&self, session: &SessionHandle) -> Result<ReservationFormView, ReservationError> {
        let draft = load_draft(session).await?;

        let draft = if draft.room().is_some() {
            draft
        } else {
            self.resolve_room(session, draft).await?
        };

        let room = draft
            .room()
            .cloned()
            .ok_or_else(|| DraftError::invalid_transition(draft.state(), "show the form for"))?;

        Ok(ReservationFormView {
            room,
            form: draft.form_defaults(),
            draft,
        })
    }

    async fn resolve_room(
        &self,
        session: &SessionHandle,
        draft: ReservationDraft,
    ) -> Result<ReservationDraft, ReservationError> {
        let room_id = draft
            .room_id()
            .ok_or_else(|| DraftError::invalid_transition(draft.state(), "show the form for"))?;
        let room = self
            .rooms
            .get_room_by_id(room_id)
            .await
            .map_err(room_lookup_error(room_id))?;
        let draft = draft.attach_room(room)?;
        session.put(DRAFT_SESSION_KEY, &draft).await?;
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryBookingStore;
    use crate::application::handlers::reservation::test_support::session;
    use crate::domain::foundation::{RoomId, StayDates};

    fn stay() -> StayDates {
        StayDates::parse("2050-01-01", "2050-01-04").unwrap()
    }

    #[tokio::test]
    async fn resolves_chosen_room_and_prefills_hidden_fields() {
        let session = session();
        let draft = ReservationDraft::select_range(stay())
            .choose_room(RoomId::new(2))
            .unwrap();
        session.put(DRAFT_SESSION_KEY, &draft).await.unwrap();
        let handler = ShowReservationFormHandler::new(Arc::new(InMemoryBookingStore::seeded()));

        let view = handler.handle(&session).await.unwrap();

        assert_eq!(view.room.id, RoomId::new(2));
        assert_eq!(view.form.start_date, "2050-01-01");
        assert_eq!(view.form.end_date, "2050-01-04");
        assert_eq!(view.form.room_id, "2");
        let stored = load_draft(&session).await.unwrap();
        assert!(stored.room().is_some());
    }

    #[tokio::test]
    async fn range_only_draft_cannot_show_form() {
        let session = session();
        session
            .put(DRAFT_SESSION_KEY, &ReservationDraft::select_range(stay()))
            .await
            .unwrap();
        let handler = ShowReservationFormHandler::new(Arc::new(InMemoryBookingStore::seeded()));

        let err = handler.handle(&session).await.unwrap_err();
        assert!(matches!(err, ReservationError::Draft(_)));
    }

    #[tokio::test]
    async fn missing_draft_restarts_flow() {
        let handler = ShowReservationFormHandler::new(Arc::new(InMemoryBookingStore::seeded()));
        let err = handler.handle(&session()).await.unwrap_err();
        assert_eq!(err, ReservationError::NoDraft);
    }
}
