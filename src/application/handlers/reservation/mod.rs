//! Reservation flow handlers: the session-carried draft from room choice
//! through commit and summary.

mod book_room;
mod choose_room;
mod commit_reservation;
mod reservation_summary;
mod show_reservation_form;

pub use book_room::{BookRoomCommand, BookRoomHandler};
pub use choose_room::{ChooseRoomCommand, ChooseRoomHandler};
pub use commit_reservation::{prepare_commit, CommitReservationHandler, NotificationSettings};
pub use reservation_summary::ReservationSummaryHandler;
pub use show_reservation_form::{ReservationFormView, ShowReservationFormHandler};

use crate::domain::foundation::{DomainError, RoomId};
use crate::domain::reservation::{ReservationDraft, ReservationError, DRAFT_SESSION_KEY};
use crate::ports::{SessionHandle, SessionRead};

/// Reads the visitor's draft. Absent and malformed values both restart the
/// flow.
pub(crate) async fn load_draft(session: &SessionHandle) -> Result<ReservationDraft, ReservationError> {
    match session.get::<ReservationDraft>(DRAFT_SESSION_KEY).await? {
        SessionRead::Present(draft) => Ok(draft),
        SessionRead::Absent => Err(ReservationError::NoDraft),
        SessionRead::Malformed(reason) => {
            tracing::warn!(%reason, "Discarding unreadable reservation draft");
            session.remove(DRAFT_SESSION_KEY).await?;
            Err(ReservationError::NoDraft)
        }
    }
}

/// Maps a failed room lookup, keeping not-found distinct from store errors.
fn room_lookup_error(room_id: RoomId) -> impl FnOnce(DomainError) -> ReservationError {
    move |e| {
        if e.is_not_found() {
            ReservationError::RoomNotFound(room_id)
        } else {
            ReservationError::Store(e)
        }
    }
}
