//! ReservationSummaryHandler - shows the committed reservation once.

use crate::domain::reservation::{Reservation, ReservationError, DRAFT_SESSION_KEY};
use crate::ports::SessionHandle;

use super::load_draft;

/// Takes the committed reservation out of the session. A second visit
/// finds nothing and restarts the flow.
#[derive(Debug, Default)]
pub struct ReservationSummaryHandler;

impl ReservationSummaryHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, session: &SessionHandle) -> Result<Reservation, ReservationError> {
        let draft = load_draft(session).await?;
        let reservation = draft.committed().cloned().ok_or(ReservationError::NoDraft)?;
        session.remove(DRAFT_SESSION_KEY).await?;
        Ok(reservation)
    }
}
