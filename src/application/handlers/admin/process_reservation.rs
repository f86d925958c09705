//! ProcessReservationHandler - marks a reservation as handled.

use std::sync::Arc;

use crate::domain::foundation::ReservationId;
use crate::domain::reservation::ReservationError;
use crate::ports::ReservationRepository;

use super::reservation_lookup_error;

pub struct ProcessReservationHandler {
    reservations: Arc<dyn ReservationRepository>,
}

impl ProcessReservationHandler {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }

    pub async fn handle(&self, id: ReservationId) -> Result<(), ReservationError> {
        self.reservations
            .update_processed_for_reservation(id, true)
            .await
            .map_err(reservation_lookup_error(id))?;
        tracing::info!(reservation_id = %id, "Reservation marked processed");
        Ok(())
    }
}
