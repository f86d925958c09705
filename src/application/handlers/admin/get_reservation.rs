//! GetReservationHandler - one reservation for the admin detail page.

use std::sync::Arc;

use crate::domain::foundation::ReservationId;
use crate::domain::reservation::{Reservation, ReservationError};
use crate::ports::ReservationRepository;

use super::reservation_lookup_error;

pub struct GetReservationHandler {
    reservations: Arc<dyn ReservationRepository>,
}

impl GetReservationHandler {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }

    pub async fn handle(&self, id: ReservationId) -> Result<Reservation, ReservationError> {
        self.reservations
            .get_reservation_by_id(id)
            .await
            .map_err(reservation_lookup_error(id))
    }
}
