//! ListReservationsHandler - the admin reservation tables.

use std::sync::Arc;

use crate::domain::reservation::{Reservation, ReservationError};
use crate::ports::ReservationRepository;

/// Which reservations to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationFilter {
    All,
    /// Only reservations not yet marked processed.
    New,
}

pub struct ListReservationsHandler {
    reservations: Arc<dyn ReservationRepository>,
}

impl ListReservationsHandler {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }

    pub async fn handle(&self, filter: ReservationFilter) -> Result<Vec<Reservation>, ReservationError> {
        let list = match filter {
            ReservationFilter::All => self.reservations.all_reservations().await?,
            ReservationFilter::New => self.reservations.all_new_reservations().await?,
        };
        Ok(list)
    }
}
