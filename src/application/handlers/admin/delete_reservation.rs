//! DeleteReservationHandler - removes a reservation and frees its dates.

use std::sync::Arc;

use crate::domain::foundation::ReservationId;
use crate::domain::reservation::ReservationError;
use crate::ports::ReservationRepository;

use super::reservation_lookup_error;

pub struct DeleteReservationHandler {
    reservations: Arc<dyn ReservationRepository>,
}

impl DeleteReservationHandler {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }

    pub async fn handle(&self, id: ReservationId) -> Result<(), ReservationError> {
        self.reservations
            .delete_reservation(id)
            .await
            .map_err(reservation_lookup_error(id))?;
        tracing::info!(reservation_id = %id, "Reservation deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryBookingStore;
    use crate::application::handlers::admin::test_support::book;

    #[tokio::test]
    async fn delete_removes_reservation_and_its_lock() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        let id = book(&store, 1, "2050-01-01", "2050-01-03").await;

        DeleteReservationHandler::new(store.clone()).handle(id).await.unwrap();

        assert!(store.reservations().await.is_empty());
        assert!(store.restrictions().await.is_empty());
    }
}
