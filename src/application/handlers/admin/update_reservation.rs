//! UpdateReservationHandler - admin edits to a guest's contact fields.

use std::sync::Arc;

use crate::domain::foundation::ReservationId;
use crate::domain::reservation::{GuestDetails, Reservation, ReservationError};
use crate::ports::ReservationRepository;

use super::reservation_lookup_error;

/// Edited guest fields. Dates and room are not editable here.
#[derive(Debug, Clone)]
pub struct UpdateReservationCommand {
    pub id: ReservationId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

pub struct UpdateReservationHandler {
    reservations: Arc<dyn ReservationRepository>,
}

impl UpdateReservationHandler {
    pub fn new(reservations: Arc<dyn ReservationRepository>) -> Self {
        Self { reservations }
    }

    pub async fn handle(&self, cmd: UpdateReservationCommand) -> Result<Reservation, ReservationError> {
        let guest = GuestDetails::parse(&cmd.first_name, &cmd.last_name, &cmd.email, &cmd.phone)
            .map_err(ReservationError::Validation)?;

        let mut reservation = self
            .reservations
            .get_reservation_by_id(cmd.id)
            .await
            .map_err(reservation_lookup_error(cmd.id))?;
        reservation.apply_guest_details(guest);

        self.reservations
            .update_reservation(&reservation)
            .await
            .map_err(reservation_lookup_error(cmd.id))?;

        tracing::info!(reservation_id = %cmd.id, "Reservation updated");
        Ok(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryBookingStore;
    use crate::application::handlers::admin::test_support::book;

    fn cmd(id: ReservationId, first_name: &str) -> UpdateReservationCommand {
        UpdateReservationCommand {
            id,
            first_name: first_name.to_string(),
            last_name: "Jones".to_string(),
            email: "jane@example.com".to_string(),
            phone: "123".to_string(),
        }
    }

    #[tokio::test]
    async fn update_persists_guest_fields() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        let id = book(&store, 1, "2050-01-01", "2050-01-02").await;
        let handler = UpdateReservationHandler::new(store.clone());

        handler.handle(cmd(id, "Jane")).await.unwrap();

        let stored = store.get_reservation_by_id(id).await.unwrap();
        assert_eq!(stored.first_name, "Jane");
        assert_eq!(stored.email, "jane@example.com");
        assert_eq!(stored.stay.start().to_string(), "2050-01-01");
    }

    #[tokio::test]
    async fn invalid_fields_are_rejected_without_write() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        let id = book(&store, 1, "2050-01-01", "2050-01-02").await;
        let handler = UpdateReservationHandler::new(store.clone());

        let err = handler.handle(cmd(id, "Jo")).await.unwrap_err();

        assert!(matches!(err, ReservationError::Validation(ref e) if e.has("first_name")));
        assert_eq!(store.get_reservation_by_id(id).await.unwrap().first_name, "John");
    }
}
