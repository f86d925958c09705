//! Reservation repository port (write and admin read side).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ReservationId};
use crate::domain::reservation::{NewReservation, Reservation};

/// Repository port for reservations.
///
/// Listing and lookup operations return reservations with their `room`
/// populated.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert a reservation and return its assigned id.
    async fn insert_reservation(&self, new: &NewReservation) -> Result<ReservationId, DomainError>;

    /// Every reservation, ordered by start date.
    async fn all_reservations(&self) -> Result<Vec<Reservation>, DomainError>;

    /// Unprocessed reservations, ordered by start date.
    async fn all_new_reservations(&self) -> Result<Vec<Reservation>, DomainError>;

    /// Find a reservation by id.
    ///
    /// # Errors
    ///
    /// - `ReservationNotFound` if no such reservation exists
    async fn get_reservation_by_id(&self, id: ReservationId) -> Result<Reservation, DomainError>;

    /// Persist the guest fields of an existing reservation.
    ///
    /// Stay dates and room are not changed by this call.
    async fn update_reservation(&self, reservation: &Reservation) -> Result<(), DomainError>;

    /// Delete a reservation. Its restriction rows go with it.
    async fn delete_reservation(&self, id: ReservationId) -> Result<(), DomainError>;

    /// Set the processed flag.
    async fn update_processed_for_reservation(
        &self,
        id: ReservationId,
        processed: bool,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ReservationRepository) {}
    }
}
