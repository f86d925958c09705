//! Administrator handlers: reservation review and the block calendar.

mod apply_calendar_edits;
mod build_calendar;
mod delete_reservation;
mod get_reservation;
mod list_reservations;
mod process_reservation;
mod update_reservation;

pub use apply_calendar_edits::{
    ApplyCalendarEditsCommand, ApplyCalendarEditsHandler, CalendarEditSummary,
};
pub use build_calendar::{BuildCalendarHandler, CalendarView};
pub use delete_reservation::DeleteReservationHandler;
pub use get_reservation::GetReservationHandler;
pub use list_reservations::{ListReservationsHandler, ReservationFilter};
pub use process_reservation::ProcessReservationHandler;
pub use update_reservation::{UpdateReservationCommand, UpdateReservationHandler};

use crate::domain::foundation::{DomainError, ReservationId};
use crate::domain::reservation::ReservationError;

/// Maps a failed reservation lookup, keeping not-found distinct.
fn reservation_lookup_error(id: ReservationId) -> impl FnOnce(DomainError) -> ReservationError {
    move |e| {
        if e.is_not_found() {
            ReservationError::NotFound(id)
        } else {
            ReservationError::Store(e)
        }
    }
}
