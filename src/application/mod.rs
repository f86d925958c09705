//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers hold `Arc<dyn Port>` dependencies and take the visitor's
//! `SessionHandle` explicitly where the flow carries state between requests.

pub mod handlers;

pub use handlers::admin::{
    ApplyCalendarEditsCommand, ApplyCalendarEditsHandler, BuildCalendarHandler, CalendarEditSummary,
    CalendarView, DeleteReservationHandler, GetReservationHandler, ListReservationsHandler,
    ProcessReservationHandler, ReservationFilter, UpdateReservationCommand, UpdateReservationHandler,
};
pub use handlers::availability::{
    AvailabilityCheck, CheckRoomAvailabilityHandler, CheckRoomAvailabilityQuery, ListRoomsHandler,
    SearchAvailabilityHandler, SearchAvailabilityQuery, SearchOutcome,
};
pub use handlers::reservation::{
    BookRoomCommand, BookRoomHandler, ChooseRoomCommand, ChooseRoomHandler,
    CommitReservationHandler, NotificationSettings, ReservationFormView,
    ReservationSummaryHandler, ShowReservationFormHandler,
};
pub use handlers::user::{
    CurrentUserHandler, LogInHandler, LogOutHandler, UpdateProfileCommand, UpdateProfileHandler,
};
