//! Shared application state for the HTTP adapters.

use std::sync::Arc;

use crate::application::{
    ApplyCalendarEditsHandler, BookRoomHandler, BuildCalendarHandler, CheckRoomAvailabilityHandler,
    ChooseRoomHandler, CommitReservationHandler, CurrentUserHandler, DeleteReservationHandler,
    GetReservationHandler, ListReservationsHandler, ListRoomsHandler, LogInHandler, LogOutHandler,
    NotificationSettings, ProcessReservationHandler, ReservationSummaryHandler,
    SearchAvailabilityHandler, ShowReservationFormHandler, UpdateProfileHandler,
    UpdateReservationHandler,
};
use crate::ports::{
    Mailer, ReservationRepository, RestrictionRepository, RoomRepository, SessionStore,
    UserRepository,
};

/// How the visitor session cookie is written.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub max_age_secs: u64,
    pub secure: bool,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            name: "session_id".to_string(),
            max_age_secs: 24 * 60 * 60,
            secure: false,
        }
    }
}

/// Shared application state containing all dependencies.
///
/// Cloned per request; handlers are built on demand from the ports.
#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<dyn RoomRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
    pub restrictions: Arc<dyn RestrictionRepository>,
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub mailer: Arc<dyn Mailer>,
    pub notifications: NotificationSettings,
    pub cookies: CookieSettings,
}

impl AppState {
    pub fn search_availability_handler(&self) -> SearchAvailabilityHandler {
        SearchAvailabilityHandler::new(self.rooms.clone())
    }

    pub fn check_room_availability_handler(&self) -> CheckRoomAvailabilityHandler {
        CheckRoomAvailabilityHandler::new(self.rooms.clone())
    }

    pub fn list_rooms_handler(&self) -> ListRoomsHandler {
        ListRoomsHandler::new(self.rooms.clone())
    }

    pub fn choose_room_handler(&self) -> ChooseRoomHandler {
        ChooseRoomHandler::new()
    }

    pub fn book_room_handler(&self) -> BookRoomHandler {
        BookRoomHandler::new(self.rooms.clone())
    }

    pub fn show_reservation_form_handler(&self) -> ShowReservationFormHandler {
        ShowReservationFormHandler::new(self.rooms.clone())
    }

    pub fn commit_reservation_handler(&self) -> CommitReservationHandler {
        CommitReservationHandler::new(
            self.rooms.clone(),
            self.reservations.clone(),
            self.restrictions.clone(),
            self.mailer.clone(),
            self.notifications.clone(),
        )
    }

    pub fn reservation_summary_handler(&self) -> ReservationSummaryHandler {
        ReservationSummaryHandler::new()
    }

    pub fn list_reservations_handler(&self) -> ListReservationsHandler {
        ListReservationsHandler::new(self.reservations.clone())
    }

    pub fn get_reservation_handler(&self) -> GetReservationHandler {
        GetReservationHandler::new(self.reservations.clone())
    }

    pub fn update_reservation_handler(&self) -> UpdateReservationHandler {
        UpdateReservationHandler::new(self.reservations.clone())
    }

    pub fn process_reservation_handler(&self) -> ProcessReservationHandler {
        ProcessReservationHandler::new(self.reservations.clone())
    }

    pub fn delete_reservation_handler(&self) -> DeleteReservationHandler {
        DeleteReservationHandler::new(self.reservations.clone())
    }

    pub fn build_calendar_handler(&self) -> BuildCalendarHandler {
        BuildCalendarHandler::new(self.rooms.clone(), self.restrictions.clone())
    }

    pub fn apply_calendar_edits_handler(&self) -> ApplyCalendarEditsHandler {
        ApplyCalendarEditsHandler::new(self.rooms.clone(), self.restrictions.clone())
    }

    pub fn log_in_handler(&self) -> LogInHandler {
        LogInHandler::new(self.users.clone())
    }

    pub fn log_out_handler(&self) -> LogOutHandler {
        LogOutHandler::new()
    }

    pub fn current_user_handler(&self) -> CurrentUserHandler {
        CurrentUserHandler::new(self.users.clone())
    }

    pub fn update_profile_handler(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(self.users.clone())
    }
}
