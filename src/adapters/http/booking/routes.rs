//! Axum router for the public booking endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    book_room, choose_room, landing, list_rooms, post_reservation, reservation_summary,
    search_availability, search_availability_json, show_reservation_form,
};

/// Create the booking router.
///
/// # Routes
/// - `GET /` - Pending flash messages
/// - `GET /rooms` - All rooms
/// - `GET /search-availability` - Pending flash messages for the search page
/// - `POST /search-availability` - Rooms free for a stay
/// - `POST /search-availability-json` - Whether one room is free
/// - `GET /choose-room/:id` - Choose a room from the results
/// - `GET /book-room` - Book a room directly from its page
/// - `GET /make-reservation` - Guest details form
/// - `POST /make-reservation` - Commit the booking
/// - `GET /reservation-summary` - The committed booking
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(landing))
        .route("/rooms", get(list_rooms))
        .route("/search-availability", get(landing).post(search_availability))
        .route("/search-availability-json", post(search_availability_json))
        .route("/choose-room/:id", get(choose_room))
        .route("/book-room", get(book_room))
        .route(
            "/make-reservation",
            get(show_reservation_form).post(post_reservation),
        )
        .route("/reservation-summary", get(reservation_summary))
}
