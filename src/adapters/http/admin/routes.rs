//! Axum router for the admin endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    all_reservations, dashboard, delete_reservation, new_reservations, post_reservations_calendar,
    process_reservation, reservations_calendar, show_profile, show_reservation, update_profile,
    update_reservation,
};

/// Create the admin router, mounted at `/admin`.
///
/// # Routes
/// - `GET /dashboard` - Pending flash messages
/// - `GET /reservations-all` - Every reservation
/// - `GET /reservations-new` - Unprocessed reservations
/// - `GET /reservations/:id` - One reservation
/// - `POST /reservations/:id` - Edit guest fields
/// - `POST /process-reservation/:id` - Mark processed
/// - `POST /delete-reservation/:id` - Delete
/// - `GET /reservations-calendar` - Month calendar
/// - `POST /reservations-calendar` - Save owner blocks
/// - `GET /profile` - The logged-in user
/// - `POST /profile` - Edit own name and email
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/reservations-all", get(all_reservations))
        .route("/reservations-new", get(new_reservations))
        .route(
            "/reservations/:id",
            get(show_reservation).post(update_reservation),
        )
        .route("/process-reservation/:id", post(process_reservation))
        .route("/delete-reservation/:id", post(delete_reservation))
        .route(
            "/reservations-calendar",
            get(reservations_calendar).post(post_reservations_calendar),
        )
        .route("/profile", get(show_profile).post(update_profile))
}
