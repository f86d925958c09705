//! Axum router for the login endpoints.

use axum::{routing::get, Router};

use super::super::state::AppState;
use super::handlers::{login_page, logout, post_login};

/// Create the user router, mounted at `/user`.
///
/// # Routes
/// - `GET /login` - Pending flash messages for the login page
/// - `POST /login` - Check credentials and start an admin session
/// - `GET /logout` - End the session
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(post_login))
        .route("/logout", get(logout))
}
