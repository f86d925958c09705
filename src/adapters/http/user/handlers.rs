//! HTTP handlers for staff login and logout.

use axum::extract::{Form, State};
use axum::response::Response;
use axum::Json;

use crate::domain::user::LoginForm;

use super::super::admin::handlers::DASHBOARD;
use super::super::auth::LOGIN;
use super::super::state::AppState;
use super::super::visitor::{FlashKind, VisitorSession};

/// GET /user/login - pending flash messages for the login page
pub async fn login_page(session: VisitorSession) -> Response {
    let flashes = session.take_flashes().await;
    session.respond(Json(flashes))
}

/// POST /user/login
///
/// On success the visitor continues under a new session token.
pub async fn post_login(
    State(state): State<AppState>,
    session: VisitorSession,
    Form(form): Form<LoginForm>,
) -> Response {
    let fresh = session.renewed(&state);
    match state
        .log_in_handler()
        .handle(session.handle(), fresh.handle(), form)
        .await
    {
        Ok(_) => {
            fresh.flash(FlashKind::Flash, "Logged in successfully").await;
            fresh.redirect(DASHBOARD)
        }
        Err(err) => session.fail(err, LOGIN).await,
    }
}

/// GET /user/logout
pub async fn logout(State(state): State<AppState>, session: VisitorSession) -> Response {
    if let Err(err) = state.log_out_handler().handle(session.handle()).await {
        return session.fail(err, LOGIN).await;
    }
    let fresh = session.renewed(&state);
    fresh.flash(FlashKind::Flash, "You have been logged out").await;
    fresh.redirect(LOGIN)
}
