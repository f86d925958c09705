//! HTTP adapters - axum routers over the application handlers.
//!
//! Responses are JSON. Visitor state lives in a server-side session keyed by
//! a cookie; see [`VisitorSession`]. The admin pages need a logged-in user;
//! see [`RequireAdmin`].

pub mod admin;
mod auth;
pub mod booking;
mod error;
mod state;
pub mod user;
mod visitor;

use std::time::Duration;

use axum::middleware::from_extractor_with_state;
use axum::Router;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use auth::{RequireAdmin, LOGIN};
pub use error::{ErrorResponse, HttpFailure};
pub use state::{AppState, CookieSettings};
pub use visitor::{FlashKind, FlashMessages, SessionCookie, VisitorSession};

/// Create the complete application router.
///
/// Public booking routes sit at the root, login under `/user`, and admin
/// routes under `/admin` behind [`RequireAdmin`]. Every request gets an
/// `x-request-id`, is traced, and is bounded by `request_timeout`.
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    let admin = admin::admin_routes()
        .route_layer(from_extractor_with_state::<RequireAdmin, _>(state.clone()));

    Router::new()
        .merge(booking::booking_routes())
        .nest("/user", user::user_routes())
        .nest("/admin", admin)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
