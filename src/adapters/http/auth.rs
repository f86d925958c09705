//! Login guard for the admin pages.
//!
//! [`RequireAdmin`] resolves the logged-in user from the visitor session.
//! It is applied to the whole `/admin` router as a route layer, and
//! handlers that need the user take it as an argument as well. The first
//! extraction caches the user in the request extensions so the second does
//! not hit the store again.
//!
//! ```text
//! Request → RequireAdmin layer → User cached in extensions
//!                                      ↓
//!                              Handler → RequireAdmin reads it back
//! ```

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Response;

use crate::domain::user::User;

use super::state::AppState;
use super::visitor::{FlashKind, VisitorSession};

/// Where anonymous visitors are sent.
pub const LOGIN: &str = "/user/login";

/// Extractor that requires a logged-in user.
///
/// Anonymous visitors are flashed a warning and redirected to [`LOGIN`].
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub User);

#[async_trait]
impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<User>() {
            return Ok(RequireAdmin(user.clone()));
        }

        let session = match VisitorSession::from_request_parts(parts, state).await {
            Ok(session) => session,
            Err(never) => match never {},
        };

        match state.current_user_handler().handle(session.handle()).await {
            Ok(Some(user)) => {
                parts.extensions.insert(user.clone());
                Ok(RequireAdmin(user))
            }
            Ok(None) => {
                tracing::debug!(path = %parts.uri.path(), "Anonymous request for an admin page");
                session.flash(FlashKind::Warning, "Log in first!").await;
                Err(session.redirect(LOGIN))
            }
            Err(err) => Err(session.fail(err, LOGIN).await),
        }
    }
}
