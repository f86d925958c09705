//! Visitor session extraction and one-shot flash messages.
//!
//! A visitor is identified by an opaque token carried in a cookie. Requests
//! without one get a fresh token, and the first response sets the cookie.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, IntoResponseParts, Redirect, Response, ResponseParts};
use serde::Serialize;

use crate::domain::foundation::SessionToken;
use crate::ports::SessionHandle;

use super::state::{AppState, CookieSettings};

/// Severity of a flash message; each has its own session key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Flash,
    Warning,
    Error,
}

impl FlashKind {
    pub fn session_key(self) -> &'static str {
        match self {
            FlashKind::Flash => "flash",
            FlashKind::Warning => "warning",
            FlashKind::Error => "error",
        }
    }
}

/// Flash messages pending for the visitor, consumed on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlashMessages {
    pub flash: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

/// The visitor's session, extracted from the request cookie.
#[derive(Debug, Clone)]
pub struct VisitorSession {
    handle: SessionHandle,
    set_cookie: Option<HeaderValue>,
}

impl VisitorSession {
    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    /// True when this request minted the token.
    pub fn is_new(&self) -> bool {
        self.set_cookie.is_some()
    }

    pub fn cookie(&self) -> SessionCookie {
        SessionCookie(self.set_cookie.clone())
    }

    /// A new, empty session under a fresh token, with its cookie pending.
    ///
    /// The old token's values are not copied; callers destroy them.
    pub fn renewed(&self, state: &AppState) -> Self {
        let token = SessionToken::new();
        tracing::debug!(previous = %self.handle.token(), session = %token, "Renewing session token");
        Self {
            handle: SessionHandle::new(state.sessions.clone(), token),
            set_cookie: session_cookie(&state.cookies, &token),
        }
    }

    /// Attaches the session cookie, if one must be set, to a response.
    pub fn respond(&self, body: impl IntoResponse) -> Response {
        (self.cookie(), body).into_response()
    }

    /// 303 See Other to `to`.
    pub fn redirect(&self, to: &str) -> Response {
        self.respond(Redirect::to(to))
    }

    /// Stores a flash message. Failures are logged and swallowed.
    pub async fn flash(&self, kind: FlashKind, message: impl Into<String>) {
        let message = message.into();
        if let Err(err) = self.handle.put(kind.session_key(), &message).await {
            tracing::warn!(error = %err, kind = kind.session_key(), "Failed to store flash message");
        }
    }

    /// Pops every pending flash message.
    pub async fn take_flashes(&self) -> FlashMessages {
        FlashMessages {
            flash: self.pop(FlashKind::Flash).await,
            warning: self.pop(FlashKind::Warning).await,
            error: self.pop(FlashKind::Error).await,
        }
    }

    async fn pop(&self, kind: FlashKind) -> Option<String> {
        match self.handle.pop_string(kind.session_key()).await {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!(error = %err, kind = kind.session_key(), "Failed to read flash message");
                None
            }
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for VisitorSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let (token, set_cookie) = match token_from_cookies(&parts.headers, &state.cookies.name) {
            Some(token) => (token, None),
            None => {
                let token = SessionToken::new();
                tracing::debug!(session = %token, "Starting visitor session");
                (token, session_cookie(&state.cookies, &token))
            }
        };

        Ok(Self {
            handle: SessionHandle::new(state.sessions.clone(), token),
            set_cookie,
        })
    }
}

/// `Set-Cookie` for a newly minted session; empty otherwise.
#[derive(Debug, Clone)]
pub struct SessionCookie(Option<HeaderValue>);

impl IntoResponseParts for SessionCookie {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Some(value) = self.0 {
            res.headers_mut().append(SET_COOKIE, value);
        }
        Ok(res)
    }
}

/// Finds a well-formed session token among the request cookies.
pub(crate) fn token_from_cookies(headers: &HeaderMap, name: &str) -> Option<SessionToken> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .filter(|(key, _)| *key == name)
        .find_map(|(_, value)| value.trim().parse().ok())
}

pub(crate) fn session_cookie(settings: &CookieSettings, token: &SessionToken) -> Option<HeaderValue> {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        settings.name, token, settings.max_age_secs
    );
    if settings.secure {
        cookie.push_str("; Secure");
    }
    match HeaderValue::from_str(&cookie) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(error = %err, "Session cookie is not a valid header value");
            None
        }
    }
}
