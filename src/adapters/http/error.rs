//! Mapping of application errors onto HTTP responses.
//!
//! Field errors are answered in place with 422 and a per-field message map.
//! Everything the visitor cannot fix on the same page becomes a flash
//! message and a 303 to a landing page.

use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::calendar::CalendarError;
use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::reservation::{FormErrors, ReservationError};
use crate::domain::user::AuthError;

use super::visitor::{FlashKind, VisitorSession};

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Per-field messages, when the request had invalid fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<FormErrors>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: FormErrors,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// How a failed request is answered.
#[derive(Debug, Clone)]
pub enum HttpFailure {
    /// Answer in place with a JSON error body.
    Reply {
        status: StatusCode,
        body: ErrorResponse,
    },
    /// Flash `message` and send the visitor elsewhere.
    Redirect { message: String, cause: String },
}

impl HttpFailure {
    pub fn redirect(message: impl Into<String>) -> Self {
        let message = message.into();
        HttpFailure::Redirect {
            cause: message.clone(),
            message,
        }
    }

    pub fn invalid_fields(errors: FormErrors) -> Self {
        HttpFailure::Reply {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: ErrorResponse::with_details(
                ErrorCode::ValidationFailed.to_string(),
                "Please correct the highlighted fields",
                errors,
            ),
        }
    }

    pub fn not_found(code: ErrorCode, message: impl Into<String>) -> Self {
        HttpFailure::Reply {
            status: StatusCode::NOT_FOUND,
            body: ErrorResponse::new(code.to_string(), message),
        }
    }
}

impl From<ValidationError> for HttpFailure {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
            ValidationError::InvalidRange { .. } => "end_date".to_string(),
        };
        let mut errors = FormErrors::new();
        errors.add(field, err.to_string());
        HttpFailure::invalid_fields(errors)
    }
}

impl From<ReservationError> for HttpFailure {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::Validation(errors) => HttpFailure::invalid_fields(errors),
            ReservationError::NotFound(_) => {
                HttpFailure::not_found(err.code(), err.user_message())
            }
            other => HttpFailure::Redirect {
                message: other.user_message(),
                cause: other.to_string(),
            },
        }
    }
}

impl From<CalendarError> for HttpFailure {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::InvalidMonth(inner) => HttpFailure::Reply {
                status: StatusCode::BAD_REQUEST,
                body: ErrorResponse::new(ErrorCode::ValidationFailed.to_string(), inner.to_string()),
            },
            other => HttpFailure::Redirect {
                message: "Something went wrong, please try again".to_string(),
                cause: other.to_string(),
            },
        }
    }
}

impl From<AuthError> for HttpFailure {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(errors) => HttpFailure::invalid_fields(errors),
            other => HttpFailure::Redirect {
                message: other.user_message().to_string(),
                cause: other.to_string(),
            },
        }
    }
}

impl VisitorSession {
    /// Turns a failure into a response, flashing to `landing` when needed.
    pub async fn fail(&self, failure: impl Into<HttpFailure>, landing: &str) -> Response {
        match failure.into() {
            HttpFailure::Reply { status, body } => self.respond((status, Json(body))),
            HttpFailure::Redirect { message, cause } => {
                tracing::warn!(error = %cause, landing, "Request failed, redirecting");
                self.flash(FlashKind::Error, message).await;
                self.redirect(landing)
            }
        }
    }
}
