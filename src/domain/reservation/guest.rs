//! Guest detail form validation.
//!
//! Validation collects every failing field instead of stopping at the
//! first, so the form can be redisplayed with per-field annotations.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{parse_date, RoomId, StayDates, ValidationError};

/// Minimum accepted length of `first_name`.
pub const FIRST_NAME_MIN_LEN: usize = 3;

const BLANK: &str = "This field cannot be blank";
const INVALID_EMAIL: &str = "Invalid email address";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email pattern compiles")
});

/// True when `value` matches the accepted email grammar.
pub fn is_valid_email(value: &str) -> bool {
    value.len() <= 254 && EMAIL_RE.is_match(value)
}

/// Field name to messages, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// First message for a field, for inline display.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(|m| m.first()).map(String::as_str)
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn add_validation(&mut self, field: &str, err: ValidationError) {
        let message = match err {
            ValidationError::EmptyField { .. } => BLANK.to_string(),
            ValidationError::TooShort { min, .. } => {
                format!("This field must be at least {} characters long", min)
            }
            ValidationError::InvalidFormat { reason, .. } => reason,
            ValidationError::InvalidRange { .. } => {
                "Departure must be after arrival".to_string()
            }
        };
        self.add(field, message);
    }
}

/// Raw guest form as posted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub room_id: String,
}

/// Validated guest contact fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl GuestDetails {
    /// Validates contact fields only, accumulating into `errors`.
    pub fn collect(
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
        errors: &mut FormErrors,
    ) -> Option<Self> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        let email = email.trim();

        if first_name.is_empty() {
            errors.add_validation("first_name", ValidationError::empty_field("first_name"));
        } else if first_name.chars().count() < FIRST_NAME_MIN_LEN {
            errors.add_validation(
                "first_name",
                ValidationError::too_short("first_name", FIRST_NAME_MIN_LEN),
            );
        }

        if last_name.is_empty() {
            errors.add_validation("last_name", ValidationError::empty_field("last_name"));
        }

        if email.is_empty() {
            errors.add_validation("email", ValidationError::empty_field("email"));
        } else if !is_valid_email(email) {
            errors.add("email", INVALID_EMAIL);
        }

        if errors.has("first_name") || errors.has("last_name") || errors.has("email") {
            return None;
        }

        Some(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone: phone.trim().to_string(),
        })
    }

    /// Validates contact fields, returning every failure.
    pub fn parse(
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
    ) -> Result<Self, FormErrors> {
        let mut errors = FormErrors::new();
        match Self::collect(first_name, last_name, email, phone, &mut errors) {
            Some(details) => Ok(details),
            None => Err(errors),
        }
    }
}

/// A guest form that passed every syntactic rule.
///
/// Whether `room_id` names an existing room is checked against the store
/// by the committer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub guest: GuestDetails,
    pub stay: StayDates,
    pub room_id: RoomId,
}

impl GuestForm {
    /// Validates every field of the form.
    pub fn validate(&self) -> Result<BookingRequest, FormErrors> {
        let mut errors = FormErrors::new();

        let guest = GuestDetails::collect(
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &mut errors,
        );

        let start = parse_date("start_date", &self.start_date)
            .map_err(|e| errors.add_validation("start_date", e))
            .ok();
        let end = parse_date("end_date", &self.end_date)
            .map_err(|e| errors.add_validation("end_date", e))
            .ok();
        let stay = match (start, end) {
            (Some(start), Some(end)) => StayDates::new(start, end)
                .map_err(|e| errors.add_validation("end_date", e))
                .ok(),
            _ => None,
        };

        let room_id = match self.room_id.trim() {
            "" => {
                errors.add("room_id", BLANK);
                None
            }
            raw => match raw.parse::<RoomId>() {
                Ok(id) if id.as_i32() > 0 => Some(id),
                _ => {
                    errors.add("room_id", "Invalid room");
                    None
                }
            },
        };

        match (guest, stay, room_id) {
            (Some(guest), Some(stay), Some(room_id)) if errors.is_empty() => Ok(BookingRequest {
                guest,
                stay,
                room_id,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> GuestForm {
        GuestForm {
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            email: "john@gmail.com".to_string(),
            phone: "555-555-5555".to_string(),
            start_date: "2050-01-01".to_string(),
            end_date: "2050-01-02".to_string(),
            room_id: "1".to_string(),
        }
    }

    #[test]
    fn valid_form_produces_booking_request() {
        let request = valid_form().validate().unwrap();
        assert_eq!(request.guest.first_name, "John");
        assert_eq!(request.room_id, RoomId::new(1));
        assert_eq!(request.stay.nights(), 1);
    }

    #[test]
    fn short_first_name_is_flagged() {
        let form = GuestForm {
            first_name: "J".to_string(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("first_name"),
            Some("This field must be at least 3 characters long")
        );
        assert!(!errors.has("email"));
    }

    #[test]
    fn blank_required_fields_are_all_reported() {
        let form = GuestForm {
            first_name: " ".to_string(),
            last_name: "".to_string(),
            email: "".to_string(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("first_name"), Some(BLANK));
        assert_eq!(errors.get("last_name"), Some(BLANK));
        assert_eq!(errors.get("email"), Some(BLANK));
    }

    #[test]
    fn malformed_email_is_flagged() {
        let form = GuestForm {
            email: "john@".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap_err().get("email"), Some(INVALID_EMAIL));
    }

    #[test]
    fn dates_must_match_layout_and_order() {
        let form = GuestForm {
            start_date: "2050/01/01".to_string(),
            ..valid_form()
        };
        assert!(form.validate().unwrap_err().has("start_date"));

        let form = GuestForm {
            start_date: "2050-01-05".to_string(),
            end_date: "2050-01-02".to_string(),
            ..valid_form()
        };
        assert!(form.validate().unwrap_err().has("end_date"));
    }

    #[test]
    fn room_id_must_be_positive_number() {
        let form = GuestForm {
            room_id: "abc".to_string(),
            ..valid_form()
        };
        assert!(form.validate().unwrap_err().has("room_id"));

        let form = GuestForm {
            room_id: "0".to_string(),
            ..valid_form()
        };
        assert!(form.validate().unwrap_err().has("room_id"));
    }

    #[test]
    fn email_grammar() {
        assert!(is_valid_email("john@gmail.com"));
        assert!(is_valid_email("a.b+tag@sub.example.org"));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("john@localhost"));
        assert!(!is_valid_email("john doe@example.com"));
    }

    #[test]
    fn form_errors_serialize_as_field_map() {
        let mut errors = FormErrors::new();
        errors.add("first_name", "too short");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["first_name"][0], "too short");
    }
}
