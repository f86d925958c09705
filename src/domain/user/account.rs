//! Staff account record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::reservation::{is_valid_email, FormErrors};

/// Session key holding the logged-in [`UserId`].
pub const USER_SESSION_KEY: &str = "user_id";

/// A staff account. The password hash is kept by the repository only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Higher levels see more; every level may use the admin pages.
    pub access_level: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Replaces the profile fields. Access level is left alone.
    pub fn apply_profile(&mut self, profile: Profile) {
        self.first_name = profile.first_name;
        self.last_name = profile.last_name;
        self.email = profile.email;
    }
}

/// Validated name and email for a profile edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    first_name: String,
    last_name: String,
    email: String,
}

impl Profile {
    /// Trims every field and checks them all, collecting failures.
    pub fn parse(first_name: &str, last_name: &str, email: &str) -> Result<Self, FormErrors> {
        let mut errors = FormErrors::new();
        let (first_name, last_name, email) = (first_name.trim(), last_name.trim(), email.trim());
        for (field, value) in [("first_name", first_name), ("last_name", last_name)] {
            if value.is_empty() {
                errors.add(field, "This field cannot be blank");
            }
        }
        if !is_valid_email(email) {
            errors.add("email", "Invalid email address");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        })
    }
}
