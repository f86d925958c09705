//! Login form validation.

use serde::Deserialize;

use crate::domain::reservation::{is_valid_email, FormErrors};

use super::AuthError;

/// Credentials as posted to the login form.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    /// Checks both fields, collecting every failure. The password is not
    /// trimmed.
    pub fn validate(&self) -> Result<(), AuthError> {
        let mut errors = FormErrors::new();
        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", "This field cannot be blank");
        } else if !is_valid_email(email) {
            errors.add("email", "Invalid email address");
        }
        if self.password.is_empty() {
            errors.add("password", "This field cannot be blank");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AuthError::Validation(errors))
        }
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
