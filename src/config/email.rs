//! Email configuration

use serde::Deserialize;

use crate::application::NotificationSettings;

use super::error::ValidationError;

/// Addresses used for booking notifications
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// From email address
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Property owner, notified about every new booking
    #[serde(default = "default_admin_address")]
    pub admin_address: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_address)
    }

    pub fn notification_settings(&self) -> NotificationSettings {
        NotificationSettings {
            from: self.from_address.clone(),
            owner: self.admin_address.clone(),
        }
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.from_address.contains('@') {
            return Err(ValidationError::InvalidEmailAddress("from_address"));
        }
        if !self.admin_address.contains('@') {
            return Err(ValidationError::InvalidEmailAddress("admin_address"));
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from_address: default_from_address(),
            from_name: default_from_name(),
            admin_address: default_admin_address(),
        }
    }
}

fn default_from_address() -> String {
    "me@here.com".to_string()
}

fn default_from_name() -> String {
    "Hotel Bookings".to_string()
}

fn default_admin_address() -> String {
    "me@here.com".to_string()
}
