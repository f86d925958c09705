//! Visitor session configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Where visitor sessions are kept.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    #[default]
    Memory,
    Redis,
}

/// Session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub backend: SessionBackend,

    /// Session lifetime in seconds
    #[serde(default = "default_lifetime")]
    pub lifetime_secs: u64,

    /// Name of the cookie carrying the session token
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Force the `Secure` cookie attribute outside production
    #[serde(default)]
    pub secure_cookie: bool,
}

impl SessionConfig {
    pub fn lifetime(&self) -> Duration {
        Duration::from_secs(self.lifetime_secs)
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.lifetime_secs == 0 {
            return Err(ValidationError::InvalidSessionLifetime);
        }
        let name_ok = !self.cookie_name.is_empty()
            && self
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !name_ok {
            return Err(ValidationError::InvalidCookieName);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::default(),
            lifetime_secs: default_lifetime(),
            cookie_name: default_cookie_name(),
            secure_cookie: false,
        }
    }
}

fn default_lifetime() -> u64 {
    24 * 60 * 60
}

fn default_cookie_name() -> String {
    "session_id".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.backend, SessionBackend::Memory);
        assert_eq!(config.lifetime(), Duration::from_secs(86_400));
        assert_eq!(config.cookie_name, "session_id");
        assert!(!config.secure_cookie);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_lifetime() {
        let config = SessionConfig {
            lifetime_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSessionLifetime));
    }

    #[test]
    fn test_validation_cookie_name() {
        for bad in ["", "session id", "sess;ion"] {
            let config = SessionConfig {
                cookie_name: bad.to_string(),
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidCookieName));
        }
    }

    #[test]
    fn test_backend_deserializes_lowercase() {
        let backend: SessionBackend = serde_json::from_str("\"redis\"").unwrap();
        assert_eq!(backend, SessionBackend::Redis);
    }
}
