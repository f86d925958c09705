//! UTC instants for row audit columns and session expiry.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wrap a value read back from a `TIMESTAMPTZ` column.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// This instant moved `secs` seconds into the future.
    pub fn plus_secs(&self, secs: u64) -> Self {
        let secs = i64::try_from(secs).unwrap_or(i64::MAX);
        Self(self.0 + Duration::seconds(secs))
    }

    /// True once the wall clock has reached this instant.
    pub fn has_passed(&self) -> bool {
        self.0 <= Utc::now()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_deadline_an_hour_out_has_not_passed() {
        let deadline = Timestamp::now().plus_secs(3600);
        assert!(!deadline.has_passed());
        assert!(Timestamp::now() < deadline);
    }

    #[test]
    fn deadline_in_the_past_has_passed() {
        let past = Timestamp::from_datetime(Utc::now() - Duration::seconds(5));
        assert!(past.has_passed());
    }

    #[test]
    fn serializes_as_rfc3339_string() {
        let ts: Timestamp = serde_json::from_str("\"2050-01-15T10:30:00Z\"").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2050-01-15T10:30:00Z\"");
    }
}
