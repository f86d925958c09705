//! Stay date range value object.
//!
//! A stay covers `[start, end)`: the guest checks in on `start` and checks
//! out on `end`, so a stay ending on the day another begins does not
//! conflict with it.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Literal date pattern used by every form field and query parameter.
pub const DATE_LAYOUT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` form value, naming `field` in the error.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    NaiveDate::parse_from_str(value, DATE_LAYOUT)
        .map_err(|_| ValidationError::invalid_format(field, "expected a date as YYYY-MM-DD"))
}

/// Formats a date with [`DATE_LAYOUT`].
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_LAYOUT).to_string()
}

/// Half-open date interval with `start < end`.
///
/// Every constructor enforces the ordering except
/// [`StayDates::from_stored_unchecked`], which trusts stored rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStay")]
pub struct StayDates {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawStay {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawStay> for StayDates {
    type Error = ValidationError;

    fn try_from(raw: RawStay) -> Result<Self, Self::Error> {
        StayDates::new(raw.start, raw.end)
    }
}

impl StayDates {
    /// Creates a stay, rejecting empty or inverted ranges.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::invalid_range(
                format_date(start),
                format_date(end),
            ));
        }
        Ok(Self { start, end })
    }

    /// Parses both ends from `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start = parse_date("start_date", start)?;
        let end = parse_date("end_date", end)?;
        Self::new(start, end)
    }

    /// A single night starting on `date`.
    pub fn single_night(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date + Duration::days(1),
        }
    }

    /// Rebuilds a range read from storage without checking `start < end`.
    ///
    /// This is the one constructor that can yield an empty or inverted
    /// range. Rows written by older tooling may carry `start == end`; such a
    /// stay has zero nights and overlaps nothing. Only repository row
    /// mappers should call it. Input from visitors goes through [`Self::new`].
    pub fn from_stored_unchecked(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of nights in the stay.
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Half-open overlap test: `self.start < other.end && self.end > other.start`.
    pub fn overlaps(&self, other: &StayDates) -> bool {
        self.start < other.end && self.end > other.start
    }
}

impl fmt::Display for StayDates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", format_date(self.start), format_date(self.end))
    }
}
