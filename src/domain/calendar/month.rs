//! Calendar month value object.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// One month of one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    /// Creates a month, rejecting months outside `1..=12` and years chrono
    /// cannot represent.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::invalid_format(
                "m",
                format!("month must be between 1 and 12, got {}", month),
            ));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(ValidationError::invalid_format(
                "y",
                format!("year {} is out of range", year),
            ));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // Validated in `new`/`containing`.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    pub fn day_count(&self) -> u32 {
        self.last_day().day()
    }

    /// Every day of the month, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first_day();
        (0..self.day_count() as i64).map(move |offset| first + Duration::days(offset))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_regular_month() {
        let m = CalendarMonth::new(2050, 4).unwrap();
        assert_eq!(m.first_day(), NaiveDate::from_ymd_opt(2050, 4, 1).unwrap());
        assert_eq!(m.last_day(), NaiveDate::from_ymd_opt(2050, 4, 30).unwrap());
        assert_eq!(m.days().count(), 30);
    }

    #[test]
    fn february_in_leap_year() {
        let m = CalendarMonth::new(2048, 2).unwrap();
        assert_eq!(m.day_count(), 29);
    }

    #[test]
    fn december_rolls_into_next_year() {
        let m = CalendarMonth::new(2050, 12).unwrap();
        assert_eq!(m.last_day(), NaiveDate::from_ymd_opt(2050, 12, 31).unwrap());
        assert_eq!(m.next(), CalendarMonth::new(2051, 1).unwrap());
        assert_eq!(m.next().previous(), m);
    }

    #[test]
    fn rejects_month_thirteen() {
        assert!(CalendarMonth::new(2050, 13).is_err());
        assert!(CalendarMonth::new(2050, 0).is_err());
    }

    #[test]
    fn displays_as_year_dash_month() {
        assert_eq!(CalendarMonth::new(2050, 3).unwrap().to_string(), "2050-03");
    }
}
