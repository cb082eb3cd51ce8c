//! The month key used to scope every fetch and every matrix write.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::calendar::days_in_month;
use crate::error::{EngineError, EngineResult};

/// A calendar month, the unit of navigation and persistence.
///
/// Months print and parse as `YYYY-MM` (e.g. `2026-07`), the key format the
/// remote store expects. Every fetched payload and every matrix batch write
/// is tagged with a `Month`, which is also the token used to discard stale
/// responses after the user navigates away.
///
/// # Example
///
/// ```
/// use attendance_engine::models::Month;
///
/// let month: Month = "2026-07".parse().unwrap();
/// assert_eq!(month.year(), 2026);
/// assert_eq!(month.day_count(), 31);
/// assert_eq!(month.to_string(), "2026-07");
///
/// assert!("2026-13".parse::<Month>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Creates a month, rejecting anything outside 1..=12 or outside the
    /// range chrono can represent.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::InvalidMonth {
                value: format!("{year:04}-{month:02}"),
            });
        }
        Ok(Self { year, month })
    }

    /// Returns the month containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month number (1..=12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The number of days in this month.
    pub fn day_count(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Ordered day numbers `1..=N` for this month.
    pub fn days(&self) -> impl Iterator<Item = u32> {
        1..=self.day_count()
    }

    /// The date for a day number within this month, or `None` if the day
    /// number is out of range.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Ordered `(day, date)` pairs for every day of this month.
    pub fn dates(&self) -> impl Iterator<Item = (u32, NaiveDate)> + '_ {
        self.days()
            .filter_map(move |day| self.date(day).map(|date| (day, date)))
    }

    /// Returns true if the date falls within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidMonth {
            value: s.to_string(),
        };
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
