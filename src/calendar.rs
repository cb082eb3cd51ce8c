//! Calendar resolution for the attendance engine.
//!
//! This module classifies calendar dates for code derivation and overtime
//! bucketing: day enumeration for a month, weekend detection, and the
//! explicit set of declared holiday dates. Everything here is a pure
//! function of its inputs under proleptic Gregorian rules; the only
//! special-casing is weekend = Saturday/Sunday.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Classification of a calendar date for overtime bucketing.
///
/// A declared holiday takes precedence over the weekend classification,
/// so overtime worked on a holiday Saturday lands in the holiday bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayClass {
    /// An ordinary working day (Monday through Friday, not a holiday).
    Normal,
    /// Saturday or Sunday, not declared a holiday.
    Weekend,
    /// A date present in the month's [`HolidaySet`].
    Holiday,
}

impl std::fmt::Display for DayClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayClass::Normal => write!(f, "Normal"),
            DayClass::Weekend => write!(f, "Weekend"),
            DayClass::Holiday => write!(f, "Holiday"),
        }
    }
}

/// The set of declared holiday dates for a month.
///
/// Mutated only through [`HolidaySet::toggle`]; a read-only input to code
/// derivation and overtime aggregation everywhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidaySet(BTreeSet<NaiveDate>);

impl HolidaySet {
    /// Creates an empty holiday set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a holiday set from a list of dates, deduplicating as it goes.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self(dates.into_iter().collect())
    }

    /// Returns true if the given date is a declared holiday.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    /// Flips the holiday state of a date. Returns true if the date is a
    /// holiday after the toggle.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        if !self.0.remove(&date) {
            self.0.insert(date);
            return true;
        }
        false
    }

    /// Returns the number of declared holidays.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no holidays are declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the declared holidays in date order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.iter().copied()
    }
}

/// Returns the number of days in the given month (1..=12), or 0 for an
/// invalid year/month pair.
///
/// # Example
///
/// ```
/// use attendance_engine::calendar::days_in_month;
///
/// assert_eq!(days_in_month(2026, 2), 28);
/// assert_eq!(days_in_month(2028, 2), 29);
/// assert_eq!(days_in_month(2026, 4), 30);
/// assert_eq!(days_in_month(2026, 13), 0);
/// ```
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next_first) {
        (Some(_), Some(next)) => next.pred_opt().map(|d| d.day()).unwrap_or(0),
        _ => 0,
    }
}

/// Returns true if the date falls on a Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Classifies a date for overtime bucketing.
///
/// The holiday set is consulted first, so a declared holiday on a weekend
/// classifies as [`DayClass::Holiday`].
///
/// # Example
///
/// ```
/// use attendance_engine::calendar::{classify_day, DayClass, HolidaySet};
/// use chrono::NaiveDate;
///
/// let holidays = HolidaySet::from_dates([NaiveDate::from_ymd_opt(2026, 4, 30).unwrap()]);
///
/// // 2026-04-30 is a Thursday, but declared a holiday
/// let date = NaiveDate::from_ymd_opt(2026, 4, 30).unwrap();
/// assert_eq!(classify_day(date, &holidays), DayClass::Holiday);
///
/// // 2026-04-25 is a Saturday
/// let date = NaiveDate::from_ymd_opt(2026, 4, 25).unwrap();
/// assert_eq!(classify_day(date, &holidays), DayClass::Weekend);
/// ```
pub fn classify_day(date: NaiveDate, holidays: &HolidaySet) -> DayClass {
    if holidays.contains(date) {
        DayClass::Holiday
    } else if is_weekend(date) {
        DayClass::Weekend
    } else {
        DayClass::Normal
    }
}
