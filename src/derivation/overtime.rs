//! Overtime hour aggregation.
//!
//! Sums completed overtime records per staff member for a month into three
//! buckets keyed by day classification. Raw hours accumulate unrounded;
//! each bucket is rounded to two decimal places once at the end so
//! per-record rounding error cannot compound.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::calendar::{DayClass, HolidaySet, classify_day};
use crate::models::OtRecord;

/// Per-staff overtime totals for a month, bucketed by day classification.
///
/// Each bucket is independently rounded to two decimal places; the
/// displayed total re-rounds the sum of the three rounded buckets, so it
/// can differ from rounding the raw sum once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSummary {
    /// Hours worked on ordinary weekdays.
    pub normal: Decimal,
    /// Hours worked on weekends that are not holidays.
    pub weekend: Decimal,
    /// Hours worked on declared holidays.
    pub holiday: Decimal,
}

impl OvertimeSummary {
    /// Total overtime for display: the three buckets summed and re-rounded
    /// to two decimal places.
    pub fn total(&self) -> Decimal {
        round_hours(self.normal + self.weekend + self.holiday)
    }
}

fn round_hours(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Sums completed overtime records for one staff member.
///
/// Records belonging to other staff are skipped, as are open sessions
/// (no check-out): an open session is in progress, not an error, and
/// contributes zero. Each record's date is classified holiday-first, then
/// weekend, then normal.
///
/// # Example
///
/// ```
/// use attendance_engine::calendar::HolidaySet;
/// use attendance_engine::derivation::summarize_overtime;
/// use attendance_engine::models::OtRecord;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let records = vec![OtRecord {
///     identifier: "w-001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(), // Wednesday
///     check_in_time: NaiveTime::from_hms_opt(18, 0, 0),
///     check_out_time: NaiveTime::from_hms_opt(21, 30, 0),
///     total_hours: None,
/// }];
///
/// let summary = summarize_overtime("w-001", &records, &HolidaySet::new());
/// assert_eq!(summary.normal, Decimal::new(350, 2)); // 3.50
/// assert_eq!(summary.total(), Decimal::new(350, 2));
/// ```
pub fn summarize_overtime(
    identifier: &str,
    records: &[OtRecord],
    holidays: &HolidaySet,
) -> OvertimeSummary {
    let mut normal = Decimal::ZERO;
    let mut weekend = Decimal::ZERO;
    let mut holiday = Decimal::ZERO;

    for record in records.iter().filter(|r| r.identifier == identifier) {
        let Some(hours) = record.completed_hours() else {
            continue;
        };
        match classify_day(record.date, holidays) {
            DayClass::Holiday => holiday += hours,
            DayClass::Weekend => weekend += hours,
            DayClass::Normal => normal += hours,
        }
    }

    OvertimeSummary {
        normal: round_hours(normal),
        weekend: round_hours(weekend),
        holiday: round_hours(holiday),
    }
}
