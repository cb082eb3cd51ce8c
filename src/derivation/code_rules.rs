//! The daily code derivation algorithm.
//!
//! One pure function turns the signals for a single (staff, day) cell into
//! exactly one code, applying a strict precedence order: not-yet-due,
//! manual override, weekend, then the clock-time window rules. Given the
//! same inputs it always produces the same output, which is what makes
//! repeated matrix synchronization idempotent.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::calendar::is_weekend;
use crate::config::WorkdayWindows;
use crate::models::AttendanceRecord;

use super::day_code::DayCode;

/// Converts a clock time to minutes past midnight, ignoring seconds.
///
/// Attendance clocks have minute granularity; a check-in stamped
/// `08:15:59` still lands on minute 495 and passes an `08:15` limit.
pub fn minutes_past_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Derives the attendance code for one staff member on one day.
///
/// Precedence, in strict order:
///
/// 1. A day after `today` is not yet due: `None`, rendered as an empty
///    cell.
/// 2. A manual override wins over everything, weekends and window rules
///    included, and is returned verbatim.
/// 3. A weekend derives `RC` even when a complete record exists.
/// 4. No record, or a record without a check-in, derives `RC`.
/// 5. Otherwise the clock-time windows decide:
///    - check-in ≤ morning limit and check-out ≥ the full-day floor → `HC`
///    - check-in ≤ morning limit alone → `S`
///    - check-in within the afternoon window and check-out ≥ the
///      full-day floor → `C`
///    - anything else → `RC`
///
/// # Example
///
/// ```
/// use attendance_engine::config::WorkdayWindows;
/// use attendance_engine::derivation::{derive_day_code, DayCode};
/// use attendance_engine::models::AttendanceRecord;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(); // Wednesday
/// let today = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
/// let record = AttendanceRecord {
///     identifier: "w-001".to_string(),
///     date,
///     check_in_time: NaiveTime::from_hms_opt(8, 10, 0),
///     check_out_time: NaiveTime::from_hms_opt(17, 45, 0),
///     total_hours: None,
/// };
///
/// let code = derive_day_code(date, today, None, Some(&record), &WorkdayWindows::default());
/// assert_eq!(code, Some(DayCode::FullDay));
/// ```
pub fn derive_day_code(
    date: NaiveDate,
    today: NaiveDate,
    override_code: Option<&str>,
    record: Option<&AttendanceRecord>,
    windows: &WorkdayWindows,
) -> Option<DayCode> {
    if date > today {
        return None;
    }
    if let Some(code) = override_code {
        return Some(DayCode::from_override(code));
    }
    if is_weekend(date) {
        return Some(DayCode::Incomplete);
    }
    let Some(check_in) = record.and_then(|r| r.check_in_time) else {
        return Some(DayCode::Incomplete);
    };

    let check_in = minutes_past_midnight(check_in);
    let check_out = record
        .and_then(|r| r.check_out_time)
        .map(minutes_past_midnight);

    let morning_limit = minutes_past_midnight(windows.morning_check_in_limit);
    let afternoon_start = minutes_past_midnight(windows.afternoon_check_in_start);
    let afternoon_end = minutes_past_midnight(windows.afternoon_check_in_end);
    let check_out_floor = minutes_past_midnight(windows.full_day_check_out);

    let checked_out_complete = check_out.is_some_and(|out| out >= check_out_floor);

    let code = if check_in <= morning_limit && checked_out_complete {
        DayCode::FullDay
    } else if check_in <= morning_limit {
        DayCode::Morning
    } else if (afternoon_start..=afternoon_end).contains(&check_in) && checked_out_complete {
        DayCode::Afternoon
    } else {
        DayCode::Incomplete
    };
    Some(code)
}
