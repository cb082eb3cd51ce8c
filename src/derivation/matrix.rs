//! Full-month matrix assembly.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::config::WorkdayWindows;
use crate::models::{AttendanceRecord, MatrixRow, Month, MonthMatrix, OverrideMap, StaffMember};

use super::code_rules::derive_day_code;

/// Builds the staff × day code matrix for one month.
///
/// Derives every cell from the given snapshot, so building twice over the
/// same inputs yields structurally identical matrices. One attendance
/// record per staff member per day is expected; if the store ever returns
/// duplicates, the first record for a cell wins.
///
/// Days after `today` render as empty strings but keep their key in the
/// row, so the persisted table always carries the full month.
pub fn build_month_matrix(
    month: Month,
    today: NaiveDate,
    staff: &[StaffMember],
    attendance: &[AttendanceRecord],
    overrides: &OverrideMap,
    windows: &WorkdayWindows,
) -> MonthMatrix {
    let mut by_cell: HashMap<(&str, NaiveDate), &AttendanceRecord> = HashMap::new();
    for record in attendance {
        by_cell
            .entry((record.identifier.as_str(), record.date))
            .or_insert(record);
    }

    let rows = staff
        .iter()
        .map(|member| {
            let member_overrides = overrides.get(&member.identifier);
            let codes = month
                .dates()
                .map(|(day, date)| {
                    let override_code = member_overrides
                        .and_then(|m| m.get(&day))
                        .map(String::as_str);
                    let record = by_cell.get(&(member.identifier.as_str(), date)).copied();
                    let code = derive_day_code(date, today, override_code, record, windows);
                    let cell = code.map(|c| c.as_str().to_string()).unwrap_or_default();
                    (day, cell)
                })
                .collect();

            MatrixRow {
                identifier: member.identifier.clone(),
                display_name: member.display_name.clone(),
                codes,
            }
        })
        .collect();

    MonthMatrix { month, rows }
}
