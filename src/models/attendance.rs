//! Attendance and overtime record models.
//!
//! Both ledgers share the same record shape on the wire but are logically
//! independent: ordinary attendance expects at most one record per staff
//! member per day, while the overtime ledger may hold several.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One ordinary attendance record: created by a check-in, completed by a
/// check-out.
///
/// A record whose check-in is missing is not an error; code derivation
/// treats it as an unrecognized day (`RC`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// The staff member this record belongs to.
    pub identifier: String,
    /// The calendar day of the record.
    pub date: NaiveDate,
    /// Clock time of the check-in, if one was recorded.
    #[serde(with = "clock_time", default, skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<NaiveTime>,
    /// Clock time of the check-out; absent while the day is still open.
    #[serde(with = "clock_time", default, skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<NaiveTime>,
    /// Hours reported by the store, when it computes them itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<Decimal>,
}

/// One overtime record, tracked in a ledger separate from ordinary
/// attendance. Same shape as [`AttendanceRecord`]; a staff member may have
/// zero, one, or several per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtRecord {
    /// The staff member this record belongs to.
    pub identifier: String,
    /// The calendar day of the record.
    pub date: NaiveDate,
    /// Clock time of the OT check-in, if one was recorded.
    #[serde(with = "clock_time", default, skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<NaiveTime>,
    /// Clock time of the OT check-out; absent while the session is open.
    #[serde(with = "clock_time", default, skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<NaiveTime>,
    /// Hours reported by the store, when it computes them itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<Decimal>,
}

impl OtRecord {
    /// Hours this record contributes to overtime totals.
    ///
    /// Returns `None` for an open session (no check-out); an open record
    /// is an in-progress state, not an error, and contributes nothing.
    /// When the store did not report `totalHours`, the duration is
    /// recomputed from the clock times; a check-out earlier than the
    /// check-in is taken to mean the session crossed midnight.
    pub fn completed_hours(&self) -> Option<Decimal> {
        let check_out = self.check_out_time?;
        if let Some(total) = self.total_hours {
            return Some(total);
        }
        let check_in = self.check_in_time?;
        let mut minutes = (check_out - check_in).num_minutes();
        if minutes < 0 {
            minutes += 24 * 60;
        }
        Some(Decimal::from(minutes) / Decimal::from(60))
    }
}

/// Serde adapter for optional clock times.
///
/// The store writes `HH:MM:SS`, but older rows carry bare `HH:MM`; both
/// are accepted on the way in, and `HH:MM:SS` is always written out.
mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FULL: &str = "%H:%M:%S";
    const SHORT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => serializer.collect_str(&time.format(FULL)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => NaiveTime::parse_from_str(s, FULL)
                .or_else(|_| NaiveTime::parse_from_str(s, SHORT))
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
