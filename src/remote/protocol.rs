//! Wire protocol for the remote tabular store.
//!
//! Every operation posts one action-tagged JSON object to a single
//! endpoint and receives a `{success, error?, data?}` envelope back. The
//! action names and payload fields are fixed by the store and must not
//! drift.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Month, MonthMatrix, StaffMember};

/// An action-tagged request to the store.
///
/// Serializes as a flat object with an `action` discriminator, e.g.
/// `{"action": "checkIn", "identifier": "w-001", "name": "Minh Tran"}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum StoreRequest<'a> {
    /// Fetch the staff roster.
    GetScheduleStaff,
    /// Bulk-save the staff roster.
    SaveScheduleStaff {
        /// The full roster to persist.
        staff: &'a [StaffMember],
    },
    /// Remove one staff member from the roster.
    DeleteScheduleStaffMember {
        /// The member's identifier.
        identifier: &'a str,
        /// The member's display name.
        name: &'a str,
    },
    /// Fetch ordinary attendance records for a month.
    GetAttendance {
        /// The month key.
        month: Month,
    },
    /// Record an ordinary check-in.
    CheckIn {
        /// The member's identifier.
        identifier: &'a str,
        /// The member's display name.
        name: &'a str,
    },
    /// Record an ordinary check-out.
    CheckOut {
        /// The member's identifier.
        identifier: &'a str,
        /// The member's display name.
        name: &'a str,
    },
    /// Fetch overtime records for a month.
    #[serde(rename = "getOTAttendance")]
    GetOtAttendance {
        /// The month key.
        month: Month,
    },
    /// Record an overtime check-in.
    #[serde(rename = "checkInOT")]
    CheckInOt {
        /// The member's identifier.
        identifier: &'a str,
        /// The member's display name.
        name: &'a str,
    },
    /// Record an overtime check-out.
    #[serde(rename = "checkOutOT")]
    CheckOutOt {
        /// The member's identifier.
        identifier: &'a str,
        /// The member's display name.
        name: &'a str,
    },
    /// Fetch the declared holidays for a month.
    GetHolidays {
        /// The month key.
        month: Month,
    },
    /// Flip the holiday state of a date.
    ToggleHoliday {
        /// The date to toggle.
        date: NaiveDate,
    },
    /// Fetch the manual-override map for a month.
    GetManualTimekeeping {
        /// The month key.
        month: Month,
    },
    /// Save one manual-override cell.
    SaveManualTimekeeping {
        /// The month key.
        month: Month,
        /// The member's identifier.
        identifier: &'a str,
        /// The day of the month.
        day: u32,
        /// The raw code string entered by the administrator.
        code: &'a str,
    },
    /// Replace the persisted matrix for a month.
    SaveFullMonthlyTable {
        /// The month key.
        month: Month,
        /// The full matrix to persist.
        matrix: &'a MonthMatrix,
    },
}

impl StoreRequest<'_> {
    /// The action tag this request serializes with; used for logging and
    /// error messages.
    pub fn action(&self) -> &'static str {
        match self {
            StoreRequest::GetScheduleStaff => "getScheduleStaff",
            StoreRequest::SaveScheduleStaff { .. } => "saveScheduleStaff",
            StoreRequest::DeleteScheduleStaffMember { .. } => "deleteScheduleStaffMember",
            StoreRequest::GetAttendance { .. } => "getAttendance",
            StoreRequest::CheckIn { .. } => "checkIn",
            StoreRequest::CheckOut { .. } => "checkOut",
            StoreRequest::GetOtAttendance { .. } => "getOTAttendance",
            StoreRequest::CheckInOt { .. } => "checkInOT",
            StoreRequest::CheckOutOt { .. } => "checkOutOT",
            StoreRequest::GetHolidays { .. } => "getHolidays",
            StoreRequest::ToggleHoliday { .. } => "toggleHoliday",
            StoreRequest::GetManualTimekeeping { .. } => "getManualTimekeeping",
            StoreRequest::SaveManualTimekeeping { .. } => "saveManualTimekeeping",
            StoreRequest::SaveFullMonthlyTable { .. } => "saveFullMonthlyTable",
        }
    }
}

/// The store's response envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct StoreResponse<T> {
    /// Whether the store accepted the request.
    pub success: bool,
    /// The store's error string when `success` is false.
    #[serde(default)]
    pub error: Option<String>,
    /// The payload for fetch operations; typically absent on mutations.
    #[serde(default)]
    pub data: Option<T>,
}
