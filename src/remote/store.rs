//! The narrow contract every component uses to reach persisted state.

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, Month, MonthMatrix, OtRecord, OverrideMap, StaffMember};

/// Read/write gateway over the three independent remote record sets:
/// ordinary attendance, overtime attendance, and the sparse manual
/// override map, plus the roster and holiday set they hang off.
///
/// Fetches return the rows for one month; the caller keeps no cache
/// beyond its own snapshot and refetches when the month changes.
/// Mutations are acknowledged by the store before they return, so the
/// caller can decide whether to trigger a resynchronization.
///
/// The production implementation is [`HttpStore`](super::HttpStore);
/// tests substitute an in-memory store.
#[allow(async_fn_in_trait)]
pub trait TimekeepingStore {
    /// Fetches the staff roster.
    async fn fetch_staff(&self) -> EngineResult<Vec<StaffMember>>;

    /// Bulk-saves the staff roster.
    async fn save_staff(&self, staff: &[StaffMember]) -> EngineResult<()>;

    /// Removes one staff member from the roster. Historical records are
    /// left in place.
    async fn delete_staff(&self, identifier: &str, name: &str) -> EngineResult<()>;

    /// Fetches ordinary attendance records for a month.
    async fn fetch_attendance(&self, month: Month) -> EngineResult<Vec<AttendanceRecord>>;

    /// Records an ordinary check-in. Duplicate check-ins are rejected by
    /// the store itself.
    async fn check_in(&self, identifier: &str, name: &str) -> EngineResult<()>;

    /// Records an ordinary check-out.
    async fn check_out(&self, identifier: &str, name: &str) -> EngineResult<()>;

    /// Fetches overtime records for a month.
    async fn fetch_ot(&self, month: Month) -> EngineResult<Vec<OtRecord>>;

    /// Records an overtime check-in.
    async fn check_in_ot(&self, identifier: &str, name: &str) -> EngineResult<()>;

    /// Records an overtime check-out.
    async fn check_out_ot(&self, identifier: &str, name: &str) -> EngineResult<()>;

    /// Fetches the declared holidays for a month.
    async fn fetch_holidays(&self, month: Month) -> EngineResult<Vec<NaiveDate>>;

    /// Flips the holiday state of a date.
    async fn toggle_holiday(&self, date: NaiveDate) -> EngineResult<()>;

    /// Fetches the manual-override map for a month.
    async fn fetch_overrides(&self, month: Month) -> EngineResult<OverrideMap>;

    /// Saves one manual-override cell.
    async fn save_override(
        &self,
        month: Month,
        identifier: &str,
        day: u32,
        code: &str,
    ) -> EngineResult<()>;

    /// Replaces the persisted matrix for the matrix's month.
    async fn save_matrix(&self, matrix: &MonthMatrix) -> EngineResult<()>;
}
