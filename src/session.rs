//! The month-view session: the explicit context object that owns the
//! in-memory snapshot for the active month.
//!
//! All reads flow store → snapshot → derivation; the derived view is
//! always recomputed from the snapshot and never read back from a matrix
//! write, so a failed synchronization cannot corrupt it. Every fetched
//! payload is applied through an `install_*` method that checks the month
//! it was requested for against the active month, which is how a response
//! arriving after the user navigated away gets discarded instead of
//! clobbering the new month's state.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use crate::calendar::HolidaySet;
use crate::config::WorkdayWindows;
use crate::derivation::{OvertimeSummary, build_month_matrix, summarize_overtime};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Month, MonthMatrix, OtRecord, OverrideMap, StaffMember};
use crate::remote::TimekeepingStore;

/// What caused a matrix synchronization.
///
/// An explicit save surfaces failures to the administrator; the silent
/// background reconciliation that follows every state-changing action
/// logs and swallows them, since the in-memory view stays correct either
/// way and a later write supersedes an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTrigger {
    /// The administrator pressed "save table".
    Explicit,
    /// Automatic reconciliation after a successful mutation.
    Background,
}

/// One month-view session over the remote store.
///
/// Holds the roster, both attendance ledgers, the manual-override map and
/// the holiday set for exactly one month. Switching months discards the
/// snapshot and refetches; there is no cross-month caching.
pub struct MonthSession<S> {
    store: S,
    month: Month,
    windows: WorkdayWindows,
    staff: Vec<StaffMember>,
    attendance: Vec<AttendanceRecord>,
    ot: Vec<OtRecord>,
    overrides: OverrideMap,
    holidays: HolidaySet,
    last_persisted: Option<MonthMatrix>,
}

impl<S: TimekeepingStore> MonthSession<S> {
    /// Opens a session on the given month and loads its snapshot.
    pub async fn open(store: S, month: Month, windows: WorkdayWindows) -> EngineResult<Self> {
        let mut session = Self {
            store,
            month,
            windows,
            staff: Vec::new(),
            attendance: Vec::new(),
            ot: Vec::new(),
            overrides: OverrideMap::new(),
            holidays: HolidaySet::new(),
            last_persisted: None,
        };
        session.refresh().await?;
        Ok(session)
    }

    /// The active month.
    pub fn month(&self) -> Month {
        self.month
    }

    /// The roster the matrix iterates over.
    pub fn staff(&self) -> &[StaffMember] {
        &self.staff
    }

    /// The declared holidays of the active month.
    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    /// The manual-override map of the active month.
    pub fn overrides(&self) -> &OverrideMap {
        &self.overrides
    }

    /// The last matrix successfully written to the store, if any.
    ///
    /// This is the persisted report, distinct from the derived view
    /// returned by [`MonthSession::build_matrix`]; it lags the view when
    /// a background write has failed.
    pub fn last_persisted(&self) -> Option<&MonthMatrix> {
        self.last_persisted.as_ref()
    }

    /// Refetches the whole snapshot for the active month.
    pub async fn refresh(&mut self) -> EngineResult<()> {
        let month = self.month;
        let staff = self.store.fetch_staff().await?;
        let attendance = self.store.fetch_attendance(month).await?;
        let ot = self.store.fetch_ot(month).await?;
        let overrides = self.store.fetch_overrides(month).await?;
        let holidays = self.store.fetch_holidays(month).await?;

        self.staff = staff;
        self.install_attendance(month, attendance);
        self.install_ot(month, ot);
        self.install_overrides(month, overrides);
        self.install_holidays(month, holidays);
        Ok(())
    }

    /// Navigates to a different month: drops the snapshot and refetches.
    pub async fn switch_month(&mut self, month: Month) -> EngineResult<()> {
        self.month = month;
        self.attendance.clear();
        self.ot.clear();
        self.overrides.clear();
        self.holidays = HolidaySet::new();
        self.last_persisted = None;
        self.refresh().await
    }

    /// Applies fetched attendance rows if they still belong to the active
    /// month. Returns false when the payload is stale and was discarded.
    pub fn install_attendance(&mut self, month: Month, records: Vec<AttendanceRecord>) -> bool {
        if month != self.month {
            debug!(%month, active = %self.month, "discarding stale attendance payload");
            return false;
        }
        self.attendance = records;
        true
    }

    /// Applies fetched overtime rows; stale payloads are discarded.
    pub fn install_ot(&mut self, month: Month, records: Vec<OtRecord>) -> bool {
        if month != self.month {
            debug!(%month, active = %self.month, "discarding stale overtime payload");
            return false;
        }
        self.ot = records;
        true
    }

    /// Applies a fetched override map; stale payloads are discarded.
    pub fn install_overrides(&mut self, month: Month, overrides: OverrideMap) -> bool {
        if month != self.month {
            debug!(%month, active = %self.month, "discarding stale override payload");
            return false;
        }
        self.overrides = overrides;
        true
    }

    /// Applies fetched holidays; stale payloads are discarded.
    pub fn install_holidays(&mut self, month: Month, holidays: Vec<NaiveDate>) -> bool {
        if month != self.month {
            debug!(%month, active = %self.month, "discarding stale holiday payload");
            return false;
        }
        self.holidays = HolidaySet::from_dates(holidays);
        true
    }

    /// Records an ordinary check-in for a roster member, refetches the
    /// ledger, and reconciles the persisted matrix in the background.
    ///
    /// The returned result reflects only the check-in itself; the store
    /// rejects duplicates on its side.
    pub async fn check_in(&mut self, identifier: &str) -> EngineResult<()> {
        let name = self.display_name_for(identifier)?;
        self.store.check_in(identifier, &name).await?;
        let month = self.month;
        let records = self.store.fetch_attendance(month).await?;
        self.install_attendance(month, records);
        self.background_sync().await;
        Ok(())
    }

    /// Records an ordinary check-out; otherwise like
    /// [`MonthSession::check_in`].
    pub async fn check_out(&mut self, identifier: &str) -> EngineResult<()> {
        let name = self.display_name_for(identifier)?;
        self.store.check_out(identifier, &name).await?;
        let month = self.month;
        let records = self.store.fetch_attendance(month).await?;
        self.install_attendance(month, records);
        self.background_sync().await;
        Ok(())
    }

    /// Records an overtime check-in and refetches the overtime ledger.
    pub async fn check_in_ot(&mut self, identifier: &str) -> EngineResult<()> {
        let name = self.display_name_for(identifier)?;
        self.store.check_in_ot(identifier, &name).await?;
        let month = self.month;
        let records = self.store.fetch_ot(month).await?;
        self.install_ot(month, records);
        self.background_sync().await;
        Ok(())
    }

    /// Records an overtime check-out and refetches the overtime ledger.
    pub async fn check_out_ot(&mut self, identifier: &str) -> EngineResult<()> {
        let name = self.display_name_for(identifier)?;
        self.store.check_out_ot(identifier, &name).await?;
        let month = self.month;
        let records = self.store.fetch_ot(month).await?;
        self.install_ot(month, records);
        self.background_sync().await;
        Ok(())
    }

    /// Saves one manual-override cell, then reconciles in the background.
    ///
    /// The local map is updated only after the store acknowledges the
    /// write, so a failed save never leaves a phantom override behind.
    pub async fn set_override(
        &mut self,
        identifier: &str,
        day: u32,
        code: &str,
    ) -> EngineResult<()> {
        if self.month.date(day).is_none() {
            return Err(EngineError::Validation {
                field: "day".to_string(),
                message: format!("day {day} is not in {}", self.month),
            });
        }
        self.display_name_for(identifier)?;

        self.store
            .save_override(self.month, identifier, day, code)
            .await?;
        self.overrides
            .entry(identifier.to_string())
            .or_default()
            .insert(day, code.to_string());
        self.background_sync().await;
        Ok(())
    }

    /// Flips the holiday state of a date within the active month.
    pub async fn toggle_holiday(&mut self, date: NaiveDate) -> EngineResult<()> {
        if !self.month.contains(date) {
            return Err(EngineError::Validation {
                field: "date".to_string(),
                message: format!("{date} is not in {}", self.month),
            });
        }
        self.store.toggle_holiday(date).await?;
        self.holidays.toggle(date);
        Ok(())
    }

    /// Validates and bulk-saves the roster.
    ///
    /// Every entry needs a unique, non-empty identifier and a display
    /// name; nothing is sent to the store until the whole batch passes.
    pub async fn save_roster(&mut self, entries: Vec<StaffMember>) -> EngineResult<()> {
        validate_roster(&entries)?;
        self.store.save_staff(&entries).await?;
        self.staff = entries;
        Ok(())
    }

    /// Removes a staff member from the roster.
    ///
    /// Historical attendance, overtime, and override rows are left
    /// untouched; the member simply stops appearing in matrices built
    /// from now on.
    pub async fn remove_staff(&mut self, identifier: &str) -> EngineResult<()> {
        let name = self.display_name_for(identifier)?;
        self.store.delete_staff(identifier, &name).await?;
        self.staff.retain(|member| member.identifier != identifier);
        Ok(())
    }

    /// Builds the derived staff × day matrix from the current snapshot.
    pub fn build_matrix(&self) -> MonthMatrix {
        build_month_matrix(
            self.month,
            today(),
            &self.staff,
            &self.attendance,
            &self.overrides,
            &self.windows,
        )
    }

    /// Overtime totals for one staff member over the active month.
    pub fn overtime_summary(&self, identifier: &str) -> OvertimeSummary {
        summarize_overtime(identifier, &self.ot, &self.holidays)
    }

    /// Builds the matrix from current state and writes it to the store.
    ///
    /// Each call is an independent snapshot; no locking is needed because
    /// the store's batch write is a full-month replace. Failure handling
    /// depends on the trigger: explicit saves propagate the error,
    /// background reconciliation logs it and reports success-of-nothing.
    pub async fn sync_matrix(&mut self, trigger: SyncTrigger) -> EngineResult<()> {
        let matrix = self.build_matrix();
        match self.store.save_matrix(&matrix).await {
            Ok(()) => {
                self.last_persisted = Some(matrix);
                Ok(())
            }
            Err(error) => match trigger {
                SyncTrigger::Explicit => Err(error),
                SyncTrigger::Background => {
                    warn!(month = %self.month, %error, "background matrix sync failed");
                    Ok(())
                }
            },
        }
    }

    async fn background_sync(&mut self) {
        // Infallible by construction; failures are logged inside.
        let _ = self.sync_matrix(SyncTrigger::Background).await;
    }

    fn display_name_for(&self, identifier: &str) -> EngineResult<String> {
        self.staff
            .iter()
            .find(|member| member.identifier == identifier)
            .map(|member| member.display_name.clone())
            .ok_or_else(|| EngineError::UnknownStaff {
                identifier: identifier.to_string(),
            })
    }
}

fn validate_roster(entries: &[StaffMember]) -> EngineResult<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        if entry.identifier.trim().is_empty() {
            return Err(EngineError::Validation {
                field: "identifier".to_string(),
                message: format!(
                    "missing identifier for roster entry '{}'",
                    entry.display_name
                ),
            });
        }
        if entry.display_name.trim().is_empty() {
            return Err(EngineError::Validation {
                field: "displayName".to_string(),
                message: format!("missing display name for '{}'", entry.identifier),
            });
        }
        if !seen.insert(entry.identifier.as_str()) {
            return Err(EngineError::Validation {
                field: "identifier".to_string(),
                message: format!("duplicate identifier '{}'", entry.identifier),
            });
        }
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::sync::Mutex;

    /// In-memory store stub with switchable failure for matrix writes.
    #[derive(Default)]
    struct StubStore {
        attendance: Vec<AttendanceRecord>,
        ot: Vec<OtRecord>,
        fail_matrix_writes: bool,
        saved_matrices: Mutex<Vec<MonthMatrix>>,
        check_ins: Mutex<Vec<String>>,
    }

    impl TimekeepingStore for StubStore {
        async fn fetch_staff(&self) -> EngineResult<Vec<StaffMember>> {
            Ok(vec![member("w-001", "Minh Tran"), member("w-002", "Lan Pham")])
        }

        async fn save_staff(&self, _staff: &[StaffMember]) -> EngineResult<()> {
            Ok(())
        }

        async fn delete_staff(&self, _identifier: &str, _name: &str) -> EngineResult<()> {
            Ok(())
        }

        async fn fetch_attendance(&self, _month: Month) -> EngineResult<Vec<AttendanceRecord>> {
            Ok(self.attendance.clone())
        }

        async fn check_in(&self, identifier: &str, _name: &str) -> EngineResult<()> {
            self.check_ins.lock().unwrap().push(identifier.to_string());
            Ok(())
        }

        async fn check_out(&self, _identifier: &str, _name: &str) -> EngineResult<()> {
            Ok(())
        }

        async fn fetch_ot(&self, _month: Month) -> EngineResult<Vec<OtRecord>> {
            Ok(self.ot.clone())
        }

        async fn check_in_ot(&self, _identifier: &str, _name: &str) -> EngineResult<()> {
            Ok(())
        }

        async fn check_out_ot(&self, _identifier: &str, _name: &str) -> EngineResult<()> {
            Ok(())
        }

        async fn fetch_holidays(&self, _month: Month) -> EngineResult<Vec<NaiveDate>> {
            Ok(Vec::new())
        }

        async fn toggle_holiday(&self, _date: NaiveDate) -> EngineResult<()> {
            Ok(())
        }

        async fn fetch_overrides(&self, _month: Month) -> EngineResult<OverrideMap> {
            Ok(OverrideMap::new())
        }

        async fn save_override(
            &self,
            _month: Month,
            _identifier: &str,
            _day: u32,
            _code: &str,
        ) -> EngineResult<()> {
            Ok(())
        }

        async fn save_matrix(&self, matrix: &MonthMatrix) -> EngineResult<()> {
            if self.fail_matrix_writes {
                return Err(EngineError::Network {
                    action: "saveFullMonthlyTable".to_string(),
                    message: "connection reset".to_string(),
                });
            }
            self.saved_matrices.lock().unwrap().push(matrix.clone());
            Ok(())
        }
    }

    fn member(identifier: &str, name: &str) -> StaffMember {
        StaffMember {
            identifier: identifier.to_string(),
            display_name: name.to_string(),
            role_label: String::new(),
        }
    }

    fn month(s: &str) -> Month {
        s.parse().unwrap()
    }

    async fn open_session(store: StubStore) -> MonthSession<StubStore> {
        // A past month keeps every day due regardless of the wall clock.
        MonthSession::open(store, month("2021-03"), WorkdayWindows::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_open_loads_roster() {
        let session = open_session(StubStore::default()).await;
        assert_eq!(session.staff().len(), 2);
        assert_eq!(session.month(), month("2021-03"));
    }

    #[tokio::test]
    async fn test_stale_payloads_are_discarded() {
        let mut session = open_session(StubStore::default()).await;

        let stale = vec![AttendanceRecord {
            identifier: "w-001".to_string(),
            date: NaiveDate::from_ymd_opt(2021, 2, 1).unwrap(),
            check_in_time: NaiveTime::from_hms_opt(8, 0, 0),
            check_out_time: None,
            total_hours: None,
        }];

        assert!(!session.install_attendance(month("2021-02"), stale));
        assert!(session.attendance.is_empty());

        assert!(!session.install_holidays(
            month("2021-02"),
            vec![NaiveDate::from_ymd_opt(2021, 2, 1).unwrap()]
        ));
        assert!(session.holidays().is_empty());
    }

    #[tokio::test]
    async fn test_current_month_payloads_are_applied() {
        let mut session = open_session(StubStore::default()).await;

        let fresh = vec![AttendanceRecord {
            identifier: "w-001".to_string(),
            date: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
            check_in_time: NaiveTime::from_hms_opt(8, 0, 0),
            check_out_time: None,
            total_hours: None,
        }];

        assert!(session.install_attendance(month("2021-03"), fresh));
        assert_eq!(session.attendance.len(), 1);
    }

    #[tokio::test]
    async fn test_check_in_unknown_staff_is_rejected_locally() {
        let mut session = open_session(StubStore::default()).await;
        let error = session.check_in("w-999").await.unwrap_err();
        assert!(matches!(error, EngineError::UnknownStaff { .. }));
        assert!(session.store.check_ins.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_check_in_triggers_background_sync() {
        let mut session = open_session(StubStore::default()).await;
        session.check_in("w-001").await.unwrap();

        let check_ins = session.store.check_ins.lock().unwrap();
        assert_eq!(check_ins.as_slice(), ["w-001"]);
        drop(check_ins);

        let saved = session.store.saved_matrices.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].month, month("2021-03"));
    }

    #[tokio::test]
    async fn test_background_sync_failure_is_swallowed() {
        let store = StubStore {
            fail_matrix_writes: true,
            ..StubStore::default()
        };
        let mut session = open_session(store).await;

        // The check-in itself succeeds even though reconciliation fails
        session.check_in("w-001").await.unwrap();
        assert!(session.last_persisted().is_none());
    }

    #[tokio::test]
    async fn test_explicit_sync_failure_surfaces() {
        let store = StubStore {
            fail_matrix_writes: true,
            ..StubStore::default()
        };
        let mut session = open_session(store).await;

        let error = session.sync_matrix(SyncTrigger::Explicit).await.unwrap_err();
        assert!(matches!(error, EngineError::Network { .. }));
        assert!(session.last_persisted().is_none());
    }

    #[tokio::test]
    async fn test_successful_sync_records_persisted_report() {
        let mut session = open_session(StubStore::default()).await;
        session.sync_matrix(SyncTrigger::Explicit).await.unwrap();

        let persisted = session.last_persisted().unwrap();
        assert_eq!(persisted.month, month("2021-03"));
        assert_eq!(persisted.rows.len(), 2);
    }

    #[tokio::test]
    async fn test_sync_is_idempotent_without_state_changes() {
        let mut session = open_session(StubStore::default()).await;
        session.sync_matrix(SyncTrigger::Explicit).await.unwrap();
        session.sync_matrix(SyncTrigger::Explicit).await.unwrap();

        let saved = session.store.saved_matrices.lock().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0], saved[1]);
    }

    #[tokio::test]
    async fn test_set_override_validates_day() {
        let mut session = open_session(StubStore::default()).await;
        let error = session.set_override("w-001", 32, "P").await.unwrap_err();
        assert!(matches!(error, EngineError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_set_override_updates_local_map() {
        let mut session = open_session(StubStore::default()).await;
        session.set_override("w-001", 5, "P").await.unwrap();
        assert_eq!(
            session.overrides().get("w-001").and_then(|m| m.get(&5)),
            Some(&"P".to_string())
        );
        // Override saves reconcile in the background too
        assert_eq!(session.store.saved_matrices.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_holiday_validates_month() {
        let mut session = open_session(StubStore::default()).await;
        let outside = NaiveDate::from_ymd_opt(2021, 4, 1).unwrap();
        assert!(session.toggle_holiday(outside).await.is_err());

        let inside = NaiveDate::from_ymd_opt(2021, 3, 8).unwrap();
        session.toggle_holiday(inside).await.unwrap();
        assert!(session.holidays().contains(inside));
    }

    #[tokio::test]
    async fn test_save_roster_rejects_duplicates() {
        let mut session = open_session(StubStore::default()).await;
        let error = session
            .save_roster(vec![member("w-001", "Minh Tran"), member("w-001", "Lan Pham")])
            .await
            .unwrap_err();
        assert!(matches!(error, EngineError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_save_roster_rejects_missing_identifier() {
        let mut session = open_session(StubStore::default()).await;
        let error = session
            .save_roster(vec![member("", "Minh Tran")])
            .await
            .unwrap_err();
        assert!(matches!(error, EngineError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_remove_staff_keeps_ledgers() {
        let store = StubStore {
            attendance: vec![AttendanceRecord {
                identifier: "w-001".to_string(),
                date: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
                check_in_time: NaiveTime::from_hms_opt(8, 0, 0),
                check_out_time: NaiveTime::from_hms_opt(17, 45, 0),
                total_hours: None,
            }],
            ..StubStore::default()
        };
        let mut session = open_session(store).await;

        session.remove_staff("w-001").await.unwrap();
        assert_eq!(session.staff().len(), 1);
        // The ledger still holds the historical record
        assert_eq!(session.attendance.len(), 1);
        // But new matrices no longer carry the row
        assert!(session.build_matrix().row("w-001").is_none());
    }

    #[tokio::test]
    async fn test_overtime_summary_uses_session_holidays() {
        let store = StubStore {
            ot: vec![OtRecord {
                identifier: "w-001".to_string(),
                date: NaiveDate::from_ymd_opt(2021, 3, 8).unwrap(), // Monday
                check_in_time: NaiveTime::from_hms_opt(18, 0, 0),
                check_out_time: NaiveTime::from_hms_opt(20, 0, 0),
                total_hours: None,
            }],
            ..StubStore::default()
        };
        let mut session = open_session(store).await;

        let before = session.overtime_summary("w-001");
        assert_eq!(before.normal, rust_decimal::Decimal::new(200, 2));
        assert_eq!(before.holiday, rust_decimal::Decimal::ZERO);

        session
            .toggle_holiday(NaiveDate::from_ymd_opt(2021, 3, 8).unwrap())
            .await
            .unwrap();

        let after = session.overtime_summary("w-001");
        assert_eq!(after.normal, rust_decimal::Decimal::ZERO);
        assert_eq!(after.holiday, rust_decimal::Decimal::new(200, 2));
    }
}
