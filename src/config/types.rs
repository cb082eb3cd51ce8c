//! Configuration types for the attendance engine.

use chrono::NaiveTime;
use serde::Deserialize;

/// Top-level engine configuration, deserialized from `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Remote store connection settings.
    pub store: StoreConfig,
    /// Workday window boundaries for code derivation.
    #[serde(default)]
    pub windows: WorkdayWindows,
}

/// Remote store connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// The single RPC endpoint all action-tagged requests are posted to.
    pub endpoint: String,
    /// Bound on each request; there are no retries, a timed-out call
    /// surfaces immediately.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    10
}

/// Clock-time boundaries of the recognized attendance windows.
///
/// The defaults are the fulfillment team's standard shift boundaries; a
/// site with different shift times overrides them in `engine.yaml`.
///
/// # Example
///
/// ```
/// use attendance_engine::config::WorkdayWindows;
/// use chrono::NaiveTime;
///
/// let windows = WorkdayWindows::default();
/// assert_eq!(
///     windows.morning_check_in_limit,
///     NaiveTime::from_hms_opt(8, 15, 0).unwrap()
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkdayWindows {
    /// Latest check-in that still counts as a morning arrival.
    #[serde(default = "default_morning_check_in_limit")]
    pub morning_check_in_limit: NaiveTime,
    /// Earliest check-in recognized as an afternoon arrival.
    #[serde(default = "default_afternoon_check_in_start")]
    pub afternoon_check_in_start: NaiveTime,
    /// Latest check-in recognized as an afternoon arrival.
    #[serde(default = "default_afternoon_check_in_end")]
    pub afternoon_check_in_end: NaiveTime,
    /// Earliest check-out that completes a full or afternoon shift.
    #[serde(default = "default_full_day_check_out")]
    pub full_day_check_out: NaiveTime,
}

impl Default for WorkdayWindows {
    fn default() -> Self {
        Self {
            morning_check_in_limit: default_morning_check_in_limit(),
            afternoon_check_in_start: default_afternoon_check_in_start(),
            afternoon_check_in_end: default_afternoon_check_in_end(),
            full_day_check_out: default_full_day_check_out(),
        }
    }
}

fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid clock time")
}

fn default_morning_check_in_limit() -> NaiveTime {
    clock(8, 15)
}

fn default_afternoon_check_in_start() -> NaiveTime {
    clock(12, 0)
}

fn default_afternoon_check_in_end() -> NaiveTime {
    clock(13, 45)
}

fn default_full_day_check_out() -> NaiveTime {
    clock(17, 30)
}
