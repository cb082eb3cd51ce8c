//! Core data models for the attendance engine.

use std::collections::BTreeMap;

mod attendance;
mod matrix;
mod month;
mod staff;

pub use attendance::{AttendanceRecord, OtRecord};
pub use matrix::{MatrixRow, MonthMatrix};
pub use month::Month;
pub use staff::StaffMember;

/// The sparse manual-override map: staff identifier → day number → raw
/// administrator-entered code.
///
/// Written only through the timekeeping UI, never by automatic derivation,
/// and always consulted before any derived code.
pub type OverrideMap = BTreeMap<String, BTreeMap<u32, String>>;
