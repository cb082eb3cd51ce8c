//! Derivation logic for the attendance engine.
//!
//! This module contains the pure algorithms: the daily code precedence
//! rules, overtime aggregation into day-class buckets, and assembly of the
//! full monthly matrix from an in-memory snapshot.

mod code_rules;
mod day_code;
mod matrix;
mod overtime;

pub use code_rules::{derive_day_code, minutes_past_midnight};
pub use day_code::DayCode;
pub use matrix::build_month_matrix;
pub use overtime::{OvertimeSummary, summarize_overtime};
