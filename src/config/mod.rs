//! Engine configuration: remote store endpoint, request bounds, and the
//! workday window boundaries used by code derivation.

mod loader;
mod types;

pub use types::{EngineConfig, StoreConfig, WorkdayWindows};
