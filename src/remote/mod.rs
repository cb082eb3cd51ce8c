//! Access to the remote tabular store.
//!
//! All persisted state lives behind one RPC-style boundary: action-tagged
//! JSON requests to a single endpoint, answered with a success-flagged
//! envelope. This module carries the wire protocol, the narrow store
//! contract the rest of the engine programs against, and the HTTP client
//! implementing it.

mod client;
mod protocol;
mod store;

pub use client::HttpStore;
pub use protocol::{StoreRequest, StoreResponse};
pub use store::TimekeepingStore;
