//! Staff roster model.

use serde::{Deserialize, Serialize};

/// One entry in the staff roster the engine iterates over.
///
/// Identity is carried by `identifier` alone; every roster entry must have
/// a unique, non-empty identifier before it is accepted for saving. The
/// display name is what the remote store's mutation calls expect alongside
/// the identifier, and the role label is presentation-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    /// Unique identifier for the staff member (e.g. a username).
    pub identifier: String,
    /// Name shown in the roster and passed to mutation calls.
    pub display_name: String,
    /// Role shown in the roster (e.g. "picker", "shift lead").
    #[serde(default)]
    pub role_label: String,
}
