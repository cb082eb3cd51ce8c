//! The closed alphabet of daily attendance codes.

use std::fmt;

/// A daily attendance code.
///
/// The four canonical codes form a closed alphabet; anything else an
/// administrator types into a cell is carried verbatim in the
/// [`DayCode::Manual`] variant, so downstream consumers pattern-match
/// exhaustively instead of comparing free-form strings.
///
/// # Example
///
/// ```
/// use attendance_engine::derivation::DayCode;
///
/// assert_eq!(DayCode::FullDay.as_str(), "HC");
/// assert_eq!(DayCode::from_override("S"), DayCode::Morning);
/// assert_eq!(
///     DayCode::from_override("P/2"),
///     DayCode::Manual("P/2".to_string())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DayCode {
    /// `HC` — full working day: on-time check-in and complete check-out.
    FullDay,
    /// `S` — morning only recorded so far.
    Morning,
    /// `C` — afternoon arrival with a complete check-out.
    Afternoon,
    /// `RC` — present outside the recognized windows, absent, or weekend;
    /// flagged for review rather than treated as an error.
    Incomplete,
    /// An administrator-entered code outside the canonical alphabet,
    /// carried verbatim.
    Manual(String),
}

impl DayCode {
    /// The string written into the persisted matrix cell.
    pub fn as_str(&self) -> &str {
        match self {
            DayCode::FullDay => "HC",
            DayCode::Morning => "S",
            DayCode::Afternoon => "C",
            DayCode::Incomplete => "RC",
            DayCode::Manual(raw) => raw,
        }
    }

    /// Interprets an administrator override.
    ///
    /// A string matching one of the canonical codes maps to its canonical
    /// variant; anything else is kept verbatim as [`DayCode::Manual`].
    /// Either way the rendered cell equals the entered string.
    pub fn from_override(raw: &str) -> Self {
        match raw {
            "HC" => DayCode::FullDay,
            "S" => DayCode::Morning,
            "C" => DayCode::Afternoon,
            "RC" => DayCode::Incomplete,
            other => DayCode::Manual(other.to_string()),
        }
    }
}

impl fmt::Display for DayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
