//! The staff × day code matrix, the unit of batch persistence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Month;

/// One roster row of the monthly matrix: a code cell for every day of the
/// month, keyed by day number.
///
/// Every day of the month has an entry; a day that is not yet due carries
/// an empty string. Keeping the full key range makes two builds over the
/// same inputs structurally identical, which the synchronizer relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRow {
    /// The staff member's identifier.
    pub identifier: String,
    /// The staff member's display name, carried for the persisted report.
    pub display_name: String,
    /// Day number → attendance code string.
    pub codes: BTreeMap<u32, String>,
}

/// The full staff × day code matrix for one month.
///
/// Built fresh from in-memory state on every synchronization and written
/// to the store as a full-month replace, never a per-cell patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthMatrix {
    /// The month this matrix covers.
    pub month: Month,
    /// One row per roster entry, in roster order.
    pub rows: Vec<MatrixRow>,
}

impl MonthMatrix {
    /// Looks up the row for a staff identifier.
    pub fn row(&self, identifier: &str) -> Option<&MatrixRow> {
        self.rows.iter().find(|row| row.identifier == identifier)
    }

    /// Looks up a single cell.
    pub fn code(&self, identifier: &str, day: u32) -> Option<&str> {
        self.row(identifier)
            .and_then(|row| row.codes.get(&day))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MonthMatrix {
        let mut codes = BTreeMap::new();
        codes.insert(1, "HC".to_string());
        codes.insert(2, "RC".to_string());
        codes.insert(3, String::new());

        MonthMatrix {
            month: "2026-05".parse().unwrap(),
            rows: vec![MatrixRow {
                identifier: "w-001".to_string(),
                display_name: "Minh Tran".to_string(),
                codes,
            }],
        }
    }

    #[test]
    fn test_cell_lookup() {
        let matrix = sample();
        assert_eq!(matrix.code("w-001", 1), Some("HC"));
        assert_eq!(matrix.code("w-001", 3), Some(""));
        assert_eq!(matrix.code("w-001", 4), None);
        assert_eq!(matrix.code("w-999", 1), None);
    }

    #[test]
    fn test_serialization_shape() {
        let matrix = sample();
        let json = serde_json::to_value(&matrix).unwrap();

        assert_eq!(json["month"], "2026-05");
        assert_eq!(json["rows"][0]["identifier"], "w-001");
        assert_eq!(json["rows"][0]["displayName"], "Minh Tran");
        // Integer day keys serialize as JSON object keys
        assert_eq!(json["rows"][0]["codes"]["1"], "HC");
        assert_eq!(json["rows"][0]["codes"]["3"], "");
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let matrix = sample();
        let json = serde_json::to_string(&matrix).unwrap();
        let back: MonthMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, matrix);
    }
}
