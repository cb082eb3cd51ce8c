//! Error types for the attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for everything that can go wrong while talking to the remote store or
//! validating local input.

use thiserror::Error;

/// The main error type for the attendance engine.
///
/// Nothing in this crate is fatal to the process: every error is scoped to
/// "this fetch or this save did not take effect". Previously derived state
/// is never touched by a failed call.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::UnknownStaff {
///     identifier: "w-042".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown staff identifier: w-042");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The remote call did not complete (connectivity, timeout, non-2xx).
    #[error("Store call '{action}' failed: {message}")]
    Network {
        /// The action tag of the failed request.
        action: String,
        /// A description of the transport failure.
        message: String,
    },

    /// The remote store answered, but reported `success: false`.
    #[error("Store rejected '{action}': {message}")]
    Rejected {
        /// The action tag of the rejected request.
        action: String,
        /// The error string reported by the store.
        message: String,
    },

    /// The remote store's response could not be decoded.
    #[error("Malformed response for '{action}': {message}")]
    Parse {
        /// The action tag of the request whose response was malformed.
        action: String,
        /// A description of the decoding failure.
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to initialize store client: {message}")]
    ClientInit {
        /// A description of the construction failure.
        message: String,
    },

    /// Local input failed validation before any remote call was made.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A staff identifier was not found in the active roster.
    #[error("Unknown staff identifier: {identifier}")]
    UnknownStaff {
        /// The identifier that was not found.
        identifier: String,
    },

    /// A month key could not be parsed.
    #[error("Invalid month key: {value}")]
    InvalidMonth {
        /// The value that failed to parse as `YYYY-MM`.
        value: String,
    },

    /// The configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return [`EngineError`].
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_displays_action_and_message() {
        let error = EngineError::Network {
            action: "getAttendance".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Store call 'getAttendance' failed: connection refused"
        );
    }

    #[test]
    fn test_rejected_error_displays_store_message() {
        let error = EngineError::Rejected {
            action: "checkIn".to_string(),
            message: "already checked in today".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Store rejected 'checkIn': already checked in today"
        );
    }

    #[test]
    fn test_validation_error_displays_field_and_message() {
        let error = EngineError::Validation {
            field: "identifier".to_string(),
            message: "must not be empty".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid identifier: must not be empty");
    }

    #[test]
    fn test_invalid_month_displays_value() {
        let error = EngineError::InvalidMonth {
            value: "2026-13".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid month key: 2026-13");
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_unknown_staff() -> EngineResult<()> {
            Err(EngineError::UnknownStaff {
                identifier: "w-001".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_unknown_staff()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
