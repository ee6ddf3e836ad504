//! Error types for teamform.
//!
//! This module defines all error types used throughout the teamform crate.
//! Structural violations of a list editor (adding past capacity, removing a
//! row that is not there) are kept apart from submit-time validation errors
//! so callers can tell a defect from bad user input.

use thiserror::Error;

use crate::editor::RowId;
use crate::field::FieldKind;

/// The main error type for teamform operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Editor Invariant Violations ===
    /// An entry was added to a list that is already at capacity.
    #[error("cannot add {kind} entry: list is full ({max_entries} entries)")]
    CapacityReached {
        /// The list that rejected the add.
        kind: FieldKind,
        /// The configured capacity of that list.
        max_entries: usize,
    },

    /// A position outside `1..=count` was addressed.
    #[error("no {kind} entry at position {position} (list has {count})")]
    NoSuchPosition {
        /// The list that was addressed.
        kind: FieldKind,
        /// The requested position.
        position: usize,
        /// Number of entries currently in the list.
        count: usize,
    },

    /// A row handle that no longer belongs to the list was used.
    #[error("{kind} row {row} is no longer in the list")]
    NoSuchRow {
        /// The list that was addressed.
        kind: FieldKind,
        /// The stale handle.
        row: RowId,
    },

    /// Removal of the only remaining entry while the minimum floor is enforced.
    #[error("cannot remove the last {kind} entry")]
    LastEntry {
        /// The list that rejected the removal.
        kind: FieldKind,
    },

    // === Form Errors ===
    /// A field name did not follow the `<kind>-<position>` scheme.
    #[error("invalid field name: {name}")]
    InvalidFieldName {
        /// The offending name.
        name: String,
    },

    /// A required field was absent from the submitted form.
    #[error("missing required field: {name}")]
    MissingField {
        /// Name of the missing field.
        name: String,
    },

    /// A required field was present but blank.
    #[error("field '{name}' must not be empty")]
    EmptyField {
        /// Name of the blank field.
        name: String,
    },

    /// The team status was not one of the known values.
    #[error("unknown team status '{value}' (expected active, inactive or suspended)")]
    UnknownStatus {
        /// The rejected value.
        value: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Session Errors ===
    /// A session command could not be parsed.
    #[error("line {line}: {message}")]
    Command {
        /// 1-based line number within the session input.
        line: usize,
        /// Description of what went wrong.
        message: String,
    },

    // === I/O Errors ===
    /// File system or terminal operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for teamform operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a session command error for the given line.
    #[must_use]
    pub fn command(line: usize, message: impl Into<String>) -> Self {
        Self::Command {
            line,
            message: message.into(),
        }
    }

    /// Create a missing field error.
    #[must_use]
    pub fn missing_field(name: impl Into<String>) -> Self {
        Self::MissingField { name: name.into() }
    }

    /// Create an empty field error.
    #[must_use]
    pub fn empty_field(name: impl Into<String>) -> Self {
        Self::EmptyField { name: name.into() }
    }

    /// Check if this error is a broken editor invariant rather than bad input.
    ///
    /// These are only reachable by bypassing the add/remove affordances.
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::CapacityReached { .. }
                | Self::NoSuchPosition { .. }
                | Self::NoSuchRow { .. }
                | Self::LastEntry { .. }
        )
    }

    /// Check if this error came from submit-time form validation.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::EmptyField { .. }
                | Self::UnknownStatus { .. }
                | Self::InvalidFieldName { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_reached_display() {
        let err = Error::CapacityReached {
            kind: FieldKind::Member,
            max_entries: 5,
        };
        assert_eq!(
            err.to_string(),
            "cannot add member entry: list is full (5 entries)"
        );
    }

    #[test]
    fn test_no_such_position_display() {
        let err = Error::NoSuchPosition {
            kind: FieldKind::Link,
            position: 7,
            count: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("link"));
        assert!(msg.contains("position 7"));
        assert!(msg.contains("has 3"));
    }

    #[test]
    fn test_last_entry_display() {
        let err = Error::LastEntry {
            kind: FieldKind::Member,
        };
        assert_eq!(err.to_string(), "cannot remove the last member entry");
    }

    #[test]
    fn test_is_invariant_violation() {
        assert!(Error::CapacityReached {
            kind: FieldKind::Link,
            max_entries: 10
        }
        .is_invariant_violation());
        assert!(Error::NoSuchPosition {
            kind: FieldKind::Link,
            position: 0,
            count: 1
        }
        .is_invariant_violation());
        assert!(Error::LastEntry {
            kind: FieldKind::Member
        }
        .is_invariant_violation());
        assert!(!Error::missing_field("name").is_invariant_violation());
        assert!(!Error::config_validation("bad").is_invariant_violation());
    }

    #[test]
    fn test_is_validation_error() {
        assert!(Error::missing_field("member-1").is_validation_error());
        assert!(Error::empty_field("name").is_validation_error());
        assert!(Error::UnknownStatus {
            value: "archived".to_string()
        }
        .is_validation_error());
        assert!(!Error::LastEntry {
            kind: FieldKind::Link
        }
        .is_validation_error());
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::config_validation("max_entries must be at least 1");
        assert!(err.to_string().contains("max_entries"));
    }

    #[test]
    fn test_command_error_display() {
        let err = Error::command(3, "unknown command 'frobnicate'");
        assert_eq!(err.to_string(), "line 3: unknown command 'frobnicate'");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }
}
