//! # Access Modes
//!
//! The two operations governed per field.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Access modes for a single field.
///
/// - **Read**: The field may be returned to the caller
/// - **Write**: The field may be changed by the caller
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// View the field's value.
    Read,
    /// Change the field's value.
    Write,
}

impl AccessMode {
    /// Get the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::Read => "read",
            AccessMode::Write => "write",
        }
    }

    /// Parse mode from string representation.
    ///
    /// # Example
    ///
    /// ```
    /// use showcase_access::AccessMode;
    ///
    /// assert_eq!(AccessMode::parse("read"), Some(AccessMode::Read));
    /// assert_eq!(AccessMode::parse("edit"), Some(AccessMode::Write)); // Alias
    /// assert_eq!(AccessMode::parse("delete"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "read" | "view" | "get" => Some(AccessMode::Read),
            "write" | "update" | "edit" | "modify" | "patch" => Some(AccessMode::Write),
            _ => None,
        }
    }

    /// Get all modes.
    pub fn all() -> [AccessMode; 2] {
        [AccessMode::Read, AccessMode::Write]
    }

    /// Check if this mode changes data.
    pub fn is_write(&self) -> bool {
        matches!(self, AccessMode::Write)
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
