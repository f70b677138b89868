//! # Roles
//!
//! Roles and the acting identity consumed by the access engine.
//! The engine never assigns or infers roles; it only reads them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role within the showcase platform.
///
/// Roles are a closed set and are *not* hierarchical: an Instructor does
/// not inherit Student permissions. Every rule lists the roles it admits.
///
/// - **Administrator**: Supervisory override, bypasses every field rule
/// - **Instructor**: Grades submissions, reads student work
/// - **Student**: Owns submissions and a showcase
/// - **Guest**: Unauthenticated visitor, sees public showcases only
///
/// # Examples
///
/// ```
/// use showcase_access::Role;
///
/// assert_eq!(Role::parse("admin"), Some(Role::Administrator));
/// assert!(Role::Administrator.is_administrator());
/// assert!(!Role::Instructor.is_administrator());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Supervisory role with unconditional access.
    #[serde(rename = "admin", alias = "administrator")]
    Administrator,

    /// Course staff.
    Instructor,

    /// Enrolled student.
    Student,

    /// Anonymous or unauthenticated visitor.
    Guest,
}

impl Role {
    /// Get the string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "admin",
            Role::Instructor => "instructor",
            Role::Student => "student",
            Role::Guest => "guest",
        }
    }

    /// Parse role from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(Role)` if valid, `None` otherwise
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" | "administrator" => Some(Role::Administrator),
            "instructor" | "teacher" => Some(Role::Instructor),
            "student" => Some(Role::Student),
            "guest" | "anonymous" => Some(Role::Guest),
            _ => None,
        }
    }

    /// Get all roles.
    pub fn all() -> [Role; 4] {
        [Role::Administrator, Role::Instructor, Role::Student, Role::Guest]
    }

    /// Check if this role carries the supervisory override.
    pub fn is_administrator(&self) -> bool {
        matches!(self, Role::Administrator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An already-authenticated user acting on a resource.
///
/// The `id` is opaque to the engine; it is only compared against
/// owner fields (e.g. a showcase's `student_id`) by ownership conditions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Identity {
    /// Opaque user identifier.
    pub id: String,
    /// The user's role for the duration of the decision.
    pub role: Role,
}

impl Identity {
    /// Create a new identity.
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    /// Shorthand for an administrator identity.
    pub fn administrator(id: impl Into<String>) -> Self {
        Self::new(id, Role::Administrator)
    }

    /// Shorthand for an instructor identity.
    pub fn instructor(id: impl Into<String>) -> Self {
        Self::new(id, Role::Instructor)
    }

    /// Shorthand for a student identity.
    pub fn student(id: impl Into<String>) -> Self {
        Self::new(id, Role::Student)
    }

    /// Shorthand for a guest identity.
    pub fn guest(id: impl Into<String>) -> Self {
        Self::new(id, Role::Guest)
    }

    /// Check if this identity owns a record whose owner id is `owner_id`.
    pub fn owns(&self, owner_id: &str) -> bool {
        !self.id.is_empty() && self.id == owner_id
    }
}
