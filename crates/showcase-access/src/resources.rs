//! # Resource Kinds
//!
//! Defines the resource schemas governed by field rules, and the
//! in-memory record shape the engine evaluates against.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A concrete record as handed to the engine: field name to value.
///
/// Records arrive already fetched. The engine never validates their shape;
/// a missing field is simply absent during lookups.
pub type Resource = Map<String, Value>;

/// Resource kinds that carry field-level rules.
///
/// Each kind owns an independent field table. Rules never cross kinds, so
/// adding a kind leaves every existing decision untouched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A weekly project submission.
    Submission,
    /// A student's public portfolio.
    Showcase,
    /// Student profile record.
    #[serde(alias = "studentProfile")]
    StudentProfile,
    /// Instructor profile record.
    #[serde(alias = "instructorProfile")]
    InstructorProfile,
    /// Showcase layout template.
    Template,
    /// A cohort of students.
    Cohort,
    /// Platform-wide settings.
    #[serde(alias = "systemSettings")]
    SystemSettings,
}

impl ResourceKind {
    /// Get the string representation of the resource kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Submission => "submission",
            ResourceKind::Showcase => "showcase",
            ResourceKind::StudentProfile => "student_profile",
            ResourceKind::InstructorProfile => "instructor_profile",
            ResourceKind::Template => "template",
            ResourceKind::Cohort => "cohort",
            ResourceKind::SystemSettings => "system_settings",
        }
    }

    /// Parse resource kind from string representation.
    ///
    /// Accepts snake_case and camelCase spellings, case-insensitively.
    ///
    /// # Example
    ///
    /// ```
    /// use showcase_access::ResourceKind;
    ///
    /// assert_eq!(ResourceKind::parse("submission"), Some(ResourceKind::Submission));
    /// assert_eq!(ResourceKind::parse("studentProfile"), Some(ResourceKind::StudentProfile));
    /// assert_eq!(ResourceKind::parse("system_settings"), Some(ResourceKind::SystemSettings));
    /// assert_eq!(ResourceKind::parse("invoice"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['_', '-'], "").as_str() {
            "submission" => Some(ResourceKind::Submission),
            "showcase" => Some(ResourceKind::Showcase),
            "studentprofile" => Some(ResourceKind::StudentProfile),
            "instructorprofile" => Some(ResourceKind::InstructorProfile),
            "template" => Some(ResourceKind::Template),
            "cohort" => Some(ResourceKind::Cohort),
            "systemsettings" => Some(ResourceKind::SystemSettings),
            _ => None,
        }
    }

    /// Get all resource kinds.
    pub fn all() -> [ResourceKind; 7] {
        [
            ResourceKind::Submission,
            ResourceKind::Showcase,
            ResourceKind::StudentProfile,
            ResourceKind::InstructorProfile,
            ResourceKind::Template,
            ResourceKind::Cohort,
            ResourceKind::SystemSettings,
        ]
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
