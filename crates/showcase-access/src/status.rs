//! # Lifecycle Status
//!
//! Submission and showcase lifecycle stages, plus the grading workflow
//! checks used by dashboards before offering "submit" or "grade" actions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::roles::Role;

/// Lifecycle of a weekly submission.
///
/// `Draft -> Submitted -> Graded -> Archived`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Work in progress, editable by the student.
    Draft,
    /// Handed in and awaiting a grade.
    Submitted,
    /// Graded by an instructor.
    Graded,
    /// Closed out.
    Archived,
}

impl SubmissionStatus {
    /// Get the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Draft => "draft",
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Graded => "graded",
            SubmissionStatus::Archived => "archived",
        }
    }

    /// Parse status from string representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(SubmissionStatus::Draft),
            "submitted" => Some(SubmissionStatus::Submitted),
            "graded" => Some(SubmissionStatus::Graded),
            "archived" => Some(SubmissionStatus::Archived),
            _ => None,
        }
    }

    /// Read a status out of a field value.
    ///
    /// A missing field is a record that has never transitioned, i.e. a
    /// draft. A present but unrecognised value yields `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use showcase_access::SubmissionStatus;
    ///
    /// assert_eq!(SubmissionStatus::from_field(None), Some(SubmissionStatus::Draft));
    /// assert_eq!(
    ///     SubmissionStatus::from_field(Some(&json!("graded"))),
    ///     Some(SubmissionStatus::Graded)
    /// );
    /// assert_eq!(SubmissionStatus::from_field(Some(&json!(42))), None);
    /// ```
    pub fn from_field(value: Option<&Value>) -> Option<Self> {
        match value {
            None | Some(Value::Null) => Some(SubmissionStatus::Draft),
            Some(Value::String(s)) => Self::parse(s),
            Some(_) => None,
        }
    }

    /// Check if the submission is still editable by its author.
    pub fn is_draft(&self) -> bool {
        matches!(self, SubmissionStatus::Draft)
    }

    /// Check if the submission is within the grading window.
    pub fn is_gradable(&self) -> bool {
        matches!(self, SubmissionStatus::Submitted | SubmissionStatus::Graded)
    }
}

/// Lifecycle of a student showcase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShowcaseStatus {
    /// Not yet published.
    Draft,
    /// Live.
    Published,
    /// Withdrawn.
    Archived,
}

impl ShowcaseStatus {
    /// Get the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShowcaseStatus::Draft => "draft",
            ShowcaseStatus::Published => "published",
            ShowcaseStatus::Archived => "archived",
        }
    }

    /// Parse status from string representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(ShowcaseStatus::Draft),
            "published" => Some(ShowcaseStatus::Published),
            "archived" => Some(ShowcaseStatus::Archived),
            _ => None,
        }
    }

    /// Check if the showcase is live.
    pub fn is_published(&self) -> bool {
        matches!(self, ShowcaseStatus::Published)
    }
}

/// Check if a submission may be handed in for grading.
///
/// Only drafts can be submitted, and only by students or administrators.
///
/// # Example
///
/// ```
/// use showcase_access::{can_submit_for_grading, Role, SubmissionStatus};
///
/// assert!(can_submit_for_grading(SubmissionStatus::Draft, Role::Student));
/// assert!(!can_submit_for_grading(SubmissionStatus::Submitted, Role::Student));
/// assert!(!can_submit_for_grading(SubmissionStatus::Draft, Role::Instructor));
/// ```
pub fn can_submit_for_grading(status: SubmissionStatus, role: Role) -> bool {
    if !status.is_draft() {
        return false;
    }

    match role {
        Role::Student | Role::Administrator => true,
        Role::Instructor | Role::Guest => false,
    }
}

/// Check if a submission may be graded.
///
/// Only submitted work can be graded, and only by instructors or administrators.
pub fn can_grade_submission(status: SubmissionStatus, role: Role) -> bool {
    if status != SubmissionStatus::Submitted {
        return false;
    }

    match role {
        Role::Instructor | Role::Administrator => true,
        Role::Student | Role::Guest => false,
    }
}
