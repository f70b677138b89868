//! # Conditions
//!
//! Dynamic predicates that further restrict a role-eligible rule based on
//! the live record, the acting user and, for writes, the candidate value.
//!
//! Every predicate here treats a missing or malformed field as the most
//! restrictive state it can mean, except where a missing field is the
//! record's initial state (an absent submission `status` is a draft).

use serde_json::Value;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::resources::Resource;
use crate::roles::{Identity, Role};
use crate::status::SubmissionStatus;

type Predicate = dyn Fn(&Resource, &Identity, Option<&Value>) -> bool + Send + Sync;

/// A named, shareable condition predicate.
///
/// Conditions are cheap to clone and safe to evaluate concurrently.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use showcase_access::{Condition, Identity};
///
/// let has_title = Condition::new("has_title", |resource, _user, _value| {
///     resource.contains_key("title")
/// });
///
/// let record = json!({ "title": "Week 1" });
/// let record = record.as_object().unwrap();
/// assert!(has_title.evaluate(record, &Identity::student("s-1"), None));
/// ```
#[derive(Clone)]
pub struct Condition {
    name: String,
    predicate: Arc<Predicate>,
}

impl Condition {
    /// Create a condition from a predicate.
    ///
    /// # Arguments
    ///
    /// * `name` - Name used in logs and configuration
    /// * `predicate` - `(resource, acting user, candidate value) -> allowed`
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Resource, &Identity, Option<&Value>) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// The condition's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the predicate.
    ///
    /// A predicate that panics is contained and counts as denial.
    pub fn evaluate(&self, resource: &Resource, user: &Identity, candidate: Option<&Value>) -> bool {
        match catch_unwind(AssertUnwindSafe(|| (self.predicate)(resource, user, candidate))) {
            Ok(allowed) => allowed,
            Err(_) => {
                tracing::warn!(
                    condition = %self.name,
                    user_id = %user.id,
                    role = %user.role,
                    "Condition panicked during evaluation, denying access"
                );
                false
            }
        }
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition").field("name", &self.name).finish()
    }
}

/// Names of the built-in conditions, as used in rule configuration.
pub const BUILTIN_CONDITIONS: [&str; 5] = [
    SUBMISSION_IS_DRAFT,
    SUBMISSION_IN_GRADING,
    SUBMISSION_STATUS_TRANSITION,
    SHOWCASE_OWNER,
    SHOWCASE_PUBLIC,
];

/// Submission is still a draft.
pub const SUBMISSION_IS_DRAFT: &str = "submission_is_draft";
/// Submission is submitted or already graded.
pub const SUBMISSION_IN_GRADING: &str = "submission_in_grading";
/// Status change is a transition the acting role may make.
pub const SUBMISSION_STATUS_TRANSITION: &str = "submission_status_transition";
/// Students act only on their own showcase.
pub const SHOWCASE_OWNER: &str = "showcase_owner";
/// Guests see only public showcases.
pub const SHOWCASE_PUBLIC: &str = "showcase_public";

/// Look up a built-in condition by name.
///
/// # Returns
///
/// `Some(Condition)` for a known name, `None` otherwise
pub fn by_name(name: &str) -> Option<Condition> {
    match name {
        SUBMISSION_IS_DRAFT => Some(submission_is_draft()),
        SUBMISSION_IN_GRADING => Some(submission_in_grading()),
        SUBMISSION_STATUS_TRANSITION => Some(submission_status_transition()),
        SHOWCASE_OWNER => Some(showcase_owner()),
        SHOWCASE_PUBLIC => Some(showcase_public()),
        _ => None,
    }
}

fn submission_status(resource: &Resource) -> Option<SubmissionStatus> {
    SubmissionStatus::from_field(resource.get("status"))
}

/// Allows the change only while the submission is a draft.
pub fn submission_is_draft() -> Condition {
    Condition::new(SUBMISSION_IS_DRAFT, |resource, _user, _candidate| {
        submission_status(resource).is_some_and(|s| s.is_draft())
    })
}

/// Allows the change only while the submission is submitted or graded.
pub fn submission_in_grading() -> Condition {
    Condition::new(SUBMISSION_IN_GRADING, |resource, _user, _candidate| {
        submission_status(resource).is_some_and(|s| s.is_gradable())
    })
}

/// Governs writes to a submission's `status` field.
///
/// Students may only move their draft to submitted. Instructors may set
/// any recognised status. Without a candidate value the check reduces to
/// whether any allowed transition exists from the current state.
pub fn submission_status_transition() -> Condition {
    Condition::new(SUBMISSION_STATUS_TRANSITION, |resource, user, candidate| {
        let next = match candidate {
            Some(Value::String(s)) => match SubmissionStatus::parse(s) {
                Some(next) => Some(next),
                None => return false,
            },
            Some(_) => return false,
            None => None,
        };

        match user.role {
            Role::Student => {
                let current = submission_status(resource);
                current == Some(SubmissionStatus::Draft)
                    && next.map_or(true, |n| n == SubmissionStatus::Submitted)
            }
            Role::Instructor | Role::Administrator => true,
            Role::Guest => false,
        }
    })
}

/// Students may only touch a showcase whose `student_id` is their own id.
pub fn showcase_owner() -> Condition {
    Condition::new(SHOWCASE_OWNER, |resource, user, _candidate| match user.role {
        Role::Student => resource
            .get("student_id")
            .and_then(Value::as_str)
            .is_some_and(|owner| user.owns(owner)),
        Role::Instructor | Role::Administrator => true,
        Role::Guest => false,
    })
}

/// Guests may only read a showcase flagged public.
pub fn showcase_public() -> Condition {
    Condition::new(SHOWCASE_PUBLIC, |resource, user, _candidate| match user.role {
        Role::Guest => resource
            .get("is_public")
            .or_else(|| resource.get("isPublic"))
            .and_then(Value::as_bool)
            .unwrap_or(false),
        Role::Instructor | Role::Student | Role::Administrator => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Resource {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_by_name_knows_every_builtin() {
        for name in BUILTIN_CONDITIONS {
            let condition = by_name(name).unwrap();
            assert_eq!(condition.name(), name);
        }
        assert!(by_name("always").is_none());
    }

    #[test]
    fn test_submission_is_draft() {
        let student = Identity::student("s-1");
        let draft = submission_is_draft();

        assert!(draft.evaluate(&record(json!({ "status": "draft" })), &student, None));
        assert!(!draft.evaluate(&record(json!({ "status": "submitted" })), &student, None));
        // Never transitioned
        assert!(draft.evaluate(&record(json!({})), &student, None));
        // Malformed status is the restrictive case
        assert!(!draft.evaluate(&record(json!({ "status": 3 })), &student, None));
        assert!(!draft.evaluate(&record(json!({ "status": "???" })), &student, None));
    }

    #[test]
    fn test_submission_in_grading() {
        let instructor = Identity::instructor("i-1");
        let grading = submission_in_grading();

        assert!(grading.evaluate(&record(json!({ "status": "submitted" })), &instructor, None));
        assert!(grading.evaluate(&record(json!({ "status": "graded" })), &instructor, None));
        assert!(!grading.evaluate(&record(json!({ "status": "draft" })), &instructor, None));
        assert!(!grading.evaluate(&record(json!({})), &instructor, None));
    }

    #[test]
    fn test_student_status_transition() {
        let student = Identity::student("s-1");
        let transition = submission_status_transition();
        let draft = record(json!({ "status": "draft" }));
        let submitted = record(json!({ "status": "submitted" }));

        assert!(transition.evaluate(&draft, &student, Some(&json!("submitted"))));
        assert!(!transition.evaluate(&draft, &student, Some(&json!("graded"))));
        assert!(!transition.evaluate(&submitted, &student, Some(&json!("draft"))));
        assert!(!transition.evaluate(&draft, &student, Some(&json!("bogus"))));
        assert!(!transition.evaluate(&draft, &student, Some(&json!(1))));

        // No candidate: editable only while a transition is possible
        assert!(transition.evaluate(&draft, &student, None));
        assert!(!transition.evaluate(&submitted, &student, None));

        // First-time transition on a record without a status field
        assert!(transition.evaluate(&record(json!({})), &student, Some(&json!("submitted"))));
    }

    #[test]
    fn test_instructor_status_transition() {
        let instructor = Identity::instructor("i-1");
        let transition = submission_status_transition();
        let submitted = record(json!({ "status": "submitted" }));

        assert!(transition.evaluate(&submitted, &instructor, Some(&json!("graded"))));
        assert!(transition.evaluate(&submitted, &instructor, Some(&json!("draft"))));
        assert!(!transition.evaluate(&submitted, &instructor, Some(&json!("finished"))));
        assert!(!transition.evaluate(&submitted, &Identity::guest("g"), Some(&json!("graded"))));
    }

    #[test]
    fn test_showcase_owner() {
        let owner = showcase_owner();
        let showcase = record(json!({ "student_id": "s-1" }));

        assert!(owner.evaluate(&showcase, &Identity::student("s-1"), None));
        assert!(!owner.evaluate(&showcase, &Identity::student("s-2"), None));
        assert!(owner.evaluate(&showcase, &Identity::instructor("i-1"), None));
        assert!(!owner.evaluate(&showcase, &Identity::guest("s-1"), None));
        assert!(!owner.evaluate(&record(json!({})), &Identity::student("s-1"), None));
    }

    #[test]
    fn test_showcase_public() {
        let public = showcase_public();
        let guest = Identity::guest("g-1");

        assert!(public.evaluate(&record(json!({ "is_public": true })), &guest, None));
        assert!(public.evaluate(&record(json!({ "isPublic": true })), &guest, None));
        assert!(!public.evaluate(&record(json!({ "is_public": false })), &guest, None));
        assert!(!public.evaluate(&record(json!({ "is_public": "yes" })), &guest, None));
        assert!(!public.evaluate(&record(json!({})), &guest, None));
        assert!(public.evaluate(&record(json!({})), &Identity::student("s-1"), None));
    }

    #[test]
    fn test_panicking_condition_denies() {
        let broken = Condition::new("broken", |resource, _user, _candidate| {
            resource["missing"].as_str().unwrap().is_empty()
        });

        assert!(!broken.evaluate(&record(json!({})), &Identity::student("s-1"), None));
    }

    #[test]
    fn test_condition_debug_shows_name() {
        let debug = format!("{:?}", submission_is_draft());
        assert!(debug.contains("submission_is_draft"));
    }
}
