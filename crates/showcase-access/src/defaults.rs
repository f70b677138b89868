//! # Default Rules
//!
//! The platform's field table. Administrators are deliberately absent from
//! every role set below: their access comes from the engine's supervisory
//! override, never from a rule.

use crate::conditions::{
    showcase_owner, showcase_public, submission_in_grading, submission_is_draft,
    submission_status_transition,
};
use crate::resources::ResourceKind;
use crate::roles::Role;
use crate::rules::{RuleRegistry, RuleRegistryBuilder};

const STAFF: [Role; 1] = [Role::Instructor];
const MEMBERS: [Role; 2] = [Role::Instructor, Role::Student];
const EVERYONE: [Role; 3] = [Role::Instructor, Role::Student, Role::Guest];
const AUTHOR: [Role; 1] = [Role::Student];
const NOBODY: [Role; 0] = [];

/// Submission fields readable by instructors and students.
const SUBMISSION_MEMBER_READ: [&str; 22] = [
    "id",
    "week",
    "title",
    "description",
    "brainlift_link",
    "technologies",
    "featured_image_url",
    "demo_link",
    "repo_link",
    "deployed_url",
    "social_post",
    "notes",
    "passing",
    "grade",
    "report",
    "status",
    "created_at",
    "updated_at",
    "graded_at",
    "graded_by",
    "cohort_id",
    "student_profile_id",
];

/// Submission fields a student may only change while drafting.
const SUBMISSION_DRAFT_ONLY: [&str; 6] = [
    "title",
    "description",
    "week",
    "brainlift_link",
    "technologies",
    "featured_image_url",
];

/// Submission fields editable in any status.
const SUBMISSION_ALWAYS_EDITABLE: [&str; 5] = ["demo_link", "repo_link", "deployed_url", "notes", "social_post"];

/// Showcase fields visible to guests when the showcase is public.
const SHOWCASE_PUBLIC_READ: [&str; 9] = [
    "id",
    "title",
    "description",
    "status",
    "profile",
    "projects",
    "template_id",
    "student_id",
    "publication",
];

/// Showcase fields a student edits on their own showcase.
const SHOWCASE_OWNER_WRITE: [&str; 9] = [
    "title",
    "description",
    "template_id",
    "profile",
    "projects",
    "customization",
    "visibility",
    "is_public",
    "publication",
];

/// Builder pre-loaded with the platform rules.
///
/// Use this to overlay extra rules before freezing.
pub fn default_builder() -> RuleRegistryBuilder {
    RuleRegistry::builder()
        .kind(ResourceKind::Submission, |s| {
            for field in SUBMISSION_MEMBER_READ {
                s.read(field, MEMBERS);
            }
            s.read("auth_id", STAFF);

            for field in SUBMISSION_DRAFT_ONLY {
                s.write_if(field, AUTHOR, submission_is_draft());
            }
            for field in SUBMISSION_ALWAYS_EDITABLE {
                s.write(field, MEMBERS);
            }

            s.write("passing", STAFF)
                .write("report", STAFF)
                .write_if("grade", STAFF, submission_in_grading())
                .write_if("status", MEMBERS, submission_status_transition())
                .write("cohort_id", NOBODY);
        })
        .kind(ResourceKind::Showcase, |s| {
            for field in SHOWCASE_PUBLIC_READ {
                s.read_if(field, EVERYONE, showcase_public());
            }
            s.read("customization", MEMBERS)
                .read("visibility", MEMBERS)
                .read("is_public", MEMBERS)
                .read_if("analytics", MEMBERS, showcase_owner());

            for field in SHOWCASE_OWNER_WRITE {
                s.write_if(field, AUTHOR, showcase_owner());
            }
        })
        .kind(ResourceKind::StudentProfile, |p| {
            p.read("id", MEMBERS);
        })
        .kind(ResourceKind::InstructorProfile, |p| {
            p.read("id", STAFF);
        })
        .kind(ResourceKind::Template, |t| {
            t.read("id", MEMBERS);
        })
        .kind(ResourceKind::Cohort, |c| {
            c.read("id", STAFF);
        })
        .kind(ResourceKind::SystemSettings, |s| {
            s.read("id", NOBODY);
        })
}

impl RuleRegistry {
    /// The platform's default field table.
    ///
    /// # Example
    ///
    /// ```
    /// use showcase_access::{AccessMode, ResourceKind, RuleRegistry};
    ///
    /// let registry = RuleRegistry::default_rules();
    /// assert!(registry.lookup(ResourceKind::Submission, "grade", AccessMode::Write).is_some());
    /// // Read-only fields have no write rule
    /// assert!(registry.lookup(ResourceKind::Submission, "created_at", AccessMode::Write).is_none());
    /// ```
    pub fn default_rules() -> Self {
        default_builder().build()
    }
}
