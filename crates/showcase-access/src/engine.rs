//! # Decision Engine
//!
//! `decide` is the single source of truth for one
//! (user, resource, field, mode) tuple. Projection and update validation
//! are both built on it and never consult the rule table directly.
//!
//! ```text
//! decide:
//!   1. administrator          -> allow (no lookup)
//!   2. no rule for the triple -> deny
//!   3. role not eligible      -> deny
//!   4. condition present      -> condition(resource, user, candidate)
//!      otherwise              -> allow
//! ```

use serde_json::Value;

use crate::modes::AccessMode;
use crate::resources::{Resource, ResourceKind};
use crate::roles::{Identity, Role};
use crate::rules::RuleRegistry;
use crate::validation::{UpdateValidation, ValidationError};

impl RuleRegistry {
    /// Decide whether `user` may access `field` of `resource` in `mode`.
    ///
    /// # Arguments
    ///
    /// * `user` - The acting identity
    /// * `kind` - Schema of the resource
    /// * `resource` - The live record
    /// * `field` - Field being accessed
    /// * `mode` - Read or write
    /// * `candidate` - Proposed new value, for writes
    ///
    /// # Returns
    ///
    /// `true` if access is allowed. Never errors.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use showcase_access::{AccessMode, Identity, ResourceKind, RuleRegistry};
    ///
    /// let registry = RuleRegistry::default_rules();
    /// let student = Identity::student("student-1");
    ///
    /// let draft = json!({ "status": "draft", "title": "Week 3" });
    /// let draft = draft.as_object().unwrap();
    /// assert!(registry.decide(&student, ResourceKind::Submission, draft, "title", AccessMode::Write, None));
    ///
    /// let submitted = json!({ "status": "submitted", "title": "Week 3" });
    /// let submitted = submitted.as_object().unwrap();
    /// assert!(!registry.decide(&student, ResourceKind::Submission, submitted, "title", AccessMode::Write, None));
    /// ```
    pub fn decide(
        &self,
        user: &Identity,
        kind: ResourceKind,
        resource: &Resource,
        field: &str,
        mode: AccessMode,
        candidate: Option<&Value>,
    ) -> bool {
        match user.role {
            Role::Administrator => return true,
            Role::Instructor | Role::Student | Role::Guest => {}
        }

        let Some(rule) = self.lookup(kind, field, mode) else {
            tracing::debug!(
                kind = %kind,
                field,
                mode = %mode,
                role = %user.role,
                "No rule registered, denying field access"
            );
            return false;
        };

        if !rule.allows_role(user.role) {
            tracing::debug!(
                kind = %kind,
                field,
                mode = %mode,
                role = %user.role,
                "Role not eligible for field"
            );
            return false;
        }

        match rule.condition() {
            Some(condition) => {
                let allowed = condition.evaluate(resource, user, candidate);
                if !allowed {
                    tracing::debug!(
                        kind = %kind,
                        field,
                        mode = %mode,
                        role = %user.role,
                        condition = condition.name(),
                        "Condition rejected field access"
                    );
                }
                allowed
            }
            None => true,
        }
    }

    /// Copy of `resource` holding only the fields `user` may access in `mode`.
    ///
    /// Administrators get the full record. Fields absent from the input
    /// never appear in the output.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use showcase_access::{AccessMode, Identity, ResourceKind, RuleRegistry};
    ///
    /// let registry = RuleRegistry::default_rules();
    /// let submission = json!({ "id": "sub-1", "auth_id": "auth-7", "grade": "A" });
    /// let submission = submission.as_object().unwrap();
    ///
    /// let visible = registry.project(
    ///     &Identity::student("student-1"),
    ///     ResourceKind::Submission,
    ///     submission,
    ///     AccessMode::Read,
    /// );
    /// assert!(visible.contains_key("grade"));
    /// assert!(!visible.contains_key("auth_id"));
    /// ```
    pub fn project(&self, user: &Identity, kind: ResourceKind, resource: &Resource, mode: AccessMode) -> Resource {
        if user.role.is_administrator() {
            return resource.clone();
        }

        resource
            .iter()
            .filter(|(field, _)| self.decide(user, kind, resource, field, mode, None))
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect()
    }

    /// Check a proposed set of field changes.
    ///
    /// Every field in `changes` is checked as a write with its candidate
    /// value. All rejected fields are reported; checking does not stop at
    /// the first failure.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use showcase_access::{Identity, ResourceKind, RuleRegistry};
    ///
    /// let registry = RuleRegistry::default_rules();
    /// let submission = json!({ "status": "submitted" });
    /// let changes = json!({ "title": "New Title", "grade": "B" });
    ///
    /// let result = registry.validate(
    ///     &Identity::student("student-1"),
    ///     ResourceKind::Submission,
    ///     submission.as_object().unwrap(),
    ///     changes.as_object().unwrap(),
    /// );
    /// assert!(!result.is_valid);
    /// assert_eq!(result.errors.len(), 2);
    /// ```
    pub fn validate(&self, user: &Identity, kind: ResourceKind, resource: &Resource, changes: &Resource) -> UpdateValidation {
        if user.role.is_administrator() {
            return UpdateValidation::valid();
        }

        let errors: Vec<ValidationError> = changes
            .iter()
            .filter(|(field, value)| !self.decide(user, kind, resource, field, AccessMode::Write, Some(*value)))
            .map(|(field, _)| ValidationError::permission_denied(field.as_str()))
            .collect();

        if !errors.is_empty() {
            tracing::debug!(
                kind = %kind,
                user_id = %user.id,
                role = %user.role,
                rejected = errors.len(),
                "Update rejected"
            );
        }

        UpdateValidation::from_errors(errors)
    }
}
