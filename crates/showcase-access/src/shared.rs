//! Shared registry handle
//!
//! Decisions read an `Arc` snapshot of the registry. A reload swaps the
//! whole reference; the table behind a snapshot is never edited in place.

use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;

use crate::modes::AccessMode;
use crate::resources::{Resource, ResourceKind};
use crate::roles::Identity;
use crate::rules::RuleRegistry;
use crate::validation::UpdateValidation;

/// Atomically replaceable reference to the current [`RuleRegistry`].
///
/// # Example
///
/// ```
/// use showcase_access::{RuleRegistry, SharedRegistry};
///
/// let shared = SharedRegistry::new(RuleRegistry::default_rules());
/// let before = shared.current();
///
/// shared.replace(RuleRegistry::empty());
/// assert!(shared.current().is_empty());
/// // Snapshots taken earlier are unaffected
/// assert!(!before.is_empty());
/// ```
#[derive(Debug)]
pub struct SharedRegistry {
    inner: RwLock<Arc<RuleRegistry>>,
}

impl SharedRegistry {
    /// Wrap a fully built registry.
    pub fn new(registry: RuleRegistry) -> Self {
        Self {
            inner: RwLock::new(Arc::new(registry)),
        }
    }

    /// Snapshot of the current registry.
    pub fn current(&self) -> Arc<RuleRegistry> {
        Arc::clone(&self.inner.read())
    }

    /// Replace the registry, returning the previous one.
    pub fn replace(&self, registry: RuleRegistry) -> Arc<RuleRegistry> {
        let next = Arc::new(registry);
        let rules = next.len();
        let previous = std::mem::replace(&mut *self.inner.write(), next);
        tracing::info!(rules, "Replaced field access registry");
        previous
    }

    /// [`RuleRegistry::decide`] against the current snapshot.
    pub fn decide(
        &self,
        user: &Identity,
        kind: ResourceKind,
        resource: &Resource,
        field: &str,
        mode: AccessMode,
        candidate: Option<&Value>,
    ) -> bool {
        self.current().decide(user, kind, resource, field, mode, candidate)
    }

    /// [`RuleRegistry::project`] against the current snapshot.
    pub fn project(&self, user: &Identity, kind: ResourceKind, resource: &Resource, mode: AccessMode) -> Resource {
        self.current().project(user, kind, resource, mode)
    }

    /// [`RuleRegistry::validate`] against the current snapshot.
    pub fn validate(&self, user: &Identity, kind: ResourceKind, resource: &Resource, changes: &Resource) -> UpdateValidation {
        self.current().validate(user, kind, resource, changes)
    }
}

impl Default for SharedRegistry {
    fn default() -> Self {
        Self::new(RuleRegistry::default_rules())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_replace_returns_previous() {
        let shared = SharedRegistry::default();
        let previous = shared.replace(RuleRegistry::empty());
        assert!(!previous.is_empty());
        assert!(shared.current().is_empty());
    }

    #[test]
    fn test_decisions_follow_replacement() {
        let shared = SharedRegistry::default();
        let student = Identity::student("student-1");
        let draft = json!({ "status": "draft" });
        let draft = draft.as_object().unwrap();

        assert!(shared.decide(&student, ResourceKind::Submission, draft, "title", AccessMode::Write, None));

        shared.replace(RuleRegistry::empty());
        assert!(!shared.decide(&student, ResourceKind::Submission, draft, "title", AccessMode::Write, None));
        // Override survives any registry
        assert!(shared.decide(
            &Identity::administrator("admin-1"),
            ResourceKind::Submission,
            draft,
            "title",
            AccessMode::Write,
            None
        ));
    }
}
