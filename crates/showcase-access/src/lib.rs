//! # Showcase Access (Field-Level Access Control)
//!
//! This crate decides, per role and per resource field, whether a read or
//! write is permitted on the showcase platform's records (submissions,
//! showcases, profiles, templates, cohorts, settings).
//!
//! ## Overview
//!
//! The showcase-access crate handles:
//! - **Taxonomy**: Roles, resource kinds and access modes
//! - **Rules**: A registry mapping (kind, field, mode) to eligible roles
//!   plus an optional condition on the live record
//! - **Decisions**: `decide` for one field, `project` for a whole record,
//!   `validate` for a proposed update
//!
//! ## Architecture
//!
//! ```text
//! RuleRegistry (read-only) --> decide --> project
//!                                    \--> validate --> UpdateValidation
//!
//! decide = administrator override
//!        -> rule lookup (absent = deny)
//!        -> role eligibility
//!        -> condition(resource, user, candidate)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use showcase_access::{AccessMode, Identity, ResourceKind, RuleRegistry};
//!
//! let registry = RuleRegistry::default_rules();
//! let student = Identity::student("student-1");
//!
//! let submission = json!({ "id": "sub-1", "status": "draft", "title": "Week 1" });
//! let submission = submission.as_object().unwrap();
//!
//! // Single field
//! assert!(registry.decide(&student, ResourceKind::Submission, submission, "title", AccessMode::Write, None));
//!
//! // Whole record
//! let editable = registry.project(&student, ResourceKind::Submission, submission, AccessMode::Write);
//! assert!(editable.contains_key("title"));
//! assert!(!editable.contains_key("id"));
//!
//! // Proposed update
//! let changes = json!({ "title": "Week 1 (final)", "grade": "A" });
//! let result = registry.validate(&student, ResourceKind::Submission, submission, changes.as_object().unwrap());
//! assert!(!result.is_valid);
//! assert_eq!(result.rejected_fields(), vec!["grade"]);
//! ```
//!
//! ## Deny by Default
//!
//! A field with no rule for a mode is denied to every role except
//! Administrator, which bypasses rule lookup entirely.
//!
//! ## Reloading Rules
//!
//! The registry is immutable once built. Integrators that reload rules at
//! runtime hold a [`SharedRegistry`] and swap whole registries.

pub mod conditions;
pub mod config;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod modes;
pub mod resources;
pub mod roles;
pub mod rules;
pub mod shared;
pub mod status;
pub mod validation;

// Re-export main types for convenience
pub use conditions::Condition;
pub use config::{load_registry, RuleConfig, RuleEntry};
pub use error::{AccessError, AccessResult, ConfigError};
pub use modes::AccessMode;
pub use resources::{Resource, ResourceKind};
pub use roles::{Identity, Role};
pub use rules::{AccessRule, FieldRules, KindRules, RuleRegistry, RuleRegistryBuilder};
pub use shared::SharedRegistry;
pub use status::{can_grade_submission, can_submit_for_grading, ShowcaseStatus, SubmissionStatus};
pub use validation::{UpdateValidation, ValidationError};
