//! Rule configuration
//!
//! Rules can be supplied as a JSON document, either compiled on their own
//! or layered over the default table. Conditions are referenced by name
//! (see [`crate::conditions::BUILTIN_CONDITIONS`]) since predicates are code.
//!
//! ```json
//! { "rules": [
//!   { "kind": "template", "field": "name", "mode": "read",
//!     "roles": ["instructor", "student"] },
//!   { "kind": "submission", "field": "title", "mode": "write",
//!     "roles": ["student"], "condition": "submission_is_draft" } ] }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::conditions;
use crate::defaults::default_builder;
use crate::error::ConfigError;
use crate::modes::AccessMode;
use crate::resources::ResourceKind;
use crate::roles::Role;
use crate::rules::{AccessRule, RuleRegistry, RuleRegistryBuilder};

/// Environment variable naming a rule file to overlay on the defaults.
pub const RULES_ENV_VAR: &str = "FIELD_ACCESS_RULES";

/// One rule entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleEntry {
    /// Resource kind the rule belongs to.
    pub kind: ResourceKind,
    /// Governed field.
    pub field: String,
    /// Read or write.
    pub mode: AccessMode,
    /// Eligible roles. May be empty.
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Name of a built-in condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl RuleEntry {
    fn compile(&self) -> Result<AccessRule, ConfigError> {
        if self.field.trim().is_empty() {
            return Err(ConfigError::EmptyField(self.kind.as_str().to_string()));
        }

        let rule = AccessRule::new(self.roles.iter().copied());
        match &self.condition {
            None => Ok(rule),
            Some(name) => conditions::by_name(name)
                .map(|condition| rule.with_condition(condition))
                .ok_or_else(|| ConfigError::UnknownCondition {
                    kind: self.kind.as_str().to_string(),
                    field: self.field.clone(),
                    condition: name.clone(),
                }),
        }
    }
}

/// A rule document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleConfig {
    /// Rule entries, applied in order.
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

impl RuleConfig {
    /// Parse a rule document from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a rule document from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Load the rule document named by `FIELD_ACCESS_RULES`.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the variable is unset or empty
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        match std::env::var(RULES_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_path(path.trim()).map(Some),
            _ => Ok(None),
        }
    }

    /// Register every entry on `builder`. Later entries replace earlier ones.
    pub fn apply_to(&self, mut builder: RuleRegistryBuilder) -> Result<RuleRegistryBuilder, ConfigError> {
        for entry in &self.rules {
            builder.insert(entry.kind, entry.field.clone(), entry.mode, entry.compile()?);
        }
        Ok(builder)
    }

    /// Compile this document alone into a registry.
    pub fn build(&self) -> Result<RuleRegistry, ConfigError> {
        Ok(self.apply_to(RuleRegistry::builder())?.build())
    }

    /// Compile this document layered over the default rules.
    pub fn build_over_defaults(&self) -> Result<RuleRegistry, ConfigError> {
        Ok(self.apply_to(default_builder())?.build())
    }
}

/// Build the process registry: defaults, plus the overlay named by
/// `FIELD_ACCESS_RULES` if set.
pub fn load_registry() -> Result<RuleRegistry, ConfigError> {
    match RuleConfig::from_env()? {
        Some(config) => {
            let registry = config.build_over_defaults()?;
            tracing::info!(
                overlay_rules = config.rules.len(),
                total_rules = registry.len(),
                "Loaded field access rules with overlay"
            );
            Ok(registry)
        }
        None => {
            let registry = RuleRegistry::default_rules();
            tracing::info!(total_rules = registry.len(), "Loaded default field access rules");
            Ok(registry)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "rules": [
            { "kind": "template", "field": "name", "mode": "read", "roles": ["instructor", "student"] },
            { "kind": "studentProfile", "field": "bio", "mode": "write", "roles": ["student"],
              "condition": "showcase_owner" },
            { "kind": "cohort", "field": "id", "mode": "read" }
        ]
    }"#;

    #[test]
    fn test_parse_document() {
        let config = RuleConfig::from_json_str(DOCUMENT).unwrap();
        assert_eq!(config.rules.len(), 3);
        assert_eq!(config.rules[1].kind, ResourceKind::StudentProfile);
        assert_eq!(config.rules[1].condition.as_deref(), Some("showcase_owner"));
        assert!(config.rules[2].roles.is_empty());
    }

    #[test]
    fn test_build_standalone() {
        let registry = RuleConfig::from_json_str(DOCUMENT).unwrap().build().unwrap();
        assert_eq!(registry.len(), 3);

        let rule = registry.lookup(ResourceKind::Template, "name", AccessMode::Read).unwrap();
        assert!(rule.allows_role(Role::Student));
        assert!(!rule.allows_role(Role::Guest));

        let rule = registry.lookup(ResourceKind::StudentProfile, "bio", AccessMode::Write).unwrap();
        assert_eq!(rule.condition().unwrap().name(), "showcase_owner");

        assert!(registry.lookup(ResourceKind::Submission, "title", AccessMode::Read).is_none());
    }

    #[test]
    fn test_build_over_defaults_replaces_and_extends() {
        let config = RuleConfig::from_json_str(DOCUMENT).unwrap();
        let registry = config.build_over_defaults().unwrap();

        // Extended
        assert!(registry.lookup(ResourceKind::Template, "name", AccessMode::Read).is_some());
        // Replaced: cohort id now has an empty role set
        let rule = registry.lookup(ResourceKind::Cohort, "id", AccessMode::Read).unwrap();
        assert!(!rule.allows_role(Role::Instructor));
        // Untouched
        assert!(registry.lookup(ResourceKind::Submission, "grade", AccessMode::Write).is_some());
    }

    #[test]
    fn test_unknown_condition_rejected() {
        let config = RuleConfig::from_json_str(
            r#"{ "rules": [ { "kind": "submission", "field": "title", "mode": "write",
                               "roles": ["student"], "condition": "on_tuesdays" } ] }"#,
        )
        .unwrap();

        match config.build() {
            Err(ConfigError::UnknownCondition { condition, field, .. }) => {
                assert_eq!(condition, "on_tuesdays");
                assert_eq!(field, "title");
            }
            other => panic!("expected unknown condition, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_role_is_parse_error() {
        let err = RuleConfig::from_json_str(
            r#"{ "rules": [ { "kind": "submission", "field": "title", "mode": "read", "roles": ["owner"] } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_empty_field_rejected() {
        let config = RuleConfig {
            rules: vec![RuleEntry {
                kind: ResourceKind::Template,
                field: "  ".to_string(),
                mode: AccessMode::Read,
                roles: vec![Role::Student],
                condition: None,
            }],
        };
        assert!(matches!(config.build(), Err(ConfigError::EmptyField(_))));
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join(format!("showcase-access-rules-{}.json", std::process::id()));
        std::fs::write(&path, DOCUMENT).unwrap();

        let config = RuleConfig::from_path(&path).unwrap();
        assert_eq!(config.rules.len(), 3);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(RuleConfig::from_path(&path), Err(ConfigError::Io { .. })));
    }
}
