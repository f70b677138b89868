//! # Rules
//!
//! Access rules and the registry that maps
//! (resource kind, field, mode) to a rule.
//!
//! The registry is built once and read-only afterwards. A missing entry is
//! meaningful: it denies the field to everyone but administrators.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::conditions::Condition;
use crate::modes::AccessMode;
use crate::resources::ResourceKind;
use crate::roles::Role;

/// A rule governing one (kind, field, mode) triple.
///
/// A rule admits the roles in `allowed_roles`. If a condition is present
/// it must also hold for the live record.
///
/// # Example
///
/// ```
/// use showcase_access::{conditions, AccessRule, Role};
///
/// let rule = AccessRule::new([Role::Student])
///     .with_condition(conditions::submission_is_draft());
///
/// assert!(rule.allows_role(Role::Student));
/// assert!(!rule.allows_role(Role::Instructor));
/// assert!(rule.condition().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AccessRule {
    allowed_roles: HashSet<Role>,
    condition: Option<Condition>,
}

impl AccessRule {
    /// Create an unconditional rule for the given roles.
    pub fn new<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        Self {
            allowed_roles: roles.into_iter().collect(),
            condition: None,
        }
    }

    /// Attach a condition to the rule.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Check if a role is eligible under this rule.
    pub fn allows_role(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }

    /// The eligible roles.
    pub fn allowed_roles(&self) -> &HashSet<Role> {
        &self.allowed_roles
    }

    /// The dynamic condition, if any.
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }
}

/// Read and write rules of a single field.
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
    /// Rule for reading the field.
    pub read: Option<AccessRule>,
    /// Rule for writing the field.
    pub write: Option<AccessRule>,
}

impl FieldRules {
    /// Get the rule for a mode.
    pub fn get(&self, mode: AccessMode) -> Option<&AccessRule> {
        match mode {
            AccessMode::Read => self.read.as_ref(),
            AccessMode::Write => self.write.as_ref(),
        }
    }

    fn set(&mut self, mode: AccessMode, rule: AccessRule) {
        match mode {
            AccessMode::Read => self.read = Some(rule),
            AccessMode::Write => self.write = Some(rule),
        }
    }
}

type FieldTable = BTreeMap<String, FieldRules>;

/// The immutable table of field rules for every resource kind.
///
/// Use [`RuleRegistry::default_rules`] for the platform table, or
/// [`RuleRegistry::builder`] to assemble one.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    tables: HashMap<ResourceKind, FieldTable>,
}

impl RuleRegistry {
    /// Start building a registry from scratch.
    pub fn builder() -> RuleRegistryBuilder {
        RuleRegistryBuilder::new()
    }

    /// An empty registry. Every non-administrator decision is a denial.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up the rule for a (kind, field, mode) triple.
    ///
    /// # Returns
    ///
    /// `Some(&AccessRule)` if the triple is governed, `None` otherwise
    pub fn lookup(&self, kind: ResourceKind, field: &str, mode: AccessMode) -> Option<&AccessRule> {
        self.tables.get(&kind)?.get(field)?.get(mode)
    }

    /// Governed field names of a kind, in lexical order.
    pub fn fields(&self, kind: ResourceKind) -> Vec<&str> {
        self.tables
            .get(&kind)
            .map(|table| table.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Number of registered rules across all kinds and modes.
    pub fn len(&self) -> usize {
        self.tables
            .values()
            .flat_map(|table| table.values())
            .map(|rules| usize::from(rules.read.is_some()) + usize::from(rules.write.is_some()))
            .sum()
    }

    /// Check if no rule is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Turn the registry back into a builder, e.g. to overlay extra rules.
    pub fn into_builder(self) -> RuleRegistryBuilder {
        RuleRegistryBuilder {
            tables: self.tables,
        }
    }
}

/// Builder for a [`RuleRegistry`].
///
/// Registering a rule for a triple that already has one replaces it.
///
/// # Example
///
/// ```
/// use showcase_access::{AccessMode, ResourceKind, Role, RuleRegistry};
///
/// let registry = RuleRegistry::builder()
///     .kind(ResourceKind::Template, |t| {
///         t.read("name", [Role::Instructor, Role::Student]);
///     })
///     .build();
///
/// assert!(registry.lookup(ResourceKind::Template, "name", AccessMode::Read).is_some());
/// assert!(registry.lookup(ResourceKind::Template, "name", AccessMode::Write).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleRegistryBuilder {
    tables: HashMap<ResourceKind, FieldTable>,
}

impl RuleRegistryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single rule.
    pub fn rule(mut self, kind: ResourceKind, field: impl Into<String>, mode: AccessMode, rule: AccessRule) -> Self {
        self.insert(kind, field, mode, rule);
        self
    }

    /// Register a single rule in place.
    pub fn insert(&mut self, kind: ResourceKind, field: impl Into<String>, mode: AccessMode, rule: AccessRule) {
        self.tables
            .entry(kind)
            .or_default()
            .entry(field.into())
            .or_default()
            .set(mode, rule);
    }

    /// Declare the field rules of one kind.
    pub fn kind<F>(mut self, kind: ResourceKind, declare: F) -> Self
    where
        F: FnOnce(&mut KindRules<'_>),
    {
        let mut rules = KindRules {
            table: self.tables.entry(kind).or_default(),
        };
        declare(&mut rules);
        self
    }

    /// Freeze the registry.
    pub fn build(self) -> RuleRegistry {
        RuleRegistry {
            tables: self.tables,
        }
    }
}

/// Field declarations for a single resource kind.
pub struct KindRules<'a> {
    table: &'a mut FieldTable,
}

impl KindRules<'_> {
    fn set(&mut self, field: &str, mode: AccessMode, rule: AccessRule) -> &mut Self {
        self.table.entry(field.to_string()).or_default().set(mode, rule);
        self
    }

    /// Readable by `roles` unconditionally.
    pub fn read<I>(&mut self, field: &str, roles: I) -> &mut Self
    where
        I: IntoIterator<Item = Role>,
    {
        self.set(field, AccessMode::Read, AccessRule::new(roles))
    }

    /// Readable by `roles` while `condition` holds.
    pub fn read_if<I>(&mut self, field: &str, roles: I, condition: Condition) -> &mut Self
    where
        I: IntoIterator<Item = Role>,
    {
        self.set(field, AccessMode::Read, AccessRule::new(roles).with_condition(condition))
    }

    /// Writable by `roles` unconditionally.
    pub fn write<I>(&mut self, field: &str, roles: I) -> &mut Self
    where
        I: IntoIterator<Item = Role>,
    {
        self.set(field, AccessMode::Write, AccessRule::new(roles))
    }

    /// Writable by `roles` while `condition` holds.
    pub fn write_if<I>(&mut self, field: &str, roles: I, condition: Condition) -> &mut Self
    where
        I: IntoIterator<Item = Role>,
    {
        self.set(field, AccessMode::Write, AccessRule::new(roles).with_condition(condition))
    }
}
