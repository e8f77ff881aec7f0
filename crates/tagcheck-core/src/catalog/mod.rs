//! Rule catalog for tag-group validation
//!
//! The catalog is configuration data: per domain, which group codes exist, which
//! are mandatory, which item codes a group may carry and what each item's value
//! must look like. It holds no validation logic of its own; the validators in
//! [`crate::validation`] resolve a group code to a [`RuleEntry`] once and then
//! dispatch on the entry's [`ItemVocabulary`].
//!
//! Copyright (c) 2025 Tagcheck Team
//! Licensed under the Apache-2.0 license

mod standard;

use crate::loader::error::{LoaderError, LoaderResult};
use crate::model::Domain;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

static STANDARD_CATALOG: OnceLock<RuleCatalog> = OnceLock::new();

/// Declarative rule-set for every supported domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCatalog {
    /// Contract version these rules were written against
    pub version: String,
    pub domains: BTreeMap<Domain, DomainRules>,
}

/// Rules for the groups of one domain, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainRules {
    #[serde(default)]
    pub groups: Vec<RuleEntry>,
}

/// Rules for one group code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub code: String,
    /// Must the group appear at least once in the collection
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub items: ItemVocabulary,
    /// Per-item value constraints, keyed by item code
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub constraints: BTreeMap<String, ItemConstraint>,
    /// Sets of item codes of which exactly one must appear
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusive: Vec<ExclusionGroup>,
    /// Item codes expected at fixed list positions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positional: Vec<String>,
}

/// Where a group's allowed item codes come from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "codes", rename_all = "snake_case")]
pub enum ItemVocabulary {
    /// Any item code is accepted
    #[default]
    Open,
    /// Only the listed item codes are accepted
    Fixed(Vec<String>),
    /// Item codes are supplied per call as reference definitions
    Negotiated,
}

/// Constraint on the value of one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemConstraint {
    NonEmptyString,
    /// JSON boolean, or the strings "true" / "false"
    Boolean,
    /// Integer greater than zero, as a JSON number or a digit string
    PositiveInteger,
    Enum { values: Vec<String> },
    Email,
    Phone,
    Url,
}

/// Item codes of which exactly one must be present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionGroup {
    pub codes: Vec<String>,
}

impl RuleCatalog {
    /// Create an empty catalog
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            domains: BTreeMap::new(),
        }
    }

    /// The built-in catalog, built once and shared read-only
    pub fn standard() -> &'static RuleCatalog {
        STANDARD_CATALOG.get_or_init(standard::build)
    }

    /// Add or replace a domain's rules
    pub fn with_domain(mut self, domain: Domain, rules: DomainRules) -> Self {
        self.domains.insert(domain, rules);
        self
    }

    /// Rules for a whole domain
    pub fn domain(&self, domain: Domain) -> Option<&DomainRules> {
        self.domains.get(&domain)
    }

    /// Rules for one group code in a domain
    pub fn rules_for(&self, domain: Domain, group_code: &str) -> Option<&RuleEntry> {
        self.domain(domain).and_then(|rules| rules.entry(group_code))
    }

    /// Check internal consistency of the catalog
    pub fn check(&self) -> LoaderResult<()> {
        for (domain, rules) in &self.domains {
            let mut seen = HashSet::new();
            for entry in &rules.groups {
                let context = format!("{}.{}", domain, entry.code);

                if entry.code.trim().is_empty() {
                    return Err(LoaderError::invalid_catalog(domain.as_str(), "group code cannot be empty"));
                }
                if !seen.insert(entry.code.as_str()) {
                    return Err(LoaderError::invalid_catalog(context, "duplicate group code"));
                }
                if let ItemVocabulary::Fixed(codes) = &entry.items {
                    if codes.is_empty() {
                        return Err(LoaderError::invalid_catalog(context, "fixed item vocabulary cannot be empty"));
                    }
                    if let Some(code) = entry.constraints.keys().find(|code| !codes.contains(code)) {
                        return Err(LoaderError::invalid_catalog(
                            context,
                            format!("constraint for '{}' which is not in the item vocabulary", code),
                        ));
                    }
                }
                for group in &entry.exclusive {
                    if group.codes.len() < 2 {
                        return Err(LoaderError::invalid_catalog(
                            context,
                            "exclusion group needs at least two codes",
                        ));
                    }
                }
                let empty_enum = entry
                    .constraints
                    .iter()
                    .find(|(_, c)| matches!(c, ItemConstraint::Enum { values } if values.is_empty()));
                if let Some((code, _)) = empty_enum {
                    return Err(LoaderError::invalid_catalog(
                        context,
                        format!("enum constraint for '{}' has no values", code),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::standard().clone()
    }
}

impl DomainRules {
    pub fn new(groups: Vec<RuleEntry>) -> Self {
        Self { groups }
    }

    /// Entry for a group code
    pub fn entry(&self, code: &str) -> Option<&RuleEntry> {
        self.groups.iter().find(|entry| entry.code == code)
    }

    /// Codes of all groups, in declaration order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|entry| entry.code.as_str())
    }

    /// Codes that must appear at least once
    pub fn required_codes(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .filter(|entry| entry.required)
            .map(|entry| entry.code.as_str())
    }
}

impl RuleEntry {
    /// New optional group accepting any item code
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            required: false,
            items: ItemVocabulary::Open,
            constraints: BTreeMap::new(),
            exclusive: Vec::new(),
            positional: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Restrict items to a fixed vocabulary
    pub fn fixed(mut self, codes: &[&str]) -> Self {
        self.items = ItemVocabulary::Fixed(codes.iter().map(|c| c.to_string()).collect());
        self
    }

    /// Take item codes from caller-supplied reference definitions
    pub fn negotiated(mut self) -> Self {
        self.items = ItemVocabulary::Negotiated;
        self
    }

    pub fn constraint(mut self, code: &str, constraint: ItemConstraint) -> Self {
        self.constraints.insert(code.to_string(), constraint);
        self
    }

    pub fn exclusive(mut self, codes: &[&str]) -> Self {
        self.exclusive.push(ExclusionGroup {
            codes: codes.iter().map(|c| c.to_string()).collect(),
        });
        self
    }

    pub fn positional(mut self, codes: &[&str]) -> Self {
        self.positional = codes.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Whether an item code is accepted by a fixed or open vocabulary
    pub fn allows_item(&self, code: &str) -> bool {
        match &self.items {
            ItemVocabulary::Open => !code.is_empty(),
            ItemVocabulary::Fixed(codes) => codes.iter().any(|c| c == code),
            ItemVocabulary::Negotiated => false,
        }
    }
}
