//! Validation context, format predicates and value checks
//!
//! Copyright (c) 2025 Tagcheck Team
//! Licensed under the Apache-2.0 license

use crate::catalog::ItemConstraint;
use crate::model::{tag_groups_from_value, Domain, ReferenceDefinition, TagGroup};
use crate::validation::error::{TagError, ValueExpectation};
use crate::validation::outcome::ValidationOutcome;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Per-call facts a domain's rules may need
///
/// Nothing here is remembered between calls; facts learned in one API call and
/// checked in another travel through this object.
#[derive(Debug, Clone, Default)]
pub struct DomainContext {
    /// Negotiated reference terms for cross-reference groups
    pub reference_terms: Option<Vec<ReferenceDefinition>>,
    /// Caller-chosen group codes replacing the catalog's group set
    pub group_vocabulary: Option<Vec<String>>,
}

impl DomainContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the negotiated reference terms
    pub fn with_reference_terms(mut self, terms: Vec<ReferenceDefinition>) -> Self {
        self.reference_terms = Some(terms);
        self
    }

    /// Restrict recognized groups to `codes`, all of them required
    pub fn with_group_vocabulary<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_vocabulary = Some(codes.into_iter().map(Into::into).collect());
        self
    }

    /// Reference terms, an absent list reading as empty
    pub fn terms(&self) -> &[ReferenceDefinition] {
        self.reference_terms.as_deref().unwrap_or(&[])
    }
}

/// Base trait for tag-group validators
pub trait TagValidator {
    /// Validate a collection with per-call domain facts
    fn validate_with_context(
        &self,
        domain: Domain,
        tags: Option<&[TagGroup]>,
        context: &DomainContext,
    ) -> ValidationOutcome;

    /// Validate a collection that needs no per-call facts
    fn validate(&self, domain: Domain, tags: &[TagGroup]) -> ValidationOutcome {
        self.validate_with_context(domain, Some(tags), &DomainContext::default())
    }

    /// Validate an undecoded collection
    ///
    /// `null` counts as absent and a non-array collection is reported as
    /// missing tags. Malformed groups and items inside an array are decoded
    /// one by one and reported where they sit.
    fn validate_value(&self, domain: Domain, tags: &Value, context: &DomainContext) -> ValidationOutcome {
        if tags.is_null() {
            return self.validate_with_context(domain, None, context);
        }
        match tag_groups_from_value(tags) {
            Ok(groups) => self.validate_with_context(domain, Some(&groups), context),
            Err(e) => {
                tracing::debug!(%domain, error = %e, "Tag collection is not decodable");
                ValidationOutcome::from(vec![TagError::TagsMissing { domain }])
            }
        }
    }
}

/// Pure format checks the engine delegates to
pub trait FormatPredicates {
    fn is_email(&self, value: &str) -> bool;
    fn is_phone(&self, value: &str) -> bool;
    fn is_url(&self, value: &str) -> bool;
}

/// Default predicates: simple e-mail shape, exactly ten digits, absolute http(s) URL
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormats;

impl FormatPredicates for StandardFormats {
    fn is_email(&self, value: &str) -> bool {
        EMAIL_REGEX
            .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
            .is_match(value)
    }

    fn is_phone(&self, value: &str) -> bool {
        PHONE_REGEX
            .get_or_init(|| Regex::new(r"^[0-9]{10}$").unwrap())
            .is_match(value.trim())
    }

    fn is_url(&self, value: &str) -> bool {
        match url::Url::parse(value) {
            Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some(),
            Err(_) => false,
        }
    }
}

/// Value checks behind each [`ItemConstraint`]
pub struct ValueChecks;

impl ValueChecks {
    /// Check `value` against `constraint`, returning what was expected on failure
    pub fn check<F: FormatPredicates + ?Sized>(
        constraint: &ItemConstraint,
        value: &Value,
        formats: &F,
    ) -> Result<(), ValueExpectation> {
        let ok = match constraint {
            ItemConstraint::NonEmptyString => Self::is_non_empty_string(value),
            ItemConstraint::Boolean => Self::is_boolean(value),
            ItemConstraint::PositiveInteger => Self::is_positive_integer(value),
            ItemConstraint::Enum { values } => Self::is_member(value, values),
            ItemConstraint::Email => value.as_str().is_some_and(|s| formats.is_email(s)),
            ItemConstraint::Phone => value.as_str().is_some_and(|s| formats.is_phone(s)),
            ItemConstraint::Url => value.as_str().is_some_and(|s| formats.is_url(s)),
        };

        if ok {
            Ok(())
        } else {
            Err(Self::expectation(constraint))
        }
    }

    pub fn expectation(constraint: &ItemConstraint) -> ValueExpectation {
        match constraint {
            ItemConstraint::NonEmptyString => ValueExpectation::NonEmptyString,
            ItemConstraint::Boolean => ValueExpectation::Boolean,
            ItemConstraint::PositiveInteger => ValueExpectation::PositiveInteger,
            ItemConstraint::Enum { values } => ValueExpectation::OneOf(values.clone()),
            ItemConstraint::Email => ValueExpectation::Email,
            ItemConstraint::Phone => ValueExpectation::Phone,
            ItemConstraint::Url => ValueExpectation::Url,
        }
    }

    pub fn is_non_empty_string(value: &Value) -> bool {
        value.as_str().is_some_and(|s| !s.trim().is_empty())
    }

    pub fn is_boolean(value: &Value) -> bool {
        match value {
            Value::Bool(_) => true,
            Value::String(s) => s == "true" || s == "false",
            _ => false,
        }
    }

    pub fn is_positive_integer(value: &Value) -> bool {
        match value {
            Value::Number(n) => n.as_u64().is_some_and(|n| n > 0),
            Value::String(s) => {
                !s.is_empty()
                    && s.bytes().all(|b| b.is_ascii_digit())
                    && s.bytes().any(|b| b != b'0')
            }
            _ => false,
        }
    }

    /// String membership; non-string values never match
    pub fn is_member(value: &Value, values: &[String]) -> bool {
        value.as_str().is_some_and(|s| values.iter().any(|v| v == s))
    }
}
