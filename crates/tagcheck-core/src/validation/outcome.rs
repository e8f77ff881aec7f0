//! Validation outcome and the aggregator that builds it
//!
//! Copyright (c) 2025 Tagcheck Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::{ErrorKind, TagError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one validation call
///
/// `is_valid` is the only pass/fail signal; error messages are for people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    is_valid: bool,
    errors: Vec<TagError>,
}

/// Boundary form of an outcome: messages only, `errors` absent when valid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeReport {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ValidationOutcome {
    /// Outcome with no errors
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Structured errors in report order
    pub fn errors(&self) -> &[TagError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human-readable messages in report order
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Errors of one kind
    pub fn errors_of(&self, kind: ErrorKind) -> impl Iterator<Item = &TagError> {
        self.errors.iter().filter(move |e| e.kind() == kind)
    }

    /// Collapse to the boundary form used by API-flow error maps
    pub fn to_report(&self) -> OutcomeReport {
        OutcomeReport {
            is_valid: self.is_valid,
            errors: if self.errors.is_empty() {
                None
            } else {
                Some(self.messages())
            },
        }
    }

    pub fn into_errors(self) -> Vec<TagError> {
        self.errors
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            return write!(f, "valid");
        }
        write!(f, "{} validation error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

/// Collects errors from both validators into one outcome
///
/// Structural errors keep traversal order; cross-reference errors follow them.
#[derive(Debug, Default)]
pub struct OutcomeBuilder {
    structural: Vec<TagError>,
    cross_reference: Vec<TagError>,
}

impl OutcomeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: TagError) {
        self.structural.push(error);
    }

    pub fn extend<I: IntoIterator<Item = TagError>>(&mut self, errors: I) {
        self.structural.extend(errors);
    }

    pub fn push_cross_reference<I: IntoIterator<Item = TagError>>(&mut self, errors: I) {
        self.cross_reference.extend(errors);
    }

    pub fn finish(self) -> ValidationOutcome {
        let mut errors = self.structural;
        errors.extend(self.cross_reference);
        ValidationOutcome {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

impl From<Vec<TagError>> for ValidationOutcome {
    fn from(errors: Vec<TagError>) -> Self {
        let mut builder = OutcomeBuilder::new();
        builder.extend(errors);
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Domain;

    fn missing(code: &str) -> TagError {
        TagError::MissingRequiredGroup {
            domain: Domain::Payments,
            code: code.to_string(),
        }
    }

    fn term_missing(code: &str) -> TagError {
        TagError::CrossReferenceMissing {
            group_index: 0,
            group: "SETTLEMENT_TERMS".to_string(),
            code: code.to_string(),
        }
    }

    #[test]
    fn test_empty_builder_is_valid() {
        let outcome = OutcomeBuilder::new().finish();
        assert!(outcome.is_valid());
        assert_eq!(outcome.to_report().errors, None);
        assert_eq!(outcome, ValidationOutcome::valid());
    }

    #[test]
    fn test_cross_reference_errors_follow_structural() {
        let mut builder = OutcomeBuilder::new();
        builder.push_cross_reference(vec![term_missing("A")]);
        builder.push(missing("BUYER_FINDER_FEES"));

        let outcome = builder.finish();
        assert!(!outcome.is_valid());
        assert_eq!(outcome.errors()[0].kind(), ErrorKind::MissingRequiredGroup);
        assert_eq!(outcome.errors()[1].kind(), ErrorKind::CrossReferenceMissing);
    }

    #[test]
    fn test_report_serialization() {
        let outcome = ValidationOutcome::from(vec![missing("SETTLEMENT_TERMS")]);
        let json = serde_json::to_value(outcome.to_report()).unwrap();
        assert_eq!(json["is_valid"], false);
        assert_eq!(json["errors"][0], "Tag-group SETTLEMENT_TERMS is missing in payments");

        let json = serde_json::to_value(ValidationOutcome::valid().to_report()).unwrap();
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_display_lists_errors() {
        let outcome = ValidationOutcome::from(vec![missing("A"), missing("B")]);
        let text = outcome.to_string();
        assert!(text.starts_with("2 validation error(s):"));
        assert!(text.contains("\n2. Tag-group B is missing in payments"));
    }
}
