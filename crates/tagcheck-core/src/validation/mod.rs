//! Tag-group validation
//!
//! Validation runs in one pass over a collection. The [`StructuralValidator`]
//! checks groups and items against the [`RuleCatalog`](crate::catalog::RuleCatalog),
//! handing negotiated groups to [`validate_cross_reference`]; both feed an
//! [`OutcomeBuilder`] that yields a single [`ValidationOutcome`].
//!
//! Copyright (c) 2025 Tagcheck Team
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod cross_reference;
pub mod error;
pub mod outcome;
pub mod structural;

// Re-export commonly used types
pub use base::{DomainContext, FormatPredicates, StandardFormats, TagValidator, ValueChecks};
pub use cross_reference::validate_cross_reference;
pub use error::{ErrorKind, ExclusionMode, ReferenceMismatch, TagError, ValueExpectation};
pub use outcome::{OutcomeBuilder, OutcomeReport, ValidationOutcome};
pub use structural::{validate_value, StructuralValidator};

use crate::model::{Domain, ReferenceDefinition, TagGroup};

/// Validate a collection for any domain against the built-in catalog
///
/// # Examples
///
/// ```rust
/// use tagcheck_core::model::{Domain, TagGroup, TagItem};
/// use tagcheck_core::validation::{validate_tags, DomainContext};
///
/// let tags = vec![TagGroup::new("META", vec![TagItem::new("AUTO", "true")])];
/// let outcome = validate_tags(Domain::Offers, Some(&tags), &DomainContext::new());
///
/// assert!(outcome.is_valid());
/// ```
pub fn validate_tags(
    domain: Domain,
    tags: Option<&[TagGroup]>,
    context: &DomainContext,
) -> ValidationOutcome {
    StructuralValidator::new().validate_with_context(domain, tags, context)
}

/// Validate payment tags
///
/// `terms` are the settlement terms negotiated earlier in the flow.
/// `group_codes`, when given, replaces the catalog's payment groups and makes
/// every listed code required.
pub fn validate_payment_tags(
    tags: Option<&[TagGroup]>,
    terms: Option<Vec<ReferenceDefinition>>,
    group_codes: Option<Vec<String>>,
) -> ValidationOutcome {
    let context = DomainContext {
        reference_terms: terms,
        group_vocabulary: group_codes,
    };
    validate_tags(Domain::Payments, tags, &context)
}

/// Validate provider tags
pub fn validate_provider_tags(tags: Option<&[TagGroup]>) -> ValidationOutcome {
    validate_tags(Domain::Provider, tags, &DomainContext::default())
}

/// Validate item tags
pub fn validate_item_tags(tags: Option<&[TagGroup]>) -> ValidationOutcome {
    validate_tags(Domain::Items, tags, &DomainContext::default())
}

/// Validate offer tags
///
/// # Examples
///
/// ```rust
/// use tagcheck_core::model::{TagGroup, TagItem};
/// use tagcheck_core::validation::validate_offer_tags;
///
/// let tags = vec![TagGroup::new("QUALIFIER", vec![TagItem::new("UNKNOWN_CODE", "1")])];
/// let outcome = validate_offer_tags(Some(&tags));
///
/// assert!(!outcome.is_valid());
/// assert!(outcome.messages()[0].contains("should be from [ITEM_COUNT, MIN_VALUE]"));
/// ```
pub fn validate_offer_tags(tags: Option<&[TagGroup]>) -> ValidationOutcome {
    validate_tags(Domain::Offers, tags, &DomainContext::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TagItem;

    #[test]
    fn test_payment_convenience_passes_terms() {
        let tags = vec![
            TagGroup::new(
                "BUYER_FINDER_FEES",
                vec![TagItem::new("BUYER_FINDER_FEES_VALUE", "10")],
            ),
            TagGroup::new("SETTLEMENT_TERMS", vec![TagItem::new("SETTLEMENT_BASIS", "delivery")]),
        ];
        let terms = vec![ReferenceDefinition::enumeration(
            "SETTLEMENT_BASIS",
            ["shipment", "delivery"],
        )];

        assert!(validate_payment_tags(Some(&tags), Some(terms), None).is_valid());

        let outcome = validate_payment_tags(Some(&tags), None, None);
        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.errors()[0].kind(), ErrorKind::UnknownItemCode);
    }

    #[test]
    fn test_domain_convenience_functions() {
        assert!(validate_provider_tags(None).is_valid());
        assert!(validate_item_tags(Some(&[])).is_valid());

        let tags = vec![TagGroup::new("BRAND_DETAILS", vec![TagItem::new("BRAND_PHONE", "12345")])];
        let outcome = validate_item_tags(Some(&tags));
        assert_eq!(
            outcome.messages(),
            vec!["BRAND_PHONE in Tag[0], List item[0] must be a valid 10-digit phone number"]
        );
    }
}
