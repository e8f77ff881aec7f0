//! Structural validation of tag-group collections
//!
//! Copyright (c) 2025 Tagcheck Team
//! Licensed under the Apache-2.0 license

use crate::catalog::{ExclusionGroup, ItemVocabulary, RuleCatalog, RuleEntry};
use crate::model::{Domain, TagGroup};
use crate::validation::base::{
    DomainContext, FormatPredicates, StandardFormats, TagValidator, ValueChecks,
};
use crate::validation::cross_reference::validate_cross_reference;
use crate::validation::error::{ExclusionMode, TagError};
use crate::validation::outcome::{OutcomeBuilder, ValidationOutcome};
use serde_json::Value;
use std::collections::BTreeSet;

/// How a group code resolved for one call
enum Resolution<'r> {
    /// Recognized, with the catalog entry when one exists
    Known(Option<&'r RuleEntry>),
    Unknown,
}

/// Validator walking groups and items against a [`RuleCatalog`]
///
/// Holds no per-call state, so one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct StructuralValidator<'c, F = StandardFormats> {
    catalog: &'c RuleCatalog,
    formats: F,
}

impl StructuralValidator<'static, StandardFormats> {
    /// Validator over the built-in catalog
    pub fn new() -> Self {
        Self {
            catalog: RuleCatalog::standard(),
            formats: StandardFormats,
        }
    }
}

impl Default for StructuralValidator<'static, StandardFormats> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> StructuralValidator<'c, StandardFormats> {
    /// Validator over a caller-supplied catalog
    pub fn with_catalog(catalog: &'c RuleCatalog) -> Self {
        Self {
            catalog,
            formats: StandardFormats,
        }
    }
}

impl<'c, F: FormatPredicates> StructuralValidator<'c, F> {
    /// Swap the e-mail, phone and URL predicates
    pub fn with_formats<G: FormatPredicates>(self, formats: G) -> StructuralValidator<'c, G> {
        StructuralValidator {
            catalog: self.catalog,
            formats,
        }
    }

    pub fn catalog(&self) -> &'c RuleCatalog {
        self.catalog
    }

    fn resolve(&self, domain: Domain, code: &str, context: &DomainContext) -> Resolution<'c> {
        if code.is_empty() {
            return Resolution::Unknown;
        }
        let entry = self.catalog.rules_for(domain, code);
        match &context.group_vocabulary {
            Some(vocabulary) if vocabulary.iter().any(|c| c == code) => Resolution::Known(entry),
            Some(_) => Resolution::Unknown,
            None => match entry {
                Some(entry) => Resolution::Known(Some(entry)),
                None => Resolution::Unknown,
            },
        }
    }

    fn required_codes<'a>(&'a self, domain: Domain, context: &'a DomainContext) -> Vec<&'a str> {
        match &context.group_vocabulary {
            Some(vocabulary) => vocabulary.iter().map(String::as_str).collect(),
            None => self
                .catalog
                .domain(domain)
                .map(|rules| rules.required_codes().collect())
                .unwrap_or_default(),
        }
    }

    fn check_group(
        &self,
        group_index: usize,
        group: &TagGroup,
        entry: Option<&RuleEntry>,
        context: &DomainContext,
        builder: &mut OutcomeBuilder,
    ) {
        if let Some(display) = &group.display {
            if !display.is_boolean() {
                builder.push(TagError::InvalidFieldType {
                    group_index,
                    field: "display".to_string(),
                });
            }
        }

        if group.malformed_list.is_some() {
            builder.push(TagError::InvalidFieldType {
                group_index,
                field: "list".to_string(),
            });
            return;
        }

        let Some(items) = group.list.as_deref() else {
            builder.push(TagError::MissingItemList {
                group_index,
                code: group.code().to_string(),
            });
            return;
        };

        let Some(entry) = entry else {
            return;
        };

        for (item_index, item) in items.iter().enumerate() {
            if let Some(expected) = entry.positional.get(item_index) {
                if item.code() != expected {
                    builder.push(TagError::UnexpectedPositionalCode {
                        group_index,
                        item_index,
                        expected: expected.clone(),
                        found: item.code().to_string(),
                    });
                }
            }

            match &entry.items {
                ItemVocabulary::Negotiated => {}
                vocabulary if !entry.allows_item(item.code()) => {
                    let allowed = match vocabulary {
                        ItemVocabulary::Fixed(allowed) => Some(allowed.clone()),
                        _ => None,
                    };
                    builder.push(TagError::UnknownItemCode {
                        group_index,
                        item_index,
                        code: item.code().to_string(),
                        allowed,
                    });
                }
                ItemVocabulary::Fixed(_) | ItemVocabulary::Open => {
                    if let Some(constraint) = entry.constraints.get(item.code()) {
                        if let Err(expected) =
                            ValueChecks::check(constraint, &item.value, &self.formats)
                        {
                            builder.push(TagError::InvalidItemValue {
                                group_index,
                                item_index,
                                code: item.code().to_string(),
                                expected,
                            });
                        }
                    }
                }
            }
        }

        for exclusion in &entry.exclusive {
            if let Some(error) = check_exclusion(group_index, group, exclusion) {
                builder.push(error);
            }
        }

        if entry.items == ItemVocabulary::Negotiated {
            builder.push_cross_reference(validate_cross_reference(
                group_index,
                group,
                context.terms(),
            ));
        }
    }
}

impl<F: FormatPredicates> TagValidator for StructuralValidator<'_, F> {
    fn validate_with_context(
        &self,
        domain: Domain,
        tags: Option<&[TagGroup]>,
        context: &DomainContext,
    ) -> ValidationOutcome {
        let groups = tags.unwrap_or(&[]);
        let required = self.required_codes(domain, context);
        let mut builder = OutcomeBuilder::new();

        if groups.is_empty() {
            if !required.is_empty() {
                tracing::debug!(%domain, "Tag collection missing for a domain that requires it");
                builder.push(TagError::TagsMissing { domain });
            }
            return builder.finish();
        }

        for code in required {
            if !groups.iter().any(|group| group.code() == code) {
                builder.push(TagError::MissingRequiredGroup {
                    domain,
                    code: code.to_string(),
                });
            }
        }

        for (group_index, group) in groups.iter().enumerate() {
            match self.resolve(domain, group.code(), context) {
                Resolution::Unknown => {
                    tracing::trace!(%domain, group_index, code = group.code(), "Unknown group code");
                    builder.push(TagError::UnknownGroupCode {
                        group_index,
                        code: group.code().to_string(),
                    });
                }
                Resolution::Known(entry) => {
                    self.check_group(group_index, group, entry, context, &mut builder)
                }
            }
        }

        let outcome = builder.finish();
        tracing::debug!(
            %domain,
            groups = groups.len(),
            errors = outcome.len(),
            "Tag validation finished"
        );
        outcome
    }
}

fn check_exclusion(
    group_index: usize,
    group: &TagGroup,
    exclusion: &ExclusionGroup,
) -> Option<TagError> {
    let present: BTreeSet<&str> = group
        .items()
        .iter()
        .map(|item| item.code())
        .filter(|code| exclusion.codes.iter().any(|c| c == code))
        .collect();

    let mode = match present.len() {
        0 => ExclusionMode::Neither,
        1 => return None,
        _ => ExclusionMode::Both,
    };

    Some(TagError::MutualExclusionViolated {
        group_index,
        group: group.code().to_string(),
        codes: exclusion.codes.clone(),
        mode,
    })
}

/// Validate an undecoded collection against the built-in catalog
pub fn validate_value(domain: Domain, tags: &Value, context: &DomainContext) -> ValidationOutcome {
    StructuralValidator::new().validate_value(domain, tags, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DomainRules, ItemConstraint};
    use crate::model::{ReferenceDefinition, TagItem};
    use crate::validation::error::ErrorKind;
    use serde_json::json;

    struct AcceptAll;

    impl FormatPredicates for AcceptAll {
        fn is_email(&self, _: &str) -> bool {
            true
        }
        fn is_phone(&self, _: &str) -> bool {
            true
        }
        fn is_url(&self, _: &str) -> bool {
            true
        }
    }

    fn payment_tags() -> Vec<TagGroup> {
        vec![
            TagGroup::new(
                "BUYER_FINDER_FEES",
                vec![
                    TagItem::new("BUYER_FINDER_FEES_TYPE", "percent-annualized"),
                    TagItem::new("BUYER_FINDER_FEES_PERCENTAGE", "1"),
                ],
            ),
            TagGroup::new("SETTLEMENT_TERMS", vec![TagItem::new("DELAY_INTEREST", "2.5")]),
        ]
    }

    #[test]
    fn test_valid_payment_tags() {
        let context =
            DomainContext::new().with_reference_terms(vec![ReferenceDefinition::string("DELAY_INTEREST")]);
        let outcome =
            StructuralValidator::new().validate_with_context(Domain::Payments, Some(&payment_tags()), &context);
        assert!(outcome.is_valid(), "{}", outcome);
    }

    #[test]
    fn test_missing_tags_short_circuits() {
        let validator = StructuralValidator::new();
        let outcome = validator.validate_with_context(Domain::Payments, None, &DomainContext::new());
        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.errors()[0].to_string(), "payments.tags are empty or missing.");

        // provider has no required groups
        assert!(validator.validate(Domain::Provider, &[]).is_valid());
    }

    #[test]
    fn test_unknown_group_reports_once() {
        let tags = vec![TagGroup::new("NOT_A_GROUP", vec![TagItem::new("X", "y")]).with_display("no")];
        let outcome = StructuralValidator::new().validate(Domain::Offers, &tags);
        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.errors()[0].kind(), ErrorKind::UnknownGroupCode);
    }

    #[test]
    fn test_display_and_missing_list() {
        let tags = vec![TagGroup::new("META", vec![]).with_display("true").without_list()];
        let outcome = StructuralValidator::new().validate(Domain::Offers, &tags);
        let kinds: Vec<_> = outcome.errors().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![ErrorKind::InvalidFieldType, ErrorKind::MissingItemList]);
    }

    #[test]
    fn test_positional_codes() {
        let tags = vec![TagGroup::new(
            "VARIANT_FIELDS",
            vec![
                TagItem::new("items.price.value", "x"),
                TagItem::new("items.price.value", "y"),
            ],
        )];
        let outcome = StructuralValidator::new().validate(Domain::Items, &tags);
        assert_eq!(outcome.len(), 1);
        assert!(matches!(
            &outcome.errors()[0],
            TagError::UnexpectedPositionalCode { item_index: 0, expected, .. }
                if expected == "items.tags.ITEM_DETAILS.OCCASION"
        ));
    }

    #[test]
    fn test_injected_formats_are_used() {
        let tags = vec![TagGroup::new("CONTACT_INFO", vec![TagItem::new("GRO_EMAIL", "whatever")])];
        let strict = StructuralValidator::new();
        let lenient = StructuralValidator::new().with_formats(AcceptAll);
        assert!(!strict.validate(Domain::Provider, &tags).is_valid());
        assert!(lenient.validate(Domain::Provider, &tags).is_valid());
    }

    #[test]
    fn test_group_vocabulary_overrides_catalog() {
        let context = DomainContext::new().with_group_vocabulary(["SETTLEMENT_TERMS", "SETTLEMENT_DETAILS"]);
        let tags = vec![
            TagGroup::new("SETTLEMENT_DETAILS", vec![TagItem::new("ANY", "thing")]),
            TagGroup::new("BUYER_FINDER_FEES", vec![]),
        ];
        let outcome = StructuralValidator::new().validate_with_context(Domain::Payments, Some(&tags), &context);

        assert_eq!(
            outcome.errors(),
            &[
                TagError::MissingRequiredGroup {
                    domain: Domain::Payments,
                    code: "SETTLEMENT_TERMS".to_string(),
                },
                TagError::UnknownGroupCode {
                    group_index: 1,
                    code: "BUYER_FINDER_FEES".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_custom_catalog_open_vocabulary_with_constraint() {
        let catalog = RuleCatalog::new("test").with_domain(
            Domain::Offers,
            DomainRules::new(vec![RuleEntry::new("META")
                .constraint("AUTO", ItemConstraint::Boolean)]),
        );
        let tags = vec![TagGroup::new(
            "META",
            vec![TagItem::new("AUTO", "maybe"), TagItem::new("EXTRA", json!(1))],
        )];
        let outcome = StructuralValidator::with_catalog(&catalog).validate(Domain::Offers, &tags);
        assert_eq!(outcome.len(), 1);
        assert_eq!(
            outcome.errors()[0].to_string(),
            "AUTO in Tag[0], List item[0] must be a boolean"
        );
    }

    #[test]
    fn test_validate_value_rejects_non_collection() {
        let outcome = validate_value(Domain::Offers, &json!({"tags": []}), &DomainContext::new());
        assert_eq!(outcome.errors()[0].kind(), ErrorKind::TagsMissing);

        let outcome = validate_value(Domain::Offers, &Value::Null, &DomainContext::new());
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_malformed_unknown_group_reports_once() {
        let tags = json!([{"descriptor": {"code": "NOPE"}, "list": [1, "x"]}]);
        let outcome = validate_value(Domain::Offers, &tags, &DomainContext::new());

        assert_eq!(
            outcome.errors(),
            &[TagError::UnknownGroupCode {
                group_index: 0,
                code: "NOPE".to_string(),
            }]
        );
    }

    #[test]
    fn test_malformed_fragments_leave_siblings_checked() {
        let tags = json!([
            {"descriptor": {"code": "META"}, "list": [{"descriptor": {"code": "AUTO"}, "value": "maybe"}]},
            {"descriptor": {"code": 7}, "list": []},
            {"descriptor": {"code": "QUALIFIER"}, "list": {"a": 1}},
            {"descriptor": {"code": "BENEFIT"}, "list": [5, {"descriptor": {"code": "VALUE"}, "value": "10"}]},
            "stray",
        ]);
        let outcome = validate_value(Domain::Offers, &tags, &DomainContext::new());
        let found: Vec<_> = outcome.errors().iter().map(|e| (e.kind(), e.group_index())).collect();

        assert_eq!(
            found,
            vec![
                (ErrorKind::InvalidItemValue, Some(0)),
                (ErrorKind::UnknownGroupCode, Some(1)),
                (ErrorKind::InvalidFieldType, Some(2)),
                (ErrorKind::UnknownItemCode, Some(3)),
                (ErrorKind::UnknownGroupCode, Some(4)),
            ]
        );
        assert_eq!(
            outcome.errors()[2].to_string(),
            "Tag[2] has an invalid value for the 'list' property. It should be an array."
        );
        assert_eq!(outcome.errors()[3].item_index(), Some(0));
    }

    #[test]
    fn test_codeless_item_rejected_in_open_group() {
        let catalog = RuleCatalog::new("test")
            .with_domain(Domain::Offers, DomainRules::new(vec![RuleEntry::new("META")]));
        let tags = json!([{"descriptor": {"code": "META"}, "list": [true, {"descriptor": {"code": "ANY"}}]}]);
        let outcome =
            StructuralValidator::with_catalog(&catalog).validate_value(Domain::Offers, &tags, &DomainContext::new());

        assert_eq!(outcome.len(), 1);
        assert!(matches!(
            &outcome.errors()[0],
            TagError::UnknownItemCode { item_index: 0, allowed: None, .. }
        ));
    }

    #[test]
    fn test_codeless_group_is_never_recognized() {
        let context = DomainContext::new().with_group_vocabulary([""]);
        let tags = json!([{"list": []}]);
        let outcome = StructuralValidator::new().validate_value(Domain::Offers, &tags, &context);
        assert!(outcome
            .errors()
            .iter()
            .any(|e| matches!(e, TagError::UnknownGroupCode { group_index: 0, .. })));
    }
}
