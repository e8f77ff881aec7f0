//! Property-based tests for tag-group validation
//!
//! These tests verify that the validators behave correctly
//! across a wide range of inputs.

use proptest::prelude::*;
use serde_json::{json, Value};
use tagcheck_core::{
    validate_cross_reference, Domain, DomainContext, ErrorKind, ReferenceDefinition,
    StructuralValidator, TagGroup, TagItem, TagValidator,
};

/// Strategy for generating random JSON values with controlled complexity
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9@. ]{0,30}".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        3,  // max depth
        10, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                proptest::collection::hash_map("[a-z_]{1,12}", inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

fn domain_strategy() -> impl Strategy<Value = Domain> {
    prop_oneof![
        Just(Domain::Payments),
        Just(Domain::Provider),
        Just(Domain::Items),
        Just(Domain::Offers),
    ]
}

/// Group codes known to some domain, plus a few nobody knows
fn group_code_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("BUYER_FINDER_FEES"),
        Just("SETTLEMENT_TERMS"),
        Just("CONTACT_INFO"),
        Just("LSP_INFO"),
        Just("ITEM_DETAILS"),
        Just("BRAND_DETAILS"),
        Just("VARIANT_FIELDS"),
        Just("QUALIFIER"),
        Just("BENEFIT"),
        Just("META"),
        Just("SOMETHING_ELSE"),
    ]
    .prop_map(String::from)
}

fn item_strategy() -> impl Strategy<Value = TagItem> {
    ("[A-Z_]{1,20}", json_value_strategy()).prop_map(|(code, value)| TagItem::new(code, value))
}

/// Strategy for generating tag-group-like JSON, well formed or not
fn tag_group_like_strategy() -> impl Strategy<Value = Value> {
    (
        group_code_strategy(),
        proptest::option::of(json_value_strategy()), // display
        proptest::option::of(proptest::collection::vec(item_strategy(), 0..6)),
    )
        .prop_map(|(code, display, list)| {
            let mut group = TagGroup::new(code, Vec::new());
            group.display = display;
            group.list = list;
            serde_json::to_value(group).unwrap()
        })
}

proptest! {
    #[test]
    fn test_arbitrary_json_never_panics(domain in domain_strategy(), tags in json_value_strategy()) {
        let outcome = StructuralValidator::new().validate_value(domain, &tags, &DomainContext::new());
        prop_assert_eq!(outcome.is_valid(), outcome.errors().is_empty());
    }

    #[test]
    fn test_validation_is_idempotent(
        domain in domain_strategy(),
        groups in proptest::collection::vec(tag_group_like_strategy(), 0..6),
    ) {
        let tags = Value::Array(groups);
        let validator = StructuralValidator::new();
        let context = DomainContext::new()
            .with_reference_terms(vec![ReferenceDefinition::string("DELAY_INTEREST")]);

        let first = validator.validate_value(domain, &tags, &context);
        let second = validator.validate_value(domain, &tags, &context);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_group_yields_one_error(
        code in "X_[A-Z]{1,10}",
        items in proptest::collection::vec(item_strategy(), 0..6),
        display in proptest::option::of(json_value_strategy()),
    ) {
        let mut group = TagGroup::new(code, items);
        group.display = display;
        let outcome = StructuralValidator::new().validate(Domain::Offers, &[group]);

        prop_assert_eq!(outcome.len(), 1);
        prop_assert_eq!(outcome.errors()[0].kind(), ErrorKind::UnknownGroupCode);
    }

    #[test]
    fn test_unknown_group_with_any_contents_yields_one_error(
        code in "X_[A-Z]{1,10}",
        list in json_value_strategy(),
        display in json_value_strategy(),
    ) {
        let tags = json!([{"descriptor": {"code": code}, "display": display, "list": list}]);
        let outcome = StructuralValidator::new().validate_value(Domain::Offers, &tags, &DomainContext::new());

        prop_assert_eq!(outcome.len(), 1);
        prop_assert_eq!(outcome.errors()[0].kind(), ErrorKind::UnknownGroupCode);
    }

    #[test]
    fn test_present_collection_is_never_reported_missing(
        groups in proptest::collection::vec(json_value_strategy(), 1..6),
    ) {
        let outcome = StructuralValidator::new().validate_value(
            Domain::Offers,
            &Value::Array(groups),
            &DomainContext::new(),
        );
        prop_assert_eq!(outcome.errors_of(ErrorKind::TagsMissing).count(), 0);
    }

    #[test]
    fn test_missing_required_group_is_named(drop_fees in any::<bool>()) {
        let (kept, dropped) = if drop_fees {
            ("SETTLEMENT_TERMS", "BUYER_FINDER_FEES")
        } else {
            ("BUYER_FINDER_FEES", "SETTLEMENT_TERMS")
        };
        let tags = vec![TagGroup::new(kept, Vec::new())];
        let outcome = StructuralValidator::new().validate(Domain::Payments, &tags);

        let missing: Vec<_> = outcome.errors_of(ErrorKind::MissingRequiredGroup).collect();
        prop_assert_eq!(missing.len(), 1);
        prop_assert!(missing[0].to_string().contains(dropped));
    }

    #[test]
    fn test_cross_reference_counts(
        terms in proptest::collection::btree_set("[A-D]", 0..4),
        items in proptest::collection::btree_set("[C-F]", 0..4),
    ) {
        let definitions: Vec<_> = terms.iter().map(ReferenceDefinition::string).collect();
        let group = TagGroup::new(
            "SETTLEMENT_TERMS",
            items.iter().map(|code| TagItem::new(code.as_str(), json!("x"))).collect(),
        );
        let errors = validate_cross_reference(0, &group, &definitions);

        let expected = terms.symmetric_difference(&items).count();
        prop_assert_eq!(errors.len(), expected);
    }
}
