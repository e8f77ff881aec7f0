//! Built-in rule tables
//!
//! Edit in lock-step with the protocol contract version below.

use super::{DomainRules, ItemConstraint, RuleCatalog, RuleEntry};
use crate::model::Domain;

pub(super) const STANDARD_VERSION: &str = "2.0.0";

pub(super) fn build() -> RuleCatalog {
    RuleCatalog::new(STANDARD_VERSION)
        .with_domain(Domain::Payments, payments())
        .with_domain(Domain::Provider, provider())
        .with_domain(Domain::Items, items())
        .with_domain(Domain::Offers, offers())
}

fn payments() -> DomainRules {
    DomainRules::new(vec![
        RuleEntry::new("BUYER_FINDER_FEES")
            .required()
            .exclusive(&["BUYER_FINDER_FEES_PERCENTAGE", "BUYER_FINDER_FEES_VALUE"]),
        RuleEntry::new("SETTLEMENT_TERMS").required().negotiated(),
    ])
}

fn provider() -> DomainRules {
    use ItemConstraint::{Email, NonEmptyString, Phone, Url};

    DomainRules::new(vec![
        RuleEntry::new("CONTACT_INFO")
            .fixed(&[
                "GRO_NAME",
                "GRO_EMAIL",
                "GRO_CONTACT_NUMBER",
                "CUSTOMER_SUPPORT_LINK",
                "CUSTOMER_SUPPORT_EMAIL",
                "CUSTOMER_SUPPORT_CONTACT_NUMBER",
            ])
            .constraint("GRO_NAME", NonEmptyString)
            .constraint("GRO_EMAIL", Email)
            .constraint("GRO_CONTACT_NUMBER", Phone)
            .constraint("CUSTOMER_SUPPORT_LINK", Url)
            .constraint("CUSTOMER_SUPPORT_EMAIL", Email)
            .constraint("CUSTOMER_SUPPORT_CONTACT_NUMBER", Phone),
        RuleEntry::new("LSP_INFO")
            .fixed(&["LSP_NAME", "LSP_EMAIL", "LSP_CONTACT_NUMBER", "LSP_ADDRESS"])
            .constraint("LSP_NAME", NonEmptyString)
            .constraint("LSP_EMAIL", Email)
            .constraint("LSP_CONTACT_NUMBER", Phone)
            .constraint("LSP_ADDRESS", NonEmptyString),
    ])
}

fn items() -> DomainRules {
    use ItemConstraint::{Boolean, Email, NonEmptyString, Phone, Url};

    DomainRules::new(vec![
        RuleEntry::new("ITEM_DETAILS").fixed(&[
            "USABILITY",
            "EXPIRY_PERIOD",
            "TERMS_CONDITION",
            "REDEMPTION_INSTRUCTION",
            "OCCASION",
        ]),
        RuleEntry::new("CUSTOMIZATION")
            .fixed(&["ENABLED", "RECEIVER_NAME", "MESSAGE", "PREVIEW_IMAGE"])
            .constraint("ENABLED", Boolean)
            .constraint("PREVIEW_IMAGE", Url),
        RuleEntry::new("BRAND_DETAILS")
            .fixed(&["BRAND_NAME", "BRAND_PHONE", "BRAND_EMAIL"])
            .constraint("BRAND_NAME", NonEmptyString)
            .constraint("BRAND_PHONE", Phone)
            .constraint("BRAND_EMAIL", Email),
        RuleEntry::new("VARIANT_FIELDS")
            .positional(&["items.tags.ITEM_DETAILS.OCCASION", "items.price.value"]),
    ])
}

fn offers() -> DomainRules {
    use ItemConstraint::{Boolean, PositiveInteger};

    DomainRules::new(vec![
        RuleEntry::new("QUALIFIER")
            .fixed(&["ITEM_COUNT", "MIN_VALUE"])
            .constraint("ITEM_COUNT", PositiveInteger),
        RuleEntry::new("BENEFIT")
            .fixed(&["VALUE", "VALUE_TYPE", "ITEM_ID", "ITEM_COUNT"])
            .constraint("ITEM_COUNT", PositiveInteger),
        RuleEntry::new("META")
            .fixed(&["ADDITIVE", "AUTO"])
            .constraint("ADDITIVE", Boolean)
            .constraint("AUTO", Boolean),
    ])
}
