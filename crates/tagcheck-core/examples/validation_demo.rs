//! Validation demonstration example
//!
//! Copyright (c) 2025 Tagcheck Team
//! Licensed under the Apache-2.0 license

use serde_json::json;
use tagcheck_core::{
    Domain, DomainContext, ReferenceDefinition, StructuralValidator, TagValidator,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Tagcheck Validation Demo ===\n");

    let validator = StructuralValidator::new();

    println!("--- Provider tags ---");
    let provider_tags = json!([{
        "descriptor": {"code": "CONTACT_INFO"},
        "list": [
            {"descriptor": {"code": "GRO_EMAIL"}, "value": "not-an-email"},
            {"descriptor": {"code": "GRO_CONTACT_NUMBER"}, "value": "9876543210"}
        ]
    }]);
    let outcome = validator.validate_value(Domain::Provider, &provider_tags, &DomainContext::new());
    println!("{}\n", outcome);

    println!("--- Payment tags with negotiated terms ---");
    let payment_tags = json!([
        {
            "descriptor": {"code": "BUYER_FINDER_FEES"},
            "list": [{"descriptor": {"code": "BUYER_FINDER_FEES_PERCENTAGE"}, "value": "3"}]
        },
        {
            "descriptor": {"code": "SETTLEMENT_TERMS"},
            "list": [{"descriptor": {"code": "SETTLEMENT_BASIS"}, "value": "delivery"}]
        }
    ]);
    let context = DomainContext::new().with_reference_terms(vec![
        ReferenceDefinition::enumeration("SETTLEMENT_BASIS", ["shipment", "delivery"]),
    ]);
    let outcome = validator.validate_value(Domain::Payments, &payment_tags, &context);
    println!("{}", serde_json::to_string_pretty(&outcome.to_report())?);

    Ok(())
}
