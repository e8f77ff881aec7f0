//! Tagcheck Core - tag-group validation for commerce protocol payloads
//!
//! Commerce messages carry loosely structured "tags": named groups of
//! code/value items attached to payments, providers, items and offers. This
//! crate checks such collections against a declarative rule catalog and
//! reports every defect it finds in one pass:
//! - **Payments**: buyer-finder fees and negotiated settlement terms
//! - **Provider**: grievance-officer and logistics contact details
//! - **Items**: item details, customization, brand details and variant fields
//! - **Offers**: qualifiers, benefits and offer metadata
//!
//! ## Features
//!
//! - **Rule Catalog**: built-in rules, or load your own from YAML or JSON
//! - **Structural Validation**: group codes, item vocabularies, value formats,
//!   positional codes and mutual exclusion
//! - **Cross-Reference Validation**: negotiated terms matched in both directions
//! - **Structured Errors**: every defect has a kind, a location and a message
//!
//! ## Quick Start
//!
//! ```rust
//! use tagcheck_core::{Domain, DomainContext, StructuralValidator, TagValidator};
//! use serde_json::json;
//!
//! let validator = StructuralValidator::new();
//! let tags = json!([
//!     {
//!         "descriptor": {"code": "CONTACT_INFO"},
//!         "list": [{"descriptor": {"code": "GRO_EMAIL"}, "value": "not-an-email"}]
//!     }
//! ]);
//!
//! let outcome = validator.validate_value(Domain::Provider, &tags, &DomainContext::new());
//! assert!(!outcome.is_valid());
//! for message in outcome.messages() {
//!     println!("{}", message);
//! }
//! ```
//!
//! ## Negotiated Terms
//!
//! Settlement terms have no fixed vocabulary. The terms agreed earlier in a
//! transaction are passed in through [`DomainContext`]; each term must appear
//! in the group and each item in the group must match a term.
//!
//! Copyright (c) 2025 Tagcheck Team
//! Licensed under the Apache-2.0 license

pub mod catalog;
pub mod loader;
pub mod model;
pub mod validation;

// Re-export commonly used types for convenience
pub use catalog::{DomainRules, ExclusionGroup, ItemConstraint, ItemVocabulary, RuleCatalog, RuleEntry};
pub use loader::{LoaderError, LoaderResult, TagPayload};
pub use model::{Descriptor, Domain, ReferenceDefinition, ReferenceType, TagGroup, TagItem};
pub use validation::{
    validate_cross_reference, validate_item_tags, validate_offer_tags, validate_payment_tags,
    validate_provider_tags, validate_tags, DomainContext, ErrorKind, FormatPredicates,
    OutcomeReport, StandardFormats, StructuralValidator, TagError, TagValidator, ValidationOutcome,
};
