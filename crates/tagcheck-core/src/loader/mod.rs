//! Loading of rule catalogs and tag payloads from YAML or JSON
//!
//! ```rust
//! use tagcheck_core::RuleCatalog;
//!
//! let catalog = RuleCatalog::from_yaml_str(r#"
//! version: "2.1.0"
//! domains:
//!   offers:
//!     groups:
//!       - code: META
//!         items: { kind: fixed, codes: [ADDITIVE, AUTO] }
//! "#).unwrap();
//!
//! assert!(catalog.rules_for(tagcheck_core::Domain::Offers, "META").is_some());
//! ```
//!
//! Copyright (c) 2025 Tagcheck Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;
pub mod payload;

pub use error::{LoaderError, LoaderResult};
pub use parser::{DocumentParser, Format};
pub use payload::TagPayload;
