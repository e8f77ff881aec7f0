//! Tag payload decoding
//!
//! A payload is either a bare array of tag groups or an object carrying
//! `tags` and, optionally, the negotiated `terms` for cross-reference checks.
//!
//! Copyright (c) 2025 Tagcheck Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::parser::DocumentParser;
use crate::model::{ReferenceDefinition, TagGroup};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Decoded input for one validation call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagPayload {
    /// `None` when the payload has no tag collection at all
    pub tags: Option<Vec<TagGroup>>,
    pub terms: Option<Vec<ReferenceDefinition>>,
}

impl TagPayload {
    /// Decode a payload from a JSON value
    pub fn from_value(value: &Value) -> LoaderResult<Self> {
        match value {
            Value::Array(_) => Ok(Self {
                tags: Some(decode_groups(value)?),
                terms: None,
            }),
            Value::Object(map) => {
                let tags = match map.get("tags") {
                    None | Some(Value::Null) => None,
                    Some(tags) => Some(decode_groups(tags)?),
                };
                let terms = match map.get("terms") {
                    None | Some(Value::Null) => None,
                    Some(terms) => Some(decode_terms(terms)?),
                };
                Ok(Self { tags, terms })
            }
            Value::Null => Ok(Self::default()),
            other => Err(LoaderError::invalid_payload(format!(
                "expected an array of tag groups or an object with 'tags', found {}",
                json_type_name(other)
            ))),
        }
    }

    /// Read and decode a payload file (.json, .yaml or .yml)
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        let value = DocumentParser::new().parse_file(path)?;
        Self::from_value(&value)
    }
}

/// Decode a reference-definition list from a JSON value
pub fn decode_terms(value: &Value) -> LoaderResult<Vec<ReferenceDefinition>> {
    Vec::<ReferenceDefinition>::deserialize(value)
        .map_err(|e| LoaderError::invalid_payload(format!("terms: {}", e)))
}

/// Read a reference-definition file (.json, .yaml or .yml)
pub fn terms_from_path(path: &Path) -> LoaderResult<Vec<ReferenceDefinition>> {
    let value = DocumentParser::new().parse_file(path)?;
    decode_terms(&value)
}

fn decode_groups(value: &Value) -> LoaderResult<Vec<TagGroup>> {
    Vec::<TagGroup>::deserialize(value)
        .map_err(|e| LoaderError::invalid_payload(format!("tags: {}", e)))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
