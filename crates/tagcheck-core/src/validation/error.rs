//! Validation error records for tag groups
//!
//! Every defect the engine finds is one [`TagError`]. Its `Display` output is the
//! human-readable message; [`TagError::kind`] and [`TagError::path`] give the
//! structured form callers should dispatch on.
//!
//! Copyright (c) 2025 Tagcheck Team
//! Licensed under the Apache-2.0 license

use crate::model::Domain;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which way a mutual exclusion rule was broken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionMode {
    /// None of the member codes is present
    Neither,
    /// More than one member code is present
    Both,
}

/// What an item value was expected to be
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum ValueExpectation {
    NonEmptyString,
    Boolean,
    PositiveInteger,
    OneOf(Vec<String>),
    Email,
    Phone,
    Url,
}

impl fmt::Display for ValueExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueExpectation::NonEmptyString => write!(f, "a non-empty string"),
            ValueExpectation::Boolean => write!(f, "a boolean"),
            ValueExpectation::PositiveInteger => write!(f, "a positive integer"),
            ValueExpectation::OneOf(values) => write!(f, "one of [{}]", values.join(", ")),
            ValueExpectation::Email => write!(f, "a valid email address"),
            ValueExpectation::Phone => write!(f, "a valid 10-digit phone number"),
            ValueExpectation::Url => write!(f, "a valid URL"),
        }
    }
}

/// How a negotiated item failed its reference definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "declared", rename_all = "snake_case")]
pub enum ReferenceMismatch {
    /// Value is not among the definition's enum values
    NotInEnum,
    /// Definition requires a string value
    NotString,
    /// Definition declares a type the engine does not know
    UnsupportedType(String),
}

/// Discriminant of [`TagError`], for callers that dispatch on error class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    TagsMissing,
    MissingRequiredGroup,
    UnknownGroupCode,
    InvalidFieldType,
    MissingItemList,
    UnknownItemCode,
    InvalidItemValue,
    UnexpectedPositionalCode,
    MutualExclusionViolated,
    CrossReferenceMissing,
    CrossReferenceTypeMismatch,
}

/// One defect found in a tag-group collection
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TagError {
    #[error("{domain}.tags are empty or missing.")]
    TagsMissing { domain: Domain },

    #[error("Tag-group {code} is missing in {domain}")]
    MissingRequiredGroup { domain: Domain, code: String },

    #[error("Tag[{group_index}] has an invalid descriptor code: '{code}'")]
    UnknownGroupCode { group_index: usize, code: String },

    #[error("{}", field_type_message(*group_index, field))]
    InvalidFieldType { group_index: usize, field: String },

    #[error("Tag[{group_index}] ({code}) list object is missing")]
    MissingItemList { group_index: usize, code: String },

    #[error("{}", unknown_item_message(*group_index, *item_index, code, allowed.as_deref()))]
    UnknownItemCode {
        group_index: usize,
        item_index: usize,
        code: String,
        /// Allowed codes for fixed vocabularies; `None` for negotiated groups
        allowed: Option<Vec<String>>,
    },

    #[error("{code} in Tag[{group_index}], List item[{item_index}] must be {expected}")]
    InvalidItemValue {
        group_index: usize,
        item_index: usize,
        code: String,
        expected: ValueExpectation,
    },

    #[error("Tag[{group_index}], List item[{item_index}] descriptor code should be {expected}, found '{found}'")]
    UnexpectedPositionalCode {
        group_index: usize,
        item_index: usize,
        expected: String,
        found: String,
    },

    #[error("{}", exclusion_message(group, codes, *mode))]
    MutualExclusionViolated {
        group_index: usize,
        group: String,
        codes: Vec<String>,
        mode: ExclusionMode,
    },

    #[error("{group}_[{group_index}], Term code '{code}' is not present in tag.list")]
    CrossReferenceMissing {
        group_index: usize,
        group: String,
        code: String,
    },

    #[error("{}", mismatch_message(group, *group_index, *item_index, code, mismatch))]
    CrossReferenceTypeMismatch {
        group_index: usize,
        item_index: usize,
        group: String,
        code: String,
        mismatch: ReferenceMismatch,
    },
}

impl TagError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TagError::TagsMissing { .. } => ErrorKind::TagsMissing,
            TagError::MissingRequiredGroup { .. } => ErrorKind::MissingRequiredGroup,
            TagError::UnknownGroupCode { .. } => ErrorKind::UnknownGroupCode,
            TagError::InvalidFieldType { .. } => ErrorKind::InvalidFieldType,
            TagError::MissingItemList { .. } => ErrorKind::MissingItemList,
            TagError::UnknownItemCode { .. } => ErrorKind::UnknownItemCode,
            TagError::InvalidItemValue { .. } => ErrorKind::InvalidItemValue,
            TagError::UnexpectedPositionalCode { .. } => ErrorKind::UnexpectedPositionalCode,
            TagError::MutualExclusionViolated { .. } => ErrorKind::MutualExclusionViolated,
            TagError::CrossReferenceMissing { .. } => ErrorKind::CrossReferenceMissing,
            TagError::CrossReferenceTypeMismatch { .. } => ErrorKind::CrossReferenceTypeMismatch,
        }
    }

    /// Location of the offending fragment, e.g. `$.tags[1].list[0]`
    pub fn path(&self) -> String {
        match self {
            TagError::TagsMissing { .. } | TagError::MissingRequiredGroup { .. } => "$.tags".to_string(),
            TagError::UnknownGroupCode { group_index, .. } => {
                format!("$.tags[{}].descriptor.code", group_index)
            }
            TagError::InvalidFieldType { group_index, field } => {
                format!("$.tags[{}].{}", group_index, field)
            }
            TagError::MissingItemList { group_index, .. }
            | TagError::MutualExclusionViolated { group_index, .. }
            | TagError::CrossReferenceMissing { group_index, .. } => {
                format!("$.tags[{}].list", group_index)
            }
            TagError::UnknownItemCode { group_index, item_index, .. }
            | TagError::UnexpectedPositionalCode { group_index, item_index, .. } => {
                format!("$.tags[{}].list[{}].descriptor.code", group_index, item_index)
            }
            TagError::InvalidItemValue { group_index, item_index, .. }
            | TagError::CrossReferenceTypeMismatch { group_index, item_index, .. } => {
                format!("$.tags[{}].list[{}].value", group_index, item_index)
            }
        }
    }

    /// Index of the group this error belongs to, if it belongs to one
    pub fn group_index(&self) -> Option<usize> {
        match self {
            TagError::TagsMissing { .. } | TagError::MissingRequiredGroup { .. } => None,
            TagError::UnknownGroupCode { group_index, .. }
            | TagError::InvalidFieldType { group_index, .. }
            | TagError::MissingItemList { group_index, .. }
            | TagError::UnknownItemCode { group_index, .. }
            | TagError::InvalidItemValue { group_index, .. }
            | TagError::UnexpectedPositionalCode { group_index, .. }
            | TagError::MutualExclusionViolated { group_index, .. }
            | TagError::CrossReferenceMissing { group_index, .. }
            | TagError::CrossReferenceTypeMismatch { group_index, .. } => Some(*group_index),
        }
    }

    /// Index of the item this error belongs to, if it belongs to one
    pub fn item_index(&self) -> Option<usize> {
        match self {
            TagError::UnknownItemCode { item_index, .. }
            | TagError::InvalidItemValue { item_index, .. }
            | TagError::UnexpectedPositionalCode { item_index, .. }
            | TagError::CrossReferenceTypeMismatch { item_index, .. } => Some(*item_index),
            _ => None,
        }
    }
}

fn unknown_item_message(
    group_index: usize,
    item_index: usize,
    code: &str,
    allowed: Option<&[String]>,
) -> String {
    match allowed {
        Some(allowed) => format!(
            "Tag[{}], List item[{}] descriptor code is not valid: '{}', it should be from [{}]",
            group_index,
            item_index,
            code,
            allowed.join(", ")
        ),
        None => format!(
            "Tag[{}], List item[{}] has an invalid descriptor code: {}",
            group_index, item_index, code
        ),
    }
}

fn field_type_message(group_index: usize, field: &str) -> String {
    let expected = match field {
        "list" => "an array",
        _ => "a boolean",
    };
    format!(
        "Tag[{}] has an invalid value for the '{}' property. It should be {}.",
        group_index, field, expected
    )
}

fn exclusion_message(group: &str, codes: &[String], mode: ExclusionMode) -> String {
    let either = codes.join(" or ");
    match mode {
        ExclusionMode::Neither => format!(
            "either of {} should be present as part of {}",
            either, group
        ),
        ExclusionMode::Both => format!("either of {} should be present, not both.", either),
    }
}

fn mismatch_message(
    group: &str,
    group_index: usize,
    item_index: usize,
    code: &str,
    mismatch: &ReferenceMismatch,
) -> String {
    let prefix = format!("{}_[{}], List item[{}]", group, group_index, item_index);
    match mismatch {
        ReferenceMismatch::NotInEnum => format!("{} has an invalid value for {}", prefix, code),
        ReferenceMismatch::NotString => format!("{} type should be string", prefix),
        ReferenceMismatch::UnsupportedType(declared) if declared.is_empty() => {
            format!("{} has no declared type for {}", prefix, code)
        }
        ReferenceMismatch::UnsupportedType(declared) => {
            format!("{} has an invalid type '{}' for {}", prefix, declared, code)
        }
    }
}
