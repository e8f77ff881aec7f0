//! Cross-reference checks for negotiated groups
//!
//! A negotiated group has no static item vocabulary. Its items are matched
//! against reference definitions the caller carries over from an earlier
//! exchange, in both directions: every definition needs an item and every
//! item needs a definition.
//!
//! Copyright (c) 2025 Tagcheck Team
//! Licensed under the Apache-2.0 license

use crate::model::{ReferenceDefinition, ReferenceType, TagGroup, TagItem};
use crate::validation::error::{ReferenceMismatch, TagError};

/// Check a negotiated group against its reference definitions
///
/// Completeness errors (definitions with no matching item) come first, then
/// one entry per offending item in list order.
pub fn validate_cross_reference(
    group_index: usize,
    group: &TagGroup,
    reference_definitions: &[ReferenceDefinition],
) -> Vec<TagError> {
    let group_code = group.code();
    let mut errors: Vec<TagError> = reference_definitions
        .iter()
        .filter(|definition| !group.has_item(&definition.code))
        .map(|definition| TagError::CrossReferenceMissing {
            group_index,
            group: group_code.to_string(),
            code: definition.code.clone(),
        })
        .collect();

    for (item_index, item) in group.items().iter().enumerate() {
        let definition = reference_definitions
            .iter()
            .find(|definition| !item.code().is_empty() && definition.code == item.code());

        let error = match definition {
            None => Some(TagError::UnknownItemCode {
                group_index,
                item_index,
                code: item.code().to_string(),
                allowed: None,
            }),
            Some(definition) => check_item(definition, item).map(|mismatch| {
                TagError::CrossReferenceTypeMismatch {
                    group_index,
                    item_index,
                    group: group_code.to_string(),
                    code: item.code().to_string(),
                    mismatch,
                }
            }),
        };
        errors.extend(error);
    }

    tracing::trace!(
        group = group_code,
        definitions = reference_definitions.len(),
        errors = errors.len(),
        "Cross-reference check finished"
    );
    errors
}

fn check_item(definition: &ReferenceDefinition, item: &TagItem) -> Option<ReferenceMismatch> {
    match &definition.kind {
        ReferenceType::Enum => {
            (!definition.value.contains(&item.value)).then_some(ReferenceMismatch::NotInEnum)
        }
        ReferenceType::String => (!item.value.is_string()).then_some(ReferenceMismatch::NotString),
        ReferenceType::Other(declared) => Some(ReferenceMismatch::UnsupportedType(declared.clone())),
    }
}
