//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use std::borrow::Cow;
use std::path::Path;
use tagcheck_core::loader::payload::terms_from_path;
use tagcheck_core::{ReferenceDefinition, RuleCatalog, TagPayload};

/// Resolve the rule catalog for a command
///
/// An explicit `--catalog` wins over `catalog_path` from the config file;
/// with neither, the built-in catalog is used.
pub fn load_catalog(explicit: Option<&Path>, config: &Config) -> Result<Cow<'static, RuleCatalog>> {
    let Some(path) = explicit.or(config.catalog_path.as_deref()) else {
        tracing::debug!("Using built-in rule catalog");
        return Ok(Cow::Borrowed(RuleCatalog::standard()));
    };

    ensure_exists(path)?;
    let catalog = RuleCatalog::from_path(path)?;
    tracing::info!(path = %path.display(), version = %catalog.version, "Using rule catalog from file");
    Ok(Cow::Owned(catalog))
}

/// Read a tag payload file
pub fn load_payload(path: &Path) -> Result<TagPayload> {
    ensure_exists(path)?;
    Ok(TagPayload::from_path(path)?)
}

/// Read a reference-terms file
pub fn load_terms(path: &Path) -> Result<Vec<ReferenceDefinition>> {
    ensure_exists(path)?;
    Ok(terms_from_path(path)?)
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}
