//! Document parsing for YAML and JSON formats
//!
//! Copyright (c) 2025 Tagcheck Team
//! Licensed under the Apache-2.0 license

use crate::catalog::RuleCatalog;
use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::Value;
use std::path::{Path, PathBuf};

const INLINE_SOURCE: &str = "<inline>";

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
            match extension.to_lowercase().as_str() {
                "yaml" | "yml" => Ok(Format::Yaml),
                "json" => Ok(Format::Json),
                _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
            }
        } else {
            Err(LoaderError::unsupported_format(path.to_path_buf()))
        }
    }
}

/// Parser turning YAML or JSON documents into JSON values
#[derive(Debug, Default)]
pub struct DocumentParser;

impl DocumentParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a file, detecting format from extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        self.parse_content(&content, format, path)
    }

    /// Parse content with explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        serde_json::to_value(yaml_value)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }
}

impl RuleCatalog {
    /// Load and check a catalog file (.yaml, .yml or .json)
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        let catalog: RuleCatalog = match format {
            Format::Yaml => serde_yaml::from_str(&content)
                .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?,
            Format::Json => serde_json::from_str(&content)
                .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))?,
        };

        catalog.check()?;
        tracing::debug!(path = %path.display(), version = %catalog.version, "Loaded rule catalog");
        Ok(catalog)
    }

    /// Parse and check a YAML catalog
    pub fn from_yaml_str(content: &str) -> LoaderResult<Self> {
        let catalog: RuleCatalog = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(PathBuf::from(INLINE_SOURCE), e))?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Parse and check a JSON catalog
    pub fn from_json_str(content: &str) -> LoaderResult<Self> {
        let catalog: RuleCatalog = serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(PathBuf::from(INLINE_SOURCE), e))?;
        catalog.check()?;
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ItemConstraint, ItemVocabulary};
    use crate::model::Domain;
    use std::io::Write;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("rules.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("rules.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("rules.json")).unwrap(), Format::Json);
        assert!(Format::from_path(Path::new("rules.toml")).is_err());
        assert!(Format::from_path(Path::new("rules")).is_err());
    }

    #[test]
    fn test_parse_yaml_document() {
        let parser = DocumentParser::new();
        let value = parser
            .parse_yaml("- descriptor: {code: META}\n  list: []\n", Path::new("tags.yaml"))
            .unwrap();
        assert_eq!(value[0]["descriptor"]["code"], "META");
    }

    #[test]
    fn test_parse_invalid_json_reports_path() {
        let parser = DocumentParser::new();
        let err = parser.parse_json("{ not json", Path::new("broken.json")).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_catalog_from_yaml_str() {
        let catalog = RuleCatalog::from_yaml_str(
            r#"
version: "9.9"
domains:
  payments:
    groups:
      - code: SETTLEMENT_TERMS
        required: true
        items: { kind: negotiated }
  offers:
    groups:
      - code: QUALIFIER
        items: { kind: fixed, codes: [ITEM_COUNT] }
        constraints:
          ITEM_COUNT: { type: positive_integer }
"#,
        )
        .unwrap();

        assert_eq!(catalog.version, "9.9");
        let terms = catalog.rules_for(Domain::Payments, "SETTLEMENT_TERMS").unwrap();
        assert!(terms.required);
        assert_eq!(terms.items, ItemVocabulary::Negotiated);

        let qualifier = catalog.rules_for(Domain::Offers, "QUALIFIER").unwrap();
        assert_eq!(
            qualifier.constraints.get("ITEM_COUNT"),
            Some(&ItemConstraint::PositiveInteger)
        );
    }

    #[test]
    fn test_catalog_from_str_runs_consistency_check() {
        let result = RuleCatalog::from_json_str(
            r#"{"version": "1", "domains": {"offers": {"groups": [
                {"code": "META", "items": {"kind": "fixed", "codes": []}}
            ]}}}"#,
        );
        assert!(matches!(result, Err(LoaderError::InvalidCatalog { .. })));
    }

    #[test]
    fn test_standard_catalog_round_trips_through_file() {
        let yaml = serde_yaml::to_string(RuleCatalog::standard()).unwrap();
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let loaded = RuleCatalog::from_path(file.path()).unwrap();
        assert_eq!(&loaded, RuleCatalog::standard());
    }

    #[test]
    fn test_catalog_from_missing_file() {
        let err = RuleCatalog::from_path(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, LoaderError::IoError { .. }));
    }
}
