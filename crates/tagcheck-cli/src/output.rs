//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable) with specialized
//! support for validation reports and rule catalogs.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};
use tagcheck_core::{
    Domain, DomainRules, ErrorKind, ItemConstraint, ItemVocabulary, RuleCatalog, RuleEntry,
    ValidationOutcome,
};
use tracing::trace;

/// Serializable result of validating one payload
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub file: String,
    pub domain: Domain,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorEntry>>,
}

/// One error line of a [`ValidationReport`]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEntry {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ValidationReport {
    /// Build a report; `detailed` adds kind and location to each error
    pub fn new(file: impl Into<String>, domain: Domain, outcome: &ValidationOutcome, detailed: bool) -> Self {
        let errors = if outcome.is_empty() {
            None
        } else {
            Some(
                outcome
                    .errors()
                    .iter()
                    .map(|error| ErrorEntry {
                        message: error.to_string(),
                        kind: detailed.then(|| error.kind()),
                        path: detailed.then(|| error.path()),
                    })
                    .collect(),
            )
        };

        Self {
            file: file.into(),
            domain,
            is_valid: outcome.is_valid(),
            errors,
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.as_ref().map_or(0, Vec::len)
    }
}

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a validation report
    fn format_report(&self, report: &ValidationReport) -> Result<String>;

    /// Format a rule catalog, optionally restricted to one domain
    fn format_catalog(&self, catalog: &RuleCatalog, domain: Option<Domain>) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_report(&self, report: &ValidationReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_report_human(report)),
            _ => self.format(report),
        }
    }

    fn format_catalog(&self, catalog: &RuleCatalog, domain: Option<Domain>) -> Result<String> {
        match (self, domain) {
            (OutputFormat::Human, _) => Ok(format_catalog_human(catalog, domain)),
            (_, Some(domain)) => {
                let rules = catalog.domain(domain).cloned().unwrap_or_default();
                self.format(&rules)
            }
            (_, None) => self.format(catalog),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a validation report
    ///
    /// Errors are always written; quiet mode only hides the success line.
    pub fn report(&mut self, report: &ValidationReport) -> Result<()> {
        if self.format == OutputFormat::Human {
            if report.is_valid {
                return self.success(&format!("✅ {} is valid ({})", report.file, report.domain));
            }
            let formatted = format_report_human(report);
            let formatted = if self.use_color {
                formatted.red().to_string()
            } else {
                formatted
            };
            return self.write(&formatted);
        }

        let formatted = self.format.format_report(report)?;
        self.emit(&formatted)
    }

    /// Write a rule catalog
    pub fn catalog(&mut self, catalog: &RuleCatalog, domain: Option<Domain>) -> Result<()> {
        let formatted = self.format.format_catalog(catalog, domain)?;
        self.emit(&formatted)
    }

    fn emit(&mut self, formatted: &str) -> Result<()> {
        trace!(bytes = formatted.len(), format = ?self.format, "Writing formatted output");
        if formatted.ends_with('\n') {
            self.write(formatted)
        } else {
            self.writeln(formatted)
        }
    }
}

/// Format a validation report for human reading
fn format_report_human(report: &ValidationReport) -> String {
    let mut output = String::new();

    if report.is_valid {
        output.push_str(&format!("✅ {} is valid ({})\n", report.file, report.domain));
        return output;
    }

    output.push_str(&format!(
        "❌ Validation Failed - {} Error(s) in {} ({})\n\n",
        report.error_count(),
        report.file,
        report.domain
    ));

    for (i, entry) in report.errors.iter().flatten().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, entry.message));
        if let Some(path) = &entry.path {
            output.push_str(&format!("   📍 Path: {}\n", path));
        }
        if let Some(kind) = &entry.kind {
            output.push_str(&format!("   🏷️  Kind: {}\n", kind_name(*kind)));
        }
    }

    output
}

fn kind_name(kind: ErrorKind) -> String {
    serde_json::to_value(kind)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("{:?}", kind))
}

/// Format the catalog for human reading
fn format_catalog_human(catalog: &RuleCatalog, domain: Option<Domain>) -> String {
    let mut output = format!("═══ Rule Catalog v{} ═══\n", catalog.version);

    let domains: Vec<Domain> = match domain {
        Some(domain) => vec![domain],
        None => catalog.domains.keys().copied().collect(),
    };

    for domain in domains {
        output.push_str(&format!("\n📋 {}\n", domain));
        match catalog.domain(domain) {
            Some(rules) => output.push_str(&format_domain_rules(rules)),
            None => output.push_str("  (no rules)\n"),
        }
    }

    output
}

fn format_domain_rules(rules: &DomainRules) -> String {
    let mut output = String::new();
    if rules.groups.is_empty() {
        output.push_str("  (no groups)\n");
    }
    for entry in &rules.groups {
        output.push_str(&format_rule_entry(entry));
    }
    output
}

fn format_rule_entry(entry: &RuleEntry) -> String {
    let mut output = format!(
        "  • {}{}\n",
        entry.code,
        if entry.required { " (required)" } else { "" }
    );

    match &entry.items {
        ItemVocabulary::Open => output.push_str("    items: any code\n"),
        ItemVocabulary::Negotiated => output.push_str("    items: negotiated terms\n"),
        ItemVocabulary::Fixed(codes) => {
            output.push_str("    items:\n");
            for code in codes {
                match entry.constraints.get(code) {
                    Some(constraint) => output.push_str(&format!(
                        "      - {} ({})\n",
                        code,
                        constraint_label(constraint)
                    )),
                    None => output.push_str(&format!("      - {}\n", code)),
                }
            }
        }
    }

    if !matches!(entry.items, ItemVocabulary::Fixed(_)) {
        for (code, constraint) in &entry.constraints {
            output.push_str(&format!("    {}: {}\n", code, constraint_label(constraint)));
        }
    }
    for exclusion in &entry.exclusive {
        output.push_str(&format!("    exactly one of: {}\n", exclusion.codes.join(", ")));
    }
    if !entry.positional.is_empty() {
        output.push_str(&format!("    positions: {}\n", entry.positional.join(", ")));
    }

    output
}

fn constraint_label(constraint: &ItemConstraint) -> String {
    match constraint {
        ItemConstraint::NonEmptyString => "non-empty".to_string(),
        ItemConstraint::Boolean => "boolean".to_string(),
        ItemConstraint::PositiveInteger => "positive integer".to_string(),
        ItemConstraint::Enum { values } => format!("one of {}", values.join("|")),
        ItemConstraint::Email => "email".to_string(),
        ItemConstraint::Phone => "phone".to_string(),
        ItemConstraint::Url => "url".to_string(),
    }
}

#[cfg(test)]
mod tests {
    include!("output/tests.rs");
}
