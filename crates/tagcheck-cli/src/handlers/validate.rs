//! Validation command handler

use super::utils::{load_catalog, load_payload, load_terms};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::log_with_request_id;
use crate::logging::timing::Timer;
use crate::output::{OutputWriter, ValidationReport};
use tagcheck_core::{Domain, DomainContext, StructuralValidator, TagValidator};
use tracing::{debug, instrument};

/// Handle the validate command
#[instrument(skip(config, output), fields(file = %args.file.display(), domain = ?args.domain))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("file: {}", args.file.display()));
    let domain = Domain::from(args.domain);
    output.info(&format!("Validating {} tags in {}", domain, args.file.display()))?;

    if let Some(code) = args.group_codes.iter().find(|code| code.trim().is_empty()) {
        return Err(Error::invalid_args(format!(
            "--group-code must not be empty (got '{}')",
            code
        )));
    }

    let catalog = load_catalog(args.catalog.as_deref(), config)?;
    let payload = load_payload(&args.file)?;
    debug!(
        groups = payload.tags.as_ref().map_or(0, Vec::len),
        embedded_terms = payload.terms.is_some(),
        "Payload decoded"
    );

    let terms = match &args.terms {
        Some(path) => Some(load_terms(path)?),
        None => payload.terms,
    };

    let mut context = DomainContext::new();
    if let Some(terms) = terms {
        context = context.with_reference_terms(terms);
    }
    if !args.group_codes.is_empty() {
        context = context.with_group_vocabulary(args.group_codes.iter().cloned());
    }

    let validation_timer = Timer::new("tag_validation");
    let outcome = StructuralValidator::with_catalog(&catalog).validate_with_context(
        domain,
        payload.tags.as_deref(),
        &context,
    );
    debug!(
        elapsed_us = validation_timer.elapsed().as_micros() as u64,
        errors = outcome.len(),
        "Validation finished"
    );
    drop(validation_timer);

    let report = ValidationReport::new(args.file.display().to_string(), domain, &outcome, args.detailed);
    output.report(&report)?;

    if outcome.is_valid() {
        log_with_request_id!(info, %domain, "Tags are valid");
        Ok(())
    } else {
        log_with_request_id!(warn, %domain, errors = outcome.len(), "Tags failed validation");
        Err(Error::ValidationFailed { count: outcome.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{DomainArg, OutputFormat};
    use std::path::PathBuf;

    fn args(file: PathBuf, domain: DomainArg) -> ValidateArgs {
        ValidateArgs {
            file,
            domain,
            terms: None,
            group_codes: Vec::new(),
            catalog: None,
            detailed: false,
        }
    }

    fn quiet_output() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Json, false, true, Box::new(std::io::sink()))
    }

    #[test]
    fn test_valid_offer_payload() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("offer.yaml");
        std::fs::write(
            &file,
            "- descriptor: {code: META}\n  list:\n    - descriptor: {code: AUTO}\n      value: \"true\"\n",
        )
        .unwrap();

        let result = handle_validate(args(file, DomainArg::Offers), &Config::default(), &mut quiet_output());
        assert!(result.is_ok());
    }

    #[test]
    fn test_terms_file_overrides_embedded_terms() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("payment.json");
        std::fs::write(
            &file,
            r#"{
                "tags": [
                    {"descriptor": {"code": "BUYER_FINDER_FEES"},
                     "list": [{"descriptor": {"code": "BUYER_FINDER_FEES_VALUE"}, "value": "5"}]},
                    {"descriptor": {"code": "SETTLEMENT_TERMS"},
                     "list": [{"descriptor": {"code": "SETTLEMENT_BASIS"}, "value": "delivery"}]}
                ],
                "terms": [{"code": "SETTLEMENT_BASIS", "type": "enum", "value": ["shipment"]}]
            }"#,
        )
        .unwrap();

        let result = handle_validate(args(file.clone(), DomainArg::Payments), &Config::default(), &mut quiet_output());
        assert!(matches!(result, Err(Error::ValidationFailed { count: 1 })));

        let terms = dir.path().join("terms.yaml");
        std::fs::write(&terms, "- code: SETTLEMENT_BASIS\n  type: enum\n  value: [shipment, delivery]\n").unwrap();
        let mut with_terms = args(file, DomainArg::Payments);
        with_terms.terms = Some(terms);
        assert!(handle_validate(with_terms, &Config::default(), &mut quiet_output()).is_ok());
    }

    #[test]
    fn test_malformed_group_is_a_validation_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("offer.json");
        std::fs::write(
            &file,
            r#"[{"descriptor": {"code": "QUALIFIER"}, "list": {"a": 1}}, {"descriptor": {"code": 7}}]"#,
        )
        .unwrap();

        let result = handle_validate(args(file, DomainArg::Offers), &Config::default(), &mut quiet_output());
        assert!(matches!(result, Err(Error::ValidationFailed { count: 2 })));
    }

    #[test]
    fn test_missing_file() {
        let result = handle_validate(
            args(PathBuf::from("/nonexistent/tags.json"), DomainArg::Items),
            &Config::default(),
            &mut quiet_output(),
        );
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_empty_group_code_rejected() {
        let mut bad = args(PathBuf::from("tags.json"), DomainArg::Payments);
        bad.group_codes = vec![" ".to_string()];
        let result = handle_validate(bad, &Config::default(), &mut quiet_output());
        assert!(matches!(result, Err(Error::InvalidArgs(_))));
    }
}
