//! Catalog command handler

use super::utils::load_catalog;
use crate::cli::CatalogArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use tagcheck_core::Domain;
use tracing::instrument;

/// Handle the catalog command
#[instrument(skip(config, output), fields(domain = ?args.domain))]
pub fn handle_catalog(args: CatalogArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let catalog = load_catalog(args.catalog.as_deref(), config)?;
    let domain = args.domain.map(Domain::from);

    if let Some(domain) = domain {
        if catalog.domain(domain).is_none() {
            output.warning(&format!("Catalog v{} has no rules for {}", catalog.version, domain))?;
        }
    }

    output.catalog(&catalog, domain)
}
