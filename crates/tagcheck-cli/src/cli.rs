//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use tagcheck_core::Domain;

/// Tagcheck CLI - Rule-driven validation of protocol tag groups
///
/// Checks the tag groups attached to payments, providers, items and offers
/// against a rule catalog and reports every defect in one pass.
#[derive(Parser, Debug)]
#[command(
    name = "tagcheck",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "TAGCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a tag payload against the rule catalog
    Validate(ValidateArgs),

    /// Print the effective rule catalog
    Catalog(CatalogArgs),

    /// Manage configuration files
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the tag payload (JSON or YAML)
    #[arg(value_name = "TAGS_FILE")]
    pub file: PathBuf,

    /// Domain the tags belong to
    #[arg(short, long, value_enum)]
    pub domain: DomainArg,

    /// Negotiated reference terms (JSON or YAML); overrides terms in the payload
    #[arg(short, long, value_name = "TERMS_FILE")]
    pub terms: Option<PathBuf>,

    /// Expected group code; repeat to build the full list. Replaces the
    /// catalog's groups for the domain and makes each code required
    #[arg(short = 'g', long = "group-code", value_name = "CODE")]
    pub group_codes: Vec<String>,

    /// Rule catalog to validate against instead of the built-in one
    #[arg(long, value_name = "CATALOG_FILE")]
    pub catalog: Option<PathBuf>,

    /// Show error kind and location for each error
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for the catalog command
#[derive(Parser, Debug)]
pub struct CatalogArgs {
    /// Only show rules for this domain
    #[arg(short, long, value_enum)]
    pub domain: Option<DomainArg>,

    /// Rule catalog file to show instead of the effective one
    #[arg(long, value_name = "CATALOG_FILE")]
    pub catalog: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default configuration file (.tagcheck.yaml)
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show(ConfigShowArgs),

    /// Print the configuration file in use, if any
    Path,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (defaults to ./.tagcheck.yaml)
    #[arg(long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Force overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Tag domains accepted on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DomainArg {
    Payments,
    Provider,
    Items,
    Offers,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl From<DomainArg> for Domain {
    fn from(domain: DomainArg) -> Self {
        match domain {
            DomainArg::Payments => Domain::Payments,
            DomainArg::Provider => Domain::Provider,
            DomainArg::Items => Domain::Items,
            DomainArg::Offers => Domain::Offers,
        }
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify that the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            config: None,
            output: None,
            no_color: false,
            command: Commands::Catalog(CatalogArgs {
                domain: None,
                catalog: None,
            }),
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli {
            verbose: 2,
            quiet: true,
            ..cli
        };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_validate_args() {
        let cli = Cli::parse_from([
            "tagcheck",
            "validate",
            "payment.json",
            "--domain",
            "payments",
            "--terms",
            "terms.yaml",
            "-g",
            "BUYER_FINDER_FEES",
            "--group-code",
            "SETTLEMENT_TERMS",
        ]);

        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(Domain::from(args.domain), Domain::Payments);
                assert_eq!(args.terms, Some(PathBuf::from("terms.yaml")));
                assert_eq!(args.group_codes, vec!["BUYER_FINDER_FEES", "SETTLEMENT_TERMS"]);
                assert!(!args.detailed);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_output_format_flag() {
        let cli = Cli::parse_from(["tagcheck", "-o", "json-pretty", "catalog"]);
        assert_eq!(cli.output, Some(OutputFormat::JsonPretty));

        let cli = Cli::parse_from(["tagcheck", "catalog", "--domain", "offers"]);
        assert_eq!(cli.output, None);
    }
}
