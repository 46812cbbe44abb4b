//! gatekeeper CLI tool.
//!
//! Usage:
//! ```bash
//! gatekeeper check [CATEGORY]
//! gatekeeper gate
//! gatekeeper explain <RULE>
//! gatekeeper list-rules
//! gatekeeper init
//! ```

use clap::{Parser, Subcommand};
use gatekeeper_core::{ExemptionMode, ScanError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

use commands::ScanOptions;

/// Design-system gate for Next.js / TypeScript source trees
#[derive(Parser)]
#[command(name = "gatekeeper")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Project base directory; scan roots are relative to it
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    /// How exemption paths match files (overrides the config file)
    #[arg(long, global = true)]
    exemption_mode: Option<ExemptionModeArg>,

    /// Abort on files that cannot be parsed instead of skipping syntax rules
    #[arg(long, global = true)]
    fail_on_parse_error: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan with one rule category, or every rule
    Check {
        /// Category to run: tokens, motion, client or types (default: all)
        category: Option<String>,

        /// Set by `gate`, which has already checked the config rule keys
        #[arg(long, hide = true)]
        gate_child: bool,
    },

    /// Run every category as a separate process and summarize
    Gate,

    /// Show what a rule checks and how to fix its violations
    Explain {
        /// Rule name or code (e.g. hardcoded-value or GK001)
        rule: String,
    },

    /// List available rules and categories
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for scan reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report grouped by rule.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

impl OutputFormat {
    /// Value accepted by `--format`.
    #[must_use]
    pub fn as_arg(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Compact => "compact",
        }
    }
}

/// Exemption matching mode as accepted on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum ExemptionModeArg {
    /// Path contains the exemption string.
    Substring,
    /// Path starts with the exemption path, component by component.
    Prefix,
}

impl From<ExemptionModeArg> for ExemptionMode {
    fn from(arg: ExemptionModeArg) -> Self {
        match arg {
            ExemptionModeArg::Substring => Self::Substring,
            ExemptionModeArg::Prefix => Self::Prefix,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors exit 1 like every other failure; --help and --version exit 0.
            let code = if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            return code;
        }
    };

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let opts = ScanOptions {
        root: cli.root,
        config: cli.config,
        format: cli.format,
        exemption_mode: cli.exemption_mode.map(ExemptionMode::from),
        fail_on_parse_error: cli.fail_on_parse_error,
        verbose: cli.verbose,
    };

    let result = match cli.command {
        Commands::Check {
            category,
            gate_child,
        } => commands::check::run(&opts, category.as_deref(), !gate_child),
        Commands::Gate => commands::gate::run(&opts),
        Commands::Explain { rule } => commands::explain::run(&rule),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force } => commands::init::run(&opts.root, force),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            report_error(err);
            ExitCode::FAILURE
        }
    }
}

fn report_error(err: anyhow::Error) {
    match err.downcast::<ScanError>() {
        Ok(scan) => eprintln!("{:?}", miette::Report::new(scan)),
        Err(other) => eprintln!("Error: {other:#}"),
    }
}
