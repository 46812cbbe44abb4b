//! Subcommand implementations.

pub mod check;
pub mod explain;
pub mod gate;
pub mod init;
pub mod list_rules;
pub mod output;

use gatekeeper_core::{Config, ExemptionMode, ScanError};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config_resolver;
use crate::OutputFormat;

/// Global options shared by the scanning commands.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Project base directory.
    pub root: PathBuf,
    /// Explicit configuration file.
    pub config: Option<PathBuf>,
    /// Report format.
    pub format: OutputFormat,
    /// Exemption mode override.
    pub exemption_mode: Option<ExemptionMode>,
    /// Parse-error policy override.
    pub fail_on_parse_error: bool,
    /// Verbose logging.
    pub verbose: bool,
}

impl ScanOptions {
    /// Global flags that reproduce these options in a child process.
    #[must_use]
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--root".into(),
            self.root.clone().into_os_string(),
            "--format".into(),
            self.format.as_arg().into(),
        ];
        if let Some(config) = &self.config {
            args.push("--config".into());
            args.push(config.clone().into_os_string());
        }
        if let Some(mode) = self.exemption_mode {
            args.push("--exemption-mode".into());
            args.push(mode.to_string().into());
        }
        if self.fail_on_parse_error {
            args.push("--fail-on-parse-error".into());
        }
        if self.verbose {
            args.push("--verbose".into());
        }
        args
    }
}

/// Loads the configuration that applies to `root`.
///
/// # Errors
///
/// Returns [`ScanError::Configuration`] if the resolved file cannot be read
/// or parsed.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config, ScanError> {
    let source = config_resolver::resolve(root, explicit);
    if source.is_global() {
        tracing::info!("Using config: {source}");
    } else {
        tracing::debug!("Using config: {source}");
    }
    match source.path() {
        Some(path) => Ok(Config::from_file(path)?),
        None => Ok(Config::default()),
    }
}

/// Warns once per `[rules.<name>]` table that names no built-in rule.
pub fn warn_unknown_rule_keys(config: &Config) {
    for name in gatekeeper_rules::unknown_rule_keys(config) {
        tracing::warn!("Configuration mentions unknown rule: {name}");
    }
}
