//! Errors that stop a scan.
//!
//! Violations are never errors; they are report data.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a scan before any report is produced.
#[derive(Debug, Error, Diagnostic)]
pub enum ScanError {
    /// A required scan root, rule, or category does not exist, or the
    /// configuration is invalid.
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(gatekeeper::configuration),
        help("check the scan roots and names in gatekeeper.toml or on the command line")
    )]
    Configuration {
        /// What is wrong.
        message: String,
    },

    /// A file or directory could not be read during the walk.
    #[error("IO error at {}: {source}", path.display())]
    #[diagnostic(
        code(gatekeeper::io),
        help("the scan fails closed: fix permissions or exclude the directory, then re-run")
    )]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A syntax rule's parser could not parse a file.
    #[error("Parse error in {}: {message}", path.display())]
    #[diagnostic(
        code(gatekeeper::parse),
        help("fix the syntax error, or drop --fail-on-parse-error to skip syntax rules for this file")
    )]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },
}

impl ScanError {
    /// Shorthand for [`ScanError::Configuration`].
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Shorthand for [`ScanError::Io`].
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<crate::config::ConfigError> for ScanError {
    fn from(e: crate::config::ConfigError) -> Self {
        Self::configuration(e.to_string())
    }
}
