//! Explain command implementation.

use anyhow::Result;
use std::process::ExitCode;

/// Prints the documentation of one rule.
pub fn run(key: &str) -> Result<ExitCode> {
    let doc = gatekeeper_rules::explain(key)?;
    print!("{}", doc.format());
    Ok(ExitCode::SUCCESS)
}
