//! Check command implementation.

use anyhow::Result;
use gatekeeper_core::{DiskTree, Scanner};
use gatekeeper_rules::{rules_for, Category};
use std::process::ExitCode;

use super::{load_config, output, warn_unknown_rule_keys, ScanOptions};
use crate::OutputFormat;

/// Runs the check command for one category, or every rule.
///
/// `check_rule_keys` warns about `[rules.<name>]` tables naming no built-in
/// rule; gate children leave that to the parent.
pub fn run(opts: &ScanOptions, category: Option<&str>, check_rule_keys: bool) -> Result<ExitCode> {
    let category = category.map(str::parse::<Category>).transpose()?;
    let config = load_config(&opts.root, opts.config.as_deref())?;
    if check_rule_keys {
        warn_unknown_rule_keys(&config);
    }

    let mut builder = Scanner::builder()
        .config(config)
        .rules(rules_for(category));
    if let Some(mode) = opts.exemption_mode {
        builder = builder.exemption_mode(mode);
    }
    if opts.fail_on_parse_error {
        builder = builder.fail_on_parse_error(true);
    }
    let scanner = builder.build()?;

    let label = category.map_or("all rules", Category::name);
    if scanner.rule_count() == 0 {
        tracing::info!("Every rule of {label} is disabled by configuration; skipping");
    }
    tracing::debug!(
        "Scanning {} with {} rule(s) ({label})",
        opts.root.display(),
        scanner.rule_count()
    );
    if opts.format != OutputFormat::Json {
        println!(
            "Checking {label}: {} rule(s) over {}",
            scanner.rule_count(),
            opts.root.display()
        );
    }

    let report = scanner.scan(&DiskTree::new(&opts.root))?;
    output::print(&report, opts.format)?;

    Ok(if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
