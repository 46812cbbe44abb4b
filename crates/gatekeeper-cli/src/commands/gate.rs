//! Gate command: every category in its own process.
//!
//! Each category runs as `gatekeeper check <category>` with the same global
//! flags, one after another. A crash or configuration error in one category
//! cannot leak state into the next. The gate fails if any child fails.
//!
//! With `--format json` the children's reports are collected and printed as
//! one document instead of the text summary.

use anyhow::{Context, Result};
use gatekeeper_rules::Category;
use serde::Serialize;
use std::io::IsTerminal;
use std::path::Path;
use std::process::{Command, ExitCode, Stdio};

use super::output::paint;
use super::{load_config, warn_unknown_rule_keys, ScanOptions};
use crate::OutputFormat;

/// Outcome of one child gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateOutcome {
    /// Category that ran.
    pub category: Category,
    /// Whether the child exited successfully.
    pub passed: bool,
}

/// One category in the JSON gate document.
#[derive(Debug, Serialize)]
struct JsonCategory {
    category: &'static str,
    passed: bool,
    /// The child's report, or `null` when it failed before producing one.
    report: serde_json::Value,
}

/// JSON document written by `gate --format json`.
#[derive(Debug, Serialize)]
struct JsonGate {
    passed: bool,
    summary: String,
    categories: Vec<JsonCategory>,
}

/// Runs the gate command.
pub fn run(opts: &ScanOptions) -> Result<ExitCode> {
    let config = load_config(&opts.root, opts.config.as_deref())?;
    warn_unknown_rule_keys(&config);

    let exe = std::env::current_exe().context("Failed to locate the gatekeeper executable")?;
    let json = opts.format == OutputFormat::Json;

    let mut outcomes = Vec::new();
    let mut reports = Vec::new();
    for category in Category::ALL {
        let passed = if json {
            let (passed, report) = run_child_captured(&exe, opts, category)?;
            reports.push(JsonCategory {
                category: category.name(),
                passed,
                report,
            });
            passed
        } else {
            println!("==> {category}: {}", category.description());
            run_child(&exe, opts, category)?
        };
        tracing::debug!("Category {category} finished, passed = {passed}");
        outcomes.push(GateOutcome { category, passed });
    }

    let all_passed = outcomes.iter().all(|o| o.passed);
    if json {
        let doc = JsonGate {
            passed: all_passed,
            summary: verdict(&outcomes),
            categories: reports,
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        let summary = format_summary(&outcomes);
        if all_passed {
            let color = std::io::stdout().is_terminal();
            print!("{}", paint("\x1b[32m", &summary, color));
        } else {
            let color = std::io::stderr().is_terminal();
            eprint!("{}", paint("\x1b[31m", &summary, color));
        }
    }

    Ok(if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn child(exe: &Path, opts: &ScanOptions, category: Category) -> Command {
    let mut cmd = Command::new(exe);
    cmd.args(opts.to_args())
        .arg("check")
        .arg(category.name())
        .arg("--gate-child");
    cmd
}

fn run_child(exe: &Path, opts: &ScanOptions, category: Category) -> Result<bool> {
    let status = child(exe, opts, category)
        .status()
        .with_context(|| format!("Failed to run the {category} gate"))?;
    Ok(status.success())
}

/// Runs a child with stdout captured and parses its JSON report.
fn run_child_captured(
    exe: &Path,
    opts: &ScanOptions,
    category: Category,
) -> Result<(bool, serde_json::Value)> {
    let output = child(exe, opts, category)
        .stderr(Stdio::inherit())
        .output()
        .with_context(|| format!("Failed to run the {category} gate"))?;
    let report = serde_json::from_slice(&output.stdout).unwrap_or(serde_json::Value::Null);
    Ok((output.status.success(), report))
}

/// Overall verdict line.
fn verdict(outcomes: &[GateOutcome]) -> String {
    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|o| !o.passed)
        .map(|o| o.category.name())
        .collect();
    if failed.is_empty() {
        format!("All {} categories passed", outcomes.len())
    } else {
        format!(
            "{} of {} categories FAILED: {}",
            failed.len(),
            outcomes.len(),
            failed.join(", ")
        )
    }
}

/// Per-category table plus the overall verdict.
#[must_use]
pub fn format_summary(outcomes: &[GateOutcome]) -> String {
    use std::fmt::Write;

    let mut out = String::from("\nGate summary:\n");
    for o in outcomes {
        let state = if o.passed { "passed" } else { "FAILED" };
        let _ = writeln!(out, "  {:<8} {state}", o.category.name());
    }
    let _ = writeln!(out, "{}", verdict(outcomes));
    out
}
