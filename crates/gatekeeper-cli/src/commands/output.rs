//! Shared output formatting for scan reports.
//!
//! Violations, warnings and failure summaries go to stderr. Progress and the
//! pass line go to stdout. JSON goes to stdout whatever the outcome.

use anyhow::Result;
use gatekeeper_core::ScanReport;
use serde::Serialize;
use std::io::IsTerminal;

use crate::OutputFormat;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// JSON document written for `--format json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    passed: bool,
    summary: String,
    #[serde(flatten)]
    report: &'a ScanReport,
}

/// Print a scan report in the specified format.
pub fn print(report: &ScanReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn print_text(report: &ScanReport) {
    let color = std::io::stderr().is_terminal();
    let details = report.format_details();
    if !details.is_empty() {
        eprint!("{details}");
    }
    print_summary(report, color);
}

fn print_compact(report: &ScanReport) {
    let color = std::io::stderr().is_terminal();
    for violation in &report.violations {
        eprintln!("{violation}");
    }
    for warning in &report.warnings {
        eprintln!("{}", paint(YELLOW, &warning.to_string(), color));
    }
    print_summary(report, color);
}

fn print_summary(report: &ScanReport, color: bool) {
    if report.passed() {
        let color = std::io::stdout().is_terminal();
        println!("{}", paint(GREEN, &report.summary(), color));
    } else {
        eprintln!("{}", paint(RED, &report.summary(), color));
    }
}

fn print_json(report: &ScanReport) -> Result<()> {
    let json = serde_json::to_string_pretty(&JsonReport {
        passed: report.passed(),
        summary: report.summary(),
        report,
    })?;
    println!("{json}");
    Ok(())
}

/// Wraps `text` in an ANSI color when `enabled`.
pub fn paint(code: &str, text: &str, enabled: bool) -> String {
    if enabled {
        format!("{code}{text}{RESET}")
    } else {
        text.to_string()
    }
}
