//! Core types for violations and scan reports.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::rule::Rule;

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to the project base.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed), when the rule can pin one down.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl Location {
    /// Creates a location without a column.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column: None,
        }
    }

    /// Sets the 1-indexed column.
    #[must_use]
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)?;
        if let Some(column) = self.column {
            write!(f, ":{column}")?;
        }
        Ok(())
    }
}

/// A single rule failure at a specific file and line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "GK001").
    pub code: String,
    /// Rule name (e.g., "hardcoded-value").
    pub rule: String,
    /// Where the violation was found.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Corrective guidance, so every failure explains its own fix.
    pub guidance: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        location: Location,
        message: impl Into<String>,
        guidance: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            location,
            message: message.into(),
            guidance: guidance.into(),
        }
    }

    /// Creates a violation carrying the code, name and guidance of `rule`.
    #[must_use]
    pub fn for_rule<R: Rule + ?Sized>(
        rule: &R,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            rule.code(),
            rule.name(),
            location,
            message,
            rule.guidance(),
        )
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: [{}] {} (fix: {})",
            self.location, self.code, self.message, self.guidance
        )
    }
}

/// A non-blocking notice collected during a scan.
///
/// Warnings are printed with the report but never change the gate outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWarning {
    /// File the warning refers to.
    pub file: PathBuf,
    /// What happened.
    pub message: String,
}

impl ScanWarning {
    /// Creates a new warning.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "warning: {}: {}", self.file.display(), self.message)
    }
}

/// Result of running one scan.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// All violations, in file-walk order, then line, then rule registration.
    pub violations: Vec<Violation>,
    /// Number of files scanned.
    pub files_scanned: usize,
    /// Names of the rules that ran, in registration order.
    pub rules: Vec<String>,
    /// Non-blocking warnings.
    #[serde(default)]
    pub warnings: Vec<ScanWarning>,
}

impl ScanReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The gate decision: passed if no violation exists.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// Groups violations by rule name.
    ///
    /// Groups follow rule registration order; rules without findings are
    /// omitted. Violations keep report order inside each group.
    #[must_use]
    pub fn by_rule(&self) -> Vec<(&str, Vec<&Violation>)> {
        let mut groups: Vec<(&str, Vec<&Violation>)> = Vec::new();
        for name in &self.rules {
            let found: Vec<&Violation> = self
                .violations
                .iter()
                .filter(|v| &v.rule == name)
                .collect();
            if !found.is_empty() {
                groups.push((name.as_str(), found));
            }
        }
        // Violations from rules the report was not told about still show up.
        for v in &self.violations {
            if !self.rules.iter().any(|r| r == &v.rule) {
                match groups.iter_mut().find(|(name, _)| *name == v.rule) {
                    Some((_, list)) => list.push(v),
                    None => groups.push((v.rule.as_str(), vec![v])),
                }
            }
        }
        groups
    }

    /// One-line summary of the gate outcome.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.passed() {
            format!(
                "Gate passed: 0 violations in {} file(s) scanned",
                self.files_scanned
            )
        } else {
            format!(
                "Gate FAILED: {} violation(s) from {} rule(s) in {} file(s) scanned",
                self.violation_count(),
                self.by_rule().len(),
                self.files_scanned
            )
        }
    }

    /// Formats the full human-readable report, grouped by rule, ending with
    /// the summary line.
    #[must_use]
    pub fn format_report(&self) -> String {
        format!("{}{}\n", self.format_details(), self.summary())
    }

    /// Formats violation groups and warnings without the summary line.
    #[must_use]
    pub fn format_details(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        for (rule, violations) in self.by_rule() {
            let code = violations.first().map_or("", |v| v.code.as_str());
            let _ = writeln!(
                report,
                "{rule} [{code}]: {} violation(s)",
                violations.len()
            );
            for v in violations {
                let _ = writeln!(report, "  {}", v.location);
                let _ = writeln!(report, "    {}", v.message);
                let _ = writeln!(report, "    = fix: {}", v.guidance);
            }
            let _ = writeln!(report);
        }

        for w in &self.warnings {
            let _ = writeln!(report, "{w}");
        }
        if !self.warnings.is_empty() {
            let _ = writeln!(report);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(rule: &str, line: usize) -> Violation {
        Violation::new(
            "GK001",
            rule,
            Location::new("src/Button.tsx", line).with_column(10),
            "Hardcoded color `#FF0000`",
            "Use a design token",
        )
    }

    #[test]
    fn location_display_with_and_without_column() {
        assert_eq!(Location::new("a.ts", 3).to_string(), "a.ts:3");
        assert_eq!(Location::new("a.ts", 3).with_column(7).to_string(), "a.ts:3:7");
    }

    #[test]
    fn violation_display_is_one_line_with_guidance() {
        let line = make_violation("hardcoded-value", 4).to_string();
        assert_eq!(
            line,
            "src/Button.tsx:4:10: [GK001] Hardcoded color `#FF0000` (fix: Use a design token)"
        );
    }

    #[test]
    fn empty_report_passes() {
        let report = ScanReport::new();
        assert!(report.passed());
        assert!(report.summary().starts_with("Gate passed"));
    }

    #[test]
    fn details_leave_out_the_summary() {
        let mut report = ScanReport::new();
        report.rules = vec!["hardcoded-value".into()];
        report.violations.push(make_violation("hardcoded-value", 1));
        assert!(!report.format_details().contains("Gate FAILED"));
        assert!(report
            .format_report()
            .ends_with("Gate FAILED: 1 violation(s) from 1 rule(s) in 0 file(s) scanned\n"));
    }

    #[test]
    fn warnings_do_not_fail_the_gate() {
        let mut report = ScanReport::new();
        report
            .warnings
            .push(ScanWarning::new("src/broken.tsx", "syntax rules skipped"));
        assert!(report.passed());
        assert!(report.format_report().contains("warning: src/broken.tsx"));
    }

    #[test]
    fn report_groups_by_rule_in_registration_order() {
        let mut report = ScanReport::new();
        report.rules = vec!["motion-import".into(), "hardcoded-value".into()];
        report.violations.push(make_violation("hardcoded-value", 1));
        report.violations.push(make_violation("motion-import", 2));
        report.violations.push(make_violation("hardcoded-value", 3));

        let groups = report.by_rule();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "motion-import");
        assert_eq!(groups[1].0, "hardcoded-value");
        assert_eq!(groups[1].1.len(), 2);
    }

    #[test]
    fn format_report_lists_every_violation() {
        let mut report = ScanReport::new();
        report.files_scanned = 2;
        report.rules = vec!["hardcoded-value".into()];
        report.violations.push(make_violation("hardcoded-value", 1));
        report.violations.push(make_violation("hardcoded-value", 9));

        let text = report.format_report();
        assert!(text.contains("hardcoded-value [GK001]: 2 violation(s)"));
        assert!(text.contains("src/Button.tsx:1:10"));
        assert!(text.contains("src/Button.tsx:9:10"));
        assert!(text.contains("Gate FAILED: 2 violation(s) from 1 rule(s) in 2 file(s) scanned"));
    }

    #[test]
    fn report_round_trips_through_json() {
        let mut report = ScanReport::new();
        report.files_scanned = 1;
        report.rules = vec!["hardcoded-value".into()];
        report.violations.push(make_violation("hardcoded-value", 1));

        let json = serde_json::to_string(&report).unwrap();
        let back: ScanReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.violations, report.violations);
        assert_eq!(back.files_scanned, 1);
    }
}
