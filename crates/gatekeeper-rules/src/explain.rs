//! Rule documentation lookup.

use std::fmt::Write;

use gatekeeper_core::{RuleKind, ScanError};

use crate::categories::Category;

/// Everything known about one built-in rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDoc {
    /// Rule name (e.g., "hardcoded-value").
    pub name: &'static str,
    /// Rule code (e.g., "GK001").
    pub code: &'static str,
    /// Text or syntax.
    pub kind: RuleKind,
    /// Category the rule belongs to.
    pub category: Category,
    /// What the rule checks.
    pub description: &'static str,
    /// How to fix a violation.
    pub guidance: &'static str,
    /// Paths exempt by default.
    pub exemptions: &'static [&'static str],
}

impl RuleDoc {
    /// Formats the full explanation for the terminal.
    #[must_use]
    pub fn format(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} [{}]", self.name, self.code);
        let _ = writeln!(out);
        let _ = writeln!(out, "  {}", self.description);
        let _ = writeln!(out);
        let _ = writeln!(out, "  category:   {}", self.category);
        let _ = writeln!(out, "  kind:       {}", self.kind);
        if self.exemptions.is_empty() {
            let _ = writeln!(out, "  exemptions: none");
        } else {
            let _ = writeln!(out, "  exemptions: {}", self.exemptions.join(", "));
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "  fix: {}", self.guidance);
        out
    }
}

/// Documentation for every built-in rule, in code order.
#[must_use]
pub fn rule_docs() -> Vec<RuleDoc> {
    Category::ALL
        .into_iter()
        .flat_map(|category| {
            category.rules().into_iter().map(move |rule| RuleDoc {
                name: rule.name(),
                code: rule.code(),
                kind: rule.kind(),
                category,
                description: rule.description(),
                guidance: rule.guidance(),
                exemptions: rule.default_exemptions(),
            })
        })
        .collect()
}

/// Looks up a rule by name or code (codes are case-insensitive).
///
/// # Errors
///
/// Returns [`ScanError::Configuration`] if no built-in rule matches.
pub fn explain(key: &str) -> Result<RuleDoc, ScanError> {
    let key = key.trim();
    rule_docs()
        .into_iter()
        .find(|doc| doc.name == key || doc.code.eq_ignore_ascii_case(key))
        .ok_or_else(|| {
            ScanError::configuration(format!(
                "unknown rule `{key}`; run `gatekeeper list-rules` to see available rules"
            ))
        })
}
