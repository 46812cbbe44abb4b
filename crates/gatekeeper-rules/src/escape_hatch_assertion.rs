//! Rule to forbid double type assertions.
//!
//! `value as unknown as Target` silences the type checker entirely. A type
//! guard or a schema parse keeps the check honest.

use std::sync::LazyLock;

use gatekeeper_core::{Rule, SourceFile, SyntaxTree, Violation};
use regex::Regex;

use crate::line_scan::{compile, scan_lines, LineHit};

/// Rule code for escape-hatch-assertion.
pub const CODE: &str = "GK005";

/// Rule name for escape-hatch-assertion.
pub const NAME: &str = "escape-hatch-assertion";

static DOUBLE_ASSERTION: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\bas\s+unknown\s+as\b"));

/// Forbids `as unknown as T`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeHatchAssertion;

impl EscapeHatchAssertion {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for EscapeHatchAssertion {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids double type assertions through unknown"
    }

    fn guidance(&self) -> &'static str {
        "Narrow the value with a type guard or validate it with a schema instead of asserting through unknown"
    }

    fn check(&self, file: &SourceFile, _tree: Option<&SyntaxTree>) -> Vec<Violation> {
        scan_lines(self, file, |line| {
            DOUBLE_ASSERTION
                .find(line)
                .map(|m| LineHit::new(m.start(), "Double type assertion `as unknown as`"))
        })
    }
}
