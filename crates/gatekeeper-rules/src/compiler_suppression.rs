//! Rule to forbid comments that switch off the compiler or linter.

use std::sync::LazyLock;

use gatekeeper_core::{Rule, SourceFile, SyntaxTree, Violation};
use regex::Regex;

use crate::line_scan::{compile, first_capture, scan_lines, LineHit};

/// Rule code for compiler-suppression.
pub const CODE: &str = "GK006";

/// Rule name for compiler-suppression.
pub const NAME: &str = "compiler-suppression";

static SUPPRESSION: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?://|/\*)\s*(@ts-ignore|@ts-nocheck|@ts-expect-error|eslint-disable(?:-next-line|-line)?)\b",
    )
});

/// Forbids `@ts-ignore`, `@ts-nocheck`, `@ts-expect-error` and
/// `eslint-disable` comments.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompilerSuppression;

impl CompilerSuppression {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for CompilerSuppression {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids comments that suppress TypeScript or ESLint diagnostics"
    }

    fn guidance(&self) -> &'static str {
        "Fix the underlying type or lint error instead of suppressing it"
    }

    fn check(&self, file: &SourceFile, _tree: Option<&SyntaxTree>) -> Vec<Violation> {
        scan_lines(self, file, |line| {
            first_capture(&SUPPRESSION, line).map(|(start, directive)| {
                LineHit::new(start, format!("Suppression comment `{directive}`"))
            })
        })
    }
}
