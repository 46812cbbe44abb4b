//! Rule trait for defining detectors.

use crate::context::SourceFile;
use crate::syntax::SyntaxTree;
use crate::types::Violation;

/// What a rule needs to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Inspects raw text line by line.
    Text,
    /// Inspects a parsed syntax tree; matches in comments and strings are ignored.
    Syntax,
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Syntax => write!(f, "syntax"),
        }
    }
}

/// A named, pure detector over one source file.
///
/// Rules are total and side-effect free: they never fail on well-formed input
/// and never modify the file. Path exemptions are applied by the
/// [`Scanner`](crate::Scanner) before a rule sees the file, using the rule's
/// [`default_exemptions`](Rule::default_exemptions) unless configuration
/// replaces them.
///
/// # Example
///
/// ```ignore
/// use gatekeeper_core::{Location, Rule, SourceFile, SyntaxTree, Violation};
///
/// pub struct NoTodo;
///
/// impl Rule for NoTodo {
///     fn name(&self) -> &'static str { "no-todo" }
///     fn code(&self) -> &'static str { "GK900" }
///     fn guidance(&self) -> &'static str { "Open an issue instead" }
///
///     fn check(&self, file: &SourceFile, _tree: Option<&SyntaxTree>) -> Vec<Violation> {
///         file.lines()
///             .filter(|(_, line)| line.contains("TODO"))
///             .map(|(n, _)| Violation::for_rule(self, file.location(n), "TODO left in code"))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "hardcoded-value").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "GK001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Corrective text attached to every violation of this rule.
    fn guidance(&self) -> &'static str;

    /// Whether this rule reads raw text or a syntax tree.
    fn kind(&self) -> RuleKind {
        RuleKind::Text
    }

    /// Paths exempt from this rule unless configuration says otherwise.
    fn default_exemptions(&self) -> &'static [&'static str] {
        &[]
    }

    /// Whether this rule looks at `file` at all (e.g., by extension).
    fn applies_to(&self, _file: &SourceFile) -> bool {
        true
    }

    /// Checks a single file and returns any violations found.
    ///
    /// `tree` is `Some` for [`RuleKind::Syntax`] rules and `None` for text rules.
    fn check(&self, file: &SourceFile, tree: Option<&SyntaxTree>) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn guidance(&self) -> &'static str {
            "Do something else"
        }

        fn check(&self, file: &SourceFile, _tree: Option<&SyntaxTree>) -> Vec<Violation> {
            vec![Violation::for_rule(self, file.location(1), "Test violation")]
        }
    }

    #[test]
    fn test_rule_defaults() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.kind(), RuleKind::Text);
        assert!(rule.default_exemptions().is_empty());
    }

    #[test]
    fn violation_carries_rule_identity() {
        let file = SourceFile::new("/p/src/a.ts", "src/a.ts", "let a = 1;\n");
        let v = TestRule.check(&file, None);
        assert_eq!(v[0].code, "TEST001");
        assert_eq!(v[0].rule, "test-rule");
        assert_eq!(v[0].guidance, "Do something else");
        assert_eq!(v[0].location.line, 1);
    }
}
