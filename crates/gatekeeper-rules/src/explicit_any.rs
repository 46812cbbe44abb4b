//! Rule to forbid the `any` type.
//!
//! Works on the syntax tree, so `any` inside comments, strings or
//! identifiers like `company` never matches.

use std::collections::BTreeSet;

use gatekeeper_core::{
    node_text, Rule, RuleKind, SourceFile, SyntaxLanguage, SyntaxTree, Violation,
};

/// Rule code for explicit-any.
pub const CODE: &str = "GK004";

/// Rule name for explicit-any.
pub const NAME: &str = "explicit-any";

/// Forbids explicit `any` type annotations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitAny;

impl ExplicitAny {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ExplicitAny {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids explicit `any` type annotations"
    }

    fn guidance(&self) -> &'static str {
        "Use a precise type, a generic, or `unknown` with narrowing instead of `any`"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Syntax
    }

    fn applies_to(&self, file: &SourceFile) -> bool {
        SyntaxLanguage::for_path(&file.relative_path).is_some()
    }

    fn check(&self, file: &SourceFile, tree: Option<&SyntaxTree>) -> Vec<Violation> {
        let Some(tree) = tree else {
            return Vec::new();
        };

        let mut seen_lines = BTreeSet::new();
        tree.find_all("predefined_type")
            .into_iter()
            .filter(|node| node_text(*node, &file.content) == "any")
            .filter_map(|node| {
                let pos = node.start_position();
                let line = pos.row + 1;
                if !seen_lines.insert(line) {
                    return None;
                }
                Some(Violation::for_rule(
                    self,
                    file.location(line).with_column(pos.column + 1),
                    "Explicit `any` type",
                ))
            })
            .collect()
    }
}
