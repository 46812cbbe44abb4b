//! Rule to forbid raw design values outside the token modules.
//!
//! # Rationale
//!
//! Colors and spacing belong in design tokens. A literal `#FF0000` or
//! `padding: 13px` in a component drifts from the system the moment the
//! tokens change.
//!
//! # Detects
//!
//! - hex colors: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - color functions with literal arguments: `rgb(`, `rgba(`, `hsl(`, `hsla(`
//! - pixel spacing in `margin*`, `padding*` and `gap*` declarations
//! - Tailwind arbitrary values such as `p-[13px]` or `bg-[#fff]`
//!
//! # Exemptions
//!
//! `src/design-system/tokens` and `src/styles/tokens` by default.

use std::sync::LazyLock;

use gatekeeper_core::{Rule, SourceFile, SyntaxTree, Violation};
use regex::Regex;

use crate::line_scan::{compile, first_capture, scan_lines, LineHit};

/// Rule code for hardcoded-value.
pub const CODE: &str = "GK001";

/// Rule name for hardcoded-value.
pub const NAME: &str = "hardcoded-value";

/// Directories allowed to define raw values.
pub const DEFAULT_EXEMPTIONS: &[&str] = &["src/design-system/tokens", "src/styles/tokens"];

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?:^|[^&\w])(#(?:[0-9a-fA-F]{8}|[0-9a-fA-F]{6}|[0-9a-fA-F]{3,4}))\b")
});

static COLOR_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(rgba?|hsla?)\(\s*-?\d"));

static PX_SPACING: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"\b(?:margin|padding|gap)[A-Za-z-]*\s*:\s*['"]?-?\d+(?:\.\d+)?px"#)
});

static TAILWIND_ARBITRARY: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b[a-z][\w-]*-\[(?:#[0-9a-fA-F]{3,8}|-?\d+(?:\.\d+)?(?:px|rem|em))\]")
});

/// Forbids hardcoded colors and spacing outside token modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardcodedValue;

impl HardcodedValue {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Earliest hit on the line. Ties go to the pattern listed first.
    fn find(line: &str) -> Option<LineHit> {
        let patterns: [(&Regex, &str); 4] = [
            (&*TAILWIND_ARBITRARY, "Tailwind arbitrary value"),
            (&*HEX_COLOR, "Hardcoded color"),
            (&*COLOR_FUNCTION, "Hardcoded color function"),
            (&*PX_SPACING, "Hardcoded spacing"),
        ];

        patterns
            .iter()
            .filter_map(|(re, label)| {
                first_capture(re, line).map(|(start, text)| (start, *label, text))
            })
            .min_by_key(|(start, _, _)| *start)
            .map(|(start, label, text)| {
                LineHit::new(start, format!("{label} `{text}`"))
            })
    }
}

impl Rule for HardcodedValue {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids hex colors, color functions, px spacing and Tailwind arbitrary values outside design tokens"
    }

    fn guidance(&self) -> &'static str {
        "Use a design token (CSS variable or theme value) from src/design-system/tokens instead of a raw value"
    }

    fn default_exemptions(&self) -> &'static [&'static str] {
        DEFAULT_EXEMPTIONS
    }

    fn check(&self, file: &SourceFile, _tree: Option<&SyntaxTree>) -> Vec<Violation> {
        scan_lines(self, file, Self::find)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(code: &str) -> Vec<Violation> {
        let file = SourceFile::new("/p/src/ui/Card.tsx", "src/ui/Card.tsx", code);
        HardcodedValue::new().check(&file, None)
    }

    #[test]
    fn detects_hex_color_with_position() {
        let violations = check("const a = 1;\n.card {\n  color: #FF0000;\n}\n");
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.rule, NAME);
        assert_eq!(v.location.line, 3);
        assert_eq!(v.location.column, Some(10));
        assert_eq!(v.message, "Hardcoded color `#FF0000`");
    }

    #[test]
    fn hex_lengths() {
        assert_eq!(check("color: #fff;").len(), 1);
        assert_eq!(check("color: #ffff;").len(), 1);
        assert_eq!(check("color: #ff00ff80;").len(), 1);
        assert!(check("color: #fffff;").is_empty());
        assert!(check("color: #1234567;").is_empty());
    }

    #[test]
    fn ignores_non_color_hashes() {
        assert!(check("<a href=\"#section\">").is_empty());
        assert!(check("const entity = '&#123;';").is_empty());
        assert!(check("const id = item#abc;").is_empty());
    }

    #[test]
    fn detects_color_functions() {
        let v = check("background: rgba(0, 0, 0, 0.5);");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].message, "Hardcoded color function `rgba`");
        assert_eq!(check("color: hsl(210 40% 50%);").len(), 1);
        assert!(check("color: rgb(var(--brand));").is_empty());
    }

    #[test]
    fn detects_px_spacing() {
        assert_eq!(check("  padding: 13px;").len(), 1);
        assert_eq!(check("  margin-top: -4px;").len(), 1);
        assert_eq!(check("style={{ marginTop: '8px' }}").len(), 1);
        assert_eq!(check("  gap: 2.5px;").len(), 1);
        assert!(check("  padding: var(--space-2);").is_empty());
        assert!(check("  padding: 1rem;").is_empty());
        assert!(check("  width: 13px;").is_empty());
    }

    #[test]
    fn detects_tailwind_arbitrary_values() {
        let v = check(r#"<div className="flex p-[13px] bg-[#fff]">"#);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].message, "Tailwind arbitrary value `p-[13px]`");
        assert_eq!(v[0].location.column, Some(22));
        assert_eq!(
            check(r#"<div className="bg-[#fff]">"#)[0].message,
            "Tailwind arbitrary value `bg-[#fff]`"
        );
        assert!(check(r#"<div className="p-4 bg-brand">"#).is_empty());
    }

    #[test]
    fn one_violation_per_line() {
        let v = check("border: 1px solid #000; color: #fff; padding: 2px;");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].message, "Hardcoded color `#000`");
    }

    #[test]
    fn carries_guidance() {
        let v = check("color: #abc;");
        assert!(v[0].guidance.contains("design token"));
    }

    #[test]
    fn clean_file_passes() {
        assert!(check("export const Card = () => <div className=\"card\" />;\n").is_empty());
    }
}
