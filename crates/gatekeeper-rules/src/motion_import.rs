//! Rule to keep animation libraries behind the motion module.
//!
//! Components animate through `src/design-system/motion`, which is the only
//! place allowed to import an animation library directly.

use std::sync::LazyLock;

use gatekeeper_core::{Rule, SourceFile, SyntaxTree, Violation};
use regex::Regex;

use crate::line_scan::{compile, first_capture, scan_lines, LineHit};

/// Rule code for motion-import.
pub const CODE: &str = "GK002";

/// Rule name for motion-import.
pub const NAME: &str = "motion-import";

/// Directories allowed to import animation libraries.
pub const DEFAULT_EXEMPTIONS: &[&str] = &["src/design-system/motion"];

/// Animation packages that must go through the motion module.
///
/// A specifier matches an entry exactly or any path below it, so `gsap`
/// covers `gsap/Flip` and the `@react-spring` scope covers `@react-spring/web`.
pub const ANIMATION_PACKAGES: &[&str] = &[
    "framer-motion",
    "motion",
    "gsap",
    "react-spring",
    "@react-spring",
    "animejs",
    "popmotion",
    "react-transition-group",
];

static ANIMATION_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    let packages: Vec<String> = ANIMATION_PACKAGES.iter().map(|p| regex::escape(p)).collect();
    compile(&format!(
        r#"(?:\bfrom\s*|\bimport\s+|\brequire\s*\(\s*|\bimport\s*\(\s*)['"]((?:{})(?:/[^'"]*)?)['"]"#,
        packages.join("|")
    ))
});

/// Forbids importing animation libraries outside the motion module.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionImport;

impl MotionImport {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MotionImport {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids importing animation libraries outside the motion module"
    }

    fn guidance(&self) -> &'static str {
        "Import motion primitives from src/design-system/motion; only that module may use an animation library"
    }

    fn default_exemptions(&self) -> &'static [&'static str] {
        DEFAULT_EXEMPTIONS
    }

    fn check(&self, file: &SourceFile, _tree: Option<&SyntaxTree>) -> Vec<Violation> {
        scan_lines(self, file, |line| {
            first_capture(&ANIMATION_IMPORT, line).map(|(start, package)| {
                LineHit::new(start, format!("Direct import of animation library `{package}`"))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(code: &str) -> Vec<Violation> {
        let file = SourceFile::new("/p/src/ui/Hero.tsx", "src/ui/Hero.tsx", code);
        MotionImport::new().check(&file, None)
    }

    #[test]
    fn detects_named_import() {
        let v = check("import React from 'react';\nimport { motion } from \"framer-motion\";\n");
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].location.line, 2);
        assert_eq!(v[0].location.column, Some(25));
        assert_eq!(v[0].message, "Direct import of animation library `framer-motion`");
    }

    #[test]
    fn detects_every_import_form() {
        assert_eq!(check("import 'gsap/ScrollTrigger';").len(), 1);
        assert_eq!(check("const anime = require('animejs');").len(), 1);
        assert_eq!(check("const m = await import(\"motion/react\");").len(), 1);
        assert_eq!(check("import { useSpring } from '@react-spring/web';").len(), 1);
        assert_eq!(check("export { animate } from 'popmotion';").len(), 1);
        assert_eq!(check("import { CSSTransition } from 'react-transition-group';").len(), 1);
    }

    #[test]
    fn ignores_lookalike_packages() {
        assert!(check("import { x } from 'motion-utils-local';").is_empty());
        assert!(check("import { x } from '@/lib/motion';").is_empty());
        assert!(check("import { x } from 'gsapx';").is_empty());
        assert!(check("const motion = 'framer-motion is banned';").is_empty());
    }

    #[test]
    fn every_listed_package_is_detected() {
        for package in ANIMATION_PACKAGES {
            let v = check(&format!("import x from '{package}/sub';"));
            assert_eq!(v.len(), 1, "{package}");
            assert!(v[0].message.contains(&format!("`{package}/sub`")));
        }
    }

    #[test]
    fn reports_each_line() {
        let v = check("import 'gsap';\nimport 'gsap/Flip';\n");
        assert_eq!(v.len(), 2);
        assert_eq!(v[1].location.line, 2);
    }
}
