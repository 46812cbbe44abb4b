//! Rule to require the `'use client'` marker where client features are used.
//!
//! # Rationale
//!
//! In the Next.js app router, components are server components unless the
//! file declares `'use client'`. State hooks and DOM event handlers only work
//! on the client, so a component using them without the marker fails at
//! build or render time.
//!
//! # Behavior
//!
//! Only `.tsx` and `.jsx` files are checked. If a marker line exists
//! anywhere in the file, the file passes. Otherwise every line that calls a
//! client-only hook or passes an event handler prop is reported.

use std::sync::LazyLock;

use gatekeeper_core::{Rule, SourceFile, SyntaxTree, Violation};
use regex::Regex;
use tracing::debug;

use crate::line_scan::{compile, first_capture, scan_lines, LineHit};

/// Rule code for client-directive.
pub const CODE: &str = "GK003";

/// Rule name for client-directive.
pub const NAME: &str = "client-directive";

/// Hooks that only run in client components.
pub const CLIENT_HOOKS: &[&str] = &[
    "useState",
    "useEffect",
    "useLayoutEffect",
    "useReducer",
    "useRef",
    "useContext",
    "useTransition",
    "useOptimistic",
    "useSyncExternalStore",
    "useImperativeHandle",
    "useInsertionEffect",
    "useDeferredValue",
    "useActionState",
    "useFormStatus",
];

static HOOK_CALL: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"\b({})\s*(?:<[^>]*>)?\s*\(",
        CLIENT_HOOKS.join("|")
    ))
});

static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(on[A-Z][A-Za-z]*)\s*=\s*\{"));

/// Requires `'use client'` in components that use client-only features.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientDirective;

impl ClientDirective {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Whether any line of `file` is a `'use client'` marker.
    #[must_use]
    pub fn has_marker(file: &SourceFile) -> bool {
        file.lines().any(|(_, line)| is_marker(line))
    }

    fn find(line: &str) -> Option<LineHit> {
        let hook = first_capture(&HOOK_CALL, line).map(|(start, hook)| {
            LineHit::new(start, format!("Client-only hook `{hook}` without 'use client'"))
        });
        let handler = first_capture(&EVENT_HANDLER, line).map(|(start, prop)| {
            LineHit::new(start, format!("Event handler prop `{prop}` without 'use client'"))
        });

        match (hook, handler) {
            (Some(h), Some(e)) => Some(if e.offset < h.offset { e } else { h }),
            (h, e) => h.or(e),
        }
    }
}

fn is_marker(line: &str) -> bool {
    let code = line.find("//").map_or(line, |at| &line[..at]);
    let trimmed = code.trim();
    let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end();
    trimmed == "'use client'" || trimmed == "\"use client\""
}

impl Rule for ClientDirective {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires 'use client' in components that use client-only hooks or event handlers"
    }

    fn guidance(&self) -> &'static str {
        "Add 'use client' as the first line of the file, or move the interactive part into a separate client component"
    }

    fn applies_to(&self, file: &SourceFile) -> bool {
        file.is_component()
    }

    fn check(&self, file: &SourceFile, _tree: Option<&SyntaxTree>) -> Vec<Violation> {
        if Self::has_marker(file) {
            debug!("{} is a client component", file.relative_path.display());
            return Vec::new();
        }
        scan_lines(self, file, Self::find)
    }
}
