//! # gatekeeper-rules
//!
//! Built-in design-system rules for gatekeeper.
//!
//! ## Available Rules
//!
//! | Code | Name | Kind | Description |
//! |------|------|------|-------------|
//! | GK001 | `hardcoded-value` | text | Forbids raw colors, px spacing and Tailwind arbitrary values outside design tokens |
//! | GK002 | `motion-import` | text | Forbids animation library imports outside the motion module |
//! | GK003 | `client-directive` | text | Requires `'use client'` where client-only hooks or event handlers are used |
//! | GK004 | `explicit-any` | syntax | Forbids explicit `any` types |
//! | GK005 | `escape-hatch-assertion` | text | Forbids `as unknown as T` |
//! | GK006 | `compiler-suppression` | text | Forbids `@ts-ignore`, `@ts-nocheck`, `@ts-expect-error`, `eslint-disable` |
//!
//! ## Usage
//!
//! ```ignore
//! use gatekeeper_core::{DiskTree, Scanner};
//! use gatekeeper_rules::{rules_for, Category};
//!
//! let scanner = Scanner::builder()
//!     .rules(rules_for(Some(Category::Tokens)))
//!     .build()?;
//! let report = scanner.scan(&DiskTree::new("."))?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod categories;
mod client_directive;
mod compiler_suppression;
mod escape_hatch_assertion;
mod explain;
mod explicit_any;
mod hardcoded_value;
mod line_scan;
mod motion_import;

pub use categories::{all_rules, rules_for, unknown_rule_keys, Category};
pub use client_directive::{ClientDirective, CLIENT_HOOKS};
pub use compiler_suppression::CompilerSuppression;
pub use escape_hatch_assertion::EscapeHatchAssertion;
pub use explain::{explain, rule_docs, RuleDoc};
pub use explicit_any::ExplicitAny;
pub use hardcoded_value::HardcodedValue;
pub use motion_import::{MotionImport, ANIMATION_PACKAGES};

/// Re-export core types for convenience.
pub use gatekeeper_core::{Rule, RuleKind, Violation};
