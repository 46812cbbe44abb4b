//! # gatekeeper-core
//!
//! Engine for design-system gates over Next.js / TypeScript source trees.
//!
//! This crate provides the pieces every gate is built from:
//!
//! - [`Rule`] trait for per-file detectors, over raw text or a syntax tree
//! - [`SourceTree`] for walking the file system (or a synthetic tree in tests)
//! - [`Exemptions`] for per-rule path allow-lists
//! - [`Scanner`] for running rules over scan roots
//! - [`ScanReport`] for the gate outcome and its rendering
//!
//! ## Example
//!
//! ```ignore
//! use gatekeeper_core::{DiskTree, ScanRoot, Scanner};
//!
//! let scanner = Scanner::builder()
//!     .root(ScanRoot::new("src"))
//!     .rule(MyRule)
//!     .build()?;
//!
//! let report = scanner.scan(&DiskTree::new("."))?;
//! print!("{}", report.format_report());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod error;
mod exemption;
mod rule;
mod scanner;
mod syntax;
mod types;
mod walker;

pub use config::{Config, ConfigError, RuleConfig, ScanConfig, DEFAULT_ROOTS};
pub use context::{extension_of, slash_path, SourceFile};
pub use error::ScanError;
pub use exemption::{ExemptionMode, Exemptions};
pub use rule::{Rule, RuleBox, RuleKind};
pub use scanner::{Scanner, ScannerBuilder};
pub use syntax::{node_text, SyntaxLanguage, SyntaxTree};
pub use types::{Location, ScanReport, ScanWarning, Violation};
pub use walker::{
    DiskTree, MemoryTree, ScanRoot, SourceIter, SourceTree, DEFAULT_EXCLUDED_DIRS,
    DEFAULT_EXTENSIONS,
};
