//! Source files handed to rules.

use std::path::{Path, PathBuf};

use crate::types::Location;

/// Extensions treated as React component files.
const COMPONENT_EXTENSIONS: &[&str] = &["tsx", "jsx"];

/// A file and its full text, loaded once per scan and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as found by the walker.
    pub path: PathBuf,
    /// Path relative to the project base; used for reporting and exemptions.
    pub relative_path: PathBuf,
    /// File contents.
    pub content: String,
}

impl SourceFile {
    /// Creates a new source file.
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        relative_path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }

    /// Lower-cased extension without the dot, or `""`.
    #[must_use]
    pub fn extension(&self) -> String {
        extension_of(&self.relative_path)
    }

    /// Whether this is a `.tsx`/`.jsx` component file.
    #[must_use]
    pub fn is_component(&self) -> bool {
        COMPONENT_EXTENSIONS.contains(&self.extension().as_str())
    }

    /// Iterates `(line_number, line)` pairs, 1-indexed.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.content.lines().enumerate().map(|(i, l)| (i + 1, l))
    }

    /// A location in this file without a column.
    #[must_use]
    pub fn location(&self, line: usize) -> Location {
        Location::new(self.relative_path.clone(), line)
    }

    /// Relative path rendered with `/` separators on every platform.
    #[must_use]
    pub fn relative_str(&self) -> String {
        slash_path(&self.relative_path)
    }
}

/// Lower-cased extension of `path`, or `""`.
#[must_use]
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

/// Renders `path` with `/` separators, dropping `.` components.
#[must_use]
pub fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
