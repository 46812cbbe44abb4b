//! Path-scoped exemptions.
//!
//! Each rule owns an allow-list of paths. A file on the list never reaches
//! the rule. Two matching modes exist:
//!
//! - [`ExemptionMode::Substring`]: the `/`-separated relative path contains
//!   the entry anywhere. `src/tokens` also exempts `src/tokens-backup/a.ts`.
//! - [`ExemptionMode::Prefix`]: the relative path starts with the entry,
//!   compared component by component. `src/tokens` exempts
//!   `src/tokens/colors.ts` but not `src/tokens-backup/a.ts`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::context::slash_path;

/// How exemption entries are matched against file paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExemptionMode {
    /// Plain string containment.
    #[default]
    Substring,
    /// Whole-component path prefix.
    Prefix,
}

impl std::fmt::Display for ExemptionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Substring => write!(f, "substring"),
            Self::Prefix => write!(f, "prefix"),
        }
    }
}

/// The allow-list for one rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exemptions {
    mode: ExemptionMode,
    paths: Vec<String>,
}

impl Exemptions {
    /// Creates an allow-list. Empty entries are dropped.
    #[must_use]
    pub fn new<I, S>(mode: ExemptionMode, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths = paths
            .into_iter()
            .map(|p| {
                let p: String = p.into();
                normalize(&p)
            })
            .filter(|p| !p.is_empty())
            .collect();
        Self { mode, paths }
    }

    /// Returns the matching mode.
    #[must_use]
    pub fn mode(&self) -> ExemptionMode {
        self.mode
    }

    /// Returns the normalized entries.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Whether `relative_path` is exempt.
    #[must_use]
    pub fn is_exempt(&self, relative_path: &Path) -> bool {
        self.matching_entry(relative_path).is_some()
    }

    /// Returns the first entry that exempts `relative_path`.
    #[must_use]
    pub fn matching_entry(&self, relative_path: &Path) -> Option<&str> {
        let path_str = slash_path(relative_path);
        self.paths
            .iter()
            .find(|entry| match self.mode {
                ExemptionMode::Substring => path_str.contains(entry.as_str()),
                ExemptionMode::Prefix => Path::new(&path_str).starts_with(entry.as_str()),
            })
            .map(String::as_str)
    }
}

/// Strips `./` and trailing slashes so entries compare as written.
fn normalize(entry: &str) -> String {
    let trimmed = entry.trim();
    let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
    trimmed.trim_end_matches('/').to_string()
}
