//! Configuration types for gatekeeper.
//!
//! Every value has a compiled-in default; `gatekeeper.toml` only overrides.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::exemption::ExemptionMode;
use crate::walker::{ScanRoot, DEFAULT_EXCLUDED_DIRS, DEFAULT_EXTENSIONS};

/// Scan roots visited by default, relative to the project base.
pub const DEFAULT_ROOTS: &[&str] = &["app", "components", "lib", "src", "pages", "hooks"];

/// Top-level configuration for gatekeeper.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Walker and engine settings.
    #[serde(default)]
    pub scan: ScanConfig,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Exemption entries configured for a rule, replacing its defaults.
    #[must_use]
    pub fn rule_exemptions(&self, rule_name: &str) -> Option<&[String]> {
        self.rules
            .get(rule_name)
            .and_then(|c| c.exempt.as_deref())
    }
}

/// Walker and engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Optional scan roots; missing ones are skipped.
    #[serde(default = "default_roots")]
    pub roots: Vec<String>,

    /// Scan roots that must exist.
    #[serde(default)]
    pub required_roots: Vec<String>,

    /// Directory names never descended into.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// File extensions to visit.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// How exemption entries match paths.
    #[serde(default)]
    pub exemption_mode: ExemptionMode,

    /// Abort instead of skipping syntax rules when a file cannot be parsed.
    #[serde(default)]
    pub fail_on_parse_error: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            roots: default_roots(),
            required_roots: Vec::new(),
            exclude_dirs: default_exclude_dirs(),
            extensions: default_extensions(),
            exemption_mode: ExemptionMode::default(),
            fail_on_parse_error: false,
        }
    }
}

impl ScanConfig {
    /// Builds the scan roots: optional roots first, then required roots not
    /// already listed. A root listed in both is required.
    #[must_use]
    pub fn scan_roots(&self) -> Vec<ScanRoot> {
        let mut names: Vec<&String> = self.roots.iter().collect();
        for r in &self.required_roots {
            if !names.contains(&r) {
                names.push(r);
            }
        }

        names
            .into_iter()
            .map(|name| {
                ScanRoot::new(PathBuf::from(name))
                    .required(self.required_roots.contains(name))
                    .extensions(self.extensions.iter().cloned())
                    .exclude_dirs(self.exclude_dirs.iter().cloned())
            })
            .collect()
    }
}

fn default_roots() -> Vec<String> {
    DEFAULT_ROOTS.iter().map(|s| (*s).to_string()).collect()
}

fn default_exclude_dirs() -> Vec<String> {
    DEFAULT_EXCLUDED_DIRS
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_string()).collect()
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Exempt paths, replacing the rule's defaults.
    #[serde(default)]
    pub exempt: Option<Vec<String>>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scan.roots, DEFAULT_ROOTS);
        assert_eq!(config.scan.exemption_mode, ExemptionMode::Substring);
        assert!(!config.scan.fail_on_parse_error);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[scan]
roots = ["app"]
required_roots = ["src"]
exemption_mode = "prefix"

[rules.hardcoded-value]
exempt = ["src/theme"]

[rules.motion-import]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.scan.exemption_mode, ExemptionMode::Prefix);
        assert_eq!(config.scan.extensions, DEFAULT_EXTENSIONS);
        assert!(config.is_rule_enabled("hardcoded-value"));
        assert!(!config.is_rule_enabled("motion-import"));
        assert!(config.is_rule_enabled("client-directive"));
        assert_eq!(
            config.rule_exemptions("hardcoded-value"),
            Some(&["src/theme".to_string()][..])
        );
        assert_eq!(config.rule_exemptions("motion-import"), None);
    }

    #[test]
    fn test_scan_roots_mark_required() {
        let scan = ScanConfig {
            roots: vec!["app".into(), "src".into()],
            required_roots: vec!["src".into(), "lib".into()],
            ..ScanConfig::default()
        };
        let roots = scan.scan_roots();
        let summary: Vec<(String, bool)> = roots
            .iter()
            .map(|r| (r.path.display().to_string(), r.required))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("app".to_string(), false),
                ("src".to_string(), true),
                ("lib".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = Config::parse("[scan]\nrootz = [\"src\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
