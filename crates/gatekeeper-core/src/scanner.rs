//! The scan engine: feeds every walked file to every rule.

use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::context::SourceFile;
use crate::error::ScanError;
use crate::exemption::{ExemptionMode, Exemptions};
use crate::rule::{Rule, RuleBox, RuleKind};
use crate::syntax::SyntaxTree;
use crate::types::{ScanReport, ScanWarning, Violation};
use crate::walker::{ScanRoot, SourceTree};

/// Builder for configuring a [`Scanner`].
#[derive(Default)]
pub struct ScannerBuilder {
    roots: Vec<ScanRoot>,
    rules: Vec<RuleBox>,
    config: Option<Config>,
    exemption_mode: Option<ExemptionMode>,
    fail_on_parse_error: Option<bool>,
}

impl ScannerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scan root. When none are added, roots come from the config.
    #[must_use]
    pub fn root(mut self, root: ScanRoot) -> Self {
        self.roots.push(root);
        self
    }

    /// Adds a rule. Registration order decides tie-breaks on a line.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules, keeping their order.
    #[must_use]
    pub fn rules<I: IntoIterator<Item = RuleBox>>(mut self, rules: I) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the configured exemption mode.
    #[must_use]
    pub fn exemption_mode(mut self, mode: ExemptionMode) -> Self {
        self.exemption_mode = Some(mode);
        self
    }

    /// Overrides the configured parse-error policy.
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = Some(fail);
        self
    }

    /// Builds the scanner.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Configuration`] if no rule was registered. A
    /// rule set emptied by configuration builds a scanner that always passes.
    pub fn build(self) -> Result<Scanner, ScanError> {
        if self.rules.is_empty() {
            return Err(ScanError::configuration("no rules registered for this scan"));
        }

        let config = self.config.unwrap_or_default();
        let mode = self.exemption_mode.unwrap_or(config.scan.exemption_mode);
        let fail_on_parse_error = self
            .fail_on_parse_error
            .unwrap_or(config.scan.fail_on_parse_error);

        let roots = if self.roots.is_empty() {
            config.scan.scan_roots()
        } else {
            self.roots
        };

        let mut rules = Vec::new();
        for rule in self.rules {
            if !config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }
            let exemptions = match config.rule_exemptions(rule.name()) {
                Some(paths) => Exemptions::new(mode, paths.iter().cloned()),
                None => Exemptions::new(mode, rule.default_exemptions().iter().copied()),
            };
            rules.push(ScanRule { rule, exemptions });
        }

        if rules.is_empty() {
            info!("Every registered rule is disabled by configuration; nothing to check");
        }

        Ok(Scanner {
            roots,
            rules,
            fail_on_parse_error,
        })
    }
}

/// A registered rule with its resolved allow-list.
struct ScanRule {
    rule: RuleBox,
    exemptions: Exemptions,
}

/// Walks scan roots, runs the rule set, and collects a [`ScanReport`].
///
/// Use [`Scanner::builder()`] to construct an instance. A scanner holds no
/// state between scans; every call to [`Scanner::scan`] starts a fresh walk.
pub struct Scanner {
    roots: Vec<ScanRoot>,
    rules: Vec<ScanRule>,
    fail_on_parse_error: bool,
}

impl Scanner {
    /// Creates a new builder for configuring a scanner.
    #[must_use]
    pub fn builder() -> ScannerBuilder {
        ScannerBuilder::new()
    }

    /// Scan roots this scanner visits.
    #[must_use]
    pub fn roots(&self) -> &[ScanRoot] {
        &self.roots
    }

    /// Names of the enabled rules, in registration order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.rule.name()).collect()
    }

    /// Returns the number of enabled rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Resolved allow-list for a rule, if the rule is enabled.
    #[must_use]
    pub fn exemptions_for(&self, rule_name: &str) -> Option<&Exemptions> {
        self.rules
            .iter()
            .find(|r| r.rule.name() == rule_name)
            .map(|r| &r.exemptions)
    }

    /// Scans `tree` and returns the full report.
    ///
    /// # Errors
    ///
    /// - [`ScanError::Configuration`] if a required root is missing or no
    ///   root exists at all. Checked before any file is read.
    /// - [`ScanError::Io`] if any file or directory cannot be read.
    /// - [`ScanError::Parse`] if a file cannot be parsed and the scanner was
    ///   built with `fail_on_parse_error`.
    pub fn scan(&self, tree: &dyn SourceTree) -> Result<ScanReport, ScanError> {
        let present = self.present_roots(tree)?;
        info!(
            "Starting scan over {} root(s) with {} rule(s)",
            present.len(),
            self.rules.len()
        );

        let mut report = ScanReport::new();
        report.rules = self
            .rule_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut seen: HashSet<PathBuf> = HashSet::new();
        for root in present {
            for file in tree.walk(root) {
                let file = file?;
                if !seen.insert(file.relative_path.clone()) {
                    continue;
                }
                self.scan_file(&file, &mut report)?;
            }
        }

        info!(
            "Scan complete: {} violation(s) in {} file(s)",
            report.violations.len(),
            report.files_scanned
        );

        Ok(report)
    }

    /// Scans one file and appends its findings to `report`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Parse`] under `fail_on_parse_error`.
    pub fn scan_file(&self, file: &SourceFile, report: &mut ScanReport) -> Result<(), ScanError> {
        debug!("Scanning: {}", file.relative_path.display());

        let applicable: Vec<&ScanRule> = self
            .rules
            .iter()
            .filter(|r| r.rule.applies_to(file))
            .filter(|r| match r.exemptions.matching_entry(&file.relative_path) {
                Some(entry) => {
                    debug!(
                        "{} exempt from {} via `{}`",
                        file.relative_path.display(),
                        r.rule.name(),
                        entry
                    );
                    false
                }
                None => true,
            })
            .collect();

        let tree = if applicable.iter().any(|r| r.rule.kind() == RuleKind::Syntax) {
            match SyntaxTree::parse(file) {
                Ok(tree) => Some(tree),
                Err(e) if self.fail_on_parse_error => return Err(e),
                Err(e) => {
                    warn!("{e}; skipping syntax rules for this file");
                    report.warnings.push(ScanWarning::new(
                        file.relative_path.clone(),
                        format!("{e}; syntax rules skipped, text rules still ran"),
                    ));
                    None
                }
            }
        } else {
            None
        };

        let mut violations: Vec<Violation> = Vec::new();
        for r in applicable {
            match r.rule.kind() {
                RuleKind::Text => violations.extend(r.rule.check(file, None)),
                RuleKind::Syntax => {
                    if let Some(tree) = &tree {
                        violations.extend(r.rule.check(file, Some(tree)));
                    }
                }
            }
        }

        // Stable: equal lines keep rule registration order.
        violations.sort_by_key(|v| v.location.line);
        report.violations.extend(violations);
        report.files_scanned += 1;
        Ok(())
    }

    fn present_roots<'a>(&'a self, tree: &dyn SourceTree) -> Result<Vec<&'a ScanRoot>, ScanError> {
        let mut present = Vec::new();
        for root in &self.roots {
            if tree.has_root(root) {
                present.push(root);
            } else if root.required {
                return Err(ScanError::configuration(format!(
                    "required scan root `{}` does not exist",
                    root.path.display()
                )));
            } else {
                debug!("Skipping missing optional root: {}", root.path.display());
            }
        }

        if present.is_empty() {
            let names: Vec<String> = self
                .roots
                .iter()
                .map(|r| r.path.display().to_string())
                .collect();
            return Err(ScanError::configuration(format!(
                "none of the scan roots exist: {}",
                names.join(", ")
            )));
        }
        Ok(present)
    }
}
