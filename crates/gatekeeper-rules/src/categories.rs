//! Rule categories: the named rule sets a gate can run.

use std::fmt;
use std::str::FromStr;

use gatekeeper_core::{Config, RuleBox, ScanError};

use crate::{
    ClientDirective, CompilerSuppression, EscapeHatchAssertion, ExplicitAny, HardcodedValue,
    MotionImport,
};

/// A named rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Design token discipline.
    Tokens,
    /// Animation library boundaries.
    Motion,
    /// Server/client component boundaries.
    Client,
    /// Type-safety escape hatches.
    Types,
}

impl Category {
    /// Every category, in gate order.
    pub const ALL: [Self; 4] = [Self::Tokens, Self::Motion, Self::Client, Self::Types];

    /// Returns the category name used on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Tokens => "tokens",
            Self::Motion => "motion",
            Self::Client => "client",
            Self::Types => "types",
        }
    }

    /// Returns a one-line description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Tokens => "Colors and spacing come from design tokens",
            Self::Motion => "Animation libraries stay behind the motion module",
            Self::Client => "Client-only features require 'use client'",
            Self::Types => "No escape hatches out of the type system",
        }
    }

    /// Returns the rules of this category, in code order.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Tokens => vec![Box::new(HardcodedValue::new())],
            Self::Motion => vec![Box::new(MotionImport::new())],
            Self::Client => vec![Box::new(ClientDirective::new())],
            Self::Types => vec![
                Box::new(ExplicitAny::new()),
                Box::new(EscapeHatchAssertion::new()),
                Box::new(CompilerSuppression::new()),
            ],
        }
    }

    /// Category a rule belongs to.
    #[must_use]
    pub fn of_rule(rule_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.rules().iter().any(|r| r.name() == rule_name))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|c| c.name()).collect();
                ScanError::configuration(format!(
                    "unknown category `{s}` (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

/// Returns every built-in rule, in code order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    Category::ALL.into_iter().flat_map(Category::rules).collect()
}

/// Returns the rules for `category`, or all rules for `None`.
#[must_use]
pub fn rules_for(category: Option<Category>) -> Vec<RuleBox> {
    category.map_or_else(all_rules, Category::rules)
}

/// `[rules.<name>]` keys in `config` that name no built-in rule.
#[must_use]
pub fn unknown_rule_keys(config: &Config) -> Vec<&str> {
    config
        .rules
        .keys()
        .map(String::as_str)
        .filter(|name| Category::of_rule(name).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_rules_are_in_code_order() {
        let codes: Vec<&str> = all_rules().iter().map(|r| r.code()).collect();
        assert_eq!(
            codes,
            vec!["GK001", "GK002", "GK003", "GK004", "GK005", "GK006"]
        );
    }

    #[test]
    fn every_rule_has_description_and_guidance() {
        for rule in all_rules() {
            assert!(!rule.description().is_empty(), "{}", rule.name());
            assert!(!rule.guidance().is_empty(), "{}", rule.name());
        }
    }

    #[test]
    fn parses_category_names() {
        assert_eq!("tokens".parse::<Category>().unwrap(), Category::Tokens);
        assert_eq!("TYPES".parse::<Category>().unwrap(), Category::Types);
        let err = "colors".parse::<Category>().unwrap_err();
        assert!(matches!(err, ScanError::Configuration { .. }));
        assert!(err.to_string().contains("tokens, motion, client, types"));
    }

    #[test]
    fn finds_category_of_rule() {
        assert_eq!(Category::of_rule("explicit-any"), Some(Category::Types));
        assert_eq!(Category::of_rule("motion-import"), Some(Category::Motion));
        assert_eq!(Category::of_rule("nope"), None);
    }

    #[test]
    fn only_misspelled_rule_keys_are_unknown() {
        let config = Config::parse(
            "[rules.hardcoded-value]\nenabled = true\n\n[rules.motion-import]\nexempt = []\n\n[rules.explict-any]\nenabled = false\n",
        )
        .unwrap();
        assert_eq!(unknown_rule_keys(&config), vec!["explict-any"]);
        assert!(unknown_rule_keys(&Config::default()).is_empty());
    }

    #[test]
    fn rules_for_none_is_everything() {
        assert_eq!(rules_for(None).len(), 6);
        assert_eq!(rules_for(Some(Category::Types)).len(), 3);
    }
}
