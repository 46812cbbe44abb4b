//! Shared helpers for line-oriented text rules.

use gatekeeper_core::{Rule, SourceFile, Violation};
use regex::Regex;

/// Compiles a built-in pattern.
///
/// Only used for literals in this crate, which are covered by tests.
#[allow(clippy::expect_used)]
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern must compile")
}

/// A hit on one line: byte offset of the match and the violation message.
pub(crate) struct LineHit {
    pub offset: usize,
    pub message: String,
}

impl LineHit {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// Runs `find` on every line and emits at most one violation per line.
///
/// The column is the 1-indexed character position of the hit.
pub(crate) fn scan_lines<R, F>(rule: &R, file: &SourceFile, find: F) -> Vec<Violation>
where
    R: Rule + ?Sized,
    F: Fn(&str) -> Option<LineHit>,
{
    file.lines()
        .filter_map(|(line_no, line)| {
            let hit = find(line)?;
            let location = file
                .location(line_no)
                .with_column(char_column(line, hit.offset));
            Some(Violation::for_rule(rule, location, hit.message))
        })
        .collect()
}

/// 1-indexed character column of byte `offset` in `line`.
pub(crate) fn char_column(line: &str, offset: usize) -> usize {
    line.get(..offset).map_or(offset, |prefix| prefix.chars().count()) + 1
}

/// Start of capture group 1 if the pattern has one, else of the whole match,
/// together with the matched text.
pub(crate) fn first_capture<'a>(re: &Regex, line: &'a str) -> Option<(usize, &'a str)> {
    let caps = re.captures(line)?;
    let m = caps.get(1).or_else(|| caps.get(0))?;
    Some((m.start(), m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_count_characters() {
        assert_eq!(char_column("abc", 0), 1);
        assert_eq!(char_column("color: #fff", 7), 8);
        assert_eq!(char_column("é #fff", 3), 3);
    }

    #[test]
    fn first_capture_prefers_group_one() {
        let re = compile(r"x(y+)");
        assert_eq!(first_capture(&re, "axyy"), Some((2, "yy")));
        let plain = compile(r"zz");
        assert_eq!(first_capture(&plain, "azz"), Some((1, "zz")));
        assert_eq!(first_capture(&plain, "abc"), None);
    }
}
