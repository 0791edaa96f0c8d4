//! Translation rules applied to gleaned values.
//!
//! A category owns two tables: exact literal translations, and an ordered
//! chain of regex substitutions run after the literal lookup.

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

use crate::error::{GleanError, Result};
use crate::template;

/// Match flags for a substitution rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubFlags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
    pub ignore_whitespace: bool,
    /// Restrict `\w`, `\d` and friends to ASCII.
    pub ascii: bool,
}

impl SubFlags {
    #[must_use]
    pub const fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    #[must_use]
    pub const fn multi_line(mut self) -> Self {
        self.multi_line = true;
        self
    }

    #[must_use]
    pub const fn dot_matches_new_line(mut self) -> Self {
        self.dot_matches_new_line = true;
        self
    }

    #[must_use]
    pub const fn ignore_whitespace(mut self) -> Self {
        self.ignore_whitespace = true;
        self
    }

    #[must_use]
    pub const fn ascii(mut self) -> Self {
        self.ascii = true;
        self
    }

    fn build(self, pattern: &str) -> Result<Regex> {
        RegexBuilder::new(pattern)
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .ignore_whitespace(self.ignore_whitespace)
            .unicode(!self.ascii)
            .build()
            .map_err(|e| GleanError::pattern(pattern, e))
    }
}

/// A request to register a translation rule.
///
/// Mirrors the loosely typed shape that configuration files use: fields
/// are optional and the combination is checked by [`Translate::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(default)]
    pub regex: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repl: Option<String>,
    /// Maximum replacements per rule; 0 replaces every occurrence.
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub flags: SubFlags,
}

impl Translate {
    /// Literal mode: replace `value` with `translation` on exact match.
    #[must_use]
    pub fn literal(value: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            translation: Some(translation.into()),
            ..Self::default()
        }
    }

    /// Regex mode: substitute matches of `pattern` with `repl`.
    #[must_use]
    pub fn regex(pattern: impl Into<String>, repl: impl Into<String>) -> Self {
        Self {
            regex: true,
            pattern: Some(pattern.into()),
            repl: Some(repl.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub const fn flags(mut self, flags: SubFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Check that the fields required by the chosen mode are present.
    ///
    /// # Errors
    /// Returns [`GleanError::InvalidArgument`] when a required field is
    /// missing.
    pub fn validate(&self) -> Result<()> {
        if self.regex {
            if self.pattern.is_none() || self.repl.is_none() {
                return Err(GleanError::invalid_argument(
                    "must pass both a pattern and repl when regex is true",
                ));
            }
        } else if self.value.is_none() || self.translation.is_none() {
            return Err(GleanError::invalid_argument(
                "must pass both a value and translation",
            ));
        }
        Ok(())
    }
}

/// One compiled-on-demand substitution rule.
#[derive(Debug, Clone)]
pub struct RegexSub {
    repl: String,
    count: usize,
    flags: SubFlags,
    compiled: OnceCell<Regex>,
}

impl RegexSub {
    fn new(repl: &str, count: usize, flags: SubFlags) -> Self {
        Self {
            repl: template::normalize(repl),
            count,
            flags,
            compiled: OnceCell::new(),
        }
    }

    /// The replacement template in regex crate syntax.
    #[must_use]
    pub fn repl(&self) -> &str {
        &self.repl
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn flags(&self) -> SubFlags {
        self.flags
    }

    fn regex(&self, pattern: &str) -> Result<&Regex> {
        self.compiled.get_or_try_init(|| self.flags.build(pattern))
    }

    fn apply(&self, pattern: &str, value: &str) -> Result<String> {
        let re = self.regex(pattern)?;
        Ok(re
            .replacen(value, self.count, self.repl.as_str())
            .into_owned())
    }
}

/// Translation tables for a single category.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    literals: HashMap<String, String>,
    subs: IndexMap<String, RegexSub>,
}

impl TranslationTable {
    /// Register a request already checked by [`Translate::validate`].
    pub(crate) fn insert(&mut self, request: Translate) {
        let Translate {
            value,
            translation,
            regex,
            pattern,
            repl,
            count,
            flags,
        } = request;

        if regex {
            if let (Some(pattern), Some(repl)) = (pattern, repl) {
                self.insert_sub(pattern, &repl, count, flags);
            }
        } else if let (Some(value), Some(translation)) = (value, translation) {
            self.insert_literal(value, translation);
        }
    }

    pub(crate) fn insert_literal(&mut self, value: String, translation: String) {
        self.literals.insert(value, translation);
    }

    pub(crate) fn insert_sub(&mut self, pattern: String, repl: &str, count: usize, flags: SubFlags) {
        self.subs.insert(pattern, RegexSub::new(repl, count, flags));
    }

    /// Run the literal lookup, then every substitution in order.
    pub(crate) fn apply(&self, gleaned: &str) -> Result<String> {
        let mut translated = self
            .literals
            .get(gleaned)
            .map_or_else(|| gleaned.to_string(), Clone::clone);

        for (pattern, sub) in &self.subs {
            translated = sub.apply(pattern, &translated)?;
            trace!(pattern = %pattern, value = %translated, "applied substitution");
        }
        Ok(translated)
    }

    /// Compile every substitution pattern.
    pub(crate) fn validate(&self) -> Result<()> {
        for (pattern, sub) in &self.subs {
            sub.regex(pattern)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn literal(&self, value: &str) -> Option<&str> {
        self.literals.get(value).map(String::as_str)
    }

    /// Substitution rules in application order.
    pub fn subs(&self) -> impl Iterator<Item = (&str, &RegexSub)> {
        self.subs.iter().map(|(p, s)| (p.as_str(), s))
    }

    #[must_use]
    pub fn literal_count(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn sub_count(&self) -> usize {
        self.subs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty() && self.subs.is_empty()
    }

    /// Short human readable summary, e.g. `2 literal, 1 regex`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} literal, {} regex",
            self.literals.len(),
            self.subs.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_requires_value_and_translation() {
        let err = Translate {
            value: Some("300".into()),
            ..Translate::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, GleanError::InvalidArgument(_)));
        assert!(Translate::default().validate().is_err());
    }

    #[test]
    fn regex_requires_pattern_and_repl() {
        let missing_repl = Translate {
            regex: true,
            pattern: Some(".*".into()),
            ..Translate::default()
        };
        assert!(matches!(
            missing_repl.validate(),
            Err(GleanError::InvalidArgument(_))
        ));
        // literal fields do not satisfy regex mode
        let literal_only = Translate {
            regex: true,
            ..Translate::literal("a", "b")
        };
        assert!(literal_only.validate().is_err());
    }

    #[test]
    fn literal_lookup_is_exact() {
        let mut table = TranslationTable::default();
        assert!(table.is_empty());
        table.insert(Translate::literal("dn", "down"));
        assert_eq!(table.literal("dn"), Some("down"));
        assert_eq!(table.literal("down"), None);
        assert_eq!(table.literal_count(), 1);
        assert!(!table.is_empty());
        assert_eq!(table.apply("dn").unwrap(), "down");
        assert_eq!(table.apply("dnx").unwrap(), "dnx");
        assert_eq!(table.apply("DN").unwrap(), "DN");
    }

    #[test]
    fn substitutions_chain_in_order() {
        let mut table = TranslationTable::default();
        table.insert(Translate::regex("a", "b"));
        table.insert(Translate::regex("b", "c"));
        assert_eq!(table.apply("aab").unwrap(), "ccc");
        assert_eq!(table.sub_count(), 2);
    }

    #[test]
    fn reregistered_pattern_keeps_its_position() {
        let mut table = TranslationTable::default();
        table.insert(Translate::regex("a", "b"));
        table.insert(Translate::regex("b", "c"));
        table.insert(Translate::regex("a", "x"));
        let order: Vec<_> = table.subs().map(|(p, _)| p).collect();
        assert_eq!(order, ["a", "b"]);
        assert_eq!(table.apply("ab").unwrap(), "xc");
    }

    #[test]
    fn count_limits_replacements() {
        let mut table = TranslationTable::default();
        table.insert(Translate::regex("o", "0").count(1));
        assert_eq!(table.apply("foo").unwrap(), "f0o");
    }

    #[test]
    fn flags_reach_the_regex() {
        let mut table = TranslationTable::default();
        table.insert(
            Translate::regex("^down$", "dn").flags(SubFlags::default().case_insensitive()),
        );
        assert_eq!(table.apply("DOWN").unwrap(), "dn");
    }

    fn substitute(pattern: &str, flags: SubFlags, value: &str) -> String {
        let mut table = TranslationTable::default();
        table.insert(Translate::regex(pattern, "X").flags(flags));
        table.apply(value).unwrap()
    }

    #[test]
    fn multi_line_anchors_at_line_starts() {
        assert_eq!(substitute("^b", SubFlags::default(), "a\nb"), "a\nb");
        assert_eq!(
            substitute("^b", SubFlags::default().multi_line(), "a\nb"),
            "a\nX"
        );
    }

    #[test]
    fn dot_matches_new_line_spans_lines() {
        assert_eq!(substitute("a.b", SubFlags::default(), "a\nb"), "a\nb");
        assert_eq!(
            substitute("a.b", SubFlags::default().dot_matches_new_line(), "a\nb"),
            "X"
        );
    }

    #[test]
    fn ignore_whitespace_drops_pattern_spaces() {
        assert_eq!(substitute("a b", SubFlags::default(), "ab"), "ab");
        assert_eq!(
            substitute("a b", SubFlags::default().ignore_whitespace(), "ab"),
            "X"
        );
    }

    #[test]
    fn ascii_restricts_word_class() {
        assert_eq!(substitute(r"\w", SubFlags::default(), "é"), "X");
        assert_eq!(substitute(r"\w", SubFlags::default().ascii(), "é"), "é");
    }

    #[test]
    fn stored_rule_reports_normalized_settings() {
        let mut table = TranslationTable::default();
        let flags = SubFlags::default().multi_line();
        table.insert(Translate::regex(r"(0)\.(3)", r"\1..\2").count(1).flags(flags));

        let (pattern, sub) = table.subs().next().unwrap();
        assert_eq!(pattern, r"(0)\.(3)");
        assert_eq!(sub.repl(), "${1}..${2}");
        assert_eq!(sub.count(), 1);
        assert_eq!(sub.flags(), flags);
    }

    #[test]
    fn invalid_substitution_pattern_surfaces_on_use() {
        let mut table = TranslationTable::default();
        table.insert(Translate::regex("(unclosed", "x"));
        assert!(matches!(
            table.apply("value"),
            Err(GleanError::Pattern { .. })
        ));
        assert!(table.validate().is_err());
    }

    #[test]
    fn translate_request_deserializes_with_defaults() {
        let t: Translate =
            serde_json::from_str(r#"{"regex": true, "pattern": "x", "repl": "y"}"#).unwrap();
        assert_eq!(t, Translate::regex("x", "y"));
        assert_eq!(t.flags, SubFlags::default());
    }
}
