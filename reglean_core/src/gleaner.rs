//! The gleaner: named patterns searched against filenames.
//!
//! Each category pairs a name with a regex. Gleaning runs every pattern
//! against an input string and collects the text of the first capture
//! group, passed through the category's translations and optional cast.
//! Patterns must wrap the wanted substring in their first parenthesized
//! group; any further groups are ignored.

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, trace};

use crate::config::GleanerConfig;
use crate::error::{GleanError, Result};
use crate::translate::{SubFlags, Translate, TranslationTable};
use crate::value::{Cast, Value};

/// Result of a glean: every category name mapped to its value, or to the
/// fill value when nothing was found. Keys follow category order.
pub type Gleaned = IndexMap<String, Option<Value>>;

/// A registered category.
#[derive(Debug, Clone)]
pub struct Category {
    pattern: String,
    cast: Option<Cast>,
    compiled: OnceCell<Regex>,
}

impl Category {
    fn new(pattern: String, cast: Option<Cast>) -> Self {
        Self {
            pattern,
            cast,
            compiled: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub const fn cast(&self) -> Option<&Cast> {
        self.cast.as_ref()
    }

    fn regex(&self) -> Result<&Regex> {
        self.compiled.get_or_try_init(|| {
            debug!(pattern = %self.pattern, "compiling category pattern");
            Regex::new(&self.pattern).map_err(|e| GleanError::pattern(&self.pattern, e))
        })
    }

    /// Text of the first capture group of the first match, if any.
    fn search<'h>(&self, input: &'h str) -> Result<Option<&'h str>> {
        let re = self.regex()?;
        Ok(re
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str()))
    }
}

/// Extracts metadata from filenames using named regex categories.
///
/// ```
/// use reglean_core::Gleaner;
///
/// let gleaner = Gleaner::new([("temp", r"([0-9]+)K")]);
/// let gleaned = gleaner.glean("/path/to/file/temp=295K").unwrap();
/// assert_eq!(gleaned["temp"], Some("295".into()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Gleaner {
    categories: IndexMap<String, Category>,
    translations: HashMap<String, TranslationTable>,
}

impl Gleaner {
    /// Create a gleaner from `(name, pattern)` pairs.
    #[must_use]
    pub fn new<I, K, V>(categories: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut gleaner = Self::default();
        for (name, pattern) in categories {
            gleaner.add_category(name, pattern);
        }
        gleaner
    }

    /// Build a gleaner from its serializable configuration.
    ///
    /// # Errors
    /// Returns [`GleanError::InvalidArgument`] if a translation entry is
    /// incomplete. Patterns are not compiled here.
    pub fn from_config(config: &GleanerConfig) -> Result<Self> {
        let mut gleaner = Self::default();
        for (name, def) in &config.categories {
            gleaner.insert_category(name.clone(), def.pattern().to_string(), def.cast());
        }
        for (name, requests) in &config.translations {
            for request in requests {
                gleaner.translate(name, request.clone())?;
            }
        }
        Ok(gleaner)
    }

    /// Add or replace a category.
    ///
    /// The pattern is compiled on first use, so an invalid pattern only
    /// surfaces when gleaning or validating.
    pub fn add_category(&mut self, name: impl Into<String>, pattern: impl Into<String>) {
        self.insert_category(name.into(), pattern.into(), None);
    }

    /// Add or replace a category whose value is converted by `cast`.
    pub fn add_category_with_cast(
        &mut self,
        name: impl Into<String>,
        pattern: impl Into<String>,
        cast: Cast,
    ) {
        self.insert_category(name.into(), pattern.into(), Some(cast));
    }

    fn insert_category(&mut self, name: String, pattern: String, cast: Option<Cast>) {
        debug!(category = %name, pattern = %pattern, "adding category");
        self.translations.entry(name.clone()).or_default();
        self.categories.insert(name, Category::new(pattern, cast));
    }

    /// Remove a category by name. Its translations are kept.
    pub fn remove_category(&mut self, name: &str) {
        if self.categories.shift_remove(name).is_some() {
            debug!(category = %name, "removed category");
        }
    }

    /// Register a translation rule for `category`.
    ///
    /// # Errors
    /// Returns [`GleanError::InvalidArgument`] if the request lacks the
    /// fields its mode requires.
    pub fn translate(&mut self, category: &str, request: Translate) -> Result<()> {
        request.validate()?;
        debug!(category, regex = request.regex, "adding translation");
        self.translations
            .entry(category.to_string())
            .or_default()
            .insert(request);
        Ok(())
    }

    /// Map `value` to `translation` whenever `category` gleans exactly `value`.
    pub fn translate_literal(
        &mut self,
        category: &str,
        value: impl Into<String>,
        translation: impl Into<String>,
    ) {
        self.translations
            .entry(category.to_string())
            .or_default()
            .insert_literal(value.into(), translation.into());
    }

    /// Append a substitution of every `pattern` match with `repl`.
    pub fn regex_sub(
        &mut self,
        category: &str,
        pattern: impl Into<String>,
        repl: impl Into<String>,
    ) {
        self.translations
            .entry(category.to_string())
            .or_default()
            .insert_sub(pattern.into(), &repl.into(), 0, SubFlags::default());
    }

    /// Glean `input`, leaving unmatched categories as `None`.
    ///
    /// # Errors
    /// Returns [`GleanError::Pattern`] for an invalid search or
    /// substitution pattern, and [`GleanError::Cast`] when a category's
    /// cast rejects its value.
    pub fn glean(&self, input: &str) -> Result<Gleaned> {
        self.glean_with(input, None)
    }

    /// Glean `input`, using `fill` for categories without a value.
    ///
    /// # Errors
    /// See [`Gleaner::glean`].
    pub fn glean_or(&self, input: &str, fill: impl Into<Value>) -> Result<Gleaned> {
        self.glean_with(input, Some(fill.into()))
    }

    /// Glean `input` with an optional fill value.
    ///
    /// # Errors
    /// See [`Gleaner::glean`].
    pub fn glean_with(&self, input: &str, fill: Option<Value>) -> Result<Gleaned> {
        let mut result = Gleaned::with_capacity(self.categories.len());

        for (name, category) in &self.categories {
            let value = match category.search(input)? {
                Some(raw) => Some(self.finish(name, category, raw)?),
                None => fill.clone(),
            };
            trace!(category = %name, value = ?value, "gleaned");
            result.insert(name.clone(), value);
        }

        Ok(result)
    }

    fn finish(&self, name: &str, category: &Category, raw: &str) -> Result<Value> {
        let translated = match self.translations.get(name) {
            Some(table) => table.apply(raw)?,
            None => raw.to_string(),
        };
        category.cast.as_ref().map_or_else(
            || Ok(Value::Text(translated.clone())),
            |cast| {
                cast.apply(&translated).map_err(|source| GleanError::Cast {
                    category: name.to_string(),
                    source,
                })
            },
        )
    }

    /// Whether at least one category finds a value in `input`.
    ///
    /// # Errors
    /// See [`Gleaner::glean`].
    pub fn gleanable(&self, input: &str) -> Result<bool> {
        Ok(self.glean(input)?.values().any(Option::is_some))
    }

    /// Compile every search and substitution pattern.
    ///
    /// # Errors
    /// Returns the first [`GleanError::Pattern`] encountered.
    pub fn validate(&self) -> Result<()> {
        for (name, category) in &self.categories {
            category.regex()?;
            if let Some(table) = self.translations.get(name) {
                table.validate()?;
            }
        }
        Ok(())
    }

    /// Category names and patterns in registration order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.categories.iter().map(|(n, c)| (n.as_str(), c))
    }

    #[must_use]
    pub fn pattern(&self, name: &str) -> Option<&str> {
        self.categories.get(name).map(Category::pattern)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    /// Translation tables for `name`, which may outlive the category.
    #[must_use]
    pub fn translations(&self, name: &str) -> Option<&TranslationTable> {
        self.translations.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
