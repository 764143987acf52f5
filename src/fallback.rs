//! Language fallback chains built from [`LanguageWithConversion`] items.

use std::collections::{
    HashMap,
    HashSet,
};
use std::hash::BuildHasher;
use std::sync::Arc;

use crate::config::ConversionSettings;
use crate::conversion::LanguageWithConversion;
use crate::error::ConversionError;
use crate::language::{
    Language,
    LanguageFactory,
};
use crate::registry::ConversionRegistry;

/// A value picked from a multilingual term list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferredValue {
    /// The value, converted into `language_code`.
    pub value: String,
    /// Language the value is presented in.
    pub language_code: String,
    /// Language the value was stored in, when it was converted.
    pub source_language_code: Option<String>,
}

/// Ordered list of languages to try when looking up a term.
#[derive(Debug, Clone, Default)]
pub struct FallbackChain {
    entries: Vec<Arc<LanguageWithConversion>>,
}

impl FallbackChain {
    /// Creates a chain; entries whose fetch language already appeared are dropped.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = Arc<LanguageWithConversion>>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.fetch_language().code().to_string()))
            .collect();
        Self { entries }
    }

    /// Builds the chain for `code`: the language itself, then every other
    /// variant of its conversion group converted into it, then `fallbacks`
    /// verbatim.
    pub fn for_language(
        registry: &ConversionRegistry,
        factory: &LanguageFactory,
        settings: &ConversionSettings,
        code: &str,
        fallbacks: &[&str],
    ) -> Result<Self, ConversionError> {
        let language = factory.language(code);
        let mut entries = vec![registry.resolve(&language, None)?];

        if let Some(group) = settings.group_of(code) {
            let siblings = std::iter::once(&group.root)
                .chain(group.variants.iter())
                .filter(|variant| variant.as_str() != code);
            for variant in siblings {
                let source = factory.language(variant);
                entries.push(registry.resolve(&language, Some(&source))?);
            }
        }

        for fallback in fallbacks {
            entries.push(registry.resolve(&factory.language(fallback), None)?);
        }

        Ok(Self::new(entries))
    }

    #[must_use]
    pub fn entries(&self) -> &[Arc<LanguageWithConversion>] {
        &self.entries
    }

    /// Picks the value of the first entry with data in `values` (keyed by
    /// language code) and converts it.
    pub fn extract_preferred_value<S: BuildHasher>(
        &self,
        values: &HashMap<String, String, S>,
    ) -> Result<Option<PreferredValue>, ConversionError> {
        Ok(self.extract_preferred_values(std::slice::from_ref(values))?.into_iter().flatten().next())
    }

    /// Like [`extract_preferred_value`](Self::extract_preferred_value) for
    /// many term lists at once. Every picked value is prepared before any is
    /// translated, so each converted language makes a single converter call.
    pub fn extract_preferred_values<S: BuildHasher>(
        &self,
        term_lists: &[HashMap<String, String, S>],
    ) -> Result<Vec<Option<PreferredValue>>, ConversionError> {
        let picks: Vec<_> = term_lists.iter().map(|values| self.pick(values)).collect();

        for (entry, value) in picks.iter().flatten() {
            entry.prepare_for_translate(value)?;
        }

        picks
            .into_iter()
            .map(|pick| {
                pick.map(|(entry, value)| {
                    Ok(PreferredValue {
                        value: entry.translate(value)?,
                        language_code: entry.language().code().to_string(),
                        source_language_code: entry
                            .source_language()
                            .map(|source| source.code().to_string()),
                    })
                })
                .transpose()
            })
            .collect()
    }

    /// First entry whose fetch language has a value, with that value.
    fn pick<'a, S: BuildHasher>(
        &'a self,
        values: &'a HashMap<String, String, S>,
    ) -> Option<(&'a Arc<LanguageWithConversion>, &'a str)> {
        self.entries.iter().find_map(|entry| {
            let fetch: &Language = entry.fetch_language();
            values.get(fetch.code()).map(|value| (entry, value.as_str()))
        })
    }
}
