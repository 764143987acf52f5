//! Languages, their conversion groups, and the converter each group shares.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::{
    ConversionSettings,
    GroupSettings,
};
use crate::converter::TableConverter;
use crate::error::ConverterError;

/// Converts text between the variants of one conversion group.
///
/// Implementations must keep NUL-separated segments intact: the output of a
/// batch holds exactly as many `\0`-separated segments as the input, in the
/// same order.
pub trait Converter: Send + Sync + fmt::Debug {
    /// Translates `text` into `variant`.
    fn translate(&self, text: &str, variant: &str) -> Result<String, ConverterError>;
}

/// A conversion group: the parent language code and its converter.
#[derive(Debug)]
struct ConversionGroup {
    /// Code of the parent language (e.g. `zh`).
    root: Arc<str>,
    /// Converter reached through the parent language.
    converter: Arc<dyn Converter>,
}

/// A language or language variant.
///
/// Two languages are equal when their codes are equal.
#[derive(Clone)]
pub struct Language {
    /// Language code (e.g. `zh-tw`).
    code: Arc<str>,
    /// Conversion group, `None` if the language does not convert.
    group: Option<Arc<ConversionGroup>>,
}

impl Language {
    /// Creates a language that takes part in no conversion group.
    #[must_use]
    pub fn plain(code: &str) -> Self {
        Self { code: Arc::from(code), group: None }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the parent language, or `None` if this language does not
    /// support conversion. The parent of a group root is the root itself.
    #[must_use]
    pub fn parent_language(&self) -> Option<Self> {
        self.group
            .as_ref()
            .map(|group| Self { code: Arc::clone(&group.root), group: Some(Arc::clone(group)) })
    }

    /// Returns the converter of this language's group.
    #[must_use]
    pub fn converter(&self) -> Option<&Arc<dyn Converter>> {
        self.group.as_ref().map(|group| &group.converter)
    }
}

impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Language {}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Language")
            .field("code", &self.code)
            .field("parent", &self.group.as_ref().map(|group| &group.root))
            .finish()
    }
}

/// Builds [`Language`] values out of the configured conversion groups.
#[derive(Debug, Default)]
pub struct LanguageFactory {
    /// Conversion group by member code (the root included).
    groups: HashMap<String, Arc<ConversionGroup>>,
}

impl LanguageFactory {
    /// Creates a factory where every group converts with a [`TableConverter`]
    /// built from its configured tables.
    #[must_use]
    pub fn new(settings: &ConversionSettings) -> Self {
        Self::with_converters(settings, |group| Arc::new(TableConverter::from_settings(group)))
    }

    /// Creates a factory taking each group's converter from `make_converter`.
    #[must_use]
    pub fn with_converters<F>(settings: &ConversionSettings, mut make_converter: F) -> Self
    where
        F: FnMut(&GroupSettings) -> Arc<dyn Converter>,
    {
        let mut groups = HashMap::new();

        for group_settings in &settings.groups {
            let group = Arc::new(ConversionGroup {
                root: Arc::from(group_settings.root.as_str()),
                converter: make_converter(group_settings),
            });

            groups.insert(group_settings.root.clone(), Arc::clone(&group));
            for variant in &group_settings.variants {
                groups.entry(variant.clone()).or_insert_with(|| Arc::clone(&group));
            }
        }

        tracing::debug!("Language factory built with {} conversion groups", settings.groups.len());
        Self { groups }
    }

    /// Returns the language for `code`. Codes outside every group yield a
    /// language without a parent.
    #[must_use]
    pub fn language(&self, code: &str) -> Language {
        Language { code: Arc::from(code), group: self.groups.get(code).cloned() }
    }
}
