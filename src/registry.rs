//! Shared [`LanguageWithConversion`] instances.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::conversion::LanguageWithConversion;
use crate::error::ConversionError;
use crate::language::Language;

/// Registry key: target code and source code (empty without a source).
type RegistryKey = (String, String);

/// Hands out one [`LanguageWithConversion`] per `(language, source)` pair.
///
/// Every caller resolving the same pair gets the same instance, so texts
/// prepared by one caller are converted in the same batch as another
/// caller's, and translations are cached once. Owned by whoever serves a
/// request; [`clear`](Self::clear) drops every instance with its cache.
#[derive(Debug, Default)]
pub struct ConversionRegistry {
    instances: DashMap<RegistryKey, Arc<LanguageWithConversion>>,
}

impl ConversionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the instance for `language`, converted from `source` if given.
    ///
    /// # Errors
    /// - [`ConversionError::Unsupported`]: `language` or `source` has no parent language
    /// - [`ConversionError::ParentMismatch`]: the parent languages differ
    pub fn resolve(
        &self,
        language: &Language,
        source: Option<&Language>,
    ) -> Result<Arc<LanguageWithConversion>, ConversionError> {
        let source_code = source.map(Language::code).unwrap_or_default();
        let key = (language.code().to_string(), source_code.to_string());

        match self.instances.entry(key) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let parent = shared_parent(language, source)?;
                tracing::debug!(
                    language = language.code(),
                    source = ?source.map(Language::code),
                    parent = ?parent.as_ref().map(Language::code),
                    "Creating language with conversion"
                );

                let object = Arc::new(LanguageWithConversion::new(
                    language.clone(),
                    source.cloned(),
                    parent,
                ));
                entry.insert(Arc::clone(&object));
                Ok(object)
            }
        }
    }

    /// Number of instances created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Forgets every instance. Callers still holding one keep using it.
    pub fn clear(&self) {
        tracing::debug!(instances = self.instances.len(), "Clearing conversion registry");
        self.instances.clear();
    }
}

/// Parent language shared by `language` and `source`, `None` without a source.
fn shared_parent(
    language: &Language,
    source: Option<&Language>,
) -> Result<Option<Language>, ConversionError> {
    let Some(source) = source else {
        return Ok(None);
    };

    let (Some(parent), Some(source_parent)) = (language.parent_language(), source.parent_language())
    else {
        return Err(ConversionError::Unsupported {
            language: language.code().to_string(),
            source_code: source.code().to_string(),
        });
    };

    if parent != source_parent {
        return Err(ConversionError::ParentMismatch {
            language: language.code().to_string(),
            source_code: source.code().to_string(),
            language_parent: parent.code().to_string(),
            source_parent: source_parent.code().to_string(),
        });
    }

    Ok(Some(parent))
}
