//! A target language, optionally converted from a source language.
//!
//! Conversion goes through the converter of the parent language both
//! languages share. Texts are converted in batches: callers announce texts
//! with [`LanguageWithConversion::prepare_for_translate`] and the next
//! [`LanguageWithConversion::translate`] that misses the cache converts the
//! whole pool with one converter call.

use std::collections::HashMap;

use indexmap::IndexSet;
use parking_lot::Mutex;

use crate::error::ConversionError;
use crate::language::Language;

/// Separator joining a batch into a single converter call.
pub const BATCH_SEPARATOR: &str = "\0";

/// Pending texts and finished translations, guarded together.
#[derive(Debug, Default)]
struct TranslateState {
    /// Texts waiting for the next batch, in insertion order.
    pool: IndexSet<String>,
    /// Translations by original text. Only grows.
    cache: HashMap<String, String>,
}

/// A language used for items of a language fallback chain: either a
/// language taken verbatim, or one whose data is fetched in a sibling
/// variant and converted.
///
/// Instances are obtained from [`ConversionRegistry`](crate::ConversionRegistry)
/// so that every caller asking for the same pair shares one pool and cache.
#[derive(Debug)]
pub struct LanguageWithConversion {
    language: Language,
    source_language: Option<Language>,
    /// Shared parent of `language` and `source_language`; `None` when there
    /// is nothing to convert.
    parent_language: Option<Language>,
    state: Mutex<TranslateState>,
}

impl LanguageWithConversion {
    pub(crate) fn new(
        language: Language,
        source_language: Option<Language>,
        parent_language: Option<Language>,
    ) -> Self {
        Self {
            language,
            source_language,
            parent_language,
            state: Mutex::new(TranslateState::default()),
        }
    }

    /// The language this object wraps.
    #[must_use]
    pub const fn language(&self) -> &Language {
        &self.language
    }

    #[must_use]
    pub const fn source_language(&self) -> Option<&Language> {
        self.source_language.as_ref()
    }

    /// The language data should be fetched in.
    #[must_use]
    pub fn fetch_language(&self) -> &Language {
        self.source_language.as_ref().unwrap_or(&self.language)
    }

    /// Whether [`translate`](Self::translate) actually converts text.
    #[must_use]
    pub const fn is_converted(&self) -> bool {
        self.parent_language.is_some()
    }

    /// Translates fetched data into this language.
    ///
    /// Cached texts are returned without calling the converter. Otherwise the
    /// text joins the pool and the whole pool is converted at once.
    pub fn translate(&self, text: &str) -> Result<String, ConversionError> {
        if self.parent_language.is_none() {
            return Ok(text.to_string());
        }
        check_separator(text)?;

        let mut state = self.state.lock();
        if let Some(translated) = state.cache.get(text) {
            tracing::trace!(language = self.language.code(), "Translation cache hit");
            return Ok(translated.clone());
        }

        state.pool.insert(text.to_string());
        self.execute_translate(&mut state)?;

        state.cache.get(text).cloned().ok_or(ConversionError::SegmentMismatch {
            expected: 1,
            actual: 0,
        })
    }

    /// Inserts a text snippet which will be translated later.
    ///
    /// The converter has a high per-call cost, so many short snippets are
    /// best converted together. Does nothing if this language does not
    /// convert or the text is already translated.
    pub fn prepare_for_translate(&self, text: &str) -> Result<(), ConversionError> {
        if self.parent_language.is_none() {
            return Ok(());
        }
        check_separator(text)?;

        let mut state = self.state.lock();
        if !state.cache.contains_key(text) {
            state.pool.insert(text.to_string());
        }
        Ok(())
    }

    /// Number of translations cached so far.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.state.lock().cache.len()
    }

    /// Number of texts waiting for the next batch.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.state.lock().pool.len()
    }

    /// Converts the whole pool with a single converter call.
    ///
    /// The pool is emptied up front; on failure none of its texts are cached.
    fn execute_translate(&self, state: &mut TranslateState) -> Result<(), ConversionError> {
        let Some(converter) = self.parent_language.as_ref().and_then(Language::converter) else {
            return Ok(());
        };
        if state.pool.is_empty() {
            return Ok(());
        }

        let pieces: Vec<String> = state.pool.drain(..).collect();
        let block = pieces.join(BATCH_SEPARATOR);

        tracing::debug!(
            language = self.language.code(),
            batch_size = pieces.len(),
            "Converting batch"
        );

        let translated_block =
            converter.translate(&block, self.language.code()).inspect_err(|err| {
                tracing::warn!(language = self.language.code(), %err, "Batch conversion failed");
            })?;

        let translated_pieces: Vec<&str> = translated_block.split(BATCH_SEPARATOR).collect();
        if translated_pieces.len() != pieces.len() {
            tracing::warn!(
                language = self.language.code(),
                expected = pieces.len(),
                actual = translated_pieces.len(),
                "Converter changed the number of segments"
            );
            return Err(ConversionError::SegmentMismatch {
                expected: pieces.len(),
                actual: translated_pieces.len(),
            });
        }

        for (piece, translated) in pieces.into_iter().zip(translated_pieces) {
            state.cache.entry(piece).or_insert_with(|| translated.to_string());
        }

        Ok(())
    }
}

/// Rejects text that would break batch demultiplexing.
fn check_separator(text: &str) -> Result<(), ConversionError> {
    if text.contains(BATCH_SEPARATOR) { Err(ConversionError::ContainsDelimiter) } else { Ok(()) }
}
