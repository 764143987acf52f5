use thiserror::Error;

/// Errors raised while resolving or running a variant conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// One of the languages has no parent language, so it cannot be converted.
    #[error("Either '{language}' or '{source_code}' does not support conversion")]
    Unsupported { language: String, source_code: String },

    /// Both languages convert, but in different conversion groups.
    #[error(
        "'{language}' (parent '{language_parent}') and '{source_code}' (parent '{source_parent}') do not share the same parent language"
    )]
    ParentMismatch {
        language: String,
        source_code: String,
        language_parent: String,
        source_parent: String,
    },

    /// Text handed to a converting language contains the batch separator.
    #[error("Text to translate must not contain a NUL byte")]
    ContainsDelimiter,

    /// The converter did not return one segment per input text.
    #[error("Converter returned {actual} segments for a batch of {expected}")]
    SegmentMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Converter(#[from] ConverterError),
}

/// Errors reported by a [`Converter`](crate::language::Converter).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConverterError {
    #[error("Variant conversion failed: {0}")]
    Failed(String),
}
