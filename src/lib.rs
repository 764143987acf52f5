//! language-conversion
//!
//! 言語バリアントの取得言語の解決と、バッチ化・メモ化された変換

pub mod config;
pub mod conversion;
pub mod converter;
pub mod error;
pub mod fallback;
pub mod language;
pub mod registry;

#[cfg(test)]
mod test_utils;

pub use conversion::LanguageWithConversion;
pub use error::{
    ConversionError,
    ConverterError,
};
pub use fallback::{
    FallbackChain,
    PreferredValue,
};
pub use language::{
    Converter,
    Language,
    LanguageFactory,
};
pub use registry::ConversionRegistry;
