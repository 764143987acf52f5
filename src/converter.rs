//! Table-driven variant converter.

use std::collections::HashMap;

use crate::config::{
    ConversionTable,
    GroupSettings,
};
use crate::error::ConverterError;
use crate::language::Converter;

/// Replacement table for a single target variant.
#[derive(Debug, Default)]
struct VariantTable {
    /// Replacement by source text.
    replacements: HashMap<String, String>,
    /// Byte length of the longest key.
    longest_key: usize,
}

impl VariantTable {
    /// Builds the table, skipping empty keys.
    fn new(table: &ConversionTable) -> Self {
        let replacements: HashMap<String, String> = table
            .iter()
            .filter(|(from, _)| !from.is_empty())
            .map(|(from, to)| (from.clone(), to.clone()))
            .collect();
        let longest_key = replacements.keys().map(String::len).max().unwrap_or(0);
        Self { replacements, longest_key }
    }

    /// Longest-match replacement, left to right. Replaced text is not scanned again.
    fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;

        while let Some(rest) = text.get(pos..) {
            let Some(first) = rest.chars().next() else {
                break;
            };

            let upper = self.longest_key.min(rest.len());
            let matched = (1..=upper).rev().find_map(|len| {
                rest.get(..len).and_then(|key| self.replacements.get(key).map(|to| (len, to)))
            });

            if let Some((len, to)) = matched {
                out.push_str(to);
                pos += len;
            } else {
                out.push(first);
                pos += first.len_utf8();
            }
        }

        out
    }
}

/// Converts text by plain string replacement, one table per target variant.
///
/// Conversion markup such as `-{...}-` gets no special treatment: the markup
/// characters pass through untouched and the text inside them is replaced
/// like any other text.
#[derive(Debug, Default)]
pub struct TableConverter {
    /// Tables by target variant code.
    tables: HashMap<String, VariantTable>,
}

impl TableConverter {
    #[must_use]
    pub fn from_settings(group: &GroupSettings) -> Self {
        let tables = group
            .tables
            .iter()
            .map(|(variant, table)| (variant.clone(), VariantTable::new(table)))
            .collect();
        Self { tables }
    }
}

impl Converter for TableConverter {
    fn translate(&self, text: &str, variant: &str) -> Result<String, ConverterError> {
        Ok(self.tables.get(variant).map_or_else(|| text.to_string(), |table| table.apply(text)))
    }
}
