use std::collections::{
    BTreeMap,
    HashSet,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "groups[0].variants[1]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replacement table for one target variant: text to find, text to put instead.
pub type ConversionTable = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionSettings {
    /// Conversion groups. A language outside every group does not convert.
    pub groups: Vec<GroupSettings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupSettings {
    /// Parent language code shared by every variant of the group.
    pub root: String,

    /// Variant codes in the group. The root is always a member, listed or not.
    pub variants: Vec<String>,

    /// Tables keyed by target variant code.
    pub tables: BTreeMap<String, ConversionTable>,
}

impl GroupSettings {
    #[must_use]
    pub fn new(root: &str, variants: &[&str]) -> Self {
        Self {
            root: root.to_string(),
            variants: variants.iter().copied().map(String::from).collect(),
            tables: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) the table used when converting into `variant`.
    #[must_use]
    pub fn with_table<'a>(
        mut self,
        variant: &str,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let table = pairs.into_iter().map(|(from, to)| (from.to_string(), to.to_string())).collect();
        self.tables.insert(variant.to_string(), table);
        self
    }

    /// Returns true if `code` is the root or one of the listed variants.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.root == code || self.variants.iter().any(|v| v == code)
    }
}

impl ConversionSettings {
    /// # Errors
    /// - Empty root or variant list
    /// - A code claimed by two groups
    /// - A table for a variant outside its group
    /// - Empty or NUL-containing table entries
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut claimed: HashSet<&str> = HashSet::new();

        for (group_index, group) in self.groups.iter().enumerate() {
            let path = format!("groups[{group_index}]");

            if group.root.is_empty() {
                errors.push(ValidationError::new(
                    format!("{path}.root"),
                    "The root cannot be empty. Example: \"zh\"",
                ));
            }

            if group.variants.is_empty() {
                errors.push(ValidationError::new(
                    format!("{path}.variants"),
                    "At least one variant is required. Example: [\"zh-cn\", \"zh-tw\"]",
                ));
            }

            let mut codes: Vec<&str> = vec![group.root.as_str()];
            codes.extend(group.variants.iter().map(String::as_str).filter(|v| *v != group.root));
            for code in codes {
                if !code.is_empty() && !claimed.insert(code) {
                    errors.push(ValidationError::new(
                        format!("{path}.variants"),
                        format!("Variant '{code}' already belongs to another group"),
                    ));
                }
            }

            for (variant, table) in &group.tables {
                let table_path = format!("{path}.tables.{variant}");

                if !group.contains(variant) {
                    errors.push(ValidationError::new(
                        table_path.clone(),
                        format!("Variant '{variant}' is not part of group '{}'", group.root),
                    ));
                }

                for (from, to) in table {
                    if from.is_empty() {
                        errors.push(ValidationError::new(
                            table_path.clone(),
                            "Table keys cannot be empty",
                        ));
                    }
                    if from.contains('\0') || to.contains('\0') {
                        errors.push(ValidationError::new(
                            table_path.clone(),
                            format!("Entry '{}' must not contain a NUL byte", from.escape_debug()),
                        ));
                    }
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Returns the group `code` belongs to, if any.
    #[must_use]
    pub fn group_of(&self, code: &str) -> Option<&GroupSettings> {
        self.groups.iter().find(|group| group.contains(code))
    }
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            groups: vec![
                GroupSettings::new("zh", &[
                    "zh-hans", "zh-hant", "zh-cn", "zh-hk", "zh-mo", "zh-my", "zh-sg", "zh-tw",
                ]),
                GroupSettings::new("sr", &["sr-ec", "sr-el"]),
                GroupSettings::new("kk", &[
                    "kk-arab", "kk-cyrl", "kk-latn", "kk-cn", "kk-kz", "kk-tr",
                ]),
                GroupSettings::new("ku", &["ku-arab", "ku-latn"]),
                GroupSettings::new("shi", &["shi-tfng", "shi-latn"]),
                GroupSettings::new("tg", &["tg-cyrl", "tg-latn"]),
                GroupSettings::new("uz", &["uz-cyrl", "uz-latn"]),
                GroupSettings::new("gan", &["gan-hans", "gan-hant"]),
                GroupSettings::new("crh", &["crh-cyrl", "crh-latn"]),
                GroupSettings::new("iu", &["ike-cans", "ike-latn"]),
            ],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_default_settings() {
        let settings = ConversionSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    #[case::root("zh", Some("zh"))]
    #[case::variant("zh-tw", Some("zh"))]
    #[case::serbian("sr-ec", Some("sr"))]
    #[case::plain("en", None)]
    #[case::dialect_without_converter("en-gb", None)]
    #[case::separate_language("zh-classical", None)]
    fn group_of_default(#[case] code: &str, #[case] expected_root: Option<&str>) {
        let settings = ConversionSettings::default();

        let root = settings.group_of(code).map(|g| g.root.as_str());

        assert_that!(root, eq(expected_root));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: ConversionSettings = serde_json::from_str("{}").unwrap();

        assert_eq!(settings, ConversionSettings::default());
    }

    #[rstest]
    fn deserialize_group_with_tables() {
        let json = r#"{
            "groups": [{
                "root": "zh",
                "variants": ["zh-cn", "zh-tw"],
                "tables": { "zh-tw": { "测": "測" } }
            }]
        }"#;

        let settings: ConversionSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.groups, len(eq(1)));
        assert_that!(settings.groups[0].tables["zh-tw"].get("测").map(String::as_str), some(eq("測")));
        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn validate_empty_root_and_variants() {
        let settings = ConversionSettings { groups: vec![GroupSettings::default()] };

        assert_that!(
            settings.validate(),
            err(elements_are![
                field!(ValidationError.field_path, eq("groups[0].root")),
                all![
                    field!(ValidationError.field_path, eq("groups[0].variants")),
                    field!(ValidationError.message, contains_substring("At least one variant"))
                ]
            ])
        );
    }

    #[rstest]
    fn validate_variant_claimed_twice() {
        let settings = ConversionSettings {
            groups: vec![
                GroupSettings::new("zh", &["zh-cn"]),
                GroupSettings::new("gan", &["zh-cn"]),
            ],
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("groups[1].variants")),
                field!(ValidationError.message, contains_substring("'zh-cn' already belongs"))
            ]])
        );
    }

    #[rstest]
    fn validate_table_outside_group() {
        let settings = ConversionSettings {
            groups: vec![GroupSettings::new("zh", &["zh-cn"]).with_table("sr-ec", [("a", "а")])],
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("groups[0].tables.sr-ec")),
                field!(ValidationError.message, contains_substring("not part of group 'zh'"))
            ]])
        );
    }

    #[rstest]
    fn validate_bad_table_entries() {
        let settings = ConversionSettings {
            groups: vec![
                GroupSettings::new("zh", &["zh-tw"]).with_table("zh-tw", [("", "x"), ("a\0", "b")]),
            ],
        };

        assert_that!(
            settings.validate(),
            err(elements_are![
                field!(ValidationError.message, contains_substring("cannot be empty")),
                field!(ValidationError.message, contains_substring("NUL byte"))
            ])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = ConversionSettings { groups: vec![GroupSettings::default()] };

        let errors = settings.validate().unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. groups[0].root"));
        assert_that!(error_message, contains_substring("2. groups[0].variants"));
    }
}
