//! User options controlling citation and table formatting.
//!
//! Options are a flat JSON object keyed like `citation_general_meaningfulNames`.
//! Unknown keys are ignored and a missing or unrecognized value falls back to
//! the default for that key.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::error::{Result, SourcerError};

/// How the meaningful title at the start of a citation is emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeaningfulNames {
    None,
    #[default]
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessedDate {
    None,
    #[default]
    ParenAfterLink,
}

/// Separator placed between the parts of a citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceSeparator {
    #[default]
    CommaSpace,
    Semicolon,
    Br,
}

impl ReferenceSeparator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CommaSpace => ", ",
            Self::Semicolon => "; ",
            Self::Br => "<br/>",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WikipediaLinkType {
    Permalink,
    PlainPermalink,
    #[default]
    External,
    Special,
    PlainSimple,
}

impl WikipediaLinkType {
    /// Plain link types write the bare URL rather than wiki link markup.
    pub fn is_plain(self) -> bool {
        matches!(self, Self::PlainPermalink | Self::PlainSimple)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WikipediaLinkLocation {
    Title,
    #[default]
    Reference,
    AfterWikipedia,
    AfterWikipediaEntry,
}

/// Output style of the FamilySearch "all citations" aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FsAllCitationsType {
    FsPlainInline,
    FsPlainSource,
    #[default]
    Narrative,
    Inline,
    Source,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableFormat {
    #[default]
    Table,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableCaption {
    None,
    #[default]
    Plain,
    WithCitation,
}

/// Deserialize a value, using the default when it is missing or not recognized.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// All formatting options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Options {
    #[serde(rename = "citation_general_meaningfulNames", deserialize_with = "lenient")]
    pub meaningful_names: MeaningfulNames,

    #[serde(rename = "citation_general_addAccessedDate", deserialize_with = "lenient")]
    pub add_accessed_date: AccessedDate,

    #[serde(rename = "citation_general_sourceReferenceSeparator", deserialize_with = "lenient")]
    pub source_reference_separator: ReferenceSeparator,

    /// Put newlines around the citation body inside `<ref>` tags.
    #[serde(rename = "citation_general_addNewlinesWithinRefs", deserialize_with = "lenient")]
    pub add_newlines_within_refs: bool,

    /// Append the household table to census citations.
    #[serde(rename = "citation_general_addHouseholdTable", deserialize_with = "lenient")]
    pub add_household_table: bool,

    #[serde(rename = "citation_wikipedia_citationLinkType", deserialize_with = "lenient")]
    pub wikipedia_link_type: WikipediaLinkType,

    #[serde(rename = "citation_wikipedia_citationLinkLocation", deserialize_with = "lenient")]
    pub wikipedia_link_location: WikipediaLinkLocation,

    #[serde(rename = "citation_wikipedia_citationUseItalics", deserialize_with = "lenient")]
    pub wikipedia_use_italics: bool,

    #[serde(rename = "addMerge_fsAllCitations_citationType", deserialize_with = "lenient")]
    pub fs_all_citations_type: FsAllCitationsType,

    #[serde(rename = "table_general_format", deserialize_with = "lenient")]
    pub table_format: TableFormat,

    #[serde(rename = "table_general_caption", deserialize_with = "lenient")]
    pub table_caption: TableCaption,
}

impl Options {
    /// Build options from a JSON value; anything that is not an object gives the defaults.
    pub fn from_value(value: serde_json::Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Load options from a JSON file.
    pub fn from_file(path: &Path) -> std::result::Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save options to a JSON file.
    pub fn save(&self, path: &Path) -> std::result::Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }

    /// Every recognized option key.
    pub fn keys() -> Vec<String> {
        match serde_json::to_value(Self::default()) {
            Ok(serde_json::Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// The current value of an option key.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map.get(key).cloned(),
            _ => None,
        }
    }

    /// Set an option from its text form, e.g. `("table_general_format", "list")`.
    ///
    /// Unlike loading a whole options object this is strict: an unknown key
    /// or a value the key does not accept is an error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = match serde_json::to_value(&*self)? {
            serde_json::Value::Object(map) => map,
            _ => return Err(SourcerError::Config("options are not an object".to_string())),
        };
        let current = map
            .get(key)
            .ok_or_else(|| SourcerError::Config(format!("unknown option: {key}")))?;

        let new_value = match current {
            serde_json::Value::Bool(_) => match value {
                "true" => serde_json::Value::Bool(true),
                "false" => serde_json::Value::Bool(false),
                _ => {
                    return Err(SourcerError::Config(format!(
                        "{key} expects true or false, got {value}"
                    )));
                }
            },
            _ => serde_json::Value::String(value.to_string()),
        };

        map.insert(key.to_string(), new_value.clone());
        let updated: Options = serde_json::from_value(serde_json::Value::Object(map))?;
        if updated.get(key).as_ref() != Some(&new_value) {
            return Err(SourcerError::Config(format!("invalid value for {key}: {value}")));
        }
        *self = updated;
        Ok(())
    }
}
