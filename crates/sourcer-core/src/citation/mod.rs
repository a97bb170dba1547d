//! Citation construction.
//!
//! A citation is built by letting the record's site fill a [`CitationBuilder`]
//! and then serializing it in the requested style.

pub mod builder;
pub mod data_string;
pub mod narrative;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use builder::CitationBuilder;
pub use data_string::standard_data_string;
pub use narrative::standard_narrative;

use crate::error::Result;
use crate::models::{GeneralizedData, Options, RecordType};
use crate::readers::ExtractedData;
use crate::sites::Site;

/// Output style of a citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationType {
    /// `<ref>...</ref>` for use inline in a biography.
    Inline,
    /// `* ...` for the sources section.
    Source,
    /// A sentence followed by an inline citation.
    Narrative,
}

impl CitationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Source => "source",
            Self::Narrative => "narrative",
        }
    }
}

impl std::str::FromStr for CitationType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inline" => Ok(Self::Inline),
            "source" => Ok(Self::Source),
            "narrative" => Ok(Self::Narrative),
            other => Err(format!("unknown citation type: {other}")),
        }
    }
}

/// Everything needed to build one citation.
#[derive(Debug, Clone)]
pub struct CitationInput<'a> {
    pub site: Site,
    pub ed: &'a ExtractedData,
    pub gd: &'a GeneralizedData,
    pub citation_type: CitationType,
    /// Date shown as the accessed date; the only time input of a citation.
    pub run_date: NaiveDate,
    pub options: &'a Options,
    /// A household table to append, when the caller built one.
    pub household_table_string: Option<String>,
    /// A sharing link or template for the record image, when one was fetched.
    pub sharing_link: Option<String>,
}

/// A finished citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationObject {
    pub citation: String,
    #[serde(rename = "type")]
    pub citation_type: CitationType,
}

/// Build a citation for a generalized record.
pub fn build_citation(input: &CitationInput<'_>) -> Result<CitationObject> {
    info!("Building {} citation for {}", input.citation_type.as_str(), input.site.key());

    let mut builder = CitationBuilder::new(input.citation_type, input.run_date, input.options);
    if input.gd.record_type != RecordType::Unclassified {
        builder.meaningful_title = input.gd.ref_title().to_string();
    }

    input.site.build_core_citation(input.ed, input.gd, &mut builder)?;

    if let Some(link) = input.sharing_link.as_deref().filter(|l| !l.is_empty()) {
        debug!("Using sharing link as image link");
        builder.image_link = link.to_string();
    }
    if let Some(table) = input.household_table_string.as_deref() {
        if input.options.add_household_table {
            builder.household_table_string = table.to_string();
        }
    }

    Ok(CitationObject {
        citation: builder.citation_string(),
        citation_type: input.citation_type,
    })
}
