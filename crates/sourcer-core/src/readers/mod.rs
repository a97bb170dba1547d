//! The accessor contract every site reader implements.
//!
//! A reader wraps the extracted data of one page and answers questions
//! about it. Every accessor has a default returning no data, so a site
//! reader only overrides what its pages actually carry.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::models::{
    CollectionData, DateObj, Gender, Household, NameObj, Parents, PlaceObj, RecordSubtype,
    RecordType, SourceType, Spouse,
};

/// The raw extracted data for one page, schema depends on the site.
pub type ExtractedData = serde_json::Map<String, Value>;

/// Site-specific reader of extracted data.
pub trait EdReader {
    /// Whether the extraction produced enough to generalize.
    fn has_valid_data(&self) -> bool;

    fn source_type(&self) -> SourceType {
        SourceType::Record
    }

    fn record_type(&self) -> RecordType {
        RecordType::Unclassified
    }

    fn record_subtype(&self) -> Option<RecordSubtype> {
        None
    }

    fn name_obj(&self) -> Option<NameObj> {
        None
    }

    fn gender(&self) -> Option<Gender> {
        None
    }

    fn event_date_obj(&self) -> Option<DateObj> {
        None
    }

    fn event_place_obj(&self) -> Option<PlaceObj> {
        None
    }

    fn birth_date_obj(&self) -> Option<DateObj> {
        None
    }

    fn birth_place_obj(&self) -> Option<PlaceObj> {
        None
    }

    fn death_date_obj(&self) -> Option<DateObj> {
        None
    }

    fn death_place_obj(&self) -> Option<PlaceObj> {
        None
    }

    fn last_name_at_birth(&self) -> Option<String> {
        None
    }

    fn last_name_at_death(&self) -> Option<String> {
        None
    }

    fn mothers_maiden_name(&self) -> Option<String> {
        None
    }

    fn age_at_event(&self) -> Option<String> {
        None
    }

    fn age_at_death(&self) -> Option<String> {
        None
    }

    fn registration_district(&self) -> Option<String> {
        None
    }

    fn relationship_to_head(&self) -> Option<String> {
        None
    }

    fn marital_status(&self) -> Option<String> {
        None
    }

    fn occupation(&self) -> Option<String> {
        None
    }

    /// The spouse of the primary person. The event date and place are
    /// passed in for records where the event is the marriage.
    fn spouse_obj(&self, _event_date: Option<&DateObj>, _event_place: Option<&PlaceObj>) -> Option<Spouse> {
        None
    }

    /// All spouses, by default the single spouse from `spouse_obj`.
    fn spouses(&self, event_date: Option<&DateObj>, event_place: Option<&PlaceObj>) -> Vec<Spouse> {
        self.spouse_obj(event_date, event_place).into_iter().collect()
    }

    fn parents(&self) -> Option<Parents> {
        None
    }

    fn household(&self) -> Option<Household> {
        None
    }

    fn collection_data(&self) -> Option<CollectionData> {
        None
    }
}

/// Deserialize the typed view a reader works from.
///
/// A document that does not fit the view gives `None`, which readers
/// report as invalid data.
pub fn parse_view<T: DeserializeOwned>(site: &str, ed: &ExtractedData) -> Option<T> {
    match serde_json::from_value(Value::Object(ed.clone())) {
        Ok(view) => Some(view),
        Err(e) => {
            warn!("Extracted data for {} does not have the expected shape: {}", site, e);
            None
        }
    }
}

/// Trimmed, non-empty copy of an optional string.
pub fn clean(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}
