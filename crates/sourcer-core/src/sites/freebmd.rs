//! FreeBMD: the England & Wales civil registration indexes.

use serde::Deserialize;

use super::{Site, invalid};
use crate::citation::CitationBuilder;
use crate::error::CitationError;
use crate::models::{CollectionData, DateObj, GeneralizedData, NameObj, PlaceObj, RecordType, Spouse};
use crate::normalize::correctly_cased_surname;
use crate::readers::{EdReader, ExtractedData, clean, parse_view};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FreebmdEd {
    url: Option<String>,
    event_type: Option<String>,
    event_year: Option<String>,
    event_quarter: Option<String>,
    given_names: Option<String>,
    surname: Option<String>,
    mother: Option<String>,
    mothers_maiden_name: Option<String>,
    birth_date: Option<String>,
    age_at_death: Option<String>,
    registration_district: Option<String>,
    spouse: Option<String>,
    reference_volume: Option<String>,
    reference_page: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventType {
    Birth,
    Marriage,
    Death,
}

impl EventType {
    fn parse(s: Option<&str>) -> Option<Self> {
        match s? {
            "birth" => Some(Self::Birth),
            "marriage" => Some(Self::Marriage),
            "death" => Some(Self::Death),
            _ => None,
        }
    }
}

/// Registration quarter from FreeBMD's quarter month, e.g. `Mar` is the first quarter.
fn freebmd_quarter(quarter: Option<&str>) -> u8 {
    match quarter.map(str::to_lowercase).as_deref() {
        Some("mar") => 1,
        Some("jun") => 2,
        Some("sep") => 3,
        Some("dec") => 4,
        _ => 1,
    }
}

pub struct FreebmdReader {
    ed: Option<FreebmdEd>,
    event_type: Option<EventType>,
}

impl FreebmdReader {
    pub fn new(ed: &ExtractedData) -> Self {
        let ed: Option<FreebmdEd> = parse_view(Site::Freebmd.key(), ed);
        let event_type = ed.as_ref().and_then(|e| EventType::parse(e.event_type.as_deref()));
        Self { ed, event_type }
    }

    fn surname(&self) -> Option<String> {
        let surname = clean(self.ed.as_ref()?.surname.as_deref())?;
        Some(correctly_cased_surname(&surname))
    }
}

impl EdReader for FreebmdReader {
    fn has_valid_data(&self) -> bool {
        self.ed
            .as_ref()
            .is_some_and(|e| clean(e.event_year.as_deref()).is_some())
    }

    fn record_type(&self) -> RecordType {
        match self.event_type {
            Some(EventType::Birth) => RecordType::BirthRegistration,
            Some(EventType::Marriage) => RecordType::MarriageRegistration,
            Some(EventType::Death) => RecordType::DeathRegistration,
            None => RecordType::Unclassified,
        }
    }

    fn name_obj(&self) -> Option<NameObj> {
        let ed = self.ed.as_ref()?;
        NameObj::from_forenames_and_last_name(ed.given_names.as_deref(), self.surname().as_deref())
    }

    fn event_date_obj(&self) -> Option<DateObj> {
        let ed = self.ed.as_ref()?;
        DateObj::from_year_and_quarter(
            ed.event_year.as_deref()?,
            Some(freebmd_quarter(ed.event_quarter.as_deref())),
        )
    }

    fn birth_date_obj(&self) -> Option<DateObj> {
        match self.event_type? {
            EventType::Birth => self.event_date_obj(),
            EventType::Death => DateObj::from_date_string(self.ed.as_ref()?.birth_date.as_deref()?),
            EventType::Marriage => None,
        }
    }

    fn death_date_obj(&self) -> Option<DateObj> {
        match self.event_type? {
            EventType::Death => self.event_date_obj(),
            _ => None,
        }
    }

    fn last_name_at_birth(&self) -> Option<String> {
        (self.event_type? == EventType::Birth).then(|| self.surname()).flatten()
    }

    fn last_name_at_death(&self) -> Option<String> {
        (self.event_type? == EventType::Death).then(|| self.surname()).flatten()
    }

    fn mothers_maiden_name(&self) -> Option<String> {
        // the maiden name column is only meaningful when the index has a mother column
        let ed = self.ed.as_ref()?;
        clean(ed.mother.as_deref())?;
        clean(ed.mothers_maiden_name.as_deref())
    }

    fn age_at_death(&self) -> Option<String> {
        if self.event_type? != EventType::Death {
            return None;
        }
        clean(self.ed.as_ref()?.age_at_death.as_deref())
    }

    fn registration_district(&self) -> Option<String> {
        clean(self.ed.as_ref()?.registration_district.as_deref())
    }

    fn spouses(&self, _event_date: Option<&DateObj>, _event_place: Option<&PlaceObj>) -> Vec<Spouse> {
        let Some(spouse) = self.ed.as_ref().and_then(|e| e.spouse.as_deref()) else {
            return Vec::new();
        };
        Spouse::new(NameObj::from_full_name(spouse), self.event_date_obj(), self.event_place_obj(), None)
            .into_iter()
            .collect()
    }

    fn collection_data(&self) -> Option<CollectionData> {
        let ed = self.ed.as_ref()?;
        let id = match self.event_type? {
            EventType::Birth => "births",
            EventType::Marriage => "marriages",
            EventType::Death => "deaths",
        };
        Some(CollectionData {
            id: Some(id.to_string()),
            volume: clean(ed.reference_volume.as_deref()),
            page: clean(ed.reference_page.as_deref()),
            registration_number: None,
        })
    }
}

pub fn build_citation(
    ed: &ExtractedData,
    gd: &GeneralizedData,
    builder: &mut CitationBuilder<'_>,
) -> Result<(), CitationError> {
    let view: FreebmdEd = parse_view(Site::Freebmd.key(), ed).ok_or_else(|| invalid(Site::Freebmd))?;

    let index = match EventType::parse(view.event_type.as_deref()) {
        Some(EventType::Birth) => "Birth Index",
        Some(EventType::Marriage) => "Marriage Index",
        Some(EventType::Death) => "Death Index",
        None => "Civil Registration Index",
    };
    builder.source_title = format!("England & Wales {index}");

    let mut reference: Vec<String> = Vec::new();
    if let Some(district) = clean(view.registration_district.as_deref()) {
        reference.push(district);
    }
    if let Some(volume) = clean(view.reference_volume.as_deref()) {
        reference.push(format!("Volume {volume}"));
    }
    if let Some(page) = clean(view.reference_page.as_deref()) {
        reference.push(format!("Page {page}"));
    }
    builder.source_reference = reference.join(", ");

    if let Some(url) = clean(view.url.as_deref()) {
        builder.record_link_or_template = format!("[{url} FreeBMD Entry Information]");
    }

    builder.add_standard_data_string(gd);
    builder.add_narrative(gd);
    Ok(())
}
