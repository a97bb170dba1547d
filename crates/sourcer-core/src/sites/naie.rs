//! National Archives of Ireland: the 1901 and 1911 census returns.

use serde::Deserialize;

use super::{Site, invalid};
use crate::citation::CitationBuilder;
use crate::error::CitationError;
use crate::models::{
    DateObj, Gender, GeneralizedData, Household, HouseholdField, HouseholdMember, NameObj, PlaceObj,
    RecordType, standardize_relationship_to_head,
};
use crate::normalize::collapse_whitespace;
use crate::readers::{EdReader, ExtractedData, clean, parse_view};

const IMAGE_HOST: &str = "http://www.census.nationalarchives.ie";

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct NaieMember {
    forename: Option<String>,
    surname: Option<String>,
    age: Option<String>,
    sex: Option<String>,
    relation_to_head: Option<String>,
    birthplace: Option<String>,
    occupation: Option<String>,
    marital_status: Option<String>,
    link: Option<String>,
    is_selected: bool,
}

impl NaieMember {
    fn full_name(&self) -> Option<String> {
        NameObj::from_forenames_and_last_name(self.forename.as_deref(), self.surname.as_deref())?
            .inferred_full_name()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct NaieEd {
    url: Option<String>,
    heading: Option<String>,
    image_link: Option<String>,
    census_year: Option<String>,
    county: Option<String>,
    ded: Option<String>,
    townland: Option<String>,
    household_members: Vec<NaieMember>,
}

impl NaieEd {
    /// The person the page is about, the first member when none is marked.
    fn selected(&self) -> Option<&NaieMember> {
        self.household_members
            .iter()
            .find(|m| m.is_selected)
            .or_else(|| self.household_members.first())
    }
}

pub struct NaieReader {
    ed: Option<NaieEd>,
}

impl NaieReader {
    pub fn new(ed: &ExtractedData) -> Self {
        Self {
            ed: parse_view(Site::Naie.key(), ed),
        }
    }

    fn selected(&self) -> Option<&NaieMember> {
        self.ed.as_ref()?.selected()
    }
}

impl EdReader for NaieReader {
    fn has_valid_data(&self) -> bool {
        self.ed
            .as_ref()
            .is_some_and(|e| clean(e.census_year.as_deref()).is_some() && e.selected().is_some())
    }

    fn record_type(&self) -> RecordType {
        RecordType::Census
    }

    fn name_obj(&self) -> Option<NameObj> {
        let member = self.selected()?;
        NameObj::from_forenames_and_last_name(member.forename.as_deref(), member.surname.as_deref())
    }

    fn gender(&self) -> Option<Gender> {
        Gender::from_record_text(self.selected()?.sex.as_deref()?)
    }

    fn event_date_obj(&self) -> Option<DateObj> {
        DateObj::from_year_and_quarter(self.ed.as_ref()?.census_year.as_deref()?, None)
    }

    fn event_place_obj(&self) -> Option<PlaceObj> {
        let ed = self.ed.as_ref()?;
        let parts: Vec<String> = [&ed.townland, &ed.ded, &ed.county]
            .into_iter()
            .filter_map(|p| clean(p.as_deref()))
            .collect();
        let mut place = parts.join(", ");
        if !place.is_empty() {
            place.push_str(", ");
        }
        place.push_str("Ireland");
        let mut place_obj = PlaceObj::from_full_place_name(&place)?;
        place_obj.region = clean(ed.county.as_deref());
        Some(place_obj)
    }

    fn birth_place_obj(&self) -> Option<PlaceObj> {
        PlaceObj::from_full_place_name(self.selected()?.birthplace.as_deref()?)
    }

    fn age_at_event(&self) -> Option<String> {
        clean(self.selected()?.age.as_deref())
    }

    fn relationship_to_head(&self) -> Option<String> {
        standardize_relationship_to_head(self.selected()?.relation_to_head.as_deref()?)
    }

    fn marital_status(&self) -> Option<String> {
        clean(self.selected()?.marital_status.as_deref()).map(|s| s.to_lowercase())
    }

    fn occupation(&self) -> Option<String> {
        clean(self.selected()?.occupation.as_deref())
    }

    fn household(&self) -> Option<Household> {
        let ed = self.ed.as_ref()?;
        if ed.household_members.is_empty() {
            return None;
        }
        let selected = ed.selected();

        let fields = [
            ("name", "Name"),
            ("relationship", "Relationship"),
            ("maritalStatus", "Marital Status"),
            ("gender", "Gender"),
            ("age", "Age"),
            ("occupation", "Occupation"),
            ("birthPlace", "Birth Place"),
        ]
        .into_iter()
        .map(|(key, heading)| HouseholdField::new(key, heading))
        .collect();

        let members = ed
            .household_members
            .iter()
            .map(|m| HouseholdMember {
                name: m.full_name(),
                age: clean(m.age.as_deref()),
                relationship: m.relation_to_head.as_deref().and_then(standardize_relationship_to_head),
                marital_status: clean(m.marital_status.as_deref()).map(|s| s.to_lowercase()),
                gender: m.sex.as_deref().and_then(Gender::from_record_text).map(|g| g.as_str().to_string()),
                occupation: clean(m.occupation.as_deref()),
                birth_place: clean(m.birthplace.as_deref()),
                link: clean(m.link.as_deref()),
                is_selected: selected.is_some_and(|s| std::ptr::eq(s, m)),
                ..Default::default()
            })
            .collect();

        Some(Household { fields, members })
    }
}

pub fn build_citation(
    ed: &ExtractedData,
    gd: &GeneralizedData,
    builder: &mut CitationBuilder<'_>,
) -> Result<(), CitationError> {
    let reader = NaieReader::new(ed);
    let view = reader.ed.as_ref().ok_or_else(|| invalid(Site::Naie))?;

    builder.source_title = match gd.inferred_event_year() {
        Some(year) => format!("{year} Census of Ireland"),
        None => "Census of Ireland".to_string(),
    };

    builder.source_reference = match clean(view.heading.as_deref()) {
        Some(heading) => format!("The National Archives of Ireland, {}", collapse_whitespace(&heading)),
        None => "The National Archives of Ireland".to_string(),
    };

    if let Some(url) = clean(view.url.as_deref()) {
        builder.record_link_or_template = format!("[{url} National Archives of Ireland Record]");
    }

    if let Some(link) = clean(view.image_link.as_deref()) {
        let link = if link.starts_with("http") {
            link
        } else {
            format!("{IMAGE_HOST}{link}")
        };
        builder.image_link = format!("[{link} National Archives of Ireland Image]");
    }

    builder.add_standard_data_string(gd);
    builder.add_narrative(gd);
    Ok(())
}
