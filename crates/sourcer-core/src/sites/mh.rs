//! MyHeritage record and profile pages.
//!
//! MyHeritage collections hold many kinds of record, so the record type is
//! decided by an ordered rule table over the document type, collection
//! title, record sections and record data fields.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::{Site, invalid};
use crate::citation::CitationBuilder;
use crate::classify::{ClassifyInput, RecordTypeRule, classify};
use crate::error::CitationError;
use crate::models::{
    DateObj, Gender, GeneralizedData, Household, HouseholdField, HouseholdMember, NameObj, Parent,
    Parents, PlaceObj, RecordType, SourceType, Spouse, standardize_relationship_to_head,
};
use crate::normalize::clean_mh_date;
use crate::readers::{EdReader, ExtractedData, clean, parse_view};

static RECORD_TYPE_RULES: &[RecordTypeRule] = &[
    // document type rules
    RecordTypeRule::new(RecordType::Immigration).document_types(&["Immigrant Record"]),
    RecordTypeRule::new(RecordType::Divorce).document_types(&["Divorce"]),
    // collection title rules
    RecordTypeRule::new(RecordType::Baptism)
        .collection_titles(&[&["Births and Christenings"]])
        .fields(&[&["Christening"], &["Baptism"]]),
    RecordTypeRule::new(RecordType::Census)
        .collection_titles(&[&["Census"]])
        .record_sections(&[&["Census"]]),
    RecordTypeRule::new(RecordType::MarriageRegistration)
        .collection_titles(&[&["England & Wales, Marriage Index, 1837-2005"]]),
    RecordTypeRule::new(RecordType::Directory).collection_titles(&[
        &["Business Register"],
        &["U.S. Public Records Index"],
        &["Phone and Address Listings"],
    ]),
    RecordTypeRule::new(RecordType::SocialSecurity)
        .collection_titles(&[&["Social Security Applications and Claims"]]),
    RecordTypeRule::new(RecordType::Employment).collection_titles(&[
        &["Medicare Public Provider"],
        &["Attorney Registrations"],
        &["Job Applications"],
    ]),
    RecordTypeRule::new(RecordType::FamHistOrPedigree).collection_titles(&[
        &["Biographies"],
        &["Genealogy of the"],
        &["Personal Reminiscences of"],
    ]),
    // field only rules
    RecordTypeRule::new(RecordType::Marriage).fields(&[&["Marriage date", "Marriage place"], &["Marriage"]]),
];

/// Record data labels holding the event, by record type.
fn event_labels(record_type: RecordType) -> &'static [&'static str] {
    match record_type {
        RecordType::Baptism => &["Christening", "Baptism"],
        RecordType::Immigration => &["Arrival"],
        RecordType::Census => &["Residence"],
        RecordType::Marriage => &["Marriage"],
        RecordType::Divorce => &["Divorce"],
        _ => &[],
    }
}

fn event_date_labels(record_type: RecordType) -> &'static [&'static str] {
    match record_type {
        RecordType::Directory => &["ABN last updated", "ABN status date"],
        RecordType::Marriage | RecordType::MarriageRegistration => &["Marriage date"],
        _ => &[],
    }
}

fn event_place_labels(record_type: RecordType) -> &'static [&'static str] {
    match record_type {
        RecordType::Directory => &["Residence"],
        RecordType::Marriage | RecordType::MarriageRegistration => &["Marriage place"],
        _ => &[],
    }
}

/// Household column headings and the member fields they fill.
const HOUSEHOLD_HEADINGS: &[(&str, &str, &str)] = &[
    ("Name", "name", "Name"),
    ("Age", "age", "Age"),
    ("Relation to head", "relationship", "Relationship"),
];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct MhValue {
    value: Option<String>,
    date_string: Option<String>,
    place_string: Option<String>,
    #[serde(rename = "Name")]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MhHousehold {
    headings: Vec<String>,
    members: Vec<serde_json::Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct MhEd {
    success: bool,
    url: Option<String>,
    page_type: Option<String>,
    collection_title: Option<String>,
    record_title: Option<String>,
    person_gender: Option<String>,
    record_data: Option<BTreeMap<String, MhValue>>,
    record_sections: Option<BTreeMap<String, Value>>,
    household: Option<MhHousehold>,
}

impl MhEd {
    fn value(&self, label: &str) -> Option<&MhValue> {
        self.record_data.as_ref()?.get(label)
    }

    fn simple_value(&self, label: &str) -> Option<&str> {
        self.value(label)?.value.as_deref().filter(|v| !v.is_empty())
    }

    fn first_value(&self, labels: &[&str]) -> Option<&MhValue> {
        labels.iter().find_map(|label| self.value(label))
    }

    fn first_value_string(&self, labels: &[&str]) -> Option<String> {
        clean(self.first_value(labels)?.value.as_deref())
    }
}

impl ClassifyInput for MhEd {
    fn document_type(&self) -> Option<&str> {
        self.simple_value("Document type")
    }

    fn collection_title(&self) -> Option<&str> {
        self.collection_title.as_deref().filter(|t| !t.is_empty())
    }

    fn has_record_section(&self, section: &str) -> bool {
        self.record_sections
            .as_ref()
            .and_then(|s| s.get(section))
            .is_some_and(|v| !v.is_null())
    }

    fn has_field(&self, field: &str) -> bool {
        self.value(field).is_some()
    }
}

fn clean_relationship(relationship: &str) -> &str {
    relationship.strip_suffix(" (implied)").unwrap_or(relationship)
}

fn member_string(member: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    clean(member.get(key)?.as_str())
}

fn member_flag(member: &serde_json::Map<String, Value>, key: &str) -> bool {
    member.get(key).and_then(Value::as_bool).unwrap_or(false)
}

pub struct MhReader {
    ed: Option<MhEd>,
    source_type: SourceType,
    record_type: RecordType,
}

impl MhReader {
    pub fn new(ed: &ExtractedData) -> Self {
        let ed: Option<MhEd> = parse_view(Site::Mh.key(), ed);
        let mut source_type = SourceType::Record;
        let mut record_type = RecordType::Unclassified;
        if let Some(view) = ed.as_ref().filter(|e| e.record_data.is_some()) {
            match view.page_type.as_deref() {
                Some("person") => source_type = SourceType::Profile,
                Some("record") => record_type = classify(RECORD_TYPE_RULES, view),
                _ => {}
            }
        }
        Self {
            ed,
            source_type,
            record_type,
        }
    }

    fn event_value(&self) -> Option<&MhValue> {
        self.ed.as_ref()?.first_value(event_labels(self.record_type))
    }

    fn full_name(&self) -> Option<String> {
        let ed = self.ed.as_ref()?;
        let mut name = ed
            .simple_value("Name")
            .or(ed.record_title.as_deref())?
            .to_string();
        let is_couple = matches!(
            self.record_type,
            RecordType::Marriage | RecordType::MarriageRegistration | RecordType::Divorce
        );
        if is_couple {
            if let Some((first, _)) = name.split_once(" & ") {
                name = first.trim().to_string();
            }
        }
        clean(Some(&name))
    }
}

fn date_from_mh(date: Option<&str>) -> Option<DateObj> {
    DateObj::from_date_string(&clean_mh_date(date?))
}

impl EdReader for MhReader {
    fn has_valid_data(&self) -> bool {
        self.ed
            .as_ref()
            .is_some_and(|e| e.success && e.record_data.is_some())
    }

    fn source_type(&self) -> SourceType {
        self.source_type
    }

    fn record_type(&self) -> RecordType {
        self.record_type
    }

    fn name_obj(&self) -> Option<NameObj> {
        NameObj::from_full_name(&self.full_name()?)
    }

    fn gender(&self) -> Option<Gender> {
        let ed = self.ed.as_ref()?;
        let text = ed
            .person_gender
            .as_deref()
            .filter(|g| !g.is_empty())
            .or_else(|| ed.simple_value("Gender"))?;
        Gender::from_record_text(text)
    }

    fn event_date_obj(&self) -> Option<DateObj> {
        let ed = self.ed.as_ref()?;
        let date = self
            .event_value()
            .and_then(|v| v.date_string.clone())
            .filter(|d| !d.is_empty())
            .or_else(|| {
                ed.first_value(event_date_labels(self.record_type))
                    .and_then(|v| v.value.clone())
            });
        date_from_mh(date.as_deref())
    }

    fn event_place_obj(&self) -> Option<PlaceObj> {
        let ed = self.ed.as_ref()?;
        let place = self
            .event_value()
            .and_then(|v| v.place_string.clone())
            .filter(|p| !p.is_empty())
            .or_else(|| {
                ed.first_value(event_place_labels(self.record_type))
                    .and_then(|v| v.place_string.clone())
            })?;
        PlaceObj::from_full_place_name(&place)
    }

    fn birth_date_obj(&self) -> Option<DateObj> {
        date_from_mh(self.ed.as_ref()?.value("Birth")?.date_string.as_deref())
    }

    fn birth_place_obj(&self) -> Option<PlaceObj> {
        PlaceObj::from_full_place_name(self.ed.as_ref()?.value("Birth")?.place_string.as_deref()?)
    }

    fn death_date_obj(&self) -> Option<DateObj> {
        date_from_mh(self.ed.as_ref()?.value("Death")?.date_string.as_deref())
    }

    fn death_place_obj(&self) -> Option<PlaceObj> {
        PlaceObj::from_full_place_name(self.ed.as_ref()?.value("Death")?.place_string.as_deref()?)
    }

    fn relationship_to_head(&self) -> Option<String> {
        let household = self.ed.as_ref()?.household.as_ref()?;
        if !household.headings.iter().any(|h| h == "Relation to head") {
            return None;
        }
        let selected = household.members.iter().find(|m| member_flag(m, "isSelected"))?;
        let relationship = member_string(selected, "Relation to head")?;
        Some(clean_relationship(&relationship).to_string())
    }

    fn marital_status(&self) -> Option<String> {
        self.ed.as_ref()?.first_value_string(&["Marital status"])
    }

    fn occupation(&self) -> Option<String> {
        self.ed.as_ref()?.first_value_string(&["Occupation"])
    }

    fn spouse_obj(&self, _event_date: Option<&DateObj>, _event_place: Option<&PlaceObj>) -> Option<Spouse> {
        if self.record_type == RecordType::Census {
            return None;
        }
        let ed = self.ed.as_ref()?;

        let spouse_name = ed.first_value_string(&["Spouse", "Spouse (implied)"]).or_else(|| {
            // a marriage can list both bride and groom, the spouse is whichever is not the primary person
            let name_of = |v: &MhValue| clean(v.value.as_deref()).or_else(|| clean(v.name.as_deref()));
            let bride = ed.first_value(&["Bride", "Wife"]).and_then(name_of)?;
            let groom = ed.first_value(&["Groom", "Husband"]).and_then(name_of)?;
            let primary = self.full_name()?;
            if primary == groom {
                Some(bride)
            } else if primary == bride {
                Some(groom)
            } else {
                None
            }
        })?;

        let mut spouse = Spouse {
            name: Some(NameObj::from_full_name(&spouse_name)?),
            ..Default::default()
        };
        if self.record_type.is_marriage_like() {
            spouse.marriage_date = self.event_date_obj();
            spouse.marriage_place = self.event_place_obj();
        }
        Some(spouse)
    }

    fn parents(&self) -> Option<Parents> {
        if self.record_type == RecordType::Census {
            return None;
        }
        let ed = self.ed.as_ref()?;
        let father = ed.value("Father");
        let mother = ed.value("Mother");
        if father.is_none() && mother.is_none() {
            return None;
        }
        let parent = |v: Option<&MhValue>| {
            let name = NameObj::from_full_name(v?.value.as_deref()?)?;
            Some(Parent { name: Some(name) })
        };
        Some(Parents {
            father: parent(father),
            mother: parent(mother),
        })
    }

    fn household(&self) -> Option<Household> {
        let household = self.ed.as_ref()?.household.as_ref()?;
        if household.headings.is_empty() || household.members.is_empty() {
            return None;
        }

        let columns: Vec<&(&str, &str, &str)> = household
            .headings
            .iter()
            .filter_map(|h| HOUSEHOLD_HEADINGS.iter().find(|(site, _, _)| *site == h.as_str()))
            .collect();

        let members = household
            .members
            .iter()
            .map(|member| {
                if member_flag(member, "isClosed") {
                    return HouseholdMember {
                        is_closed: true,
                        ..Default::default()
                    };
                }
                let mut result = HouseholdMember {
                    is_selected: member_flag(member, "isSelected"),
                    ..Default::default()
                };
                for (site_heading, key, _) in &columns {
                    let Some(value) = member_string(member, site_heading) else {
                        continue;
                    };
                    match *key {
                        "name" => result.name = Some(value),
                        "age" => result.age = Some(value),
                        "relationship" => {
                            result.relationship = standardize_relationship_to_head(clean_relationship(&value))
                        }
                        _ => {}
                    }
                }
                result
            })
            .collect();

        Some(Household {
            fields: columns
                .iter()
                .map(|(_, key, heading)| HouseholdField::new(key, heading))
                .collect(),
            members,
        })
    }
}

pub fn build_citation(
    ed: &ExtractedData,
    gd: &GeneralizedData,
    builder: &mut CitationBuilder<'_>,
) -> Result<(), CitationError> {
    let view: MhEd = parse_view(Site::Mh.key(), ed).ok_or_else(|| invalid(Site::Mh))?;

    builder.source_title = clean(view.collection_title.as_deref())
        .unwrap_or_else(|| "MyHeritage".to_string());
    if let Some(url) = clean(view.url.as_deref()) {
        builder.record_link_or_template = format!("[{url} MyHeritage Record]");
    }
    builder.add_standard_data_string(gd);
    builder.add_narrative(gd);
    Ok(())
}
