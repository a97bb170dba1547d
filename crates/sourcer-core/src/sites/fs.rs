//! FamilySearch historical records.
//!
//! Record pages are read from a flat extraction. Records fetched from the
//! FamilySearch API arrive as GedcomX JSON and are flattened into the same
//! shape by [`extract_from_record_json`] so both go through one reader.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Site, invalid};
use crate::citation::CitationBuilder;
use crate::classify::{ClassifyInput, RecordTypeRule, classify};
use crate::error::CitationError;
use crate::models::{
    DateObj, Gender, GeneralizedData, NameObj, Parents, PlaceObj, RecordType, Spouse,
    standardize_relationship_to_head,
};
use crate::readers::{EdReader, ExtractedData, clean, parse_view};

/// Record types by collection title, for records without a recognized event type.
static RECORD_TYPE_RULES: &[RecordTypeRule] = &[
    RecordTypeRule::new(RecordType::Census).collection_titles(&[&["Census"]]),
    RecordTypeRule::new(RecordType::Baptism).collection_titles(&[&["Christenings"], &["Baptisms"]]),
    RecordTypeRule::new(RecordType::Marriage).collection_titles(&[&["Marriages"]]),
    RecordTypeRule::new(RecordType::Burial).collection_titles(&[&["Burials"]]),
    RecordTypeRule::new(RecordType::Probate).collection_titles(&[&["Probate"]]),
    RecordTypeRule::new(RecordType::Military).collection_titles(&[&["Military"], &["Draft Registration"]]),
    RecordTypeRule::new(RecordType::Birth).collection_titles(&[&["Births"]]),
    RecordTypeRule::new(RecordType::Death).collection_titles(&[&["Deaths"]]),
    RecordTypeRule::new(RecordType::Birth).fields(&[&["birthDate"]]),
];

fn record_type_from_event_type(event_type: &str) -> Option<RecordType> {
    let record_type = match event_type {
        "Birth" => RecordType::Birth,
        "Christening" | "Baptism" => RecordType::Baptism,
        "Marriage" => RecordType::Marriage,
        "Death" => RecordType::Death,
        "Burial" => RecordType::Burial,
        "Census" => RecordType::Census,
        "Residence" => RecordType::Residence,
        "Probate" => RecordType::Probate,
        "MilitaryService" | "MilitaryDraftRegistration" => RecordType::Military,
        "Immigration" => RecordType::Immigration,
        "Emigration" => RecordType::Emigration,
        _ => return None,
    };
    Some(record_type)
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FsEd {
    #[serde(skip_serializing_if = "Option::is_none")]
    event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    birth_place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    death_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    death_place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    relationship_to_head: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spouse_full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    father_full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mother_full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    collection_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    record_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    /// Ids of the sources attached to a tree person, used to build all citations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    source_ids: Vec<String>,
}

impl ClassifyInput for FsEd {
    fn document_type(&self) -> Option<&str> {
        None
    }

    fn collection_title(&self) -> Option<&str> {
        self.collection_title.as_deref().filter(|t| !t.is_empty())
    }

    fn has_record_section(&self, _section: &str) -> bool {
        false
    }

    fn has_field(&self, field: &str) -> bool {
        let value = match field {
            "birthDate" => &self.birth_date,
            "deathDate" => &self.death_date,
            "spouseFullName" => &self.spouse_full_name,
            _ => return false,
        };
        clean(value.as_deref()).is_some()
    }
}

pub struct FsReader {
    ed: Option<FsEd>,
    record_type: RecordType,
}

impl FsReader {
    pub fn new(ed: &ExtractedData) -> Self {
        let ed: Option<FsEd> = parse_view(Site::Fs.key(), ed);
        let record_type = match &ed {
            Some(view) => view
                .event_type
                .as_deref()
                .and_then(record_type_from_event_type)
                .unwrap_or_else(|| classify(RECORD_TYPE_RULES, view)),
            None => RecordType::Unclassified,
        };
        Self { ed, record_type }
    }

    fn field(&self, f: impl Fn(&FsEd) -> &Option<String>) -> Option<String> {
        clean(f(self.ed.as_ref()?).as_deref())
    }

    /// Source ids of a tree person page.
    pub fn source_ids(&self) -> &[String] {
        self.ed.as_ref().map(|e| e.source_ids.as_slice()).unwrap_or_default()
    }
}

impl EdReader for FsReader {
    fn has_valid_data(&self) -> bool {
        self.ed
            .as_ref()
            .is_some_and(|e| clean(e.full_name.as_deref()).is_some() || !e.source_ids.is_empty())
    }

    fn record_type(&self) -> RecordType {
        self.record_type
    }

    fn name_obj(&self) -> Option<NameObj> {
        NameObj::from_full_name(&self.field(|e| &e.full_name)?)
    }

    fn gender(&self) -> Option<Gender> {
        Gender::from_record_text(&self.field(|e| &e.gender)?)
    }

    fn event_date_obj(&self) -> Option<DateObj> {
        DateObj::from_date_string(&self.field(|e| &e.event_date)?)
    }

    fn event_place_obj(&self) -> Option<PlaceObj> {
        PlaceObj::from_full_place_name(&self.field(|e| &e.event_place)?)
    }

    fn birth_date_obj(&self) -> Option<DateObj> {
        DateObj::from_date_string(&self.field(|e| &e.birth_date)?)
    }

    fn birth_place_obj(&self) -> Option<PlaceObj> {
        PlaceObj::from_full_place_name(&self.field(|e| &e.birth_place)?)
    }

    fn death_date_obj(&self) -> Option<DateObj> {
        DateObj::from_date_string(&self.field(|e| &e.death_date)?)
    }

    fn death_place_obj(&self) -> Option<PlaceObj> {
        PlaceObj::from_full_place_name(&self.field(|e| &e.death_place)?)
    }

    fn age_at_event(&self) -> Option<String> {
        self.field(|e| &e.age)
    }

    fn relationship_to_head(&self) -> Option<String> {
        standardize_relationship_to_head(&self.field(|e| &e.relationship_to_head)?)
    }

    fn occupation(&self) -> Option<String> {
        self.field(|e| &e.occupation)
    }

    fn spouse_obj(&self, event_date: Option<&DateObj>, event_place: Option<&PlaceObj>) -> Option<Spouse> {
        let name = self.field(|e| &e.spouse_full_name).and_then(|n| NameObj::from_full_name(&n))?;
        if self.record_type.is_marriage_like() {
            Spouse::new(Some(name), event_date.cloned(), event_place.cloned(), None)
        } else {
            Spouse::new(Some(name), None, None, None)
        }
    }

    fn parents(&self) -> Option<Parents> {
        Parents::from_full_names(
            self.field(|e| &e.father_full_name).as_deref(),
            self.field(|e| &e.mother_full_name).as_deref(),
        )
    }
}

pub fn build_citation(
    ed: &ExtractedData,
    gd: &GeneralizedData,
    builder: &mut CitationBuilder<'_>,
) -> Result<(), CitationError> {
    let reader = FsReader::new(ed);
    let view = reader.ed.as_ref().ok_or_else(|| invalid(Site::Fs))?;

    builder.source_title = clean(view.collection_title.as_deref()).unwrap_or_else(|| "FamilySearch".to_string());
    if let Some(url) = clean(view.record_url.as_deref()) {
        builder.record_link_or_template = format!("[{url} FamilySearch Record]");
    }
    if let Some(url) = clean(view.image_url.as_deref()) {
        builder.image_link = format!("[{url} FamilySearch Image]");
    }
    builder.add_standard_data_string(gd);
    builder.add_narrative(gd);
    Ok(())
}

// GedcomX record documents as returned by the FamilySearch API

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GxRecord {
    persons: Vec<GxPerson>,
    relationships: Vec<GxRelationship>,
    source_descriptions: Vec<GxSourceDescription>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GxPerson {
    id: Option<String>,
    principal: bool,
    gender: Option<GxType>,
    names: Vec<GxName>,
    facts: Vec<GxFact>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GxType {
    #[serde(rename = "type")]
    type_uri: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GxName {
    name_forms: Vec<GxNameForm>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GxNameForm {
    full_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GxOriginal {
    original: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GxFact {
    #[serde(rename = "type")]
    type_uri: Option<String>,
    date: Option<GxOriginal>,
    place: Option<GxOriginal>,
    value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GxResourceRef {
    resource_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GxRelationship {
    #[serde(rename = "type")]
    type_uri: Option<String>,
    person1: Option<GxResourceRef>,
    person2: Option<GxResourceRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GxTitle {
    value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GxSourceDescription {
    about: Option<String>,
    resource_type: Option<String>,
    titles: Vec<GxTitle>,
}

/// The last path segment of a GedcomX type URI, e.g. `Birth`.
fn type_name(uri: Option<&str>) -> Option<&str> {
    uri?.rsplit('/').next()
}

/// Facts that describe the event of a record, most specific first.
const EVENT_FACT_PRIORITY: &[&str] = &[
    "Marriage",
    "Census",
    "Residence",
    "Christening",
    "Baptism",
    "Burial",
    "Death",
    "Probate",
    "MilitaryService",
    "MilitaryDraftRegistration",
    "Immigration",
    "Emigration",
    "Birth",
];

impl GxPerson {
    fn full_name(&self) -> Option<String> {
        let form = self.names.first()?.name_forms.first()?;
        clean(form.full_text.as_deref())
    }

    fn fact(&self, name: &str) -> Option<&GxFact> {
        self.facts
            .iter()
            .find(|f| type_name(f.type_uri.as_deref()) == Some(name))
    }

    fn gender_name(&self) -> Option<&str> {
        type_name(self.gender.as_ref()?.type_uri.as_deref())
    }
}

impl GxFact {
    fn date(&self) -> Option<String> {
        clean(self.date.as_ref()?.original.as_deref())
    }

    fn place(&self) -> Option<String> {
        clean(self.place.as_ref()?.original.as_deref())
    }
}

impl GxRecord {
    fn person(&self, id: Option<&str>) -> Option<&GxPerson> {
        let id = id?;
        self.persons.iter().find(|p| p.id.as_deref() == Some(id))
    }

    /// Other persons related to the principal by a relationship of the given type.
    fn related(&self, principal: &GxPerson, relationship: &str, principal_is_person2: bool) -> Vec<&GxPerson> {
        let principal_id = principal.id.as_deref();
        self.relationships
            .iter()
            .filter(|r| type_name(r.type_uri.as_deref()) == Some(relationship))
            .filter_map(|r| {
                let id1 = r.person1.as_ref().and_then(|p| p.resource_id.as_deref());
                let id2 = r.person2.as_ref().and_then(|p| p.resource_id.as_deref());
                match (principal_is_person2, id1 == principal_id, id2 == principal_id) {
                    (true, _, true) => self.person(id1),
                    (false, true, _) => self.person(id2),
                    (false, _, true) if relationship == "Couple" => self.person(id1),
                    _ => None,
                }
            })
            .collect()
    }
}

/// Flatten a GedcomX record document into the extracted data shape of a record page.
pub fn extract_from_record_json(data: &Value) -> Option<ExtractedData> {
    let record: GxRecord = serde_json::from_value(data.clone()).ok()?;
    let principal = record
        .persons
        .iter()
        .find(|p| p.principal)
        .or_else(|| record.persons.first())?;

    let mut ed = FsEd {
        full_name: principal.full_name(),
        gender: principal.gender_name().map(str::to_lowercase),
        ..Default::default()
    };

    if let Some((event_type, fact)) = EVENT_FACT_PRIORITY
        .iter()
        .find_map(|name| principal.fact(name).map(|f| (*name, f)))
    {
        ed.event_type = Some(event_type.to_string());
        ed.event_date = fact.date();
        ed.event_place = fact.place();
    }
    if let Some(birth) = principal.fact("Birth") {
        ed.birth_date = birth.date();
        ed.birth_place = birth.place();
    }
    if let Some(death) = principal.fact("Death") {
        ed.death_date = death.date();
        ed.death_place = death.place();
    }
    ed.age = principal.fact("Age").and_then(|f| clean(f.value.as_deref()));
    ed.occupation = principal.fact("Occupation").and_then(|f| clean(f.value.as_deref()));
    ed.relationship_to_head = principal
        .fact("RelationshipToHead")
        .and_then(|f| clean(f.value.as_deref()));

    ed.spouse_full_name = record
        .related(principal, "Couple", false)
        .first()
        .and_then(|p| p.full_name());
    for parent in record.related(principal, "ParentChild", true) {
        match parent.gender_name() {
            Some("Male") => ed.father_full_name = parent.full_name(),
            Some("Female") => ed.mother_full_name = parent.full_name(),
            _ => {}
        }
    }

    let collection = record
        .source_descriptions
        .iter()
        .find(|d| type_name(d.resource_type.as_deref()) == Some("Collection"));
    ed.collection_title = collection
        .and_then(|d| d.titles.first())
        .and_then(|t| clean(t.value.as_deref()));
    ed.record_url = record
        .source_descriptions
        .iter()
        .find(|d| type_name(d.resource_type.as_deref()) == Some("Record"))
        .and_then(|d| clean(d.about.as_deref()));

    serde_json::to_value(&ed).ok()?.as_object().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn gedcomx_christening() -> Value {
        json!({
            "persons": [
                {
                    "id": "p1",
                    "principal": true,
                    "gender": {"type": "http://gedcomx.org/Male"},
                    "names": [{"nameForms": [{"fullText": "William Hughes"}]}],
                    "facts": [
                        {"type": "http://gedcomx.org/Birth", "date": {"original": "2 March 1850"}},
                        {"type": "http://gedcomx.org/Christening", "date": {"original": "10 March 1850"}, "place": {"original": "Bangor, Caernarvonshire, Wales"}}
                    ]
                },
                {"id": "p2", "gender": {"type": "http://gedcomx.org/Male"}, "names": [{"nameForms": [{"fullText": "John Hughes"}]}]},
                {"id": "p3", "gender": {"type": "http://gedcomx.org/Female"}, "names": [{"nameForms": [{"fullText": "Ann Jones"}]}]}
            ],
            "relationships": [
                {"type": "http://gedcomx.org/ParentChild", "person1": {"resourceId": "p2"}, "person2": {"resourceId": "p1"}},
                {"type": "http://gedcomx.org/ParentChild", "person1": {"resourceId": "p3"}, "person2": {"resourceId": "p1"}}
            ],
            "sourceDescriptions": [
                {"about": "https://www.familysearch.org/ark:/61903/1:1:ABCD", "resourceType": "http://gedcomx.org/Record"},
                {"resourceType": "http://gedcomx.org/Collection", "titles": [{"value": "Wales Births and Baptisms, 1541-1907"}]}
            ]
        })
    }

    #[test]
    fn test_extract_from_gedcomx() {
        let ed = extract_from_record_json(&gedcomx_christening()).unwrap();
        assert_eq!(ed["eventType"], "Christening");
        assert_eq!(ed["fullName"], "William Hughes");
        assert_eq!(ed["gender"], "male");
        assert_eq!(ed["fatherFullName"], "John Hughes");
        assert_eq!(ed["motherFullName"], "Ann Jones");
        assert_eq!(ed["recordUrl"], "https://www.familysearch.org/ark:/61903/1:1:ABCD");

        let reader = FsReader::new(&ed);
        assert!(reader.has_valid_data());
        assert_eq!(reader.record_type(), RecordType::Baptism);
        assert_eq!(reader.event_date_obj().unwrap().date_string(), "10 March 1850");
        assert_eq!(reader.birth_date_obj().unwrap().date_string(), "2 March 1850");
    }

    #[test]
    fn test_not_a_record_document() {
        assert_eq!(extract_from_record_json(&json!({"persons": []})), None);
        assert_eq!(extract_from_record_json(&json!("text")), None);
    }

    #[test]
    fn test_record_type_from_collection_title() {
        let ed = json!({
            "fullName": "Mary Smith",
            "collectionTitle": "England and Wales Census, 1881"
        });
        let reader = FsReader::new(ed.as_object().unwrap());
        assert_eq!(reader.record_type(), RecordType::Census);

        let ed = json!({"fullName": "Mary Smith", "collectionTitle": "Index", "birthDate": "1 May 1881"});
        assert_eq!(FsReader::new(ed.as_object().unwrap()).record_type(), RecordType::Birth);
    }

    #[test]
    fn test_spouse_has_marriage_details_only_for_marriages() {
        let ed = json!({
            "eventType": "Marriage",
            "fullName": "John Smith",
            "spouseFullName": "Mary Brown",
            "eventDate": "4 June 1870",
            "eventPlace": "Leeds, Yorkshire, England"
        });
        let reader = FsReader::new(ed.as_object().unwrap());
        let date = reader.event_date_obj();
        let spouse = reader.spouse_obj(date.as_ref(), None).unwrap();
        assert_eq!(spouse.marriage_date.unwrap().date_string(), "4 June 1870");
        assert_eq!(spouse.name.unwrap().full_name.as_deref(), Some("Mary Brown"));
    }

    #[test]
    fn test_tree_person_with_sources_is_valid() {
        let ed = json!({"sourceIds": ["S1", "S2"]});
        let reader = FsReader::new(ed.as_object().unwrap());
        assert!(reader.has_valid_data());
        assert_eq!(reader.source_ids(), ["S1".to_string(), "S2".to_string()]);
    }
}
