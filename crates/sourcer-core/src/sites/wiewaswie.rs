//! WieWasWie: Dutch archive records in English or Dutch page language.
//!
//! The document type of the source decides the record type, and the page
//! language decides which field labels name the people on the record.

use serde::Deserialize;

use super::{Site, invalid};
use crate::citation::CitationBuilder;
use crate::error::CitationError;
use crate::models::{
    DateObj, Gender, GeneralizedData, Household, HouseholdField, HouseholdMember, NameObj, Parents,
    PlaceObj, RecordSubtype, RecordType, Spouse,
};
use crate::normalize::patterns::WWW_COLLECTION_REMAINDER;
use crate::readers::{EdReader, ExtractedData, clean, parse_view};

const URL_PREFIX: &str = "https://www.wiewaswie.nl/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lang {
    En,
    Nl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldType {
    Forenames,
    FullName,
    Gender,
    Age,
    PersonFather,
    PersonMother,
    PersonBride,
    PersonBrideFather,
    PersonBrideMother,
    PersonSpouse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameFormat {
    None,
    Full,
    ForenamesOnly,
}

type Labels = &'static [(FieldType, &'static [&'static str])];

/// How one WieWasWie document type maps onto generalized data.
#[derive(Debug)]
struct DocumentType {
    name: &'static str,
    en_name: &'static str,
    record_type: Option<RecordType>,
    record_type_from_event: &'static [(&'static str, RecordType)],
    record_subtype: Option<RecordSubtype>,
    fixed_gender: Option<Gender>,
    name_format: NameFormat,
    en_labels: Labels,
    nl_labels: Labels,
}

impl DocumentType {
    const fn new(name: &'static str, en_name: &'static str, record_type: Option<RecordType>) -> Self {
        Self {
            name,
            en_name,
            record_type,
            record_type_from_event: &[],
            record_subtype: None,
            fixed_gender: None,
            name_format: NameFormat::None,
            en_labels: &[],
            nl_labels: &[],
        }
    }

    const fn labels(mut self, en: Labels, nl: Labels) -> Self {
        self.name_format = NameFormat::Full;
        self.en_labels = en;
        self.nl_labels = nl;
        self
    }

    const fn forenames_only(mut self) -> Self {
        self.name_format = NameFormat::ForenamesOnly;
        self
    }

    const fn from_event(mut self, table: &'static [(&'static str, RecordType)]) -> Self {
        self.record_type_from_event = table;
        self
    }

    const fn subtype(mut self, subtype: RecordSubtype) -> Self {
        self.record_subtype = Some(subtype);
        self
    }

    const fn fixed_gender(mut self, gender: Gender) -> Self {
        self.fixed_gender = Some(gender);
        self
    }

    fn labels_for(&self, lang: Lang, field_type: FieldType) -> &'static [&'static str] {
        let labels = match lang {
            Lang::En => self.en_labels,
            Lang::Nl => self.nl_labels,
        };
        labels
            .iter()
            .find(|(t, _)| *t == field_type)
            .map(|(_, l)| *l)
            .unwrap_or(&[])
    }
}

use FieldType as FT;

const MARRIAGE_EN: Labels = &[
    (FT::FullName, &["Groom"]),
    (FT::Age, &["Age"]),
    (FT::PersonBride, &["Bride"]),
    (FT::PersonFather, &["Father of the groom"]),
    (FT::PersonMother, &["Mother of the groom"]),
    (FT::PersonBrideFather, &["Father of the bride"]),
    (FT::PersonBrideMother, &["Mother of the bride"]),
];

const MARRIAGE_NL: Labels = &[
    (FT::FullName, &["Bruidegom"]),
    (FT::Age, &["Leeftijd"]),
    (FT::PersonBride, &["Bruid"]),
    (FT::PersonFather, &["Vader van de bruidegom"]),
    (FT::PersonMother, &["Moeder van de bruidegom"]),
    (FT::PersonBrideFather, &["Vader van de bruid"]),
    (FT::PersonBrideMother, &["Moeder van de bruid"]),
];

static DOCUMENT_TYPES: &[DocumentType] = &[
    DocumentType::new("BS Geboorte", "Birth certificates", Some(RecordType::BirthRegistration)).labels(
        &[
            (FT::FullName, &["Child"]),
            (FT::Gender, &["Gender"]),
            (FT::PersonFather, &["Father"]),
            (FT::PersonMother, &["Mother"]),
        ],
        &[
            (FT::FullName, &["Kind"]),
            (FT::Gender, &["Geslacht"]),
            (FT::PersonFather, &["Vader"]),
            (FT::PersonMother, &["Moeder"]),
        ],
    ),
    DocumentType::new("BS Huwelijk", "Marriage certificates", Some(RecordType::Marriage))
        .labels(MARRIAGE_EN, MARRIAGE_NL)
        .fixed_gender(Gender::Male),
    DocumentType::new("BS Overlijden", "Death certificates", Some(RecordType::DeathRegistration)).labels(
        &[
            (FT::FullName, &["Deceased"]),
            (FT::Gender, &["Gender"]),
            (FT::Age, &["Age"]),
            (FT::PersonFather, &["Father"]),
            (FT::PersonMother, &["Mother"]),
        ],
        &[
            (FT::FullName, &["Overledene"]),
            (FT::Gender, &["Geslacht"]),
            (FT::Age, &["Leeftijd"]),
            (FT::PersonFather, &["Vader"]),
            (FT::PersonMother, &["Moeder"]),
        ],
    ),
    DocumentType::new("DTB Dopen", "Baptismal Registers", Some(RecordType::Baptism))
        .labels(
            &[
                (FT::Forenames, &["Dopeling"]),
                (FT::PersonFather, &["Father"]),
                (FT::PersonMother, &["Mother"]),
            ],
            &[
                (FT::Forenames, &["Dopeling"]),
                (FT::PersonFather, &["Vader"]),
                (FT::PersonMother, &["Moeder"]),
            ],
        )
        .forenames_only(),
    DocumentType::new("DTB Trouwen", "Marriage Registers", Some(RecordType::Marriage))
        .labels(MARRIAGE_EN, MARRIAGE_NL)
        .fixed_gender(Gender::Male),
    DocumentType::new("DTB Begraven", "Burial Registers", Some(RecordType::Burial)).labels(
        &[
            (FT::FullName, &["Deceased"]),
            (FT::Gender, &["Gender"]),
            (FT::Age, &["Age"]),
            (FT::PersonSpouse, &["Widow"]),
            (FT::PersonFather, &["Father"]),
            (FT::PersonMother, &["Mother"]),
        ],
        &[
            (FT::FullName, &["Overledene"]),
            (FT::Gender, &["Geslacht"]),
            (FT::Age, &["Leeftijd"]),
            (FT::PersonSpouse, &["Weduwe"]),
            (FT::PersonFather, &["Vader"]),
            (FT::PersonMother, &["Moeder"]),
        ],
    ),
    DocumentType::new("DTB Overig", "Church Membership Registers", Some(RecordType::OtherChurchEvent))
        .labels(
            &[
                (FT::FullName, &["Man:"]),
                (FT::Gender, &["Gender"]),
                (FT::PersonSpouse, &["Wife"]),
            ],
            &[
                (FT::FullName, &["Man:"]),
                (FT::Gender, &["Geslacht"]),
                (FT::PersonSpouse, &["Vrouw"]),
            ],
        )
        .subtype(RecordSubtype::MemberRegistration),
    DocumentType::new("Beroep en bedrijf", "Profession and Business", Some(RecordType::Employment)).labels(
        &[
            (FT::FullName, &["Registered", "Opvarende"]),
            (FT::Gender, &["Gender"]),
            (FT::PersonSpouse, &["Wife"]),
        ],
        &[
            (FT::FullName, &["Geregistreerde", "Opvarende"]),
            (FT::Gender, &["Geslacht"]),
            (FT::PersonSpouse, &["Vrouw"]),
        ],
    ),
    DocumentType::new("Bevolkingsregister", "Population Registers", Some(RecordType::PopulationRegister)).labels(
        &[(FT::FullName, &["Registered", "Persoon in bevolkingsregister"])],
        &[(FT::FullName, &["Geregistreerde", "Persoon in bevolkingsregister"])],
    ),
    DocumentType::new("Bidprentjes", "Prayer Cards", Some(RecordType::Death)).labels(
        &[(FT::FullName, &["Deceased"]), (FT::PersonSpouse, &["Partner"])],
        &[(FT::FullName, &["Overledene"]), (FT::PersonSpouse, &["Partner"])],
    ),
    DocumentType::new("Collecties", "Miscellaneous Collections", Some(RecordType::Unclassified)),
    DocumentType::new("Familieadvertenties", "Family Announcements", None)
        .from_event(&[("Geboorte", RecordType::Birth), ("Overlijden", RecordType::Death)])
        .labels(&[(FT::FullName, &["Main character"])], &[(FT::FullName, &["Hoofdpersoon"])]),
    DocumentType::new("Fiscaal en financieel", "Tax and Financial Registers", None)
        .from_event(&[
            ("Haardstedegeld", RecordType::Tax),
            ("patentvermelding", RecordType::Patent),
            ("Grondschatting", RecordType::LandTax),
        ])
        .labels(
            &[(FT::FullName, &["Vermeld", "Aangeslagene", "Resident"])],
            &[(FT::FullName, &["Vermeld", "Aangeslagene", "Bewoner"])],
        ),
    DocumentType::new("Instellingsregister", "Institutional Registers", Some(RecordType::Unclassified)),
    DocumentType::new("Memories van Successie", "Death Duties Files", Some(RecordType::Death))
        .labels(&[(FT::FullName, &["Deceased"])], &[(FT::FullName, &["Overledene"])]),
    DocumentType::new("Militairen", "Military sources", Some(RecordType::Military)),
    DocumentType::new("Misdaad en straf", "Crime and Punishment", Some(RecordType::CriminalRegister)),
    DocumentType::new("Notariële archieven", "Notarial Archives", Some(RecordType::Unclassified)),
    DocumentType::new("Onroerend goed", "Real Estate", Some(RecordType::Unclassified)),
    DocumentType::new("Rechterlijke archieven", "Court Registers", Some(RecordType::Unclassified)),
    DocumentType::new("Sociale zorg", "Social Care", Some(RecordType::Unclassified)),
    DocumentType::new("Slavernijbronnen", "Slavery Records", Some(RecordType::Unclassified)),
    DocumentType::new("Tweede Wereldoorlog", "World War II", Some(RecordType::Military)),
    DocumentType::new("Vestiging en vertrek", "Migration", None).from_event(&[("Vertrek", RecordType::Emigration)]),
    DocumentType::new("VOC Opvarenden", "Dutch East India Company Passengers", Some(RecordType::PassengerList)),
];

fn find_document_type(name: &str) -> Option<&'static DocumentType> {
    DOCUMENT_TYPES.iter().find(|d| d.name == name)
}

/// Lowercase words that start a Dutch last name, e.g. `van der` in `Jan van der Wal`.
const LAST_NAME_PREFIXES: &[&str] = &[
    "van", "von", "de", "der", "den", "het", "ter", "ten", "te", "'t", "op", "in", "la", "le", "du", "d'", "vander",
];

/// Split a Dutch full name into forenames and last name, keeping name prefixes with the last name.
fn separate_dutch_name(full_name: &str) -> (Option<String>, Option<String>) {
    let words: Vec<&str> = full_name.split_whitespace().collect();
    if words.len() < 2 {
        return (None, words.first().map(|w| w.to_string()));
    }
    let split = words
        .iter()
        .enumerate()
        .skip(1)
        .find(|(i, w)| *i < words.len() - 1 && LAST_NAME_PREFIXES.contains(*w))
        .map(|(i, _)| i)
        .unwrap_or(words.len() - 1);
    (Some(words[..split].join(" ")), Some(words[split..].join(" ")))
}

/// Clean a full name as written in the record and split it into parts.
fn name_from_full_name(full_name: &str) -> Option<NameObj> {
    let mut name = full_name.trim().to_string();

    // e.g. "de erfgenamen van + Nicolaas Hendrik van der Wal, wedr. van Cornelia Weydom"
    for prefix in ["de erfgenamen van ", "+ "] {
        if let Some(rest) = name.strip_prefix(prefix) {
            let rest = rest.trim();
            if !rest.is_empty() {
                name = rest.to_string();
            }
        }
    }

    // the value can name several people, keep the first
    for separator in [" wed ", " wed. ", " wedr ", "wedr. ", ", "] {
        if let Some(index) = name.find(separator) {
            let first = name[..index].trim();
            if !first.is_empty() {
                name = first.to_string();
            }
        }
    }

    for ending in [",", "."] {
        if let Some(rest) = name.strip_suffix(ending) {
            let rest = rest.trim();
            if !rest.is_empty() {
                name = rest.to_string();
            }
        }
    }

    let mut name_obj = NameObj::from_full_name(&name)?;
    let (forenames, last_name) = separate_dutch_name(&name);
    name_obj.forenames = forenames;
    name_obj.last_name = last_name;
    Some(name_obj)
}

fn clean_age(age: &str) -> Option<String> {
    let age = age.trim().replacen("dagen", "days", 1).replacen("jaar", "years", 1);
    let age = age.strip_suffix(" years").map(str::trim).unwrap_or(&age);
    clean(Some(age))
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Field {
    label: Option<String>,
    value: Option<String>,
    data_key: Option<String>,
}

type Person = Vec<Field>;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct WiewaswieEd {
    url: Option<String>,
    success: bool,
    title: Option<String>,
    people: Vec<Person>,
    event_list: Vec<Field>,
    source_list: Vec<Field>,
    original_source_link: Option<String>,
}

fn field_by_data_key<'a>(fields: &'a [Field], last_part: &str) -> Option<&'a str> {
    let data_key = format!("SourceDetail.{last_part}");
    fields
        .iter()
        .find(|f| f.data_key.as_deref() == Some(data_key.as_str()))
        .and_then(|f| f.value.as_deref())
}

fn field_by_labels<'a>(fields: &'a [Field], labels: &[&str]) -> Option<&'a str> {
    if labels.is_empty() {
        return None;
    }
    fields
        .iter()
        .find(|f| f.label.as_deref().is_some_and(|l| labels.contains(&l)))
        .and_then(|f| f.value.as_deref())
}

impl WiewaswieEd {
    fn source_field(&self, last_part: &str) -> Option<&str> {
        field_by_data_key(&self.source_list, last_part)
    }

    fn event_field(&self, last_part: &str) -> Option<&str> {
        field_by_data_key(&self.event_list, last_part)
    }

    fn page_lang(&self) -> Option<Lang> {
        let rest = self.url.as_deref()?.strip_prefix(URL_PREFIX)?;
        if rest.starts_with("en") {
            Some(Lang::En)
        } else if rest.starts_with("nl") {
            Some(Lang::Nl)
        } else {
            None
        }
    }

    /// Collection reference, e.g. `Noord-Hollands Archief, Collection: DTB Haarlem, Book: 3`.
    fn source_reference(&self) -> Option<String> {
        let institution = self.source_field("HeritageInstitutionName")?;
        let mut collection = self.source_field("Collection")?;
        collection = collection.strip_prefix("Archiefnaam: ").unwrap_or(collection);
        if let Some(m) = WWW_COLLECTION_REMAINDER.find(collection) {
            collection = &collection[..m.start()];
        }

        let mut reference = format!("{institution}, Collection: {collection}");
        if let Some(number) = self.source_field("RegistrationNumber") {
            reference.push_str(&format!(", Registration number: {number}"));
        }
        if let Some(book) = self.source_field("Book") {
            reference.push_str(&format!(", Book: {book}"));
        }
        Some(reference)
    }

    fn external_link(&self) -> Option<String> {
        let link = clean(self.original_source_link.as_deref())?;
        let text = match self.source_field("HeritageInstitutionName") {
            Some(institution) => format!("{institution} Record"),
            None => "External Record".to_string(),
        };
        Some(format!("[{link} {text}]"))
    }
}

pub struct WiewaswieReader {
    ed: Option<WiewaswieEd>,
    document_type: Option<&'static DocumentType>,
    lang: Option<Lang>,
    record_type: RecordType,
}

impl WiewaswieReader {
    pub fn new(ed: &ExtractedData) -> Self {
        let ed: Option<WiewaswieEd> = parse_view(Site::Wiewaswie.key(), ed);
        let document_type = ed
            .as_ref()
            .and_then(|e| e.source_field("DocumentType"))
            .and_then(find_document_type);
        let lang = ed.as_ref().and_then(WiewaswieEd::page_lang);

        let record_type = document_type
            .and_then(|doc| {
                doc.record_type.or_else(|| {
                    let event = ed.as_ref()?.event_field("Event")?;
                    doc.record_type_from_event
                        .iter()
                        .find(|(e, _)| *e == event)
                        .map(|(_, t)| *t)
                })
            })
            .unwrap_or_default();

        Self {
            ed,
            document_type,
            lang,
            record_type,
        }
    }

    fn labels(&self, field_type: FieldType) -> &'static [&'static str] {
        match (self.document_type, self.lang) {
            (Some(doc), Some(lang)) => doc.labels_for(lang, field_type),
            _ => &[],
        }
    }

    fn person_field<'a>(&self, person: &'a [Field], field_type: FieldType) -> Option<&'a str> {
        field_by_labels(person, self.labels(field_type))
    }

    fn primary_person(&self) -> Option<&Person> {
        self.ed.as_ref()?.people.first()
    }

    fn primary_field(&self, field_type: FieldType) -> Option<&str> {
        self.person_field(self.primary_person()?, field_type)
    }

    fn primary_field_by_data_key(&self, last_part: &str) -> Option<&str> {
        field_by_data_key(self.primary_person()?, last_part)
    }

    /// The person whose first field carries one of the labels of the field type.
    fn find_person(&self, field_type: FieldType) -> Option<&Person> {
        let labels = self.labels(field_type);
        self.ed.as_ref()?.people.iter().find(|person| {
            person
                .first()
                .and_then(|f| f.label.as_deref())
                .is_some_and(|l| labels.contains(&l))
        })
    }

    fn name_of(&self, field_type: FieldType) -> Option<String> {
        let person = self.find_person(field_type)?;
        clean(self.person_field(person, field_type))
    }

    fn parents_from(&self, father: FieldType, mother: FieldType) -> Option<Parents> {
        Parents::from_full_names(self.name_of(father).as_deref(), self.name_of(mother).as_deref())
    }

    pub fn source_title(&self) -> Option<String> {
        let doc = self.document_type?;
        Some(format!("{} ({})", doc.name, doc.en_name))
    }
}

impl EdReader for WiewaswieReader {
    fn has_valid_data(&self) -> bool {
        self.ed.as_ref().is_some_and(|e| e.success) && self.document_type.is_some() && self.lang.is_some()
    }

    fn record_type(&self) -> RecordType {
        self.record_type
    }

    fn record_subtype(&self) -> Option<RecordSubtype> {
        self.document_type?.record_subtype
    }

    fn name_obj(&self) -> Option<NameObj> {
        let doc = self.document_type?;
        let name = match doc.name_format {
            NameFormat::Full => self.primary_field(FT::FullName).and_then(name_from_full_name),
            NameFormat::ForenamesOnly => self
                .primary_field(FT::Forenames)
                .and_then(|f| NameObj::from_forenames_and_last_name(Some(f), None)),
            NameFormat::None => None,
        };
        if name.is_some() {
            return name;
        }

        // fall back to the page title, e.g. "BS Geboorte met Jan de Vries"
        let title = self.ed.as_ref()?.title.as_deref()?;
        let prefix = format!("{} met ", doc.name);
        name_from_full_name(title.strip_prefix(&prefix)?)
    }

    fn gender(&self) -> Option<Gender> {
        if let Some(gender) = self.document_type?.fixed_gender {
            return Some(gender);
        }
        match self.primary_field(FT::Gender)? {
            "Man" => Some(Gender::Male),
            "Vrouw" => Some(Gender::Female),
            other => Gender::from_record_text(other),
        }
    }

    fn event_date_obj(&self) -> Option<DateObj> {
        let ed = self.ed.as_ref()?;
        let date = ed.event_field("EventDate").or_else(|| ed.source_field("RegistrationDate"))?;
        DateObj::from_ddmmyyyy(date, '-')
    }

    fn event_place_obj(&self) -> Option<PlaceObj> {
        let ed = self.ed.as_ref()?;
        let event_place = ed.event_field("EventPlace").filter(|p| !p.is_empty());
        let document_place = ed.source_field("DocumentPlace").filter(|p| !p.is_empty());
        let region = ed.source_field("CollectionRegion").filter(|p| !p.is_empty());

        let mut place = match (event_place, document_place) {
            (Some(e), Some(d)) if e != d => format!("{e}, {d}"),
            (Some(e), _) => e.to_string(),
            (None, Some(d)) => d.to_string(),
            (None, None) => String::new(),
        };
        if let Some(region) = region {
            if !place.ends_with(region) {
                if !place.is_empty() {
                    place.push_str(", ");
                }
                place.push_str(region);
            }
        }
        if !place.is_empty() {
            place.push_str(", ");
        }
        place.push_str("Nederland");
        PlaceObj::from_full_place_name(&place)
    }

    fn birth_date_obj(&self) -> Option<DateObj> {
        DateObj::from_ddmmyyyy(self.primary_field_by_data_key("BirthDate")?, '-')
    }

    fn birth_place_obj(&self) -> Option<PlaceObj> {
        PlaceObj::from_full_place_name(self.primary_field_by_data_key("BirthPlace")?)
    }

    fn death_date_obj(&self) -> Option<DateObj> {
        let date = self.primary_field_by_data_key("DeathDate").or_else(|| {
            let is_death_certificate = self.document_type.is_some_and(|d| d.name == "BS Overlijden");
            if is_death_certificate {
                self.ed.as_ref()?.event_field("EventDate")
            } else {
                None
            }
        })?;
        DateObj::from_ddmmyyyy(date, '-')
    }

    fn death_place_obj(&self) -> Option<PlaceObj> {
        PlaceObj::from_full_place_name(self.primary_field_by_data_key("DeathPlace")?)
    }

    fn age_at_event(&self) -> Option<String> {
        clean_age(self.primary_field(FT::Age)?)
    }

    fn occupation(&self) -> Option<String> {
        clean(self.primary_field_by_data_key("Profession"))
    }

    fn spouse_obj(&self, event_date: Option<&DateObj>, event_place: Option<&PlaceObj>) -> Option<Spouse> {
        if let Some(bride) = self.find_person(FT::PersonBride) {
            let name = self.person_field(bride, FT::PersonBride).and_then(name_from_full_name);
            let age = self.person_field(bride, FT::Age).and_then(clean_age);
            let mut spouse = Spouse::new(name, event_date.cloned(), event_place.cloned(), age)?;
            spouse.person_gender = Some(Gender::Female);
            spouse.parents = self.parents_from(FT::PersonBrideFather, FT::PersonBrideMother);
            return Some(spouse);
        }

        // deaths, burials and other records can name a spouse
        let spouse = self.find_person(FT::PersonSpouse)?;
        let name = self.person_field(spouse, FT::PersonSpouse).and_then(name_from_full_name);
        Spouse::new(name, None, None, None)
    }

    fn parents(&self) -> Option<Parents> {
        self.parents_from(FT::PersonFather, FT::PersonMother)
    }

    fn household(&self) -> Option<Household> {
        if self.document_type?.name != "Bevolkingsregister" {
            return None;
        }
        let people = &self.ed.as_ref()?.people;
        if people.len() <= 1 {
            return None;
        }

        let mut fields = vec![HouseholdField::new("name", "Name")];
        let mut add_field = |key: &str, heading: &str| {
            if !fields.iter().any(|f| f.key == key) {
                fields.push(HouseholdField::new(key, heading));
            }
        };

        let mut members = Vec::new();
        for person in people {
            let Some(name) = clean(self.person_field(person, FT::FullName)) else {
                continue;
            };
            let mut member = HouseholdMember {
                name: Some(name),
                ..Default::default()
            };
            if let Some(occupation) = clean(field_by_data_key(person, "Profession")) {
                member.occupation = Some(occupation);
                add_field("occupation", "Occupation");
            }
            if let Some(date) = clean(field_by_data_key(person, "BirthDate")) {
                let date = DateObj::from_ddmmyyyy(&date, '-').map(|d| d.date_string()).unwrap_or(date);
                member.birth_date = Some(date);
                add_field("birthDate", "Birth Date");
            }
            if let Some(place) = clean(field_by_data_key(person, "BirthPlace")) {
                member.birth_place = Some(place);
                add_field("birthPlace", "Birth Place");
            }
            members.push(member);
        }

        Some(Household { fields, members })
    }
}

pub fn build_citation(
    ed: &ExtractedData,
    gd: &GeneralizedData,
    builder: &mut CitationBuilder<'_>,
) -> Result<(), CitationError> {
    let reader = WiewaswieReader::new(ed);
    let view = reader.ed.as_ref().ok_or_else(|| invalid(Site::Wiewaswie))?;

    builder.source_title = reader.source_title().unwrap_or_else(|| "WieWasWie".to_string());
    if let Some(reference) = view.source_reference() {
        builder.source_reference = reference;
    }
    if let Some(url) = clean(view.url.as_deref()) {
        builder.record_link_or_template = format!("[{url} WieWasWie Record]");
    }
    if let Some(external) = view.external_link() {
        builder.image_link = external;
    }
    builder.add_standard_data_string(gd);
    builder.add_narrative(gd);
    Ok(())
}
