//! End-to-end tests from extracted page data to finished citations.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use sourcer_core::models::Gender;
use sourcer_core::{
    CitationInput, CitationType, DateObj, ExtractedData, Options, RecordType, Site, build_citation,
    generalize, generalize_value,
};

fn object(value: Value) -> ExtractedData {
    value.as_object().cloned().unwrap_or_default()
}

fn freebmd_birth() -> ExtractedData {
    object(json!({
        "url": "https://www.freebmd.org.uk/cgi/information.pl?id=42",
        "eventType": "birth",
        "eventYear": "1881",
        "eventQuarter": "Mar",
        "givenNames": "John",
        "surname": "SMITH",
        "registrationDistrict": "Leeds",
        "referenceVolume": "9b",
        "referencePage": "412"
    }))
}

fn www_field(label: &str, value: &str, key: &str) -> Value {
    json!({"label": label, "value": value, "dataKey": format!("SourceDetail.{key}")})
}

fn wiewaswie_marriage() -> ExtractedData {
    object(json!({
        "url": "https://www.wiewaswie.nl/en/detail/98765",
        "success": true,
        "title": "BS Huwelijk met Hendrik Jansen en Maria Visser",
        "people": [
            [www_field("Groom", "Hendrik Jansen", "PersonName"), www_field("Age", "27 jaar", "Age")],
            [www_field("Bride", "Maria Visser", "PersonName"), www_field("Age", "24 jaar", "Age")]
        ],
        "eventList": [
            www_field("Event", "Huwelijk", "Event"),
            www_field("Event date", "12-05-1902", "EventDate"),
            www_field("Event place", "Leiden", "EventPlace")
        ],
        "sourceList": [
            www_field("Document type", "BS Huwelijk", "DocumentType"),
            www_field("Heritage institution", "Erfgoed Leiden", "HeritageInstitutionName"),
            www_field("Collection", "Archiefnaam: BS Huwelijk Leiden", "Collection")
        ]
    }))
}

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap_or_default()
}

fn cite(site: Site, ed: &ExtractedData, citation_type: CitationType, options: &Options) -> String {
    let gd = generalize(site, ed).unwrap();
    let input = CitationInput {
        site,
        ed,
        gd: &gd,
        citation_type,
        run_date: run_date(),
        options,
        household_table_string: None,
        sharing_link: None,
    };
    build_citation(&input).unwrap().citation
}

#[test]
fn test_freebmd_birth_generalizes() {
    let gd = generalize(Site::Freebmd, &freebmd_birth()).unwrap();

    assert_eq!(gd.source_of_data, "freebmd");
    assert_eq!(gd.record_type, RecordType::BirthRegistration);
    assert_eq!(gd.full_name().as_deref(), Some("John Smith"));
    assert_eq!(gd.last_name_at_birth.as_deref(), Some("Smith"));
    assert_eq!(
        gd.event_date,
        Some(DateObj::Quarter {
            year: "1881".to_string(),
            quarter: 1
        })
    );
}

#[test]
fn test_wiewaswie_marriage_generalizes() {
    let gd = generalize(Site::Wiewaswie, &wiewaswie_marriage()).unwrap();

    assert_eq!(gd.record_type, RecordType::Marriage);
    assert_eq!(gd.person_gender, Some(Gender::Male));
    assert_eq!(gd.spouses.len(), 1);
    assert_eq!(gd.spouses[0].person_gender, Some(Gender::Female));
}

#[test]
fn test_generalize_rejects_non_object() {
    assert!(generalize_value(Site::Freebmd, &json!(["not", "an", "object"])).is_err());
}

#[test]
fn test_citations_are_repeatable() {
    let options = Options::default();
    for (site, ed) in [(Site::Freebmd, freebmd_birth()), (Site::Wiewaswie, wiewaswie_marriage())] {
        for citation_type in [CitationType::Inline, CitationType::Source, CitationType::Narrative] {
            let first = cite(site, &ed, citation_type, &options);
            let second = cite(site, &ed, citation_type, &options);
            assert_eq!(first, second);
        }
    }
}

#[test]
fn test_inline_citation_is_wrapped_in_ref() {
    let citation = cite(Site::Freebmd, &freebmd_birth(), CitationType::Inline, &Options::default());
    assert!(citation.starts_with("<ref>"));
    assert!(citation.ends_with("</ref>"));
    assert!(citation.contains("freebmd.org.uk"));
}

#[test]
fn test_missing_optional_fields_leave_clean_punctuation() {
    let sparse = object(json!({
        "eventType": "death",
        "eventYear": "1920",
        "givenNames": "Ann",
        "surname": "LEE"
    }));
    let options = Options::default();

    for citation_type in [CitationType::Inline, CitationType::Source, CitationType::Narrative] {
        let citation = cite(Site::Freebmd, &sparse, citation_type, &options);
        assert!(!citation.contains(".."), "double period in {citation}");
        assert!(!citation.contains(", ,"), "empty part in {citation}");
        assert!(!citation.contains(",,"), "empty part in {citation}");
    }
}
