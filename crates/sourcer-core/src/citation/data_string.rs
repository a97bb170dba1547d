//! The data sentence summarizing a record inside a citation.

use crate::models::{DateObj, GeneralizedData, RecordType};

/// `on 3 May 1881`, `in May 1881`, `in Jan-Feb-Mar 1881` or `in 1881`.
pub(crate) fn date_phrase(date: &DateObj) -> String {
    match date {
        DateObj::Exact { date_string } if date_string.starts_with(|c: char| c.is_ascii_digit()) && date_string.contains(' ') => {
            format!("on {date_string}")
        }
        other => format!("in {}", other.date_string()),
    }
}

pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Where the event happened, preferring the registration district for registrations.
pub(crate) fn place_phrase(gd: &GeneralizedData) -> Option<String> {
    if let Some(district) = gd.registration_district.as_deref().filter(|d| !d.is_empty()) {
        return Some(format!("in {district} district"));
    }
    gd.inferred_event_place()
        .map(|p| p.place_string.trim())
        .filter(|p| !p.is_empty())
        .map(|p| format!("in {p}"))
}

pub(crate) fn first_spouse_name(gd: &GeneralizedData) -> Option<String> {
    gd.spouses
        .iter()
        .find_map(|s| s.name.as_ref().and_then(|n| n.inferred_full_name()))
}

/// Build the data sentence for a record, e.g.
/// `Birth registration of John Smith in Jan-Feb-Mar 1881 in Pancras district; mother's maiden name Jones`.
pub fn standard_data_string(gd: &GeneralizedData) -> String {
    let mut text = capitalize(&gd.record_type.data_noun());

    if let Some(name) = gd.full_name() {
        text.push_str(" of ");
        text.push_str(&name);
    }

    if gd.record_type.is_marriage_like() {
        if let Some(spouse) = first_spouse_name(gd) {
            text.push_str(" and ");
            text.push_str(&spouse);
        }
    }

    if let Some(date) = gd.inferred_event_date() {
        text.push(' ');
        text.push_str(&date_phrase(date));
    }

    if let Some(place) = place_phrase(gd) {
        text.push(' ');
        text.push_str(&place);
    }

    let mut details: Vec<String> = Vec::new();
    if gd.record_type == RecordType::BirthRegistration {
        if let Some(mmn) = gd.mothers_maiden_name.as_deref().filter(|m| !m.is_empty()) {
            details.push(format!("mother's maiden name {mmn}"));
        }
    }
    if gd.record_type.is_death_like() {
        if let Some(age) = gd.age_at_death.as_deref().or(gd.age_at_event.as_deref()) {
            details.push(format!("age at death {age}"));
        }
    } else if let Some(age) = gd.age_at_event.as_deref() {
        details.push(format!("age {age}"));
    }
    if let Some(relationship) = gd.relationship_to_head.as_deref() {
        details.push(format!("relationship to head {relationship}"));
    }
    if let Some(occupation) = gd.occupation.as_deref() {
        details.push(format!("occupation {occupation}"));
    }

    for detail in details.iter().filter(|d| !d.trim().is_empty()) {
        text.push_str("; ");
        text.push_str(detail);
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NameObj, PlaceObj, Spouse};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_birth_registration() {
        let gd = GeneralizedData {
            record_type: RecordType::BirthRegistration,
            name: NameObj::from_forenames_and_last_name(Some("John"), Some("Smith")),
            event_date: DateObj::from_year_and_quarter("1881", Some(1)),
            registration_district: Some("Pancras".to_string()),
            mothers_maiden_name: Some("Jones".to_string()),
            ..Default::default()
        };
        assert_eq!(
            standard_data_string(&gd),
            "Birth registration of John Smith in Jan-Feb-Mar 1881 in Pancras district; mother's maiden name Jones"
        );
    }

    #[test]
    fn test_marriage_with_spouse_and_place() {
        let gd = GeneralizedData {
            record_type: RecordType::Marriage,
            name: NameObj::from_full_name("Jan de Vries"),
            event_date: DateObj::from_date_string("3 May 1881"),
            event_place: PlaceObj::from_full_place_name("Amsterdam, Nederland"),
            spouses: vec![Spouse::new(NameObj::from_full_name("Maria Bakker"), None, None, None).unwrap()],
            age_at_event: Some("24".to_string()),
            ..Default::default()
        };
        assert_eq!(
            standard_data_string(&gd),
            "Marriage of Jan de Vries and Maria Bakker on 3 May 1881 in Amsterdam, Nederland; age 24"
        );
    }

    #[test]
    fn test_unnamed_unclassified_record() {
        let gd = GeneralizedData {
            event_date: DateObj::from_year_and_quarter("1900", None),
            ..Default::default()
        };
        assert_eq!(standard_data_string(&gd), "Record in 1900");
    }

    #[test]
    fn test_date_phrase() {
        assert_eq!(date_phrase(&DateObj::from_date_string("May 1881").unwrap()), "in May 1881");
        assert_eq!(date_phrase(&DateObj::from_date_string("12 May 1881").unwrap()), "on 12 May 1881");
        assert_eq!(date_phrase(&DateObj::from_date_string("1881").unwrap()), "in 1881");
    }
}
