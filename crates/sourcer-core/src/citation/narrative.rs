//! Narrative sentences that introduce a citation, e.g.
//! `John Smith's birth was registered in the Jan-Feb-Mar quarter of 1881 in the Pancras district.`

use super::data_string::{capitalize, date_phrase, first_spouse_name};
use crate::models::{DateObj, GeneralizedData, RecordType};
use crate::normalize::dates::quarter_label;

fn possessive(name: &str) -> String {
    if name.ends_with('s') {
        format!("{name}'")
    } else {
        format!("{name}'s")
    }
}

/// Like `date_phrase` but quarters read as `in the Jan-Feb-Mar quarter of 1881`.
fn narrative_date_phrase(date: &DateObj) -> String {
    match date {
        DateObj::Quarter { year, quarter } => match quarter_label(*quarter) {
            Some(label) => format!("in the {label} quarter of {year}"),
            None => format!("in {year}"),
        },
        other => date_phrase(other),
    }
}

fn narrative_place_phrase(gd: &GeneralizedData) -> Option<String> {
    if let Some(district) = gd.registration_district.as_deref().filter(|d| !d.is_empty()) {
        return Some(format!("in the {district} district"));
    }
    gd.inferred_event_place()
        .map(|p| p.place_string.trim())
        .filter(|p| !p.is_empty())
        .map(|p| format!("in {p}"))
}

fn push_when_and_where(sentence: &mut String, gd: &GeneralizedData) {
    if let Some(date) = gd.inferred_event_date() {
        sentence.push(' ');
        sentence.push_str(&narrative_date_phrase(date));
    }
    if let Some(place) = narrative_place_phrase(gd) {
        sentence.push(' ');
        sentence.push_str(&place);
    }
}

/// One sentence describing the event of the record.
pub fn standard_narrative(gd: &GeneralizedData) -> String {
    let name = gd.name_or_this_person();

    let mut sentence = match gd.record_type {
        RecordType::BirthRegistration => format!("{} birth was registered", possessive(&name)),
        RecordType::MarriageRegistration => match first_spouse_name(gd) {
            Some(spouse) => format!("{} marriage to {spouse} was registered", possessive(&name)),
            None => format!("{} marriage was registered", possessive(&name)),
        },
        RecordType::DeathRegistration => match gd.age_at_death.as_deref().or(gd.age_at_event.as_deref()) {
            Some(age) => format!("{} death at age {age} was registered", possessive(&name)),
            None => format!("{} death was registered", possessive(&name)),
        },
        RecordType::Birth => format!("{name} was born"),
        RecordType::Baptism | RecordType::BirthOrBaptism => format!("{name} was baptised"),
        RecordType::Marriage => match first_spouse_name(gd) {
            Some(spouse) => format!("{name} married {spouse}"),
            None => format!("{name} was married"),
        },
        RecordType::Death | RecordType::DeathOrBurial => format!("{name} died"),
        RecordType::Burial => format!("{name} was buried"),
        RecordType::Census | RecordType::PopulationRegister => {
            let mut s = name.clone();
            if let Some(age) = gd.age_at_event.as_deref() {
                s.push_str(&format!(", age {age},"));
            }
            s.push_str(" was living");
            if let Some(place) = narrative_place_phrase(gd) {
                s.push(' ');
                s.push_str(&place);
            }
            if let Some(year) = gd.inferred_event_year() {
                s.push_str(&format!(" in {year}"));
            }
            s.push('.');
            return s;
        }
        other if other != RecordType::Unclassified => {
            format!("{name} was in a {} record", other.data_noun())
        }
        _ => format!("{name} was in a record"),
    };

    push_when_and_where(&mut sentence, gd);
    sentence = capitalize(sentence.trim());
    sentence.push('.');
    sentence
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NameObj, PlaceObj};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_birth_registration_narrative() {
        let gd = GeneralizedData {
            record_type: RecordType::BirthRegistration,
            name: NameObj::from_forenames_and_last_name(Some("John"), Some("Smith")),
            event_date: DateObj::from_year_and_quarter("1881", Some(1)),
            registration_district: Some("Pancras".to_string()),
            ..Default::default()
        };
        assert_eq!(
            standard_narrative(&gd),
            "John Smith's birth was registered in the Jan-Feb-Mar quarter of 1881 in the Pancras district."
        );
    }

    #[test]
    fn test_fallback_narrative() {
        let gd = GeneralizedData {
            event_date: DateObj::from_year_and_quarter("1896", None),
            ..Default::default()
        };
        assert_eq!(standard_narrative(&gd), "This person was in a record in 1896.");
    }

    #[test]
    fn test_census_narrative() {
        let gd = GeneralizedData {
            record_type: RecordType::Census,
            name: NameObj::from_full_name("Mary Jones"),
            age_at_event: Some("30".to_string()),
            event_date: DateObj::from_year_and_quarter("1911", None),
            event_place: PlaceObj::from_full_place_name("Dublin, Ireland"),
            ..Default::default()
        };
        assert_eq!(
            standard_narrative(&gd),
            "Mary Jones, age 30, was living in Dublin, Ireland in 1911."
        );
    }

    #[test]
    fn test_possessive_of_name_ending_in_s() {
        let gd = GeneralizedData {
            record_type: RecordType::DeathRegistration,
            name: NameObj::from_full_name("James Hughes"),
            age_at_death: Some("64".to_string()),
            event_date: DateObj::from_year_and_quarter("1901", Some(3)),
            ..Default::default()
        };
        assert_eq!(
            standard_narrative(&gd),
            "James Hughes' death at age 64 was registered in the Jul-Aug-Sep quarter of 1901."
        );
    }
}
