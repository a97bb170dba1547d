//! New Zealand Births, Deaths & Marriages historical records search results.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{Site, invalid};
use crate::citation::CitationBuilder;
use crate::error::CitationError;
use crate::models::{
    CollectionData, DateObj, GeneralizedData, NameObj, Parents, PlaceObj, RecordType, Spouse,
};
use crate::normalize::correctly_cased_surname;
use crate::normalize::patterns::NZBDM_REGISTRATION_YEAR;
use crate::readers::{EdReader, ExtractedData, clean, parse_view};

const SEARCH_URL: &str = "https://www.bdmhistoricalrecords.dia.govt.nz/search";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct NzbdmEd {
    success: bool,
    record_type: Option<String>,
    record_data: BTreeMap<String, String>,
}

impl NzbdmEd {
    fn value(&self, key: &str) -> Option<String> {
        clean(self.record_data.get(key).map(String::as_str))
    }
}

pub struct NzbdmReader {
    ed: Option<NzbdmEd>,
    record_type: RecordType,
}

impl NzbdmReader {
    pub fn new(ed: &ExtractedData) -> Self {
        let ed: Option<NzbdmEd> = parse_view(Site::Nzbdm.key(), ed);
        let record_type = match ed.as_ref().and_then(|e| e.record_type.as_deref()) {
            Some("Births") => RecordType::BirthRegistration,
            Some("Deaths") => RecordType::DeathRegistration,
            Some("Marriages") => RecordType::MarriageRegistration,
            _ => RecordType::Unclassified,
        };
        Self { ed, record_type }
    }

    fn value(&self, key: &str) -> Option<String> {
        self.ed.as_ref()?.value(key)
    }

    fn family_name(&self) -> Option<String> {
        self.value("Family Name").map(|s| correctly_cased_surname(&s))
    }

    fn registration_number(&self) -> Option<String> {
        self.value("Registration Number")
    }

    fn registration_year(&self) -> Option<String> {
        let number = self.registration_number()?;
        let year = NZBDM_REGISTRATION_YEAR.captures(&number)?.get(1)?.as_str().to_string();
        Some(year)
    }

    /// The death index column holds either a birth date or an age, e.g. `54Y`.
    fn death_birth_or_age(&self) -> Option<String> {
        self.value("Date of Birth/Age at Death")
    }
}

fn is_age(value: &str) -> bool {
    let value = value.trim_end_matches(['Y', 'y']).trim();
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

impl EdReader for NzbdmReader {
    fn has_valid_data(&self) -> bool {
        self.ed.as_ref().is_some_and(|e| e.success) && self.record_type != RecordType::Unclassified
    }

    fn record_type(&self) -> RecordType {
        self.record_type
    }

    fn name_obj(&self) -> Option<NameObj> {
        NameObj::from_forenames_and_last_name(
            self.value("Given Name(s)").as_deref(),
            self.family_name().as_deref(),
        )
    }

    fn event_date_obj(&self) -> Option<DateObj> {
        DateObj::from_year_and_quarter(&self.registration_year()?, None)
    }

    fn event_place_obj(&self) -> Option<PlaceObj> {
        PlaceObj::from_full_place_name("New Zealand")
    }

    fn birth_date_obj(&self) -> Option<DateObj> {
        match self.record_type {
            RecordType::BirthRegistration => self.event_date_obj(),
            RecordType::DeathRegistration => {
                let value = self.death_birth_or_age()?;
                (!is_age(&value)).then(|| DateObj::from_date_string(&value)).flatten()
            }
            _ => None,
        }
    }

    fn death_date_obj(&self) -> Option<DateObj> {
        (self.record_type == RecordType::DeathRegistration)
            .then(|| self.event_date_obj())
            .flatten()
    }

    fn last_name_at_birth(&self) -> Option<String> {
        (self.record_type == RecordType::BirthRegistration)
            .then(|| self.family_name())
            .flatten()
    }

    fn last_name_at_death(&self) -> Option<String> {
        (self.record_type == RecordType::DeathRegistration)
            .then(|| self.family_name())
            .flatten()
    }

    fn age_at_death(&self) -> Option<String> {
        if self.record_type != RecordType::DeathRegistration {
            return None;
        }
        let value = self.death_birth_or_age()?;
        is_age(&value).then(|| value.trim_end_matches(['Y', 'y']).trim().to_string())
    }

    fn spouse_obj(&self, event_date: Option<&DateObj>, event_place: Option<&PlaceObj>) -> Option<Spouse> {
        if self.record_type != RecordType::MarriageRegistration {
            return None;
        }
        let surname = self.value("Spouse's Family Name").map(|s| correctly_cased_surname(&s));
        let name = NameObj::from_forenames_and_last_name(
            self.value("Spouse's Given Name(s)").as_deref(),
            surname.as_deref(),
        );
        Spouse::new(name, event_date.cloned(), event_place.cloned(), None)
    }

    fn parents(&self) -> Option<Parents> {
        // only births and deaths list parents, by given names
        let family_name = self.family_name();
        let with_family_name = |given: Option<String>| {
            let given = given?;
            Some(match &family_name {
                Some(family) => format!("{given} {family}"),
                None => given,
            })
        };
        let father = with_family_name(self.value("Father's Given Name(s)"));
        let mother = self.value("Mother's Given Name(s)");
        Parents::from_full_names(father.as_deref(), mother.as_deref())
    }

    fn collection_data(&self) -> Option<CollectionData> {
        Some(CollectionData {
            registration_number: Some(self.registration_number()?),
            ..Default::default()
        })
    }
}

pub fn build_citation(
    ed: &ExtractedData,
    gd: &GeneralizedData,
    builder: &mut CitationBuilder<'_>,
) -> Result<(), CitationError> {
    let reader = NzbdmReader::new(ed);
    if reader.ed.is_none() {
        return Err(invalid(Site::Nzbdm));
    }

    builder.source_title = "New Zealand Births, Deaths & Marriages Online".to_string();
    if let Some(number) = reader.registration_number() {
        let kind = match gd.record_type {
            RecordType::BirthRegistration => "Birth ",
            RecordType::DeathRegistration => "Death ",
            RecordType::MarriageRegistration => "Marriage ",
            _ => "",
        };
        builder.source_reference = format!("{kind}Registration Number: {number}");
    }
    builder.record_link_or_template = format!("[{SEARCH_URL} New Zealand BDM Online]");
    builder.add_standard_data_string(gd);
    builder.add_narrative(gd);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citation::CitationType;
    use chrono::NaiveDate;
    use crate::models::Options;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ed(record_type: &str, data: serde_json::Value) -> ExtractedData {
        json!({"success": true, "recordType": record_type, "recordData": data})
            .as_object()
            .unwrap()
            .clone()
    }

    #[test]
    fn test_birth_registration() {
        let ed = ed(
            "Births",
            json!({
                "Registration Number": "1881/12345",
                "Family Name": "MCLELLAN",
                "Given Name(s)": "Alexander James",
                "Mother's Given Name(s)": "Mary",
                "Father's Given Name(s)": "John"
            }),
        );
        let r = NzbdmReader::new(&ed);
        assert!(r.has_valid_data());
        assert_eq!(r.record_type(), RecordType::BirthRegistration);
        let name = r.name_obj().unwrap();
        assert_eq!(name.last_name.as_deref(), Some("McLellan"));
        assert_eq!(r.event_date_obj().unwrap().date_string(), "1881");
        assert_eq!(r.last_name_at_birth().as_deref(), Some("McLellan"));
        let father = r.parents().unwrap().father.unwrap();
        assert_eq!(father.name.unwrap().full_name.as_deref(), Some("John McLellan"));
    }

    #[test]
    fn test_death_age_or_birth_date() {
        let with_age = ed(
            "Deaths",
            json!({"Registration Number": "1920/555", "Family Name": "SMITH", "Date of Birth/Age at Death": "54Y"}),
        );
        let r = NzbdmReader::new(&with_age);
        assert_eq!(r.age_at_death().as_deref(), Some("54"));
        assert_eq!(r.birth_date_obj(), None);

        let with_date = ed(
            "Deaths",
            json!({"Registration Number": "1980/77", "Date of Birth/Age at Death": "12 March 1890"}),
        );
        let r = NzbdmReader::new(&with_date);
        assert_eq!(r.age_at_death(), None);
        assert_eq!(r.birth_date_obj().unwrap().date_string(), "12 March 1890");
    }

    #[test]
    fn test_unknown_record_type_is_invalid() {
        let r = NzbdmReader::new(&ed("Adoptions", json!({})));
        assert!(!r.has_valid_data());
    }

    #[test]
    fn test_citation_parts() {
        let ed = ed("Marriages", json!({"Registration Number": "1901/42", "Family Name": "BROWN"}));
        let gd = GeneralizedData {
            record_type: RecordType::MarriageRegistration,
            ..Default::default()
        };
        let options = Options::default();
        let mut builder = CitationBuilder::new(
            CitationType::Source,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            &options,
        );
        build_citation(&ed, &gd, &mut builder).unwrap();
        assert_eq!(builder.source_reference, "Marriage Registration Number: 1901/42");
        assert_eq!(
            builder.record_link_or_template,
            "[https://www.bdmhistoricalrecords.dia.govt.nz/search New Zealand BDM Online]"
        );
    }
}
