//! Turns a site's extracted data into [`GeneralizedData`].
//!
//! Every reader accessor is called once, in a fixed order. Spouses are read
//! after the event date and place because marriage records pass those on.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{GeneralizeError, Result};
use crate::models::{GeneralizedData, standardize_relationship_to_head};
use crate::readers::ExtractedData;
use crate::sites::Site;

/// Generalize the extracted data of one page of a site.
pub fn generalize(site: Site, ed: &ExtractedData) -> Result<GeneralizedData> {
    info!("Generalizing {} extracted data ({} fields)", site, ed.len());

    let reader = site.reader(ed);
    if !reader.has_valid_data() {
        warn!("Extracted data for {} is not valid", site);
        return Err(GeneralizeError::InvalidData {
            site: site.key().to_string(),
        }
        .into());
    }

    let mut gd = GeneralizedData {
        source_of_data: site.key().to_string(),
        source_type: reader.source_type(),
        record_type: reader.record_type(),
        record_subtype: reader.record_subtype(),
        ..Default::default()
    };
    debug!("Record type: {:?}", gd.record_type);

    gd.name = reader.name_obj().filter(|n| !n.is_empty());
    gd.person_gender = reader.gender();

    gd.event_date = reader.event_date_obj();
    gd.event_place = reader.event_place_obj();
    gd.birth_date = reader.birth_date_obj();
    gd.birth_place = reader.birth_place_obj();
    gd.death_date = reader.death_date_obj();
    gd.death_place = reader.death_place_obj();

    gd.last_name_at_birth = reader.last_name_at_birth();
    gd.last_name_at_death = reader.last_name_at_death();
    gd.mothers_maiden_name = reader.mothers_maiden_name();

    gd.age_at_event = reader.age_at_event();
    gd.age_at_death = reader.age_at_death();
    gd.registration_district = reader.registration_district();
    gd.relationship_to_head = reader
        .relationship_to_head()
        .as_deref()
        .and_then(standardize_relationship_to_head);
    gd.marital_status = reader.marital_status();
    gd.occupation = reader.occupation();

    gd.spouses = reader.spouses(gd.event_date.as_ref(), gd.event_place.as_ref());
    gd.parents = reader.parents();
    gd.household = reader.household();
    gd.collection_data = reader.collection_data();

    Ok(gd)
}

/// Generalize extracted data given as any JSON value; only objects are accepted.
pub fn generalize_value(site: Site, ed: &Value) -> Result<GeneralizedData> {
    match ed {
        Value::Object(map) => generalize(site, map),
        _ => Err(GeneralizeError::NotAnObject.into()),
    }
}

/// The generalized data of a record linked from a household member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedRecord {
    pub link: String,
    pub gd: GeneralizedData,
}

/// Fill gaps in the household and the primary person from linked records.
///
/// Returns a new value; `gd` is left as it is.
pub fn regeneralize_with_linked_records(gd: &GeneralizedData, linked: &[LinkedRecord]) -> GeneralizedData {
    let mut result = gd.clone();
    let Some(household) = result.household.as_mut() else {
        return result;
    };

    let mut selected_record: Option<&GeneralizedData> = None;
    for member in &mut household.members {
        let Some(record) = member
            .link
            .as_deref()
            .and_then(|link| linked.iter().find(|r| r.link == link))
        else {
            continue;
        };
        let linked_gd = &record.gd;

        if member.age.is_none() {
            member.age = linked_gd.age_at_event.clone();
        }
        if member.birth_date.is_none() {
            member.birth_date = linked_gd.birth_date.as_ref().map(|d| d.date_string());
        }
        if member.birth_place.is_none() {
            member.birth_place = linked_gd.birth_place.as_ref().map(|p| p.place_string.clone());
        }
        if member.is_selected {
            selected_record = Some(linked_gd);
        }
    }

    if let Some(linked_gd) = selected_record {
        if result.birth_date.is_none() {
            result.birth_date = linked_gd.birth_date.clone();
        }
        if result.birth_place.is_none() {
            result.birth_place = linked_gd.birth_place.clone();
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourcerError;
    use crate::models::{DateObj, Household, HouseholdField, HouseholdMember, PlaceObj, RecordType};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_invalid_data_is_an_error() {
        let ed = ExtractedData::new();
        let err = generalize(Site::Freebmd, &ed).unwrap_err();
        assert!(matches!(
            err,
            SourcerError::Generalize(GeneralizeError::InvalidData { ref site }) if site == "freebmd"
        ));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = generalize_value(Site::Mh, &json!([1, 2])).unwrap_err();
        assert!(matches!(err, SourcerError::Generalize(GeneralizeError::NotAnObject)));
    }

    #[test]
    fn test_generalize_sets_source() {
        let ed = json!({
            "url": "https://en.wikipedia.org/wiki/Ada_Lovelace",
            "title": "Ada Lovelace"
        });
        let gd = generalize_value(Site::Wikipedia, &ed).unwrap();
        assert_eq!(gd.source_of_data, "wikipedia");
        assert_eq!(gd.full_name().as_deref(), Some("Ada Lovelace"));
        assert_eq!(gd.record_type, RecordType::Unclassified);
    }

    fn census_gd() -> GeneralizedData {
        GeneralizedData {
            record_type: RecordType::Census,
            household: Some(Household {
                fields: vec![HouseholdField::new("name", "Name"), HouseholdField::new("age", "Age")],
                members: vec![
                    HouseholdMember {
                        name: Some("John Smith".to_string()),
                        age: Some("40".to_string()),
                        link: Some("rec/1".to_string()),
                        ..Default::default()
                    },
                    HouseholdMember {
                        name: Some("Mary Smith".to_string()),
                        link: Some("rec/2".to_string()),
                        is_selected: true,
                        ..Default::default()
                    },
                ],
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_regeneralize_fills_missing_details() {
        let gd = census_gd();
        let linked = vec![
            LinkedRecord {
                link: "rec/1".to_string(),
                gd: GeneralizedData {
                    age_at_event: Some("41".to_string()),
                    ..Default::default()
                },
            },
            LinkedRecord {
                link: "rec/2".to_string(),
                gd: GeneralizedData {
                    age_at_event: Some("38".to_string()),
                    birth_date: DateObj::from_date_string("5 Jun 1843"),
                    birth_place: PlaceObj::from_full_place_name("Leeds, Yorkshire, England"),
                    ..Default::default()
                },
            },
        ];

        let result = regeneralize_with_linked_records(&gd, &linked);
        let members = &result.household.as_ref().unwrap().members;
        // existing values are kept
        assert_eq!(members[0].age.as_deref(), Some("40"));
        assert_eq!(members[1].age.as_deref(), Some("38"));
        assert_eq!(members[1].birth_date.as_deref(), Some("5 Jun 1843"));
        assert_eq!(result.birth_date.unwrap().date_string(), "5 Jun 1843");
        assert_eq!(
            result.birth_place.unwrap().place_string,
            "Leeds, Yorkshire, England"
        );

        // the input is untouched
        assert_eq!(gd, census_gd());
    }

    #[test]
    fn test_regeneralize_without_household_is_a_copy() {
        let gd = GeneralizedData {
            record_type: RecordType::Birth,
            ..Default::default()
        };
        assert_eq!(regeneralize_with_linked_records(&gd, &[]), gd);
    }
}
