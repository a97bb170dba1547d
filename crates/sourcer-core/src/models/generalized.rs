//! The site-independent record representation produced by generalization.

use serde::{Deserialize, Serialize};

use super::{DateObj, NameObj, PlaceObj, RecordSubtype, RecordType};

/// Whether the page was a record or a person profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Record,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse gender text from a record, e.g. `Male`, `F`, `Man`, `Vrouw`.
    pub fn from_record_text(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "male" | "m" | "man" | "son" | "husband" => Some(Self::Male),
            "female" | "f" | "vrouw" | "daughter" | "wife" => Some(Self::Female),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<NameObj>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parents {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father: Option<Parent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother: Option<Parent>,
}

impl Parents {
    /// Parents from full names; `None` when neither name is given.
    pub fn from_full_names(father: Option<&str>, mother: Option<&str>) -> Option<Self> {
        let father = father.and_then(NameObj::from_full_name).map(|name| Parent { name: Some(name) });
        let mother = mother.and_then(NameObj::from_full_name).map(|name| Parent { name: Some(name) });
        if father.is_none() && mother.is_none() {
            return None;
        }
        Some(Self { father, mother })
    }
}

/// A spouse of the primary person, with the marriage details when known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spouse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<NameObj>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub marriage_date: Option<DateObj>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub marriage_place: Option<PlaceObj>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_gender: Option<Gender>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parents: Option<Parents>,
}

impl Spouse {
    /// A spouse needs at least a name, a marriage date or a marriage place.
    pub fn new(
        name: Option<NameObj>,
        marriage_date: Option<DateObj>,
        marriage_place: Option<PlaceObj>,
        age: Option<String>,
    ) -> Option<Self> {
        if name.is_none() && marriage_date.is_none() && marriage_place.is_none() {
            return None;
        }
        Some(Self {
            name,
            marriage_date,
            marriage_place,
            age: age.filter(|a| !a.is_empty()),
            ..Default::default()
        })
    }
}

/// One column of a household table: the member field key and its heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdField {
    pub key: String,
    pub heading: String,
}

impl HouseholdField {
    pub fn new(key: &str, heading: &str) -> Self {
        Self {
            key: key.to_string(),
            heading: heading.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HouseholdMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,

    /// Link to the member's own record, used to fill in missing details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// The member whose record this is.
    pub is_selected: bool,

    /// Details withheld by the site (e.g. people who may still be living).
    pub is_closed: bool,
}

impl HouseholdMember {
    /// The value of a member field by its key.
    pub fn field(&self, key: &str) -> Option<&str> {
        match key {
            "name" => self.name.as_deref(),
            "age" => self.age.as_deref(),
            "relationship" => self.relationship.as_deref(),
            "maritalStatus" => self.marital_status.as_deref(),
            "gender" => self.gender.as_deref(),
            "occupation" => self.occupation.as_deref(),
            "birthDate" => self.birth_date.as_deref(),
            "birthPlace" => self.birth_place.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    pub fields: Vec<HouseholdField>,
    pub members: Vec<HouseholdMember>,
}

impl Household {
    pub fn selected_member(&self) -> Option<&HouseholdMember> {
        self.members.iter().find(|m| m.is_selected)
    }
}

/// Archive collection details such as a volume and page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
}

/// Normalize a relationship to the head of household, e.g. `Daur` to `daughter`.
pub fn standardize_relationship_to_head(relationship: &str) -> Option<String> {
    let lower = relationship.trim().trim_end_matches('.').to_lowercase();
    if lower.is_empty() {
        return None;
    }
    let standard = match lower.as_str() {
        "head" | "head of household" | "head of family" | "self" => "head",
        "wife" | "wf" => "wife",
        "husband" | "husb" => "husband",
        "son" => "son",
        "daughter" | "dau" | "daur" | "dr" => "daughter",
        "son-in-law" | "son in law" => "son-in-law",
        "daughter-in-law" | "daughter in law" | "dau in law" => "daughter-in-law",
        "stepson" | "step son" | "step-son" => "stepson",
        "stepdaughter" | "step daughter" | "step-daughter" => "stepdaughter",
        "grandson" | "grand son" => "grandson",
        "granddaughter" | "grand daughter" | "grand dau" => "granddaughter",
        "father" => "father",
        "mother" => "mother",
        "father-in-law" | "father in law" => "father-in-law",
        "mother-in-law" | "mother in law" => "mother-in-law",
        "brother" => "brother",
        "sister" => "sister",
        "brother-in-law" | "brother in law" => "brother-in-law",
        "sister-in-law" | "sister in law" => "sister-in-law",
        "nephew" => "nephew",
        "niece" => "niece",
        "servant" | "serv" | "serv." => "servant",
        "lodger" => "lodger",
        "boarder" => "boarder",
        "visitor" => "visitor",
        other => other,
    };
    Some(standard.to_string())
}

/// The normalized data for one record or profile page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralizedData {
    /// Site key, e.g. `freebmd`.
    pub source_of_data: String,
    pub source_type: SourceType,
    pub record_type: RecordType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_subtype: Option<RecordSubtype>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<NameObj>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_gender: Option<Gender>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<DateObj>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_place: Option<PlaceObj>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<DateObj>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<PlaceObj>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_date: Option<DateObj>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_place: Option<PlaceObj>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name_at_birth: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name_at_death: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mothers_maiden_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_at_event: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_at_death: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_district: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_to_head: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spouses: Vec<Spouse>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parents: Option<Parents>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub household: Option<Household>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_data: Option<CollectionData>,
}

impl GeneralizedData {
    pub fn full_name(&self) -> Option<String> {
        self.name.as_ref().and_then(NameObj::inferred_full_name)
    }

    /// The event date, or the birth or death date for records of those events.
    pub fn inferred_event_date(&self) -> Option<&DateObj> {
        if let Some(date) = &self.event_date {
            return Some(date);
        }
        if self.record_type.is_birth_like() {
            return self.birth_date.as_ref();
        }
        if self.record_type.is_death_like() {
            return self.death_date.as_ref();
        }
        None
    }

    pub fn inferred_event_year(&self) -> Option<String> {
        self.inferred_event_date().and_then(DateObj::year)
    }

    /// The event place, or the birth or death place for records of those events.
    pub fn inferred_event_place(&self) -> Option<&PlaceObj> {
        if let Some(place) = &self.event_place {
            return Some(place);
        }
        if self.record_type.is_birth_like() {
            return self.birth_place.as_ref();
        }
        if self.record_type.is_death_like() {
            return self.death_place.as_ref();
        }
        None
    }

    /// A title for the record such as `Birth Registration`.
    pub fn ref_title(&self) -> &'static str {
        self.record_type.ref_title()
    }

    /// The primary person's full name, or `This person` when unnamed.
    pub fn name_or_this_person(&self) -> String {
        self.full_name().unwrap_or_else(|| "This person".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_relationship_standardization() {
        assert_eq!(standardize_relationship_to_head("Daur").as_deref(), Some("daughter"));
        assert_eq!(standardize_relationship_to_head(" Head ").as_deref(), Some("head"));
        assert_eq!(standardize_relationship_to_head("Cousin").as_deref(), Some("cousin"));
        assert_eq!(standardize_relationship_to_head(""), None);
    }

    #[test]
    fn test_gender_from_text() {
        assert_eq!(Gender::from_record_text("Male"), Some(Gender::Male));
        assert_eq!(Gender::from_record_text("Vrouw"), Some(Gender::Female));
        assert_eq!(Gender::from_record_text("unknown"), None);
    }

    #[test]
    fn test_inferred_event_date_for_birth() {
        let gd = GeneralizedData {
            record_type: RecordType::Baptism,
            birth_date: DateObj::from_date_string("1 Jan 1850"),
            ..Default::default()
        };
        assert_eq!(gd.inferred_event_year().as_deref(), Some("1850"));
        assert_eq!(gd.name_or_this_person(), "This person");
    }

    #[test]
    fn test_spouse_requires_some_data() {
        assert_eq!(Spouse::new(None, None, None, Some("30".to_string())), None);
        let spouse = Spouse::new(NameObj::from_full_name("Ann Lee"), None, None, Some(String::new())).unwrap();
        assert_eq!(spouse.age, None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let gd = GeneralizedData {
            source_of_data: "freebmd".to_string(),
            record_type: RecordType::BirthRegistration,
            last_name_at_birth: Some("Smith".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&gd).unwrap();
        assert_eq!(json["sourceOfData"], "freebmd");
        assert_eq!(json["recordType"], "BirthRegistration");
        assert_eq!(json["sourceType"], "record");
        assert_eq!(json["lastNameAtBirth"], "Smith");
        assert!(json.get("spouses").is_none());
    }
}
