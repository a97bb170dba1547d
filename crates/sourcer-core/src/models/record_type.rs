//! Record type classification shared by every site.

use serde::{Deserialize, Serialize};

/// The genealogical event or document a record describes.
///
/// Serialized with the variant name, e.g. `"BirthRegistration"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RecordType {
    #[default]
    Unclassified,
    Apprenticeship,
    Baptism,
    Birth,
    BirthOrBaptism,
    BirthRegistration,
    Burial,
    Census,
    Certificate,
    Confirmation,
    ConvictTransportation,
    CourtRecord,
    Cremation,
    CriminalRegister,
    Death,
    DeathOrBurial,
    DeathRegistration,
    Directory,
    Divorce,
    ElectoralRegister,
    Emigration,
    Employment,
    FamHistOrPedigree,
    FreedomOfCity,
    FreemasonMembership,
    GovernmentDocument,
    Immigration,
    LandGrant,
    LandTax,
    Lease,
    Marriage,
    MarriageRegistration,
    MedicalPatient,
    Membership,
    Memorial,
    Military,
    Naturalization,
    Newspaper,
    Obituary,
    OtherChurchEvent,
    PassengerList,
    Patent,
    Pension,
    PopulationRegister,
    Probate,
    QuarterSessions,
    Residence,
    SchoolRecords,
    SlaveSchedule,
    SocialSecurity,
    Tax,
    ValuationRoll,
    Will,
    WorkhouseRecord,
}

impl RecordType {
    /// A short human readable title, used as the meaningful title of a citation.
    pub fn ref_title(self) -> &'static str {
        match self {
            Self::Unclassified => "Unclassified",
            Self::Apprenticeship => "Apprenticeship",
            Self::Baptism => "Baptism",
            Self::Birth => "Birth",
            Self::BirthOrBaptism => "Birth or Baptism",
            Self::BirthRegistration => "Birth Registration",
            Self::Burial => "Burial",
            Self::Census => "Census",
            Self::Certificate => "Certificate",
            Self::Confirmation => "Confirmation",
            Self::ConvictTransportation => "Convict Transportation",
            Self::CourtRecord => "Court Record",
            Self::Cremation => "Cremation",
            Self::CriminalRegister => "Criminal Register",
            Self::Death => "Death",
            Self::DeathOrBurial => "Death or Burial",
            Self::DeathRegistration => "Death Registration",
            Self::Directory => "Directory",
            Self::Divorce => "Divorce",
            Self::ElectoralRegister => "Electoral Register",
            Self::Emigration => "Emigration",
            Self::Employment => "Employment",
            Self::FamHistOrPedigree => "Family History",
            Self::FreedomOfCity => "Freedom of City",
            Self::FreemasonMembership => "Freemason Membership",
            Self::GovernmentDocument => "Government Document",
            Self::Immigration => "Immigration",
            Self::LandGrant => "Land Grant",
            Self::LandTax => "Land Tax",
            Self::Lease => "Lease",
            Self::Marriage => "Marriage",
            Self::MarriageRegistration => "Marriage Registration",
            Self::MedicalPatient => "Medical Patient",
            Self::Membership => "Membership",
            Self::Memorial => "Memorial",
            Self::Military => "Military",
            Self::Naturalization => "Naturalization",
            Self::Newspaper => "Newspaper",
            Self::Obituary => "Obituary",
            Self::OtherChurchEvent => "Church Event",
            Self::PassengerList => "Passenger List",
            Self::Patent => "Patent",
            Self::Pension => "Pension",
            Self::PopulationRegister => "Population Register",
            Self::Probate => "Probate",
            Self::QuarterSessions => "Quarter Sessions",
            Self::Residence => "Residence",
            Self::SchoolRecords => "School Records",
            Self::SlaveSchedule => "Slave Schedule",
            Self::SocialSecurity => "Social Security",
            Self::Tax => "Tax",
            Self::ValuationRoll => "Valuation Roll",
            Self::Will => "Will",
            Self::WorkhouseRecord => "Workhouse Record",
        }
    }

    /// Lowercase noun phrase for the record in a data sentence, e.g. `birth registration`.
    pub fn data_noun(self) -> String {
        match self {
            Self::Unclassified => "record".to_string(),
            Self::FamHistOrPedigree => "family history".to_string(),
            Self::OtherChurchEvent => "church record".to_string(),
            other => other.ref_title().to_lowercase(),
        }
    }

    /// Parse the variant name used in serialized generalized data.
    pub fn from_name(name: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(name.to_string())).ok()
    }

    /// True for records that register or describe a birth.
    pub fn is_birth_like(self) -> bool {
        matches!(
            self,
            Self::Birth | Self::BirthRegistration | Self::Baptism | Self::BirthOrBaptism
        )
    }

    /// True for records that register or describe a death.
    pub fn is_death_like(self) -> bool {
        matches!(
            self,
            Self::Death
                | Self::DeathRegistration
                | Self::Burial
                | Self::DeathOrBurial
                | Self::Cremation
                | Self::Obituary
        )
    }

    /// True for records of a marriage event.
    pub fn is_marriage_like(self) -> bool {
        matches!(self, Self::Marriage | Self::MarriageRegistration)
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.ref_title())
    }
}

/// A finer classification within a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordSubtype {
    MemberRegistration,
    Banns,
    MarriageLicense,
    MarriageBond,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_type_names() {
        assert_eq!(RecordType::from_name("BirthRegistration"), Some(RecordType::BirthRegistration));
        assert_eq!(RecordType::from_name("NotAType"), None);
        assert_eq!(
            serde_json::to_string(&RecordType::MarriageRegistration).unwrap(),
            "\"MarriageRegistration\""
        );
    }

    #[test]
    fn test_titles_and_nouns() {
        assert_eq!(RecordType::BirthRegistration.ref_title(), "Birth Registration");
        assert_eq!(RecordType::BirthRegistration.data_noun(), "birth registration");
        assert_eq!(RecordType::Unclassified.data_noun(), "record");
        assert_eq!(RecordType::Census.to_string(), "Census");
    }

    #[test]
    fn test_event_families() {
        assert!(RecordType::Baptism.is_birth_like());
        assert!(RecordType::Burial.is_death_like());
        assert!(RecordType::MarriageRegistration.is_marriage_like());
        assert!(!RecordType::Census.is_marriage_like());
    }
}
