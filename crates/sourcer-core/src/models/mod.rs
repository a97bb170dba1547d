//! Data models for generalized records and formatting options.

pub mod date;
pub mod generalized;
pub mod name;
pub mod options;
pub mod place;
pub mod record_type;

pub use date::DateObj;
pub use generalized::{
    CollectionData, Gender, GeneralizedData, Household, HouseholdField, HouseholdMember, Parent,
    Parents, SourceType, Spouse, standardize_relationship_to_head,
};
pub use name::NameObj;
pub use options::Options;
pub use place::PlaceObj;
pub use record_type::{RecordSubtype, RecordType};
