//! Core library for genealogy record generalization and WikiTree citations.
//!
//! This crate provides:
//! - Name, date and place normalization (all-caps names, abbreviated forenames)
//! - Per-site readers of extracted page data (FreeBMD, FamilySearch, MyHeritage, ...)
//! - Generalized data, the site independent description of a record
//! - Citation building in inline, source and narrative styles
//! - Household tables and FamilySearch "all citations" aggregation

pub mod aggregate;
pub mod citation;
pub mod classify;
pub mod error;
pub mod fetch;
pub mod generalize;
pub mod models;
pub mod normalize;
pub mod readers;
#[cfg(feature = "native")]
pub mod session;
pub mod sites;
pub mod table;

pub use error::{CitationError, FetchError, GeneralizeError, Result, SourcerError};
pub use models::{DateObj, GeneralizedData, NameObj, Options, PlaceObj, RecordType};
pub use readers::{EdReader, ExtractedData};
pub use sites::Site;
pub use generalize::{LinkedRecord, generalize, generalize_value, regeneralize_with_linked_records};
pub use citation::{CitationInput, CitationObject, CitationType, build_citation};
pub use table::{TableObject, build_household_table};
pub use fetch::{MemoryFetcher, RecordFetcher, parse_json_body};
pub use aggregate::{AllCitations, FsSource, build_all_citations, build_citations_for_sources};
pub use normalize::{abbreviation_to_full, convert_name_from_all_caps_to_mixed_case, full_to_abbreviation};

#[cfg(feature = "native")]
pub use session::{ActionOutcome, PopupSession, RetryPolicy, SharingData, run_action};
