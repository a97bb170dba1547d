//! String normalization for names, dates and citation text.

pub mod abbreviations;
pub mod dates;
pub mod names;
pub mod patterns;

pub use abbreviations::{abbreviation_to_full, expand_abbreviated_forenames, full_to_abbreviation};
pub use dates::{clean_mh_date, date_sort_key, format_accessed_date, format_ddmmyyyy, quarter_label};
pub use names::{collapse_whitespace, convert_name_from_all_caps_to_mixed_case, correctly_cased_surname};
