//! Common regex patterns for name, date and citation string normalization.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Any run of whitespace
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // Single periods inside a name, ellipses are left alone
    pub static ref INNER_SINGLE_PERIOD: Regex = Regex::new(r"([^.])\.([^.])").unwrap();
    pub static ref LEADING_SINGLE_PERIOD: Regex = Regex::new(r"^\.([^.])").unwrap();
    pub static ref TRAILING_SINGLE_PERIOD: Regex = Regex::new(r"([^.])\.$").unwrap();

    // MyHeritage date shapes
    pub static ref MH_YEAR_ONLY: Regex = Regex::new(r"^\d{4}$").unwrap();
    pub static ref MH_QUARTER_SHORT: Regex = Regex::new(
        r"^[A-Z][a-z][a-z]-[A-Z][a-z][a-z]-[A-Z][a-z][a-z]\s+\d{4}$"
    ).unwrap();
    pub static ref MH_QUARTER_LONG: Regex = Regex::new(
        r"^([A-Z][a-z][a-z])[a-z]*-([A-Z][a-z][a-z])[a-z]*-([A-Z][a-z][a-z])[a-z]*\s+(\d{4})$"
    ).unwrap();
    pub static ref MH_MONTH_DAY_YEAR: Regex = Regex::new(
        r"^([A-Za-z][a-z][a-z])\s+(\d\d?)\s+(\d{4})$"
    ).unwrap();

    // Pieces of a free-form date string
    pub static ref DATE_YEAR: Regex = Regex::new(r"\b(\d{4})\b").unwrap();
    pub static ref DATE_DAY: Regex = Regex::new(r"^(\d{1,2})\b").unwrap();
    pub static ref DATE_MONTH: Regex = Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\b"
    ).unwrap();

    // Wikipedia language prefix, e.g. https://de.wikipedia.org/wiki/Georg_Thoma
    pub static ref WIKIPEDIA_LANG: Regex = Regex::new(r"^https?://(\w+)\.wikipedia").unwrap();

    // FamilySearch plain citation: "Title" 1896 https://... Accessed ...
    pub static ref FS_CITATION: Regex = Regex::new(
        r#"^"([^"]+)"\s+(\d{4}) (http.*)$"#
    ).unwrap();
    pub static ref FS_CITATION_LINK: Regex = Regex::new(r"^(http.*)\. Accessed").unwrap();
    pub static ref FS_TITLE_JOIN: Regex = Regex::new(r"\s+in\s+the\s+").unwrap();

    // WieWasWie collection remainder: ", Label:" starts a new part
    pub static ref WWW_COLLECTION_REMAINDER: Regex = Regex::new(r",\s+[^,:]+:").unwrap();

    // NZ BDM registration number, e.g. 1881/12345
    pub static ref NZBDM_REGISTRATION_YEAR: Regex = Regex::new(r"^(\d{4})/").unwrap();

    // Citation punctuation cleanup
    pub static ref EMPTY_COMMA_PART: Regex = Regex::new(r",\s*,").unwrap();
    pub static ref SPACE_BEFORE_PUNCT: Regex = Regex::new(r"\s+([,.;])").unwrap();
}
