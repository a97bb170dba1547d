//! Details scraped from FamilySearch's own citation text.
//!
//! Used for sources whose record could not be fetched. FamilySearch
//! citations look like
//! `"England Births and Christenings, 1538-1975", database, FamilySearch ... 1896 https://... Accessed 3 May 2024.`

use crate::normalize::patterns::{FS_CITATION, FS_CITATION_LINK, FS_TITLE_JOIN};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCitation {
    pub sort_year: Option<String>,
    pub first_sentence: Option<String>,
    pub link: Option<String>,
    /// The name of the person as FamilySearch titles the source.
    pub pref_name: Option<String>,
}

/// Parse a FamilySearch citation string; `None` when it does not have the usual shape.
///
/// The preferred name is taken from `title` when given, otherwise from the
/// first sentence, as the text before ` in the `.
pub fn parse_fs_citation(citation: &str, title: Option<&str>) -> Option<ParsedCitation> {
    let captures = FS_CITATION.captures(citation)?;
    let first_sentence = captures.get(1).map(|m| m.as_str().to_string());
    let sort_year = captures.get(2).map(|m| m.as_str().to_string());
    let link = captures
        .get(3)
        .and_then(|rest| FS_CITATION_LINK.captures(rest.as_str()))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    let title = title.filter(|t| !t.is_empty()).or(first_sentence.as_deref());
    let pref_name = title
        .and_then(|t| FS_TITLE_JOIN.find(t).map(|m| t[..m.start()].to_string()))
        .filter(|n| !n.is_empty());

    Some(ParsedCitation {
        sort_year,
        first_sentence,
        link,
        pref_name,
    })
}

/// A narrative sentence for an unfetched source with its raw citation as the reference.
pub fn fallback_narrative(parsed: Option<&ParsedCitation>, citation: &str) -> String {
    let name = parsed
        .and_then(|p| p.pref_name.as_deref())
        .unwrap_or("This person");
    let mut narrative = format!("{name} was in a record");
    if let Some(year) = parsed.and_then(|p| p.sort_year.as_deref()) {
        narrative.push_str(" in ");
        narrative.push_str(year);
    }
    format!("{narrative}.<ref>\n{}\n</ref>", citation.trim())
}
