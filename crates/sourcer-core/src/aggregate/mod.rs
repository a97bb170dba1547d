//! Build citations for every source attached to a FamilySearch tree person.
//!
//! The list of sources comes from one request. The plain styles reuse
//! FamilySearch's own citation text. The other styles fetch each source
//! record, generalize it and build a full citation, falling back to the
//! citation text for records that could not be fetched.

pub mod fallback;

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use self::fallback::{ParsedCitation, fallback_narrative, parse_fs_citation};
use crate::citation::{CitationInput, CitationObject, CitationType, build_citation};
use crate::error::{FetchError, Result};
use crate::fetch::RecordFetcher;
use crate::generalize::generalize;
use crate::models::options::FsAllCitationsType;
use crate::models::{GeneralizedData, Options};
use crate::sites::Site;
use crate::sites::fs::extract_from_record_json;
use crate::table::build_household_table;

pub const SOURCES_URL: &str = "https://www.familysearch.org/service/tree/links/sources/";

/// The URL listing the given sources, e.g. `.../sources/,S1,S2`.
pub fn sources_url(source_ids: &[String]) -> String {
    let mut url = SOURCES_URL.to_string();
    for id in source_ids {
        url.push(',');
        url.push_str(id);
    }
    url
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SourcesResponse {
    sources: Vec<RawSource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSource {
    citation: Option<String>,
    title: Option<String>,
    uri: Option<RawUri>,
    event: Option<RawEvent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawUri {
    uri: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawEvent {
    sort_key: Option<String>,
    sort_year: Option<Value>,
}

/// One attached source and what could be learned about it.
#[derive(Debug, Clone, Default)]
pub struct FsSource {
    pub citation: Option<String>,
    pub title: Option<String>,
    pub uri: Option<String>,
    pub sort_key: Option<String>,
    pub sort_year: Option<String>,
    pub generalized_data: Option<GeneralizedData>,
    pub citation_object: Option<CitationObject>,
    pub parsed: Option<ParsedCitation>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Read the sources from the JSON of the sources request.
pub fn parse_sources(value: &Value) -> Result<Vec<FsSource>> {
    let response: SourcesResponse = serde_json::from_value(value.clone())?;
    let sources = response
        .sources
        .into_iter()
        .map(|raw| {
            let event = raw.event.unwrap_or_default();
            let sort_year = match event.sort_year {
                Some(Value::String(s)) => Some(s),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };
            FsSource {
                citation: non_empty(raw.citation),
                title: non_empty(raw.title),
                uri: raw.uri.and_then(|u| non_empty(u.uri)),
                sort_key: non_empty(event.sort_key),
                sort_year: non_empty(sort_year),
                ..Default::default()
            }
        })
        .collect();
    Ok(sources)
}

/// Keyed sources first, in sort key order.
fn compare_sort_keys(a: &FsSource, b: &FsSource) -> Ordering {
    match (&a.sort_key, &b.sort_key) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Event dates of fetched records first, then sort keys, then sort years.
fn compare_fetched(a: &FsSource, b: &FsSource) -> Ordering {
    let date_key = |s: &FsSource| {
        s.generalized_data
            .as_ref()
            .and_then(|gd| gd.inferred_event_date())
            .and_then(|d| d.sort_key())
    };
    if let (Some(a), Some(b)) = (date_key(a), date_key(b)) {
        return a.cmp(&b);
    }
    if let (Some(a), Some(b)) = (&a.sort_key, &b.sort_key) {
        return a.cmp(b);
    }
    match (a.sort_year(), b.sort_year()) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl FsSource {
    /// The sort year from the source list, or from the parsed citation.
    fn sort_year(&self) -> Option<&str> {
        self.sort_year
            .as_deref()
            .or_else(|| self.parsed.as_ref().and_then(|p| p.sort_year.as_deref()))
    }

    /// The record URL to fetch, on the www host; `None` for other sites.
    pub fn record_url(&self) -> Option<String> {
        let uri = self.uri.as_deref()?;
        if !uri.contains("familysearch.org/") {
            return None;
        }
        Some(uri.replacen("/familysearch.org", "/www.familysearch.org", 1))
    }
}

/// Stable insertion sort. The comparisons above are not a total order, so
/// the standard sorts are not used.
fn stable_sort(sources: &mut [FsSource], compare: fn(&FsSource, &FsSource) -> Ordering) {
    for i in 1..sources.len() {
        let mut j = i;
        while j > 0 && compare(&sources[j - 1], &sources[j]) == Ordering::Greater {
            sources.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn plain_inline(sources: &[FsSource]) -> String {
    sources
        .iter()
        .filter_map(|s| s.citation.as_deref())
        .map(|c| format!("<ref>\n{}\n</ref>", c.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn plain_source(sources: &[FsSource]) -> String {
    sources
        .iter()
        .filter_map(|s| s.citation.as_deref())
        .map(|c| format!("* {}\n", c.trim()))
        .collect()
}

fn citation_type_for(style: FsAllCitationsType) -> Option<CitationType> {
    match style {
        FsAllCitationsType::Narrative => Some(CitationType::Narrative),
        FsAllCitationsType::Inline => Some(CitationType::Inline),
        FsAllCitationsType::Source => Some(CitationType::Source),
        FsAllCitationsType::FsPlainInline | FsAllCitationsType::FsPlainSource => None,
    }
}

/// Fetch the record of every FamilySearch source and build its citation.
///
/// The first fetch failure stops further fetching; the remaining sources
/// keep only their citation text.
async fn cite_fetched_records(
    fetcher: &dyn RecordFetcher,
    sources: &mut [FsSource],
    citation_type: CitationType,
    options: &Options,
    run_date: NaiveDate,
) {
    let mut fetching = true;
    for source in sources.iter_mut() {
        if fetching {
            if let Some(url) = source.record_url() {
                debug!("Fetching source record {}", url);
                match fetcher.fetch(&url).await {
                    Ok(data) => cite_record(source, &data, citation_type, options, run_date),
                    Err(e) => {
                        warn!("Fetching {} failed, not fetching further records: {}", url, e);
                        fetching = false;
                    }
                }
            }
        }

        if source.citation_object.is_none() {
            if let Some(citation) = source.citation.as_deref() {
                source.parsed = parse_fs_citation(citation, source.title.as_deref());
            }
        }
    }
}

fn cite_record(
    source: &mut FsSource,
    data: &Value,
    citation_type: CitationType,
    options: &Options,
    run_date: NaiveDate,
) {
    let Some(ed) = extract_from_record_json(data) else {
        warn!("Fetched record is not a GedcomX record");
        return;
    };
    let gd = match generalize(Site::Fs, &ed) {
        Ok(gd) => gd,
        Err(e) => {
            warn!("Could not generalize fetched record: {}", e);
            return;
        }
    };

    let household_table_string = gd
        .household
        .as_ref()
        .map(|_| build_household_table(&gd, options, None).table_string);
    let input = CitationInput {
        site: Site::Fs,
        ed: &ed,
        gd: &gd,
        citation_type,
        run_date,
        options,
        household_table_string,
        sharing_link: None,
    };
    match build_citation(&input) {
        Ok(citation) => source.citation_object = Some(citation),
        Err(e) => warn!("Could not build citation for fetched record: {}", e),
    }
    source.generalized_data = Some(gd);
}

fn join_citations(sources: &[FsSource], citation_type: CitationType) -> String {
    let parts = sources.iter().filter_map(|source| {
        if let Some(object) = &source.citation_object {
            return Some(object.citation.clone());
        }
        let citation = source.citation.as_deref()?;
        Some(match citation_type {
            CitationType::Narrative => fallback_narrative(source.parsed.as_ref(), citation),
            CitationType::Inline => format!("<ref>\n{}\n</ref>", citation.trim()),
            CitationType::Source => format!("* {}", citation.trim()),
        })
    });
    let separator = match citation_type {
        CitationType::Source => "\n",
        CitationType::Narrative | CitationType::Inline => "\n\n",
    };
    parts.collect::<Vec<_>>().join(separator)
}

/// The citations for all sources, in the style chosen by the options.
#[derive(Debug, Clone)]
pub struct AllCitations {
    pub citations_string: String,
    pub sources: Vec<FsSource>,
}

/// Build citations from an already fetched sources list.
pub async fn build_citations_for_sources(
    fetcher: &dyn RecordFetcher,
    mut sources: Vec<FsSource>,
    options: &Options,
    run_date: NaiveDate,
) -> AllCitations {
    let style = options.fs_all_citations_type;
    info!("Building {:?} citations for {} sources", style, sources.len());

    let citations_string = match citation_type_for(style) {
        None => {
            stable_sort(&mut sources, compare_sort_keys);
            if style == FsAllCitationsType::FsPlainInline {
                plain_inline(&sources)
            } else {
                plain_source(&sources)
            }
        }
        Some(citation_type) => {
            cite_fetched_records(fetcher, &mut sources, citation_type, options, run_date).await;
            stable_sort(&mut sources, compare_fetched);
            join_citations(&sources, citation_type)
        }
    };

    AllCitations {
        citations_string,
        sources,
    }
}

/// Fetch the sources of a tree person and build citations for all of them.
pub async fn build_all_citations(
    fetcher: &dyn RecordFetcher,
    source_ids: &[String],
    options: &Options,
    run_date: NaiveDate,
) -> Result<AllCitations> {
    if source_ids.is_empty() {
        return Err(FetchError::NoSources.into());
    }
    let url = sources_url(source_ids);
    debug!("Fetching sources list {}", url);
    let value = fetcher.fetch(&url).await?;
    let sources = parse_sources(&value)?;
    Ok(build_citations_for_sources(fetcher, sources, options, run_date).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourcerError;
    use crate::fetch::MemoryFetcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()
    }

    fn sources_json() -> Value {
        json!({
            "sources": [
                {
                    "citation": "\"Mary Smith in the England and Wales Census, 1881\" 1881 https://familysearch.org/ark:/61903/1:1:CENS. Accessed 3 May 2024.",
                    "title": "Mary Smith in the England and Wales Census, 1881",
                    "uri": {"uri": "https://familysearch.org/ark:/61903/1:1:CENS"},
                    "event": {"sortKey": "1881", "sortYear": 1881}
                },
                {
                    "citation": "\"Mary Brown in the England Births and Christenings, 1538-1975\" 1850 https://familysearch.org/ark:/61903/1:1:BAPT. Accessed 3 May 2024.",
                    "uri": {"uri": "https://familysearch.org/ark:/61903/1:1:BAPT"},
                    "event": {"sortKey": "1850", "sortYear": "1850"}
                },
                {
                    "citation": "Family bible, private collection.",
                    "uri": {"uri": "https://example.org/bible"}
                }
            ]
        })
    }

    fn baptism_record() -> Value {
        json!({
            "persons": [{
                "id": "p1",
                "principal": true,
                "gender": {"type": "http://gedcomx.org/Female"},
                "names": [{"nameForms": [{"fullText": "Mary Brown"}]}],
                "facts": [{"type": "http://gedcomx.org/Christening", "date": {"original": "10 March 1850"}, "place": {"original": "Leeds, Yorkshire, England"}}]
            }],
            "sourceDescriptions": [
                {"about": "https://www.familysearch.org/ark:/61903/1:1:BAPT", "resourceType": "http://gedcomx.org/Record"},
                {"resourceType": "http://gedcomx.org/Collection", "titles": [{"value": "England Births and Christenings, 1538-1975"}]}
            ]
        })
    }

    fn ids() -> Vec<String> {
        vec!["S1".to_string(), "S2".to_string(), "S3".to_string()]
    }

    #[test]
    fn test_sources_url() {
        assert_eq!(
            sources_url(&ids()),
            "https://www.familysearch.org/service/tree/links/sources/,S1,S2,S3"
        );
    }

    #[test]
    fn test_record_url_rewrites_host() {
        let source = FsSource {
            uri: Some("https://familysearch.org/ark:/61903/1:1:X".to_string()),
            ..Default::default()
        };
        assert_eq!(
            source.record_url().as_deref(),
            Some("https://www.familysearch.org/ark:/61903/1:1:X")
        );
        let other = FsSource {
            uri: Some("https://example.org/x".to_string()),
            ..Default::default()
        };
        assert_eq!(other.record_url(), None);
    }

    #[tokio::test]
    async fn test_plain_inline_sorted_by_key() {
        let fetcher = MemoryFetcher::new().with(sources_url(&ids()), sources_json());
        let options = Options {
            fs_all_citations_type: FsAllCitationsType::FsPlainInline,
            ..Default::default()
        };
        let result = build_all_citations(&fetcher, &ids(), &options, run_date()).await.unwrap();
        let blocks: Vec<&str> = result.citations_string.split("\n\n").collect();
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].starts_with("<ref>\n\"Mary Brown"));
        assert!(blocks[1].starts_with("<ref>\n\"Mary Smith"));
        assert_eq!(blocks[2], "<ref>\nFamily bible, private collection.\n</ref>");
    }

    #[tokio::test]
    async fn test_plain_source() {
        let fetcher = MemoryFetcher::new().with(sources_url(&ids()), sources_json());
        let options = Options {
            fs_all_citations_type: FsAllCitationsType::FsPlainSource,
            ..Default::default()
        };
        let result = build_all_citations(&fetcher, &ids(), &options, run_date()).await.unwrap();
        assert_eq!(result.citations_string.lines().count(), 3);
        assert!(result.citations_string.ends_with("* Family bible, private collection.\n"));
    }

    #[tokio::test]
    async fn test_narrative_stops_fetching_after_failure() {
        // the census record is missing, so the baptism is never fetched
        let fetcher = MemoryFetcher::new()
            .with(sources_url(&ids()), sources_json())
            .with("https://www.familysearch.org/ark:/61903/1:1:BAPT", baptism_record());
        let result = build_all_citations(&fetcher, &ids(), &Options::default(), run_date())
            .await
            .unwrap();
        assert!(result.sources.iter().all(|s| s.citation_object.is_none()));
        assert!(result.citations_string.starts_with("Mary Brown was in a record in 1850.<ref>"));
        assert!(result.citations_string.contains("Mary Smith was in a record in 1881.<ref>"));
        assert!(result
            .citations_string
            .ends_with("This person was in a record.<ref>\nFamily bible, private collection.\n</ref>"));
    }

    #[tokio::test]
    async fn test_narrative_with_fetched_record() {
        let fetcher = MemoryFetcher::new()
            .with("https://www.familysearch.org/ark:/61903/1:1:BAPT", baptism_record());
        let sources = parse_sources(&sources_json()).unwrap();
        let sources = sources.into_iter().skip(1).collect();
        let result = build_citations_for_sources(&fetcher, sources, &Options::default(), run_date()).await;

        let first = &result.sources[0];
        assert!(first.generalized_data.is_some());
        let citation = &first.citation_object.as_ref().unwrap().citation;
        assert!(citation.starts_with("Mary Brown was baptised"), "{citation}");
        assert!(citation.contains("England Births and Christenings, 1538-1975"));
    }

    #[tokio::test]
    async fn test_no_sources() {
        let fetcher = MemoryFetcher::new();
        let err = build_all_citations(&fetcher, &[], &Options::default(), run_date())
            .await
            .unwrap_err();
        assert!(matches!(err, SourcerError::Fetch(FetchError::NoSources)));
    }

    #[test]
    fn test_fetched_dates_sort_before_keys() {
        let dated = |date: &str, key: &str| FsSource {
            sort_key: Some(key.to_string()),
            generalized_data: Some(GeneralizedData {
                event_date: crate::models::DateObj::from_date_string(date),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut sources = vec![dated("5 Jun 1900", "A"), dated("1 Jan 1850", "B")];
        stable_sort(&mut sources, compare_fetched);
        assert_eq!(sources[0].sort_key.as_deref(), Some("B"));
    }
}
