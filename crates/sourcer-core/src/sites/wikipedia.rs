//! Wikipedia: biography articles cited as profile sources.

use serde::Deserialize;

use super::{Site, invalid};
use crate::citation::CitationBuilder;
use crate::error::CitationError;
use crate::models::options::{WikipediaLinkLocation, WikipediaLinkType};
use crate::models::{GeneralizedData, NameObj, Options, SourceType};
use crate::normalize::patterns::WIKIPEDIA_LANG;
use crate::readers::{EdReader, ExtractedData, clean, parse_view};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct WikipediaEd {
    url: Option<String>,
    permalink: Option<String>,
    title: Option<String>,
}

impl WikipediaEd {
    /// Language prefix of a non-English Wikipedia, e.g. `de`.
    fn lang(&self) -> Option<&str> {
        let url = self.url.as_deref()?;
        let lang = WIKIPEDIA_LANG.captures(url)?.get(1)?.as_str();
        (lang != "en").then_some(lang)
    }

    /// The link to the article in the style chosen by the link type option.
    fn link(&self, options: &Options, link_text: &str) -> String {
        let link_type = options.wikipedia_link_type;
        let url = match (&self.permalink, link_type) {
            (Some(permalink), WikipediaLinkType::Permalink | WikipediaLinkType::PlainPermalink) => permalink.as_str(),
            _ => self.url.as_deref().unwrap_or_default(),
        };

        match link_type {
            WikipediaLinkType::Permalink | WikipediaLinkType::External => format!("[{url} {link_text}]"),
            WikipediaLinkType::Special => {
                let prefix = match self.lang() {
                    Some(lang) => format!("Wikipedia:{lang}:"),
                    None => "Wikipedia:".to_string(),
                };
                let title = self.title.as_deref().unwrap_or_default();
                let text = if link_text.is_empty() { "Wikipedia" } else { link_text };
                format!("[[{prefix}{title}|{text}]]")
            }
            WikipediaLinkType::PlainPermalink | WikipediaLinkType::PlainSimple => url.to_string(),
        }
    }
}

fn wtfe(options: &Options) -> &'static str {
    if options.wikipedia_use_italics {
        "''Wikipedia, The Free Encyclopedia''"
    } else {
        "Wikipedia, The Free Encyclopedia"
    }
}

pub struct WikipediaReader {
    ed: Option<WikipediaEd>,
}

impl WikipediaReader {
    pub fn new(ed: &ExtractedData) -> Self {
        Self {
            ed: parse_view(Site::Wikipedia.key(), ed),
        }
    }
}

impl EdReader for WikipediaReader {
    fn has_valid_data(&self) -> bool {
        self.ed.as_ref().is_some_and(|e| clean(e.title.as_deref()).is_some())
    }

    fn source_type(&self) -> SourceType {
        SourceType::Profile
    }

    fn name_obj(&self) -> Option<NameObj> {
        let title = self.ed.as_ref()?.title.as_deref()?;
        // "John Smith (cricketer)" names John Smith
        let name = match title.find(" (") {
            Some(index) => &title[..index],
            None => title,
        };
        NameObj::from_full_name(name)
    }
}

pub fn build_citation(
    ed: &ExtractedData,
    _gd: &GeneralizedData,
    builder: &mut CitationBuilder<'_>,
) -> Result<(), CitationError> {
    let reader = WikipediaReader::new(ed);
    let view = reader.ed.as_ref().ok_or_else(|| invalid(Site::Wikipedia))?;
    let options = builder.options;
    let link_type = options.wikipedia_link_type;
    let location = options.wikipedia_link_location;

    builder.source_title = match clean(view.title.as_deref()) {
        Some(title) if location == WikipediaLinkLocation::Title && !link_type.is_plain() => {
            format!("Wikipedia contributors, \"{}\"", view.link(options, &title))
        }
        Some(title) => format!("Wikipedia contributors, \"{title}\""),
        None => "Wikipedia contributors".to_string(),
    };
    builder.put_source_title_in_quotes = false;

    if link_type.is_plain()
        || matches!(
            location,
            WikipediaLinkLocation::AfterWikipedia | WikipediaLinkLocation::AfterWikipediaEntry
        )
    {
        builder.source_reference = wtfe(options).to_string();
    }

    builder.record_link_or_template = if link_type.is_plain() {
        view.link(options, "")
    } else {
        match location {
            WikipediaLinkLocation::Reference => view.link(options, wtfe(options)),
            WikipediaLinkLocation::Title => wtfe(options).to_string(),
            WikipediaLinkLocation::AfterWikipedia => view.link(options, "Wikipedia"),
            WikipediaLinkLocation::AfterWikipediaEntry => view.link(options, "Wikipedia Entry"),
        }
    };
    Ok(())
}
