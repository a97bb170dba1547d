//! Accumulates the parts of one citation and writes them out as WikiTree text.

use chrono::NaiveDate;

use super::CitationType;
use super::data_string::standard_data_string;
use super::narrative::standard_narrative;
use crate::models::options::{AccessedDate, MeaningfulNames};
use crate::models::{GeneralizedData, Options};
use crate::normalize::dates::format_accessed_date;
use crate::normalize::patterns::{EMPTY_COMMA_PART, SPACE_BEFORE_PUNCT};

/// The parts of a citation, filled in by a site's citation function.
#[derive(Debug, Clone)]
pub struct CitationBuilder<'a> {
    pub citation_type: CitationType,
    pub run_date: NaiveDate,
    pub options: &'a Options,

    pub source_title: String,
    /// Wrap the source title in double quotes.
    pub put_source_title_in_quotes: bool,
    pub source_reference: String,
    pub record_link_or_template: String,
    pub image_link: String,
    pub data_string: String,

    /// Title shown in bold or italics at the start, e.g. `Birth Registration`.
    pub meaningful_title: String,
    pub narrative: String,
    pub household_table_string: String,
}

impl<'a> CitationBuilder<'a> {
    pub fn new(citation_type: CitationType, run_date: NaiveDate, options: &'a Options) -> Self {
        Self {
            citation_type,
            run_date,
            options,
            source_title: String::new(),
            put_source_title_in_quotes: true,
            source_reference: String::new(),
            record_link_or_template: String::new(),
            image_link: String::new(),
            data_string: String::new(),
            meaningful_title: String::new(),
            narrative: String::new(),
            household_table_string: String::new(),
        }
    }

    pub fn add_standard_data_string(&mut self, gd: &GeneralizedData) {
        self.data_string = standard_data_string(gd);
    }

    /// Set the narrative sentence when building a narrative citation.
    pub fn add_narrative(&mut self, gd: &GeneralizedData) {
        if self.citation_type == CitationType::Narrative {
            self.narrative = standard_narrative(gd);
        }
    }

    fn meaningful_title_markup(&self) -> Option<String> {
        let title = self.meaningful_title.trim();
        if title.is_empty() {
            return None;
        }
        match self.options.meaningful_names {
            MeaningfulNames::None => None,
            MeaningfulNames::Bold => Some(format!("'''{title}'''")),
            MeaningfulNames::Italic => Some(format!("''{title}''")),
        }
    }

    fn body(&self) -> String {
        let mut fragments: Vec<String> = Vec::new();

        let title = clean_fragment(&self.source_title);
        if !title.is_empty() {
            if self.put_source_title_in_quotes {
                fragments.push(format!("\"{title}\""));
            } else {
                fragments.push(title);
            }
        }

        let reference = clean_fragment(&self.source_reference);
        if !reference.is_empty() {
            fragments.push(reference);
        }

        let link = clean_fragment(&self.record_link_or_template);
        if !link.is_empty() {
            match self.options.add_accessed_date {
                AccessedDate::ParenAfterLink => fragments.push(format!(
                    "{link} (accessed {})",
                    format_accessed_date(self.run_date)
                )),
                AccessedDate::None => fragments.push(link),
            }
        }

        for part in [&self.image_link, &self.data_string] {
            let part = clean_fragment(part);
            if !part.is_empty() {
                fragments.push(part);
            }
        }

        let separator = self.options.source_reference_separator.as_str();
        let joined = fragments.join(separator);
        let body = match self.meaningful_title_markup() {
            Some(title) if joined.is_empty() => title,
            Some(title) => format!("{title}: {joined}"),
            None => joined,
        };
        let mut body = normalize_punctuation(&body);
        if !body.ends_with('.') {
            body.push('.');
        }
        body
    }

    fn inline(&self, body: &str) -> String {
        if self.options.add_newlines_within_refs {
            format!("<ref>\n{body}\n</ref>")
        } else {
            format!("<ref>{body}</ref>")
        }
    }

    /// Serialize the citation in the builder's style.
    pub fn citation_string(&self) -> String {
        let body = self.body();
        let mut citation = match self.citation_type {
            CitationType::Inline => self.inline(&body),
            CitationType::Source => format!("* {body}"),
            CitationType::Narrative => {
                let narrative = self.narrative.trim();
                format!("{narrative}{}", self.inline(&body))
            }
        };

        let table = self.household_table_string.trim();
        if !table.is_empty() {
            citation.push('\n');
            citation.push_str(table);
        }
        citation
    }
}

/// Trim a fragment and drop trailing separators and periods.
fn clean_fragment(fragment: &str) -> String {
    fragment
        .trim()
        .trim_end_matches([',', ';', '.', ' '])
        .to_string()
}

/// Replace each run of exactly two periods with one, leaving ellipses alone.
fn collapse_double_periods(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut run = 0;
    for c in text.chars() {
        if c == '.' {
            run += 1;
            continue;
        }
        push_periods(&mut result, run);
        run = 0;
        result.push(c);
    }
    push_periods(&mut result, run);
    result
}

fn push_periods(out: &mut String, run: usize) {
    let count = if run == 2 { 1 } else { run };
    for _ in 0..count {
        out.push('.');
    }
}

/// Remove doubled or dangling punctuation left where optional parts were empty.
pub(crate) fn normalize_punctuation(text: &str) -> String {
    let mut text = text.to_string();
    while EMPTY_COMMA_PART.is_match(&text) {
        text = EMPTY_COMMA_PART.replace_all(&text, ",").into_owned();
    }
    text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1").into_owned();
    collapse_double_periods(text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::options::ReferenceSeparator;
    use pretty_assertions::assert_eq;

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn filled(options: &Options, citation_type: CitationType) -> CitationBuilder<'_> {
        let mut builder = CitationBuilder::new(citation_type, run_date(), options);
        builder.meaningful_title = "Birth Registration".to_string();
        builder.source_title = "England & Wales Birth Index".to_string();
        builder.source_reference = "Pancras, Volume 1b, Page 52".to_string();
        builder.record_link_or_template = "[https://www.freebmd.org.uk/x FreeBMD Entry Information]".to_string();
        builder.data_string = "Birth registration of John Smith.".to_string();
        builder
    }

    #[test]
    fn test_source_citation() {
        let options = Options::default();
        let builder = filled(&options, CitationType::Source);
        assert_eq!(
            builder.citation_string(),
            "* '''Birth Registration''': \"England & Wales Birth Index\", Pancras, Volume 1b, Page 52, \
             [https://www.freebmd.org.uk/x FreeBMD Entry Information] (accessed 5 March 2024), \
             Birth registration of John Smith."
        );
    }

    #[test]
    fn test_inline_with_options() {
        let mut options = Options::default();
        options.meaningful_names = MeaningfulNames::Italic;
        options.add_accessed_date = AccessedDate::None;
        options.source_reference_separator = ReferenceSeparator::Semicolon;
        options.add_newlines_within_refs = true;
        let builder = filled(&options, CitationType::Inline);
        assert_eq!(
            builder.citation_string(),
            "<ref>\n''Birth Registration'': \"England & Wales Birth Index\"; Pancras, Volume 1b, Page 52; \
             [https://www.freebmd.org.uk/x FreeBMD Entry Information]; Birth registration of John Smith.\n</ref>"
        );
    }

    #[test]
    fn test_narrative_prefix() {
        let options = Options::default();
        let mut builder = filled(&options, CitationType::Narrative);
        builder.narrative = "John Smith was born in 1881.".to_string();
        let citation = builder.citation_string();
        assert!(citation.starts_with("John Smith was born in 1881.<ref>'''Birth Registration'''"));
        assert!(citation.ends_with("</ref>"));
    }

    #[test]
    fn test_missing_parts_leave_no_dangling_punctuation() {
        let options = Options::default();
        let mut builder = CitationBuilder::new(CitationType::Source, run_date(), &options);
        builder.source_title = "Some Index,".to_string();
        builder.source_reference = "  ".to_string();
        builder.data_string = "Entry for John..".to_string();
        let citation = builder.citation_string();
        assert_eq!(citation, "* \"Some Index\", Entry for John.");
        assert!(!citation.contains(".."));
        assert!(!citation.contains(", ,"));
    }

    #[test]
    fn test_meaningful_title_alone_has_no_colon() {
        let options = Options::default();
        let mut builder = CitationBuilder::new(CitationType::Inline, run_date(), &options);
        builder.meaningful_title = "Birth Registration".to_string();
        assert_eq!(builder.citation_string(), "<ref>'''Birth Registration'''.</ref>");
    }

    #[test]
    fn test_punctuation_normalization() {
        assert_eq!(normalize_punctuation("a, , b ,c.."), "a, b,c.");
        assert_eq!(normalize_punctuation("wait... then"), "wait... then");
        assert_eq!(collapse_double_periods("a..b...c....d"), "a.b...c....d");
    }

    #[test]
    fn test_household_table_appended() {
        let options = Options::default();
        let mut builder = filled(&options, CitationType::Source);
        builder.household_table_string = "{| class=\"wikitable\"\n|}".to_string();
        let citation = builder.citation_string();
        assert!(citation.ends_with("Birth registration of John Smith.\n{| class=\"wikitable\"\n|}"));
    }
}
