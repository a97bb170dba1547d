//! Ordered rule tables that decide the record type of a multi-type site.
//!
//! Rules are evaluated top to bottom and the first rule whose filters all
//! pass decides the type. Rule order is therefore part of the data: put
//! document-type rules first, collection title rules next and rules that
//! only test for fields last.

use tracing::debug;

use crate::models::RecordType;

/// One classification rule. An empty filter list means the filter is not applied.
#[derive(Debug, Clone, Copy)]
pub struct RecordTypeRule {
    pub record_type: RecordType,

    /// The record's document type must equal one of these.
    pub document_types: &'static [&'static str],

    /// The collection title must contain every part of at least one set.
    pub collection_title_matches: &'static [&'static [&'static str]],

    /// The record must have every section of at least one set.
    pub required_record_sections: &'static [&'static [&'static str]],

    /// The record must have every field of at least one set.
    pub required_fields: &'static [&'static [&'static str]],
}

impl RecordTypeRule {
    pub const fn new(record_type: RecordType) -> Self {
        Self {
            record_type,
            document_types: &[],
            collection_title_matches: &[],
            required_record_sections: &[],
            required_fields: &[],
        }
    }

    pub const fn document_types(mut self, types: &'static [&'static str]) -> Self {
        self.document_types = types;
        self
    }

    pub const fn collection_titles(mut self, matches: &'static [&'static [&'static str]]) -> Self {
        self.collection_title_matches = matches;
        self
    }

    pub const fn record_sections(mut self, sections: &'static [&'static [&'static str]]) -> Self {
        self.required_record_sections = sections;
        self
    }

    pub const fn fields(mut self, fields: &'static [&'static [&'static str]]) -> Self {
        self.required_fields = fields;
        self
    }

    /// Whether every filter of this rule accepts the record.
    pub fn matches(&self, input: &dyn ClassifyInput) -> bool {
        if !self.document_types.is_empty() {
            match input.document_type() {
                Some(doc_type) if self.document_types.contains(&doc_type) => {}
                _ => return false,
            }
        }

        if !self.collection_title_matches.is_empty() {
            let Some(title) = input.collection_title() else {
                return false;
            };
            let any_set = self
                .collection_title_matches
                .iter()
                .any(|parts| parts.iter().all(|part| title.contains(part)));
            if !any_set {
                return false;
            }
        }

        if !self.required_record_sections.is_empty()
            && !self
                .required_record_sections
                .iter()
                .any(|set| set.iter().all(|s| input.has_record_section(s)))
        {
            return false;
        }

        if !self.required_fields.is_empty()
            && !self
                .required_fields
                .iter()
                .any(|set| set.iter().all(|f| input.has_field(f)))
        {
            return false;
        }

        true
    }
}

/// What a rule can ask of a record.
pub trait ClassifyInput {
    fn document_type(&self) -> Option<&str>;
    fn collection_title(&self) -> Option<&str>;
    fn has_record_section(&self, section: &str) -> bool;
    fn has_field(&self, field: &str) -> bool;
}

/// Find the type of the first matching rule, `Unclassified` when none match.
pub fn classify(rules: &[RecordTypeRule], input: &dyn ClassifyInput) -> RecordType {
    for (index, rule) in rules.iter().enumerate() {
        if rule.matches(input) {
            debug!("Record type rule {} matched: {:?}", index, rule.record_type);
            return rule.record_type;
        }
    }
    debug!("No record type rule matched");
    RecordType::Unclassified
}
