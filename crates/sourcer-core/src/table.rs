//! Household tables for census and population register records.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::options::{TableCaption, TableFormat};
use crate::models::{GeneralizedData, Household, HouseholdMember, Options};

const CLOSED_RECORD: &str = "Closed record";

/// A rendered household table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableObject {
    pub table_string: String,
}

fn caption(gd: &GeneralizedData, options: &Options, citation: Option<&str>) -> Option<String> {
    let mut caption = match gd.inferred_event_year() {
        Some(year) => format!("Household members in {year}"),
        None => "Household members".to_string(),
    };
    match options.table_caption {
        TableCaption::None => return None,
        TableCaption::Plain => {}
        TableCaption::WithCitation => {
            if let Some(citation) = citation.map(str::trim).filter(|c| !c.is_empty()) {
                caption.push_str(citation);
            }
        }
    }
    Some(caption)
}

fn cell_value(member: &HouseholdMember, key: &str) -> String {
    let value = member.field(key).unwrap_or_default().trim().to_string();
    if key == "name" && member.is_selected && !value.is_empty() {
        format!("'''{value}'''")
    } else {
        value
    }
}

fn wikitable(household: &Household, caption: Option<&str>) -> String {
    let mut lines = vec!["{| class=\"wikitable\"".to_string()];
    if let Some(caption) = caption {
        lines.push(format!("|+ {caption}"));
    }

    let headings: Vec<&str> = household.fields.iter().map(|f| f.heading.as_str()).collect();
    lines.push(format!("! {}", headings.join(" !! ")));

    for member in &household.members {
        lines.push("|-".to_string());
        if member.is_closed {
            lines.push(format!("| colspan=\"{}\" | {CLOSED_RECORD}", household.fields.len()));
            continue;
        }
        let cells: Vec<String> = household.fields.iter().map(|f| cell_value(member, &f.key)).collect();
        lines.push(format!("| {}", cells.join(" || ")));
    }
    lines.push("|}".to_string());
    lines.join("\n")
}

fn list(household: &Household, caption: Option<&str>) -> String {
    let mut lines = Vec::new();
    if let Some(caption) = caption {
        lines.push(format!("{caption}:"));
    }
    for member in &household.members {
        if member.is_closed {
            lines.push(format!("* {CLOSED_RECORD}"));
            continue;
        }
        let values: Vec<String> = household
            .fields
            .iter()
            .map(|f| cell_value(member, &f.key))
            .filter(|v| !v.is_empty())
            .collect();
        lines.push(format!("* {}", values.join(", ")));
    }
    lines.join("\n")
}

/// Render the household of a record as a wikitable or a bulleted list.
///
/// Records without a household give an empty table string. `citation` is
/// only used when the caption option asks for it.
pub fn build_household_table(gd: &GeneralizedData, options: &Options, citation: Option<&str>) -> TableObject {
    let Some(household) = gd.household.as_ref().filter(|h| !h.members.is_empty()) else {
        return TableObject {
            table_string: String::new(),
        };
    };
    debug!(
        "Building household table: {} members, {} fields",
        household.members.len(),
        household.fields.len()
    );

    let caption = caption(gd, options, citation);
    let table_string = match options.table_format {
        TableFormat::Table => wikitable(household, caption.as_deref()),
        TableFormat::List => list(household, caption.as_deref()),
    };
    TableObject { table_string }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateObj, HouseholdField, RecordType};
    use pretty_assertions::assert_eq;

    fn census() -> GeneralizedData {
        GeneralizedData {
            record_type: RecordType::Census,
            event_date: DateObj::from_year_and_quarter("1881", None),
            household: Some(Household {
                fields: vec![
                    HouseholdField::new("name", "Name"),
                    HouseholdField::new("relationship", "Relationship"),
                    HouseholdField::new("age", "Age"),
                ],
                members: vec![
                    HouseholdMember {
                        name: Some("John Smith".to_string()),
                        relationship: Some("head".to_string()),
                        age: Some("40".to_string()),
                        ..Default::default()
                    },
                    HouseholdMember {
                        name: Some("Mary Smith".to_string()),
                        relationship: Some("wife".to_string()),
                        age: Some("38".to_string()),
                        is_selected: true,
                        ..Default::default()
                    },
                    HouseholdMember {
                        is_closed: true,
                        ..Default::default()
                    },
                ],
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_wikitable() {
        let table = build_household_table(&census(), &Options::default(), None);
        let expected = [
            "{| class=\"wikitable\"",
            "|+ Household members in 1881",
            "! Name !! Relationship !! Age",
            "|-",
            "| John Smith || head || 40",
            "|-",
            "| '''Mary Smith''' || wife || 38",
            "|-",
            "| colspan=\"3\" | Closed record",
            "|}",
        ]
        .join("\n");
        assert_eq!(table.table_string, expected);
    }

    #[test]
    fn test_list_without_caption() {
        let options = Options {
            table_format: TableFormat::List,
            table_caption: TableCaption::None,
            ..Default::default()
        };
        let table = build_household_table(&census(), &options, Some("<ref>x</ref>"));
        assert_eq!(
            table.table_string,
            "* John Smith, head, 40\n* '''Mary Smith''', wife, 38\n* Closed record"
        );
    }

    #[test]
    fn test_caption_with_citation() {
        let options = Options {
            table_caption: TableCaption::WithCitation,
            ..Default::default()
        };
        let table = build_household_table(&census(), &options, Some("<ref>1881 census</ref>"));
        assert!(table.table_string.contains("|+ Household members in 1881<ref>1881 census</ref>\n"));
    }

    #[test]
    fn test_no_household() {
        let gd = GeneralizedData::default();
        assert_eq!(build_household_table(&gd, &Options::default(), None).table_string, "");
    }
}
