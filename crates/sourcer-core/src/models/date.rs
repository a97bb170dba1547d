//! Event dates.

use serde::{Deserialize, Serialize};

use crate::normalize::dates::{date_sort_key, format_ddmmyyyy, quarter_label};
use crate::normalize::patterns::DATE_YEAR;

/// A date as precise as the record gives it.
///
/// Exactly one representation is held; a quarter date never carries a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateObj {
    /// A registration quarter, e.g. the March quarter of 1881.
    Quarter {
        #[serde(rename = "yearString")]
        year: String,
        quarter: u8,
    },
    /// A free-form date string such as `3 May 1881` or `May 1881`.
    Exact {
        #[serde(rename = "dateString")]
        date_string: String,
    },
    /// Only the year is known.
    Year {
        #[serde(rename = "yearString")]
        year: String,
    },
}

impl DateObj {
    pub fn from_date_string(date_string: &str) -> Option<Self> {
        let date_string = date_string.trim();
        if date_string.is_empty() {
            return None;
        }
        Some(Self::Exact {
            date_string: date_string.to_string(),
        })
    }

    /// Date from a year and an optional quarter number (1-4).
    pub fn from_year_and_quarter(year: &str, quarter: Option<u8>) -> Option<Self> {
        let year = year.trim();
        if year.is_empty() {
            return None;
        }
        Some(match quarter.filter(|q| (1..=4).contains(q)) {
            Some(quarter) => Self::Quarter {
                year: year.to_string(),
                quarter,
            },
            None => Self::Year {
                year: year.to_string(),
            },
        })
    }

    /// Date from a `dd-mm-yyyy` style string with the given separator.
    pub fn from_ddmmyyyy(date: &str, separator: char) -> Option<Self> {
        let date_string = format_ddmmyyyy(date, separator)?;
        Self::from_date_string(&date_string)
    }

    pub fn year(&self) -> Option<String> {
        match self {
            Self::Quarter { year, .. } | Self::Year { year } => Some(year.clone()),
            Self::Exact { date_string } => DATE_YEAR
                .captures(date_string)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string()),
        }
    }

    pub fn quarter(&self) -> Option<u8> {
        match self {
            Self::Quarter { quarter, .. } => Some(*quarter),
            _ => None,
        }
    }

    /// The date as text, a quarter is written as e.g. `Jan-Feb-Mar 1881`.
    pub fn date_string(&self) -> String {
        match self {
            Self::Exact { date_string } => date_string.clone(),
            Self::Year { year } => year.clone(),
            Self::Quarter { year, quarter } => match quarter_label(*quarter) {
                Some(label) => format!("{label} {year}"),
                None => year.clone(),
            },
        }
    }

    /// Key for chronological ordering, `None` when no year can be found.
    pub fn sort_key(&self) -> Option<(i32, u32, u32)> {
        date_sort_key(&self.date_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_constructors_reject_empty_input() {
        assert_eq!(DateObj::from_date_string(" "), None);
        assert_eq!(DateObj::from_year_and_quarter("", Some(1)), None);
        assert_eq!(DateObj::from_ddmmyyyy("", '-'), None);
    }

    #[test]
    fn test_quarter_date() {
        let date = DateObj::from_year_and_quarter("1881", Some(1)).unwrap();
        assert_eq!(
            date,
            DateObj::Quarter {
                year: "1881".to_string(),
                quarter: 1
            }
        );
        assert_eq!(date.date_string(), "Jan-Feb-Mar 1881");
        assert_eq!(date.year().as_deref(), Some("1881"));
        assert_eq!(date.quarter(), Some(1));
    }

    #[test]
    fn test_year_without_quarter() {
        let date = DateObj::from_year_and_quarter("1900", None).unwrap();
        assert_eq!(date, DateObj::Year { year: "1900".to_string() });
        assert_eq!(date.quarter(), None);
    }

    #[test]
    fn test_exact_date() {
        let date = DateObj::from_ddmmyyyy("03-05-1881", '-').unwrap();
        assert_eq!(date.date_string(), "3 May 1881");
        assert_eq!(date.year().as_deref(), Some("1881"));
        assert_eq!(date.sort_key(), Some((1881, 5, 3)));
    }

    #[test]
    fn test_serde_shapes() {
        let quarter = DateObj::from_year_and_quarter("1881", Some(2)).unwrap();
        let json = serde_json::to_value(&quarter).unwrap();
        assert_eq!(json, serde_json::json!({"yearString": "1881", "quarter": 2}));
        let back: DateObj = serde_json::from_value(json).unwrap();
        assert_eq!(back, quarter);

        let exact: DateObj = serde_json::from_value(serde_json::json!({"dateString": "1 Jan 1900"})).unwrap();
        assert_eq!(exact.date_string(), "1 Jan 1900");
    }
}
