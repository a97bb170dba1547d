//! Date string helpers shared by the site readers and citation text.

use chrono::NaiveDate;

use super::patterns::{
    DATE_DAY, DATE_MONTH, DATE_YEAR, MH_MONTH_DAY_YEAR, MH_QUARTER_LONG, MH_QUARTER_SHORT,
    MH_YEAR_ONLY,
};

/// Three letter month abbreviations used in generalized date strings.
pub const SHORT_MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Month number (1-12) from a month name or abbreviation, case insensitive.
pub fn month_number(name: &str) -> Option<u32> {
    let lower = name.trim().to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    SHORT_MONTH_NAMES
        .iter()
        .position(|m| lower.starts_with(&m.to_lowercase()))
        .map(|i| i as u32 + 1)
}

/// The label for a registration quarter, e.g. 1 -> `Jan-Feb-Mar`.
pub fn quarter_label(quarter: u8) -> Option<&'static str> {
    match quarter {
        1 => Some("Jan-Feb-Mar"),
        2 => Some("Apr-May-Jun"),
        3 => Some("Jul-Aug-Sep"),
        4 => Some("Oct-Nov-Dec"),
        _ => None,
    }
}

/// Convert a day-month-year string such as `03-05-1881` into `3 May 1881`.
///
/// A zero day gives `May 1881` and a zero month gives just the year.
pub fn format_ddmmyyyy(date: &str, separator: char) -> Option<String> {
    let parts: Vec<&str> = date.trim().split(separator).collect();
    if parts.len() != 3 {
        return None;
    }

    let day: u32 = parts[0].trim().parse().ok()?;
    let month: u32 = parts[1].trim().parse().ok()?;
    let year = parts[2].trim();
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if month > 12 || day > 31 {
        return None;
    }

    if month == 0 {
        return Some(year.to_string());
    }
    let month_name = SHORT_MONTH_NAMES[month as usize - 1];
    if day == 0 {
        Some(format!("{month_name} {year}"))
    } else {
        Some(format!("{day} {month_name} {year}"))
    }
}

/// Clean up a MyHeritage date value.
///
/// Year-only and quarter dates are kept, long quarter month names are cut to
/// three letters, `Aug 22 1822` becomes `22 Aug 1822` and date ranges
/// (`Between ...`) give an empty string. Other shapes are returned trimmed.
pub fn clean_mh_date(date: &str) -> String {
    let date = date.trim();
    if date.is_empty() || date.starts_with("Between") {
        return String::new();
    }

    if MH_YEAR_ONLY.is_match(date) || MH_QUARTER_SHORT.is_match(date) {
        return date.to_string();
    }

    if MH_QUARTER_LONG.is_match(date) {
        return MH_QUARTER_LONG.replace(date, "$1-$2-$3 $4").into_owned();
    }

    if MH_MONTH_DAY_YEAR.is_match(date) {
        return MH_MONTH_DAY_YEAR.replace(date, "$2 $1 $3").into_owned();
    }

    date.to_string()
}

/// Year, month and day extracted from a free-form date string for ordering.
///
/// Missing month or day sort as zero; a string with no four digit year has no key.
pub fn date_sort_key(date: &str) -> Option<(i32, u32, u32)> {
    let year: i32 = DATE_YEAR.captures(date)?.get(1)?.as_str().parse().ok()?;
    let month = DATE_MONTH
        .captures(date)
        .and_then(|c| c.get(1))
        .and_then(|m| month_number(m.as_str()))
        .unwrap_or(0);
    let day = DATE_DAY
        .captures(date.trim())
        .and_then(|c| c.get(1))
        .and_then(|d| d.as_str().parse().ok())
        .filter(|d| *d <= 31 && month > 0)
        .unwrap_or(0);
    Some((year, month, day))
}

/// Format the date a citation was generated, e.g. `18 October 2026`.
pub fn format_accessed_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}
