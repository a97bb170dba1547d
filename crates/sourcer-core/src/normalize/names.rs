//! Name case correction.
//!
//! Many record sites shout surnames (`SMITH`, `MACGREGOR`, `O'CONNOR`). These
//! helpers turn them back into the mixed case a researcher would write while
//! leaving names that are already mixed case alone.

use super::patterns::{
    INNER_SINGLE_PERIOD, LEADING_SINGLE_PERIOD, TRAILING_SINGLE_PERIOD, WHITESPACE_RUN,
};

/// Names starting with `Mac` that keep a lowercase letter after the prefix.
const MAC_EXCEPTIONS: &[&str] = &["Macilbowie", "Mackenzie", "Macmaster", "Mackey", "Mackie", "Machin"];

/// Names starting with `Mc` that keep a lowercase letter after the prefix.
const MC_EXCEPTIONS: &[&str] = &["Mcilbowie", "Mckenzie", "Mcmaster"];

/// Replace every whitespace run with a single space and trim the ends.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s.trim(), " ").into_owned()
}

/// A word is all uppercase when it has at least one letter and no lowercase letters.
pub fn is_word_all_uppercase(word: &str) -> bool {
    let mut has_letter = false;
    for c in word.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_alphabetic() {
            has_letter = true;
        }
    }
    has_letter
}

/// True if any space separated word of the string is all uppercase.
pub fn has_all_uppercase_word(s: &str) -> bool {
    s.split(' ').any(is_word_all_uppercase)
}

fn should_uppercase_after_mac(word: &str) -> bool {
    // "Mack", "Mach" and other short names stay as they are
    word.chars().count() >= 5 && !MAC_EXCEPTIONS.contains(&word)
}

fn should_uppercase_after_mc(word: &str) -> bool {
    !MC_EXCEPTIONS.contains(&word)
}

fn uppercase_at(chars: &mut [char], index: usize) {
    if let Some(c) = chars.get(index).copied() {
        if let Some(upper) = c.to_uppercase().next() {
            chars[index] = upper;
        }
    }
}

fn strip_single_periods(s: &str) -> String {
    let s = INNER_SINGLE_PERIOD.replace_all(s, "$1 $2");
    let s = LEADING_SINGLE_PERIOD.replace(&s, "$1");
    let s = TRAILING_SINGLE_PERIOD.replace(&s, "$1");
    collapse_whitespace(&s)
}

/// Convert a name that is all (or partly) in capitals to mixed case.
///
/// Names with no all-uppercase word are returned trimmed and whitespace
/// collapsed but otherwise untouched. A leading parenthetical such as
/// `(Mrs)` is dropped before converting.
pub fn convert_name_from_all_caps_to_mixed_case(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let original_clean = collapse_whitespace(input);
    let mut result = original_clean.clone();

    // e.g. "(Mrs) FRASER" or "(A M) FRASER" in a census surname
    if result.starts_with('(') {
        if let Some(close) = result.find(')') {
            let remainder = result[close + 1..].trim().to_string();
            if remainder.is_empty() {
                return original_clean;
            }
            result = remainder;
        }
    }

    if result.contains('.') {
        result = strip_single_periods(&result);
    }

    if !has_all_uppercase_word(&result) {
        return original_clean;
    }

    let mut chars: Vec<char> = result.to_lowercase().trim().chars().collect();
    if chars.len() == 1 {
        uppercase_at(&mut chars, 0);
        return chars.into_iter().collect();
    }

    let mut start = 0;
    loop {
        uppercase_at(&mut chars, start);

        let next_space = chars[start..].iter().position(|c| *c == ' ').map(|p| start + p);
        let end = next_space.unwrap_or(chars.len());
        let word: String = chars[start..end].iter().collect();
        let len = end - start;

        if word.starts_with("Mac") && len > 3 {
            if should_uppercase_after_mac(&word) {
                uppercase_at(&mut chars, start + 3);
            }
        } else if word.starts_with("Mc") && len > 2 {
            if should_uppercase_after_mc(&word) {
                uppercase_at(&mut chars, start + 2);
            }
        } else if word.starts_with("O'") && len > 2 {
            uppercase_at(&mut chars, start + 2);
        } else if len > 2 && word.contains('\'') {
            if let Some(quote) = chars[start..end].iter().position(|c| *c == '\'') {
                if quote < len - 1 {
                    uppercase_at(&mut chars, start + quote + 1);
                }
            }
        } else if len > 2 && (word.contains('-') || word.contains('/')) {
            let separator = if word.contains('-') { '-' } else { '/' };
            for offset in 0..len - 1 {
                if chars[start + offset] == separator {
                    uppercase_at(&mut chars, start + offset + 1);
                }
            }
        } else if word.starts_with('(') && len > 1 {
            uppercase_at(&mut chars, start + 1);
        }

        match next_space {
            Some(space) => start = space + 1,
            None => break,
        }
    }

    chars.into_iter().collect()
}

/// Mixed-case a surname only if it is a single all-uppercase word sequence.
pub fn correctly_cased_surname(surname: &str) -> String {
    if is_word_all_uppercase(surname) {
        convert_name_from_all_caps_to_mixed_case(surname)
    } else {
        surname.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_surname() {
        assert_eq!(convert_name_from_all_caps_to_mixed_case("SMITH"), "Smith");
        assert_eq!(convert_name_from_all_caps_to_mixed_case("JOHN SMITH"), "John Smith");
    }

    #[test]
    fn test_mac_and_mc_prefixes() {
        assert_eq!(convert_name_from_all_caps_to_mixed_case("MACGREGOR"), "MacGregor");
        assert_eq!(convert_name_from_all_caps_to_mixed_case("MACKENZIE"), "Mackenzie");
        assert_eq!(convert_name_from_all_caps_to_mixed_case("MACHIN"), "Machin");
        assert_eq!(convert_name_from_all_caps_to_mixed_case("MACK"), "Mack");
        assert_eq!(convert_name_from_all_caps_to_mixed_case("MCLELLAN"), "McLellan");
        assert_eq!(convert_name_from_all_caps_to_mixed_case("MCKENZIE"), "Mckenzie");
    }

    #[test]
    fn test_apostrophes_hyphens_and_slashes() {
        assert_eq!(convert_name_from_all_caps_to_mixed_case("O'CONNOR"), "O'Connor");
        assert_eq!(convert_name_from_all_caps_to_mixed_case("D'ARCY"), "D'Arcy");
        assert_eq!(convert_name_from_all_caps_to_mixed_case("SMITH-JONES"), "Smith-Jones");
        assert_eq!(convert_name_from_all_caps_to_mixed_case("BROWN/BRAUN"), "Brown/Braun");
    }

    #[test]
    fn test_leading_parenthetical_is_removed() {
        assert_eq!(convert_name_from_all_caps_to_mixed_case("(Mrs) FRASER"), "Fraser");
        assert_eq!(convert_name_from_all_caps_to_mixed_case("(A M) FRASER"), "Fraser");
        assert_eq!(convert_name_from_all_caps_to_mixed_case("(Mrs)"), "(Mrs)");
    }

    #[test]
    fn test_periods() {
        assert_eq!(convert_name_from_all_caps_to_mixed_case("WM.HENRY"), "Wm Henry");
        assert_eq!(convert_name_from_all_caps_to_mixed_case("JAS."), "Jas");
    }

    #[test]
    fn test_mixed_case_is_unchanged() {
        for name in ["MacGregor", "John Smith", "van der Berg", "  Mary   Ann  ", "o'brien"] {
            assert_eq!(convert_name_from_all_caps_to_mixed_case(name), collapse_whitespace(name));
        }
    }

    #[test]
    fn test_single_letter() {
        assert_eq!(convert_name_from_all_caps_to_mixed_case("j"), "j");
        assert_eq!(convert_name_from_all_caps_to_mixed_case("J"), "J");
    }

    #[test]
    fn test_word_all_uppercase() {
        assert!(is_word_all_uppercase("SMITH"));
        assert!(is_word_all_uppercase("O'BRIEN"));
        assert!(!is_word_all_uppercase("Smith"));
        assert!(!is_word_all_uppercase("123"));
    }
}
