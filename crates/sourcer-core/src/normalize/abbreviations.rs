//! Abbreviated English given names as they appear in parish registers and
//! older indexes, e.g. `Wm` for William or `Thos` for Thomas.

/// Ordered abbreviation table. Lookups are linear scans where the first match wins,
/// so `Josh` expands to Joshua and not Josiah.
pub static ENGLISH_GIVEN_NAME_ABBREVIATIONS: &[(&str, &str)] = &[
    ("Abig", "Abigail"),
    ("Abm", "Abraham"),
    ("Abr", "Abraham"),
    ("Agn", "Agnes"),
    ("Alex", "Alexander"),
    ("Alexr", "Alexander"),
    ("Alf", "Alfred"),
    ("Amb", "Ambrose"),
    ("And", "Andrew"),
    ("Ant", "Anthony"),
    ("Art", "Arthur"),
    ("Aug", "Augustus"),
    ("Barb", "Barbara"),
    ("Bart", "Bartholomew"),
    ("Benj", "Benjamin"),
    ("Benjm", "Benjamin"),
    ("Brid", "Bridget"),
    ("Cath", "Catherine"),
    ("Chas", "Charles"),
    ("Chr", "Christian"),
    ("Clem", "Clement"),
    ("Const", "Constance"),
    ("Corn", "Cornelius"),
    ("Danl", "Daniel"),
    ("Dav", "David"),
    ("Deb", "Deborah"),
    ("Den", "Dennis"),
    ("Doug", "Douglas"),
    ("Dy", "Dorothy"),
    ("Edm", "Edmund"),
    ("Edr", "Edward"),
    ("Edw", "Edward"),
    ("Eliz", "Elizabeth"),
    ("Elizth", "Elizabeth"),
    ("Elnr", "Eleanor"),
    ("Esth", "Esther"),
    ("Ezek", "Ezekiel"),
    ("Froo", "Franco"),
    ("Fs", "Francis"),
    ("Gab", "Gabriel"),
    ("Geo", "George"),
    ("Geof", "Geoffrey"),
    ("Godf", "Godfrey"),
    ("Greg", "Gregory"),
    ("Gul", "William"),
    ("Han", "Hannah"),
    ("Hen", "Henry"),
    ("Hel", "Helen"),
    ("Herb", "Herbert"),
    ("Hy", "Henry"),
    ("Ioh", "John"),
    ("Is", "Isaac"),
    ("Isb", "Isabel"),
    ("Jac", "James"),
    ("Jas", "James"),
    ("Jer", "Jeremiah"),
    ("Jno", "John"),
    ("Jon", "Jonathan"),
    ("Jos", "Joseph"),
    ("Josh", "Joshua"),
    ("Josh", "Josiah"),
    ("Jud", "Judith"),
    ("Lau", "Laurence"),
    ("Lawr", "Lawrence"),
    ("Leon", "Leonard"),
    ("Lyd", "Lydia"),
    ("Margt", "Margaret"),
    ("Math", "Matthias"),
    ("Matt", "Matthew"),
    ("Mau", "Maurice"),
    ("Mich", "Michael"),
    ("Micls", "Michael"),
    ("Mix", "Michael"),
    ("Mill", "Millicent"),
    ("My", "Mary"),
    ("Nath", "Nathaniel"),
    ("Nich", "Nicholas"),
    ("Nics", "Nicholas"),
    ("Ol", "Oliver"),
    ("Pat", "Patrick"),
    ("Pen", "Penelope"),
    ("Pet", "Peter"),
    ("Phil", "Philip"),
    ("Phin", "Phineas"),
    ("Phyl", "Phyllis"),
    ("Prisc", "Priscilla"),
    ("Pru", "Prudence"),
    ("Rach", "Rachel"),
    ("Ray", "Raymond"),
    ("Reb", "Rebecca"),
    ("Reg", "Reginald"),
    ("Ric", "Richard"),
    ("Richd", "Richard"),
    ("Robt", "Robert"),
    ("Rog", "Roger"),
    ("Saml", "Samuel"),
    ("Sar", "Sarah"),
    ("Silv", "Sylvester"),
    ("Sim", "Simon"),
    ("Sol", "Solomon"),
    ("Ste", "Stephen"),
    ("Susna", "Susanna"),
    ("Theo", "Theodore"),
    ("Thos", "Thomas"),
    ("Tim", "Timothy"),
    ("Urs", "Ursula"),
    ("Val", "Valentine"),
    ("Vinc", "Vincent"),
    ("Walt", "Walter"),
    ("Win", "Winifred"),
    ("Wm", "William"),
    ("Xpr", "Christopher"),
    ("Xtian", "Christian"),
    ("Xtopher", "Christopher"),
    ("Zach", "Zachariah"),
];

/// Expand an abbreviated given name, e.g. `Wm` to `William`.
pub fn abbreviation_to_full(abbreviation: &str) -> Option<&'static str> {
    if abbreviation.is_empty() {
        return None;
    }
    ENGLISH_GIVEN_NAME_ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == abbreviation)
        .map(|(_, full)| *full)
}

/// Find the first abbreviation for a full given name, e.g. `William` to `Gul`.
pub fn full_to_abbreviation(full_name: &str) -> Option<&'static str> {
    if full_name.is_empty() {
        return None;
    }
    ENGLISH_GIVEN_NAME_ABBREVIATIONS
        .iter()
        .find(|(_, full)| *full == full_name)
        .map(|(abbr, _)| *abbr)
}

/// Expand every abbreviated word in a forenames string, leaving other words as they are.
pub fn expand_abbreviated_forenames(forenames: &str) -> String {
    forenames
        .split_whitespace()
        .map(|word| {
            let bare = word.trim_end_matches('.');
            abbreviation_to_full(bare).unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_known_abbreviations() {
        assert_eq!(abbreviation_to_full("Wm"), Some("William"));
        assert_eq!(abbreviation_to_full("Thos"), Some("Thomas"));
        assert_eq!(abbreviation_to_full("Xtopher"), Some("Christopher"));
        assert_eq!(abbreviation_to_full("Zach"), Some("Zachariah"));
    }

    #[test]
    fn test_unknown_and_empty() {
        assert_eq!(abbreviation_to_full("Bob"), None);
        assert_eq!(abbreviation_to_full(""), None);
        assert_eq!(full_to_abbreviation(""), None);
        // case sensitive
        assert_eq!(abbreviation_to_full("wm"), None);
    }

    #[test]
    fn test_ambiguous_abbreviation_uses_first_entry() {
        assert_eq!(abbreviation_to_full("Josh"), Some("Joshua"));
        assert_eq!(full_to_abbreviation("Josiah"), Some("Josh"));
    }

    #[test]
    fn test_reverse_lookup_returns_first_abbreviation() {
        assert_eq!(full_to_abbreviation("William"), Some("Gul"));
        assert_eq!(full_to_abbreviation("Abraham"), Some("Abm"));
        assert_eq!(full_to_abbreviation("Nobody"), None);
    }

    #[test]
    fn test_first_occurrence_entries_map_back() {
        for (i, (abbr, full)) in ENGLISH_GIVEN_NAME_ABBREVIATIONS.iter().enumerate() {
            let first_abbr = ENGLISH_GIVEN_NAME_ABBREVIATIONS[..i].iter().all(|(a, _)| a != abbr);
            let first_full = ENGLISH_GIVEN_NAME_ABBREVIATIONS[..i].iter().all(|(_, f)| f != full);
            if first_abbr && first_full {
                assert_eq!(abbreviation_to_full(abbr), Some(*full));
                assert_eq!(full_to_abbreviation(full), Some(*abbr));
            }
        }
    }

    #[test]
    fn test_expand_forenames() {
        assert_eq!(expand_abbreviated_forenames("Wm Henry"), "William Henry");
        assert_eq!(expand_abbreviated_forenames("Thos. John"), "Thomas John");
    }
}
