//! Person names.

use serde::{Deserialize, Serialize};

/// A person's name as far as a record gives it.
///
/// The full name is authoritative when present; the parts are used to
/// rebuild it otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameObj {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub forenames: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl NameObj {
    /// Name from a single full name string.
    pub fn from_full_name(full_name: &str) -> Option<Self> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return None;
        }
        Some(Self {
            full_name: Some(full_name.to_string()),
            ..Default::default()
        })
    }

    /// Name from forenames and a last name, either of which may be missing.
    pub fn from_forenames_and_last_name(forenames: Option<&str>, last_name: Option<&str>) -> Option<Self> {
        let forenames = forenames.map(str::trim).filter(|s| !s.is_empty());
        let last_name = last_name.map(str::trim).filter(|s| !s.is_empty());
        if forenames.is_none() && last_name.is_none() {
            return None;
        }
        Some(Self {
            full_name: None,
            forenames: forenames.map(String::from),
            last_name: last_name.map(String::from),
        })
    }

    pub fn is_empty(&self) -> bool {
        non_empty(&self.full_name).is_none()
            && non_empty(&self.forenames).is_none()
            && non_empty(&self.last_name).is_none()
    }

    /// The full name, or the parts joined with a space.
    pub fn inferred_full_name(&self) -> Option<String> {
        if let Some(full) = non_empty(&self.full_name) {
            return Some(full.to_string());
        }
        match (non_empty(&self.forenames), non_empty(&self.last_name)) {
            (Some(f), Some(l)) => Some(format!("{f} {l}")),
            (Some(f), None) => Some(f.to_string()),
            (None, Some(l)) => Some(l.to_string()),
            (None, None) => None,
        }
    }

    /// The forenames, or every word of the full name except the last.
    pub fn inferred_forenames(&self) -> Option<String> {
        if let Some(forenames) = non_empty(&self.forenames) {
            return Some(forenames.to_string());
        }
        let full = non_empty(&self.full_name)?;
        let (forenames, _) = full.rsplit_once(' ')?;
        Some(forenames.trim().to_string())
    }

    /// The last name, or the last word of a full name with more than one word.
    pub fn inferred_last_name(&self) -> Option<String> {
        if let Some(last_name) = non_empty(&self.last_name) {
            return Some(last_name.to_string());
        }
        let full = non_empty(&self.full_name)?;
        let (_, last_name) = full.rsplit_once(' ')?;
        Some(last_name.to_string())
    }

    pub fn inferred_first_name(&self) -> Option<String> {
        let forenames = self
            .inferred_forenames()
            .or_else(|| non_empty(&self.full_name).map(String::from))?;
        forenames.split_whitespace().next().map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inferred_parts_from_full_name() {
        let name = NameObj::from_full_name("  John Henry Smith ").unwrap();
        assert_eq!(name.inferred_full_name().as_deref(), Some("John Henry Smith"));
        assert_eq!(name.inferred_forenames().as_deref(), Some("John Henry"));
        assert_eq!(name.inferred_last_name().as_deref(), Some("Smith"));
        assert_eq!(name.inferred_first_name().as_deref(), Some("John"));
    }

    #[test]
    fn test_inferred_full_name_from_parts() {
        let name = NameObj::from_forenames_and_last_name(Some("Mary"), Some("Jones")).unwrap();
        assert_eq!(name.inferred_full_name().as_deref(), Some("Mary Jones"));

        let only_last = NameObj::from_forenames_and_last_name(None, Some("Jones")).unwrap();
        assert_eq!(only_last.inferred_full_name().as_deref(), Some("Jones"));
        assert_eq!(only_last.inferred_first_name(), None);
    }

    #[test]
    fn test_empty_names() {
        assert!(NameObj::from_full_name("   ").is_none());
        assert!(NameObj::from_forenames_and_last_name(Some(""), None).is_none());
        assert!(NameObj::default().is_empty());
    }

    #[test]
    fn test_single_word_full_name() {
        let name = NameObj::from_full_name("Smith").unwrap();
        assert_eq!(name.inferred_last_name(), None);
        assert_eq!(name.inferred_first_name().as_deref(), Some("Smith"));
    }
}
