//! Places.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceObj {
    pub place_string: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl PlaceObj {
    pub fn from_full_place_name(place: &str) -> Option<Self> {
        let place = place.trim();
        if place.is_empty() {
            return None;
        }
        Some(Self {
            place_string: place.to_string(),
            ..Default::default()
        })
    }

    /// The first comma separated part, e.g. the town of `Leeds, Yorkshire, England`.
    pub fn first_part(&self) -> &str {
        self.place_string.split(',').next().unwrap_or_default().trim()
    }
}
