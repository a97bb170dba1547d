//! Per-site readers and citation functions.
//!
//! Each supported site has a reader implementing [`EdReader`] and a function
//! that fills a [`CitationBuilder`]. [`Site`] dispatches to them.

pub mod fs;
pub mod freebmd;
pub mod mh;
pub mod naie;
pub mod nzbdm;
pub mod wiewaswie;
pub mod wikipedia;

use serde::{Deserialize, Serialize};

use crate::citation::CitationBuilder;
use crate::error::{CitationError, GeneralizeError};
use crate::models::GeneralizedData;
use crate::readers::{EdReader, ExtractedData};

/// A supported genealogy site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    Freebmd,
    Fs,
    Mh,
    Naie,
    Nzbdm,
    Wiewaswie,
    Wikipedia,
}

impl Site {
    pub const ALL: [Site; 7] = [
        Site::Freebmd,
        Site::Fs,
        Site::Mh,
        Site::Naie,
        Site::Nzbdm,
        Site::Wiewaswie,
        Site::Wikipedia,
    ];

    /// Short key used in generalized data and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::Freebmd => "freebmd",
            Self::Fs => "fs",
            Self::Mh => "mh",
            Self::Naie => "naie",
            Self::Nzbdm => "nzbdm",
            Self::Wiewaswie => "wiewaswie",
            Self::Wikipedia => "wikipedia",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Freebmd => "FreeBMD",
            Self::Fs => "FamilySearch",
            Self::Mh => "MyHeritage",
            Self::Naie => "National Archives of Ireland",
            Self::Nzbdm => "New Zealand BDM",
            Self::Wiewaswie => "WieWasWie",
            Self::Wikipedia => "Wikipedia",
        }
    }

    /// Make the reader for a page of this site.
    pub fn reader(self, ed: &ExtractedData) -> Box<dyn EdReader> {
        match self {
            Self::Freebmd => Box::new(freebmd::FreebmdReader::new(ed)),
            Self::Fs => Box::new(fs::FsReader::new(ed)),
            Self::Mh => Box::new(mh::MhReader::new(ed)),
            Self::Naie => Box::new(naie::NaieReader::new(ed)),
            Self::Nzbdm => Box::new(nzbdm::NzbdmReader::new(ed)),
            Self::Wiewaswie => Box::new(wiewaswie::WiewaswieReader::new(ed)),
            Self::Wikipedia => Box::new(wikipedia::WikipediaReader::new(ed)),
        }
    }

    /// Fill the site specific parts of a citation.
    pub fn build_core_citation(
        self,
        ed: &ExtractedData,
        gd: &GeneralizedData,
        builder: &mut CitationBuilder<'_>,
    ) -> Result<(), CitationError> {
        match self {
            Self::Freebmd => freebmd::build_citation(ed, gd, builder),
            Self::Fs => fs::build_citation(ed, gd, builder),
            Self::Mh => mh::build_citation(ed, gd, builder),
            Self::Naie => naie::build_citation(ed, gd, builder),
            Self::Nzbdm => nzbdm::build_citation(ed, gd, builder),
            Self::Wiewaswie => wiewaswie::build_citation(ed, gd, builder),
            Self::Wikipedia => wikipedia::build_citation(ed, gd, builder),
        }
    }
}

impl std::fmt::Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Site {
    type Err = GeneralizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|site| site.key() == key)
            .ok_or_else(|| GeneralizeError::UnknownSite(s.to_string()))
    }
}

pub(crate) fn invalid(site: Site) -> CitationError {
    CitationError::InvalidData {
        site: site.key().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_keys_round_trip() {
        for site in Site::ALL {
            assert_eq!(site.key().parse::<Site>().unwrap(), site);
        }
        assert_eq!("FreeBMD".parse::<Site>().unwrap(), Site::Freebmd);
        assert!(matches!("ancestry".parse::<Site>(), Err(GeneralizeError::UnknownSite(_))));
    }

    #[test]
    fn test_reader_for_empty_data_is_invalid() {
        let ed = ExtractedData::new();
        for site in Site::ALL {
            assert!(!site.reader(&ed).has_valid_data(), "{site} accepted empty data");
        }
    }
}
