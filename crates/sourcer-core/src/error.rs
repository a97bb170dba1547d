//! Error types for the sourcer-core library.

use thiserror::Error;

/// Main error type for the sourcer library.
#[derive(Error, Debug)]
pub enum SourcerError {
    /// Generalization error.
    #[error("generalize error: {0}")]
    Generalize(#[from] GeneralizeError),

    /// Citation building error.
    #[error("citation error: {0}")]
    Citation(#[from] CitationError),

    /// Record fetch error.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to turning extracted data into generalized data.
#[derive(Error, Debug)]
pub enum GeneralizeError {
    /// The extraction did not produce enough data to interpret the page.
    #[error("could not interpret the {site} page: extracted data is invalid or incomplete")]
    InvalidData { site: String },

    /// No reader exists for the requested site.
    #[error("unknown site: {0}")]
    UnknownSite(String),

    /// The extracted data is not a JSON object.
    #[error("extracted data must be a JSON object")]
    NotAnObject,
}

/// Errors related to citation building.
#[derive(Error, Debug)]
pub enum CitationError {
    /// The extracted data for the site is not usable for a citation.
    #[error("cannot build a {site} citation from invalid extracted data")]
    InvalidData { site: String },
}

/// Errors from fetching records or prefetched data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-200 status.
    #[error("fetch failed with status code {0}")]
    Status(u16),

    /// The response body was not JSON.
    #[error("response does not look like JSON")]
    NotJson,

    /// The request could not be performed.
    #[error("request failed: {0}")]
    Request(String),

    /// There were no source ids to fetch.
    #[error("no sources to fetch")]
    NoSources,

    /// A required dependency was still not ready after polling.
    #[error("{what} not retrieved after {attempts} attempts")]
    RetriesExhausted { what: String, attempts: u32 },
}

/// Result type for the sourcer library.
pub type Result<T> = std::result::Result<T, SourcerError>;
