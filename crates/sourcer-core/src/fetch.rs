//! The contract for fetching JSON records from a site.
//!
//! The core never performs requests itself. Callers plug in a
//! [`RecordFetcher`]: the CLI uses an HTTP client, tests and offline runs
//! use [`MemoryFetcher`].

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

/// Fetches a URL and returns its JSON body.
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Value, FetchError>;
}

/// Interpret a response: anything but 200 is a status error and the body
/// must look like a JSON object.
pub fn parse_json_body(status: u16, text: &str) -> Result<Value, FetchError> {
    if status != 200 {
        return Err(FetchError::Status(status));
    }
    if !text.trim_start().starts_with('{') {
        return Err(FetchError::NotJson);
    }
    serde_json::from_str(text).map_err(|_| FetchError::NotJson)
}

/// Answers from a fixed map of URL to JSON; unknown URLs give a 404.
#[derive(Debug, Default, Clone)]
pub struct MemoryFetcher {
    responses: HashMap<String, Value>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, value: Value) -> Self {
        self.responses.insert(url.into(), value);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, value: Value) {
        self.responses.insert(url.into(), value);
    }
}

#[async_trait]
impl RecordFetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        self.responses.get(url).cloned().ok_or(FetchError::Status(404))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_json_body() {
        assert_eq!(parse_json_body(200, r#"{"a": 1}"#).unwrap(), json!({"a": 1}));
        assert_eq!(parse_json_body(404, "{}"), Err(FetchError::Status(404)));
        assert_eq!(parse_json_body(200, "<html></html>"), Err(FetchError::NotJson));
        assert_eq!(parse_json_body(200, "{broken"), Err(FetchError::NotJson));
    }

    #[tokio::test]
    async fn test_memory_fetcher() {
        let fetcher = MemoryFetcher::new().with("https://a", json!({"x": true}));
        assert_eq!(fetcher.fetch("https://a").await.unwrap(), json!({"x": true}));
        assert_eq!(fetcher.fetch("https://b").await, Err(FetchError::Status(404)));
    }
}
