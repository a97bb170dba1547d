//! One popup session over a page: its data, options and prefetched extras.
//!
//! Some sites need extra data that is slow to fetch, such as the Ancestry
//! sharing link of a record image. The session starts that fetch early and
//! keeps the result in a write-once cell, so any number of later actions
//! share a single fetch. Actions that need the data poll for it with a
//! bounded [`RetryPolicy`].

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

use crate::citation::{CitationInput, CitationObject, CitationType, build_citation};
use crate::error::{FetchError, Result};
use crate::fetch::RecordFetcher;
use crate::generalize::generalize;
use crate::models::options::TableCaption;
use crate::models::{GeneralizedData, Options};
use crate::readers::ExtractedData;
use crate::sites::Site;
use crate::table::{TableObject, build_household_table};

/// How long to wait for prefetched data: `max_attempts` checks `delay` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(100),
            max_attempts: 100,
        }
    }
}

impl RetryPolicy {
    /// Poll `ready` until it gives a value or the attempts run out.
    pub async fn wait_for<T>(&self, what: &str, ready: impl Fn() -> Option<T>) -> std::result::Result<T, FetchError> {
        for attempt in 0..self.max_attempts {
            if let Some(value) = ready() {
                return Ok(value);
            }
            if attempt > 0 && attempt % 10 == 0 {
                debug!("Still waiting for {} (attempt {})", what, attempt);
            }
            tokio::time::sleep(self.delay).await;
        }
        ready().ok_or_else(|| FetchError::RetriesExhausted {
            what: what.to_string(),
            attempts: self.max_attempts,
        })
    }
}

fn id_string(value: &Option<Value>) -> Option<String> {
    match value.as_ref()? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharingV2 {
    pub share_id: Option<Value>,
    pub share_token: Option<Value>,
    pub share_url: Option<String>,
}

/// Ancestry's answer to a sharing request for a record or image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharingData {
    pub id: Option<Value>,
    pub hmac_id: Option<Value>,
    pub url: Option<String>,
    pub v2: Option<SharingV2>,
}

impl SharingData {
    /// `{{Ancestry Sharing|id|token}}`, using the v2 ids when present.
    pub fn template(&self) -> Option<String> {
        let v2 = self
            .v2
            .as_ref()
            .and_then(|v2| Some((id_string(&v2.share_id)?, id_string(&v2.share_token)?)));
        let (id, token) = match v2 {
            Some(ids) => ids,
            None => (id_string(&self.id)?, id_string(&self.hmac_id)?),
        };
        Some(format!("{{{{Ancestry Sharing|{id}|{token}}}}}"))
    }

    /// The sharing URL, the v2 one when present.
    pub fn sharing_url(&self) -> Option<String> {
        self.v2
            .as_ref()
            .and_then(|v2| v2.share_url.clone())
            .or_else(|| self.url.clone())
            .filter(|u| !u.is_empty())
    }
}

/// Result of a user action: its value, or a warning to show instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome<T> {
    Done(T),
    Warning(String),
}

/// Run a user action, turning any error into a logged warning message.
pub async fn run_action<T>(name: &str, action: impl Future<Output = Result<T>>) -> ActionOutcome<T> {
    match action.await {
        Ok(value) => ActionOutcome::Done(value),
        Err(e) => {
            error!("{} failed: {}", name, e);
            ActionOutcome::Warning(format!("{name} failed: {e}"))
        }
    }
}

/// The state of one popup session. Cheap to clone; clones share the prefetch.
#[derive(Clone)]
pub struct PopupSession {
    site: Site,
    ed: Arc<ExtractedData>,
    gd: Arc<GeneralizedData>,
    options: Arc<Options>,
    fetcher: Arc<dyn RecordFetcher>,
    sharing_data_url: Option<String>,
    sharing: Arc<OnceCell<Option<SharingData>>>,
    prefetch_started: Arc<AtomicBool>,
    retry: RetryPolicy,
}

impl PopupSession {
    /// Generalize the page and start a session over it.
    pub fn new(site: Site, ed: ExtractedData, options: Options, fetcher: Arc<dyn RecordFetcher>) -> Result<Self> {
        let gd = generalize(site, &ed)?;
        info!("Started {} session for {:?}", site, gd.record_type);
        Ok(Self {
            site,
            ed: Arc::new(ed),
            gd: Arc::new(gd),
            options: Arc::new(options),
            fetcher,
            sharing_data_url: None,
            sharing: Arc::new(OnceCell::new()),
            prefetch_started: Arc::new(AtomicBool::new(false)),
            retry: RetryPolicy::default(),
        })
    }

    /// Where to fetch sharing data from; without one there is no sharing data.
    pub fn with_sharing_data_url(mut self, url: impl Into<String>) -> Self {
        self.sharing_data_url = Some(url.into());
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn generalized_data(&self) -> &GeneralizedData {
        &self.gd
    }

    /// Fetch the sharing data once; later calls reuse the first result.
    ///
    /// A failed fetch is not an error, the session just has no sharing data.
    pub async fn prefetch_sharing_data(&self) {
        self.prefetch_started.store(true, Ordering::SeqCst);
        self.sharing
            .get_or_init(|| async {
                let Some(url) = self.sharing_data_url.as_deref() else {
                    return None;
                };
                debug!("Prefetching sharing data from {}", url);
                match self.fetcher.fetch(url).await {
                    Ok(value) => match serde_json::from_value::<SharingData>(value) {
                        Ok(data) => Some(data),
                        Err(e) => {
                            warn!("Sharing data has an unexpected shape: {}", e);
                            None
                        }
                    },
                    Err(e) => {
                        warn!("Could not fetch sharing data: {}", e);
                        None
                    }
                }
            })
            .await;
    }

    /// Sharing data once the prefetch finished.
    ///
    /// Without a sharing data URL there is nothing to wait for. A prefetch
    /// that was never started is run now; one in flight is polled with the
    /// retry policy.
    async fn wait_for_sharing_data(&self) -> std::result::Result<Option<SharingData>, FetchError> {
        if self.sharing_data_url.is_none() {
            return Ok(None);
        }
        if !self.prefetch_started.load(Ordering::SeqCst) {
            debug!("Sharing data was not prefetched, fetching it now");
            self.prefetch_sharing_data().await;
        }
        let sharing = Arc::clone(&self.sharing);
        self.retry.wait_for("sharing data", move || sharing.get().cloned()).await
    }

    /// Sharing data for optional use; on timeout continue without it.
    async fn optional_sharing_data(&self) -> Option<SharingData> {
        match self.wait_for_sharing_data().await {
            Ok(data) => data,
            Err(e) => {
                warn!("Proceeding without sharing data: {}", e);
                None
            }
        }
    }

    /// Sharing data that an action cannot do without.
    async fn required_sharing_data(&self) -> Result<SharingData> {
        self.wait_for_sharing_data()
            .await?
            .ok_or_else(|| {
                FetchError::Request("no sharing data is available for this page".to_string()).into()
            })
    }

    fn household_table_string(&self, citation: Option<&str>) -> Option<String> {
        self.gd.household.as_ref()?;
        Some(build_household_table(&self.gd, &self.options, citation).table_string)
    }

    pub async fn build_citation(&self, citation_type: CitationType, run_date: NaiveDate) -> Result<CitationObject> {
        let sharing_link = self.optional_sharing_data().await.and_then(|s| s.template());
        let input = CitationInput {
            site: self.site,
            ed: &self.ed,
            gd: &self.gd,
            citation_type,
            run_date,
            options: &self.options,
            household_table_string: self.household_table_string(None),
            sharing_link,
        };
        build_citation(&input)
    }

    /// The household table, captioned with an inline citation when the options ask for one.
    pub async fn build_household_table(&self, run_date: NaiveDate) -> Result<TableObject> {
        let citation = match self.options.table_caption {
            TableCaption::WithCitation => {
                // the table must not be repeated inside its own caption
                let options = Options {
                    add_household_table: false,
                    ..(*self.options).clone()
                };
                let input = CitationInput {
                    site: self.site,
                    ed: &self.ed,
                    gd: &self.gd,
                    citation_type: CitationType::Inline,
                    run_date,
                    options: &options,
                    household_table_string: None,
                    sharing_link: self.optional_sharing_data().await.and_then(|s| s.template()),
                };
                Some(build_citation(&input)?.citation)
            }
            _ => None,
        };
        Ok(build_household_table(&self.gd, &self.options, citation.as_deref()))
    }

    pub async fn build_sharing_template(&self) -> Result<String> {
        let data = self.required_sharing_data().await?;
        data.template()
            .ok_or_else(|| FetchError::Request("sharing data has no ids".to_string()).into())
    }

    pub async fn build_sharing_url(&self) -> Result<String> {
        let data = self.required_sharing_data().await?;
        data.sharing_url()
            .ok_or_else(|| FetchError::Request("sharing data has no URL".to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourcerError;
    use crate::fetch::MemoryFetcher;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SHARING_URL: &str = "https://www.ancestry.com/sharing/data";

    struct CountingFetcher {
        inner: MemoryFetcher,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RecordFetcher for CountingFetcher {
        async fn fetch(&self, url: &str) -> std::result::Result<Value, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(250)).await;
            self.inner.fetch(url).await
        }
    }

    fn freebmd_ed() -> ExtractedData {
        json!({
            "url": "https://www.freebmd.org.uk/cgi/information.pl?id=1",
            "eventType": "birth",
            "eventYear": "1881",
            "eventQuarter": "Mar",
            "givenNames": "John",
            "surname": "SMITH",
            "registrationDistrict": "Pancras",
            "referenceVolume": "1b",
            "referencePage": "42"
        })
        .as_object()
        .unwrap()
        .clone()
    }

    fn sharing_json() -> Value {
        json!({
            "id": 24274440,
            "hmac_id": "95cf5c",
            "url": "https://www.ancestry.com/sharing/24274440?h=95cf5c",
            "v2": {"share_id": "abc", "share_token": "def", "share_url": "https://www.ancestry.com/sharing/abc?token=def"}
        })
    }

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()
    }

    #[test]
    fn test_sharing_template_prefers_v2() {
        let data: SharingData = serde_json::from_value(sharing_json()).unwrap();
        assert_eq!(data.template().as_deref(), Some("{{Ancestry Sharing|abc|def}}"));
        assert_eq!(
            data.sharing_url().as_deref(),
            Some("https://www.ancestry.com/sharing/abc?token=def")
        );

        let v1 = SharingData {
            v2: None,
            ..data
        };
        assert_eq!(v1.template().as_deref(), Some("{{Ancestry Sharing|24274440|95cf5c}}"));
        assert_eq!(
            v1.sharing_url().as_deref(),
            Some("https://www.ancestry.com/sharing/24274440?h=95cf5c")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_prefetch_runs_once() {
        let fetcher = Arc::new(CountingFetcher {
            inner: MemoryFetcher::new().with(SHARING_URL, sharing_json()),
            calls: AtomicUsize::new(0),
        });
        let session = PopupSession::new(Site::Freebmd, freebmd_ed(), Options::default(), fetcher.clone())
            .unwrap()
            .with_sharing_data_url(SHARING_URL);

        let (_, _, template) = tokio::join!(
            session.prefetch_sharing_data(),
            session.prefetch_sharing_data(),
            session.build_sharing_template()
        );
        assert_eq!(template.unwrap(), "{{Ancestry Sharing|abc|def}}");
        session.prefetch_sharing_data().await;
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_citation_without_sharing_url_does_not_wait() {
        let session = PopupSession::new(
            Site::Freebmd,
            freebmd_ed(),
            Options::default(),
            Arc::new(MemoryFetcher::new()),
        )
        .unwrap();

        let start = tokio::time::Instant::now();
        let citation = session.build_citation(CitationType::Source, run_date()).await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(citation.citation.starts_with("* '''Birth Registration''': \"England & Wales Birth Index\""));

        let err = session.build_sharing_template().await.unwrap_err();
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(matches!(err, SourcerError::Fetch(FetchError::Request(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sharing_data_fetched_when_not_prefetched() {
        let fetcher = Arc::new(CountingFetcher {
            inner: MemoryFetcher::new().with(SHARING_URL, sharing_json()),
            calls: AtomicUsize::new(0),
        });
        let session = PopupSession::new(Site::Freebmd, freebmd_ed(), Options::default(), fetcher.clone())
            .unwrap()
            .with_sharing_data_url(SHARING_URL);

        let start = tokio::time::Instant::now();
        let citation = session.build_citation(CitationType::Inline, run_date()).await.unwrap();
        assert!(citation.citation.contains("{{Ancestry Sharing|abc|def}}"));
        // one fetch, no polling on top of it
        assert_eq!(start.elapsed(), Duration::from_millis(250));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_prefetch_runs_out_of_attempts() {
        let fetcher = Arc::new(CountingFetcher {
            inner: MemoryFetcher::new().with(SHARING_URL, sharing_json()),
            calls: AtomicUsize::new(0),
        });
        let session = PopupSession::new(Site::Freebmd, freebmd_ed(), Options::default(), fetcher)
            .unwrap()
            .with_sharing_data_url(SHARING_URL)
            .with_retry_policy(RetryPolicy {
                delay: Duration::from_millis(10),
                max_attempts: 3,
            });

        let (_, citation, template) = tokio::join!(
            session.prefetch_sharing_data(),
            session.build_citation(CitationType::Source, run_date()),
            session.build_sharing_template()
        );
        // optional data: the citation is built without the link
        assert!(!citation.unwrap().citation.contains("Ancestry Sharing"));
        assert!(matches!(
            template.unwrap_err(),
            SourcerError::Fetch(FetchError::RetriesExhausted { attempts: 3, .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sharing_link_used_as_image_link() {
        let fetcher = Arc::new(MemoryFetcher::new().with(SHARING_URL, sharing_json()));
        let session = PopupSession::new(Site::Freebmd, freebmd_ed(), Options::default(), fetcher)
            .unwrap()
            .with_sharing_data_url(SHARING_URL);
        session.prefetch_sharing_data().await;
        let citation = session.build_citation(CitationType::Inline, run_date()).await.unwrap();
        assert!(citation.citation.contains("{{Ancestry Sharing|abc|def}}"));
    }

    #[tokio::test]
    async fn test_missing_sharing_source_is_a_warning() {
        let session = PopupSession::new(
            Site::Freebmd,
            freebmd_ed(),
            Options::default(),
            Arc::new(MemoryFetcher::new()),
        )
        .unwrap();
        session.prefetch_sharing_data().await;

        let outcome = run_action("Building sharing URL", session.build_sharing_url()).await;
        match outcome {
            ActionOutcome::Warning(message) => assert!(message.starts_with("Building sharing URL failed")),
            ActionOutcome::Done(url) => panic!("unexpected url {url}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_page_does_not_start_a_session() {
        let result = PopupSession::new(
            Site::Freebmd,
            ExtractedData::new(),
            Options::default(),
            Arc::new(MemoryFetcher::new()),
        );
        assert!(result.is_err());
    }
}
