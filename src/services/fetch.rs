//! Provider lookups over HTTP
//!
//! One request per distinct ISBN, paced by a shared minimum interval. Failed
//! lookups are not retried: they are logged and saved as an empty response,
//! which the extractors treat as "no data".

use async_trait::async_trait;
use indexmap::IndexSet;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::{
    config::{FetchConfig, GoogleBooksConfig, OpenLibraryConfig},
    error::AppResult,
    extract::openlibrary::bibkey,
    models::{CanonicalIsbn, SourceKind, SourcePayload},
    repository::Repository,
};

const USER_AGENT: &str = concat!("bookmerge/", env!("CARGO_PKG_VERSION"));

/// Looks up the raw metadata one provider holds for an ISBN
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VolumeLookup: Send + Sync {
    fn source(&self) -> SourceKind;

    async fn lookup(&self, isbn: &CanonicalIsbn) -> AppResult<Value>;
}

fn http_client(fetch: &FetchConfig) -> AppResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(fetch.timeout_seconds))
        .build()?)
}

/// Google Books volumes search (`q=isbn:<isbn>`)
pub struct GoogleBooksClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GoogleBooksClient {
    pub fn new(config: &GoogleBooksConfig, fetch: &FetchConfig) -> AppResult<Self> {
        if config.api_key.is_none() {
            tracing::warn!("No Google Books API key configured, requests will be anonymous");
        }
        Ok(Self {
            http: http_client(fetch)?,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl VolumeLookup for GoogleBooksClient {
    fn source(&self) -> SourceKind {
        SourceKind::GoogleBooks
    }

    async fn lookup(&self, isbn: &CanonicalIsbn) -> AppResult<Value> {
        let mut query = vec![("q", format!("isbn:{}", isbn))];
        if let Some(ref key) = self.api_key {
            query.push(("key", key.clone()));
        }

        tracing::debug!("Google Books lookup: {}", isbn);
        let response = self
            .http
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

/// Open Library books API (`bibkeys=ISBN:<isbn>&jscmd=data`)
pub struct OpenLibraryClient {
    http: reqwest::Client,
    endpoint: String,
}

impl OpenLibraryClient {
    pub fn new(config: &OpenLibraryConfig, fetch: &FetchConfig) -> AppResult<Self> {
        Ok(Self {
            http: http_client(fetch)?,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl VolumeLookup for OpenLibraryClient {
    fn source(&self) -> SourceKind {
        SourceKind::OpenLibrary
    }

    async fn lookup(&self, isbn: &CanonicalIsbn) -> AppResult<Value> {
        let query = [
            ("bibkeys", bibkey(isbn.as_str())),
            ("format", "json".to_string()),
            ("jscmd", "data".to_string()),
        ];

        tracing::debug!("Open Library lookup: {}", isbn);
        let response = self
            .http
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

/// Enforces a minimum interval between two requests
pub struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    /// Wait if necessary to comply with the interval
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::trace!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

pub struct FetchService {
    limiter: RateLimiter,
}

impl FetchService {
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            limiter: RateLimiter::new(Duration::from_millis(config.request_interval_ms)),
        }
    }

    /// Fetch every catalog ISBN from one provider and save the payloads.
    /// Returns the number of payloads written.
    pub async fn fetch_catalog(
        &self,
        repository: &Repository,
        lookup: &dyn VolumeLookup,
    ) -> AppResult<usize> {
        let catalog = repository.catalog.load()?;
        let isbns: Vec<CanonicalIsbn> = catalog.into_iter().map(|e| e.no_dash_isbn).collect();

        let payloads = self.fetch_volumes(lookup, &isbns).await;
        repository.volumes.save(lookup.source(), &payloads)?;
        Ok(payloads.len())
    }

    /// Query `lookup` once per distinct canonical ISBN, in first-seen order
    pub async fn fetch_volumes(
        &self,
        lookup: &dyn VolumeLookup,
        isbns: &[CanonicalIsbn],
    ) -> Vec<SourcePayload> {
        let distinct: IndexSet<&CanonicalIsbn> = isbns.iter().collect();
        let source = lookup.source();
        tracing::info!(
            "Fetching {} volumes for {} ISBNs ({} distinct)",
            source,
            isbns.len(),
            distinct.len()
        );

        let mut payloads = Vec::with_capacity(distinct.len());
        let mut failures = 0usize;
        let started = Instant::now();

        for (idx, isbn) in distinct.iter().enumerate() {
            self.limiter.wait().await;

            let response = match lookup.lookup(isbn).await {
                Ok(response) => response,
                Err(e) => {
                    failures += 1;
                    tracing::warn!("{} lookup failed for ISBN {}: {}", source, isbn, e);
                    json!({})
                }
            };
            payloads.push(SourcePayload::new((*isbn).clone(), response));

            tracing::debug!("{}: {}/{} done", source, idx + 1, distinct.len());
        }

        tracing::info!(
            "{} fetch completed in {:?}: {} payloads, {} failed lookups",
            source,
            started.elapsed(),
            payloads.len(),
            failures
        );
        payloads
    }
}
