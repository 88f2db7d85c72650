//! TMDB (The Movie Database) v3 client.
//!
//! Lists movies by original language through `GET /discover/movie`,
//! walking result pages up to a configured limit. Implements
//! [`MovieSource`] so the catalog handler can populate its cache.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use cinelang_core::error::CoreError;
use cinelang_core::movie::MovieRecord;
use cinelang_core::source::MovieSource;
use serde::Deserialize;

/// Public TMDB v3 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default number of discover pages fetched per language (20 movies each).
pub const DEFAULT_MAX_PAGES: u32 = 5;

/// Client settings.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// Base URL without trailing slash, e.g. [`DEFAULT_BASE_URL`].
    pub base_url: String,
    /// Upper bound on discover pages per fetch.
    pub max_pages: u32,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            timeout: Duration::from_secs(25),
        }
    }
}

/// Errors from the TMDB REST layer.
#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// TMDB returned a non-2xx status code.
    #[error("TMDB API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// One page of `/discover/movie`.
#[derive(Debug, Deserialize)]
pub struct DiscoverPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MovieRecord>,
    #[serde(default)]
    pub total_pages: u32,
}

/// HTTP client for the TMDB discover API.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    max_pages: u32,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, TmdbError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling).
    pub fn with_client(client: reqwest::Client, config: TmdbConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_pages: config.max_pages.max(1),
        }
    }

    /// Fetch a single discover page for movies originally in `language`,
    /// most popular first.
    pub async fn discover_page(
        &self,
        language: &str,
        api_key: &str,
        page: u32,
    ) -> Result<DiscoverPage, TmdbError> {
        let page = page.to_string();
        let response = self
            .client
            .get(format!("{}/discover/movie", self.base_url))
            .query(&[
                ("api_key", api_key),
                ("with_original_language", language),
                ("sort_by", "popularity.desc"),
                ("include_adult", "false"),
                ("page", page.as_str()),
            ])
            .send()
            .await
            // The URL carries the API key; keep it out of error messages.
            .map_err(reqwest::Error::without_url)?;

        let response = Self::ensure_success(response).await?;
        Ok(response
            .json::<DiscoverPage>()
            .await
            .map_err(reqwest::Error::without_url)?)
    }

    /// Fetch up to `max_pages` pages and merge them, dropping repeated ids.
    pub async fn discover_movies(
        &self,
        language: &str,
        api_key: &str,
    ) -> Result<Vec<MovieRecord>, TmdbError> {
        let mut pages = Vec::new();
        let mut page = 1;

        loop {
            let current = self.discover_page(language, api_key, page).await?;
            tracing::debug!(
                language,
                page,
                results = current.results.len(),
                total_pages = current.total_pages,
                "Fetched TMDB discover page"
            );
            let last = page >= self.max_pages.min(current.total_pages);
            pages.push(current.results);
            if last {
                break;
            }
            page += 1;
        }

        Ok(merge_pages(pages))
    }

    // ---- private helpers ----

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, TmdbError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TmdbError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl MovieSource for TmdbClient {
    async fn fetch_movies(
        &self,
        language: &str,
        api_key: &str,
    ) -> Result<Vec<MovieRecord>, CoreError> {
        self.discover_movies(language, api_key)
            .await
            .map_err(|e| CoreError::Upstream(e.to_string()))
    }
}

/// Concatenate result pages, keeping the first occurrence of each id.
///
/// Popularity ordering shifts between page requests, so the same movie can
/// appear on two adjacent pages.
pub fn merge_pages(pages: Vec<Vec<MovieRecord>>) -> Vec<MovieRecord> {
    let mut seen = HashSet::new();
    pages
        .into_iter()
        .flatten()
        .filter(|m| seen.insert(m.id))
        .collect()
}
