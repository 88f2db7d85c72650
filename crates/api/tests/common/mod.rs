#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use cinelang_api::config::ServerConfig;
use cinelang_api::router::build_app_router;
use cinelang_api::state::AppState;
use cinelang_core::cache::CatalogCache;
use cinelang_core::error::CoreError;
use cinelang_core::movie::MovieRecord;
use cinelang_core::source::MovieSource;
use cinelang_core::token::AddonToken;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build a test `ServerConfig`: Hindi and Tamil enabled, a server key, and
/// a short fetch budget.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        tmdb_api_key: Some("server-key".to_string()),
        enabled_languages: BTreeSet::from(["hi".to_string(), "ta".to_string()]),
        tmdb_base_url: "http://tmdb.invalid/3".to_string(),
        tmdb_max_pages: 1,
        fetch_timeout_secs: 1,
        cache_ttl: None,
        cache_dir: PathBuf::from("./unused-cache"),
        database_url: None,
    }
}

pub fn token(tmdb_key: Option<&str>, languages: &[&str]) -> String {
    AddonToken {
        tmdb_key: tmdb_key.map(str::to_string),
        languages: languages.iter().map(|l| l.to_string()).collect(),
    }
    .encode()
    .unwrap()
}

pub fn movie(id: u64, title: &str) -> MovieRecord {
    MovieRecord::new(id, title).with_poster(format!("/{id}.jpg"))
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

type CacheKey = (String, Option<String>);

/// In-memory cache that records every `save`.
#[derive(Default)]
pub struct FakeCache {
    pub entries: Mutex<HashMap<CacheKey, Vec<MovieRecord>>>,
    pub saves: Mutex<Vec<(String, Vec<MovieRecord>, Option<String>)>>,
    pub fail_load: bool,
    pub fail_save: bool,
}

impl FakeCache {
    pub fn with_entry(language: &str, token: Option<&str>, records: Vec<MovieRecord>) -> Self {
        let cache = Self::default();
        cache.entries.lock().unwrap().insert(
            (language.to_string(), token.map(str::to_string)),
            records,
        );
        cache
    }

    pub fn saves(&self) -> Vec<(String, Vec<MovieRecord>, Option<String>)> {
        self.saves.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogCache for FakeCache {
    async fn load(
        &self,
        language: &str,
        token: Option<&str>,
    ) -> Result<Vec<MovieRecord>, CoreError> {
        if self.fail_load {
            return Err(CoreError::Cache("disk on fire".into()));
        }
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(&(language.to_string(), token.map(str::to_string)))
            .cloned()
            .unwrap_or_default())
    }

    async fn save(
        &self,
        language: &str,
        records: &[MovieRecord],
        token: Option<&str>,
    ) -> Result<(), CoreError> {
        self.saves.lock().unwrap().push((
            language.to_string(),
            records.to_vec(),
            token.map(str::to_string),
        ));
        if self.fail_save {
            return Err(CoreError::Cache("read-only".into()));
        }
        self.entries.lock().unwrap().insert(
            (language.to_string(), token.map(str::to_string)),
            records.to_vec(),
        );
        Ok(())
    }
}

/// What the fake source does when asked for movies.
#[derive(Clone)]
pub enum SourceBehavior {
    Returns(Vec<MovieRecord>),
    Fails,
    Panics,
    Hangs,
}

pub struct FakeSource {
    behavior: SourceBehavior,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeSource {
    pub fn new(behavior: SourceBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(language, api_key)` of every fetch.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieSource for FakeSource {
    async fn fetch_movies(
        &self,
        language: &str,
        api_key: &str,
    ) -> Result<Vec<MovieRecord>, CoreError> {
        self.calls
            .lock()
            .unwrap()
            .push((language.to_string(), api_key.to_string()));
        match &self.behavior {
            SourceBehavior::Returns(records) => Ok(records.clone()),
            SourceBehavior::Fails => Err(CoreError::Upstream("TMDB returned 503".into())),
            SourceBehavior::Panics => panic!("source exploded"),
            SourceBehavior::Hangs => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(Vec::new())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router (same middleware stack as `main.rs`)
/// over the given fakes.
pub fn build_test_app(cache: Arc<FakeCache>, source: Arc<FakeSource>) -> Router {
    build_test_app_with_config(test_config(), cache, source)
}

pub fn build_test_app_with_config(
    config: ServerConfig,
    cache: Arc<FakeCache>,
    source: Arc<FakeSource>,
) -> Router {
    let state = AppState::new(config, cache, source, None);
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn send(app: Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
