//! Catalog request pipeline shared by the catalog and refresh handlers.
//!
//! The phases run in a fixed order: resolve the catalog identifier from
//! the URL, parse it, check the language against the token's enabled set,
//! then load from cache and fall back to a fetch when the cache is empty.
//! Every failure past the authorization check degrades to an empty
//! `{"metas": []}` success so aggregators can always parse the body.

use std::any::Any;

use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use cinelang_core::catalog_id::CatalogId;
use cinelang_core::error::CoreError;
use cinelang_core::meta::{to_output_meta, OutputMeta};
use cinelang_core::movie::MovieRecord;
use serde::Serialize;

use crate::state::AppState;

/// `error` marker when no identifier can be resolved (status 400).
pub const MISSING_CATALOG_ID: &str = "missing_catalog_id";

/// `error` marker when the cache is empty and no TMDB key exists (status 200).
pub const NO_API_KEY: &str = "no_api_key";

/// Body of every catalog response.
#[derive(Debug, Default, Serialize)]
pub struct CatalogBody {
    pub metas: Vec<OutputMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl CatalogBody {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn error(marker: &'static str) -> Self {
        Self {
            metas: Vec::new(),
            error: Some(marker),
        }
    }

    pub fn metas(metas: Vec<OutputMeta>) -> Self {
        Self { metas, error: None }
    }
}

/// JSON catalog response open to any origin.
pub fn catalog_response(status: StatusCode, body: CatalogBody) -> Response {
    (status, [(ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(body)).into_response()
}

/// Panic handler for catalog routes: a panic still yields `{"metas": []}`.
pub fn catalog_panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("<non-string panic payload>");
    tracing::error!(panic = detail, "Catalog handler panicked");
    catalog_response(StatusCode::OK, CatalogBody::empty())
}

/// Failures on the authorized path.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The cache is empty and neither token nor server has a TMDB key.
    #[error("no TMDB API key available")]
    NoApiKey,

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Find the catalog identifier in a request URL.
///
/// First match wins: query `id`, query `lang`, then the path segment after
/// a literal `movie` segment with a trailing `.json` removed. Blank values
/// count as absent.
pub fn resolve_identifier(uri: &Uri) -> Option<String> {
    let params: Vec<(String, String)> = uri
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();

    let param = |name: &str| {
        params
            .iter()
            .find(|(key, value)| key == name && !value.is_empty())
            .map(|(_, value)| value.clone())
    };

    param("id")
        .or_else(|| param("lang"))
        .or_else(|| movie_segment(uri.path()))
}

fn movie_segment(path: &str) -> Option<String> {
    let mut segments = path.split('/');
    segments.find(|s| *s == "movie")?;
    let next = segments.next()?;
    let id = next.strip_suffix(".json").unwrap_or(next);
    (!id.is_empty()).then(|| id.to_string())
}

/// Parse `identifier` and return it only if its language is enabled for
/// its token.
pub fn authorize(state: &AppState, identifier: &str) -> Option<CatalogId> {
    let id = CatalogId::parse(identifier);
    let enabled = state.access.enabled_languages(id.token());
    enabled.contains(&id.language).then_some(id)
}

/// Fetch a language from the movie source within the configured budget.
pub async fn fetch_fresh(
    state: &AppState,
    language: &str,
    api_key: &str,
) -> Result<Vec<MovieRecord>, CoreError> {
    let budget = state.config.fetch_timeout();
    match tokio::time::timeout(budget, state.source.fetch_movies(language, api_key)).await {
        Ok(result) => result,
        Err(_) => Err(CoreError::Upstream(format!(
            "fetch exceeded {}s",
            budget.as_secs()
        ))),
    }
}

/// Cache lookup with fetch fallback.
///
/// Fetch failures are logged and produce an empty list. A failed cache
/// write is logged but the freshly fetched records are still served.
pub async fn load_or_fetch(
    state: &AppState,
    id: &CatalogId,
) -> Result<Vec<MovieRecord>, CatalogError> {
    let language = id.language.as_str();
    let token = id.token();

    let cached = state.cache.load(language, token).await?;
    tracing::info!(language, count = cached.len(), "Loaded movies from cache");
    if !cached.is_empty() {
        return Ok(cached);
    }

    tracing::info!(language, "Cache empty, fetching movies");
    let api_key = state.access.api_key(token).ok_or(CatalogError::NoApiKey)?;

    tracing::info!(language, "Starting fetch");
    let fresh = match fetch_fresh(state, language, &api_key).await {
        Ok(fresh) => fresh,
        Err(e) => {
            tracing::error!(language, error = %e, "Failed to fetch movies");
            return Ok(Vec::new());
        }
    };

    if fresh.is_empty() {
        tracing::warn!(language, "Fetch returned no movies");
        return Ok(fresh);
    }

    match state.cache.save(language, &fresh, token).await {
        Ok(()) => tracing::info!(language, count = fresh.len(), "Saved movies to cache"),
        Err(e) => tracing::error!(language, error = %e, "Failed to save movies to cache"),
    }
    Ok(fresh)
}

/// Map records to metas, dropping records without a representation and
/// keeping the survivors in order.
pub fn to_metas(records: &[MovieRecord]) -> Vec<OutputMeta> {
    records.iter().filter_map(to_output_meta).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[test]
    fn id_wins_over_lang_and_path() {
        assert_eq!(
            resolve_identifier(&uri("/catalog/movie/te.json?lang=ta&id=hi")).as_deref(),
            Some("hi")
        );
    }

    #[test]
    fn lang_used_when_id_absent_or_blank() {
        assert_eq!(
            resolve_identifier(&uri("/catalog?id=&lang=ta")).as_deref(),
            Some("ta")
        );
    }

    #[test]
    fn path_segment_after_movie_with_json_stripped() {
        assert_eq!(
            resolve_identifier(&uri("/abc/catalog/movie/ml_tok.json")).as_deref(),
            Some("ml_tok")
        );
        assert_eq!(
            resolve_identifier(&uri("/catalog/movie/kn/skip=20.json")).as_deref(),
            Some("kn")
        );
    }

    #[test]
    fn unresolvable_identifiers() {
        assert_eq!(resolve_identifier(&uri("/catalog")), None);
        assert_eq!(resolve_identifier(&uri("/catalog/movie")), None);
        assert_eq!(resolve_identifier(&uri("/catalog/movie/.json")), None);
        assert_eq!(resolve_identifier(&uri("/catalog/series/hi.json")), None);
    }

    #[test]
    fn query_values_are_percent_decoded() {
        assert_eq!(
            resolve_identifier(&uri("/catalog?id=hi_a%2Bb")).as_deref(),
            Some("hi_a+b")
        );
    }

    #[test]
    fn body_omits_error_when_absent() {
        let json = serde_json::to_value(CatalogBody::empty()).unwrap();
        assert_eq!(json, serde_json::json!({"metas": []}));
        let json = serde_json::to_value(CatalogBody::error(NO_API_KEY)).unwrap();
        assert_eq!(json, serde_json::json!({"metas": [], "error": "no_api_key"}));
    }
}
