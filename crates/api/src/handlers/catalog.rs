//! Handler for catalog requests from the aggregator.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::Response;
use cinelang_core::token::log_fingerprint;

use crate::catalog::{
    authorize, catalog_response, load_or_fetch, resolve_identifier, to_metas, CatalogBody,
    CatalogError, MISSING_CATALOG_ID, NO_API_KEY,
};
use crate::state::AppState;

/// GET /catalog, /catalog/movie/{id}.json, /{config}/catalog/movie/{id}.json
///
/// | Status | Body                                          |
/// |--------|-----------------------------------------------|
/// | 400    | `{"metas": [], "error": "missing_catalog_id"}` |
/// | 404    | `{"metas": []}` (language not enabled)        |
/// | 200    | `{"metas": [], "error": "no_api_key"}`         |
/// | 200    | `{"metas": [...]}`                             |
/// | 200    | `{"metas": []}` (any internal failure)        |
pub async fn get(State(state): State<AppState>, uri: Uri) -> Response {
    let Some(identifier) = resolve_identifier(&uri) else {
        tracing::warn!(path = %uri.path(), "Catalog request without catalog id");
        return catalog_response(StatusCode::BAD_REQUEST, CatalogBody::error(MISSING_CATALOG_ID));
    };

    let Some(id) = authorize(&state, &identifier) else {
        return catalog_response(StatusCode::NOT_FOUND, CatalogBody::empty());
    };

    tracing::info!(
        language = %id.language,
        token = %log_fingerprint(id.token()),
        "Catalog requested"
    );

    match load_or_fetch(&state, &id).await {
        Ok(records) => {
            let metas = to_metas(&records);
            tracing::info!(language = %id.language, count = metas.len(), "Returning catalog");
            catalog_response(StatusCode::OK, CatalogBody::metas(metas))
        }
        Err(CatalogError::NoApiKey) => {
            tracing::error!(language = %id.language, "No TMDB API key found");
            catalog_response(StatusCode::OK, CatalogBody::error(NO_API_KEY))
        }
        Err(CatalogError::Core(e)) => {
            tracing::error!(language = %id.language, error = %e, "Catalog error");
            catalog_response(StatusCode::OK, CatalogBody::empty())
        }
    }
}
