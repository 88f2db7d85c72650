//! Handler for out-of-band cache repopulation.
//!
//! The catalog handler only fetches when its cache is empty and gives up on
//! the first failure. Operators (or a scheduler) call `/refresh` to fetch a
//! language unconditionally and overwrite its cache entry.

use axum::extract::State;
use axum::http::Uri;
use axum::response::IntoResponse;
use axum::Json;
use cinelang_core::token::log_fingerprint;
use serde::Serialize;

use crate::catalog::{authorize, fetch_fresh, resolve_identifier, MISSING_CATALOG_ID};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Outcome of a refresh.
#[derive(Debug, Serialize)]
pub struct RefreshSummary {
    pub language: String,
    /// Records fetched and written; `0` leaves the previous entry in place.
    pub count: usize,
}

/// GET|POST /refresh?id={catalog id}
pub async fn refresh(State(state): State<AppState>, uri: Uri) -> AppResult<impl IntoResponse> {
    let identifier = resolve_identifier(&uri)
        .ok_or_else(|| AppError::BadRequest(MISSING_CATALOG_ID.to_string()))?;

    let id = authorize(&state, &identifier).ok_or_else(|| {
        AppError::NotFound("catalog language is not enabled for this token".to_string())
    })?;
    let language = id.language.as_str();
    let token = id.token();

    let api_key = state.access.api_key(token).ok_or(AppError::NoApiKey)?;

    tracing::info!(language, token = %log_fingerprint(token), "Refreshing catalog");
    let fresh = fetch_fresh(&state, language, &api_key).await?;

    if fresh.is_empty() {
        tracing::warn!(language, "Refresh fetched no movies, keeping existing cache");
    } else {
        state.cache.save(language, &fresh, token).await?;
        tracing::info!(language, count = fresh.len(), "Refreshed catalog cache");
    }

    Ok(Json(DataResponse {
        data: RefreshSummary {
            language: id.language.clone(),
            count: fresh.len(),
        },
    }))
}
