//! Addon manifest served to the aggregator at install time.

use axum::extract::{Path, State};
use axum::Json;
use cinelang_core::catalog_id::CatalogId;
use cinelang_core::language::display_name;
use serde::Serialize;

use crate::state::AppState;

pub const MANIFEST_ID: &str = "org.cinelang.catalog";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: &'static str,
    pub version: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub resources: Vec<&'static str>,
    pub types: Vec<&'static str>,
    pub id_prefixes: Vec<&'static str>,
    pub catalogs: Vec<ManifestCatalog>,
    pub behavior_hints: BehaviorHints,
}

#[derive(Debug, Serialize)]
pub struct ManifestCatalog {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorHints {
    pub configurable: bool,
}

/// GET /manifest.json
pub async fn manifest(State(state): State<AppState>) -> Json<Manifest> {
    Json(build_manifest(&state, None))
}

/// GET /{config}/manifest.json
///
/// `config` is an addon token; its catalog ids embed the token so later
/// catalog requests carry it.
pub async fn configured_manifest(
    State(state): State<AppState>,
    Path(config): Path<String>,
) -> Json<Manifest> {
    Json(build_manifest(&state, Some(config.as_str())))
}

fn build_manifest(state: &AppState, token: Option<&str>) -> Manifest {
    let catalogs = state
        .access
        .enabled_languages(token)
        .into_iter()
        .map(|language| {
            let name = display_name(&language).unwrap_or(language.as_str());
            let base = CatalogId::manifest_id(&language);
            ManifestCatalog {
                kind: "movie",
                id: match token {
                    Some(t) => format!("{base}_{t}"),
                    None => base,
                },
                name: format!("{name} Movies"),
            }
        })
        .collect();

    Manifest {
        id: MANIFEST_ID,
        version: env!("CARGO_PKG_VERSION"),
        name: "Cinelang",
        description: "Popular movies by original language, from TMDB",
        resources: vec!["catalog"],
        types: vec!["movie"],
        id_prefixes: vec!["tmdb:"],
        catalogs,
        behavior_hints: BehaviorHints { configurable: true },
    }
}
