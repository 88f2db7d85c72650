//! Addon routes: manifest, catalog, refresh.

use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;

use crate::catalog::catalog_panic_response;
use crate::handlers::{catalog, manifest, refresh};
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// GET      /manifest.json                   -> manifest
/// GET      /{config}/manifest.json          -> configured_manifest
/// GET      /catalog, /catalog/              -> catalog (id via query)
/// GET      /catalog/{*rest}                 -> catalog (id via path)
/// GET      /{config}/catalog, .../catalog/  -> catalog (id via query)
/// GET      /{config}/catalog/{*rest}        -> catalog (id via path)
/// GET|POST /refresh                         -> refresh
/// ```
pub fn router() -> Router<AppState> {
    let catalog_routes = Router::new()
        .route("/catalog", get(catalog::get))
        .route("/catalog/", get(catalog::get))
        .route("/catalog/{*rest}", get(catalog::get))
        .route("/{config}/catalog", get(catalog::get))
        .route("/{config}/catalog/", get(catalog::get))
        .route("/{config}/catalog/{*rest}", get(catalog::get))
        .layer(CatchPanicLayer::custom(catalog_panic_response));

    Router::new()
        .route("/manifest.json", get(manifest::manifest))
        .route("/{config}/manifest.json", get(manifest::configured_manifest))
        .route("/refresh", get(refresh::refresh).post(refresh::refresh))
        .merge(catalog_routes)
}
