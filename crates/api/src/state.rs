use std::sync::Arc;

use cinelang_core::access::AccessPolicy;
use cinelang_core::cache::CatalogCache;
use cinelang_core::source::MovieSource;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is behind an `Arc` or already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Token -> enabled languages / API key resolution.
    pub access: Arc<AccessPolicy>,
    /// Catalog cache (file or Postgres).
    pub cache: Arc<dyn CatalogCache>,
    /// Remote movie catalogue (TMDB in production).
    pub source: Arc<dyn MovieSource>,
    /// Database pool, present only when the Postgres cache is in use.
    pub pool: Option<cinelang_db::DbPool>,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        cache: Arc<dyn CatalogCache>,
        source: Arc<dyn MovieSource>,
        pool: Option<cinelang_db::DbPool>,
    ) -> Self {
        let access = AccessPolicy::new(
            config.enabled_languages.clone(),
            config.tmdb_api_key.clone(),
        );
        Self {
            config: Arc::new(config),
            access: Arc::new(access),
            cache,
            source,
            pool,
        }
    }
}
