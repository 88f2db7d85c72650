use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use cinelang_core::cache::{CatalogCache, FileCache};
use cinelang_db::PgCatalogCache;
use cinelang_tmdb::TmdbClient;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinelang_api::background::cache_retention;
use cinelang_api::config::ServerConfig;
use cinelang_api::router::build_app_router;
use cinelang_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinelang_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        languages = ?config.enabled_languages,
        server_key = config.tmdb_api_key.is_some(),
        "Loaded server configuration"
    );

    let ttl = config.cache_ttl;
    let retention_cancel = CancellationToken::new();
    let mut retention_handle = None;

    // --- Cache backend ---
    let (cache, pool) = match &config.database_url {
        Some(database_url) => {
            let pool = cinelang_db::create_pool(database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            cinelang_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            if let Some(ttl) = ttl {
                retention_handle = Some(tokio::spawn(cache_retention::run(
                    pool.clone(),
                    ttl,
                    retention_cancel.clone(),
                )));
            }

            let cache: Arc<dyn CatalogCache> = Arc::new(PgCatalogCache::new(pool.clone(), ttl));
            (cache, Some(pool))
        }
        None => {
            tracing::info!(dir = %config.cache_dir.display(), "Using file cache");
            let cache: Arc<dyn CatalogCache> =
                Arc::new(FileCache::new(config.cache_dir.clone(), ttl));
            (cache, None)
        }
    };

    // --- Movie source ---
    let tmdb = TmdbClient::new(config.tmdb()).expect("Failed to build TMDB HTTP client");

    // --- Router ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let state = AppState::new(config, cache, Arc::new(tmdb), pool);
    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    retention_cancel.cancel();
    if let Some(handle) = retention_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        tracing::info!("Cache retention job stopped");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
