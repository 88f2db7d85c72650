use std::path::PathBuf;
use std::time::Duration;

use cinelang_core::cache::ttl_from_hours;
use cinelang_core::language::{parse_language_list, LanguageSet, DEFAULT_ENABLED_LANGUAGES};
use cinelang_tmdb::{TmdbConfig, DEFAULT_BASE_URL, DEFAULT_MAX_PAGES};

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables (or a `.env` file).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// Server-wide TMDB key used when a token carries none.
    pub tmdb_api_key: Option<String>,
    /// Languages enabled for requests without a token.
    pub enabled_languages: LanguageSet,
    /// TMDB API base URL.
    pub tmdb_base_url: String,
    /// Discover pages fetched per language.
    pub tmdb_max_pages: u32,
    /// Budget for one full fetch of a language, in seconds.
    pub fetch_timeout_secs: u64,
    /// Cache entry lifetime; `None` (`CACHE_TTL_HOURS=0`) never expires.
    pub cache_ttl: Option<chrono::Duration>,
    /// Root directory of the file cache.
    pub cache_dir: PathBuf,
    /// When set, the Postgres cache replaces the file cache.
    pub database_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                        |
    /// |----------------------|--------------------------------|
    /// | `HOST`               | `0.0.0.0`                      |
    /// | `PORT`               | `3000`                         |
    /// | `CORS_ORIGINS`       | `*`                            |
    /// | `TMDB_API_KEY`       | --                             |
    /// | `ENABLED_LANGUAGES`  | `hi,ta,te,ml,kn`               |
    /// | `TMDB_BASE_URL`      | `https://api.themoviedb.org/3` |
    /// | `TMDB_MAX_PAGES`     | `5`                            |
    /// | `FETCH_TIMEOUT_SECS` | `25`                           |
    /// | `CACHE_TTL_HOURS`    | `24`                           |
    /// | `CACHE_DIR`          | `./cache`                      |
    /// | `DATABASE_URL`       | --                             |
    ///
    /// # Panics
    ///
    /// Panics on unparsable numbers or unsupported language codes so
    /// misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let tmdb_api_key = non_empty_var("TMDB_API_KEY");

        let enabled_languages = parse_language_list(
            &std::env::var("ENABLED_LANGUAGES").unwrap_or_else(|_| DEFAULT_ENABLED_LANGUAGES.into()),
        )
        .expect("ENABLED_LANGUAGES must list supported language codes");

        let tmdb_base_url =
            std::env::var("TMDB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let tmdb_max_pages: u32 = std::env::var("TMDB_MAX_PAGES")
            .unwrap_or_else(|_| DEFAULT_MAX_PAGES.to_string())
            .parse()
            .expect("TMDB_MAX_PAGES must be a valid u32");

        let fetch_timeout_secs: u64 = std::env::var("FETCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| "25".into())
            .parse()
            .expect("FETCH_TIMEOUT_SECS must be a valid u64");

        let cache_ttl_hours: u64 = std::env::var("CACHE_TTL_HOURS")
            .unwrap_or_else(|_| "24".into())
            .parse()
            .expect("CACHE_TTL_HOURS must be a valid u64");
        let cache_ttl = ttl_from_hours(cache_ttl_hours)
            .expect("CACHE_TTL_HOURS must be at most 876000 (100 years)");

        let cache_dir = PathBuf::from(std::env::var("CACHE_DIR").unwrap_or_else(|_| "./cache".into()));

        let database_url = non_empty_var("DATABASE_URL");

        Self {
            host,
            port,
            cors_origins,
            tmdb_api_key,
            enabled_languages,
            tmdb_base_url,
            tmdb_max_pages,
            fetch_timeout_secs,
            cache_ttl,
            cache_dir,
            database_url,
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// TMDB client settings. Each page request gets the whole fetch budget;
    /// the handler bounds the total separately.
    pub fn tmdb(&self) -> TmdbConfig {
        TmdbConfig {
            base_url: self.tmdb_base_url.clone(),
            max_pages: self.tmdb_max_pages,
            timeout: self.fetch_timeout(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
