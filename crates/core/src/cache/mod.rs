//! Catalog cache abstraction.
//!
//! A cache stores one ordered list of [`MovieRecord`]s per
//! `(language, token)` key. Tokens are only ever stored as their
//! [`cache_fingerprint`](crate::token::cache_fingerprint).

mod file;

pub use file::FileCache;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::movie::MovieRecord;

#[async_trait]
pub trait CatalogCache: Send + Sync {
    /// Load the cached records for a key. A missing or expired entry is an
    /// empty list, not an error.
    async fn load(
        &self,
        language: &str,
        token: Option<&str>,
    ) -> Result<Vec<MovieRecord>, CoreError>;

    /// Replace the cached records for a key.
    async fn save(
        &self,
        language: &str,
        records: &[MovieRecord],
        token: Option<&str>,
    ) -> Result<(), CoreError>;
}

/// Persisted form of one cache key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub language: String,
    pub fetched_at: DateTime<Utc>,
    pub records: Vec<MovieRecord>,
}

impl CacheEntry {
    pub fn new(language: &str, records: &[MovieRecord]) -> Self {
        Self {
            language: language.to_string(),
            fetched_at: Utc::now(),
            records: records.to_vec(),
        }
    }

    /// Whether the entry is still usable. `None` disables expiry.
    pub fn is_fresh(&self, ttl: Option<Duration>, now: DateTime<Utc>) -> bool {
        match ttl {
            Some(ttl) => now - self.fetched_at < ttl,
            None => true,
        }
    }
}

/// Longest accepted TTL: 100 years.
pub const MAX_TTL_HOURS: u64 = 24 * 365 * 100;

/// Convert a TTL in hours to an expiry window; zero disables expiry.
pub fn ttl_from_hours(hours: u64) -> Result<Option<Duration>, CoreError> {
    if hours == 0 {
        return Ok(None);
    }
    if hours > MAX_TTL_HOURS {
        return Err(CoreError::Validation(format!(
            "cache TTL of {hours} hours exceeds the maximum of {MAX_TTL_HOURS}"
        )));
    }
    i64::try_from(hours)
        .ok()
        .and_then(Duration::try_hours)
        .map(Some)
        .ok_or_else(|| CoreError::Validation(format!("cache TTL of {hours} hours is out of range")))
}

/// Cache keys become path components and SQL values; only ASCII letters
/// and digits are accepted as language codes.
pub fn validate_language(language: &str) -> Result<(), CoreError> {
    if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CoreError::Validation(format!(
            "invalid cache language '{language}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn entry_freshness_respects_ttl() {
        let mut entry = CacheEntry::new("hi", &[]);
        let now = Utc::now();
        entry.fetched_at = now - Duration::hours(5);

        assert!(entry.is_fresh(ttl_from_hours(6).unwrap(), now));
        assert!(!entry.is_fresh(ttl_from_hours(4).unwrap(), now));
        assert!(entry.is_fresh(ttl_from_hours(0).unwrap(), now));
    }

    #[test]
    fn oversized_ttl_is_rejected() {
        assert_eq!(
            ttl_from_hours(MAX_TTL_HOURS).unwrap(),
            Some(Duration::hours(MAX_TTL_HOURS as i64))
        );
        assert_matches!(
            ttl_from_hours(MAX_TTL_HOURS + 1),
            Err(CoreError::Validation(_))
        );
        assert!(ttl_from_hours(u64::MAX).is_err());
    }

    #[test]
    fn language_validation() {
        assert!(validate_language("hi").is_ok());
        assert!(validate_language("").is_err());
        assert!(validate_language("../etc").is_err());
    }
}
