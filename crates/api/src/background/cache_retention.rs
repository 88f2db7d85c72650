//! Periodic removal of expired Postgres cache rows.
//!
//! Expired rows already load as empty; this job only reclaims their space.
//! The file cache overwrites entries in place and needs no cleanup.

use std::time::Duration;

use chrono::{DateTime, Utc};
use cinelang_db::{CatalogCacheRepo, DbPool};
use tokio_util::sync::CancellationToken;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// Run the cache retention loop until `cancel` is triggered.
///
/// Deletes rows fetched more than `ttl` ago.
pub async fn run(pool: DbPool, ttl: chrono::Duration, cancel: CancellationToken) {
    tracing::info!(
        ttl_hours = ttl.num_hours(),
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Cache retention job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Cache retention job stopping");
                break;
            }
            _ = interval.tick() => {
                let Some(cutoff) = retention_cutoff(Utc::now(), ttl) else {
                    tracing::warn!(ttl_hours = ttl.num_hours(), "Cache retention: TTL out of range, skipping");
                    continue;
                };
                match CatalogCacheRepo::delete_older_than(&pool, cutoff).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Cache retention: purged expired rows");
                    }
                    Ok(_) => tracing::debug!("Cache retention: no rows to purge"),
                    Err(e) => tracing::error!(error = %e, "Cache retention: cleanup failed"),
                }
            }
        }
    }
}

/// Oldest `fetched_at` that survives a purge at `now`.
fn retention_cutoff(now: DateTime<Utc>, ttl: chrono::Duration) -> Option<DateTime<Utc>> {
    now.checked_sub_signed(ttl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_is_now_minus_ttl() {
        let now = Utc::now();
        assert_eq!(
            retention_cutoff(now, chrono::Duration::hours(24)),
            Some(now - chrono::Duration::hours(24))
        );
    }

    #[test]
    fn cutoff_before_representable_time_is_none() {
        assert_eq!(retention_cutoff(DateTime::<Utc>::MIN_UTC, chrono::Duration::hours(1)), None);
    }
}
