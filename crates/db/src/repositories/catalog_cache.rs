//! Repository and [`CatalogCache`] adapter for the `catalog_cache` table.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use cinelang_core::cache::{validate_language, CatalogCache};
use cinelang_core::error::CoreError;
use cinelang_core::movie::MovieRecord;
use cinelang_core::token::cache_fingerprint;
use sqlx::types::Json;

use crate::DbPool;

/// A row of `catalog_cache`.
#[derive(Debug, sqlx::FromRow)]
pub struct CatalogCacheRow {
    pub language: String,
    pub token_fingerprint: String,
    pub records: Json<Vec<MovieRecord>>,
    pub record_count: i32,
    pub fetched_at: DateTime<Utc>,
}

/// Raw queries over `catalog_cache`, keyed by token fingerprint.
pub struct CatalogCacheRepo;

impl CatalogCacheRepo {
    pub async fn find(
        pool: &DbPool,
        language: &str,
        token_fingerprint: &str,
    ) -> Result<Option<CatalogCacheRow>, sqlx::Error> {
        sqlx::query_as::<_, CatalogCacheRow>(
            "SELECT language, token_fingerprint, records, record_count, fetched_at \
             FROM catalog_cache \
             WHERE language = $1 AND token_fingerprint = $2",
        )
        .bind(language)
        .bind(token_fingerprint)
        .fetch_optional(pool)
        .await
    }

    /// Insert or replace the records for a key, stamping `fetched_at = now()`.
    pub async fn upsert(
        pool: &DbPool,
        language: &str,
        token_fingerprint: &str,
        records: &[MovieRecord],
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO catalog_cache (language, token_fingerprint, records, record_count, fetched_at) \
             VALUES ($1, $2, $3, $4, now()) \
             ON CONFLICT (language, token_fingerprint) DO UPDATE \
             SET records = EXCLUDED.records, \
                 record_count = EXCLUDED.record_count, \
                 fetched_at = EXCLUDED.fetched_at",
        )
        .bind(language)
        .bind(token_fingerprint)
        .bind(Json(records))
        .bind(records.len() as i32)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete entries fetched before `cutoff`. Returns the number removed.
    pub async fn delete_older_than(
        pool: &DbPool,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM catalog_cache WHERE fetched_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// [`CatalogCache`] backed by Postgres.
#[derive(Debug, Clone)]
pub struct PgCatalogCache {
    pool: DbPool,
    ttl: Option<Duration>,
}

impl PgCatalogCache {
    pub fn new(pool: DbPool, ttl: Option<Duration>) -> Self {
        Self { pool, ttl }
    }
}

#[async_trait]
impl CatalogCache for PgCatalogCache {
    async fn load(
        &self,
        language: &str,
        token: Option<&str>,
    ) -> Result<Vec<MovieRecord>, CoreError> {
        validate_language(language)?;
        let row = CatalogCacheRepo::find(&self.pool, language, &cache_fingerprint(token))
            .await
            .map_err(|e| CoreError::Cache(e.to_string()))?;

        let Some(row) = row else {
            return Ok(Vec::new());
        };

        if let Some(ttl) = self.ttl {
            if Utc::now() - row.fetched_at >= ttl {
                tracing::debug!(language, fetched_at = %row.fetched_at, "Cache row expired");
                return Ok(Vec::new());
            }
        }

        Ok(row.records.0)
    }

    async fn save(
        &self,
        language: &str,
        records: &[MovieRecord],
        token: Option<&str>,
    ) -> Result<(), CoreError> {
        validate_language(language)?;
        CatalogCacheRepo::upsert(&self.pool, language, &cache_fingerprint(token), records)
            .await
            .map_err(|e| CoreError::Cache(e.to_string()))
    }
}
