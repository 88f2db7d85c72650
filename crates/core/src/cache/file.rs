//! On-disk catalog cache: one JSON file per `(language, token)` key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use super::{validate_language, CacheEntry, CatalogCache};
use crate::error::CoreError;
use crate::movie::MovieRecord;
use crate::token::cache_fingerprint;

/// Cache rooted at a directory, laid out as `<dir>/<language>/<fingerprint>.json`.
#[derive(Debug)]
pub struct FileCache {
    dir: PathBuf,
    ttl: Option<Duration>,
    write_seq: AtomicU64,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Option<Duration>) -> Self {
        Self {
            dir: dir.into(),
            ttl,
            write_seq: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, language: &str, token: Option<&str>) -> Result<PathBuf, CoreError> {
        validate_language(language)?;
        Ok(self
            .dir
            .join(language)
            .join(format!("{}.json", cache_fingerprint(token))))
    }
}

#[async_trait]
impl CatalogCache for FileCache {
    async fn load(
        &self,
        language: &str,
        token: Option<&str>,
    ) -> Result<Vec<MovieRecord>, CoreError> {
        let path = self.entry_path(language, token)?;

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(CoreError::Cache(format!(
                    "read {}: {e}",
                    path.display()
                )))
            }
        };

        // A corrupt file is treated as a miss so the next fetch overwrites it.
        let entry: CacheEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt cache file");
                return Ok(Vec::new());
            }
        };

        if !entry.is_fresh(self.ttl, Utc::now()) {
            tracing::debug!(language, fetched_at = %entry.fetched_at, "Cache entry expired");
            return Ok(Vec::new());
        }

        Ok(entry.records)
    }

    async fn save(
        &self,
        language: &str,
        records: &[MovieRecord],
        token: Option<&str>,
    ) -> Result<(), CoreError> {
        let path = self.entry_path(language, token)?;
        let parent = path
            .parent()
            .ok_or_else(|| CoreError::Internal("cache path has no parent".into()))?;

        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CoreError::Cache(format!("create {}: {e}", parent.display())))?;

        let body = serde_json::to_vec(&CacheEntry::new(language, records))
            .map_err(|e| CoreError::Internal(format!("cache serialization: {e}")))?;

        // Write-then-rename so readers never observe a partial file.
        let seq = self.write_seq.fetch_add(1, Ordering::Relaxed);
        let tmp = path.with_extension(format!("json.{}.{seq}.tmp", std::process::id()));
        tokio::fs::write(&tmp, &body)
            .await
            .map_err(|e| CoreError::Cache(format!("write {}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| CoreError::Cache(format!("rename {}: {e}", path.display())))?;

        tracing::debug!(language, count = records.len(), "Cache entry written");
        Ok(())
    }
}
