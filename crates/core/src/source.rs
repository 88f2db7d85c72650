use async_trait::async_trait;

use crate::error::CoreError;
use crate::movie::MovieRecord;

/// A remote catalogue that can list movies for a language.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Fetch the current movie list for `language`, authenticating with
    /// `api_key`.
    async fn fetch_movies(
        &self,
        language: &str,
        api_key: &str,
    ) -> Result<Vec<MovieRecord>, CoreError>;
}
