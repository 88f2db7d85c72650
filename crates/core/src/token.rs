//! Addon tokens.
//!
//! A token is the user's addon configuration serialized as JSON and encoded
//! with URL-safe base64, so it can travel inside a catalog id and a URL path.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::hashing::sha256_hex;

/// Fingerprint used for cache keys when no token is supplied.
pub const PUBLIC_FINGERPRINT: &str = "public";

/// Decoded addon configuration carried by a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonToken {
    /// The user's own TMDB API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_key: Option<String>,
    /// Languages the user enabled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
}

impl AddonToken {
    pub fn decode(raw: &str) -> Result<Self, CoreError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(raw.trim().trim_end_matches('='))
            .map_err(|e| CoreError::InvalidToken(format!("base64: {e}")))?;
        serde_json::from_slice(&bytes).map_err(|e| CoreError::InvalidToken(format!("json: {e}")))
    }

    pub fn encode(&self) -> Result<String, CoreError> {
        let json = serde_json::to_vec(self)
            .map_err(|e| CoreError::Internal(format!("token serialization: {e}")))?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// The token's TMDB key, if present and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.tmdb_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Stable, non-reversible cache key component for a token.
///
/// Raw tokens carry API keys and must never be written to a cache.
pub fn cache_fingerprint(token: Option<&str>) -> String {
    match token {
        Some(raw) if !raw.is_empty() => sha256_hex(raw.as_bytes()),
        _ => PUBLIC_FINGERPRINT.to_string(),
    }
}

/// Short form of a fingerprint for log lines.
pub fn log_fingerprint(token: Option<&str>) -> String {
    let mut fp = cache_fingerprint(token);
    fp.truncate(8);
    fp
}
