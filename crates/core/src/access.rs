//! Token-based access: which languages a token may browse and which TMDB
//! key serves its catalogs.

use crate::language::{is_supported, LanguageSet};
use crate::token::AddonToken;

/// Server-side defaults applied when a request carries no token, or a token
/// that leaves a setting unspecified.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    pub default_languages: LanguageSet,
    pub default_api_key: Option<String>,
}

impl AccessPolicy {
    pub fn new(default_languages: LanguageSet, default_api_key: Option<String>) -> Self {
        let default_api_key = default_api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Self {
            default_languages,
            default_api_key,
        }
    }

    /// Languages enabled for `token`.
    ///
    /// An undecodable token enables nothing.
    pub fn enabled_languages(&self, token: Option<&str>) -> LanguageSet {
        let Some(raw) = token else {
            return self.default_languages.clone();
        };

        match AddonToken::decode(raw) {
            Ok(decoded) if decoded.languages.is_empty() => self.default_languages.clone(),
            Ok(decoded) => decoded
                .languages
                .iter()
                .map(|l| l.trim().to_ascii_lowercase())
                .filter(|l| is_supported(l))
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "Rejecting undecodable addon token");
                LanguageSet::new()
            }
        }
    }

    /// TMDB key for `token`: the token's own key, falling back to the
    /// server default.
    pub fn api_key(&self, token: Option<&str>) -> Option<String> {
        let own = token
            .and_then(|raw| AddonToken::decode(raw).ok())
            .and_then(|t| t.api_key().map(str::to_string));
        own.or_else(|| self.default_api_key.clone())
    }
}
