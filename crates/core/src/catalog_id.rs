//! Catalog identifier parsing.
//!
//! A catalog identifier is `<language>` or `<language>_<token>`, optionally
//! prefixed with [`CATALOG_ID_PREFIX`] (the form advertised in the manifest).
//! The split happens at the first underscore, so tokens may contain `_`.

/// Prefix on catalog ids listed in the addon manifest.
pub const CATALOG_ID_PREFIX: &str = "cinelang-";

/// A parsed catalog identifier: the language and an optional addon token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogId {
    pub language: String,
    pub token: Option<String>,
}

impl CatalogId {
    /// Split an identifier into language and token.
    ///
    /// Never fails. An identifier without a language part yields an empty
    /// language, which no token can enable.
    pub fn parse(identifier: &str) -> Self {
        let trimmed = identifier.trim();
        let body = trimmed.strip_prefix(CATALOG_ID_PREFIX).unwrap_or(trimmed);

        let (language, token) = match body.split_once('_') {
            Some((language, token)) => (language, token),
            None => (body, ""),
        };

        let token = token.trim();
        Self {
            language: language.trim().to_ascii_lowercase(),
            token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Catalog id advertised in the manifest for a language.
    pub fn manifest_id(language: &str) -> String {
        format!("{CATALOG_ID_PREFIX}{language}")
    }
}
