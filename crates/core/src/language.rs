//! Supported catalog languages.
//!
//! Catalogs are keyed by the ISO-639-1 code TMDB uses for
//! `with_original_language`. Only codes listed here can be enabled.

use std::collections::BTreeSet;

use crate::error::CoreError;

/// Set of language codes enabled for a token.
pub type LanguageSet = BTreeSet<String>;

/// A language the addon can serve a catalog for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "hi", name: "Hindi" },
    Language { code: "ta", name: "Tamil" },
    Language { code: "te", name: "Telugu" },
    Language { code: "ml", name: "Malayalam" },
    Language { code: "kn", name: "Kannada" },
    Language { code: "bn", name: "Bengali" },
    Language { code: "mr", name: "Marathi" },
    Language { code: "pa", name: "Punjabi" },
    Language { code: "gu", name: "Gujarati" },
    Language { code: "en", name: "English" },
    Language { code: "es", name: "Spanish" },
    Language { code: "fr", name: "French" },
    Language { code: "de", name: "German" },
    Language { code: "it", name: "Italian" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ko", name: "Korean" },
    Language { code: "zh", name: "Chinese" },
    Language { code: "pt", name: "Portuguese" },
    Language { code: "ru", name: "Russian" },
    Language { code: "tr", name: "Turkish" },
];

/// Default `ENABLED_LANGUAGES` when the variable is unset.
pub const DEFAULT_ENABLED_LANGUAGES: &str = "hi,ta,te,ml,kn";

pub fn is_supported(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|l| l.code == code)
}

pub fn display_name(code: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|l| l.code == code)
        .map(|l| l.name)
}

/// Parse a comma-separated list of language codes.
///
/// Codes are trimmed and lowercased; blanks are skipped. Any code not in
/// [`SUPPORTED_LANGUAGES`] is rejected.
pub fn parse_language_list(raw: &str) -> Result<LanguageSet, CoreError> {
    let mut set = LanguageSet::new();
    for part in raw.split(',') {
        let code = part.trim().to_ascii_lowercase();
        if code.is_empty() {
            continue;
        }
        if !is_supported(&code) {
            return Err(CoreError::Validation(format!(
                "unsupported language code '{code}'"
            )));
        }
        set.insert(code);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn default_languages_are_all_supported() {
        let set = parse_language_list(DEFAULT_ENABLED_LANGUAGES).unwrap();
        assert_eq!(set.len(), 5);
        assert!(set.contains("hi"));
    }

    #[test]
    fn list_is_normalized() {
        let set = parse_language_list(" HI, ta,,te ").unwrap();
        let codes: Vec<_> = set.iter().map(String::as_str).collect();
        assert_eq!(codes, vec!["hi", "ta", "te"]);
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_matches!(parse_language_list("hi,xx"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn display_names_resolve() {
        assert_eq!(display_name("ml"), Some("Malayalam"));
        assert_eq!(display_name("xx"), None);
    }
}
