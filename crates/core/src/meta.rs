//! Mapping from [`MovieRecord`] to the aggregator's meta preview shape.

use serde::Serialize;

use crate::movie::MovieRecord;

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// TMDB movie genre ids and their names.
const MOVIE_GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

/// One entry of a catalog response's `metas` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputMeta {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub poster: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
}

pub fn genre_name(id: u32) -> Option<&'static str> {
    MOVIE_GENRES
        .iter()
        .find(|(gid, _)| *gid == id)
        .map(|(_, name)| *name)
}

/// Map a record to its output representation.
///
/// Records without a title or a poster have no representation and are
/// dropped from catalogs.
pub fn to_output_meta(record: &MovieRecord) -> Option<OutputMeta> {
    let name = record.title.trim();
    if name.is_empty() {
        return None;
    }
    let poster_path = record.poster_path.as_deref().filter(|p| !p.is_empty())?;

    Some(OutputMeta {
        id: format!("tmdb:{}", record.id),
        kind: "movie",
        name: name.to_string(),
        poster: format!("{IMAGE_BASE}/w500{poster_path}"),
        background: record
            .backdrop_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{IMAGE_BASE}/original{p}")),
        description: record
            .overview
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string),
        release_info: record.release_year().map(str::to_string),
        imdb_rating: record
            .vote_average
            .filter(|v| *v > 0.0)
            .map(|v| format!("{v:.1}")),
        genres: record
            .genre_ids
            .iter()
            .filter_map(|id| genre_name(*id))
            .map(str::to_string)
            .collect(),
    })
}
