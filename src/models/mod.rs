use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub mod catalog;

/// Sentinel for optional text fields the model did not provide
pub const UNKNOWN: &str = "Unknown";
/// Sentinel for optional numeric-ish fields the model did not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// A movie as shown on the result card
///
/// Every field is a plain string with a sentinel default, so rendering never
/// branches on field presence. Model output is sloppy about types (years and
/// ratings arrive as strings or numbers interchangeably), so the lenient
/// deserializer below normalizes both to strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default = "not_available", deserialize_with = "string_or_number")]
    pub rating: String,
    #[serde(default = "unknown", alias = "desc")]
    pub description: String,
    #[serde(default = "unknown")]
    pub director: String,
    #[serde(default = "unknown")]
    pub cast: String,
    #[serde(default = "unknown", deserialize_with = "string_or_number")]
    pub runtime: String,
    #[serde(default = "not_available", alias = "boxOffice")]
    pub box_office: String,
    #[serde(default = "unknown", alias = "streamingHint")]
    pub streaming_hint: String,
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// Accepts either a JSON string or a JSON number, normalizing to a string
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

impl MovieRecord {
    /// Builds a record from the mandatory fields, filling the rest with sentinels
    pub fn new(title: &str, year: &str, rating: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            year: year.to_string(),
            rating: rating.to_string(),
            description: description.to_string(),
            director: unknown(),
            cast: unknown(),
            runtime: unknown(),
            box_office: not_available(),
            streaming_hint: unknown(),
        }
    }

    /// Deduplication identity: the case-insensitive (title, year) pair
    ///
    /// Favorites and watch history both key on this, never on a generated id.
    pub fn identity(&self) -> (String, String) {
        (
            self.title.trim().to_lowercase(),
            self.year.trim().to_string(),
        )
    }

    pub fn same_movie(&self, other: &MovieRecord) -> bool {
        self.identity() == other.identity()
    }
}

/// A movie the user explicitly saved
///
/// Carries a synthetic id (title slug + year + creation timestamp) purely for
/// deletion addressing; deduplication still goes through `MovieRecord::identity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteEntry {
    pub id: String,
    pub movie: MovieRecord,
    /// Genre name or mood label the movie was found under
    pub genre_label: String,
    pub added_at: DateTime<Utc>,
}

impl FavoriteEntry {
    pub fn new(movie: MovieRecord, genre_label: &str) -> Self {
        let added_at = Utc::now();
        let id = synthetic_id(&movie, added_at);
        Self {
            id,
            movie,
            genre_label: genre_label.to_string(),
            added_at,
        }
    }
}

/// One line of the watch history, most-recent-first in the collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub movie: MovieRecord,
    pub genre_label: String,
    pub viewed_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(movie: MovieRecord, genre_label: &str) -> Self {
        Self {
            movie,
            genre_label: genre_label.to_string(),
            viewed_at: Utc::now(),
        }
    }
}

fn synthetic_id(movie: &MovieRecord, at: DateTime<Utc>) -> String {
    let slug: String = movie
        .title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("{}-{}-{}", slug, movie.year.trim(), at.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_accepts_string_or_number() {
        let from_string: MovieRecord =
            serde_json::from_str(r#"{"title":"Dune","year":"2021"}"#).unwrap();
        let from_number: MovieRecord =
            serde_json::from_str(r#"{"title":"Dune","year":2021}"#).unwrap();
        assert_eq!(from_string.year, "2021");
        assert_eq!(from_number.year, "2021");
    }

    #[test]
    fn test_rating_accepts_number_and_defaults() {
        let rated: MovieRecord =
            serde_json::from_str(r#"{"title":"Dune","year":2021,"rating":8.1}"#).unwrap();
        assert_eq!(rated.rating, "8.1");

        let unrated: MovieRecord = serde_json::from_str(r#"{"title":"Dune","year":2021}"#).unwrap();
        assert_eq!(unrated.rating, NOT_AVAILABLE);
    }

    #[test]
    fn test_desc_alias_maps_to_description() {
        let movie: MovieRecord =
            serde_json::from_str(r#"{"title":"Dune","year":2021,"desc":"Sand."}"#).unwrap();
        assert_eq!(movie.description, "Sand.");
    }

    #[test]
    fn test_missing_title_is_an_error() {
        let result = serde_json::from_str::<MovieRecord>(r#"{"year":2021}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_year_is_an_error() {
        let result = serde_json::from_str::<MovieRecord>(r#"{"title":"Dune"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_identity_is_case_insensitive() {
        let a = MovieRecord::new("The Shining", "1980", "8.4", "Here's Johnny!");
        let b = MovieRecord::new("the shining", "1980", "N/A", "different desc");
        assert!(a.same_movie(&b));
    }

    #[test]
    fn test_identity_distinguishes_years() {
        let a = MovieRecord::new("Dune", "1984", "6.3", "Lynch.");
        let b = MovieRecord::new("Dune", "2021", "8.0", "Villeneuve.");
        assert!(!a.same_movie(&b));
    }

    #[test]
    fn test_synthetic_id_embeds_title_and_year() {
        let movie = MovieRecord::new("Mad Max: Fury Road", "2015", "8.1", "Pure adrenaline.");
        let entry = FavoriteEntry::new(movie, "Action");
        assert!(entry.id.starts_with("mad-max--fury-road-2015-"));
    }

    #[test]
    fn test_unknown_fields_get_sentinels() {
        let movie: MovieRecord =
            serde_json::from_str(r#"{"title":"Dune","year":"2021"}"#).unwrap();
        assert_eq!(movie.director, UNKNOWN);
        assert_eq!(movie.cast, UNKNOWN);
        assert_eq!(movie.box_office, NOT_AVAILABLE);
        assert_eq!(movie.streaming_hint, UNKNOWN);
    }
}
