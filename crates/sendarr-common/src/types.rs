//! Core data model: quality profiles, scraped movies, and notify requests.
//!
//! Field names serialize in camelCase to match the stored settings record and
//! the cross-context message shapes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named quality policy, identified by the manager-assigned numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityProfile {
    /// Display name. Non-empty.
    pub name: String,
    /// Manager-side profile id.
    pub id: i64,
}

impl QualityProfile {
    /// Create a new profile mapping.
    pub fn new<S: Into<String>>(name: S, id: i64) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

impl fmt::Display for QualityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.id)
    }
}

/// Movie details scraped from a single page load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    pub title: String,
    /// Four-digit release year, if the page shows one.
    pub year: Option<String>,
    /// External id, e.g. `tt0113277`.
    pub imdb_id: String,
}

impl MovieDetails {
    pub fn new<T: Into<String>, I: Into<String>>(title: T, year: Option<String>, imdb_id: I) -> Self {
        Self {
            title: title.into(),
            year,
            imdb_id: imdb_id.into(),
        }
    }
}

/// Request for a user-visible system notification.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub is_error: bool,
}

impl NotifyRequest {
    /// Success notification with an explicit title.
    pub fn success<T: Into<String>, M: Into<String>>(title: T, message: M) -> Self {
        Self {
            title: Some(title.into()),
            message: Some(message.into()),
            is_error: false,
        }
    }

    /// Error notification with an explicit title.
    pub fn error<T: Into<String>, M: Into<String>>(title: T, message: M) -> Self {
        Self {
            title: Some(title.into()),
            message: Some(message.into()),
            is_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_details_uses_camel_case() {
        let movie = MovieDetails::new("Heat", Some("1995".into()), "tt0113277");
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["imdbId"], "tt0113277");
        assert_eq!(json["year"], "1995");
    }

    #[test]
    fn missing_year_serializes_as_null() {
        let movie = MovieDetails::new("Heat", None, "tt0113277");
        let json = serde_json::to_value(&movie).unwrap();
        assert!(json["year"].is_null());
    }

    #[test]
    fn notify_request_defaults() {
        let req: NotifyRequest = serde_json::from_str(r#"{"isError": true}"#).unwrap();
        assert!(req.is_error);
        assert!(req.title.is_none());
        assert!(req.message.is_none());
    }

    #[test]
    fn profile_display_is_line_format() {
        assert_eq!(QualityProfile::new("HD-1080p", 4).to_string(), "HD-1080p:4");
    }
}
