use serde::{Deserialize, Serialize};

/// Canonical metadata returned by the IMDb lookup endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupMovie {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_slug: Option<String>,
    #[serde(default)]
    pub tmdb_id: Option<i64>,
    #[serde(default)]
    pub year: Option<i64>,
    /// Passed through to the create call untouched.
    #[serde(default)]
    pub images: Option<Vec<serde_json::Value>>,
}

/// Lookup responses are normally a list, but some Radarr builds answer with a
/// single object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LookupResponse {
    Many(Vec<LookupMovie>),
    One(Box<LookupMovie>),
}

impl LookupResponse {
    pub(crate) fn into_first(self) -> Option<LookupMovie> {
        match self {
            LookupResponse::Many(movies) => movies.into_iter().next(),
            LookupResponse::One(movie) => Some(*movie),
        }
    }
}

/// Body of `POST /api/v3/movie`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMovieRequest {
    pub title: String,
    pub quality_profile_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    pub root_folder_path: String,
    pub images: Vec<serde_json::Value>,
    pub monitored: bool,
    pub minimum_availability: String,
    pub add_options: AddOptions,
    pub imdb_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOptions {
    pub search_for_movie: bool,
}

/// Library entry created by Radarr.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedMovie {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_slug: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub tmdb_id: Option<i64>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub monitored: Option<bool>,
    #[serde(default)]
    pub path: Option<String>,
}

/// Subset of `GET /api/v3/system/status`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}
