use super::types::{
    AddMovieRequest, AddOptions, CreatedMovie, LookupMovie, LookupResponse, SystemStatus,
};
use crate::config::ManagerConnection;
use reqwest::Client;
use sendarr_common::{Error, MovieDetails, Result};

const USER_AGENT: &str = concat!("sendarr/", env!("CARGO_PKG_VERSION"));

/// Availability Radarr waits for before searching.
pub const MINIMUM_AVAILABILITY: &str = "released";

/// Something that can add a scraped movie to a movie manager.
#[async_trait::async_trait]
pub trait MovieManager: Send + Sync {
    /// Resolve the movie's IMDb id, then create a monitored library entry.
    async fn add_movie(
        &self,
        connection: &ManagerConnection,
        movie: &MovieDetails,
        profile_id: i64,
    ) -> Result<CreatedMovie>;
}

/// Radarr v3 API client.
///
/// Connection details are passed per call so one client can serve whatever
/// settings are current when the user hits send.
#[derive(Debug, Clone)]
pub struct RadarrClient {
    client: Client,
}

impl Default for RadarrClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RadarrClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with user agent: {}", e);
                Client::new()
            });

        Self { client }
    }

    fn url(connection: &ManagerConnection, path: &str) -> String {
        format!("{}/api/v3{}", connection.url, path)
    }

    /// `GET /movie/lookup/imdb`, returning the first match.
    pub async fn lookup_imdb(
        &self,
        connection: &ManagerConnection,
        imdb_id: &str,
    ) -> Result<LookupMovie> {
        let response = self
            .client
            .get(Self::url(connection, "/movie/lookup/imdb"))
            .query(&[("imdbId", imdb_id)])
            .header("X-Api-Key", &connection.api_key)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%imdb_id, status = status.as_u16(), "Radarr lookup failed");
            return Err(Error::LookupFailed {
                status: status.as_u16(),
            });
        }

        // A `null` body means no match, same as an empty list
        let body: Option<LookupResponse> = response
            .json()
            .await
            .map_err(|e| Error::network(format!("Unreadable Radarr lookup response: {}", e)))?;

        body.and_then(LookupResponse::into_first).ok_or(Error::NoMovieData)
    }

    /// `POST /movie`.
    pub async fn create(
        &self,
        connection: &ManagerConnection,
        request: &AddMovieRequest,
    ) -> Result<CreatedMovie> {
        let response = self
            .client
            .post(Self::url(connection, "/movie"))
            .header("X-Api-Key", &connection.api_key)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            tracing::warn!(
                imdb_id = %request.imdb_id,
                status = status.as_u16(),
                "Radarr rejected movie"
            );
            return Err(Error::SubmitFailed {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(CreatedMovie::default());
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::network(format!("Unreadable Radarr create response: {}", e)))
    }

    /// Check the connection and API key against `GET /system/status`.
    pub async fn test_connection(&self, connection: &ManagerConnection) -> Result<SystemStatus> {
        let response = self
            .client
            .get(Self::url(connection, "/system/status"))
            .header("X-Api-Key", &connection.api_key)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::network(format!(
                "Radarr status check failed with status {}: {}",
                status.as_u16(),
                body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::network(format!("Unreadable Radarr status response: {}", e)))
    }
}

#[async_trait::async_trait]
impl MovieManager for RadarrClient {
    async fn add_movie(
        &self,
        connection: &ManagerConnection,
        movie: &MovieDetails,
        profile_id: i64,
    ) -> Result<CreatedMovie> {
        let lookup = self.lookup_imdb(connection, &movie.imdb_id).await?;
        let request = build_add_request(lookup, movie, profile_id, &connection.root_folder);

        tracing::info!(
            title = %request.title,
            imdb_id = %request.imdb_id,
            quality_profile_id = profile_id,
            "Adding movie to Radarr"
        );
        self.create(connection, &request).await
    }
}

/// Combine lookup metadata with the scraped movie and the caller's choices.
pub fn build_add_request(
    lookup: LookupMovie,
    movie: &MovieDetails,
    profile_id: i64,
    root_folder: &str,
) -> AddMovieRequest {
    let year = match lookup.year {
        Some(year) => Some(year),
        None => movie.year.as_deref().and_then(|y| y.trim().parse().ok()),
    }
    .filter(|year| *year != 0);

    AddMovieRequest {
        title: lookup.title.unwrap_or_else(|| movie.title.clone()),
        quality_profile_id: profile_id,
        title_slug: lookup.title_slug,
        tmdb_id: lookup.tmdb_id,
        year,
        root_folder_path: root_folder.to_string(),
        images: lookup.images.unwrap_or_default(),
        monitored: true,
        minimum_availability: MINIMUM_AVAILABILITY.to_string(),
        add_options: AddOptions {
            search_for_movie: true,
        },
        imdb_id: movie.imdb_id.clone(),
    }
}

fn transport_error(e: reqwest::Error) -> Error {
    Error::network(format!("Failed to reach Radarr: {}", e))
}
