//! Cross-context message protocol.
//!
//! Messages are JSON objects tagged by a `type` field. The popup sends
//! [`RuntimeMessage::GetImdbMovie`] to the page context and receives a
//! [`PageResponse`]; anything may send [`RuntimeMessage::RadarrNotify`] to the
//! background relay, which never answers.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::{MovieDetails, NotifyRequest};

/// Reason reported when a page response carries neither a movie nor a reason.
pub const DEFAULT_FAILURE_REASON: &str = "Unable to read movie details.";

/// A message travelling between extension contexts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RuntimeMessage {
    /// Ask the page context to scrape the current document.
    #[serde(rename = "GET_IMDB_MOVIE")]
    GetImdbMovie,

    /// Ask the background relay to show a notification.
    #[serde(rename = "RADARR_NOTIFY")]
    RadarrNotify(NotifyRequest),

    /// Any message type this build does not understand. Listeners ignore it.
    #[serde(other)]
    Unknown,
}

/// Page context reply to [`RuntimeMessage::GetImdbMovie`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie: Option<MovieDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl PageResponse {
    pub fn found(movie: MovieDetails) -> Self {
        Self {
            success: true,
            movie: Some(movie),
            reason: None,
        }
    }

    pub fn failed<S: Into<String>>(reason: S) -> Self {
        Self {
            success: false,
            movie: None,
            reason: Some(reason.into()),
        }
    }

    /// Collapse the wire shape back into a result.
    ///
    /// A response claiming success without a movie is treated as a failure.
    pub fn into_result(self) -> Result<MovieDetails, String> {
        match (self.success, self.movie) {
            (true, Some(movie)) => Ok(movie),
            _ => Err(self
                .reason
                .unwrap_or_else(|| DEFAULT_FAILURE_REASON.to_string())),
        }
    }
}

impl From<Result<MovieDetails, Error>> for PageResponse {
    fn from(result: Result<MovieDetails, Error>) -> Self {
        match result {
            Ok(movie) => Self::found(movie),
            Err(e) => Self::failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_movie_wire_shape() {
        let value = serde_json::to_value(RuntimeMessage::GetImdbMovie).unwrap();
        assert_eq!(value, json!({"type": "GET_IMDB_MOVIE"}));
    }

    #[test]
    fn notify_wire_shape() {
        let msg: RuntimeMessage = serde_json::from_value(json!({
            "type": "RADARR_NOTIFY",
            "title": "Radarr",
            "message": "Heat added successfully.",
            "isError": false
        }))
        .unwrap();
        assert_eq!(
            msg,
            RuntimeMessage::RadarrNotify(NotifyRequest::success(
                "Radarr",
                "Heat added successfully."
            ))
        );
    }

    #[test]
    fn unknown_type_is_tolerated() {
        let msg: RuntimeMessage =
            serde_json::from_value(json!({"type": "SOMETHING_ELSE", "x": 1})).unwrap();
        assert_eq!(msg, RuntimeMessage::Unknown);
    }

    #[test]
    fn failed_response_omits_movie() {
        let value = serde_json::to_value(PageResponse::failed("nope")).unwrap();
        assert_eq!(value, json!({"success": false, "reason": "nope"}));
    }

    #[test]
    fn success_without_movie_falls_back_to_default_reason() {
        let resp = PageResponse {
            success: true,
            movie: None,
            reason: None,
        };
        assert_eq!(resp.into_result().unwrap_err(), DEFAULT_FAILURE_REASON);
    }

    #[test]
    fn from_error_uses_display() {
        let resp = PageResponse::from(Err(Error::page_mismatch("Not on an IMDB movie page.")));
        assert_eq!(resp.reason.as_deref(), Some("Not on an IMDB movie page."));
        assert!(!resp.success);
    }
}
