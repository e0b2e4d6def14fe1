//! Error taxonomy shared by every sendarr component.
//!
//! Each variant renders as the single-line message shown to the user, so the
//! popup can display `err.to_string()` without further formatting.

use std::fmt;

/// Broad failure categories, used for logging and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong URL or unsupported content type.
    PageMismatch,
    /// Required fields could not be read from the page.
    ExtractionFailure,
    /// Manager URL, API key, or root folder missing.
    ConfigIncomplete,
    /// No quality profiles configured.
    NoProfiles,
    /// Non-2xx response or transport failure talking to the manager.
    NetworkOrApi,
    /// The settings store failed.
    Storage,
    /// Settings input rejected before any write.
    Validation,
    /// Cross-context message could not be delivered.
    Messaging,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PageMismatch => "page_mismatch",
            Self::ExtractionFailure => "extraction_failure",
            Self::ConfigIncomplete => "config_incomplete",
            Self::NoProfiles => "no_profiles",
            Self::NetworkOrApi => "network_or_api",
            Self::Storage => "storage",
            Self::Validation => "validation",
            Self::Messaging => "messaging",
        };
        f.write_str(name)
    }
}

/// Common error type for sendarr.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document is not a supported movie page.
    #[error("{0}")]
    PageMismatch(String),

    /// The page looked right but its details could not be read.
    #[error("{0}")]
    Extraction(String),

    /// Required connection settings are missing.
    #[error("Set your Radarr URL, API key, and root folder in the settings.")]
    ConfigIncomplete,

    /// The profile list is empty or absent.
    #[error("Add at least one quality profile in the settings.")]
    NoProfiles,

    /// The lookup call returned a non-success status.
    #[error("Radarr lookup failed with status {status}")]
    LookupFailed {
        /// HTTP status code.
        status: u16,
    },

    /// The lookup call succeeded but returned no movies.
    #[error("Radarr did not return any movie data for this IMDB ID.")]
    NoMovieData,

    /// The create call returned a non-success status.
    #[error("Radarr responded with {status}: {body}")]
    SubmitFailed {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// Transport-level HTTP failure or an undecodable response.
    #[error("{0}")]
    Network(String),

    /// The settings store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Settings input was rejected.
    #[error("{0}")]
    Validation(String),

    /// A cross-context message could not be delivered or answered.
    #[error("{0}")]
    Messaging(String),
}

impl Error {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::PageMismatch(_) => ErrorKind::PageMismatch,
            Error::Extraction(_) => ErrorKind::ExtractionFailure,
            Error::ConfigIncomplete => ErrorKind::ConfigIncomplete,
            Error::NoProfiles => ErrorKind::NoProfiles,
            Error::LookupFailed { .. }
            | Error::NoMovieData
            | Error::SubmitFailed { .. }
            | Error::Network(_) => ErrorKind::NetworkOrApi,
            Error::Storage(_) => ErrorKind::Storage,
            Error::Validation(_) => ErrorKind::Validation,
            Error::Messaging(_) => ErrorKind::Messaging,
        }
    }

    /// Create a new PageMismatch error.
    pub fn page_mismatch<S: Into<String>>(msg: S) -> Self {
        Self::PageMismatch(msg.into())
    }

    /// Create a new Extraction error.
    pub fn extraction<S: Into<String>>(msg: S) -> Self {
        Self::Extraction(msg.into())
    }

    /// Create a new Network error.
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create a new Storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new Validation error.
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new Messaging error.
    pub fn messaging<S: Into<String>>(msg: S) -> Self {
        Self::Messaging(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
