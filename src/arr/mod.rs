//! Radarr integration: IMDb lookup followed by movie creation.

pub mod client;
pub mod types;

pub use client::{build_add_request, MovieManager, RadarrClient};
pub use types::{AddMovieRequest, CreatedMovie, LookupMovie, SystemStatus};
