//! Sendarr-Common: Shared types, message protocol, and errors.
//!
//! This crate provides functionality used across sendarr:
//!
//! - **Core Types**: quality profiles, scraped movie details, notify requests
//! - **Messages**: the typed request/response protocol spoken between the
//!   popup, the page context, and the background relay
//! - **Error Handling**: the error taxonomy and a result alias
//!
//! # Examples
//!
//! ```
//! use sendarr_common::{Error, ErrorKind, MovieDetails, Result};
//!
//! let movie = MovieDetails::new("Heat", Some("1995".into()), "tt0113277");
//! assert_eq!(movie.imdb_id, "tt0113277");
//!
//! fn example() -> Result<()> {
//!     Err(Error::NoProfiles)
//! }
//! assert_eq!(example().unwrap_err().kind(), ErrorKind::NoProfiles);
//! ```

pub mod error;
pub mod messages;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use messages::{PageResponse, RuntimeMessage};
pub use types::*;
