//! IMDb movie page extraction.
//!
//! [`extract`] is a pure function of the HTML document and its URL: it gates
//! on the URL path, rejects TV content, then reads the title, year and IMDb id.

mod selectors;

use reqwest::Url;
use scraper::Html;
use sendarr_common::{Error, MovieDetails, Result};

pub use selectors::{find_title, find_year, is_tv_content};

pub const NOT_A_MOVIE_PAGE: &str = "Not on an IMDB movie page.";
pub const TV_CONTENT: &str = "Detected TV content. This extension only supports movies.";
pub const DETAILS_UNREADABLE: &str = "Could not read movie details from the page.";

/// Extract movie details from raw HTML served at `url`.
pub fn extract(html: &str, url: &str) -> Result<MovieDetails> {
    let document = Html::parse_document(html);
    extract_document(&document, url)
}

/// Extract movie details from an already-parsed document.
pub fn extract_document(document: &Html, url: &str) -> Result<MovieDetails> {
    let path = url_path(url);
    if !selectors::MOVIE_PATH.is_match(&path) {
        tracing::debug!(%url, "URL is not a title page");
        return Err(Error::page_mismatch(NOT_A_MOVIE_PAGE));
    }

    if is_tv_content(document) {
        tracing::debug!(%url, "Title page is TV content");
        return Err(Error::page_mismatch(TV_CONTENT));
    }

    let title = find_title(document);
    let year = find_year(document);
    let imdb_id = imdb_id_from_url(url);

    match (title, imdb_id) {
        (Some(title), Some(imdb_id)) => {
            tracing::debug!(%title, ?year, %imdb_id, "Extracted movie");
            Ok(MovieDetails::new(title, year, imdb_id))
        }
        _ => Err(Error::extraction(DETAILS_UNREADABLE)),
    }
}

/// The first `tt<digits>` id following `/title/` anywhere in the URL.
pub fn imdb_id_from_url(url: &str) -> Option<String> {
    selectors::IMDB_ID
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Path component of `url`. Strings that do not parse as absolute URLs are
/// treated as a bare path.
fn url_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    }
}
