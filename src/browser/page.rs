//! Page-context message handler.

use crate::scrape;
use sendarr_common::{PageResponse, RuntimeMessage};

/// Answer a message on behalf of the page at `url`.
///
/// Only [`RuntimeMessage::GetImdbMovie`] gets a reply; everything else is
/// left for other listeners.
pub fn handle_message(message: &RuntimeMessage, html: &str, url: &str) -> Option<PageResponse> {
    match message {
        RuntimeMessage::GetImdbMovie => Some(PageResponse::from(scrape::extract(html, url))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sendarr_common::NotifyRequest;

    const HTML: &str = r#"<h1 data-testid="hero-title-block__title">Heat</h1>"#;

    #[test]
    fn answers_movie_requests() {
        let resp = handle_message(
            &RuntimeMessage::GetImdbMovie,
            HTML,
            "https://www.imdb.com/title/tt0113277/",
        )
        .unwrap();
        assert!(resp.success);
        assert_eq!(resp.movie.unwrap().title, "Heat");
    }

    #[test]
    fn reports_failure_reason() {
        let resp = handle_message(
            &RuntimeMessage::GetImdbMovie,
            HTML,
            "https://www.imdb.com/name/nm0000199/",
        )
        .unwrap();
        assert!(!resp.success);
        assert_eq!(resp.reason.as_deref(), Some(scrape::NOT_A_MOVIE_PAGE));
    }

    #[test]
    fn ignores_notify_messages() {
        let msg = RuntimeMessage::RadarrNotify(NotifyRequest::default());
        assert!(handle_message(&msg, HTML, "https://www.imdb.com/title/tt1/").is_none());
    }
}
