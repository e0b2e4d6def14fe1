//! Selector tables and the strategies that walk them.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

pub(crate) static MOVIE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/title/tt\d+").unwrap());

pub(crate) static IMDB_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/title/(tt\d+)").unwrap());

static TV_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(TV Series|TV Episode|TV Mini Series|TV Special)").unwrap()
});

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

/// Title strategies, current markup first, legacy fallbacks after.
static TITLE_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [
        r#"h1[data-testid="hero-title-block__title"]"#,
        // legacy hashed class name
        ".sc-b73cd867-0.eKrKux",
        "section h1",
    ]
    .iter()
    .map(|s| Selector::parse(s).unwrap())
    .collect()
});

static YEAR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[data-testid="hero-title-block__metadata"] li:first-child a"#).unwrap()
});

static BADGE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[data-testid="hero-title-block__metadata"] li span"#).unwrap()
});

/// Concatenated descendant text, trimmed.
fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// First match's trimmed text, if non-empty.
fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(text_of)
        .filter(|t| !t.is_empty())
}

/// Walk the title strategies in order; the first non-empty text wins.
pub fn find_title(document: &Html) -> Option<String> {
    TITLE_SELECTORS
        .iter()
        .find_map(|selector| first_text(document, selector))
}

/// First four-digit run in the first metadata entry's link.
pub fn find_year(document: &Html) -> Option<String> {
    let text = first_text(document, &YEAR_SELECTOR)?;
    YEAR.find(&text).map(|m| m.as_str().to_string())
}

/// Whether the metadata badge marks this title as TV content.
pub fn is_tv_content(document: &Html) -> bool {
    document
        .select(&BADGE_SELECTOR)
        .next()
        .map(|badge| TV_LABEL.is_match(&badge.text().collect::<String>()))
        .unwrap_or(false)
}
