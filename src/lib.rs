//! Sendarr - send IMDb movie pages to Radarr
//!
//! This library crate exposes the popup workflow and its collaborators for
//! the CLI and for integration testing.

pub mod arr;
pub mod browser;
pub mod config;
pub mod notifications;
pub mod options;
pub mod popup;
pub mod scrape;
