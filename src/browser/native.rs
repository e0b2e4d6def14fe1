//! A single-tab browser for running the popup outside a real browser.
//!
//! The "tab" shows one URL. Its document is fetched over HTTP or read from a
//! saved HTML file when a message arrives, then answered by the page handler.

use super::{page, Browser, Tab};
use async_trait::async_trait;
use reqwest::Client;
use sendarr_common::{Error, PageResponse, Result, RuntimeMessage};
use std::path::PathBuf;

const TAB_ID: u32 = 1;

/// Desktop browser user agent; IMDb serves a stripped page to unknown agents.
const PAGE_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Where the tab's document comes from.
#[derive(Debug, Clone)]
pub enum PageSource {
    /// Fetch the tab URL.
    Http,
    /// Read a saved copy of the page.
    File(PathBuf),
    /// Use the given markup.
    Inline(String),
}

#[derive(Debug, Clone)]
pub struct NativeTab {
    url: Option<String>,
    source: PageSource,
    client: Client,
}

impl NativeTab {
    pub fn new(url: Option<String>, source: PageSource) -> Self {
        let client = Client::builder()
            .user_agent(PAGE_USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with user agent: {}", e);
                Client::new()
            });

        Self {
            url,
            source,
            client,
        }
    }

    async fn document(&self, url: &str) -> Result<String> {
        match &self.source {
            PageSource::Inline(html) => Ok(html.clone()),
            PageSource::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                Error::messaging(format!(
                    "Could not establish connection: failed to read {}: {}",
                    path.display(),
                    e
                ))
            }),
            PageSource::Http => {
                tracing::debug!(%url, "Fetching page");
                let response = self
                    .client
                    .get(url)
                    .header("Accept-Language", "en-US,en;q=0.9")
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| {
                        Error::messaging(format!("Could not establish connection: {}", e))
                    })?;

                response.text().await.map_err(|e| {
                    Error::messaging(format!("Could not establish connection: {}", e))
                })
            }
        }
    }
}

#[async_trait]
impl Browser for NativeTab {
    async fn active_tab(&self) -> Result<Option<Tab>> {
        Ok(self.url.as_ref().map(|url| Tab {
            id: TAB_ID,
            url: Some(url.clone()),
        }))
    }

    async fn send_to_tab(&self, tab_id: u32, message: RuntimeMessage) -> Result<PageResponse> {
        let url = match (&self.url, tab_id) {
            (Some(url), TAB_ID) => url,
            _ => {
                return Err(Error::messaging(format!(
                    "Could not establish connection: no tab with id {}",
                    tab_id
                )))
            }
        };

        let html = self.document(url).await?;
        page::handle_message(&message, &html, url).ok_or_else(|| {
            Error::messaging("The message port closed before a response was received.")
        })
    }
}
