//! Shared test harness for integration tests.
//!
//! Provides [`Harness`] which starts a mock Radarr server, an in-memory
//! settings store pointing at it, and a notification channel the tests can
//! drain. [`RecordingView`] captures everything the popup renders.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sendarr::arr::RadarrClient;
use sendarr::browser::{Browser, NativeTab, PageSource, Tab};
use sendarr::config::{MemoryStore, StoredProfile, StoredSettings};
use sendarr::popup::{Popup, PopupView, ProfileOption, StatusKind};
use sendarr_common::{Error, MovieDetails, NotifyRequest, PageResponse, RuntimeMessage};

pub const API_KEY: &str = "test-key";
pub const HEAT_URL: &str = "https://www.imdb.com/title/tt0113277/";
pub const HEAT_ID: &str = "tt0113277";

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/pages")
        .join(name)
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture exists")
}

/// Complete settings pointing at `url`, with HD (4) as the default.
pub fn settings(url: &str) -> StoredSettings {
    StoredSettings {
        manager_url: Some(format!("{url}/")),
        api_key: Some(API_KEY.into()),
        root_folder: Some("/movies".into()),
        default_quality_profile_id: Some(4),
        quality_profiles: Some(vec![
            StoredProfile {
                name: Some("Any".into()),
                id: Some(1),
            },
            StoredProfile {
                name: Some("HD-1080p".into()),
                id: Some(4),
            },
        ]),
    }
}

/// Popup view that records every call.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub messages: Vec<(String, bool)>,
    pub statuses: Vec<(String, StatusKind)>,
    pub movie: Option<MovieDetails>,
    pub profiles: Vec<ProfileOption>,
    pub send_toggles: Vec<bool>,
}

impl RecordingView {
    pub fn last_message(&self) -> Option<&(String, bool)> {
        self.messages.last()
    }

    pub fn last_status(&self) -> Option<&(String, StatusKind)> {
        self.statuses.last()
    }

    pub fn send_enabled(&self) -> bool {
        self.send_toggles.last().copied().unwrap_or(false)
    }
}

impl PopupView for RecordingView {
    fn set_message(&mut self, text: &str, is_error: bool) {
        self.messages.push((text.to_string(), is_error));
    }

    fn set_status(&mut self, text: &str, kind: StatusKind) {
        self.statuses.push((text.to_string(), kind));
    }

    fn show_movie(&mut self, movie: &MovieDetails) {
        self.movie = Some(movie.clone());
    }

    fn set_profiles(&mut self, options: &[ProfileOption]) {
        self.profiles = options.to_vec();
    }

    fn set_send_enabled(&mut self, enabled: bool) {
        self.send_toggles.push(enabled);
    }
}

/// Browser whose page never answers.
pub struct UnreachableTab;

#[async_trait]
impl Browser for UnreachableTab {
    async fn active_tab(&self) -> sendarr_common::Result<Option<Tab>> {
        Ok(Some(Tab {
            id: 3,
            url: Some(HEAT_URL.into()),
        }))
    }

    async fn send_to_tab(
        &self,
        _tab_id: u32,
        _message: RuntimeMessage,
    ) -> sendarr_common::Result<PageResponse> {
        Err(Error::messaging(
            "Could not establish connection. Receiving end does not exist.",
        ))
    }
}

pub fn heat_tab() -> Arc<dyn Browser> {
    Arc::new(NativeTab::new(
        Some(HEAT_URL.into()),
        PageSource::Inline(fixture("heat.html")),
    ))
}

pub fn tab_with(url: &str, html: &str) -> Arc<dyn Browser> {
    Arc::new(NativeTab::new(
        Some(url.into()),
        PageSource::Inline(html.into()),
    ))
}

pub struct Harness {
    pub server: MockServer,
    pub store: Arc<MemoryStore>,
    notify_tx: mpsc::UnboundedSender<RuntimeMessage>,
    notify_rx: mpsc::UnboundedReceiver<RuntimeMessage>,
}

impl Harness {
    /// Mock server plus settings pointing at it.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::new(settings(&server.uri())));
        Self::with_store(server, store)
    }

    pub fn with_store(server: MockServer, store: Arc<MemoryStore>) -> Self {
        let (notify_tx, notify_rx) = mpsc::unbounded_channel();
        Self {
            server,
            store,
            notify_tx,
            notify_rx,
        }
    }

    pub fn popup(&self, browser: Arc<dyn Browser>) -> Popup<RecordingView> {
        Popup::new(
            browser,
            self.store.clone(),
            Arc::new(RadarrClient::new()),
            self.notify_tx.clone(),
            RecordingView::default(),
        )
    }

    /// Notify requests posted so far.
    pub fn notifications(&mut self) -> Vec<NotifyRequest> {
        let mut out = Vec::new();
        while let Ok(message) = self.notify_rx.try_recv() {
            if let RuntimeMessage::RadarrNotify(request) = message {
                out.push(request);
            }
        }
        out
    }

    /// Lookup for Heat answering with `body`.
    pub async fn mock_lookup(&self, status: u16, body: serde_json::Value, expect: u64) {
        Mock::given(method("GET"))
            .and(path("/api/v3/movie/lookup/imdb"))
            .and(query_param("imdbId", HEAT_ID))
            .and(header("X-Api-Key", API_KEY))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(expect)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_create(&self, response: ResponseTemplate, expect: u64) {
        Mock::given(method("POST"))
            .and(path("/api/v3/movie"))
            .and(header("X-Api-Key", API_KEY))
            .respond_with(response)
            .expect(expect)
            .mount(&self.server)
            .await;
    }
}

pub fn heat_lookup() -> serde_json::Value {
    json!([{
        "title": "Heat",
        "titleSlug": "heat-949",
        "tmdbId": 949,
        "year": 1995,
        "images": [{"coverType": "poster", "remoteUrl": "https://image.tmdb.org/p.jpg"}]
    }])
}

pub fn heat_created() -> serde_json::Value {
    json!({
        "id": 12,
        "title": "Heat",
        "titleSlug": "heat-949",
        "year": 1995,
        "tmdbId": 949,
        "imdbId": HEAT_ID,
        "monitored": true,
        "path": "/movies/Heat (1995)"
    })
}
