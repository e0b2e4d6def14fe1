//! Popup workflow: check the tab, scrape it, check settings, then submit.
//!
//! Each step of [`Popup::initialise`] either advances the popup or ends it
//! with a message. [`Popup::submit`] may be called repeatedly once the popup
//! is ready; failures leave it ready for another attempt.

use crate::arr::{CreatedMovie, MovieManager};
use crate::browser::Browser;
use crate::config::{ManagerConnection, SettingsStore, StoredSettings};
use crate::notifications::MessageSender;
use regex::Regex;
use sendarr_common::{Error, MovieDetails, NotifyRequest, RuntimeMessage};
use std::sync::{Arc, LazyLock};

static ACTIVE_IMDB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https://www\.imdb\.com/title/tt\d+").unwrap());

pub const CHECKING_TAB: &str = "Checking current tab…";
pub const OPEN_MOVIE_PAGE: &str = "Open an IMDB movie page and try again.";
pub const UNEXPECTED_FAILURE: &str = "Something went wrong. Please refresh the page and try again.";
pub const SELECT_PROFILE: &str = "Select a quality profile first.";
pub const SENDING: &str = "Sending to Radarr…";
pub const ADDED: &str = "Movie successfully added to Radarr.";
pub const NOTIFY_TITLE: &str = "Radarr";
pub const NOTIFY_ERROR_TITLE: &str = "Radarr Error";

/// Whether `url` is a page the popup can work with.
pub fn is_supported_url(url: &str) -> bool {
    ACTIVE_IMDB.is_match(url)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Neutral,
    Success,
    Error,
}

/// One entry in the profile picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOption {
    pub id: i64,
    pub label: String,
    pub selected: bool,
}

/// Where the popup is in its workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Init,
    Extracting,
    ConfigCheck,
    Ready,
    Submitting,
    /// Initialisation ended with a message; only reopening helps.
    Closed,
}

/// Result of one press of the send button.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The popup never became ready.
    NotReady,
    /// No profile is selected; nothing was sent.
    NoSelection,
    Added(CreatedMovie),
    Failed(Error),
}

/// Rendering surface for the popup.
pub trait PopupView: Send {
    /// Main message line. Empty clears it.
    fn set_message(&mut self, text: &str, is_error: bool);
    /// Status line below the send button. Empty hides it.
    fn set_status(&mut self, text: &str, kind: StatusKind);
    fn show_movie(&mut self, movie: &MovieDetails);
    fn set_profiles(&mut self, options: &[ProfileOption]);
    fn set_send_enabled(&mut self, enabled: bool);
}

/// Build picker entries, skipping malformed stored profiles. The configured
/// default is preselected when present, otherwise the first entry.
pub fn profile_options(settings: &StoredSettings) -> Vec<ProfileOption> {
    let profiles = settings.usable_profiles();
    let selected = settings
        .default_quality_profile_id
        .filter(|id| profiles.iter().any(|p| p.id == *id))
        .or_else(|| profiles.first().map(|p| p.id));

    profiles
        .into_iter()
        .map(|p| ProfileOption {
            selected: selected == Some(p.id),
            id: p.id,
            label: p.name,
        })
        .collect()
}

pub struct Popup<V: PopupView> {
    browser: Arc<dyn Browser>,
    store: Arc<dyn SettingsStore>,
    manager: Arc<dyn MovieManager>,
    notify: MessageSender,
    view: V,
    state: PopupState,
    movie: Option<MovieDetails>,
    connection: Option<ManagerConnection>,
    options: Vec<ProfileOption>,
    selected: Option<i64>,
}

impl<V: PopupView> Popup<V> {
    pub fn new(
        browser: Arc<dyn Browser>,
        store: Arc<dyn SettingsStore>,
        manager: Arc<dyn MovieManager>,
        notify: MessageSender,
        view: V,
    ) -> Self {
        Self {
            browser,
            store,
            manager,
            notify,
            view,
            state: PopupState::Init,
            movie: None,
            connection: None,
            options: Vec::new(),
            selected: None,
        }
    }

    pub fn state(&self) -> PopupState {
        self.state
    }

    pub fn movie(&self) -> Option<&MovieDetails> {
        self.movie.as_ref()
    }

    pub fn options(&self) -> &[ProfileOption] {
        &self.options
    }

    pub fn selected_profile(&self) -> Option<i64> {
        self.selected
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Run the activation sequence up to the ready state.
    pub async fn initialise(&mut self) -> PopupState {
        self.state = PopupState::Init;
        self.view.set_message(CHECKING_TAB, false);
        self.view.set_send_enabled(false);

        let tab = match self.browser.active_tab().await {
            Ok(tab) => tab,
            Err(e) => return self.close_unexpected(&e),
        };
        let Some(tab) = tab.filter(|t| t.url.as_deref().is_some_and(is_supported_url)) else {
            return self.close(OPEN_MOVIE_PAGE);
        };

        self.state = PopupState::Extracting;
        let movie = match self
            .browser
            .send_to_tab(tab.id, RuntimeMessage::GetImdbMovie)
            .await
        {
            Ok(response) => match response.into_result() {
                Ok(movie) => movie,
                Err(reason) => return self.close(&reason),
            },
            Err(e) => {
                tracing::warn!(tab_id = tab.id, "Page did not answer: {}", e);
                return self.close(&e.to_string());
            }
        };
        tracing::debug!(title = %movie.title, imdb_id = %movie.imdb_id, "Page extracted");
        self.movie = Some(movie);

        self.state = PopupState::ConfigCheck;
        let settings = match self.store.load().await {
            Ok(settings) => settings,
            Err(e) => return self.close_unexpected(&e),
        };
        let Some(connection) = settings.connection() else {
            return self.close(&Error::ConfigIncomplete.to_string());
        };
        if settings.quality_profiles.as_ref().map_or(true, Vec::is_empty) {
            return self.close(&Error::NoProfiles.to_string());
        }

        self.options = profile_options(&settings);
        self.selected = self.options.iter().find(|o| o.selected).map(|o| o.id);
        self.connection = Some(connection);

        if let Some(movie) = &self.movie {
            self.view.show_movie(movie);
        }
        self.view.set_profiles(&self.options);
        self.view.set_message("", false);
        self.view.set_send_enabled(true);
        self.state = PopupState::Ready;
        self.state
    }

    /// Change the picker selection by id or label. Unknown values clear it.
    pub fn select_profile(&mut self, value: &str) -> bool {
        let value = value.trim();
        self.selected = self
            .options
            .iter()
            .find(|o| o.id.to_string() == value || o.label == value)
            .map(|o| o.id);

        for option in &mut self.options {
            option.selected = Some(option.id) == self.selected;
        }
        self.selected.is_some()
    }

    /// Send the movie to Radarr with the selected profile.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let (Some(movie), Some(connection)) = (self.movie.clone(), self.connection.clone()) else {
            return SubmitOutcome::NotReady;
        };
        if self.state != PopupState::Ready {
            return SubmitOutcome::NotReady;
        }

        let Some(profile_id) = self.selected else {
            self.view.set_status(SELECT_PROFILE, StatusKind::Error);
            return SubmitOutcome::NoSelection;
        };

        self.state = PopupState::Submitting;
        self.view.set_send_enabled(false);
        self.view.set_status(SENDING, StatusKind::Neutral);

        let connection = connection.normalized();
        let outcome = match self
            .manager
            .add_movie(&connection, &movie, profile_id)
            .await
        {
            Ok(created) => {
                tracing::info!(title = %movie.title, id = ?created.id, "Movie added");
                self.view.set_status(ADDED, StatusKind::Success);
                self.notify(NotifyRequest::success(
                    NOTIFY_TITLE,
                    format!("{} added successfully.", movie.title),
                ));
                SubmitOutcome::Added(created)
            }
            Err(e) => {
                tracing::warn!(title = %movie.title, kind = %e.kind(), "Failed to add movie: {}", e);
                let message = e.to_string();
                self.view.set_status(&message, StatusKind::Error);
                self.notify(NotifyRequest::error(NOTIFY_ERROR_TITLE, message));
                SubmitOutcome::Failed(e)
            }
        };

        self.view.set_send_enabled(true);
        self.state = PopupState::Ready;
        outcome
    }

    fn notify(&self, request: NotifyRequest) {
        if self.notify.send(RuntimeMessage::RadarrNotify(request)).is_err() {
            tracing::debug!("Notification relay is not running");
        }
    }

    fn close(&mut self, message: &str) -> PopupState {
        self.view.set_message(message, true);
        self.state = PopupState::Closed;
        self.state
    }

    fn close_unexpected(&mut self, error: &Error) -> PopupState {
        tracing::error!(kind = %error.kind(), "Popup initialisation failed: {}", error);
        self.close(UNEXPECTED_FAILURE)
    }
}
