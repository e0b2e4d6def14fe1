pub mod desktop;

pub use desktop::{DesktopNotifier, LogNotifier};

use async_trait::async_trait;
use sendarr_common::{NotifyRequest, RuntimeMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const DEFAULT_TITLE: &str = "Radarr";
pub const DEFAULT_ERROR_TITLE: &str = "Radarr Error";
pub const ICON: &str = "icons/icon128.png";
pub const ERROR_ICON: &str = "icons/icon48.png";

/// Channel end used to post messages to the background relay.
pub type MessageSender = mpsc::UnboundedSender<RuntimeMessage>;

/// A fully resolved notification, ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub icon: &'static str,
    pub is_error: bool,
}

impl From<&NotifyRequest> for Notification {
    fn from(request: &NotifyRequest) -> Self {
        let title = request.title.clone().unwrap_or_else(|| {
            if request.is_error {
                DEFAULT_ERROR_TITLE.to_string()
            } else {
                DEFAULT_TITLE.to_string()
            }
        });

        Self {
            title,
            message: request.message.clone().unwrap_or_default(),
            icon: if request.is_error { ERROR_ICON } else { ICON },
            is_error: request.is_error,
        }
    }
}

/// A place notifications can be shown.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn show(&self, notification: &Notification) -> anyhow::Result<()>;
}

/// Stateless listener turning notify messages into notifications.
pub struct NotificationRelay {
    notifier: Arc<dyn Notifier>,
}

impl NotificationRelay {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Handle one runtime message. Returns whether a notification was issued.
    /// This method is fire-and-forget - sink errors are logged but not propagated.
    pub async fn handle(&self, message: &RuntimeMessage) -> bool {
        let RuntimeMessage::RadarrNotify(request) = message else {
            return false;
        };

        let notification = Notification::from(request);
        if let Err(e) = self.notifier.show(&notification).await {
            tracing::warn!(title = %notification.title, "Failed to show notification: {}", e);
        }
        true
    }

    /// Start the process-wide listener. It runs until every sender is dropped.
    pub fn spawn(self) -> (MessageSender, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<RuntimeMessage>();

        let handle = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                self.handle(&message).await;
            }
            tracing::debug!("Notification relay stopped");
        });

        (tx, handle)
    }
}
