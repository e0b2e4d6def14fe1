use super::{Notification, Notifier};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

const NOTIFY_SEND: &str = "notify-send";

/// Shows notifications through `notify-send`, falling back to the log when the
/// tool is not installed.
#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier {
    program: Option<PathBuf>,
    icon_dir: Option<PathBuf>,
}

impl DesktopNotifier {
    /// Locate `notify-send` on `PATH`.
    pub fn discover() -> Self {
        let program = which::which(NOTIFY_SEND).ok();
        if program.is_none() {
            tracing::debug!("{} not found, notifications will be logged", NOTIFY_SEND);
        }
        Self {
            program,
            icon_dir: None,
        }
    }

    /// Use an explicit notifier program.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
            icon_dir: None,
        }
    }

    /// Resolve icon paths relative to `dir`.
    pub fn icon_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.icon_dir = Some(dir.into());
        self
    }

    pub fn is_available(&self) -> bool {
        self.program.is_some()
    }

    fn icon_path(&self, icon: &str) -> PathBuf {
        match &self.icon_dir {
            Some(dir) => dir.join(icon),
            None => Path::new(icon).to_path_buf(),
        }
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn show(&self, notification: &Notification) -> Result<()> {
        let Some(program) = &self.program else {
            return LogNotifier.show(notification).await;
        };

        let urgency = if notification.is_error {
            "critical"
        } else {
            "normal"
        };

        let status = tokio::process::Command::new(program)
            .arg("--app-name=sendarr")
            .arg(format!("--urgency={}", urgency))
            .arg(format!("--icon={}", self.icon_path(notification.icon).display()))
            .arg(&notification.title)
            .arg(&notification.message)
            .status()
            .await
            .with_context(|| format!("Failed to run {}", program.display()))?;

        if !status.success() {
            anyhow::bail!("{} exited with {}", program.display(), status);
        }
        Ok(())
    }
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn show(&self, notification: &Notification) -> Result<()> {
        if notification.is_error {
            tracing::warn!(title = %notification.title, "{}", notification.message);
        } else {
            tracing::info!(title = %notification.title, "{}", notification.message);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(is_error: bool) -> Notification {
        Notification {
            title: "Radarr".into(),
            message: "Heat added successfully.".into(),
            icon: super::super::ICON,
            is_error,
        }
    }

    #[test]
    fn icon_paths_resolve_against_dir() {
        let notifier = DesktopNotifier::default().icon_dir("/usr/share/sendarr");
        assert_eq!(
            notifier.icon_path("icons/icon48.png"),
            PathBuf::from("/usr/share/sendarr/icons/icon48.png")
        );
        assert_eq!(
            DesktopNotifier::default().icon_path("icons/icon48.png"),
            PathBuf::from("icons/icon48.png")
        );
    }

    #[tokio::test]
    async fn without_program_falls_back_to_log() {
        let notifier = DesktopNotifier::default();
        assert!(!notifier.is_available());
        notifier.show(&notification(true)).await.unwrap();
    }

    #[tokio::test]
    async fn missing_program_is_an_error() {
        let notifier = DesktopNotifier::with_program("/nonexistent/notify-send");
        assert!(notifier.show(&notification(false)).await.is_err());
    }
}
