//! Settings store: persisted manager connection details and profile mappings.

pub mod persist;
mod types;

pub use persist::FileStore;
pub use types::*;

use async_trait::async_trait;
use sendarr_common::{Error, Result};
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Environment variable overriding the default settings file location.
pub const CONFIG_ENV: &str = "SENDARR_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "~/.config/sendarr/settings.toml";

/// Asynchronous key/value persistence for the settings record.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read the whole record. Absent keys come back as `None`.
    async fn load(&self) -> Result<StoredSettings>;

    /// Replace the record with `config`.
    async fn save(&self, config: &ExtensionConfig) -> Result<()>;

    /// Install-time migration: make sure a profile list exists without
    /// touching any other key. Returns whether anything was written.
    async fn ensure_defaults(&self) -> Result<bool>;
}

/// Apply install defaults to an in-memory record.
pub fn apply_install_defaults(record: &mut StoredSettings) -> bool {
    if record.quality_profiles.is_some() {
        return false;
    }
    record.quality_profiles = Some(Vec::new());
    true
}

/// Resolve the settings file: explicit path, then `$SENDARR_CONFIG`, then the
/// per-user default.
pub fn settings_path(custom_path: Option<&std::path::Path>) -> PathBuf {
    if let Some(path) = custom_path {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(shellexpand::tilde(&path).as_ref());
        }
    }

    PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref())
}

/// In-process store, used for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: Mutex<StoredSettings>,
    failure: Mutex<Option<String>>,
    writes: Mutex<usize>,
}

impl MemoryStore {
    pub fn new(record: StoredSettings) -> Self {
        Self {
            record: Mutex::new(record),
            ..Default::default()
        }
    }

    /// Make every subsequent call fail with `message`.
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().await = Some(message.into());
    }

    /// Number of successful writes so far.
    pub async fn write_count(&self) -> usize {
        *self.writes.lock().await
    }

    async fn check(&self) -> Result<()> {
        match self.failure.lock().await.as_ref() {
            Some(message) => Err(Error::storage(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn load(&self) -> Result<StoredSettings> {
        self.check().await?;
        Ok(self.record.lock().await.clone())
    }

    async fn save(&self, config: &ExtensionConfig) -> Result<()> {
        self.check().await?;
        *self.record.lock().await = StoredSettings::from(config);
        *self.writes.lock().await += 1;
        Ok(())
    }

    async fn ensure_defaults(&self) -> Result<bool> {
        self.check().await?;
        let changed = apply_install_defaults(&mut *self.record.lock().await);
        if changed {
            *self.writes.lock().await += 1;
        }
        Ok(changed)
    }
}
