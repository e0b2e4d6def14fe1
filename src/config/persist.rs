//! File-backed settings store using toml_edit to preserve formatting and comments.

use super::{ExtensionConfig, SettingsStore, StoredSettings, SETTINGS_KEYS};
use async_trait::async_trait;
use sendarr_common::{Error, Result};
use std::path::{Path, PathBuf};
use toml_edit::DocumentMut;

const PROFILES_KEY: &str = "qualityProfiles";

/// Settings persisted as a TOML document on disk.
///
/// Only the settings keys are ever rewritten; anything else in the file,
/// comments included, is carried over untouched.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file as text; a missing file reads as empty.
    async fn read(&self) -> Result<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(Error::storage(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn read_document(&self) -> Result<DocumentMut> {
        let content = self.read().await?;
        content.parse().map_err(|e| {
            Error::storage(format!("failed to parse {}: {}", self.path.display(), e))
        })
    }

    async fn write_document(&self, doc: &DocumentMut) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    Error::storage(format!("failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        tokio::fs::write(&self.path, doc.to_string())
            .await
            .map_err(|e| {
                Error::storage(format!("failed to write {}: {}", self.path.display(), e))
            })
    }
}

#[async_trait]
impl SettingsStore for FileStore {
    async fn load(&self) -> Result<StoredSettings> {
        let content = self.read().await?;
        let settings: StoredSettings = toml::from_str(&content).map_err(|e| {
            Error::storage(format!("failed to parse {}: {}", self.path.display(), e))
        })?;

        tracing::debug!(
            path = %self.path.display(),
            profiles = settings.quality_profiles.as_ref().map_or(0, Vec::len),
            "Loaded settings"
        );
        Ok(settings)
    }

    async fn save(&self, config: &ExtensionConfig) -> Result<()> {
        let mut doc = self.read_document().await?;

        // Serialize the record to TOML and splice its keys into the document
        let new_content = toml::to_string_pretty(&StoredSettings::from(config))
            .map_err(|e| Error::storage(format!("failed to serialize settings: {}", e)))?;
        let new_doc: DocumentMut = new_content
            .parse()
            .map_err(|e| Error::storage(format!("failed to parse serialized settings: {}", e)))?;

        for key in SETTINGS_KEYS {
            match new_doc.get(key) {
                Some(item) => doc[key] = item.clone(),
                None => {
                    doc.remove(key);
                }
            }
        }

        self.write_document(&doc).await?;
        tracing::info!(path = %self.path.display(), "Saved settings");
        Ok(())
    }

    async fn ensure_defaults(&self) -> Result<bool> {
        let mut doc = self.read_document().await?;

        let has_list = doc
            .get(PROFILES_KEY)
            .map(|item| item.is_array() || item.is_array_of_tables())
            .unwrap_or(false);
        if has_list {
            return Ok(false);
        }

        doc[PROFILES_KEY] = toml_edit::value(toml_edit::Array::new());
        self.write_document(&doc).await?;
        tracing::info!(path = %self.path.display(), "Initialized empty profile list");
        Ok(true)
    }
}
