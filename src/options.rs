//! Settings editor: the line-based profile codec, save validation, and the
//! restore view used to pre-fill the form.

use crate::config::{normalize_manager_url, ExtensionConfig, SettingsStore, StoredSettings};
use sendarr_common::{Error, QualityProfile, Result};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Radarr URL, API key, and root folder are all required.";
pub const UNKNOWN_DEFAULT_MESSAGE: &str =
    "Default quality profile must match one of the listed profiles.";

/// Parse `Name:ID` lines into profiles. Blank lines are skipped; any other
/// malformed line rejects the whole input.
pub fn parse_profiles(raw: &str) -> Result<Vec<QualityProfile>> {
    let mut profiles = Vec::new();

    for line in raw.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let mut segments = line.split(':').map(str::trim);
        let name = segments.next().unwrap_or_default();
        let id = segments.next().unwrap_or_default();
        if name.is_empty() || id.is_empty() {
            return Err(Error::validation(format!(
                "Could not parse \"{}\". Expected format \"Name:ID\".",
                line
            )));
        }

        let id: i64 = id.parse().map_err(|_| {
            Error::validation(format!(
                "Profile ID must be numeric. Problem near \"{}\".",
                line
            ))
        })?;

        profiles.push(QualityProfile::new(name, id));
    }

    Ok(profiles)
}

/// Render profiles back into editable `Name:ID` lines.
pub fn profiles_to_text(profiles: &[QualityProfile]) -> String {
    profiles
        .iter()
        .map(QualityProfile::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Raw input from the settings form.
#[derive(Debug, Clone, Default)]
pub struct SettingsForm {
    pub manager_url: String,
    pub api_key: String,
    pub root_folder: String,
    /// Profile editor contents, one `Name:ID` per line.
    pub profiles_text: String,
    pub default_profile_id: Option<i64>,
}

impl SettingsForm {
    /// Check the form and build the record that would be persisted.
    pub fn validate(&self) -> Result<ExtensionConfig> {
        let manager_url = self.manager_url.trim();
        let api_key = self.api_key.trim();
        let root_folder = self.root_folder.trim();
        let profiles = parse_profiles(&self.profiles_text)?;

        if manager_url.is_empty() || api_key.is_empty() || root_folder.is_empty() {
            return Err(Error::validation(REQUIRED_FIELDS_MESSAGE));
        }

        if let Some(id) = self.default_profile_id {
            if !profiles.iter().any(|p| p.id == id) {
                return Err(Error::validation(UNKNOWN_DEFAULT_MESSAGE));
            }
        }

        Ok(ExtensionConfig {
            manager_url: normalize_manager_url(manager_url),
            api_key: api_key.to_string(),
            root_folder: root_folder.to_string(),
            profiles,
            default_profile_id: self.default_profile_id,
        })
    }

    /// Validate, then write the record. Nothing is written if validation fails.
    pub async fn save<S: SettingsStore + ?Sized>(&self, store: &S) -> Result<ExtensionConfig> {
        let config = self.validate()?;
        store.save(&config).await?;
        tracing::info!(
            profiles = config.profiles.len(),
            default_profile = ?config.default_profile_id,
            "Settings saved"
        );
        Ok(config)
    }
}

/// One entry in the default-profile dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultChoice {
    /// Empty for the "None" entry.
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Build the default-profile dropdown: a leading "None" entry, then one entry
/// per profile with the stored default marked.
pub fn default_choices(profiles: &[QualityProfile], selected: Option<i64>) -> Vec<DefaultChoice> {
    let mut choices = vec![DefaultChoice {
        value: String::new(),
        label: "None".to_string(),
        selected: false,
    }];

    choices.extend(profiles.iter().map(|p| DefaultChoice {
        value: p.id.to_string(),
        label: p.name.clone(),
        selected: selected == Some(p.id),
    }));

    choices
}

/// Form state restored from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsView {
    pub manager_url: String,
    pub api_key: String,
    pub root_folder: String,
    pub profiles_text: String,
    pub default_choices: Vec<DefaultChoice>,
}

impl OptionsView {
    pub fn restore(stored: &StoredSettings) -> Self {
        let profiles = stored.usable_profiles();
        Self {
            manager_url: stored.manager_url.clone().unwrap_or_default(),
            api_key: stored.api_key.clone().unwrap_or_default(),
            root_folder: stored.root_folder.clone().unwrap_or_default(),
            profiles_text: profiles_to_text(&profiles),
            default_choices: default_choices(&profiles, stored.default_quality_profile_id),
        }
    }

    /// Load the record and restore the form from it.
    pub async fn load<S: SettingsStore + ?Sized>(store: &S) -> Result<Self> {
        Ok(Self::restore(&store.load().await?))
    }
}
