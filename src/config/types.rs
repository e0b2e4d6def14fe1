use sendarr_common::QualityProfile;
use serde::{Deserialize, Serialize};

/// Keys making up the persisted settings record, in file order.
pub const SETTINGS_KEYS: [&str; 5] = [
    "managerUrl",
    "apiKey",
    "rootFolder",
    "defaultQualityProfileId",
    "qualityProfiles",
];

/// The settings record as read back from storage.
///
/// Every key may be absent: the store hands back whatever was persisted and
/// leaves completeness checks to the caller.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_folder: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_quality_profile_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_profiles: Option<Vec<StoredProfile>>,
}

impl StoredSettings {
    /// Connection details, if all three are present and non-blank.
    pub fn connection(&self) -> Option<ManagerConnection> {
        let url = non_blank(self.manager_url.as_deref())?;
        let api_key = non_blank(self.api_key.as_deref())?;
        let root_folder = non_blank(self.root_folder.as_deref())?;

        Some(ManagerConnection {
            url: url.to_string(),
            api_key: api_key.to_string(),
            root_folder: root_folder.to_string(),
        })
    }

    /// Profile entries that carry both a name and an id. Malformed entries are
    /// dropped silently.
    pub fn usable_profiles(&self) -> Vec<QualityProfile> {
        self.quality_profiles
            .iter()
            .flatten()
            .filter_map(StoredProfile::to_profile)
            .collect()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A persisted profile entry. Either field may be missing or mistyped in a
/// hand-edited file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "serde_json::Value")]
pub struct StoredProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl StoredProfile {
    pub fn to_profile(&self) -> Option<QualityProfile> {
        let name = self.name.as_deref().filter(|n| !n.is_empty())?;
        Some(QualityProfile::new(name, self.id?))
    }
}

impl From<&QualityProfile> for StoredProfile {
    fn from(profile: &QualityProfile) -> Self {
        Self {
            name: Some(profile.name.clone()),
            id: Some(profile.id),
        }
    }
}

/// Numbers and numeric strings; anything else reads as no id.
fn id_from_value(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(id_from_value))
}

/// Any list element reads as a profile; entries that are not tables come
/// back empty and are dropped by [`StoredSettings::usable_profiles`].
impl From<serde_json::Value> for StoredProfile {
    fn from(value: serde_json::Value) -> Self {
        let name = match value.get("name") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            _ => None,
        };
        let id = value.get("id").and_then(id_from_value);
        Self { name, id }
    }
}

/// A complete, validated settings record. Only ever written whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionConfig {
    /// Manager base URL, without trailing slash.
    pub manager_url: String,
    pub api_key: String,
    pub root_folder: String,
    pub profiles: Vec<QualityProfile>,
    pub default_profile_id: Option<i64>,
}

impl From<&ExtensionConfig> for StoredSettings {
    fn from(config: &ExtensionConfig) -> Self {
        Self {
            manager_url: Some(config.manager_url.clone()),
            api_key: Some(config.api_key.clone()),
            root_folder: Some(config.root_folder.clone()),
            default_quality_profile_id: config.default_profile_id,
            quality_profiles: Some(config.profiles.iter().map(StoredProfile::from).collect()),
        }
    }
}

/// What the manager client needs to reach Radarr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerConnection {
    pub url: String,
    pub api_key: String,
    pub root_folder: String,
}

impl ManagerConnection {
    /// Trim whitespace and trailing slashes from the URL.
    pub fn normalized(mut self) -> Self {
        self.url = normalize_manager_url(&self.url);
        self
    }
}

pub fn normalize_manager_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
