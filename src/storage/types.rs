use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::TabGroupError;

/// A named, ordered snapshot of file paths that were open together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabGroup {
    /// Unique name of the group (case-sensitive)
    pub group_name: String,
    /// Absolute file paths in snapshot order; duplicates allowed
    pub files: Vec<String>,
    /// When the group was created
    pub created_at: DateTime<Utc>,
    /// When the group was last created or loaded
    pub last_used: DateTime<Utc>,
    /// Whether this is the group restored on startup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl TabGroup {
    /// Build a fresh record with `created_at == last_used == now`
    pub fn new(group_name: impl Into<String>, files: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            group_name: group_name.into(),
            files,
            created_at: now,
            last_used: now,
            is_default: None,
        }
    }

    /// True if the record carries `isDefault: true`
    pub fn is_default(&self) -> bool {
        self.is_default == Some(true)
    }
}

/// Which backend holds the tab group collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageLocation {
    /// Installation-wide key/value scope
    #[default]
    Global,
    /// Key/value scope private to the current workspace
    Workspace,
    /// `.tabgroups.json` under the first workspace root
    File,
}

impl StorageLocation {
    /// The literal used in persisted settings
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageLocation::Global => "global",
            StorageLocation::Workspace => "workspace",
            StorageLocation::File => "file",
        }
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageLocation {
    type Err = TabGroupError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "global" => Ok(StorageLocation::Global),
            "workspace" => Ok(StorageLocation::Workspace),
            "file" => Ok(StorageLocation::File),
            other => Err(TabGroupError::Config(format!(
                "Invalid storage location: {}. Must be one of: global, workspace, file",
                other
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for StorageLocation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// User-facing settings, persisted as a single record
///
/// Every field has a default, so any stored subset deserializes into a
/// complete value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Save open tabs as "Auto-saved Tabs" on shutdown
    pub auto_save_on_close: bool,
    /// Load the default group on startup
    pub auto_restore_default: bool,
    /// Backend holding the tab group collection
    pub storage_location: StorageLocation,
}

impl Settings {
    /// Overlay a stored record on the defaults, one field at a time
    ///
    /// A missing or invalid field keeps its default without affecting the
    /// other fields.
    pub fn from_stored(value: &Value) -> Self {
        let mut settings = Self::default();
        let Some(fields) = value.as_object() else {
            tracing::warn!("Stored settings are not an object, using defaults");
            return settings;
        };

        if let Some(v) = stored_field(fields, "autoSaveOnClose") {
            settings.auto_save_on_close = v;
        }
        if let Some(v) = stored_field(fields, "autoRestoreDefault") {
            settings.auto_restore_default = v;
        }
        if let Some(v) = stored_field(fields, "storageLocation") {
            settings.storage_location = v;
        }
        settings
    }
}

fn stored_field<T: DeserializeOwned>(fields: &Map<String, Value>, name: &str) -> Option<T> {
    let value = fields.get(name)?;
    match serde_json::from_value(value.clone()) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(field = name, "Ignoring invalid setting: {}", e);
            None
        }
    }
}
