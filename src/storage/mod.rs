use crate::error::{Result, TabGroupError};
use anyhow::Context;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod kv;
pub mod types;
pub use kv::{KeyValueStore, SledStore, StateDb};
pub use types::{Settings, StorageLocation, TabGroup};

/// Key holding the tab group collection in a key/value scope
pub const TAB_GROUPS_KEY: &str = "tabGroups";

/// Key holding the settings record in the global scope
pub const SETTINGS_KEY: &str = "tabGroupSettings";

/// File name of the file backend, relative to the first workspace root
pub const TAB_GROUPS_FILE: &str = ".tabgroups.json";

/// Tab group collection stored as a JSON document in the workspace
#[derive(Debug, Clone)]
pub struct FileStore {
    workspace_root: Option<PathBuf>,
}

impl FileStore {
    /// Create a file store rooted at `workspace_root` (if any is open)
    pub fn new(workspace_root: Option<PathBuf>) -> Self {
        Self { workspace_root }
    }

    /// Location of `.tabgroups.json`, or `None` with no workspace open
    pub fn path(&self) -> Option<PathBuf> {
        self.workspace_root
            .as_ref()
            .map(|root| root.join(TAB_GROUPS_FILE))
    }

    /// Read the collection, treating absence and corruption as empty
    pub fn read(&self) -> Vec<TabGroup> {
        let Some(path) = self.path() else {
            return Vec::new();
        };
        if !path.exists() {
            return Vec::new();
        }

        match Self::read_file(&path) {
            Ok(groups) => groups,
            Err(e) => {
                tracing::error!("Error reading tab groups from file: {:#}", e);
                Vec::new()
            }
        }
    }

    fn read_file(path: &Path) -> Result<Vec<TabGroup>> {
        let contents = std::fs::read_to_string(path)
            .map_err(TabGroupError::from)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value: Value =
            serde_json::from_str(&contents).map_err(|e| TabGroupError::MalformedStorage {
                location: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(groups_from_value(value, &path.display().to_string()))
    }

    /// Overwrite the file with the full collection
    ///
    /// # Errors
    ///
    /// Returns `TabGroupError::StorageUnavailable` if no workspace is open
    /// or the file cannot be written.
    pub fn write(&self, groups: &[TabGroup]) -> Result<()> {
        let path = self.path().ok_or_else(|| {
            tracing::error!("Error saving tab groups to file: no workspace folder open");
            TabGroupError::StorageUnavailable("No workspace folder open".to_string())
        })?;

        let contents = serde_json::to_string_pretty(groups).map_err(TabGroupError::from)?;
        std::fs::write(&path, contents).map_err(|e| {
            tracing::error!("Error saving tab groups to {}: {}", path.display(), e);
            TabGroupError::StorageUnavailable(format!(
                "Failed to write {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

/// One of the three interchangeable places a collection can live
#[derive(Clone)]
pub enum Backend {
    /// Installation-wide key/value scope
    Global(Arc<dyn KeyValueStore>),
    /// Key/value scope of the current workspace
    Workspace(Arc<dyn KeyValueStore>),
    /// `.tabgroups.json` under the first workspace root
    File(FileStore),
}

impl Backend {
    /// Which storage location this backend serves
    pub fn location(&self) -> StorageLocation {
        match self {
            Backend::Global(_) => StorageLocation::Global,
            Backend::Workspace(_) => StorageLocation::Workspace,
            Backend::File(_) => StorageLocation::File,
        }
    }

    /// Read the full collection; never fails
    pub fn read(&self) -> Vec<TabGroup> {
        match self {
            Backend::Global(store) | Backend::Workspace(store) => {
                match read_value(store.as_ref(), TAB_GROUPS_KEY) {
                    Some(value) => groups_from_value(value, TAB_GROUPS_KEY),
                    None => Vec::new(),
                }
            }
            Backend::File(file) => file.read(),
        }
    }

    /// Replace the full collection
    pub fn write(&self, groups: &[TabGroup]) -> Result<()> {
        match self {
            Backend::Global(store) | Backend::Workspace(store) => {
                let value = serde_json::to_value(groups).map_err(TabGroupError::from)?;
                store.set(TAB_GROUPS_KEY, value)
            }
            Backend::File(file) => file.write(groups),
        }
    }
}

/// Read a JSON value from a key/value scope
///
/// A missing key yields `None` silently; a failed read is logged and also
/// yields `None`.
fn read_value(store: &dyn KeyValueStore, key: &str) -> Option<Value> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Error reading {} from key/value store: {:#}", key, e);
            None
        }
    }
}

/// Decode a stored collection record by record
///
/// A record that does not match the schema is logged and skipped; the
/// rest of the collection is kept. Anything other than an array reads as
/// empty.
fn groups_from_value(value: Value, location: &str) -> Vec<TabGroup> {
    let Value::Array(records) = value else {
        let err = TabGroupError::MalformedStorage {
            location: location.to_string(),
            reason: "expected an array of tab groups".to_string(),
        };
        tracing::warn!("{}", err);
        return Vec::new();
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(group) => Some(group),
            Err(e) => {
                let err = TabGroupError::MalformedStorage {
                    location: format!("{}[{}]", location, index),
                    reason: e.to_string(),
                };
                tracing::warn!("Skipping tab group: {}", err);
                None
            }
        })
        .collect()
}

/// Persistence for tab groups and settings across all three backends
///
/// Settings always live in the global scope; the tab group collection
/// lives in whichever backend the caller selects.
#[derive(Clone)]
pub struct Storage {
    global: Arc<dyn KeyValueStore>,
    workspace: Arc<dyn KeyValueStore>,
    file: FileStore,
}

impl Storage {
    /// Assemble storage from its three parts
    pub fn new(
        global: Arc<dyn KeyValueStore>,
        workspace: Arc<dyn KeyValueStore>,
        workspace_root: Option<PathBuf>,
    ) -> Self {
        Self {
            global,
            workspace,
            file: FileStore::new(workspace_root),
        }
    }

    /// Open the state database under `data_dir` and scope it to `workspace_root`
    pub fn open(data_dir: &Path, workspace_root: Option<PathBuf>) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .context("Failed to create data directory")
            .map_err(|e| TabGroupError::Storage(format!("{:#}", e)))?;

        let db = StateDb::open(data_dir.join("state.db"))?;
        let global = db.global()?;
        let workspace = db.workspace(workspace_root.as_deref())?;
        tracing::debug!(
            global = %global.name(),
            workspace = %workspace.name(),
            "Opened state database"
        );

        Ok(Self::new(
            Arc::new(global),
            Arc::new(workspace),
            workspace_root,
        ))
    }

    /// The backend serving `location`
    pub fn backend(&self, location: StorageLocation) -> Backend {
        match location {
            StorageLocation::Global => Backend::Global(Arc::clone(&self.global)),
            StorageLocation::Workspace => Backend::Workspace(Arc::clone(&self.workspace)),
            StorageLocation::File => Backend::File(self.file.clone()),
        }
    }

    /// Read the collection from the backend serving `location`
    pub fn read(&self, location: StorageLocation) -> Vec<TabGroup> {
        self.backend(location).read()
    }

    /// Write the collection to the backend serving `location`
    pub fn write(&self, location: StorageLocation, groups: &[TabGroup]) -> Result<()> {
        self.backend(location).write(groups)
    }

    /// Read settings, filling any missing or invalid field from defaults
    pub fn read_settings(&self) -> Settings {
        match read_value(self.global.as_ref(), SETTINGS_KEY) {
            Some(value) => Settings::from_stored(&value),
            None => Settings::default(),
        }
    }

    /// Replace the stored settings record
    pub fn write_settings(&self, settings: &Settings) -> Result<()> {
        let value = serde_json::to_value(settings).map_err(TabGroupError::from)?;
        self.global.set(SETTINGS_KEY, value)
    }

    /// Path of the file backend's document, if a workspace is open
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file.path()
    }
}
