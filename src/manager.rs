//! Tab group lifecycle
//!
//! [`TabGroupManager`] owns the rules over the persisted collection:
//! names are unique, at most one group is the default, and timestamps
//! only move forward. Every mutation reads the whole collection from the
//! selected backend, changes it in memory, and writes it back whole.

use crate::editor::Editor;
use crate::error::{Result, TabGroupError};
use crate::storage::{Backend, Settings, Storage, TabGroup};
use chrono::Utc;
use std::sync::Arc;

/// Reserved name used by [`TabGroupManager::auto_save_current_tabs`]
pub const AUTO_SAVE_GROUP_NAME: &str = "Auto-saved Tabs";

/// Outcome of loading a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// The group as persisted after its `last_used` update
    pub group: TabGroup,
    /// Paths that opened, in group order
    pub opened: Vec<String>,
    /// Paths that failed to open and were skipped
    pub failed: Vec<String>,
}

/// Creates, restores, and maintains named tab groups
pub struct TabGroupManager {
    storage: Storage,
    settings: Settings,
    editor: Arc<dyn Editor>,
}

impl TabGroupManager {
    /// Create a manager, reading the current settings from `storage`
    pub fn new(storage: Storage, editor: Arc<dyn Editor>) -> Self {
        let settings = storage.read_settings();
        tracing::debug!(
            location = %settings.storage_location,
            auto_save = settings.auto_save_on_close,
            auto_restore = settings.auto_restore_default,
            "Loaded tab group settings"
        );
        Self {
            storage,
            settings,
            editor,
        }
    }

    /// Settings currently in effect
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Persist new settings and apply them to this manager
    ///
    /// Changing `storage_location` does not move existing groups; the
    /// manager simply starts reading from the newly selected backend.
    pub async fn update_settings(&mut self, settings: Settings) -> Result<()> {
        self.storage.write_settings(&settings)?;
        if settings.storage_location != self.settings.storage_location {
            tracing::info!(
                from = %self.settings.storage_location,
                to = %settings.storage_location,
                "Storage location changed"
            );
        }
        self.settings = settings;
        Ok(())
    }

    fn backend(&self) -> Backend {
        self.storage.backend(self.settings.storage_location)
    }

    /// All groups, in stored order
    pub async fn list_groups(&self) -> Vec<TabGroup> {
        self.backend().read()
    }

    /// The group named `name`, if any
    pub async fn get_group(&self, name: &str) -> Option<TabGroup> {
        self.list_groups()
            .await
            .into_iter()
            .find(|g| g.group_name == name)
    }

    /// Save `files` as the group `name`
    ///
    /// An existing group with the same name is replaced at its position,
    /// which also resets its creation time and clears its default flag.
    pub async fn save_current_tabs(&self, name: &str, files: Vec<String>) -> Result<TabGroup> {
        let backend = self.backend();
        let mut groups = backend.read();
        let group = TabGroup::new(name, files);

        match groups.iter().position(|g| g.group_name == name) {
            Some(index) => groups[index] = group.clone(),
            None => groups.push(group.clone()),
        }

        backend.write(&groups)?;
        tracing::info!(
            group = name,
            files = group.files.len(),
            location = %backend.location(),
            "Saved tab group"
        );
        Ok(group)
    }

    /// Save the editor's currently open documents as the group `name`
    pub async fn save_open_tabs(&self, name: &str) -> Result<TabGroup> {
        let files = self.editor.open_documents().await?;
        self.save_current_tabs(name, files).await
    }

    /// Mark `name` as used now and open its files in order
    ///
    /// A file that fails to open is logged and skipped. The timestamp
    /// update is persisted before any file is opened and is kept even if
    /// every open fails.
    pub async fn load_tab_group(&self, name: &str) -> Result<LoadReport> {
        let backend = self.backend();
        let mut groups = backend.read();
        let group = groups
            .iter_mut()
            .find(|g| g.group_name == name)
            .ok_or_else(|| TabGroupError::NotFound(name.to_string()))?;

        group.last_used = Utc::now();
        let group = group.clone();
        backend.write(&groups)?;

        let mut opened = Vec::with_capacity(group.files.len());
        let mut failed = Vec::new();
        for path in &group.files {
            match self.editor.open_document(path).await {
                Ok(()) => opened.push(path.clone()),
                Err(e) => {
                    let err = TabGroupError::TransientOpenFailure {
                        path: path.clone(),
                        reason: format!("{:#}", e),
                    };
                    tracing::error!("{}", err);
                    failed.push(path.clone());
                }
            }
        }

        tracing::info!(
            group = name,
            opened = opened.len(),
            failed = failed.len(),
            "Loaded tab group"
        );
        Ok(LoadReport {
            group,
            opened,
            failed,
        })
    }

    /// Remove the group `name`
    pub async fn delete_tab_group(&self, name: &str) -> Result<()> {
        let backend = self.backend();
        let mut groups = backend.read();
        let before = groups.len();
        groups.retain(|g| g.group_name != name);

        if groups.len() == before {
            return Err(TabGroupError::NotFound(name.to_string()).into());
        }

        backend.write(&groups)?;
        tracing::info!(group = name, "Deleted tab group");
        Ok(())
    }

    /// Rename `old_name` to `new_name`, keeping everything else
    ///
    /// Renaming a group to its own name is accepted and changes nothing.
    pub async fn rename_tab_group(&self, old_name: &str, new_name: &str) -> Result<()> {
        let backend = self.backend();
        let mut groups = backend.read();

        let index = groups
            .iter()
            .position(|g| g.group_name == old_name)
            .ok_or_else(|| TabGroupError::NotFound(old_name.to_string()))?;

        if groups
            .iter()
            .enumerate()
            .any(|(i, g)| i != index && g.group_name == new_name)
        {
            return Err(TabGroupError::Conflict(new_name.to_string()).into());
        }

        groups[index].group_name = new_name.to_string();
        backend.write(&groups)?;
        tracing::info!(from = old_name, to = new_name, "Renamed tab group");
        Ok(())
    }

    /// Make `name` the only default group
    pub async fn set_default_tab_group(&self, name: &str) -> Result<()> {
        let backend = self.backend();
        let mut groups = backend.read();

        let index = groups
            .iter()
            .position(|g| g.group_name == name)
            .ok_or_else(|| TabGroupError::NotFound(name.to_string()))?;

        for group in groups.iter_mut() {
            group.is_default = Some(false);
        }
        groups[index].is_default = Some(true);

        backend.write(&groups)?;
        tracing::info!(group = name, "Set default tab group");
        Ok(())
    }

    /// The default group, if one is set
    pub async fn get_default_tab_group(&self) -> Option<TabGroup> {
        self.list_groups().await.into_iter().find(|g| g.is_default())
    }

    /// Save open documents as "Auto-saved Tabs" when auto-save is enabled
    ///
    /// Returns the saved group, or `None` when auto-save is off.
    pub async fn auto_save_current_tabs(&self) -> Result<Option<TabGroup>> {
        if !self.settings.auto_save_on_close {
            tracing::debug!("Auto-save disabled, skipping");
            return Ok(None);
        }
        self.save_open_tabs(AUTO_SAVE_GROUP_NAME).await.map(Some)
    }

    /// Load the default group when auto-restore is enabled and one exists
    pub async fn auto_restore_default_tab_group(&self) -> Result<Option<LoadReport>> {
        if !self.settings.auto_restore_default {
            tracing::debug!("Auto-restore disabled, skipping");
            return Ok(None);
        }

        match self.get_default_tab_group().await {
            Some(group) => self.load_tab_group(&group.group_name).await.map(Some),
            None => {
                tracing::debug!("No default tab group to restore");
                Ok(None)
            }
        }
    }
}

/// Sort groups most recently used first
pub fn sort_by_last_used(groups: &mut [TabGroup]) {
    groups.sort_by(|a, b| b.last_used.cmp(&a.last_used));
}
