/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `groups`   — save, load, list, rename, delete, and default handling
- `settings` — show and change persisted settings

Handlers build a `TabGroupManager` from the loaded configuration, call
into it, and render the outcome.
*/

use crate::config::Config;
use crate::editor::Editor;
use crate::error::Result;
use crate::manager::TabGroupManager;
use crate::storage::Storage;
use std::sync::Arc;

pub mod groups;
pub mod settings;

/// Open storage as configured and wrap it in a manager driving `editor`
pub fn open_manager(config: &Config, editor: Arc<dyn Editor>) -> Result<TabGroupManager> {
    let data_dir = config.data_dir()?;
    let workspace_root = config.workspace_root();
    tracing::debug!(
        data_dir = %data_dir.display(),
        workspace = ?workspace_root,
        "Opening tab group storage"
    );
    let storage = Storage::open(&data_dir, workspace_root)?;
    Ok(TabGroupManager::new(storage, editor))
}
