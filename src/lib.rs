//! tabgroups - save and restore named groups of open editor tabs
//!
//! A tab group is a named, ordered snapshot of the files that were open
//! together. This library persists tab groups, enforces the rules that
//! govern them, and restores them through a pluggable editor interface.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `storage`: Persistence backends (global and workspace key/value
//!   scopes, `.tabgroups.json` file) and the persisted record types
//! - `manager`: Tab group lifecycle: save, load, rename, delete, default
//!   handling, auto-save and auto-restore
//! - `editor`: Traits for enumerating and opening documents, plus the
//!   command-line implementation
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli` / `commands`: Command-line interface and its handlers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tabgroups::config::OpenerConfig;
//! use tabgroups::editor::CliEditor;
//! use tabgroups::storage::Storage;
//! use tabgroups::TabGroupManager;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let storage = Storage::open("/tmp/tabgroups".as_ref(), Some("/home/me/project".into()))?;
//!     let editor = Arc::new(CliEditor::opener_only(OpenerConfig::default()));
//!     let manager = TabGroupManager::new(storage, editor);
//!
//!     manager
//!         .save_current_tabs("Work", vec!["/home/me/project/src/main.rs".to_string()])
//!         .await?;
//!     manager.load_tab_group("Work").await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod manager;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, TabGroupError};
pub use manager::{LoadReport, TabGroupManager, AUTO_SAVE_GROUP_NAME};
pub use storage::{Settings, StorageLocation, TabGroup};

#[cfg(test)]
pub mod test_utils;
