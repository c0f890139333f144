//! Configuration management for tabgroups
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//!
//! Configuration covers where state lives and how documents are opened.
//! User-facing settings (auto-save, auto-restore, storage location) are
//! persisted separately in the state database, see [`crate::storage::Settings`].

use crate::error::{Result, TabGroupError};
use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for tabgroups
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// State database location
    #[serde(default)]
    pub storage: StorageConfig,
    /// Open workspace roots
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    /// How documents are opened on load
    #[serde(default)]
    pub opener: OpenerConfig,
}

/// State database configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `state.db`; defaults to the platform data dir
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Workspace configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Open workspace roots; the first one scopes workspace storage and
    /// holds `.tabgroups.json`
    #[serde(default)]
    pub roots: Vec<PathBuf>,
}

/// Document opener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenerConfig {
    /// Command line run with each path appended, e.g. `code --reuse-window`.
    /// When unset, paths are printed to stdout.
    #[serde(default)]
    pub command: Option<String>,

    /// Fail to open paths that do not exist on disk
    #[serde(default = "default_require_existing")]
    pub require_existing: bool,
}

fn default_require_existing() -> bool {
    true
}

impl Default for OpenerConfig {
    fn default() -> Self {
        Self {
            command: None,
            require_existing: default_require_existing(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "tabgroups", "tabgroups")
}

/// Default configuration file: `<config dir>/config.yaml`
pub fn default_config_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().join("config.yaml"))
        .unwrap_or_else(|| PathBuf::from("tabgroups.yaml"))
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &Path, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(TabGroupError::from)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_yaml::from_str(&contents)
            .map_err(TabGroupError::from)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(data_dir) = std::env::var("TABGROUPS_DATA_DIR") {
            tracing::debug!(data_dir = %data_dir, "Env override: TABGROUPS_DATA_DIR");
            self.storage.data_dir = Some(PathBuf::from(data_dir));
        }

        if let Ok(workspace) = std::env::var("TABGROUPS_WORKSPACE") {
            tracing::debug!(workspace = %workspace, "Env override: TABGROUPS_WORKSPACE");
            self.workspace.roots = vec![PathBuf::from(workspace)];
        }

        if let Ok(opener) = std::env::var("TABGROUPS_OPENER") {
            tracing::debug!(opener = %opener, "Env override: TABGROUPS_OPENER");
            self.opener.command = Some(opener);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(data_dir) = &cli.data_dir {
            self.storage.data_dir = Some(data_dir.clone());
        }

        if cli.no_workspace {
            self.workspace.roots.clear();
        } else if let Some(workspace) = &cli.workspace {
            self.workspace.roots = vec![workspace.clone()];
        }
    }

    /// Fill in the current directory as the workspace when none is set
    pub fn with_default_workspace(mut self, cwd: &Path, no_workspace: bool) -> Self {
        if self.workspace.roots.is_empty() && !no_workspace {
            self.workspace.roots.push(cwd.to_path_buf());
        }
        self
    }

    /// The workspace root that scopes storage, if any is open
    pub fn workspace_root(&self) -> Option<PathBuf> {
        self.workspace.roots.first().cloned()
    }

    /// Directory holding the state database
    ///
    /// # Errors
    ///
    /// Returns `TabGroupError::Config` if no directory is configured and the
    /// platform data directory cannot be determined.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                TabGroupError::Config("Could not determine data directory".to_string()).into()
            })
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if let Some(command) = &self.opener.command {
            if command.trim().is_empty() {
                return Err(
                    TabGroupError::Config("opener.command cannot be empty".to_string()).into(),
                );
            }
        }

        if let Some(dir) = &self.storage.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(
                    TabGroupError::Config("storage.data_dir cannot be empty".to_string()).into(),
                );
            }
        }

        for root in &self.workspace.roots {
            if !root.is_absolute() {
                return Err(TabGroupError::Config(format!(
                    "workspace root must be an absolute path: {}",
                    root.display()
                ))
                .into());
            }
        }

        Ok(())
    }
}
