//! Command-line interface definition for tabgroups
//!
//! This module defines the CLI structure using clap's derive API.

use crate::storage::StorageLocation;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tabgroups - save and restore named groups of open editor tabs
#[derive(Parser, Debug, Clone)]
#[command(name = "tabgroups")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "TABGROUPS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory holding the state database
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Workspace root (defaults to the current directory)
    #[arg(short, long, conflicts_with = "no_workspace")]
    pub workspace: Option<PathBuf>,

    /// Run as if no workspace is open
    #[arg(long)]
    pub no_workspace: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for tabgroups
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List saved tab groups, most recently used first
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Save the given files as a tab group, replacing any group with that name
    Save {
        /// Name of the tab group
        name: String,

        /// Files that are currently open, in tab order
        files: Vec<PathBuf>,
    },

    /// Open every file of a tab group
    Load {
        /// Name of the tab group
        name: String,
    },

    /// Delete a tab group
    Delete {
        /// Name of the tab group
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Rename a tab group
    Rename {
        /// Current name
        old_name: String,

        /// New name
        new_name: String,
    },

    /// Mark a tab group as the one restored on startup
    SetDefault {
        /// Name of the tab group
        name: String,
    },

    /// Show the default tab group
    Default {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Shutdown hook: save open files as "Auto-saved Tabs" if enabled
    AutoSave {
        /// Files that are currently open, in tab order
        files: Vec<PathBuf>,
    },

    /// Startup hook: load the default tab group if enabled
    AutoRestore,

    /// View or change settings
    Settings {
        /// Settings subcommand
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

/// Settings subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommand {
    /// Show current settings
    Show {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Change one or more settings
    Set {
        /// Save open tabs on shutdown
        #[arg(long)]
        auto_save_on_close: Option<bool>,

        /// Restore the default group on startup
        #[arg(long)]
        auto_restore_default: Option<bool>,

        /// Where tab groups are stored: global, workspace, or file
        #[arg(long)]
        storage_location: Option<StorageLocation>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::try_parse_from(["tabgroups", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::List { json: false }));
        assert!(!cli.verbose);
        assert!(cli.workspace.is_none());
    }

    #[test]
    fn test_cli_parse_save_with_files() {
        let cli = Cli::try_parse_from(["tabgroups", "save", "Work", "a.rs", "/abs/b.rs"]).unwrap();
        if let Commands::Save { name, files } = cli.command {
            assert_eq!(name, "Work");
            assert_eq!(files, vec![PathBuf::from("a.rs"), PathBuf::from("/abs/b.rs")]);
        } else {
            panic!("Expected Save command");
        }
    }

    #[test]
    fn test_cli_parse_save_without_files() {
        let cli = Cli::try_parse_from(["tabgroups", "save", "Empty"]).unwrap();
        if let Commands::Save { files, .. } = cli.command {
            assert!(files.is_empty());
        } else {
            panic!("Expected Save command");
        }
    }

    #[test]
    fn test_cli_parse_delete_yes() {
        let cli = Cli::try_parse_from(["tabgroups", "delete", "Work", "--yes"]).unwrap();
        if let Commands::Delete { name, yes } = cli.command {
            assert_eq!(name, "Work");
            assert!(yes);
        } else {
            panic!("Expected Delete command");
        }
    }

    #[test]
    fn test_cli_parse_rename() {
        let cli = Cli::try_parse_from(["tabgroups", "rename", "Old", "New"]).unwrap();
        if let Commands::Rename { old_name, new_name } = cli.command {
            assert_eq!(old_name, "Old");
            assert_eq!(new_name, "New");
        } else {
            panic!("Expected Rename command");
        }
    }

    #[test]
    fn test_cli_parse_set_default_kebab_case() {
        let cli = Cli::try_parse_from(["tabgroups", "set-default", "Work"]).unwrap();
        assert!(matches!(cli.command, Commands::SetDefault { .. }));
    }

    #[test]
    fn test_cli_parse_settings_set() {
        let cli = Cli::try_parse_from([
            "tabgroups",
            "settings",
            "set",
            "--auto-save-on-close",
            "true",
            "--storage-location",
            "file",
        ])
        .unwrap();

        if let Commands::Settings {
            command:
                SettingsCommand::Set {
                    auto_save_on_close,
                    auto_restore_default,
                    storage_location,
                },
        } = cli.command
        {
            assert_eq!(auto_save_on_close, Some(true));
            assert_eq!(auto_restore_default, None);
            assert_eq!(storage_location, Some(StorageLocation::File));
        } else {
            panic!("Expected Settings Set command");
        }
    }

    #[test]
    fn test_cli_rejects_unknown_storage_location() {
        let result = Cli::try_parse_from([
            "tabgroups",
            "settings",
            "set",
            "--storage-location",
            "cloud",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_workspace_conflicts_with_no_workspace() {
        let result = Cli::try_parse_from([
            "tabgroups",
            "--workspace",
            "/w",
            "--no-workspace",
            "list",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from([
            "tabgroups",
            "--verbose",
            "--data-dir",
            "/tmp/data",
            "--workspace",
            "/tmp/ws",
            "auto-restore",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/data")));
        assert_eq!(cli.workspace, Some(PathBuf::from("/tmp/ws")));
        assert!(matches!(cli.command, Commands::AutoRestore));
    }
}
