//! Editor collaborators
//!
//! The manager never talks to an editor directly. It asks a
//! [`DocumentEnumerator`] which documents are open and hands paths to a
//! [`DocumentOpener`]. [`CliEditor`] implements both for the command-line
//! front end.

use crate::config::OpenerConfig;
use crate::error::{Result, TabGroupError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Supplies the paths of the currently open text documents, in tab order
#[async_trait]
pub trait DocumentEnumerator: Send + Sync {
    /// Absolute paths of open documents at the time of the call
    async fn open_documents(&self) -> Result<Vec<String>>;
}

/// Opens a single document for editing
#[async_trait]
pub trait DocumentOpener: Send + Sync {
    /// Open `path`; may fail for this path alone
    async fn open_document(&self, path: &str) -> Result<()>;
}

/// Both halves of the editor, as one object
pub trait Editor: DocumentEnumerator + DocumentOpener {}

impl<T: DocumentEnumerator + DocumentOpener> Editor for T {}

/// Editor backed by command-line arguments and an external opener command
///
/// The "open documents" are the paths passed on the command line. Opening
/// runs the configured command with the path appended; with no command
/// configured the path is printed to stdout instead.
#[derive(Debug, Clone)]
pub struct CliEditor {
    open: Vec<String>,
    opener: OpenerConfig,
}

impl CliEditor {
    /// Create an editor whose open documents are `paths`
    ///
    /// Relative paths are resolved against `cwd`.
    pub fn new(paths: &[PathBuf], cwd: &Path, opener: OpenerConfig) -> Self {
        let open = paths
            .iter()
            .map(|p| absolutize(p, cwd).to_string_lossy().into_owned())
            .collect();
        Self { open, opener }
    }

    /// Create an editor with nothing open, used for load-only commands
    pub fn opener_only(opener: OpenerConfig) -> Self {
        Self {
            open: Vec::new(),
            opener,
        }
    }
}

fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[async_trait]
impl DocumentEnumerator for CliEditor {
    async fn open_documents(&self) -> Result<Vec<String>> {
        Ok(self.open.clone())
    }
}

#[async_trait]
impl DocumentOpener for CliEditor {
    async fn open_document(&self, path: &str) -> Result<()> {
        if self.opener.require_existing && !Path::new(path).exists() {
            return Err(TabGroupError::Editor(format!("{} does not exist", path)).into());
        }

        let Some(command) = &self.opener.command else {
            println!("{}", path);
            return Ok(());
        };

        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| TabGroupError::Config("Opener command is empty".to_string()))?;

        tracing::debug!(program, path, "Running opener command");
        let status = Command::new(program)
            .args(parts)
            .arg(path)
            .status()
            .await
            .map_err(|e| TabGroupError::Editor(format!("Failed to run {}: {}", program, e)))?;

        if !status.success() {
            return Err(TabGroupError::Editor(format!("{} exited with {}", program, status)).into());
        }

        Ok(())
    }
}
