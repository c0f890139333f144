//! Test utilities for tabgroups
//!
//! Temporary storage and manager construction, seeded collections, and a
//! recording editor that stands in for a real one.

use crate::editor::{DocumentEnumerator, DocumentOpener};
use crate::error::{Result, TabGroupError};
use crate::manager::TabGroupManager;
use crate::storage::{StateDb, Storage, TabGroup};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content and return its path
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Two groups mirroring a typical small collection
pub fn sample_groups() -> Vec<TabGroup> {
    vec![
        TabGroup::new(
            "Test Group 1",
            vec![
                "/path/to/file1.ts".to_string(),
                "/path/to/file2.ts".to_string(),
            ],
        ),
        TabGroup::new(
            "Test Group 2",
            vec![
                "/path/to/file3.ts".to_string(),
                "/path/to/file4.ts".to_string(),
            ],
        ),
    ]
}

/// Storage with its data dir and workspace root inside a temp directory
///
/// The workspace root is `<tmp>/workspace` and exists on disk, so the
/// file backend is writable.
pub fn temp_storage() -> (Storage, TempDir) {
    let dir = temp_dir();
    let workspace = dir.path().join("workspace");
    std::fs::create_dir_all(&workspace).expect("Failed to create workspace dir");
    let storage =
        Storage::open(&dir.path().join("data"), Some(workspace)).expect("failed to open storage");
    (storage, dir)
}

/// Manager over [`temp_storage`] driving `editor`
pub fn temp_manager(editor: RecordingEditor) -> (TabGroupManager, Arc<RecordingEditor>, TempDir) {
    let (storage, dir) = temp_storage();
    let editor = Arc::new(editor);
    let manager = TabGroupManager::new(storage, editor.clone());
    (manager, editor, dir)
}

/// Manager over an in-memory database with no workspace open
pub fn manager_without_workspace() -> (TabGroupManager, Arc<RecordingEditor>) {
    let db = StateDb::temporary().expect("failed to open temp db");
    let storage = Storage::new(
        Arc::new(db.global().expect("global tree")),
        Arc::new(db.workspace(None).expect("workspace tree")),
        None,
    );
    let editor = Arc::new(RecordingEditor::default());
    let manager = TabGroupManager::new(storage, editor.clone());
    (manager, editor)
}

/// Editor double that records opened paths
///
/// Paths listed in `failing` fail to open; everything else succeeds.
#[derive(Debug, Default)]
pub struct RecordingEditor {
    open: Mutex<Vec<String>>,
    failing: Vec<String>,
    opened: Mutex<Vec<String>>,
}

impl RecordingEditor {
    /// Editor whose open documents are `paths`
    pub fn with_open(paths: &[&str]) -> Self {
        Self {
            open: Mutex::new(paths.iter().map(|p| p.to_string()).collect()),
            ..Default::default()
        }
    }

    /// Editor that fails to open any of `paths`
    pub fn failing_on(paths: &[&str]) -> Self {
        Self {
            failing: paths.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Replace the open documents
    pub fn set_open(&self, paths: &[&str]) {
        *self.open.lock().unwrap() = paths.iter().map(|p| p.to_string()).collect();
    }

    /// Paths opened so far, in order
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentEnumerator for RecordingEditor {
    async fn open_documents(&self) -> Result<Vec<String>> {
        Ok(self.open.lock().unwrap().clone())
    }
}

#[async_trait]
impl DocumentOpener for RecordingEditor {
    async fn open_document(&self, path: &str) -> Result<()> {
        if self.failing.iter().any(|p| p == path) {
            return Err(TabGroupError::Editor(format!("{} was moved", path)).into());
        }
        self.opened.lock().unwrap().push(path.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_error_contains_matches() {
        let result: Result<()> = Err(TabGroupError::NotFound("G".to_string()).into());
        assert_error_contains(result, "not found");
    }

    #[tokio::test]
    async fn test_recording_editor_records_and_fails() {
        let editor = RecordingEditor::failing_on(&["/bad"]);
        assert!(editor.open_document("/bad").await.is_err());
        editor.open_document("/good").await.expect("good opens");
        assert_eq!(editor.opened(), vec!["/good".to_string()]);
    }
}
