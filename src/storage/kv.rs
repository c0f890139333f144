//! Durable key/value scopes
//!
//! Both the installation-wide and the workspace-scoped stores are trees
//! of one embedded `sled` database. Values are stored as JSON bytes.

use crate::error::{Result, TabGroupError};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Name of the tree backing the installation-wide scope
pub const GLOBAL_TREE: &str = "global";

/// A durable key/value area holding JSON values
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, or `None` if absent
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// `sled` tree implementing [`KeyValueStore`]
#[derive(Clone)]
pub struct SledStore {
    tree: sled::Tree,
}

impl SledStore {
    /// Wrap an already opened tree
    pub fn new(tree: sled::Tree) -> Self {
        Self { tree }
    }

    /// Name of the underlying tree
    pub fn name(&self) -> String {
        String::from_utf8_lossy(&self.tree.name()).into_owned()
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let bytes = self
            .tree
            .get(key.as_bytes())
            .map_err(|e| TabGroupError::Storage(format!("Get failed: {}", e)))?;

        match bytes {
            Some(bytes) => {
                let value = serde_json::from_slice(&bytes).map_err(|e| {
                    TabGroupError::MalformedStorage {
                        location: format!("{}/{}", self.name(), key),
                        reason: e.to_string(),
                    }
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let bytes = serde_json::to_vec(&value).map_err(TabGroupError::from)?;

        self.tree
            .insert(key.as_bytes(), bytes)
            .map_err(|e| TabGroupError::Storage(format!("Insert failed: {}", e)))?;

        self.tree
            .flush()
            .map_err(|e| TabGroupError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }
}

/// The global and workspace scopes of one state database
pub struct StateDb {
    db: sled::Db,
}

impl StateDb {
    /// Open or create the state database at `path`
    ///
    /// # Errors
    ///
    /// Returns `TabGroupError::Storage` if the database cannot be opened
    /// (for example when another process holds its lock).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path.as_ref())
            .map_err(|e| TabGroupError::Storage(format!("Failed to open database: {}", e)))?;
        Ok(Self { db })
    }

    /// Open a throwaway database that is removed when dropped
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(|e| TabGroupError::Storage(format!("Failed to open database: {}", e)))?;
        Ok(Self { db })
    }

    /// The installation-wide scope
    pub fn global(&self) -> Result<SledStore> {
        self.tree(GLOBAL_TREE)
    }

    /// The scope private to `workspace_root` (or to "no workspace")
    pub fn workspace(&self, workspace_root: Option<&Path>) -> Result<SledStore> {
        self.tree(&workspace_tree_name(workspace_root))
    }

    fn tree(&self, name: &str) -> Result<SledStore> {
        let tree = self
            .db
            .open_tree(name)
            .map_err(|e| TabGroupError::Storage(format!("Failed to open tree {}: {}", name, e)))?;
        Ok(SledStore::new(tree))
    }
}

/// Tree name for a workspace scope: `workspace:<sha256 of the root path>`
pub fn workspace_tree_name(workspace_root: Option<&Path>) -> String {
    match workspace_root {
        Some(root) => {
            let digest = Sha256::digest(root.to_string_lossy().as_bytes());
            let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
            format!("workspace:{}", hex)
        }
        None => "workspace:none".to_string(),
    }
}
