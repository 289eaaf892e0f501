use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::ClientError;
use crate::host::KeyValueStore;

/// Storage persisted as a flat JSON object after each mutation
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl FileStore {
    /// Open (or create) a store at `path`, loading existing entries
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let path = path.into();

        Self::ensure_parent_exists(&path)?;

        let entries = Self::load(&path)?;

        Ok(Self {
            path,
            inner: Arc::new(RwLock::new(entries)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<HashMap<String, String>, ClientError> {
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let bytes = fs::read(path).map_err(|e| {
            ClientError::Storage(format!("failed to read {}: {e}", path.display()))
        })?;

        if bytes.is_empty() {
            return Ok(HashMap::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            ClientError::Storage(format!("failed to parse {}: {e}", path.display()))
        })
    }

    fn ensure_parent_exists(path: &Path) -> Result<(), ClientError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ClientError::Storage(format!(
                    "failed to create store directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        Ok(())
    }

    // Caller holds the write lock.
    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), ClientError> {
        let serialized = serde_json::to_vec_pretty(entries)?;

        let mut tmp_path = self.path.clone();
        tmp_path.set_extension("tmp");

        {
            let mut file = fs::File::create(&tmp_path).map_err(|e| {
                ClientError::Storage(format!("failed to create {}: {e}", tmp_path.display()))
            })?;
            file.write_all(&serialized).map_err(|e| {
                ClientError::Storage(format!("failed to write {}: {e}", tmp_path.display()))
            })?;
            file.sync_all().map_err(|e| {
                ClientError::Storage(format!("failed to sync {}: {e}", tmp_path.display()))
            })?;
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            ClientError::Storage(format!(
                "failed to move {} into place: {e}",
                tmp_path.display()
            ))
        })
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.read().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut guard = self.inner.write();
        guard.insert(key.to_string(), value.to_string());
        self.persist(&guard)
    }

    fn remove_item(&self, key: &str) -> Result<(), ClientError> {
        let mut guard = self.inner.write();
        if guard.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&guard)
    }
}
