use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::ClientError;
use crate::host::{KeyValueStore, TOKEN_KEY};

type StoreMap = Arc<RwLock<HashMap<String, String>>>;

/// In-process storage for tests and demos
///
/// Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a bearer token
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.0.write().insert(TOKEN_KEY.to_string(), token.into());
        store
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.0.read().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.0.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), ClientError> {
        self.0.write().remove(key);
        Ok(())
    }
}
