//! Browser LocalStorage backend

use web_sys::Storage;

use crate::error::{Result, SeesawError};
use crate::persistence::KeyValueStore;

/// `window.localStorage`
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self> {
        let storage = web_sys::window()
            .ok_or_else(|| SeesawError::StorageUnavailable("no window".into()))?
            .local_storage()
            .map_err(|e| SeesawError::StorageUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| SeesawError::StorageUnavailable("localStorage disabled".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| SeesawError::StorageUnavailable(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Throws QuotaExceededError when full
        self.storage
            .set_item(key, value)
            .map_err(|e| SeesawError::PersistenceWrite {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| SeesawError::PersistenceWrite {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}
