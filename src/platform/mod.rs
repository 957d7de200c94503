//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory on native)
//! - Seeding (wall clock)

use crate::persistence::{KeyValueStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

/// Seed for a new session's random source
#[cfg(target_arch = "wasm32")]
pub fn session_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn session_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// The best store this platform offers
pub fn default_store() -> Box<dyn KeyValueStore> {
    #[cfg(target_arch = "wasm32")]
    {
        match LocalStorage::open() {
            Ok(store) => return Box::new(store),
            Err(e) => log::warn!("{} - progress will not survive a reload", e),
        }
    }

    Box::new(MemoryStore::new())
}

impl KeyValueStore for Box<dyn KeyValueStore> {
    fn get(&self, key: &str) -> crate::error::Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> crate::error::Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> crate::error::Result<()> {
        (**self).remove(key)
    }
}
