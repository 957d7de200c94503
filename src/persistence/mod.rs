//! Save/load of the simulation blob
//!
//! The engine never talks to a concrete storage backend. It goes through
//! [`KeyValueStore`], implemented by [`MemoryStore`] here and by the browser's
//! LocalStorage in `platform`.
//!
//! Reads that fail or return garbage fall back to a fresh state; writes that
//! fail are logged and dropped. Neither ever reaches the caller.

use std::collections::HashMap;

use crate::consts::STORAGE_KEY;
use crate::error::{Result, SeesawError};
use crate::sim::SimulationState;

/// Textual key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// In-process store (native builds, tests, and browser fallback)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write, like a full LocalStorage quota
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Pre-populate a key
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn check_writable(&self, key: &str) -> Result<()> {
        if self.read_only {
            return Err(SeesawError::PersistenceWrite {
                key: key.to_string(),
                reason: "store is read-only".to_string(),
            });
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.check_writable(key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.check_writable(key)?;
        self.entries.remove(key);
        Ok(())
    }
}

/// Read and decode the saved simulation, if any
///
/// `Ok(None)` means nothing was saved; a present but malformed blob is a
/// [`SeesawError::Deserialization`].
pub fn load_state(store: &impl KeyValueStore) -> Result<Option<SimulationState>> {
    match store.get(STORAGE_KEY)? {
        Some(blob) => SimulationState::restore_from(&blob).map(Some),
        None => Ok(None),
    }
}

/// Persist the simulation (best effort)
pub fn save_state(store: &mut impl KeyValueStore, state: &SimulationState) {
    let blob = state.serialize();
    match store.set(STORAGE_KEY, &blob) {
        Ok(()) => log::debug!("Simulation saved ({} objects)", state.objects.len()),
        Err(e) => log::warn!("{}", e),
    }
}

/// Remove the saved simulation (best effort)
pub fn clear_state(store: &mut impl KeyValueStore) {
    match store.remove(STORAGE_KEY) {
        Ok(()) => log::info!("Saved simulation cleared"),
        Err(e) => log::warn!("{}", e),
    }
}
