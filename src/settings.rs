//! User preferences
//!
//! Persisted separately from the simulation blob. Physics constants are not
//! settings; see `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;
use crate::persistence::KeyValueStore;

/// Seesaw settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Play a tone when an object lands
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Behaviour ===
    /// Ask before clearing the plank
    pub confirm_reset: bool,
    /// Max log lines shown (0 = all)
    pub history_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            master_volume: 0.8,
            confirm_reset: true,
            history_limit: 0,
        }
    }
}

impl Settings {
    /// Volume actually applied to feedback (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.sound_enabled {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(SETTINGS_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("{}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings (best effort)
    pub fn save(&self, store: &mut impl KeyValueStore) {
        let Ok(json) = serde_json::to_string(self) else {
            return;
        };
        match store.set(SETTINGS_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("{}", e),
        }
    }
}
