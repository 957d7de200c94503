//! Seesaw - drop weights on a plank and watch it tilt
//!
//! Core modules:
//! - `sim`: Deterministic simulation (torque balance, state, drop/reset)
//! - `persistence`: Save/load of the simulation blob through a key-value store
//! - `platform`: Browser/native platform abstraction
//! - `audio`: Pitch-mapped drop feedback
//! - `settings`: User preferences
//! - `hud`: Render output formatting

pub mod audio;
pub mod error;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::SeesawError;
pub use persistence::{KeyValueStore, MemoryStore};
pub use settings::Settings;
pub use sim::{
    DropOutcome, HistoryEntry, PhysicsResult, PlacedObject, RandomSource, ScriptedSource,
    SeededSource, SeesawEngine, Side, SimulationState,
};

/// Simulation constants
pub mod consts {
    /// Torque units per degree of tilt
    pub const TORQUE_PER_DEGREE: f64 = 10.0;
    /// Mechanical stop of the plank (degrees, either direction)
    pub const MAX_TILT_DEG: f64 = 30.0;

    /// Lightest object that can be dropped (kg)
    pub const MIN_MASS: u32 = 1;
    /// Heaviest object that can be dropped (kg)
    pub const MAX_MASS: u32 = 10;

    /// Saturation/lightness of object colors
    pub const COLOR_SATURATION: u32 = 70;
    pub const COLOR_LIGHTNESS: u32 = 50;

    /// Save slot for the simulation blob
    pub const STORAGE_KEY: &str = "seesaw_data";
    /// Save slot for user settings
    pub const SETTINGS_KEY: &str = "seesaw_settings";
}

/// Clamp a raw tilt to the plank's mechanical stop
#[inline]
pub fn clamp_tilt(angle: f64) -> f64 {
    angle.clamp(-consts::MAX_TILT_DEG, consts::MAX_TILT_DEG)
}

/// Format an HSL color descriptor
#[inline]
pub fn hsl_color(hue: f64) -> String {
    format!(
        "hsl({}, {}%, {}%)",
        hue,
        consts::COLOR_SATURATION,
        consts::COLOR_LIGHTNESS
    )
}
