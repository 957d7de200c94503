//! Simulation state and core types
//!
//! Everything that must be persisted to resume a session lives here. The
//! JSON shape (`objects`, `history`, `nextMass`) is the save blob format.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::{MAX_MASS, MIN_MASS};
use crate::error::{Result, SeesawError};
use crate::hsl_color;

/// Which arm of the plank an object rests on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Negative offsets are left; zero counts as right
    #[inline]
    pub fn of(offset: f64) -> Self {
        if offset < 0.0 { Side::Left } else { Side::Right }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An object resting on the plank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    /// Weight in kg
    pub mass: u32,
    /// Horizontal distance from plank center (px, negative = left)
    pub offset: f64,
    /// Display color (`hsl(...)`)
    pub color: String,
}

impl PlacedObject {
    pub fn new(mass: u32, offset: f64, hue: f64) -> Self {
        Self {
            mass,
            offset,
            color: hsl_color(hue),
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        Side::of(self.offset)
    }

    /// Distance from the pivot (px)
    #[inline]
    pub fn distance(&self) -> f64 {
        self.offset.abs()
    }

    /// Torque magnitude about the pivot
    #[inline]
    pub fn torque(&self) -> f64 {
        self.mass as f64 * self.distance()
    }
}

/// One line of the drop log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryEntry(String);

impl HistoryEntry {
    /// Describe a drop of `mass` at `offset`
    pub fn for_drop(mass: u32, offset: f64) -> Self {
        let distance = offset.abs().round();
        Self(format!(
            "{}kg dropped on the {} at {}px",
            mass,
            Side::of(offset),
            distance
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Complete simulation state (serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    /// Objects on the plank, in drop order
    pub objects: Vec<PlacedObject>,
    /// Drop log, in drop order
    pub history: Vec<HistoryEntry>,
    /// Mass assigned to the next dropped object
    pub next_mass: u32,
}

impl SimulationState {
    /// Empty plank with a freshly drawn next mass
    pub fn fresh(rng: &mut impl RandomSource) -> Self {
        Self {
            objects: Vec::new(),
            history: Vec::new(),
            next_mass: rng.next_mass(),
        }
    }

    /// Encode as a save blob
    pub fn serialize(&self) -> String {
        // Only finite floats and strings are stored, so encoding cannot fail
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::error!("Failed to encode simulation state: {}", e);
            String::new()
        })
    }

    /// Decode a save blob, rejecting anything that is not a reachable state
    pub fn restore_from(blob: &str) -> Result<Self> {
        let state: SimulationState = serde_json::from_str(blob)?;
        state.validate()?;
        Ok(state)
    }

    /// Check the invariants a decoded blob must satisfy
    pub fn validate(&self) -> Result<()> {
        let mass_range = MIN_MASS..=MAX_MASS;
        if !mass_range.contains(&self.next_mass) {
            return Err(SeesawError::Deserialization(format!(
                "nextMass {} outside [{}, {}]",
                self.next_mass, MIN_MASS, MAX_MASS
            )));
        }
        if let Some((i, obj)) = self
            .objects
            .iter()
            .enumerate()
            .find(|(_, o)| !mass_range.contains(&o.mass) || !o.offset.is_finite())
        {
            return Err(SeesawError::Deserialization(format!(
                "object {} is invalid (mass {}, offset {})",
                i, obj.mass, obj.offset
            )));
        }
        if self.history.len() != self.objects.len() {
            return Err(SeesawError::Deserialization(format!(
                "{} history entries for {} objects",
                self.history.len(),
                self.objects.len()
            )));
        }
        Ok(())
    }

    /// Sum of all masses on the plank
    pub fn total_mass(&self) -> u64 {
        self.objects.iter().map(|o| o.mass as u64).sum()
    }
}
