//! Random sources for the simulation
//!
//! Everything random in a drop (the next mass, the object's hue) is drawn
//! through [`RandomSource`] so a run can be reproduced from a seed or
//! scripted outright.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{MAX_MASS, MIN_MASS};

/// Supplier of the two random quantities a drop needs
pub trait RandomSource {
    /// Mass for the next object, in [MIN_MASS, MAX_MASS]
    fn next_mass(&mut self) -> u32;
    /// Hue for a new object's color, in [0, 360)
    fn next_hue(&mut self) -> f64;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_mass(&mut self) -> u32 {
        (**self).next_mass()
    }

    fn next_hue(&mut self) -> f64 {
        (**self).next_hue()
    }
}

/// Uniform draws from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_mass(&mut self) -> u32 {
        self.rng.random_range(MIN_MASS..=MAX_MASS)
    }

    fn next_hue(&mut self) -> f64 {
        self.rng.random_range(0.0..360.0)
    }
}

/// Seeded PCG source (same seed, same run)
pub type SeededSource = RngSource<Pcg32>;

impl SeededSource {
    pub fn seeded(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }
}

/// Replays fixed sequences, cycling when exhausted
///
/// Masses outside [MIN_MASS, MAX_MASS] are clamped into range. An empty
/// sequence yields MIN_MASS / hue 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    masses: Vec<u32>,
    hues: Vec<f64>,
    mass_idx: usize,
    hue_idx: usize,
}

impl ScriptedSource {
    pub fn new(masses: impl Into<Vec<u32>>) -> Self {
        Self {
            masses: masses.into(),
            ..Default::default()
        }
    }

    pub fn with_hues(mut self, hues: impl Into<Vec<f64>>) -> Self {
        self.hues = hues.into();
        self
    }
}

impl RandomSource for ScriptedSource {
    fn next_mass(&mut self) -> u32 {
        if self.masses.is_empty() {
            return MIN_MASS;
        }
        let mass = self.masses[self.mass_idx % self.masses.len()];
        self.mass_idx += 1;
        mass.clamp(MIN_MASS, MAX_MASS)
    }

    fn next_hue(&mut self) -> f64 {
        if self.hues.is_empty() {
            return 0.0;
        }
        let hue = self.hues[self.hue_idx % self.hues.len()];
        self.hue_idx += 1;
        hue.rem_euclid(360.0)
    }
}
