//! The seesaw engine
//!
//! Owns one [`SimulationState`] and the random source feeding it. All
//! operations run to completion synchronously; persistence is an explicit
//! hook ([`SeesawEngine::save`], [`SeesawEngine::clear_saved`]) the caller
//! invokes after a mutation.

use super::physics::{PhysicsResult, compute_physics};
use super::rng::{RandomSource, SeededSource};
use super::state::{HistoryEntry, PlacedObject, Side, SimulationState};
use crate::error::Result;
use crate::persistence::{self, KeyValueStore};

/// What a drop produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropOutcome {
    /// Metrics after the new object was added
    pub physics: PhysicsResult,
    /// Mass of the object just dropped (drives feedback tone)
    pub mass: u32,
    /// Side it landed on
    pub side: Side,
}

/// A single seesaw simulation
#[derive(Debug, Clone)]
pub struct SeesawEngine<R: RandomSource = SeededSource> {
    state: SimulationState,
    rng: R,
}

impl<R: RandomSource> SeesawEngine<R> {
    /// Start with an empty plank
    pub fn new(mut rng: R) -> Self {
        let state = SimulationState::fresh(&mut rng);
        Self { state, rng }
    }

    /// Resume the saved simulation, or start fresh if there is none
    ///
    /// Unreadable or malformed saves are discarded with a warning.
    pub fn initialize(store: &impl KeyValueStore, rng: R) -> Self {
        let mut engine = Self::new(rng);
        match persistence::load_state(store) {
            Ok(Some(state)) => {
                log::info!(
                    "Restored simulation ({} objects, next mass {}kg)",
                    state.objects.len(),
                    state.next_mass
                );
                engine.state = state;
            }
            Ok(None) => log::info!("No saved simulation, starting fresh"),
            Err(e) => log::warn!("Discarding saved simulation: {}", e),
        }
        engine
    }

    /// Drop the pending object at `offset` px from the plank center
    pub fn drop_at(&mut self, offset: f64) -> DropOutcome {
        let offset = if offset.is_finite() {
            offset
        } else {
            log::warn!("Non-finite drop offset {}, using plank center", offset);
            0.0
        };

        let mass = self.state.next_mass;
        let hue = self.rng.next_hue();
        self.state
            .objects
            .push(PlacedObject::new(mass, offset, hue));
        self.state.history.push(HistoryEntry::for_drop(mass, offset));
        self.state.next_mass = self.rng.next_mass();

        let physics = self.compute_physics();
        log::debug!(
            "Dropped {}kg at {:.1}px -> tilt {:.1}deg",
            mass,
            offset,
            physics.final_angle
        );

        DropOutcome {
            physics,
            mass,
            side: Side::of(offset),
        }
    }

    /// Current masses, torques and tilt
    pub fn compute_physics(&self) -> PhysicsResult {
        compute_physics(&self.state.objects)
    }

    /// Clear the plank and draw a new pending mass
    pub fn reset(&mut self) {
        self.state = SimulationState::fresh(&mut self.rng);
        log::info!("Simulation reset");
    }

    /// Encode the full state as a save blob
    pub fn serialize(&self) -> String {
        self.state.serialize()
    }

    /// Replace the state with a decoded blob
    ///
    /// On error the current state is left untouched.
    pub fn restore_from(&mut self, blob: &str) -> Result<()> {
        self.state = SimulationState::restore_from(blob)?;
        Ok(())
    }

    /// Persist the current state (best effort)
    pub fn save(&self, store: &mut impl KeyValueStore) {
        persistence::save_state(store, &self.state);
    }

    /// Forget the persisted state so the next `initialize` starts fresh
    pub fn clear_saved(&self, store: &mut impl KeyValueStore) {
        persistence::clear_state(store);
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn objects(&self) -> &[PlacedObject] {
        &self.state.objects
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.state.history
    }

    pub fn next_mass(&self) -> u32 {
        self.state.next_mass
    }
}

impl SeesawEngine<SeededSource> {
    /// Empty plank driven by a seeded PCG source
    pub fn seeded(seed: u64) -> Self {
        Self::new(SeededSource::seeded(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_MASS, MAX_TILT_DEG, MIN_MASS, STORAGE_KEY};
    use crate::error::SeesawError;
    use crate::persistence::MemoryStore;
    use crate::sim::rng::ScriptedSource;
    use proptest::prelude::*;

    fn scripted(masses: &[u32]) -> SeesawEngine<ScriptedSource> {
        SeesawEngine::new(ScriptedSource::new(masses.to_vec()))
    }

    #[test]
    fn test_drop_heavy_left_clamps() {
        let mut engine = scripted(&[5, 1]);
        assert_eq!(engine.next_mass(), 5);

        let out = engine.drop_at(-100.0);
        assert_eq!(out.mass, 5);
        assert_eq!(out.side, Side::Left);
        assert_eq!(out.physics.left_mass, 5.0);
        assert_eq!(out.physics.right_mass, 0.0);
        assert_eq!(out.physics.final_angle, -30.0);
    }

    #[test]
    fn test_drop_light_right() {
        let mut engine = scripted(&[3, 1]);
        let out = engine.drop_at(20.0);
        assert_eq!(out.physics.right_mass, 3.0);
        assert_eq!(out.physics.left_mass, 0.0);
        assert!((out.physics.final_angle - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_balanced_drops() {
        let mut engine = scripted(&[2, 2, 7]);
        engine.drop_at(-10.0);
        let out = engine.drop_at(10.0);
        assert_eq!(out.physics.left_torque, 20.0);
        assert_eq!(out.physics.right_torque, 20.0);
        assert_eq!(out.physics.final_angle, 0.0);
        assert_eq!(out.physics.left_mass, 2.0);
        assert_eq!(out.physics.right_mass, 2.0);
        assert_eq!(engine.next_mass(), 7);
    }

    #[test]
    fn test_drop_appends_object_and_history() {
        let mut engine =
            SeesawEngine::new(ScriptedSource::new(vec![4, 9]).with_hues(vec![90.0]));
        engine.drop_at(-55.6);

        assert_eq!(engine.objects().len(), 1);
        assert_eq!(engine.history().len(), 1);
        let obj = &engine.objects()[0];
        assert_eq!(obj.mass, 4);
        assert_eq!(obj.offset, -55.6);
        assert_eq!(obj.color, "hsl(90, 70%, 50%)");
        assert_eq!(
            engine.history()[0].as_str(),
            "4kg dropped on the left at 56px"
        );
        assert_eq!(engine.next_mass(), 9);
    }

    #[test]
    fn test_non_finite_offset_lands_at_center() {
        let mut engine = scripted(&[6, 2]);
        let out = engine.drop_at(f64::NAN);
        assert_eq!(out.side, Side::Right);
        assert_eq!(engine.objects()[0].offset, 0.0);
        assert!(SimulationState::restore_from(&engine.serialize()).is_ok());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut engine = scripted(&[3, 4, 5, 8]);
        engine.drop_at(10.0);
        engine.drop_at(-10.0);
        engine.reset();
        assert!(engine.objects().is_empty());
        assert!(engine.history().is_empty());
        assert_eq!(engine.next_mass(), 8);
        assert_eq!(engine.compute_physics(), PhysicsResult::default());
    }

    #[test]
    fn test_restore_failure_keeps_state() {
        let mut engine = scripted(&[3, 4]);
        engine.drop_at(15.0);
        let before = engine.state().clone();
        let err = engine.restore_from("not valid data").unwrap_err();
        assert!(matches!(err, SeesawError::Deserialization(_)));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_initialize_from_garbage_is_fresh() {
        let store = MemoryStore::new().with_entry(STORAGE_KEY, "not valid data");
        let engine = SeesawEngine::initialize(&store, ScriptedSource::new(vec![6]));
        assert!(engine.objects().is_empty());
        assert!(engine.history().is_empty());
        assert_eq!(engine.next_mass(), 6);
    }

    #[test]
    fn test_save_initialize_resumes() {
        let mut store = MemoryStore::new();
        let mut engine = SeesawEngine::seeded(11);
        engine.drop_at(-42.0);
        engine.drop_at(77.5);
        engine.save(&mut store);

        let resumed = SeesawEngine::initialize(&store, SeededSource::seeded(99));
        assert_eq!(resumed.state(), engine.state());
        assert_eq!(resumed.compute_physics(), engine.compute_physics());
    }

    #[test]
    fn test_reset_and_clear_saved_does_not_resurrect() {
        let mut store = MemoryStore::new();
        let mut engine = scripted(&[5, 5, 5]);
        engine.drop_at(30.0);
        engine.save(&mut store);

        engine.reset();
        engine.clear_saved(&mut store);

        let again = SeesawEngine::initialize(&store, ScriptedSource::new(vec![2]));
        assert!(again.objects().is_empty());
        assert_eq!(again.next_mass(), 2);
    }

    #[test]
    fn test_failed_save_keeps_mutation() {
        let mut store = MemoryStore::read_only();
        let mut engine = scripted(&[1, 2]);
        engine.drop_at(5.0);
        engine.save(&mut store);
        assert_eq!(engine.objects().len(), 1);
        assert!(!store.contains(STORAGE_KEY));
    }

    #[test]
    fn test_engines_are_independent() {
        let mut a = scripted(&[2]);
        let b = scripted(&[2]);
        a.drop_at(-5.0);
        assert_eq!(a.objects().len(), 1);
        assert!(b.objects().is_empty());
    }

    proptest! {
        #[test]
        fn prop_drops_preserve_invariants(
            seed in any::<u64>(),
            offsets in prop::collection::vec(-2000.0f64..2000.0, 1..40)
        ) {
            let mut engine = SeesawEngine::seeded(seed);
            let mut dropped = 0u64;

            for (i, &offset) in offsets.iter().enumerate() {
                let pending = engine.next_mass();
                let out = engine.drop_at(offset);
                dropped += pending as u64;

                prop_assert_eq!(out.mass, pending);
                prop_assert_eq!(engine.objects().len(), i + 1);
                prop_assert_eq!(engine.history().len(), i + 1);
                prop_assert!((MIN_MASS..=MAX_MASS).contains(&engine.next_mass()));
                prop_assert_eq!(out.physics.total_mass(), dropped as f64);
                prop_assert!(out.physics.final_angle.abs() <= MAX_TILT_DEG);
                prop_assert_eq!(engine.compute_physics(), out.physics);
            }
        }

        #[test]
        fn prop_round_trip(
            seed in any::<u64>(),
            offsets in prop::collection::vec(-1000.0f64..1000.0, 0..20)
        ) {
            let mut engine = SeesawEngine::seeded(seed);
            for &offset in &offsets {
                engine.drop_at(offset);
            }
            let mut other = SeesawEngine::seeded(seed ^ 1);
            other.restore_from(&engine.serialize()).unwrap();
            prop_assert_eq!(other.state(), engine.state());
        }

        #[test]
        fn prop_reset_always_fresh(seed in any::<u64>(), n in 0usize..10) {
            let mut engine = SeesawEngine::seeded(seed);
            for i in 0..n {
                engine.drop_at(i as f64 * 7.0 - 30.0);
            }
            engine.reset();
            prop_assert!(engine.objects().is_empty());
            prop_assert!(engine.history().is_empty());
            prop_assert!((MIN_MASS..=MAX_MASS).contains(&engine.next_mass()));
        }
    }
}
