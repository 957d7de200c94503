//! Torque balance
//!
//! The plank is in static equilibrium after every drop: the tilt is the net
//! torque scaled to degrees and held at the mechanical stop.

use serde::{Deserialize, Serialize};

use super::state::{PlacedObject, Side};
use crate::clamp_tilt;
use crate::consts::TORQUE_PER_DEGREE;

/// Derived metrics for the current plank load
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsResult {
    pub left_mass: f64,
    pub right_mass: f64,
    pub left_torque: f64,
    pub right_torque: f64,
    /// Plank tilt in degrees, within [-MAX_TILT_DEG, MAX_TILT_DEG]
    pub final_angle: f64,
}

impl PhysicsResult {
    pub fn total_mass(&self) -> f64 {
        self.left_mass + self.right_mass
    }

    /// Tilt before the mechanical stop is applied
    pub fn raw_angle(&self) -> f64 {
        (self.right_torque - self.left_torque) / TORQUE_PER_DEGREE
    }
}

/// Compute masses, torques and tilt for a set of objects
pub fn compute_physics(objects: &[PlacedObject]) -> PhysicsResult {
    let mut result = PhysicsResult::default();

    for obj in objects {
        let mass = obj.mass as f64;
        match obj.side() {
            Side::Left => {
                result.left_mass += mass;
                result.left_torque += obj.torque();
            }
            Side::Right => {
                result.right_mass += mass;
                result.right_torque += obj.torque();
            }
        }
    }

    result.final_angle = clamp_tilt(result.raw_angle());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_TILT_DEG;
    use proptest::prelude::*;

    fn obj(mass: u32, offset: f64) -> PlacedObject {
        PlacedObject::new(mass, offset, 0.0)
    }

    #[test]
    fn test_empty_plank_is_level() {
        let r = compute_physics(&[]);
        assert_eq!(r, PhysicsResult::default());
        assert_eq!(r.final_angle, 0.0);
    }

    #[test]
    fn test_heavy_left_clamps() {
        let r = compute_physics(&[obj(5, -100.0)]);
        assert_eq!(r.left_mass, 5.0);
        assert_eq!(r.right_mass, 0.0);
        assert_eq!(r.left_torque, 500.0);
        assert_eq!(r.raw_angle(), -50.0);
        assert_eq!(r.final_angle, -30.0);
    }

    #[test]
    fn test_light_right_tilts() {
        let r = compute_physics(&[obj(3, 20.0)]);
        assert_eq!(r.right_mass, 3.0);
        assert_eq!(r.left_mass, 0.0);
        assert!((r.final_angle - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_balanced() {
        let r = compute_physics(&[obj(2, -10.0), obj(2, 10.0)]);
        assert_eq!(r.left_torque, 20.0);
        assert_eq!(r.right_torque, 20.0);
        assert_eq!(r.final_angle, 0.0);
        assert_eq!(r.left_mass, 2.0);
        assert_eq!(r.right_mass, 2.0);
    }

    #[test]
    fn test_center_counts_as_right_without_torque() {
        let r = compute_physics(&[obj(8, 0.0)]);
        assert_eq!(r.right_mass, 8.0);
        assert_eq!(r.right_torque, 0.0);
        assert_eq!(r.final_angle, 0.0);
    }

    proptest! {
        #[test]
        fn prop_mass_conserved_and_angle_bounded(
            drops in prop::collection::vec((1u32..=10, -1.0e6f64..1.0e6), 0..64)
        ) {
            let objects: Vec<_> = drops.iter().map(|&(m, o)| obj(m, o)).collect();
            let r = compute_physics(&objects);
            let expected: u32 = drops.iter().map(|&(m, _)| m).sum();
            prop_assert_eq!(r.total_mass(), expected as f64);
            prop_assert!(r.final_angle >= -MAX_TILT_DEG && r.final_angle <= MAX_TILT_DEG);
        }

        #[test]
        fn prop_idempotent(
            drops in prop::collection::vec((1u32..=10, -500.0f64..500.0), 0..32)
        ) {
            let objects: Vec<_> = drops.iter().map(|&(m, o)| obj(m, o)).collect();
            let a = compute_physics(&objects);
            let b = compute_physics(&objects);
            prop_assert_eq!(a.final_angle.to_bits(), b.final_angle.to_bits());
            prop_assert_eq!(a, b);
        }
    }
}
