//! Render output for the page
//!
//! Turns engine state into the strings the DOM layer writes: totals, tilt,
//! plank transform, object markers and the drop log. No DOM access here.

use crate::sim::{HistoryEntry, PhysicsResult, PlacedObject, RandomSource, SeesawEngine};

/// Marker base size (px)
pub const MARKER_BASE_PX: f64 = 22.0;
/// Extra marker size per kg (px)
pub const MARKER_PX_PER_KG: f64 = 2.5;

/// One object as drawn on the plank
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// CSS `left`
    pub left: String,
    /// Width and height (px)
    pub size_px: f64,
    pub color: String,
    pub label: String,
}

impl Marker {
    pub fn for_object(obj: &PlacedObject) -> Self {
        Self {
            left: format!("calc(50% + {}px)", obj.offset),
            size_px: MARKER_BASE_PX + obj.mass as f64 * MARKER_PX_PER_KG,
            color: obj.color.clone(),
            label: format!("{}kg", obj.mass),
        }
    }
}

/// Everything the page shows for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub left_total: String,
    pub right_total: String,
    pub tilt_angle: String,
    pub next_weight: String,
    /// CSS transform for the plank wrapper
    pub plank_transform: String,
    pub markers: Vec<Marker>,
    /// Log lines, newest first
    pub log: Vec<String>,
}

impl HudView {
    /// Build the view; `history_limit` of 0 shows the whole log
    pub fn build<R: RandomSource>(engine: &SeesawEngine<R>, history_limit: usize) -> Self {
        let physics = engine.compute_physics();
        Self::from_parts(
            &physics,
            engine.objects(),
            engine.history(),
            engine.next_mass(),
            history_limit,
        )
    }

    pub fn from_parts(
        physics: &PhysicsResult,
        objects: &[PlacedObject],
        history: &[HistoryEntry],
        next_mass: u32,
        history_limit: usize,
    ) -> Self {
        let take = if history_limit == 0 {
            history.len()
        } else {
            history_limit
        };

        Self {
            left_total: format!("{:.1}", physics.left_mass),
            right_total: format!("{:.1}", physics.right_mass),
            tilt_angle: format!("{:.1}", physics.final_angle),
            next_weight: next_mass.to_string(),
            plank_transform: plank_transform(physics.final_angle),
            markers: objects.iter().map(Marker::for_object).collect(),
            log: history
                .iter()
                .rev()
                .take(take)
                .map(|h| h.as_str().to_string())
                .collect(),
        }
    }
}

/// Rotate the plank about its own center
pub fn plank_transform(angle_deg: f64) -> String {
    format!("translate(-50%, -50%) rotate({}deg)", angle_deg)
}
