//! Fire-and-forget handoff to an external animation driver.
//!
//! A translate with a transition does not move the element immediately.
//! Instead the diagram queues a [`TransitionRequest`] carrying the target
//! position and timing, and an external driver drains the queue and applies
//! interpolated positions on its own clock. The core never waits for
//! completion.

use serde::{Deserialize, Serialize};

use armature_core::geometry::Point;

use crate::diagram::CellId;

/// Timing function applied to the normalized progress of a transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// Timing parameters of a queued transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub duration_ms: u64,
    pub delay_ms: u64,
    pub easing: Easing,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            duration_ms: 100,
            delay_ms: 0,
            easing: Easing::Linear,
        }
    }
}

/// A queued request for the animation driver: move `cell` to `target`
/// with the given timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRequest {
    pub cell: CellId,
    pub target: Point,
    pub transition: Transition,
}

/// Interpolates between two composite `(x, y)` values at eased progress
/// `t`. This is the value function a driver applies each tick.
pub fn interpolate_point(from: Point, to: Point, t: f32) -> Point {
    Point::new(
        from.x() + (to.x() - from.x()) * t,
        from.y() + (to.y() - from.y()) * t,
    )
}
