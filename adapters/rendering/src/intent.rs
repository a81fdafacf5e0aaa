//! Translation of raw pointer gestures into directional intents.

use glam::Vec2;
use snake_core::Direction;

/// Minimum pointer travel, in pixels, for a gesture to count as a swipe.
pub const SWIPE_THRESHOLD: f32 = 30.0;

/// Resolves a swipe vector to the direction of its dominant axis.
///
/// Screen coordinates grow downwards, matching row indices. Short or
/// diagonal-tie gestures resolve to `None`.
#[must_use]
pub fn swipe_direction(delta: Vec2, threshold: f32) -> Option<Direction> {
    if !delta.is_finite() || delta.length() < threshold {
        return None;
    }

    let horizontal = delta.x.abs();
    let vertical = delta.y.abs();
    if horizontal > vertical {
        Direction::from_delta(delta.x.signum() as i32, 0)
    } else if vertical > horizontal {
        Direction::from_delta(0, delta.y.signum() as i32)
    } else {
        None
    }
}

/// Drops intents along the axis the snake already travels.
///
/// A stationary snake accepts every direction. The world still guards
/// reversals on its own; this only keeps redundant presses out of the
/// command stream.
#[must_use]
pub fn filter_axis(heading: Option<Direction>, requested: Direction) -> Option<Direction> {
    match heading {
        Some(current) if current.axis() == requested.axis() => None,
        _ => Some(requested),
    }
}
