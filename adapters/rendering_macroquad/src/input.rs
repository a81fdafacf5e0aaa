//! Pointer gesture tracking shared by mouse and touch input.

use glam::Vec2;
use snake_rendering::SwipeGesture;

/// Tracks a single pointer from press to release.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct SwipeTracker {
    origin: Option<Vec2>,
}

impl SwipeTracker {
    /// Records the pointer going down. A second press restarts the gesture.
    pub fn press(&mut self, position: Vec2) {
        self.origin = Some(position);
    }

    /// Records the pointer going up and returns the completed gesture.
    ///
    /// A release without a matching press yields nothing.
    pub fn release(&mut self, position: Vec2) -> Option<SwipeGesture> {
        let origin = self.origin.take()?;
        Some(SwipeGesture {
            origin,
            delta: position - origin,
        })
    }

    /// Drops a gesture in progress.
    pub fn cancel(&mut self) {
        self.origin = None;
    }

    /// Reports whether a gesture is in progress.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }
}
