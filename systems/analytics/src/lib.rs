#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic analytics system that folds world events into session statistics.

use snake_core::{Event, SessionStats};
use tracing::debug;

/// Pure analytics system that tracks per-process session statistics.
#[derive(Debug, Default)]
pub struct Analytics {
    stats: SessionStats,
    current_level: u32,
    dirty: bool,
}

impl Analytics {
    /// Creates a new analytics system with zeroed statistics.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stats: SessionStats::default(),
            current_level: 1,
            dirty: false,
        }
    }

    /// Returns the statistics accumulated so far.
    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Consumes world events and updates the statistics.
    ///
    /// Returns the refreshed statistics when any event changed them, so
    /// callers only republish after a change.
    pub fn handle(&mut self, events: &[Event]) -> Option<SessionStats> {
        for event in events {
            self.observe(event);
        }

        if std::mem::take(&mut self.dirty) {
            Some(self.stats)
        } else {
            None
        }
    }

    fn observe(&mut self, event: &Event) {
        match event {
            Event::GameStarted { .. } => {
                self.stats.games_played = self.stats.games_played.saturating_add(1);
                self.current_level = 1;
                self.stats.best_level = self.stats.best_level.max(1);
            }
            Event::SnakeAdvanced { .. } | Event::SnakeHeld { .. } => {
                self.stats.ticks_survived = self.stats.ticks_survived.saturating_add(1);
            }
            Event::FoodEaten { score, .. } => {
                self.stats.foods_eaten = self.stats.foods_eaten.saturating_add(1);
                self.stats.best_score = self.stats.best_score.max(*score);
            }
            Event::LevelUp { level, .. } => {
                self.current_level = *level;
                self.stats.best_level = self.stats.best_level.max(*level);
            }
            Event::GameOver { cause, score } => {
                self.stats.best_score = self.stats.best_score.max(*score);
                self.stats.last_cause = Some(*cause);
                debug!(
                    ?cause,
                    score,
                    level = self.current_level,
                    games = self.stats.games_played,
                    "session recorded"
                );
            }
            Event::Restarted => self.current_level = 1,
            _ => return,
        }
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use snake_core::{CellCoord, Event};

    use super::Analytics;

    #[test]
    fn quiet_events_do_not_republish() {
        let mut analytics = Analytics::new();
        let published = analytics.handle(&[
            Event::TimeAdvanced {
                dt: Duration::from_millis(16),
            },
            Event::FoodSpawned {
                cell: CellCoord::new(1, 1),
            },
        ]);

        assert_eq!(published, None);
        assert_eq!(analytics.stats().games_played, 0);
    }

    #[test]
    fn dirty_flag_clears_after_publish() {
        let mut analytics = Analytics::new();
        let first = analytics.handle(&[Event::GameStarted {
            interval: Duration::from_millis(150),
        }]);
        assert!(first.is_some());
        assert_eq!(analytics.handle(&[]), None);
    }
}
