#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick scheduling system that turns elapsed wall-clock time into tick commands.
//!
//! The scheduler owns the single periodic timer that drives the game. Lifecycle
//! events arm, replace or cancel it; `TimeAdvanced` events feed it. Because the
//! timer lives in an `Option`, replacing it is one assignment and two timers
//! can never run side by side.

use std::time::Duration;

use snake_core::{Command, Event};
use tracing::trace;

/// A live periodic timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickTimer {
    interval: Duration,
    elapsed: Duration,
}

impl TickTimer {
    /// Delay between ticks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Time accumulated toward the next tick.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Pure system that emits one [`Command::Tick`] per elapsed interval.
#[derive(Debug, Default)]
pub struct Scheduler {
    timer: Option<TickTimer>,
}

impl Scheduler {
    /// Creates a scheduler with no live timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a fresh timer, replacing any live one.
    ///
    /// A zero interval cancels instead, since it would tick without bound.
    pub fn schedule(&mut self, interval: Duration) {
        if interval.is_zero() {
            self.cancel();
            return;
        }

        trace!(interval_ms = interval.as_millis() as u64, "timer scheduled");
        self.timer = Some(TickTimer {
            interval,
            elapsed: Duration::ZERO,
        });
    }

    /// Stops the live timer. Cancelling a stopped timer does nothing.
    pub fn cancel(&mut self) {
        if self.timer.take().is_some() {
            trace!("timer cancelled");
        }
    }

    /// Returns the live timer, if any.
    #[must_use]
    pub fn timer(&self) -> Option<TickTimer> {
        self.timer
    }

    /// Reports whether a timer is live.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Consumes world events and emits at most one tick command.
    ///
    /// Callers feed the events produced by each emitted tick back into this
    /// method until it stays silent. Overdue ticks are therefore released one
    /// at a time, and each sees any reschedule caused by the previous one.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => {
                    if let Some(timer) = self.timer.as_mut() {
                        timer.elapsed = timer.elapsed.saturating_add(*dt);
                    }
                }
                Event::GameStarted { interval }
                | Event::Resumed { interval }
                | Event::LevelUp { interval, .. } => self.schedule(*interval),
                Event::Paused | Event::GameOver { .. } | Event::Restarted => self.cancel(),
                _ => {}
            }
        }

        if let Some(timer) = self.timer.as_mut() {
            if timer.elapsed >= timer.interval {
                timer.elapsed -= timer.interval;
                out.push(Command::Tick);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_idempotent() {
        let mut scheduler = Scheduler::new();
        scheduler.cancel();
        assert!(!scheduler.is_armed());

        scheduler.schedule(Duration::from_millis(100));
        scheduler.cancel();
        scheduler.cancel();
        assert!(!scheduler.is_armed());
    }

    #[test]
    fn zero_interval_disarms() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::from_millis(100));
        scheduler.schedule(Duration::ZERO);
        assert_eq!(scheduler.timer(), None);
    }

    #[test]
    fn schedule_replaces_live_timer() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::from_millis(100));
        let mut out = Vec::new();
        scheduler.handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_millis(60),
            }],
            &mut out,
        );

        scheduler.schedule(Duration::from_millis(80));

        let timer = scheduler.timer().expect("armed");
        assert_eq!(timer.interval(), Duration::from_millis(80));
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }
}
