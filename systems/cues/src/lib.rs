#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Audio cue system that translates world events into sound requests.
//!
//! Cues are fire-and-forget: the system never waits on playback and a sink
//! that fails to play a cue only logs the failure.

use snake_core::Event;
use tracing::trace;

/// Sound requested by the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    /// The snake ate food.
    Eat,
    /// The session ended.
    GameOver,
    /// The game was paused.
    Pause,
    /// The game resumed after a pause.
    Resume,
    /// The level increased.
    LevelUp,
}

impl Cue {
    /// Every cue, in a stable order.
    pub const ALL: [Cue; 5] = [
        Cue::Eat,
        Cue::GameOver,
        Cue::Pause,
        Cue::Resume,
        Cue::LevelUp,
    ];

    fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::FoodEaten { .. } => Some(Self::Eat),
            Event::GameOver { .. } => Some(Self::GameOver),
            Event::Paused => Some(Self::Pause),
            Event::Resumed { .. } => Some(Self::Resume),
            Event::LevelUp { .. } => Some(Self::LevelUp),
            _ => None,
        }
    }
}

/// Output device for cues.
pub trait AudioSink {
    /// Starts playback of the cue without blocking.
    fn play(&mut self, cue: Cue);
}

/// Sink that discards every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSink;

impl AudioSink for SilentSink {
    fn play(&mut self, cue: Cue) {
        trace!(?cue, "cue muted");
    }
}

/// Pure system mapping events onto cues.
#[derive(Debug, Default)]
pub struct Cues;

impl Cues {
    /// Creates the cue system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Pushes one cue per audible event, in event order.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Cue>) {
        out.extend(events.iter().filter_map(Cue::from_event));
    }
}
