#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Snake.
//!
//! The [`World`] owns the snake, the food, the scoreboard and the lifecycle
//! phase. Nothing outside this crate mutates them: adapters and systems submit
//! [`Command`] values to [`apply`] and observe the resulting [`Event`] stream
//! or read snapshots through [`query`].

mod food;
mod snake;

use std::time::Duration;

use snake_core::{
    CellCoord, Command, ConfigError, Direction, DirectionRejection, Event, GameConfig,
    GameOverCause, GamePhase, GridGeometry, Progression,
};
use tracing::{debug, info, trace};

pub use food::FoodSpawner;
pub use snake::Snake;

/// Represents the authoritative Snake world state.
#[derive(Debug)]
pub struct World {
    grid: GridGeometry,
    progression: Progression,
    spawner: FoodSpawner,
    snake: Snake,
    heading: Option<Direction>,
    food: Option<CellCoord>,
    score: u32,
    level: u32,
    interval: Duration,
    phase: GamePhase,
    tick_index: u64,
}

impl World {
    /// Creates a world from a validated configuration.
    ///
    /// Food placement is driven by `seed`; identical seeds and command
    /// sequences produce identical sessions.
    pub fn new(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = config.grid();
        let progression = config.progression();
        let mut world = Self {
            grid,
            progression,
            spawner: FoodSpawner::new(grid, seed),
            snake: Snake::new(grid.center()),
            heading: None,
            food: None,
            score: 0,
            level: 1,
            interval: progression.initial(),
            phase: GamePhase::NotStarted,
            tick_index: 0,
        };
        let _ = world.reset_session();
        debug!(
            columns = grid.columns(),
            rows = grid.rows(),
            seed,
            "world created"
        );
        Ok(world)
    }

    /// Restores the not-started baseline and returns the freshly placed food.
    fn reset_session(&mut self) -> Option<CellCoord> {
        self.snake = Snake::new(self.grid.center());
        self.heading = None;
        self.score = 0;
        self.level = 1;
        self.interval = self.progression.initial();
        self.phase = GamePhase::NotStarted;
        self.tick_index = 0;
        self.food = self.spawner.spawn(&self.snake.occupancy());
        self.food
    }

    fn change_direction(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if let Some(current) = self.heading {
            if current.is_opposite(direction) && self.snake.len() > 1 {
                trace!(?current, ?direction, "reversal rejected");
                out_events.push(Event::DirectionRejected {
                    direction,
                    reason: DirectionRejection::Reversal,
                });
                return;
            }
        }

        if self.heading != Some(direction) {
            self.heading = Some(direction);
            out_events.push(Event::DirectionChanged { direction });
        }

        if self.phase == GamePhase::NotStarted {
            self.begin(out_events);
        }
    }

    fn begin(&mut self, out_events: &mut Vec<Event>) {
        self.phase = GamePhase::Running;
        info!(interval_ms = self.interval.as_millis() as u64, "game started");
        out_events.push(Event::GameStarted {
            interval: self.interval,
        });
    }

    fn tick(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.tick_index = self.tick_index.saturating_add(1);

        let Some(direction) = self.heading else {
            out_events.push(Event::SnakeHeld {
                head: self.snake.head(),
            });
            return;
        };

        let grid = self.grid;
        let Some(next) = self
            .snake
            .next_head(direction)
            .filter(|cell| grid.contains(*cell))
        else {
            self.finish(GameOverCause::Boundary, out_events);
            return;
        };

        if self.snake.hits_body(next) {
            self.finish(GameOverCause::SelfCollision, out_events);
            return;
        }

        if self.food == Some(next) {
            self.eat(next, out_events);
            return;
        }

        let vacated = self.snake.advance(next);
        trace!(tick = self.tick_index, ?next, "snake advanced");
        out_events.push(Event::SnakeAdvanced {
            head: next,
            vacated,
        });
    }

    fn eat(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        self.snake.grow(cell);
        self.score = self.score.saturating_add(1);
        out_events.push(Event::SnakeAdvanced {
            head: cell,
            vacated: None,
        });
        out_events.push(Event::FoodEaten {
            cell,
            score: self.score,
        });
        debug!(score = self.score, length = self.snake.len(), "food eaten");

        self.food = self.spawner.spawn(&self.snake.occupancy());
        let Some(food) = self.food else {
            self.finish(GameOverCause::BoardFilled, out_events);
            return;
        };
        out_events.push(Event::FoodSpawned { cell: food });

        if self.progression.is_level_up(self.score) {
            self.level = self.level.saturating_add(1);
            self.interval = self.progression.interval_for(self.level);
            info!(
                level = self.level,
                interval_ms = self.interval.as_millis() as u64,
                "level up"
            );
            out_events.push(Event::LevelUp {
                level: self.level,
                interval: self.interval,
            });
        }
    }

    fn finish(&mut self, cause: GameOverCause, out_events: &mut Vec<Event>) {
        self.phase = GamePhase::GameOver;
        info!(?cause, score = self.score, level = self.level, "game over");
        out_events.push(Event::GameOver {
            cause,
            score: self.score,
        });
    }

    fn toggle_pause(&mut self, out_events: &mut Vec<Event>) {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                debug!("paused");
                out_events.push(Event::Paused);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                debug!("resumed");
                out_events.push(Event::Resumed {
                    interval: self.interval,
                });
            }
            GamePhase::NotStarted | GamePhase::GameOver => {}
        }
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        info!(previous = ?self.phase, "restarting");
        out_events.push(Event::Restarted);
        if let Some(cell) = self.reset_session() {
            out_events.push(Event::FoodSpawned { cell });
        }
    }

    /// Replaces the snake, heading and food with an explicit layout.
    ///
    /// Intended for tests that need a board state unreachable from the
    /// centre start within a few ticks. The phase is left untouched.
    ///
    /// # Panics
    ///
    /// Panics when `snake` is empty.
    #[cfg(any(test, feature = "scaffolding"))]
    pub fn arrange(
        &mut self,
        snake: &[CellCoord],
        heading: Option<Direction>,
        food: Option<CellCoord>,
    ) {
        self.snake =
            Snake::from_cells(snake.iter().copied()).expect("scaffolded snake needs a segment");
        self.heading = heading;
        self.food = food;
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::AdvanceTime { dt } => out_events.push(Event::TimeAdvanced { dt }),
        Command::Tick => world.tick(out_events),
        Command::ChangeDirection { direction } => world.change_direction(direction, out_events),
        Command::Start => {
            if world.phase == GamePhase::NotStarted {
                world.begin(out_events);
            }
        }
        Command::TogglePause => world.toggle_pause(out_events),
        Command::Restart => world.restart(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use snake_core::{CellCoord, Direction, GamePhase, GridGeometry, HudSnapshot, SnakeView};

    /// Provides read-only access to the world's grid definition.
    #[must_use]
    pub fn grid(world: &World) -> GridGeometry {
        world.grid
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Captures a read-only view of the snake.
    #[must_use]
    pub fn snake_view(world: &World) -> SnakeView {
        SnakeView::new(world.snake.cells().collect(), world.heading)
    }

    /// Heading of the snake, `None` while stationary.
    #[must_use]
    pub fn heading(world: &World) -> Option<Direction> {
        world.heading
    }

    /// Cell holding the food, if any is placed.
    #[must_use]
    pub fn food(world: &World) -> Option<CellCoord> {
        world.food
    }

    /// Delay between ticks at the current level.
    #[must_use]
    pub fn interval(world: &World) -> Duration {
        world.interval
    }

    /// Number of ticks processed while running in the current session.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Scoreboard projection for status displays.
    #[must_use]
    pub fn hud(world: &World) -> HudSnapshot {
        HudSnapshot {
            score: world.score,
            level: world.level,
            phase: world.phase,
            interval: world.interval,
        }
    }
}
