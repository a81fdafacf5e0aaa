#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Snake engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

mod config;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use config::{ConfigError, GameConfig};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Snake.";

/// Lifecycle phase of a single game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// The board is set up and waiting for the first intent.
    #[default]
    NotStarted,
    /// Ticks advance the snake.
    Running,
    /// Ticks are suspended; all state is retained.
    Paused,
    /// Terminal phase reached after a collision or a filled board.
    GameOver,
}

impl GamePhase {
    /// Human readable label used by status displays.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Ready",
            Self::Running => "Playing",
            Self::Paused => "Paused",
            Self::GameOver => "Game Over",
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Advances the wall clock by the provided delta time.
    AdvanceTime {
        /// Duration of real time that elapsed since the previous frame.
        dt: Duration,
    },
    /// Advances the simulation by one discrete step.
    Tick,
    /// Requests that the snake turn towards the provided direction.
    ChangeDirection {
        /// Heading requested by the input layer.
        direction: Direction,
    },
    /// Starts the session without choosing a heading.
    Start,
    /// Flips between the running and paused phases.
    TogglePause,
    /// Discards the current session and restores the initial board.
    Restart,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the wall clock advanced.
    TimeAdvanced {
        /// Duration of real time that elapsed.
        dt: Duration,
    },
    /// Announces that the session left the not-started phase.
    GameStarted {
        /// Delay between ticks at the start of the session.
        interval: Duration,
    },
    /// Confirms that the snake adopted a new heading.
    DirectionChanged {
        /// Heading that is now active.
        direction: Direction,
    },
    /// Reports that a direction request was ignored.
    DirectionRejected {
        /// Heading that was requested.
        direction: Direction,
        /// Why the request was ignored.
        reason: DirectionRejection,
    },
    /// Confirms that the snake moved one cell.
    SnakeAdvanced {
        /// Cell occupied by the new head.
        head: CellCoord,
        /// Tail cell released by the move, `None` when the snake grew.
        vacated: Option<CellCoord>,
    },
    /// Reports a tick during which the snake had no heading and held position.
    SnakeHeld {
        /// Cell occupied by the stationary head.
        head: CellCoord,
    },
    /// Confirms that the snake consumed the food.
    FoodEaten {
        /// Cell the food occupied.
        cell: CellCoord,
        /// Score after the food was counted.
        score: u32,
    },
    /// Announces that a new piece of food was placed.
    FoodSpawned {
        /// Cell holding the food.
        cell: CellCoord,
    },
    /// Announces a score-driven speed increase.
    LevelUp {
        /// Level reached.
        level: u32,
        /// Delay between ticks from the next tick onwards.
        interval: Duration,
    },
    /// Announces that ticking was suspended.
    Paused,
    /// Announces that ticking resumed.
    Resumed {
        /// Delay until the next tick.
        interval: Duration,
    },
    /// Announces the end of the session.
    GameOver {
        /// What ended the session.
        cause: GameOverCause,
        /// Final score.
        score: u32,
    },
    /// Confirms that the board was restored to its initial state.
    Restarted,
}

impl Event {
    /// Reports whether the event changes anything a renderer displays.
    #[must_use]
    pub const fn requires_render(&self) -> bool {
        !matches!(
            self,
            Self::TimeAdvanced { .. } | Self::DirectionRejected { .. }
        )
    }
}

/// Reasons a direction request may be ignored by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectionRejection {
    /// The request would reverse a moving snake onto its own neck.
    Reversal,
}

/// What ended a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverCause {
    /// The head left the grid.
    Boundary,
    /// The head ran into the body.
    SelfCollision,
    /// The snake covers every cell, leaving no room for food.
    BoardFilled,
}

impl GameOverCause {
    /// Reports whether the session ended in the player's favour.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::BoardFilled)
    }
}

/// Orientation of a direction of travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left and right.
    Horizontal,
    /// Up and down.
    Vertical,
}

/// Cardinal movement directions available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// All directions in a stable order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit delta `(dx, dy)` with rows growing downwards.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Interprets a raw delta, rejecting anything that is not an axis unit.
    #[must_use]
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Self::Up),
            (0, 1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            _ => None,
        }
    }

    /// Direction pointing the other way along the same axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns true if turning from `self` to `other` would be a 180-degree turn.
    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Axis along which the direction travels.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Neighbouring cell in the provided direction.
    ///
    /// Returns `None` when the step would leave the unsigned coordinate space,
    /// which callers treat as leaving the grid. The upper bound is not checked
    /// here; see [`GridGeometry::contains`].
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (column, row) = match direction {
            Direction::Up => (Some(self.column), self.row.checked_sub(1)),
            Direction::Down => (Some(self.column), self.row.checked_add(1)),
            Direction::Left => (self.column.checked_sub(1), Some(self.row)),
            Direction::Right => (self.column.checked_add(1), Some(self.row)),
        };
        Some(Self::new(column?, row?))
    }
}

/// Pixel-space square covering one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelBounds {
    /// Horizontal center in pixels.
    pub center_x: f32,
    /// Vertical center in pixels.
    pub center_y: f32,
    /// Edge length in pixels.
    pub size: f32,
}

/// Describes the discrete cell layout of the playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridGeometry {
    columns: u32,
    rows: u32,
    cell_size: u32,
}

impl GridGeometry {
    /// Creates a grid description from explicit dimensions.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, cell_size: u32) -> Self {
        Self {
            columns,
            rows,
            cell_size,
        }
    }

    /// Derives the grid that fits inside a canvas of the provided pixel size.
    ///
    /// Partial cells along the right and bottom edges are discarded. A zero
    /// cell size yields an empty grid.
    #[must_use]
    pub const fn from_canvas(width_px: u32, height_px: u32, cell_size: u32) -> Self {
        if cell_size == 0 {
            return Self::new(0, 0, 0);
        }
        Self::new(width_px / cell_size, height_px / cell_size, cell_size)
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Edge length of a single cell in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Total number of cells.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Width of the playfield in pixels.
    #[must_use]
    pub const fn width_px(&self) -> u32 {
        self.columns * self.cell_size
    }

    /// Height of the playfield in pixels.
    #[must_use]
    pub const fn height_px(&self) -> u32 {
        self.rows * self.cell_size
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Cell where a fresh snake is placed.
    #[must_use]
    pub const fn center(&self) -> CellCoord {
        CellCoord::new(self.columns / 2, self.rows / 2)
    }

    /// Pixel bounds of the provided cell.
    #[must_use]
    pub fn cell_to_pixel_bounds(&self, cell: CellCoord) -> PixelBounds {
        let size = self.cell_size as f32;
        PixelBounds {
            center_x: cell.column() as f32 * size + size / 2.0,
            center_y: cell.row() as f32 * size + size / 2.0,
            size,
        }
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.columns;
        (0..self.rows)
            .flat_map(move |row| (0..columns).map(move |column| CellCoord::new(column, row)))
    }
}

/// Score-driven speed curve.
///
/// Level `L` ticks every `max(floor, initial - (L - 1) * step)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Progression {
    initial: Duration,
    step: Duration,
    floor: Duration,
    points_per_level: u32,
}

impl Progression {
    /// Creates a new progression curve.
    #[must_use]
    pub const fn new(
        initial: Duration,
        step: Duration,
        floor: Duration,
        points_per_level: u32,
    ) -> Self {
        Self {
            initial,
            step,
            floor,
            points_per_level,
        }
    }

    /// Tick interval for level one.
    #[must_use]
    pub const fn initial(&self) -> Duration {
        self.initial
    }

    /// Tick interval for the provided level.
    #[must_use]
    pub fn interval_for(&self, level: u32) -> Duration {
        let reduction = self.step.saturating_mul(level.saturating_sub(1));
        self.initial.saturating_sub(reduction).max(self.floor)
    }

    /// Reports whether reaching `score` triggers a level-up.
    #[must_use]
    pub const fn is_level_up(&self, score: u32) -> bool {
        self.points_per_level != 0 && score != 0 && score % self.points_per_level == 0
    }
}

/// Read-only snapshot of the snake used for queries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnakeView {
    cells: Vec<CellCoord>,
    heading: Option<Direction>,
}

impl SnakeView {
    /// Creates a view from head-first cells and the active heading.
    #[must_use]
    pub fn new(cells: Vec<CellCoord>, heading: Option<Direction>) -> Self {
        Self { cells, heading }
    }

    /// Head cell, if the view is not empty.
    #[must_use]
    pub fn head(&self) -> Option<CellCoord> {
        self.cells.first().copied()
    }

    /// Heading of the snake, `None` while stationary.
    #[must_use]
    pub const fn heading(&self) -> Option<Direction> {
        self.heading
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the view holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterator over the segments, head first.
    pub fn iter(&self) -> impl Iterator<Item = &CellCoord> {
        self.cells.iter()
    }

    /// Consumes the view, yielding the underlying cells.
    #[must_use]
    pub fn into_vec(self) -> Vec<CellCoord> {
        self.cells
    }
}

/// Scoreboard projection exposed to status displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HudSnapshot {
    /// Points collected in the current session.
    pub score: u32,
    /// Current level, starting at one.
    pub level: u32,
    /// Lifecycle phase.
    pub phase: GamePhase,
    /// Delay between ticks at the current level.
    pub interval: Duration,
}

/// Aggregated statistics across every session played by this process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionStats {
    /// Sessions that reached the running phase.
    pub games_played: u32,
    /// Highest score reached in any session.
    pub best_score: u32,
    /// Highest level reached in any session.
    pub best_level: u32,
    /// Food eaten across all sessions.
    pub foods_eaten: u64,
    /// Ticks processed while running, across all sessions.
    pub ticks_survived: u64,
    /// Cause of the most recent game over.
    pub last_cause: Option<GameOverCause>,
}
