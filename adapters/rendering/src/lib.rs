#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Snake adapters.

pub mod intent;

use anyhow::Result as AnyResult;
use glam::Vec2;
use snake_core::{
    CellCoord, Direction, GameOverCause, GamePhase, GridGeometry, HudSnapshot, SessionStats,
    SnakeView,
};
use snake_system_cues::Cue;
use std::time::Duration;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with its alpha scaled by `factor`.
    #[must_use]
    pub fn fade(self, factor: f32) -> Self {
        Self {
            alpha: self.alpha * factor.clamp(0.0, 1.0),
            ..self
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Colors used to draw each scene element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Grid line color.
    pub grid_lines: Color,
    /// Body segment color.
    pub body: Color,
    /// Head segment color.
    pub head: Color,
    /// Food color.
    pub food: Color,
    /// HUD and overlay text color.
    pub text: Color,
    /// Translucent veil drawn behind overlays.
    pub veil: Color,
    /// Swipe feedback trail color.
    pub swipe: Color,
}

impl Default for Palette {
    fn default() -> Self {
        let body = Color::from_rgb_u8(76, 175, 80);
        Self {
            grid_lines: Color::from_rgb_u8(40, 44, 52),
            body,
            head: body.lighten(0.35),
            food: Color::from_rgb_u8(229, 57, 53),
            text: Color::from_rgb_u8(236, 239, 241),
            veil: Color::new(0.0, 0.0, 0.0, 0.6),
            swipe: Color::from_rgb_u8(255, 235, 59),
        }
    }
}

/// Describes the cell grid in pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a cell in pixels.
    pub cell_size: f32,
}

impl GridPresentation {
    /// Creates a grid descriptor matching the world geometry.
    ///
    /// Returns an error when the geometry has no drawable cells.
    pub fn new(grid: GridGeometry) -> Result<Self, RenderingError> {
        if grid.cell_size() == 0 {
            return Err(RenderingError::ZeroCellSize);
        }
        if grid.columns() == 0 || grid.rows() == 0 {
            return Err(RenderingError::EmptyGrid {
                columns: grid.columns(),
                rows: grid.rows(),
            });
        }

        Ok(Self {
            columns: grid.columns(),
            rows: grid.rows(),
            cell_size: grid.cell_size() as f32,
        })
    }

    /// Width of the grid in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_size
    }

    /// Height of the grid in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    /// Pixel-space centre of the provided cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            (cell.column() as f32 + 0.5) * self.cell_size,
            (cell.row() as f32 + 0.5) * self.cell_size,
        )
    }

    /// Radius of a segment drawn inside a cell.
    #[must_use]
    pub fn segment_radius(&self) -> f32 {
        self.cell_size * 0.5
    }
}

/// Full-screen message drawn over the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    /// Shown before the first move.
    Welcome,
    /// Shown while paused.
    Paused,
    /// Shown after the session ended.
    GameOver {
        /// What ended the session.
        cause: GameOverCause,
        /// Final score.
        score: u32,
    },
}

impl Overlay {
    /// Chooses the overlay for the HUD state, if any.
    #[must_use]
    pub fn for_hud(hud: HudSnapshot, last_cause: Option<GameOverCause>) -> Option<Self> {
        match hud.phase {
            GamePhase::NotStarted => Some(Self::Welcome),
            GamePhase::Running => None,
            GamePhase::Paused => Some(Self::Paused),
            GamePhase::GameOver => Some(Self::GameOver {
                cause: last_cause.unwrap_or(GameOverCause::Boundary),
                score: hud.score,
            }),
        }
    }

    /// Headline text for the overlay.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Welcome => snake_core::WELCOME_BANNER,
            Self::Paused => "Paused",
            Self::GameOver { cause, .. } if cause.is_win() => "You win!",
            Self::GameOver { .. } => "Game Over",
        }
    }

    /// Instruction line shown under the title.
    #[must_use]
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Welcome => "Press an arrow key, swipe or Enter to start",
            Self::Paused => "Press Space to resume",
            Self::GameOver { .. } => "Press R to play again",
        }
    }
}

/// Transient trail drawn after a recognised swipe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeFeedback {
    /// Direction the swipe resolved to.
    pub direction: Direction,
    /// Pixel position where the swipe started.
    pub origin: Vec2,
    /// Time since the swipe was recognised.
    pub age: Duration,
}

impl SwipeFeedback {
    /// How long the trail stays visible.
    pub const LIFETIME: Duration = Duration::from_millis(300);

    /// Creates a fresh trail.
    #[must_use]
    pub const fn new(direction: Direction, origin: Vec2) -> Self {
        Self {
            direction,
            origin,
            age: Duration::ZERO,
        }
    }

    /// Ages the trail. Returns `false` once it has fully faded.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.age = self.age.saturating_add(dt);
        self.age < Self::LIFETIME
    }

    /// Opacity in the range 0.0..=1.0, fading linearly with age.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        1.0 - (self.age.as_secs_f32() / Self::LIFETIME.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Raw swipe gesture captured by an adapter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeGesture {
    /// Pixel position where the pointer went down.
    pub origin: Vec2,
    /// Pointer travel between press and release.
    pub delta: Vec2,
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Direction requested from the keyboard on this frame.
    pub direction: Option<Direction>,
    /// Swipe completed on this frame.
    pub swipe: Option<SwipeGesture>,
    /// Whether the pause toggle was pressed on this frame.
    pub pause_toggle: bool,
    /// Whether the start key was pressed on this frame.
    pub start: bool,
    /// Whether the restart key was pressed on this frame.
    pub restart: bool,
}

/// Scene description combining the board, the scoreboard and transient effects.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Grid that composes the play area.
    pub grid: GridPresentation,
    /// Snake cells head first, with the current heading.
    pub snake: SnakeView,
    /// Food cell, if placed.
    pub food: Option<CellCoord>,
    /// Scoreboard.
    pub hud: HudSnapshot,
    /// Statistics across sessions.
    pub stats: SessionStats,
    /// Message drawn over the board.
    pub overlay: Option<Overlay>,
    /// Swipe trail, while visible.
    pub swipe: Option<SwipeFeedback>,
    /// Cues raised since the previous frame. Backends drain this list.
    pub cues: Vec<Cue>,
}

impl Scene {
    /// Creates a new scene descriptor with no transient effects.
    #[must_use]
    pub fn new(
        grid: GridPresentation,
        snake: SnakeView,
        food: Option<CellCoord>,
        hud: HudSnapshot,
    ) -> Self {
        Self {
            grid,
            snake,
            food,
            hud,
            stats: SessionStats::default(),
            overlay: Overlay::for_hud(hud, None),
            swipe: None,
            cues: Vec::new(),
        }
    }

    /// Height reserved above the board for the HUD.
    pub const HUD_HEIGHT: f32 = 32.0;

    /// Height of the entire scene including the HUD strip.
    #[must_use]
    pub fn total_height(&self) -> f32 {
        self.grid.height() + Self::HUD_HEIGHT
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Colors for scene elements.
    pub palette: Palette,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor using the default palette.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            palette: Palette::default(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting Snake scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and mutates the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum RenderingError {
    /// Cells must have a positive side length.
    #[error("cell size must be positive")]
    ZeroCellSize,
    /// The grid must contain at least one cell.
    #[error("grid of {columns}x{rows} cells has nothing to draw")]
    EmptyGrid {
        /// Provided column count.
        columns: u32,
        /// Provided row count.
        rows: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridPresentation {
        GridPresentation::new(GridGeometry::new(20, 15, 20)).expect("valid grid")
    }

    #[test]
    fn grid_rejects_zero_cell_size() {
        let error = GridPresentation::new(GridGeometry::new(10, 10, 0))
            .expect_err("zero cell size must be rejected");
        assert_eq!(error, RenderingError::ZeroCellSize);
    }

    #[test]
    fn grid_rejects_empty_geometry() {
        let error = GridPresentation::new(GridGeometry::new(0, 4, 10))
            .expect_err("empty grid must be rejected");
        assert_eq!(
            error,
            RenderingError::EmptyGrid {
                columns: 0,
                rows: 4
            }
        );
    }

    #[test]
    fn cell_center_sits_mid_cell() {
        let grid = grid();
        assert_eq!(grid.width(), 400.0);
        assert_eq!(grid.height(), 300.0);
        assert_eq!(grid.cell_center(CellCoord::new(0, 0)), Vec2::new(10.0, 10.0));
        assert_eq!(grid.cell_center(CellCoord::new(3, 2)), Vec2::new(70.0, 50.0));
    }

    #[test]
    fn lighten_moves_towards_white() {
        let color = Color::from_rgb_u8(0, 0, 0).lighten(0.5);
        assert_eq!(color, Color::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(color.lighten(2.0), Color::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn overlay_tracks_phase() {
        let mut hud = HudSnapshot {
            score: 7,
            level: 2,
            phase: GamePhase::NotStarted,
            interval: Duration::from_millis(140),
        };
        assert_eq!(Overlay::for_hud(hud, None), Some(Overlay::Welcome));

        hud.phase = GamePhase::Running;
        assert_eq!(Overlay::for_hud(hud, None), None);

        hud.phase = GamePhase::GameOver;
        let overlay = Overlay::for_hud(hud, Some(GameOverCause::BoardFilled)).expect("overlay");
        assert_eq!(overlay.title(), "You win!");
        assert_eq!(
            overlay,
            Overlay::GameOver {
                cause: GameOverCause::BoardFilled,
                score: 7
            }
        );
    }

    #[test]
    fn swipe_feedback_fades_out() {
        let mut swipe = SwipeFeedback::new(Direction::Left, Vec2::new(5.0, 5.0));
        assert_eq!(swipe.opacity(), 1.0);

        assert!(swipe.advance(Duration::from_millis(150)));
        assert!((swipe.opacity() - 0.5).abs() < 1e-3);

        assert!(!swipe.advance(Duration::from_millis(150)));
        assert_eq!(swipe.opacity(), 0.0);
    }
}
