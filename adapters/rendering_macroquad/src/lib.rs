#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Snake.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! The adapter therefore depends on macroquad without its default features
//! and only re-enables `macroquad/audio` behind this crate's `audio`
//! feature. Without it, cues are written to the log.

mod audio;
mod input;
pub mod tone;
mod ui;

use self::ui::{draw_hud, draw_overlay, UiFrame};
use anyhow::Result;
use glam::Vec2;
use macroquad::{
    color::{BLACK, WHITE},
    input::{
        is_key_pressed, is_mouse_button_pressed, is_mouse_button_released, mouse_position,
        KeyCode, MouseButton,
    },
    shapes::{draw_circle, draw_line},
};
use snake_core::{CellCoord, Direction};
use snake_rendering::{
    Color, FrameInput, GridPresentation, Palette, Presentation, RenderingBackend, Scene,
    SwipeFeedback,
};
use snake_system_cues::{AudioSink, SilentSink};
use std::time::Duration;
use tracing::{info, warn};

pub use self::input::SwipeTracker;

const DIRECTION_KEYS: [(KeyCode, Direction); 8] = [
    (KeyCode::Up, Direction::Up),
    (KeyCode::W, Direction::Up),
    (KeyCode::Down, Direction::Down),
    (KeyCode::S, Direction::Down),
    (KeyCode::Left, Direction::Left),
    (KeyCode::A, Direction::Left),
    (KeyCode::Right, Direction::Right),
    (KeyCode::D, Direction::Right),
];

/// Maps a key to the direction it steers, if any.
#[must_use]
pub fn direction_for_key(key: KeyCode) -> Option<Direction> {
    DIRECTION_KEYS
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, direction)| *direction)
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// `Space` or `P` toggles pause.
    pause_toggle: bool,
    /// `Enter` starts a session without choosing a direction.
    start: bool,
    /// `R` restarts the session.
    restart: bool,
    /// First direction key pressed this frame.
    direction: Option<Direction>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let direction = DIRECTION_KEYS
            .iter()
            .find(|(key, _)| is_key_pressed(*key))
            .map(|(_, direction)| *direction);

        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
            pause_toggle: is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::P),
            start: is_key_pressed(KeyCode::Enter),
            restart: is_key_pressed(KeyCode::R),
            direction,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    audio: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            audio: true,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs the frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures whether cues are audible. Muted cues are discarded.
    #[must_use]
    pub fn with_audio(mut self, enabled: bool) -> Self {
        self.audio = enabled;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average rate once a second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            audio,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            palette,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.grid.width().round() as i32,
            window_height: scene.total_height().round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut sink = open_sink(audio).await;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut swipe_tracker = SwipeTracker::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    info!("quit requested");
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let metrics_before = SceneMetrics::from_scene(&scene, screen_width, screen_height);
                let frame_input = gather_frame_input(&metrics_before, &mut swipe_tracker, keyboard);

                update_scene(frame_dt, frame_input, &mut scene);

                for cue in scene.cues.drain(..) {
                    sink.play(cue);
                }

                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);
                draw_scene(&scene, &metrics, &palette);

                if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                    if show_fps {
                        info!(fps = format_args!("{per_second:.2}"), "frame rate");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

async fn open_sink(enabled: bool) -> Box<dyn AudioSink> {
    if !enabled {
        return Box::new(SilentSink);
    }
    match open_tones().await {
        Some(sink) => sink,
        None => Box::new(audio::LoggingSink),
    }
}

#[cfg(feature = "audio")]
async fn open_tones() -> Option<Box<dyn AudioSink>> {
    match audio::ToneSink::load().await {
        Ok(sink) => Some(Box::new(sink)),
        Err(error) => {
            warn!(error = %format!("{error:#}"), "audio unavailable, logging cues instead");
            None
        }
    }
}

#[cfg(not(feature = "audio"))]
async fn open_tones() -> Option<Box<dyn AudioSink>> {
    warn!("built without the `audio` feature, logging cues instead");
    None
}

/// Maps between screen pixels and scene units.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset: Vec2,
    board_origin: Vec2,
    board_size: Vec2,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let scene_width = scene.grid.width();
        let scene_height = scene.total_height();
        let scale = if scene_width <= f32::EPSILON || scene_height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / scene_width).min(screen_height / scene_height)
        };

        let offset = Vec2::new(
            ((screen_width - scene_width * scale) * 0.5).max(0.0),
            ((screen_height - scene_height * scale) * 0.5).max(0.0),
        );
        let board_origin = offset + Vec2::new(0.0, Scene::HUD_HEIGHT * scale);
        let board_size = Vec2::new(scene_width, scene.grid.height()) * scale;

        Self {
            scale,
            offset,
            board_origin,
            board_size,
        }
    }

    fn to_screen(&self, board_point: Vec2) -> Vec2 {
        self.board_origin + board_point * self.scale
    }

    fn to_board(&self, screen_point: Vec2) -> Vec2 {
        (screen_point - self.board_origin) / self.scale
    }

    fn hud_frame(&self) -> UiFrame {
        UiFrame {
            x: self.offset.x,
            y: self.offset.y,
            width: self.board_size.x,
            height: Scene::HUD_HEIGHT * self.scale,
        }
    }

    fn board_frame(&self) -> UiFrame {
        UiFrame {
            x: self.board_origin.x,
            y: self.board_origin.y,
            width: self.board_size.x,
            height: self.board_size.y,
        }
    }
}

fn gather_frame_input(
    metrics: &SceneMetrics,
    swipe_tracker: &mut SwipeTracker,
    keyboard: KeyboardShortcuts,
) -> FrameInput {
    // Macroquad mirrors the first touch onto the left mouse button.
    let (cursor_x, cursor_y) = mouse_position();
    let cursor = metrics.to_board(Vec2::new(cursor_x, cursor_y));
    if is_mouse_button_pressed(MouseButton::Left) {
        swipe_tracker.press(cursor);
    }
    let swipe = if is_mouse_button_released(MouseButton::Left) {
        swipe_tracker.release(cursor)
    } else {
        None
    };

    FrameInput {
        direction: keyboard.direction,
        swipe,
        pause_toggle: keyboard.pause_toggle,
        start: keyboard.start,
        restart: keyboard.restart,
    }
}

fn draw_scene(scene: &Scene, metrics: &SceneMetrics, palette: &Palette) {
    draw_grid_lines(&scene.grid, metrics, to_macroquad_color(palette.grid_lines));

    if let Some(food) = scene.food {
        let center = metrics.to_screen(scene.grid.cell_center(food));
        let radius = scene.grid.segment_radius() * 0.7 * metrics.scale;
        draw_circle(center.x, center.y, radius, to_macroquad_color(palette.food));
    }

    draw_snake(scene, metrics, palette);

    if let Some(swipe) = scene.swipe {
        draw_swipe(swipe, metrics, palette.swipe);
    }

    draw_hud(
        metrics.hud_frame(),
        scene.hud,
        scene.stats,
        to_macroquad_color(palette.text),
    );

    if let Some(overlay) = scene.overlay {
        draw_overlay(
            metrics.board_frame(),
            overlay,
            to_macroquad_color(palette.veil),
            to_macroquad_color(palette.text),
        );
    }
}

fn draw_grid_lines(grid: &GridPresentation, metrics: &SceneMetrics, color: macroquad::color::Color) {
    let top = metrics.board_origin.y;
    let bottom = top + metrics.board_size.y;
    let left = metrics.board_origin.x;
    let right = left + metrics.board_size.x;
    let step = grid.cell_size * metrics.scale;

    for column in 0..=grid.columns {
        let x = left + column as f32 * step;
        draw_line(x, top, x, bottom, 1.0, color);
    }
    for row in 0..=grid.rows {
        let y = top + row as f32 * step;
        draw_line(left, y, right, y, 1.0, color);
    }
}

fn draw_snake(scene: &Scene, metrics: &SceneMetrics, palette: &Palette) {
    if scene.snake.is_empty() {
        return;
    }
    let radius = scene.grid.segment_radius() * 0.9 * metrics.scale;
    let body = to_macroquad_color(palette.body);

    // Tail first so the head is drawn on top.
    let cells: Vec<CellCoord> = scene.snake.iter().copied().collect();
    for cell in cells.iter().skip(1).rev() {
        let center = metrics.to_screen(scene.grid.cell_center(*cell));
        draw_circle(center.x, center.y, radius, body);
    }

    if let Some(head) = scene.snake.head() {
        let center = metrics.to_screen(scene.grid.cell_center(head));
        draw_circle(center.x, center.y, radius, to_macroquad_color(palette.head));
        draw_eyes(center, radius, scene.snake.heading());
    }
}

fn draw_eyes(center: Vec2, radius: f32, heading: Option<Direction>) {
    let (dx, dy) = heading.unwrap_or(Direction::Right).delta();
    let forward = Vec2::new(dx as f32, dy as f32);
    let side = forward.perp();

    for sign in [-1.0, 1.0] {
        let eye = center + forward * radius * 0.35 + side * radius * 0.4 * sign;
        draw_circle(eye.x, eye.y, radius * 0.2, WHITE);
        let pupil = eye + forward * radius * 0.07;
        draw_circle(pupil.x, pupil.y, radius * 0.1, BLACK);
    }
}

fn draw_swipe(swipe: SwipeFeedback, metrics: &SceneMetrics, color: Color) {
    let color = to_macroquad_color(color.fade(swipe.opacity()));
    let (dx, dy) = swipe.direction.delta();
    let start = metrics.to_screen(swipe.origin);
    let end = start + Vec2::new(dx as f32, dy as f32) * 60.0 * metrics.scale;

    draw_line(start.x, start.y, end.x, end.y, 4.0 * metrics.scale, color);
    draw_circle(start.x, start.y, 6.0 * metrics.scale, color);
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
