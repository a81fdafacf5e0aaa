//! Text drawing for the HUD strip and board overlays.
//!
//! All text layout lives here so the board renderer only deals with shapes.

use macroquad::{
    color::Color,
    shapes::draw_rectangle,
    text::{draw_text, measure_text},
};
use snake_core::{HudSnapshot, SessionStats};
use snake_rendering::Overlay;

const HUD_FONT_SIZE: u16 = 20;
const TITLE_FONT_SIZE: u16 = 40;
const HINT_FONT_SIZE: u16 = 20;

/// Screen-space rectangle the HUD and overlays are laid out in.
#[derive(Clone, Copy, Debug)]
pub(crate) struct UiFrame {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
}

/// Draws score, level, phase and best score along the top strip.
pub(crate) fn draw_hud(frame: UiFrame, hud: HudSnapshot, stats: SessionStats, color: Color) {
    let baseline = frame.y + frame.height * 0.5 + f32::from(HUD_FONT_SIZE) * 0.3;
    let left = format!(
        "Score: {}   Level: {}   {}",
        hud.score,
        hud.level,
        hud.phase.label()
    );
    draw_text(&left, frame.x + 8.0, baseline, f32::from(HUD_FONT_SIZE), color);

    let right = format!("Best: {}   Games: {}", stats.best_score, stats.games_played);
    let dimensions = measure_text(&right, None, HUD_FONT_SIZE, 1.0);
    draw_text(
        &right,
        frame.x + frame.width - dimensions.width - 8.0,
        baseline,
        f32::from(HUD_FONT_SIZE),
        color,
    );
}

/// Draws a veil over the board with the overlay's title and hint centred.
pub(crate) fn draw_overlay(frame: UiFrame, overlay: Overlay, veil: Color, text: Color) {
    draw_rectangle(frame.x, frame.y, frame.width, frame.height, veil);

    let center_y = frame.y + frame.height * 0.5;
    draw_centered(frame, overlay.title(), center_y, TITLE_FONT_SIZE, text);

    if let Overlay::GameOver { score, .. } = overlay {
        let line = format!("Final score: {score}");
        draw_centered(frame, &line, center_y + 36.0, HINT_FONT_SIZE, text);
        draw_centered(frame, overlay.hint(), center_y + 64.0, HINT_FONT_SIZE, text);
    } else {
        draw_centered(frame, overlay.hint(), center_y + 36.0, HINT_FONT_SIZE, text);
    }
}

fn draw_centered(frame: UiFrame, text: &str, baseline: f32, font_size: u16, color: Color) {
    let dimensions = measure_text(text, None, font_size, 1.0);
    let x = frame.x + (frame.width - dimensions.width) * 0.5;
    draw_text(text, x, baseline, f32::from(font_size), color);
}
