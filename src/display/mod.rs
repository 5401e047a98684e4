/// Rendering layer.
///
/// Each function receives the canvas and an immutable view of the game
/// state. No game logic is performed; this module only translates state
/// into pixels and text. `terminal::present` then pushes the canvas out.

pub mod canvas;
pub mod terminal;

use crate::entities::{AppState, Enemy, GameState, Player, Sprite};
use crate::image_cache::{ImageCache, ImageLoader};

pub use canvas::{Canvas, Font, Rgb, TextRun, BIG_FONT, SMALL_FONT};
pub use terminal::present;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_CLEAR: Rgb = canvas::BLACK;
const C_HUD_SCORE: Rgb = canvas::WHITE;
const C_PAUSED: Rgb = [0xFF, 0xE0, 0x40];
const C_HINT: Rgb = [0xA0, 0xA0, 0xA0];

// ── HUD layout ────────────────────────────────────────────────────────────────

const SCORE_MARGIN: i32 = 10;
const HEART_LEFT: i32 = 5;
/// Heart width plus gap.
const HEART_STEP: i32 = 15 + 10;

pub const PAUSED_TEXT: &str = "PAUSED";
pub const RESUME_HINT: &str = "START = Resume";

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw one complete frame into `canvas`.
pub fn render<L: ImageLoader>(canvas: &mut Canvas, state: &GameState, images: &ImageCache<L>) {
    canvas.clear(C_CLEAR);

    draw_sprite(canvas, images, &state.sprites.background, 0.0, 0.0);

    for enemy in &state.enemies {
        draw_enemy(canvas, images, enemy);
    }
    draw_player(canvas, images, &state.player);

    draw_hud(canvas, state, images);

    if state.status == AppState::Paused {
        draw_paused(canvas, state);
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<L: ImageLoader>(canvas: &mut Canvas, images: &ImageCache<L>, sprite: &Sprite, x: f32, y: f32) {
    // Null or stale handles draw nothing
    if let Some(image) = sprite.image.and_then(|h| images.get(h)) {
        canvas.draw_image(image, x.floor() as i32, y.floor() as i32);
    }
}

fn draw_player<L: ImageLoader>(canvas: &mut Canvas, images: &ImageCache<L>, player: &Player) {
    for beam in &player.beams {
        draw_sprite(canvas, images, &player.beam_sprite, beam.x, beam.y);
    }
    draw_sprite(canvas, images, &player.sprite, player.x, player.y);
}

fn draw_enemy<L: ImageLoader>(canvas: &mut Canvas, images: &ImageCache<L>, enemy: &Enemy) {
    draw_sprite(canvas, images, &enemy.sprite, enemy.x, enemy.y);
}

// ── HUD (top bar) ─────────────────────────────────────────────────────────────

fn draw_hud<L: ImageLoader>(canvas: &mut Canvas, state: &GameState, images: &ImageCache<L>) {
    canvas.set_font(BIG_FONT);

    // Score, right-aligned
    let score = state.score.to_string();
    let x = state.width as i32 - BIG_FONT.string_width(&score) as i32 - SCORE_MARGIN;
    canvas.draw_string(x, SCORE_MARGIN, &score, C_HUD_SCORE);

    // Lives, left-aligned
    for i in 0..state.player.hp as i32 {
        let x = HEART_LEFT + HEART_STEP * i;
        draw_sprite(canvas, images, &state.sprites.heart, x as f32, 0.0);
    }
}

// ── Pause overlay ─────────────────────────────────────────────────────────────

fn draw_paused(canvas: &mut Canvas, state: &GameState) {
    let w = state.width as i32;
    let cy = state.height as i32 / 2;

    canvas.set_font(BIG_FONT);
    let x = (w - BIG_FONT.string_width(PAUSED_TEXT) as i32) / 2;
    canvas.draw_string(x, cy - BIG_FONT.char_height as i32, PAUSED_TEXT, C_PAUSED);

    canvas.set_font(SMALL_FONT);
    let x = (w - SMALL_FONT.string_width(RESUME_HINT) as i32) / 2;
    canvas.draw_string(x, cy + 5, RESUME_HINT, C_HINT);
}
