/// Data carried from one frame to the next: player, enemies, sprites and
/// the play/pause status. Behaviour lives in `compute`.

use std::collections::VecDeque;

use crate::config::Tuning;
use crate::image_cache::ImageHandle;

/// Size used for a sprite whose image failed to load.
pub const PLACEHOLDER_SIZE: f32 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppState {
    Playing,
    Paused,
    /// Frozen: nothing ticks. No condition leads here yet.
    GameOver,
}

// ── Sprites ──────────────────────────────────────────────────────────────────

/// A cache handle plus the dimensions entities use for bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    /// `None` when the image failed to load; drawing skips it.
    pub image: Option<ImageHandle>,
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    pub fn placeholder() -> Self {
        Self {
            image: None,
            width: PLACEHOLDER_SIZE,
            height: PLACEHOLDER_SIZE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteSet {
    pub ship: Sprite,
    pub beam: Sprite,
    pub enemy: Sprite,
    pub background: Sprite,
    pub heart: Sprite,
}

impl SpriteSet {
    pub fn placeholders() -> Self {
        Self {
            ship: Sprite::placeholder(),
            beam: Sprite::placeholder(),
            enemy: Sprite::placeholder(),
            background: Sprite::placeholder(),
            heart: Sprite::placeholder(),
        }
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Beam {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
}

// ── Player & enemy ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub sprite: Sprite,
    pub beam_sprite: Sprite,
    pub beams: Vec<Beam>,
    pub hp: u32,
}

impl Player {
    pub fn width(&self) -> f32 {
        self.sprite.width
    }

    pub fn height(&self) -> f32 {
        self.sprite.height
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub sprite: Sprite,
}

impl Enemy {
    pub fn width(&self) -> f32 {
        self.sprite.width
    }

    pub fn height(&self) -> f32 {
        self.sprite.height
    }

    /// Fully past the left edge of the screen.
    pub fn is_offscreen(&self) -> bool {
        self.x + self.width() < 0.0
    }
}

// ── Master game state ────────────────────────────────────────────────────────

/// Everything a tick reads and writes. Cloneable so update functions can
/// return a fresh copy.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    /// Oldest spawn first.
    pub enemies: VecDeque<Enemy>,
    pub score: u32,
    pub status: AppState,
    pub frame: u64,
    pub width: u32,
    pub height: u32,
    pub sprites: SpriteSet,
    pub tuning: Tuning,
}
