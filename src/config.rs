/// Runtime configuration: screen geometry, gameplay tuning, timing and
/// where the assets live.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

// ── Fixed console geometry ───────────────────────────────────────────────────

pub const SCREEN_WIDTH: u32 = 480;
pub const SCREEN_HEIGHT: u32 = 272;

// ── Asset paths (relative to the base directory) ─────────────────────────────

pub const SHIP_IMAGE: &str = "img/ship.png";
pub const BEAM_IMAGE: &str = "img/beam.png";
pub const BACKGROUND_IMAGE: &str = "img/bg.png";
pub const HEART_IMAGE: &str = "img/heart.png";
pub const ENEMY_IMAGE: &str = "img/enemy1.png";

/// Overrides the time-based RNG seed.
pub const SEED_ENV: &str = "SHOOTER_SEED";
/// Overrides the base directory derived from `argv[0]`.
pub const ASSETS_ENV: &str = "SHOOTER_ASSETS";

/// Gameplay numbers. Speeds are in pixels per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tuning {
    /// Per-tick probability of spawning an enemy.
    pub enemy_spawn_rate: f64,
    pub enemy_min_speed: f32,
    pub enemy_max_speed: f32,
    pub player_speed: f32,
    pub player_lives: u32,
    pub beam_speed: f32,
    /// Cap on simultaneously active player beams.
    pub max_beams: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            enemy_spawn_rate: 0.02,
            enemy_min_speed: 1.0,
            enemy_max_speed: 3.0,
            player_speed: 3.0,
            player_lives: 3,
            beam_speed: 8.0,
            max_beams: 3,
        }
    }
}

/// D-pad autorepeat: a held direction re-fires its press edge after
/// `delay` frames, then every `interval` frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Autorepeat {
    pub delay: u32,
    pub interval: u32,
}

impl Default for Autorepeat {
    fn default() -> Self {
        Self {
            delay: 40,
            interval: 10,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub screen_width: u32,
    pub screen_height: u32,
    pub asset_dir: PathBuf,
    pub seed: u64,
    pub frames_per_second: u32,
    /// Consecutive draws the frame clock may skip before it resyncs.
    pub max_frameskip: u32,
    pub autorepeat: Autorepeat,
    pub tuning: Tuning,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            asset_dir: PathBuf::from("."),
            seed: 0,
            frames_per_second: 60,
            max_frameskip: 4,
            autorepeat: Autorepeat::default(),
            tuning: Tuning::default(),
        }
    }
}

impl Config {
    /// Build the runtime configuration from `argv[0]` and the environment.
    pub fn from_env(argv0: Option<&str>) -> Self {
        let asset_dir = std::env::var(ASSETS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| base_dir(argv0));

        let seed = match std::env::var(SEED_ENV) {
            Ok(raw) => match raw.trim().parse() {
                Ok(seed) => seed,
                Err(_) => {
                    log::warn!("ignoring unparsable {SEED_ENV}={raw:?}");
                    clock_seed()
                }
            },
            Err(_) => clock_seed(),
        };

        Self {
            asset_dir,
            seed,
            ..Self::default()
        }
    }
}

/// Directory portion of the executable path, `.` when there is none.
pub fn base_dir(argv0: Option<&str>) -> PathBuf {
    argv0
        .map(Path::new)
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
