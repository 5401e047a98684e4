/// Simulation step for the shooter.
///
/// Updates read the previous frame's `GameState` and build the next one.
/// The only state touched in place is the `Random` passed in, which keeps a
/// seeded run replayable.

use crate::config::Tuning;
use crate::entities::{AppState, Beam, Enemy, GameState, Player, SpriteSet};
use crate::input::{Buttons, PadState};
use crate::random::Random;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for the given screen and sprites.
pub fn init_state(width: u32, height: u32, sprites: SpriteSet, tuning: Tuning) -> GameState {
    GameState {
        player: Player {
            x: (width / 2) as f32,
            y: (height / 2) as f32,
            sprite: sprites.ship,
            beam_sprite: sprites.beam,
            beams: Vec::new(),
            hp: tuning.player_lives,
        },
        enemies: Default::default(),
        score: 0,
        status: AppState::Playing,
        frame: 0,
        width,
        height,
        sprites,
        tuning,
    }
}

// ── Entity updates ───────────────────────────────────────────────────────────

/// Move the player by the held D-pad, clamp to the screen, advance beams and
/// fire a new one on a fire press.
pub fn update_player(player: &Player, pad: &PadState, tuning: &Tuning, width: u32, height: u32) -> Player {
    let mut dx = 0.0;
    let mut dy = 0.0;
    if pad.held.contains(Buttons::LEFT) {
        dx -= tuning.player_speed;
    }
    if pad.held.contains(Buttons::RIGHT) {
        dx += tuning.player_speed;
    }
    if pad.held.contains(Buttons::UP) {
        dy -= tuning.player_speed;
    }
    if pad.held.contains(Buttons::DOWN) {
        dy += tuning.player_speed;
    }

    let max_x = (width as f32 - player.width()).max(0.0);
    let max_y = (height as f32 - player.height()).max(0.0);
    let x = (player.x + dx).clamp(0.0, max_x);
    let y = (player.y + dy).clamp(0.0, max_y);

    let mut beams: Vec<Beam> = player
        .beams
        .iter()
        .map(|b| Beam { x: b.x + b.dx, ..*b })
        .filter(|b| b.x <= width as f32)
        .collect();

    if pad.pressed.contains(Buttons::CROSS) && beams.len() < tuning.max_beams {
        beams.push(Beam {
            x: x + player.width(),
            y: y + (player.height() - player.beam_sprite.height) / 2.0,
            dx: tuning.beam_speed,
        });
    }

    Player {
        x,
        y,
        beams,
        ..player.clone()
    }
}

/// Straight-line motion, nothing else.
pub fn update_enemy(enemy: &Enemy) -> Enemy {
    Enemy {
        x: enemy.x + enemy.dx,
        y: enemy.y + enemy.dy,
        ..enemy.clone()
    }
}

/// Roll for a spawn; on success return an enemy just past the right edge
/// heading left.
///
/// Draw order is fixed (spawn roll, row, speed) so a seed always replays
/// the same wave.
pub fn maybe_spawn_enemy(state: &GameState, rng: &mut Random) -> Option<Enemy> {
    let tuning = &state.tuning;
    if !rng.bernoulli(tuning.enemy_spawn_rate) {
        return None;
    }

    let sprite = state.sprites.enemy;
    let max_y = (state.height as f32 - sprite.height).max(0.0) as u32;
    let y = rng.uniform_uint(0, max_y) as f32;
    let speed = rng.uniform_float(tuning.enemy_min_speed, tuning.enemy_max_speed);

    Some(Enemy {
        x: state.width as f32 + sprite.width,
        y,
        dx: -speed,
        dy: 0.0,
        sprite,
    })
}

// ── State machine ────────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
pub fn tick(state: &GameState, pad: &PadState, rng: &mut Random) -> GameState {
    match state.status {
        AppState::Playing => {
            if pad.pressed.contains(Buttons::START) {
                return GameState {
                    status: AppState::Paused,
                    ..state.clone()
                };
            }
            play(state, pad, rng)
        }
        AppState::Paused => {
            if pad.pressed.contains(Buttons::START) {
                GameState {
                    status: AppState::Playing,
                    ..state.clone()
                }
            } else {
                state.clone()
            }
        }
        AppState::GameOver => state.clone(),
    }
}

fn play(state: &GameState, pad: &PadState, rng: &mut Random) -> GameState {
    let mut next = state.clone();
    next.frame += 1;

    // ── 1. Player ────────────────────────────────────────────────────────────
    next.player = update_player(&state.player, pad, &state.tuning, state.width, state.height);

    // ── 2. Enemies: move, then cull anything fully past the left edge ────────
    next.enemies.retain_mut(|enemy| {
        *enemy = update_enemy(enemy);
        !enemy.is_offscreen()
    });

    // ── 3. Occasionally spawn ────────────────────────────────────────────────
    if let Some(enemy) = maybe_spawn_enemy(&next, rng) {
        next.enemies.push_back(enemy);
    }

    next
}
