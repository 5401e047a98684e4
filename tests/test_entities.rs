use side_shooter::config::Tuning;
use side_shooter::entities::*;

fn enemy(x: f32, width: f32) -> Enemy {
    Enemy {
        x,
        y: 0.0,
        dx: -1.0,
        dy: 0.0,
        sprite: Sprite {
            image: None,
            width,
            height: 8.0,
        },
    }
}

#[test]
fn entity_clone_and_eq() {
    assert_eq!(AppState::Playing, AppState::Playing);
    assert_ne!(AppState::Playing, AppState::Paused);
    assert_ne!(AppState::Paused, AppState::GameOver);

    let e = enemy(10.0, 20.0);
    assert_eq!(e.clone(), e);
}

#[test]
fn placeholder_sprite_has_no_image_but_has_size() {
    let s = Sprite::placeholder();
    assert!(s.image.is_none());
    assert_eq!((s.width, s.height), (PLACEHOLDER_SIZE, PLACEHOLDER_SIZE));
    assert!(s.width > 0.0);
}

#[test]
fn enemy_dimensions_come_from_sprite() {
    let e = enemy(0.0, 28.0);
    assert_eq!(e.width(), 28.0);
    assert_eq!(e.height(), 8.0);
}

#[test]
fn offscreen_only_when_right_edge_is_past_zero() {
    assert!(!enemy(0.0, 28.0).is_offscreen());
    assert!(!enemy(-28.0, 28.0).is_offscreen());
    assert!(enemy(-28.5, 28.0).is_offscreen());
}

#[test]
fn game_state_clone_is_independent() {
    let sprites = SpriteSet::placeholders();
    let original = GameState {
        player: Player {
            x: 20.0,
            y: 16.0,
            sprite: sprites.ship,
            beam_sprite: sprites.beam,
            beams: Vec::new(),
            hp: 3,
        },
        enemies: Default::default(),
        score: 0,
        status: AppState::Playing,
        frame: 0,
        width: 480,
        height: 272,
        sprites,
        tuning: Tuning::default(),
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned.enemies.push_back(enemy(5.0, 5.0));

    assert_eq!(original.player.x, 20.0);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}
