use hungry_snake::compute::init_state;
use hungry_snake::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn enums_compare_by_variant() {
    assert_eq!(Direction::Up, Direction::Up);
    assert_ne!(Direction::Up, Direction::Down);
    assert_eq!(Phase::BossFight, Phase::BossFight);
    assert_ne!(Phase::GameOver, Phase::Victory);
    assert_eq!(Intent::Steer(Direction::Left), Intent::Steer(Direction::Left));
    assert_ne!(Intent::Steer(Direction::Left), Intent::Steer(Direction::Right));
    assert_ne!(
        SoundEvent::SwitchTrack(Track::Normal),
        SoundEvent::SwitchTrack(Track::Boss)
    );
}

#[test]
fn phases_split_into_active_and_terminal() {
    for phase in [Phase::Playing, Phase::BossWarning, Phase::BossFight] {
        assert!(phase.is_active());
        assert!(!phase.is_terminal());
    }
    for phase in [Phase::GameOver, Phase::Victory] {
        assert!(phase.is_terminal());
    }
}

#[test]
fn snake_and_dart_rects_follow_position() {
    let s = init_state(0.0, &mut StdRng::seed_from_u64(1));
    assert_eq!(s.snake.rect(), Rect::square(400.0, 400.0, 20.0));

    let d = Dart {
        x: 12.5,
        y: -3.0,
        velocity: Vec2::default(),
        facing: Direction::Right,
    };
    assert_eq!(d.rect(), Rect::square(12.5, -3.0, 20.0));
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(0.0, &mut StdRng::seed_from_u64(1));
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.snake.x = 99.0;
    cloned.score = 999;
    cloned.world.bombs.push(Bomb {
        rect: Rect::square(40.0, 40.0, 20.0),
    });
    cloned.world.boss = None;
    cloned.sounds.clear();

    assert_eq!(original.snake.x, 400.0);
    assert_eq!(original.score, 0);
    assert!(original.world.bombs.is_empty());
    assert_eq!(original.sounds.len(), 1);
}
