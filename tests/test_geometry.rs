use approx::assert_abs_diff_eq;
use hungry_snake::constants::{BLOCK, BORDER, DART_SPEED, DART_SPREAD_DEG, WORLD_HEIGHT, WORLD_WIDTH};
use hungry_snake::entities::{Direction, Rect, Vec2};
use hungry_snake::geometry::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn angle_deg(v: &Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}

fn magnitude(v: &Vec2) -> f32 {
    v.x.hypot(v.y)
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn overlap_is_strict_on_shared_edges() {
    let a = Rect::square(0.0, 0.0, 20.0);
    let touching = Rect::square(20.0, 0.0, 20.0);
    let overlapping = Rect::square(19.0, 19.0, 20.0);
    assert!(!a.overlaps(&touching));
    assert!(a.overlaps(&overlapping));
    assert!(overlapping.overlaps(&a));
}

#[test]
fn inside_allows_touching_edges() {
    let area = play_area(BORDER);
    assert!(Rect::square(20.0, 20.0, 20.0).inside(&area));
    assert!(Rect::square(760.0, 760.0, 20.0).inside(&area));
    assert!(!Rect::square(761.0, 400.0, 20.0).inside(&area));
    assert!(!Rect::square(400.0, 0.0, 20.0).inside(&area));
}

#[test]
fn clamp_pulls_rect_back_on_screen() {
    let screen = world_rect();
    let r = Rect::square(-10.0, 790.0, 60.0).clamped_within(&screen);
    assert_eq!((r.x, r.y), (0.0, 740.0));

    let untouched = Rect::square(100.0, 100.0, 60.0).clamped_within(&screen);
    assert_eq!((untouched.x, untouched.y), (100.0, 100.0));
}

#[test]
fn center_of_square() {
    let c = Rect::square(400.0, 400.0, 20.0).center();
    assert_eq!((c.x, c.y), (410.0, 410.0));
}

// ── Direction ─────────────────────────────────────────────────────────────────

#[test]
fn opposite_is_an_involution() {
    for d in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
        assert_ne!(d.opposite(), d);
        assert_eq!(d.opposite().opposite(), d);
    }
}

// ── dart_vectors ──────────────────────────────────────────────────────────────

#[test]
fn single_dart_flies_straight() {
    let v = dart_vectors(Direction::Up, 1, DART_SPREAD_DEG);
    assert_eq!(v.len(), 1);
    assert_abs_diff_eq!(v[0].x, 0.0, epsilon = 1e-4);
    assert_abs_diff_eq!(v[0].y, -DART_SPEED, epsilon = 1e-4);

    let v = dart_vectors(Direction::Left, 1, DART_SPREAD_DEG);
    assert_abs_diff_eq!(v[0].x, -DART_SPEED, epsilon = 1e-4);
    assert_abs_diff_eq!(v[0].y, 0.0, epsilon = 1e-4);
}

#[test]
fn two_darts_split_half_spread() {
    let v = dart_vectors(Direction::Right, 2, DART_SPREAD_DEG);
    assert_eq!(v.len(), 2);
    assert_abs_diff_eq!(angle_deg(&v[0]), -7.5, epsilon = 1e-3);
    assert_abs_diff_eq!(angle_deg(&v[1]), 7.5, epsilon = 1e-3);
}

#[test]
fn three_darts_upward_fan() {
    let v = dart_vectors(Direction::Up, 3, DART_SPREAD_DEG);
    assert_eq!(v.len(), 3);
    assert_abs_diff_eq!(angle_deg(&v[0]), -105.0, epsilon = 1e-3);
    assert_abs_diff_eq!(angle_deg(&v[1]), -90.0, epsilon = 1e-3);
    assert_abs_diff_eq!(angle_deg(&v[2]), -75.0, epsilon = 1e-3);
    for vec in &v {
        assert_abs_diff_eq!(magnitude(vec), DART_SPEED, epsilon = 1e-3);
    }
}

#[test]
fn more_than_three_darts_is_treated_as_three() {
    let five = dart_vectors(Direction::Down, 5, DART_SPREAD_DEG);
    let three = dart_vectors(Direction::Down, 3, DART_SPREAD_DEG);
    assert_eq!(five, three);
}

// ── random_unoccupied_pos ─────────────────────────────────────────────────────

#[test]
fn spawn_is_grid_aligned_and_inside_border() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..300 {
        let p = random_unoccupied_pos(BLOCK, &[], BORDER, &mut rng);
        assert_eq!((p.x - BORDER) % BLOCK, 0.0);
        assert_eq!((p.y - BORDER) % BLOCK, 0.0);
        assert!(Rect::square(p.x, p.y, BLOCK).inside(&play_area(BORDER)));
    }
}

#[test]
fn spawn_avoids_occupied_regions() {
    let occupied: Vec<Rect> = (0..20)
        .map(|i| Rect::square(20.0 + i as f32 * 40.0, 400.0, BLOCK))
        .chain([Rect::square(200.0, 200.0, 200.0)])
        .collect();
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let p = random_unoccupied_pos(BLOCK, &occupied, BORDER, &mut rng);
        let placed = Rect::square(p.x, p.y, BLOCK);
        assert!(occupied.iter().all(|o| !placed.overlaps(o)), "seed {seed}");
    }
}

#[test]
fn spawn_falls_back_when_board_is_full() {
    let everything = [Rect {
        x: 0.0,
        y: 0.0,
        w: WORLD_WIDTH,
        h: WORLD_HEIGHT,
    }];
    let mut rng = StdRng::seed_from_u64(3);
    let p = random_unoccupied_pos(BLOCK, &everything, BORDER, &mut rng);
    assert!(Rect::square(p.x, p.y, BLOCK).inside(&play_area(BORDER)));
}
