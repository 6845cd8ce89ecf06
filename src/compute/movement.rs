use crate::constants::{BLOCK, SNAKE_MOVE_INTERVAL};
use crate::entities::{Direction, Rect, Snake, Vec2};
use crate::geometry::world_rect;

/// Accept `direction` unless it reverses the last committed move.
/// Returns whether the request was taken.
pub(super) fn steer(snake: &mut Snake, direction: Direction) -> bool {
    if snake.last_committed == Some(direction.opposite()) {
        return false;
    }
    snake.heading = Some(direction);
    snake.facing = direction;
    true
}

/// Step one grid cell along the heading once the tick interval has passed.
/// The tick timestamp advances even while the snake is stationary.
pub(super) fn advance_snake(snake: &mut Snake, now: f64) {
    if now - snake.last_move_time <= SNAKE_MOVE_INTERVAL {
        return;
    }
    if let Some(direction) = snake.heading {
        let (dx, dy) = direction.step();
        snake.x += dx * BLOCK;
        snake.y += dy * BLOCK;
        snake.last_committed = Some(direction);
    }
    snake.last_move_time = now;
}

/// Greedy four-way pursuit: each axis closes by `speed` independently, so a
/// diagonal approach is faster than a straight one.
pub(super) fn pursue(rect: &mut Rect, speed: f32, target: Vec2) {
    let center = rect.center();
    if target.x > center.x {
        rect.x += speed;
    } else if target.x < center.x {
        rect.x -= speed;
    }
    if target.y > center.y {
        rect.y += speed;
    } else if target.y < center.y {
        rect.y -= speed;
    }
}

/// Pursuit for the boss, which must stay fully on screen.
pub(super) fn pursue_on_screen(rect: &mut Rect, speed: f32, target: Vec2) {
    pursue(rect, speed, target);
    *rect = rect.clamped_within(&world_rect());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake() -> Snake {
        Snake {
            x: 400.0,
            y: 400.0,
            size: BLOCK,
            heading: None,
            last_committed: None,
            facing: Direction::Up,
            last_move_time: 0.0,
        }
    }

    #[test]
    fn stationary_snake_accepts_any_direction() {
        let mut s = snake();
        assert!(steer(&mut s, Direction::Down));
        assert_eq!(s.heading, Some(Direction::Down));
        assert_eq!(s.facing, Direction::Down);
    }

    #[test]
    fn reversal_of_committed_move_is_dropped() {
        let mut s = snake();
        steer(&mut s, Direction::Left);
        advance_snake(&mut s, 1.0);
        assert!(!steer(&mut s, Direction::Right));
        assert_eq!(s.heading, Some(Direction::Left));
        assert_eq!(s.facing, Direction::Left);
    }

    #[test]
    fn no_move_inside_interval() {
        let mut s = snake();
        steer(&mut s, Direction::Right);
        advance_snake(&mut s, SNAKE_MOVE_INTERVAL);
        assert_eq!(s.x, 400.0);
        assert_eq!(s.last_committed, None);
    }

    #[test]
    fn pursue_moves_both_axes() {
        let mut r = Rect::square(100.0, 100.0, BLOCK);
        pursue(&mut r, 2.0, Vec2 { x: 300.0, y: 0.0 });
        assert_eq!((r.x, r.y), (102.0, 98.0));
    }

    #[test]
    fn pursue_holds_axis_when_aligned() {
        let mut r = Rect::square(100.0, 100.0, BLOCK);
        pursue(&mut r, 2.0, Vec2 { x: 110.0, y: 500.0 });
        assert_eq!((r.x, r.y), (100.0, 102.0));
    }
}
