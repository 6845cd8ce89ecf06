/// Rectangle maths, grid spawning and volley vectors.

use rand::Rng;
use tracing::debug;

use crate::constants::{BLOCK, DART_SPEED, SPAWN_ATTEMPTS, WORLD_HEIGHT, WORLD_WIDTH};
use crate::entities::{Direction, Rect, Vec2};

// ── Rect ──────────────────────────────────────────────────────────────────────

impl Rect {
    pub fn square(x: f32, y: f32, side: f32) -> Self {
        Rect { x, y, w: side, h: side }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2 {
            x: self.x + self.w / 2.0,
            y: self.y + self.h / 2.0,
        }
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// True if `self` lies entirely inside `bounds` (edges may touch).
    pub fn inside(&self, bounds: &Rect) -> bool {
        bounds.x <= self.x
            && self.right() <= bounds.right()
            && bounds.y <= self.y
            && self.bottom() <= bounds.bottom()
    }

    /// Shift the rectangle the minimum distance needed to fit in `bounds`.
    pub fn clamped_within(&self, bounds: &Rect) -> Rect {
        let clamp_axis = |pos: f32, len: f32, lo: f32, hi: f32| {
            if len >= hi - lo {
                lo
            } else {
                pos.max(lo).min(hi - len)
            }
        };
        Rect {
            x: clamp_axis(self.x, self.w, bounds.x, bounds.right()),
            y: clamp_axis(self.y, self.h, bounds.y, bounds.bottom()),
            ..*self
        }
    }
}

/// The full screen, used for clamping the boss and culling darts.
pub fn world_rect() -> Rect {
    Rect {
        x: 0.0,
        y: 0.0,
        w: WORLD_WIDTH,
        h: WORLD_HEIGHT,
    }
}

/// The area inside a border of thickness `border`.
pub fn play_area(border: f32) -> Rect {
    Rect {
        x: border,
        y: border,
        w: WORLD_WIDTH - 2.0 * border,
        h: WORLD_HEIGHT - 2.0 * border,
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Grid step for one movement tick.
    pub fn step(self) -> (f32, f32) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }

    /// Screen-space angle in degrees (Y grows downward, so UP is −90°).
    pub fn angle_deg(self) -> f32 {
        match self {
            Direction::Up => -90.0,
            Direction::Down => 90.0,
            Direction::Left => 180.0,
            Direction::Right => 0.0,
        }
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Pick a grid-aligned top-left for a square of side `item_size` that stays
/// inside the border and clears every rectangle in `occupied`.
///
/// After `SPAWN_ATTEMPTS` failed samples a fresh random position is returned
/// as-is, so an overlap is possible on a crowded board.
pub fn random_unoccupied_pos(
    item_size: f32,
    occupied: &[Rect],
    border: f32,
    rng: &mut impl Rng,
) -> Vec2 {
    for _ in 0..SPAWN_ATTEMPTS {
        let candidate = random_grid_pos(item_size, border, rng);
        let rect = Rect::square(candidate.x, candidate.y, item_size);
        if !occupied.iter().any(|o| rect.overlaps(o)) {
            return candidate;
        }
    }
    debug!(occupied = occupied.len(), "spawn retries exhausted, accepting overlap");
    random_grid_pos(item_size, border, rng)
}

fn random_grid_pos(item_size: f32, border: f32, rng: &mut impl Rng) -> Vec2 {
    Vec2 {
        x: random_grid_coord(border, WORLD_WIDTH - border - item_size, rng),
        y: random_grid_coord(border, WORLD_HEIGHT - border - item_size, rng),
    }
}

/// A value `lo + k * BLOCK` strictly below `hi`.
fn random_grid_coord(lo: f32, hi: f32, rng: &mut impl Rng) -> f32 {
    let slots = ((hi - lo) / BLOCK).ceil().max(1.0) as u32;
    lo + rng.gen_range(0..slots) as f32 * BLOCK
}

// ── Volleys ───────────────────────────────────────────────────────────────────

/// Velocities for a volley of `count` darts aimed along `direction`.
///
/// One dart flies straight, two split at ±spread/2, three or more fan out at
/// −spread, 0 and +spread.
pub fn dart_vectors(direction: Direction, count: u32, spread_deg: f32) -> Vec<Vec2> {
    let base = direction.angle_deg();
    let offsets: &[f32] = match count {
        0 => &[],
        1 => &[0.0],
        2 => &[-0.5, 0.5],
        _ => &[-1.0, 0.0, 1.0],
    };
    offsets
        .iter()
        .map(|k| {
            let angle = (base + k * spread_deg).to_radians();
            Vec2 {
                x: angle.cos() * DART_SPEED,
                y: angle.sin() * DART_SPEED,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_coord_never_reaches_upper_bound() {
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let v = random_grid_coord(20.0, 760.0, &mut rng);
            assert!(v >= 20.0 && v < 760.0);
            assert_eq!((v - 20.0) % BLOCK, 0.0);
        }
    }

    #[test]
    fn grid_coord_collapses_to_lower_bound_on_empty_range() {
        let mut rng = rand::thread_rng();
        assert_eq!(random_grid_coord(20.0, 10.0, &mut rng), 20.0);
    }
}
