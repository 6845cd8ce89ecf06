/// Spawn and removal operations on the entity registry.
///
/// Every spawn first gathers the rectangles of all live entities (plus the
/// snake), then asks the grid spawner for a free slot.

use rand::Rng;
use tracing::debug;

use crate::constants::{
    BLOCK, BORDER, BOSS_BASE_SPEED, BOSS_MAX_HEALTH, BOSS_SIZE, BOSS_SPAWN_X, BOSS_SPAWN_Y,
    ENEMY_BASE_SPEED, ENEMY_SPEED_JITTER, MAX_BOMBS,
};
use crate::entities::{Bomb, Boss, Enemy, PowerItem, Rect, Registry};
use crate::geometry::random_unoccupied_pos;

impl Registry {
    /// Rectangles of the snake and every live entity.
    pub fn occupied_rects(&self, snake: &Rect) -> Vec<Rect> {
        let mut occupied = vec![*snake];
        occupied.extend(self.apple);
        occupied.extend(self.power_item.as_ref().map(|p| p.rect));
        occupied.extend(self.bombs.iter().map(|b| b.rect));
        occupied.extend(self.enemies.iter().map(|e| e.rect));
        occupied.extend(self.boss.as_ref().map(|b| b.rect));
        occupied
    }

    /// Replace the apple with a new one on a free cell.
    pub fn spawn_apple(&mut self, snake: &Rect, rng: &mut impl Rng) {
        let pos = random_unoccupied_pos(BLOCK, &self.occupied_rects(snake), BORDER, rng);
        self.apple = Some(Rect::square(pos.x, pos.y, BLOCK));
    }

    pub fn spawn_power_item(&mut self, snake: &Rect, now: f64, rng: &mut impl Rng) {
        let pos = random_unoccupied_pos(BLOCK, &self.occupied_rects(snake), BORDER, rng);
        self.power_item = Some(PowerItem {
            rect: Rect::square(pos.x, pos.y, BLOCK),
            spawned_at: now,
        });
    }

    /// Add `count` enemies, each with its own jittered speed.  Enemies of the
    /// same wave never spawn on top of each other.
    pub fn spawn_enemy_wave(&mut self, snake: &Rect, count: usize, rng: &mut impl Rng) {
        let mut occupied = self.occupied_rects(snake);
        for _ in 0..count {
            let pos = random_unoccupied_pos(BLOCK, &occupied, BORDER, rng);
            let rect = Rect::square(pos.x, pos.y, BLOCK);
            let speed = ENEMY_BASE_SPEED + rng.gen_range(-ENEMY_SPEED_JITTER..=ENEMY_SPEED_JITTER);
            self.enemies.push(Enemy { rect, speed });
            occupied.push(rect);
        }
        debug!(count, total = self.enemies.len(), "enemy wave spawned");
    }

    /// Returns `false` when the bomb cap is already reached.
    pub fn add_bomb(&mut self, snake: &Rect, rng: &mut impl Rng) -> bool {
        if self.bombs.len() >= MAX_BOMBS {
            return false;
        }
        let pos = random_unoccupied_pos(BLOCK, &self.occupied_rects(snake), BORDER, rng);
        self.bombs.push(Bomb {
            rect: Rect::square(pos.x, pos.y, BLOCK),
        });
        debug!(total = self.bombs.len(), "bomb spawned");
        true
    }

    pub fn remove_enemies(&mut self, doomed: &[usize]) {
        retain_unlisted(&mut self.enemies, doomed);
    }

    pub fn remove_bombs(&mut self, doomed: &[usize]) {
        retain_unlisted(&mut self.bombs, doomed);
    }

    pub fn remove_darts(&mut self, doomed: &[usize]) {
        retain_unlisted(&mut self.darts, doomed);
    }

    /// Clear every wave-based entity and place a fresh boss near the top.
    pub fn reset_for_boss_fight(&mut self) {
        self.enemies.clear();
        self.bombs.clear();
        self.apple = None;
        self.power_item = None;
        self.darts.clear();
        self.boss = Some(Boss {
            rect: Rect::square(BOSS_SPAWN_X, BOSS_SPAWN_Y, BOSS_SIZE),
            health: BOSS_MAX_HEALTH,
            max_health: BOSS_MAX_HEALTH,
            speed: BOSS_BASE_SPEED,
            enraged: false,
        });
    }
}

/// Drop the items whose index appears in `doomed`, keeping order.
fn retain_unlisted<T>(items: &mut Vec<T>, doomed: &[usize]) {
    if doomed.is_empty() {
        return;
    }
    let mut index = 0;
    items.retain(|_| {
        let keep = !doomed.contains(&index);
        index += 1;
        keep
    });
}
