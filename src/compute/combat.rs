use rand::Rng;
use tracing::info;

use crate::constants::{
    APPLE_SCORE, BLOCK, BOMB_SCORE, BORDER, BOSS_BASE_SPEED, DART_BOSS_DAMAGE, DART_SPREAD_DEG,
    ENEMY_SCORE, MAX_SHOCKWAVE_CHARGES, SHOCKWAVE_BOSS_DAMAGE, SHOCKWAVE_GROWTH,
    SHOCKWAVE_MAX_RADIUS, SHOCKWAVE_START_RADIUS, SNAKE_GROWTH, SNAKE_MAX_SIZE,
};
use crate::entities::{Cue, Dart, GameState, Phase, Rect, Shockwave, SoundEvent, Vec2};
use crate::geometry::{dart_vectors, play_area, world_rect};

use super::phase::enter_phase;

// ── Firing ────────────────────────────────────────────────────────────────────

pub(super) fn fire_darts(state: &mut GameState, now: f64) {
    if !state.dart_ready {
        return;
    }
    state.dart_ready = false;
    state.last_dart_time = now;

    let center = state.snake.rect().center();
    let facing = state.snake.facing;
    for velocity in dart_vectors(facing, state.darts_per_shot, DART_SPREAD_DEG) {
        state.world.darts.push(Dart {
            x: center.x - BLOCK / 2.0,
            y: center.y - BLOCK / 2.0,
            velocity,
            facing,
        });
    }
}

pub(super) fn trigger_shockwave(state: &mut GameState) {
    if state.shockwave_charges == 0 || state.shockwave.is_some() {
        return;
    }
    state.shockwave_charges -= 1;
    state.shockwave = Some(Shockwave {
        radius: SHOCKWAVE_START_RADIUS,
    });
}

// ── Snake collisions ──────────────────────────────────────────────────────────

/// Leaving the bordered play area is fatal.
pub(super) fn check_boundary(state: &mut GameState) {
    if !state.snake.rect().inside(&play_area(BORDER)) {
        enter_phase(state, Phase::GameOver);
    }
}

pub(super) fn collect_items(state: &mut GameState, rng: &mut impl Rng) {
    let snake = state.snake.rect();

    if state.world.apple.is_some_and(|apple| snake.overlaps(&apple)) {
        state.sounds.push(SoundEvent::Play(Cue::Eat));
        state.score += APPLE_SCORE;
        state.snake.size = (state.snake.size + SNAKE_GROWTH).min(SNAKE_MAX_SIZE);
        state.apples_toward_power += 1;
        state.world.spawn_apple(&snake, rng);
    }

    let ate_power = state
        .world
        .power_item
        .as_ref()
        .is_some_and(|item| snake.overlaps(&item.rect));
    if ate_power {
        state.sounds.push(SoundEvent::Play(Cue::Eat));
        state.power_items_eaten += 1;
        state.darts_per_shot = if state.power_items_eaten == 1 { 2 } else { 3 };
        if state.power_items_eaten % 3 == 0 {
            state.shockwave_charges = (state.shockwave_charges + 1).min(MAX_SHOCKWAVE_CHARGES);
        }
        state.world.power_item = None;
    }
}

/// Bombs first, then enemies; either ends the session.
pub(super) fn check_hazards(state: &mut GameState) {
    let snake = state.snake.rect();
    let hit = state.world.bombs.iter().any(|b| snake.overlaps(&b.rect))
        || state.world.enemies.iter().any(|e| snake.overlaps(&e.rect));
    if hit {
        enter_phase(state, Phase::GameOver);
    }
}

pub(super) fn check_boss_contact(state: &mut GameState) {
    let snake = state.snake.rect();
    let touching = state
        .world
        .boss
        .as_ref()
        .is_some_and(|boss| snake.overlaps(&boss.rect));
    if touching {
        enter_phase(state, Phase::GameOver);
    }
}

// ── Boss damage ───────────────────────────────────────────────────────────────

/// Subtract `amount` health.  Rage triggers once, the first time health is
/// at or below half; zero health wins the game.
fn damage_boss(state: &mut GameState, amount: i32) {
    let Some(boss) = state.world.boss.as_mut() else {
        return;
    };
    boss.health -= amount;
    info!(health = boss.health, amount, "boss hit");
    if !boss.enraged && boss.health as f32 <= boss.max_health as f32 / 2.0 {
        boss.enraged = true;
        boss.speed = BOSS_BASE_SPEED * 2.0;
        info!(speed = boss.speed, "boss enraged");
    }
    if boss.health <= 0 {
        enter_phase(state, Phase::Victory);
    }
}

// ── Darts ─────────────────────────────────────────────────────────────────────

/// Move every dart, cull the ones off screen, then let each remaining dart
/// hit at most one target.  Removals are applied after the pass.
pub(super) fn resolve_darts(state: &mut GameState, now: f64) {
    let screen = world_rect();
    let mut spent: Vec<usize> = Vec::new();
    let mut killed: Vec<usize> = Vec::new();

    for di in 0..state.world.darts.len() {
        let dart = &mut state.world.darts[di];
        dart.x += dart.velocity.x;
        dart.y += dart.velocity.y;
        let rect = dart.rect();

        if !rect.overlaps(&screen) {
            spent.push(di);
            continue;
        }

        match state.phase {
            Phase::Playing | Phase::BossWarning => {
                let target = state
                    .world
                    .enemies
                    .iter()
                    .enumerate()
                    .find(|(ei, e)| !killed.contains(ei) && rect.overlaps(&e.rect))
                    .map(|(ei, _)| ei);
                if let Some(ei) = target {
                    killed.push(ei);
                    spent.push(di);
                    state.score += ENEMY_SCORE;
                }
            }
            Phase::BossFight => {
                let hit = state
                    .world
                    .boss
                    .as_ref()
                    .is_some_and(|boss| rect.overlaps(&boss.rect));
                if hit {
                    spent.push(di);
                    damage_boss(state, DART_BOSS_DAMAGE);
                }
            }
            Phase::GameOver | Phase::Victory => {}
        }
    }

    let wave_cleared = !killed.is_empty() && killed.len() == state.world.enemies.len();
    state.world.remove_enemies(&killed);
    state.world.remove_darts(&spent);
    if wave_cleared && state.phase == Phase::Playing {
        state.last_wave_cleared = now;
    }
}

// ── Shockwave ─────────────────────────────────────────────────────────────────

fn within_reach(center: Vec2, radius: f32, target: &Rect) -> bool {
    let c = target.center();
    (c.x - center.x).hypot(c.y - center.y) < radius + target.w / 2.0
}

/// Grow the active shockwave and apply it.  Enemies and bombs inside the
/// ring are destroyed every frame it is active; the boss takes one hit and
/// the shockwave ends there.
pub(super) fn resolve_shockwave(state: &mut GameState, now: f64) {
    let Some(wave) = state.shockwave.as_mut() else {
        return;
    };
    wave.radius += SHOCKWAVE_GROWTH;
    let radius = wave.radius;
    let center = state.snake.rect().center();

    match state.phase {
        Phase::Playing | Phase::BossWarning => {
            let killed: Vec<usize> = state
                .world
                .enemies
                .iter()
                .enumerate()
                .filter(|(_, e)| within_reach(center, radius, &e.rect))
                .map(|(i, _)| i)
                .collect();
            state.score += ENEMY_SCORE * killed.len() as u32;
            state.world.remove_enemies(&killed);
            // An empty board keeps restarting the wave timer while the ring grows.
            if state.world.enemies.is_empty() && state.phase == Phase::Playing {
                state.last_wave_cleared = now;
            }

            let cleared: Vec<usize> = state
                .world
                .bombs
                .iter()
                .enumerate()
                .filter(|(_, b)| within_reach(center, radius, &b.rect))
                .map(|(i, _)| i)
                .collect();
            state.score += BOMB_SCORE * cleared.len() as u32;
            state.world.remove_bombs(&cleared);
        }
        Phase::BossFight => {
            let hit = state
                .world
                .boss
                .as_ref()
                .is_some_and(|boss| within_reach(center, radius, &boss.rect));
            if hit {
                state.shockwave = None;
                damage_boss(state, SHOCKWAVE_BOSS_DAMAGE);
            }
        }
        Phase::GameOver | Phase::Victory => {}
    }

    if state.shockwave.as_ref().is_some_and(|w| w.radius > SHOCKWAVE_MAX_RADIUS) {
        state.shockwave = None;
    }
}
