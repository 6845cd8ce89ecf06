use rand::Rng;
use tracing::{debug, info};

use crate::constants::{
    APPLES_PER_POWER_ITEM, BOMB_SPAWN_INTERVAL, BOSS_TRIGGER_SCORE, BOSS_WARNING_DURATION,
    ENEMY_RESPAWN_DELAY, MAX_WAVE_SIZE, POWER_ITEM_LIFETIME,
};
use crate::entities::{Cue, GameState, Phase, SoundEvent, Track};

use super::combat;
use super::movement::{pursue, pursue_on_screen};

/// Move to `phase` and queue its sound requests.  Terminal phases are final.
pub(super) fn enter_phase(state: &mut GameState, phase: Phase) {
    if state.phase.is_terminal() || state.phase == phase {
        return;
    }
    info!(from = ?state.phase, to = ?phase, score = state.score, "phase change");
    state.phase = phase;
    match phase {
        Phase::BossFight => state.sounds.push(SoundEvent::SwitchTrack(Track::Boss)),
        Phase::GameOver => {
            state.sounds.push(SoundEvent::Play(Cue::HazardDeath));
            state.sounds.push(SoundEvent::StopTrack);
        }
        Phase::Victory => {
            state.sounds.push(SoundEvent::StopTrack);
            state.sounds.push(SoundEvent::Play(Cue::Victory));
        }
        Phase::Playing | Phase::BossWarning => {}
    }
}

/// Spawners, enemy pursuit, collectibles and hazards.  Crossing the score
/// threshold starts the warning, but the rest of this frame still runs.
pub(super) fn update_playing(state: &mut GameState, now: f64, rng: &mut impl Rng) {
    if state.score >= BOSS_TRIGGER_SCORE {
        enter_phase(state, Phase::BossWarning);
        state.warning_started = now;
    }

    let snake = state.snake.rect();

    if state.world.power_item.is_none() && state.apples_toward_power >= APPLES_PER_POWER_ITEM {
        state.world.spawn_power_item(&snake, now, rng);
        state.apples_toward_power = 0;
    }
    let expired = state
        .world
        .power_item
        .as_ref()
        .is_some_and(|item| now - item.spawned_at > POWER_ITEM_LIFETIME);
    if expired {
        debug!("power item expired");
        state.world.power_item = None;
    }

    if state.world.enemies.is_empty() && now - state.last_wave_cleared > ENEMY_RESPAWN_DELAY {
        state.next_wave_size = (state.next_wave_size * 2).min(MAX_WAVE_SIZE);
        state.world.spawn_enemy_wave(&snake, state.next_wave_size, rng);
        state.last_wave_cleared = now;
    }

    if now - state.last_bomb_spawn > BOMB_SPAWN_INTERVAL {
        state.world.add_bomb(&snake, rng);
        state.last_bomb_spawn = now;
    }

    let target = snake.center();
    for enemy in &mut state.world.enemies {
        pursue(&mut enemy.rect, enemy.speed, target);
    }

    combat::collect_items(state, rng);
    combat::check_hazards(state);
}

/// Enemies and bombs freeze but stay deadly until the boss arrives.
pub(super) fn update_warning(state: &mut GameState, now: f64) {
    if now - state.warning_started > BOSS_WARNING_DURATION {
        begin_boss_fight(state);
    }
    combat::check_hazards(state);
}

pub(super) fn begin_boss_fight(state: &mut GameState) {
    state.world.reset_for_boss_fight();
    enter_phase(state, Phase::BossFight);
}

pub(super) fn update_boss_fight(state: &mut GameState) {
    let target = state.snake.rect().center();
    if let Some(boss) = &mut state.world.boss {
        pursue_on_screen(&mut boss.rect, boss.speed, target);
    }
    combat::check_boss_contact(state);
}
