/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (plus the frame clock and, where needed, an RNG handle) and
/// returns a brand-new `GameState`.  Side effects are limited to the injected
/// RNG; sound requests are returned as data in `GameState::sounds`.

mod combat;
mod movement;
mod phase;

use rand::Rng;
use tracing::info;

use crate::constants::{
    BLOCK, DART_COOLDOWN, FIRST_WAVE_SIZE, STARTING_SHOCKWAVE_CHARGES, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::entities::{
    Dart, Direction, GameState, Intent, Phase, Rect, Registry, Snake, SoundEvent, Track,
};

// ── Constructors ─────────────────────────────────────────────────────────────

impl Snake {
    pub fn rect(&self) -> Rect {
        Rect::square(self.x, self.y, self.size)
    }
}

impl Dart {
    pub fn rect(&self) -> Rect {
        Rect::square(self.x, self.y, BLOCK)
    }
}

impl Phase {
    /// Phases in which the snake moves and weapons fire.
    pub fn is_active(self) -> bool {
        match self {
            Phase::Playing | Phase::BossWarning | Phase::BossFight => true,
            Phase::GameOver | Phase::Victory => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        !self.is_active()
    }
}

/// Build a fresh session: centred stationary snake, one apple, the first
/// enemy wave, and the normal background track requested.
pub fn init_state(now: f64, rng: &mut impl Rng) -> GameState {
    let snake = Snake {
        x: WORLD_WIDTH / 2.0,
        y: WORLD_HEIGHT / 2.0,
        size: BLOCK,
        heading: None,
        last_committed: None,
        facing: Direction::Up,
        last_move_time: now,
    };
    let mut world = Registry::default();
    world.spawn_apple(&snake.rect(), rng);
    world.spawn_enemy_wave(&snake.rect(), FIRST_WAVE_SIZE, rng);

    info!("session started");
    GameState {
        phase: Phase::Playing,
        snake,
        world,
        score: 0,
        apples_toward_power: 0,
        power_items_eaten: 0,
        darts_per_shot: 1,
        dart_ready: true,
        last_dart_time: now,
        shockwave: None,
        shockwave_charges: STARTING_SHOCKWAVE_CHARGES,
        next_wave_size: FIRST_WAVE_SIZE,
        last_wave_cleared: now,
        last_bomb_spawn: now,
        warning_started: 0.0,
        now,
        sounds: vec![SoundEvent::SwitchTrack(Track::Normal)],
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Request a new heading.  A direct reversal of the last committed move is
/// silently dropped, so the snake keeps driving in its current direction.
pub fn steer(state: &GameState, direction: Direction) -> GameState {
    let mut next = state.clone();
    if next.phase.is_active() {
        movement::steer(&mut next.snake, direction);
    }
    next
}

/// Fire a volley from the snake centre if the dart cooldown has elapsed.
pub fn fire_darts(state: &GameState, now: f64) -> GameState {
    let mut next = state.clone();
    if next.phase.is_active() {
        combat::fire_darts(&mut next, now);
    }
    next
}

/// Start a shockwave if a charge is available and none is running.
pub fn trigger_shockwave(state: &GameState) -> GameState {
    let mut next = state.clone();
    if next.phase.is_active() {
        combat::trigger_shockwave(&mut next);
    }
    next
}

/// Apply one decoded input.  Session-level intents (quit, play again,
/// decline) belong to the frame driver and leave the state untouched.
pub fn apply_intent(state: &GameState, intent: Intent, now: f64) -> GameState {
    match intent {
        Intent::Steer(direction) => steer(state, direction),
        Intent::PrimaryFire => fire_darts(state, now),
        Intent::SecondaryFire => trigger_shockwave(state),
        Intent::Quit | Intent::PlayAgain | Intent::Decline => state.clone(),
    }
}

// ── Per-frame tick (RNG injected) ──────────────────────────────────────────

/// Advance the simulation by one frame at clock `now`.
///
/// Order: snake step → boundary → cooldown → phase-specific update
/// (spawners, pursuit, collectibles, hazards) → darts → shockwave.
pub fn tick(state: &GameState, now: f64, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    next.now = now;
    if !next.phase.is_active() {
        return next;
    }

    // ── 1. Snake step & border ───────────────────────────────────────────────
    movement::advance_snake(&mut next.snake, now);
    combat::check_boundary(&mut next);
    if !next.dart_ready && now - next.last_dart_time > DART_COOLDOWN {
        next.dart_ready = true;
    }

    // ── 2. Phase-specific update ─────────────────────────────────────────────
    match next.phase {
        Phase::Playing => phase::update_playing(&mut next, now, rng),
        Phase::BossWarning => phase::update_warning(&mut next, now),
        Phase::BossFight => phase::update_boss_fight(&mut next),
        Phase::GameOver | Phase::Victory => {}
    }

    // ── 3. Weapons ───────────────────────────────────────────────────────────
    if next.phase.is_active() {
        combat::resolve_darts(&mut next, now);
        combat::resolve_shockwave(&mut next, now);
    }

    next
}

/// One full frame: apply this frame's inputs in order, then tick.  Sound
/// requests from the previous frame are discarded first.
pub fn frame(state: &GameState, intents: &[Intent], now: f64, rng: &mut impl Rng) -> GameState {
    let mut next = GameState {
        sounds: Vec::new(),
        ..state.clone()
    };
    for &intent in intents {
        next = apply_intent(&next, intent, now);
    }
    tick(&next, now, rng)
}
