//! Tuning constants for the simulation.  Distances are world pixels,
//! durations are seconds, speeds are pixels per frame.

// ── World ─────────────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f32 = 800.0;
pub const WORLD_HEIGHT: f32 = 800.0;
/// Side of one grid cell; everything spawns on this grid.
pub const BLOCK: f32 = 20.0;
pub const BORDER: f32 = 20.0;

pub const FRAME_RATE: u32 = 60;
pub const PROMPT_FRAME_RATE: u32 = 15;

// ── Snake ─────────────────────────────────────────────────────────────────────

pub const SNAKE_MOVE_INTERVAL: f64 = 0.08;
pub const SNAKE_GROWTH: f32 = 2.0;
pub const SNAKE_MAX_SIZE: f32 = BLOCK * 2.5;

// ── Collectibles & hazards ────────────────────────────────────────────────────

pub const APPLES_PER_POWER_ITEM: u32 = 3;
pub const POWER_ITEM_LIFETIME: f64 = 7.0;

pub const ENEMY_BASE_SPEED: f32 = 1.1;
pub const ENEMY_SPEED_JITTER: f32 = 0.2;
pub const FIRST_WAVE_SIZE: usize = 1;
pub const MAX_WAVE_SIZE: usize = 10;
pub const ENEMY_RESPAWN_DELAY: f64 = 5.0;

pub const BOMB_SPAWN_INTERVAL: f64 = 10.0;
pub const MAX_BOMBS: usize = 15;

// ── Weapons ───────────────────────────────────────────────────────────────────

pub const DART_SPEED: f32 = 15.0;
pub const DART_SPREAD_DEG: f32 = 15.0;
pub const DART_COOLDOWN: f64 = 1.0;

pub const SHOCKWAVE_START_RADIUS: f32 = 1.0;
pub const SHOCKWAVE_GROWTH: f32 = 10.0;
pub const SHOCKWAVE_MAX_RADIUS: f32 = 250.0;
pub const STARTING_SHOCKWAVE_CHARGES: u32 = 1;
pub const MAX_SHOCKWAVE_CHARGES: u32 = 5;

// ── Boss ──────────────────────────────────────────────────────────────────────

pub const BOSS_TRIGGER_SCORE: u32 = 10;
pub const BOSS_WARNING_DURATION: f64 = 3.0;
pub const BOSS_SIZE: f32 = BLOCK * 3.0;
pub const BOSS_MAX_HEALTH: i32 = 15;
pub const BOSS_BASE_SPEED: f32 = ENEMY_BASE_SPEED * 1.05;
pub const BOSS_SPAWN_X: f32 = WORLD_WIDTH / 2.0 - BOSS_SIZE / 2.0;
pub const BOSS_SPAWN_Y: f32 = BORDER + 20.0;

pub const DART_BOSS_DAMAGE: i32 = 1;
pub const SHOCKWAVE_BOSS_DAMAGE: i32 = 2;

// ── Scoring ───────────────────────────────────────────────────────────────────

pub const APPLE_SCORE: u32 = 5;
pub const ENEMY_SCORE: u32 = 10;
pub const BOMB_SCORE: u32 = 2;

/// Attempts the spawn helper makes before accepting an overlapping spot.
pub const SPAWN_ATTEMPTS: usize = 100;
