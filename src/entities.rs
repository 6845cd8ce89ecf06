/// Session entity types. Pure data; behaviour lives in `geometry`, `registry` and `compute`.

// ── Geometry primitives ───────────────────────────────────────────────────────

/// Axis-aligned square (or rectangle) in world pixels; `x`/`y` is the
/// top-left corner and Y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

// ── Enumerations ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    BossWarning,
    BossFight,
    GameOver,
    Victory,
}

/// What the player asked for this frame, already decoded from raw input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Steer(Direction),
    /// Fire a dart volley.
    PrimaryFire,
    /// Trigger a shockwave.
    SecondaryFire,
    Quit,
    PlayAgain,
    Decline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Eat,
    HazardDeath,
    Victory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Track {
    Normal,
    Boss,
}

/// Audio side effect requested by the simulation.  Drained by the frame
/// driver after every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundEvent {
    Play(Cue),
    SwitchTrack(Track),
    StopTrack,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Snake {
    pub x: f32,
    pub y: f32,
    /// Visual side length; grows with every apple up to a cap.
    pub size: f32,
    /// Requested heading, `None` while the snake has never been steered.
    pub heading: Option<Direction>,
    /// Last direction actually applied by a movement tick.
    pub last_committed: Option<Direction>,
    /// Last non-zero direction requested; volleys are aimed along it.
    pub facing: Direction,
    pub last_move_time: f64,
}

// ── Collectibles, hazards & projectiles ───────────────────────────────────────

#[derive(Clone, Debug)]
pub struct PowerItem {
    pub rect: Rect,
    pub spawned_at: f64,
}

#[derive(Clone, Debug)]
pub struct Bomb {
    pub rect: Rect,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub speed: f32,
}

/// Projectile with a sub-pixel position and a continuous velocity.
#[derive(Clone, Debug)]
pub struct Dart {
    pub x: f32,
    pub y: f32,
    pub velocity: Vec2,
    /// Only used to orient the sprite.
    pub facing: Direction,
}

#[derive(Clone, Debug)]
pub struct Boss {
    pub rect: Rect,
    pub health: i32,
    pub max_health: i32,
    pub speed: f32,
    pub enraged: bool,
}

#[derive(Clone, Debug)]
pub struct Shockwave {
    pub radius: f32,
}

// ── Entity registry ───────────────────────────────────────────────────────────

/// Every transient entity of a session.  At most one apple, one power item
/// and one boss are alive at a time.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    pub apple: Option<Rect>,
    pub power_item: Option<PowerItem>,
    pub bombs: Vec<Bomb>,
    pub enemies: Vec<Enemy>,
    pub darts: Vec<Dart>,
    pub boss: Option<Boss>,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire state of one session.  Cloneable so the frame functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub phase: Phase,
    pub snake: Snake,
    pub world: Registry,
    pub score: u32,

    pub apples_toward_power: u32,
    pub power_items_eaten: u32,
    pub darts_per_shot: u32,
    pub dart_ready: bool,
    pub last_dart_time: f64,

    pub shockwave: Option<Shockwave>,
    pub shockwave_charges: u32,

    pub next_wave_size: usize,
    pub last_wave_cleared: f64,
    pub last_bomb_spawn: f64,
    pub warning_started: f64,

    /// Clock value of the most recent frame.
    pub now: f64,
    /// Sound requests produced by the most recent frame.
    pub sounds: Vec<SoundEvent>,
}
