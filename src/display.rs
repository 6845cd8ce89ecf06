/// Rendering layer. All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.
///
/// One 20 px world block maps to two columns and one row, so squares stay
/// roughly square on a typical terminal font.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use hungry_snake::constants::{BLOCK, DART_COOLDOWN, WORLD_HEIGHT, WORLD_WIDTH};
use hungry_snake::entities::{Boss, Dart, Direction, GameState, Phase, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::White;
const C_SNAKE: Color = Color::White;
const C_APPLE: Color = Color::Green;
const C_POWER: Color = Color::Blue;
const C_BOMB: Color = Color::Red;
const C_ENEMY: Color = Color::Yellow;
const C_BOSS: Color = Color::Magenta;
const C_BOSS_RAGE: Color = Color::DarkRed;
const C_HEALTH: Color = Color::DarkYellow;
const C_HEALTH_BG: Color = Color::Red;
const C_DART: Color = Color::Grey;
const C_SHOCKWAVE: Color = Color::Cyan;
const C_WARNING: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Rows reserved above the play field for the HUD.
const FIELD_TOP: u16 = 2;
const HEALTH_BAR_CELLS: u16 = 20;
const COOLDOWN_BAR_CELLS: u16 = 10;

fn field_rows() -> u16 {
    (WORLD_HEIGHT / BLOCK) as u16
}

fn field_cols() -> u16 {
    (WORLD_WIDTH / BLOCK) as u16 * 2
}

/// Terminal size, used to clip everything drawn.
struct Viewport {
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn current() -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Viewport { cols, rows })
    }

    /// Terminal cell of a world point, or `None` when it falls off screen.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / BLOCK) as u16 * 2;
        let row = FIELD_TOP + (y / BLOCK) as u16;
        (col + 1 < self.cols && row < self.rows).then_some((col, row))
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame of an active session.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let view = Viewport::current()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;

    if matches!(state.phase, Phase::Playing | Phase::BossWarning) {
        if let Some(apple) = &state.world.apple {
            draw_glyph(out, &view, apple, "● ", C_APPLE)?;
        }
        if let Some(item) = &state.world.power_item {
            draw_glyph(out, &view, &item.rect, "◆ ", C_POWER)?;
        }
        for bomb in &state.world.bombs {
            fill_rect(out, &view, &bomb.rect, "▓", C_BOMB)?;
        }
        for enemy in &state.world.enemies {
            fill_rect(out, &view, &enemy.rect, "█", C_ENEMY)?;
        }
    }
    if state.phase == Phase::BossFight {
        if let Some(boss) = &state.world.boss {
            draw_boss(out, &view, boss)?;
        }
    }

    fill_rect(out, &view, &state.snake.rect(), "█", C_SNAKE)?;
    for dart in &state.world.darts {
        draw_dart(out, &view, dart)?;
    }
    if let Some(wave) = &state.shockwave {
        draw_shockwave(out, &view, state, wave.radius)?;
    }

    draw_hud(out, &view, state)?;
    if state.phase == Phase::BossWarning && (state.now * 2.0) as i64 % 2 == 0 {
        draw_warning(out, &view)?;
    }

    finish(out, &view)
}

/// Final screen after GAME_OVER or VICTORY.
pub fn render_end_screen<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let view = Viewport::current()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (title, color) = match state.phase {
        Phase::Victory => ("VICTORY!", Color::Green),
        _ => ("Game Over!", Color::Red),
    };
    let score_line = format!("Final Score: {}", state.score);
    let lines: [(&str, Color); 3] = [
        (title, color),
        (score_line.as_str(), Color::White),
        ("Play Again? (Y/N)", Color::Yellow),
    ];

    let cy = view.rows / 2;
    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = (cy + 2 * i as u16).saturating_sub(2);
        draw_centered(out, &view, row, msg, *color)?;
    }

    finish(out, &view)
}

fn finish<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_BORDER))?;
    let last_row = FIELD_TOP + field_rows() - 1;
    let last_col = field_cols() - 2;
    for row in FIELD_TOP..=last_row {
        let full = row == FIELD_TOP || row == last_row;
        let mut col = 0;
        while col <= last_col {
            if (full || col == 0 || col == last_col) && col + 1 < view.cols && row < view.rows {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print("░░"))?;
            }
            col += 2;
        }
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Fill every cell the rectangle touches.
fn fill_rect<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    let cell = glyph.repeat(2);
    let mut y = (rect.y / BLOCK).floor() * BLOCK;
    while y < rect.bottom() {
        let mut x = (rect.x / BLOCK).floor() * BLOCK;
        while x < rect.right() {
            if let Some((col, row)) = view.cell(x, y) {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print(&cell))?;
            }
            x += BLOCK;
        }
        y += BLOCK;
    }
    Ok(())
}

/// Single glyph at the centre of a rectangle (round items).
fn draw_glyph<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let c = rect.center();
    if let Some((col, row)) = view.cell(c.x, c.y) {
        out.queue(style::SetForegroundColor(color))?;
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn draw_boss<W: Write>(out: &mut W, view: &Viewport, boss: &Boss) -> std::io::Result<()> {
    let color = if boss.enraged { C_BOSS_RAGE } else { C_BOSS };
    fill_rect(out, view, &boss.rect, "█", color)?;

    // Health bar, centred on row 1
    let filled = (boss.health.max(0) as f32 / boss.max_health as f32 * HEALTH_BAR_CELLS as f32)
        .round() as u16;
    let start = (field_cols() / 2).saturating_sub(HEALTH_BAR_CELLS / 2);
    draw_text(out, view, start.saturating_sub(6), 1, "BOSS ", C_HUD)?;
    draw_text(out, view, start, 1, &"█".repeat(filled as usize), C_HEALTH)?;
    draw_text(
        out,
        view,
        start + filled,
        1,
        &"░".repeat(HEALTH_BAR_CELLS.saturating_sub(filled) as usize),
        C_HEALTH_BG,
    )
}

/// Oriented triangle; darts fired on a spread still point along the facing.
fn draw_dart<W: Write>(out: &mut W, view: &Viewport, dart: &Dart) -> std::io::Result<()> {
    let glyph = match dart.facing {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    };
    draw_glyph(out, view, &dart.rect(), glyph, C_DART)
}

fn draw_shockwave<W: Write>(
    out: &mut W,
    view: &Viewport,
    state: &GameState,
    radius: f32,
) -> std::io::Result<()> {
    let c = state.snake.rect().center();
    out.queue(style::SetForegroundColor(C_SHOCKWAVE))?;
    // Enough samples that neighbouring points land in adjacent cells
    let steps = ((radius / BLOCK) * 8.0).max(8.0) as u32;
    for i in 0..steps {
        let angle = i as f32 / steps as f32 * std::f32::consts::TAU;
        let (x, y) = (c.x + radius * angle.cos(), c.y + radius * angle.sin());
        if let Some((col, row)) = view.cell(x, y) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("· "))?;
        }
    }
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, state: &GameState) -> std::io::Result<()> {
    let stats = format!(
        "Score: {:<5} Shockwave: {}  Darts: {}",
        state.score, state.shockwave_charges, state.darts_per_shot
    );
    draw_text(out, view, 1, 0, &stats, C_HUD)?;

    // Dart cooldown bar, right side of row 0
    let progress = if state.dart_ready {
        1.0
    } else {
        ((state.now - state.last_dart_time) / DART_COOLDOWN).clamp(0.0, 1.0)
    };
    let filled = (progress * COOLDOWN_BAR_CELLS as f64) as u16;
    let bar_col = field_cols().saturating_sub(COOLDOWN_BAR_CELLS + 10);
    let bar_color = if state.dart_ready { Color::Green } else { Color::Red };
    draw_text(out, view, bar_col, 0, "Dart CD ", C_HUD)?;
    draw_text(out, view, bar_col + 8, 0, &"■".repeat(filled as usize), bar_color)?;
    draw_text(
        out,
        view,
        bar_col + 8 + filled,
        0,
        &"□".repeat(COOLDOWN_BAR_CELLS.saturating_sub(filled) as usize),
        C_HINT,
    )?;

    let hint = "WASD/arrows: Move  SPACE/click: Darts  E/right-click: Shockwave  Q: Quit";
    draw_text(out, view, 1, FIELD_TOP + field_rows(), hint, C_HINT)
}

fn draw_warning<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let mid = FIELD_TOP + field_rows() / 2;
    draw_centered(out, view, mid.saturating_sub(2), "WARNING!", C_WARNING)?;
    draw_centered(out, view, mid + 2, "BOSS INCOMING!", C_WARNING)
}

// ── Text helpers ──────────────────────────────────────────────────────────────

fn draw_text<W: Write>(
    out: &mut W,
    view: &Viewport,
    col: u16,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    if row >= view.rows || col >= view.cols {
        return Ok(());
    }
    let room = (view.cols - col) as usize;
    let clipped: String = text.chars().take(room).collect();
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(clipped))?;
    Ok(())
}

fn draw_centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let width = field_cols().min(view.cols);
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    draw_text(out, view, col, row, text, color)
}
