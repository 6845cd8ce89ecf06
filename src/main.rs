mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Stdout};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
#[cfg(feature = "sound")]
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "sound")]
use hungry_snake::audio::RodioSink;
use hungry_snake::audio::{AudioSink, Muted, TerminalBell};
use hungry_snake::compute::{frame, init_state};
use hungry_snake::constants::{FRAME_RATE, PROMPT_FRAME_RATE};
use hungry_snake::entities::{Direction, GameState, Intent};
use hungry_snake::GameError;

const FRAME: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);
const PROMPT_FRAME: Duration = Duration::from_nanos(1_000_000_000 / PROMPT_FRAME_RATE as u64);

// ── CLI ───────────────────────────────────────────────────────────────────────

/// Hungry Snake: eat, shoot, survive the boss.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Disable all sound output
    #[arg(long)]
    mute: bool,

    /// Write structured logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Directory containing the mp3 assets
    #[cfg(feature = "sound")]
    #[arg(long, default_value = ".")]
    assets: PathBuf,
}

/// The screen is the game, so logs only go to a file when asked for.
fn init_logging(path: &Path) -> hungry_snake::Result<()> {
    let file = File::create(path)
        .map_err(|e| GameError::LogSetup(format!("{}: {e}", path.display())))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| GameError::LogSetup(e.to_string()))
}

fn make_audio(cli: &Cli) -> Box<dyn AudioSink> {
    if cli.mute {
        return Box::new(Muted);
    }
    #[cfg(feature = "sound")]
    {
        match RodioSink::new(&cli.assets) {
            Ok(sink) => return Box::new(sink),
            Err(err) => warn!(%err, "no audio output, using the terminal bell"),
        }
    }
    Box::new(TerminalBell::new(stdout()))
}

// ── Platform context ──────────────────────────────────────────────────────────

/// Terminal, input channel and audio for the lifetime of the program.
/// Dropping it restores the terminal.
struct Platform {
    out: BufWriter<Stdout>,
    events: mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
    audio: Box<dyn AudioSink>,
}

impl Platform {
    fn open(audio: Box<dyn AudioSink>) -> hungry_snake::Result<Self> {
        let mut out = BufWriter::new(stdout());

        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        out.execute(EnableMouseCapture)?;

        // Terminals without the kitty protocol reject this; plain presses still work.
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

        // Dedicate a thread exclusively to blocking event reads, sending them
        // through a channel so the game loop never has to block on I/O.
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        });

        Ok(Platform {
            out,
            events: rx,
            keyboard_enhanced,
            audio,
        })
    }

    /// Drain pending input without blocking.  A dead input thread reads as
    /// a quit request.
    fn poll_intents(&self) -> Vec<Intent> {
        let mut intents = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(ev) => intents.extend(decode(&ev)),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    intents.push(Intent::Quit);
                    break;
                }
            }
        }
        intents
    }

    fn play_sounds(&mut self, state: &GameState) {
        for &event in &state.sounds {
            self.audio.handle(event);
        }
    }
}

impl Drop for Platform {
    fn drop(&mut self) {
        self.audio.stop_track();
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(DisableMouseCapture);
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn decode(ev: &Event) -> Option<Intent> {
    match ev {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) => match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Intent::Quit),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Intent::Quit),
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                Some(Intent::Steer(Direction::Up))
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                Some(Intent::Steer(Direction::Down))
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                Some(Intent::Steer(Direction::Left))
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                Some(Intent::Steer(Direction::Right))
            }
            KeyCode::Char(' ') => Some(Intent::PrimaryFire),
            KeyCode::Char('e') | KeyCode::Char('E') => Some(Intent::SecondaryFire),
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Intent::PlayAgain),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(Intent::Decline),
            _ => None,
        },
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(button),
            ..
        }) => match button {
            MouseButton::Left => Some(Intent::PrimaryFire),
            MouseButton::Right => Some(Intent::SecondaryFire),
            MouseButton::Middle => None,
        },
        _ => None,
    }
}

// ── Session loop ──────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq)]
enum SessionEnd {
    Quit,
    PlayAgain,
}

/// Run one session at 60 Hz until it ends, then wait on the Y/N prompt.
fn play_session(platform: &mut Platform, rng: &mut StdRng) -> std::io::Result<SessionEnd> {
    let started = Instant::now();
    let mut state = init_state(0.0, rng);
    platform.play_sounds(&state);

    loop {
        let frame_start = Instant::now();

        let intents = platform.poll_intents();
        if intents.contains(&Intent::Quit) {
            return Ok(SessionEnd::Quit);
        }

        state = frame(&state, &intents, started.elapsed().as_secs_f64(), rng);
        platform.play_sounds(&state);

        if state.phase.is_terminal() {
            info!(phase = ?state.phase, score = state.score, "session over");
            display::render_end_screen(&mut platform.out, &state)?;
            return Ok(wait_for_choice(platform));
        }
        display::render(&mut platform.out, &state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

/// First Y/N/quit answer among `intents`; gameplay input is ignored.
fn prompt_choice(intents: &[Intent]) -> Option<SessionEnd> {
    intents.iter().find_map(|intent| match intent {
        Intent::PlayAgain => Some(SessionEnd::PlayAgain),
        Intent::Quit | Intent::Decline => Some(SessionEnd::Quit),
        Intent::Steer(_) | Intent::PrimaryFire | Intent::SecondaryFire => None,
    })
}

/// Poll the "play again?" prompt at a reduced rate.
fn wait_for_choice(platform: &Platform) -> SessionEnd {
    loop {
        if let Some(choice) = prompt_choice(&platform.poll_intents()) {
            return choice;
        }
        thread::sleep(PROMPT_FRAME);
    }
}

fn run(platform: &mut Platform, rng: &mut StdRng) -> std::io::Result<()> {
    while let SessionEnd::PlayAgain = play_session(platform, rng)? {
        info!("starting a new session");
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path).context("failed to set up logging")?;
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(seed = ?cli.seed, "starting");

    let audio = make_audio(&cli);
    let mut platform = Platform::open(audio).context("failed to set up the terminal")?;
    let result = run(&mut platform, &mut rng);

    // Always restore the terminal before reporting
    drop(platform);
    result.context("terminal I/O failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(button: MouseButton) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(button),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn letters_and_arrows_steer() {
        let cases = [
            (KeyCode::Char('w'), KeyCode::Up, Direction::Up),
            (KeyCode::Char('s'), KeyCode::Down, Direction::Down),
            (KeyCode::Char('a'), KeyCode::Left, Direction::Left),
            (KeyCode::Char('d'), KeyCode::Right, Direction::Right),
        ];
        for (letter, arrow, dir) in cases {
            assert_eq!(decode(&key(letter)), Some(Intent::Steer(dir)));
            assert_eq!(decode(&key(arrow)), Some(Intent::Steer(dir)));
        }
        assert_eq!(
            decode(&key(KeyCode::Char('D'))),
            Some(Intent::Steer(Direction::Right))
        );
    }

    #[test]
    fn space_and_clicks_fire() {
        assert_eq!(decode(&key(KeyCode::Char(' '))), Some(Intent::PrimaryFire));
        assert_eq!(decode(&click(MouseButton::Left)), Some(Intent::PrimaryFire));
        assert_eq!(decode(&key(KeyCode::Char('e'))), Some(Intent::SecondaryFire));
        assert_eq!(decode(&click(MouseButton::Right)), Some(Intent::SecondaryFire));
        assert_eq!(decode(&click(MouseButton::Middle)), None);
    }

    #[test]
    fn quit_keys() {
        assert_eq!(decode(&key(KeyCode::Char('q'))), Some(Intent::Quit));
        assert_eq!(decode(&key(KeyCode::Esc)), Some(Intent::Quit));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(decode(&ctrl_c), Some(Intent::Quit));
        assert_eq!(decode(&key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn releases_and_other_events_are_ignored() {
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('w'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(decode(&release), None);
        assert_eq!(decode(&Event::Resize(80, 24)), None);
        assert_eq!(decode(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn prompt_answers_with_y_or_n() {
        assert_eq!(decode(&key(KeyCode::Char('Y'))), Some(Intent::PlayAgain));
        assert_eq!(decode(&key(KeyCode::Char('n'))), Some(Intent::Decline));

        assert_eq!(prompt_choice(&[Intent::PlayAgain]), Some(SessionEnd::PlayAgain));
        assert_eq!(prompt_choice(&[Intent::Decline]), Some(SessionEnd::Quit));
        assert_eq!(prompt_choice(&[Intent::Quit]), Some(SessionEnd::Quit));
    }

    #[test]
    fn prompt_skips_gameplay_input() {
        let intents = [
            Intent::Steer(Direction::Up),
            Intent::PrimaryFire,
            Intent::PlayAgain,
            Intent::Quit,
        ];
        assert_eq!(prompt_choice(&intents), Some(SessionEnd::PlayAgain));
        assert_eq!(prompt_choice(&[Intent::SecondaryFire]), None);
        assert_eq!(prompt_choice(&[]), None);
    }
}
