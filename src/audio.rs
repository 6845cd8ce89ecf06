/// Audio collaborators.
///
/// The simulation only emits `SoundEvent`s; a sink turns them into noise.
/// Failures are logged and skipped, never propagated into the game.

use std::io::Write;

use tracing::{debug, warn};

use crate::entities::{Cue, SoundEvent, Track};
use crate::error::Result;

pub trait AudioSink {
    fn play(&mut self, cue: Cue);
    fn switch_track(&mut self, track: Track);
    fn stop_track(&mut self);

    fn handle(&mut self, event: SoundEvent) {
        match event {
            SoundEvent::Play(cue) => self.play(cue),
            SoundEvent::SwitchTrack(track) => self.switch_track(track),
            SoundEvent::StopTrack => self.stop_track(),
        }
    }
}

/// Asset file name for a one-shot cue.
pub fn cue_file(cue: Cue) -> &'static str {
    match cue {
        Cue::Eat => "eat.mp3",
        Cue::HazardDeath => "bomb.mp3",
        Cue::Victory => "victory.mp3",
    }
}

/// Asset file name for a background track.
pub fn track_file(track: Track) -> &'static str {
    match track {
        Track::Normal => "bgm.mp3",
        Track::Boss => "boss.mp3",
    }
}

/// Start `track` through `start`, falling back to the normal track when the
/// boss track cannot be loaded.  Returns the track that is actually playing;
/// failures are logged and skipped.
pub fn start_with_fallback(
    track: Track,
    mut start: impl FnMut(&str) -> Result<()>,
) -> Option<Track> {
    let err = match start(track_file(track)) {
        Ok(()) => return Some(track),
        Err(err) => err,
    };
    warn!(%err, ?track, "could not start track");
    if track == Track::Normal {
        return None;
    }
    match start(track_file(Track::Normal)) {
        Ok(()) => Some(Track::Normal),
        Err(err) => {
            warn!(%err, "could not start default track either");
            None
        }
    }
}

// ── Muted ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Muted;

impl AudioSink for Muted {
    fn play(&mut self, _cue: Cue) {}
    fn switch_track(&mut self, _track: Track) {}
    fn stop_track(&mut self) {}
}

// ── Terminal bell ─────────────────────────────────────────────────────────────

/// Rings the terminal bell for one-shot cues.  Terminals have no background
/// music, so tracks are only remembered.
pub struct TerminalBell<W: Write> {
    out: W,
    track: Option<Track>,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        TerminalBell { out, track: None }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        if let Err(err) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            warn!(?cue, %err, "bell failed");
        }
    }

    fn switch_track(&mut self, track: Track) {
        debug!(from = ?self.track, to = ?track, "background track");
        self.track = Some(track);
    }

    fn stop_track(&mut self) {
        if let Some(track) = self.track.take() {
            debug!(?track, "background track stopped");
        }
    }
}

// ── rodio ─────────────────────────────────────────────────────────────────────

#[cfg(feature = "sound")]
pub use self::speaker::RodioSink;

#[cfg(feature = "sound")]
mod speaker {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::PathBuf;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
    use tracing::warn;

    use super::{cue_file, start_with_fallback, AudioSink};
    use crate::entities::{Cue, Track};
    use crate::error::{GameError, Result};

    fn load_error(asset: &str, reason: impl ToString) -> GameError {
        GameError::ResourceLoad {
            asset: asset.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Plays the mp3 assets found in one directory through the default
    /// output device.
    pub struct RodioSink {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        music: Option<Sink>,
        assets: PathBuf,
    }

    impl RodioSink {
        pub fn new(assets: impl Into<PathBuf>) -> Result<Self> {
            let (stream, handle) =
                OutputStream::try_default().map_err(|e| load_error("output device", e))?;
            Ok(RodioSink {
                _stream: stream,
                handle,
                music: None,
                assets: assets.into(),
            })
        }

        fn decode(&self, asset: &str) -> Result<Decoder<BufReader<File>>> {
            let file = File::open(self.assets.join(asset)).map_err(|e| load_error(asset, e))?;
            Decoder::new(BufReader::new(file)).map_err(|e| load_error(asset, e))
        }

        fn start_loop(&mut self, asset: &str) -> Result<()> {
            let source = self.decode(asset)?;
            let sink = Sink::try_new(&self.handle).map_err(|e| load_error(asset, e))?;
            sink.append(source.repeat_infinite());
            self.music = Some(sink);
            Ok(())
        }
    }

    impl AudioSink for RodioSink {
        fn play(&mut self, cue: Cue) {
            let played = self.decode(cue_file(cue)).and_then(|source| {
                self.handle
                    .play_raw(source.convert_samples())
                    .map_err(|e| load_error(cue_file(cue), e))
            });
            if let Err(err) = played {
                warn!(%err, "skipping cue");
            }
        }

        fn switch_track(&mut self, track: Track) {
            self.stop_track();
            start_with_fallback(track, |asset| self.start_loop(asset));
        }

        fn stop_track(&mut self) {
            if let Some(sink) = self.music.take() {
                sink.stop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;

    #[test]
    fn bell_rings_once_per_cue() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.handle(SoundEvent::Play(Cue::Eat));
        bell.handle(SoundEvent::Play(Cue::Victory));
        assert_eq!(bell.out, b"\x07\x07".to_vec());
    }

    #[test]
    fn bell_tracks_background_music() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.handle(SoundEvent::SwitchTrack(Track::Boss));
        assert_eq!(bell.track, Some(Track::Boss));
        bell.handle(SoundEvent::StopTrack);
        assert_eq!(bell.track, None);
        assert!(bell.out.is_empty());
    }

    fn missing(asset: &str) -> GameError {
        GameError::ResourceLoad {
            asset: asset.to_string(),
            reason: "not found".to_string(),
        }
    }

    #[test]
    fn missing_boss_track_falls_back_to_normal() {
        let mut tried = Vec::new();
        let playing = start_with_fallback(Track::Boss, |asset| {
            tried.push(asset.to_string());
            if asset == "boss.mp3" {
                Err(missing(asset))
            } else {
                Ok(())
            }
        });
        assert_eq!(playing, Some(Track::Normal));
        assert_eq!(tried, vec!["boss.mp3", "bgm.mp3"]);
    }

    #[test]
    fn loadable_track_starts_without_fallback() {
        let mut tried = Vec::new();
        let playing = start_with_fallback(Track::Boss, |asset| {
            tried.push(asset.to_string());
            Ok(())
        });
        assert_eq!(playing, Some(Track::Boss));
        assert_eq!(tried, vec!["boss.mp3"]);
    }

    #[test]
    fn missing_normal_track_is_skipped() {
        let mut attempts = 0;
        let playing = start_with_fallback(Track::Normal, |asset| {
            attempts += 1;
            Err(missing(asset))
        });
        assert_eq!(playing, None);
        assert_eq!(attempts, 1);
    }

    #[test]
    fn both_tracks_missing_leaves_silence() {
        let mut attempts = 0;
        let playing = start_with_fallback(Track::Boss, |asset| {
            attempts += 1;
            Err(missing(asset))
        });
        assert_eq!(playing, None);
        assert_eq!(attempts, 2);
    }
}
