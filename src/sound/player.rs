//! Sound player implementation using rodio.
//!
//! `RodioSoundPlayer` plays phase-end sounds through the default output
//! device with rodio v0.20. Playback is detached so the timer loop never
//! waits on audio.

use std::cell::OnceCell;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::chime::{tone_source, CHIME_TONES};
use super::error::SoundError;
use super::source::SoundSource;

/// A sound player that uses rodio for audio playback.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Opens the default audio output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays a sound from the given source.
    ///
    /// A file that cannot be opened or decoded falls back to the chime.
    ///
    /// # Errors
    ///
    /// Returns an error if no sink can be created on the output stream.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        match source {
            SoundSource::File { name, path } => {
                debug!("Playing sound file: {}", name);
                match self.play_file(path) {
                    Err(e) if e.should_fallback_to_chime() => {
                        warn!("Failed to play '{}': {}, falling back to chime", name, e);
                        self.play_chime()
                    }
                    result => result,
                }
            }
            SoundSource::Chime => {
                debug!("Playing chime");
                self.play_chime()
            }
        }
    }

    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;

        let sink = self.new_sink()?;
        sink.append(decoder);
        sink.detach();

        debug!("Sound playback started (detached)");
        Ok(())
    }

    fn play_chime(&self) -> Result<(), SoundError> {
        let sink = self.new_sink()?;
        for tone in CHIME_TONES {
            sink.append(tone_source(tone));
        }
        sink.detach();

        debug!("Chime playback started (detached)");
        Ok(())
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(|e| SoundError::StreamError(e.to_string()))
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and the timer runs
/// silently.
#[must_use]
pub fn try_create_player() -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, sound disabled: {}; {}", e, e.suggestion());
            None
        }
    }
}

// ============================================================================
// LazySoundPlayer
// ============================================================================

/// Opens the audio device on the first sound, not at startup.
///
/// A session started with sound off never touches the device, yet still
/// plays once sound is switched on. A device that fails to open is tried
/// once; later sounds are skipped.
#[derive(Debug, Default)]
pub struct LazySoundPlayer {
    player: OnceCell<Option<RodioSoundPlayer>>,
}

impl LazySoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plays `source` on the device, opening it first if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if an opened device fails to play.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        match self.player.get_or_init(try_create_player) {
            Some(player) => player.play(source),
            None => {
                debug!("No audio device, skipping sound");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Device tests return early on machines without an audio device.

    #[test]
    fn test_debug_impl() {
        let Ok(player) = RodioSoundPlayer::new() else {
            return;
        };

        let debug_str = format!("{:?}", player);
        assert!(debug_str.contains("RodioSoundPlayer"));
    }

    #[test]
    fn test_missing_file_falls_back_to_chime() {
        let Ok(player) = RodioSoundPlayer::new() else {
            return;
        };

        let result = player.play(&SoundSource::file("/nonexistent/path/to/sound.wav"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_try_create_player_does_not_panic() {
        let _ = try_create_player();
    }

    #[test]
    fn test_lazy_player_opens_nothing_until_played() {
        let player = LazySoundPlayer::new();
        assert!(player.player.get().is_none());
    }

    #[test]
    fn test_lazy_player_plays_with_or_without_device() {
        let player = LazySoundPlayer::new();

        assert!(player.play(&SoundSource::chime()).is_ok());
        assert!(player.player.get().is_some());
        assert!(player.play(&SoundSource::chime()).is_ok());
    }
}
