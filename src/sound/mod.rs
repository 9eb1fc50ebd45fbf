//! Sound cue played when a phase ends.
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundPlayer    │ ← Session talks to this
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   SoundSource    │────▶│  Audio file      │
//! │                  │     │  (--sound, /usr) │
//! │                  │     ├──────────────────┤
//! │                  │────▶│  Chime           │
//! └──────────────────┘     │  (synthesized)   │
//!                          └──────────────────┘
//! ```
//!
//! Playback failures are never fatal; the session logs them and carries on.

mod chime;
mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

pub use chime::{Tone, CHIME_TONES};
pub use error::SoundError;
pub use player::{try_create_player, LazySoundPlayer, RodioSoundPlayer};
pub use source::{resolve_sound, SoundSource};

/// Trait for sound playback implementations.
pub trait SoundPlayer {
    /// Starts playing `source` without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }
}

impl SoundPlayer for LazySoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        LazySoundPlayer::play(self, source)
    }
}

// ============================================================================
// MockSoundPlayer
// ============================================================================

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.play_calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(source.clone());
        Ok(())
    }
}
