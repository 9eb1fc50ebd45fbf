//! Synthesized fallback chime.
//!
//! Used when no sound file is configured or available, so the timer can
//! always produce an audible cue without shipping audio assets.

use std::time::Duration;

use rodio::source::{SineWave, Source};

/// One tone of the chime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in Hz
    pub frequency: f32,
    /// How long the tone plays
    pub duration: Duration,
}

/// The chime: a rising two-note "ding".
pub const CHIME_TONES: &[Tone] = &[
    Tone {
        frequency: 880.0,
        duration: Duration::from_millis(180),
    },
    Tone {
        frequency: 1318.5,
        duration: Duration::from_millis(320),
    },
];

/// Output amplitude of each tone (0.0-1.0).
pub const CHIME_VOLUME: f32 = 0.25;

/// Builds a playable source for one tone.
pub fn tone_source(tone: &Tone) -> impl Source<Item = f32> + Send + 'static {
    SineWave::new(tone.frequency)
        .take_duration(tone.duration)
        .amplify(CHIME_VOLUME)
}
