//! User-configured interval lengths.
//!
//! Settings arrive from untrusted places (a JSON file, command-line flags,
//! interactive `set` commands). Everything funnels through [`SettingsRecord`],
//! the loosely-typed stored shape, and is clamped into a [`Settings`] value
//! before the engine ever sees it.
//!
//! The stored shape is stable:
//!
//! ```json
//! { "work": 25, "short": 5, "long": 15, "cycles": 4, "sound": true }
//! ```

mod error;
mod store;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::Phase;

pub use error::SettingsError;
pub use store::{parse_settings, JsonFileStore, MemoryStore, SettingsStore};

/// Shortest allowed phase, in minutes.
pub const MIN_MINUTES: f64 = 1.0;
/// Longest allowed phase, in minutes.
pub const MAX_MINUTES: f64 = 600.0;
/// Smallest allowed cycles-per-long-break.
pub const MIN_CYCLES: u32 = 1;
/// Largest allowed cycles-per-long-break.
pub const MAX_CYCLES: u32 = 20;

// ============================================================================
// SettingsRecord
// ============================================================================

/// Raw settings as stored or entered, before validation.
///
/// Every field is optional; absent fields keep whatever value they are
/// merged onto. Numbers are accepted as floats because the stored format
/// never promised integers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsRecord {
    /// Work duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work: Option<f64>,
    /// Short break duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<f64>,
    /// Long break duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<f64>,
    /// Completed work phases per long break
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycles: Option<f64>,
    /// Whether to play a sound when a phase ends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<bool>,
}

// ============================================================================
// Settings
// ============================================================================

/// Validated settings. Every value is within bounds by construction.
///
/// Phase lengths keep fractional minutes; only the cycle count is whole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "SettingsRecord")]
pub struct Settings {
    #[serde(rename = "work", serialize_with = "serialize_minutes")]
    work_minutes: f64,
    #[serde(rename = "short", serialize_with = "serialize_minutes")]
    short_break_minutes: f64,
    #[serde(rename = "long", serialize_with = "serialize_minutes")]
    long_break_minutes: f64,
    #[serde(rename = "cycles")]
    cycles_per_long_break: u32,
    sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_minutes: 25.0,
            short_break_minutes: 5.0,
            long_break_minutes: 15.0,
            cycles_per_long_break: 4,
            sound: true,
        }
    }
}

impl From<SettingsRecord> for Settings {
    fn from(record: SettingsRecord) -> Self {
        Settings::default().merge(&record)
    }
}

impl Settings {
    /// Overlays the fields present in `record`, clamping each into range.
    #[must_use]
    pub fn merge(&self, record: &SettingsRecord) -> Self {
        Self {
            work_minutes: record.work.map_or(self.work_minutes, clamp_minutes),
            short_break_minutes: record
                .short
                .map_or(self.short_break_minutes, clamp_minutes),
            long_break_minutes: record
                .long
                .map_or(self.long_break_minutes, clamp_minutes),
            cycles_per_long_break: record
                .cycles
                .map_or(self.cycles_per_long_break, clamp_cycles),
            sound: record.sound.unwrap_or(self.sound),
        }
    }

    /// Sets the work duration, clamped to 1-600 minutes.
    #[must_use]
    pub fn with_work_minutes(mut self, minutes: f64) -> Self {
        self.work_minutes = clamp_minutes(minutes);
        self
    }

    /// Sets the short break duration, clamped to 1-600 minutes.
    #[must_use]
    pub fn with_short_break_minutes(mut self, minutes: f64) -> Self {
        self.short_break_minutes = clamp_minutes(minutes);
        self
    }

    /// Sets the long break duration, clamped to 1-600 minutes.
    #[must_use]
    pub fn with_long_break_minutes(mut self, minutes: f64) -> Self {
        self.long_break_minutes = clamp_minutes(minutes);
        self
    }

    /// Sets cycles-per-long-break, clamped to 1-20.
    #[must_use]
    pub fn with_cycles_per_long_break(mut self, cycles: f64) -> Self {
        self.cycles_per_long_break = clamp_cycles(cycles);
        self
    }

    /// Enables or disables the end-of-phase sound.
    #[must_use]
    pub fn with_sound(mut self, sound: bool) -> Self {
        self.sound = sound;
        self
    }

    pub fn work_minutes(&self) -> f64 {
        self.work_minutes
    }

    pub fn short_break_minutes(&self) -> f64 {
        self.short_break_minutes
    }

    pub fn long_break_minutes(&self) -> f64 {
        self.long_break_minutes
    }

    pub fn cycles_per_long_break(&self) -> u32 {
        self.cycles_per_long_break
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound
    }

    /// Configured length of `phase`.
    pub fn duration_for(&self, phase: Phase) -> Duration {
        let minutes = match phase {
            Phase::Work => self.work_minutes,
            Phase::ShortBreak => self.short_break_minutes,
            Phase::LongBreak => self.long_break_minutes,
        };
        Duration::from_millis((minutes * 60_000.0).round() as u64)
    }

    /// Returns the full stored shape of these settings.
    pub fn to_record(&self) -> SettingsRecord {
        SettingsRecord {
            work: Some(self.work_minutes),
            short: Some(self.short_break_minutes),
            long: Some(self.long_break_minutes),
            cycles: Some(f64::from(self.cycles_per_long_break)),
            sound: Some(self.sound),
        }
    }
}

/// Clamps a phase length into `[MIN_MINUTES, MAX_MINUTES]`; NaN maps to the minimum.
fn clamp_minutes(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_MINUTES;
    }
    value.clamp(MIN_MINUTES, MAX_MINUTES)
}

/// Rounds to the nearest whole cycle and clamps into `[MIN_CYCLES, MAX_CYCLES]`.
fn clamp_cycles(value: f64) -> u32 {
    if value.is_nan() {
        return MIN_CYCLES;
    }
    value
        .round()
        .clamp(f64::from(MIN_CYCLES), f64::from(MAX_CYCLES)) as u32
}

/// Writes whole minutes as integers so the stored file reads `"work": 25`.
fn serialize_minutes<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if value.fract() == 0.0 {
        serializer.serialize_u64(*value as u64)
    } else {
        serializer.serialize_f64(*value)
    }
}

// ============================================================================
// Tests
// ============================================================================
