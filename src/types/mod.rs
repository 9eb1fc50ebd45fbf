//! Core data types for the Pomodoro Timer.
//!
//! This module defines the data structures shared by the engine and its
//! collaborators:
//! - Timer phases and their labels
//! - Signals returned from `TimerEngine::tick`
//! - Read-only snapshots and the display projection

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============================================================================
// Phase
// ============================================================================

/// The interval type currently being timed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Focused work interval
    #[default]
    Work,
    /// Short break between work intervals
    ShortBreak,
    /// Long break after every Nth completed work interval
    LongBreak,
}

impl Phase {
    /// Returns the machine-readable name of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::ShortBreak => "short_break",
            Phase::LongBreak => "long_break",
        }
    }

    /// Returns the human-readable label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::ShortBreak => "Short break",
            Phase::LongBreak => "Long break",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Signals
// ============================================================================

/// Emitted exactly once when a running phase reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseEnded {
    /// The phase that just finished
    #[serde(rename = "endedPhase")]
    pub ended_phase: Phase,
}

/// Result of sampling the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not running; `remaining` is the authoritative stored value.
    Idle {
        /// Remaining time in the current phase
        remaining: Duration,
    },
    /// Still counting down.
    Running {
        /// Time left until the phase ends
        remaining: Duration,
    },
    /// The phase expired on this sample and the engine advanced.
    PhaseEnded(PhaseEnded),
}

impl Tick {
    /// Returns the phase-end signal, if this sample produced one.
    pub fn phase_ended(&self) -> Option<PhaseEnded> {
        match self {
            Tick::PhaseEnded(event) => Some(*event),
            _ => None,
        }
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Point-in-time view of the engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSnapshot {
    /// Current phase
    pub phase: Phase,
    /// Whether the countdown is active
    pub running: bool,
    /// Remaining time (derived from the clock while running)
    pub remaining: Duration,
    /// Completed work phases since the last reset
    pub cycle_count: u32,
}

// ============================================================================
// DisplayState
// ============================================================================

/// Projection consumed by a rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayState {
    /// Label of the current phase
    pub phase_label: String,
    /// Remaining time as `MM:SS`
    pub remaining_formatted: String,
    /// Start is available
    pub can_start: bool,
    /// Pause is available
    pub can_pause: bool,
    /// Resume is available
    pub can_resume: bool,
}

impl DisplayState {
    /// Derives the projection purely from a snapshot.
    pub fn from_snapshot(snapshot: &TimerSnapshot) -> Self {
        Self {
            phase_label: snapshot.phase.label().to_string(),
            remaining_formatted: format_remaining(snapshot.remaining),
            can_start: !snapshot.running,
            can_pause: snapshot.running,
            can_resume: !snapshot.running && !snapshot.remaining.is_zero(),
        }
    }
}

/// Formats a duration as `MM:SS`, truncating partial seconds.
///
/// Minutes are not wrapped into hours, so a 600 minute phase renders as `600:00`.
pub fn format_remaining(remaining: Duration) -> String {
    let total_seconds = remaining.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

// ============================================================================
// Tests
// ============================================================================
