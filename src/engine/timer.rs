//! Timer engine for the Pomodoro Timer.
//!
//! This module provides the core state machine:
//! - Phase transitions (Work → Short/Long break → Work)
//! - Countdown derived from a stored deadline, never decremented
//! - Cycle counting for long breaks
//! - Phase-end signalling through the value returned by `tick`
//!
//! The engine performs no I/O. Callers schedule `tick`, and react to
//! [`Tick::PhaseEnded`] by notifying the user.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::engine::clock::{Clock, MonotonicClock};
use crate::settings::Settings;
use crate::types::{DisplayState, Phase, PhaseEnded, Tick, TimerSnapshot};

// ============================================================================
// Countdown
// ============================================================================

/// Either a stored remaining duration or a deadline, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Countdown {
    /// Not running; `remaining` is authoritative.
    Stopped { remaining: Duration },
    /// Running until `deadline`.
    Running { deadline: Instant },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Pomodoro state machine.
///
/// All operations are total: a call that does not apply to the current
/// state (starting twice, pausing while paused) is ignored.
#[derive(Debug)]
pub struct TimerEngine<C = MonotonicClock> {
    clock: C,
    settings: Settings,
    phase: Phase,
    countdown: Countdown,
    cycle_count: u32,
}

impl TimerEngine<MonotonicClock> {
    /// Creates an engine on the system monotonic clock.
    pub fn new(settings: Settings) -> Self {
        Self::with_clock(settings, MonotonicClock)
    }
}

impl<C: Clock> TimerEngine<C> {
    /// Creates an engine idle at the start of a work phase.
    pub fn with_clock(settings: Settings, clock: C) -> Self {
        Self {
            clock,
            settings,
            phase: Phase::Work,
            countdown: Countdown::Stopped {
                remaining: settings.duration_for(Phase::Work),
            },
            cycle_count: 0,
        }
    }

    /// Starts counting down the current remaining time.
    pub fn start(&mut self) {
        match self.countdown {
            Countdown::Stopped { remaining } => {
                self.run_for(remaining);
                debug!(phase = self.phase.as_str(), ?remaining, "Timer started");
            }
            Countdown::Running { .. } => debug!("Start ignored, timer already running"),
        }
    }

    /// Freezes the countdown.
    pub fn pause(&mut self) {
        match self.countdown {
            Countdown::Running { deadline } => {
                let remaining = deadline.saturating_duration_since(self.clock.now());
                self.countdown = Countdown::Stopped { remaining };
                debug!(phase = self.phase.as_str(), ?remaining, "Timer paused");
            }
            Countdown::Stopped { .. } => debug!("Pause ignored, timer not running"),
        }
    }

    /// Continues a paused countdown. Ignored when nothing is left to count.
    pub fn resume(&mut self) {
        match self.countdown {
            Countdown::Stopped { remaining } if !remaining.is_zero() => {
                self.run_for(remaining);
                debug!(phase = self.phase.as_str(), ?remaining, "Timer resumed");
            }
            _ => debug!("Resume ignored"),
        }
    }

    /// Returns to an idle work phase and clears the cycle count.
    pub fn reset(&mut self) {
        self.phase = Phase::Work;
        self.cycle_count = 0;
        self.countdown = Countdown::Stopped {
            remaining: self.settings.duration_for(Phase::Work),
        };
        debug!("Timer reset");
    }

    /// Samples the engine at the current clock time.
    pub fn tick(&mut self) -> Tick {
        let now = self.clock.now();
        self.tick_at(now)
    }

    /// Returns true if a tick at `now` would end the running phase.
    pub fn is_due_at(&self, now: Instant) -> bool {
        match self.countdown {
            Countdown::Running { deadline } => deadline <= now,
            Countdown::Stopped { .. } => false,
        }
    }

    /// Samples the engine at `now`.
    ///
    /// This is the only operation that can end a phase.
    pub fn tick_at(&mut self, now: Instant) -> Tick {
        match self.countdown {
            Countdown::Stopped { remaining } => Tick::Idle { remaining },
            Countdown::Running { deadline } => {
                let left = deadline.saturating_duration_since(now);
                if !left.is_zero() {
                    return Tick::Running { remaining: left };
                }

                let ended_phase = self.phase;
                self.advance_phase();
                info!(
                    ended = ended_phase.as_str(),
                    next = self.phase.as_str(),
                    cycles = self.cycle_count,
                    "Phase finished"
                );
                Tick::PhaseEnded(PhaseEnded { ended_phase })
            }
        }
    }

    /// Replaces the settings. An idle timer picks up the new phase length.
    pub fn apply_settings_change(&mut self, settings: Settings) {
        self.settings = settings;
        if let Countdown::Stopped { .. } = self.countdown {
            self.countdown = Countdown::Stopped {
                remaining: settings.duration_for(self.phase),
            };
        }
        debug!(running = self.is_running(), "Settings applied");
    }

    /// Moves to the next phase and leaves it idle.
    fn advance_phase(&mut self) {
        self.phase = match self.phase {
            Phase::Work => {
                self.cycle_count = self.cycle_count.saturating_add(1);
                if self.cycle_count % self.settings.cycles_per_long_break() == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };
        self.countdown = Countdown::Stopped {
            remaining: self.settings.duration_for(self.phase),
        };
    }

    fn run_for(&mut self, remaining: Duration) {
        self.countdown = Countdown::Running {
            deadline: self.clock.now() + remaining,
        };
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.countdown, Countdown::Running { .. })
    }

    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Remaining time without advancing the state machine.
    pub fn remaining(&self) -> Duration {
        match self.countdown {
            Countdown::Stopped { remaining } => remaining,
            Countdown::Running { deadline } => {
                deadline.saturating_duration_since(self.clock.now())
            }
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            running: self.is_running(),
            remaining: self.remaining(),
            cycle_count: self.cycle_count,
        }
    }

    pub fn display(&self) -> DisplayState {
        DisplayState::from_snapshot(&self.snapshot())
    }
}

// ============================================================================
// Tests
// ============================================================================
