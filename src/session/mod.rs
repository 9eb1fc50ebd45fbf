//! Interactive timer session.
//!
//! A session owns one [`TimerEngine`] and drives it from a single tokio task:
//!
//! ```text
//!  interval (200 ms) ──▶ on_tick ──▶ PhaseEnded ──▶ Notifier / SoundPlayer
//!  input lines ───────▶ SessionCommand ──▶ handle_command ──▶ Reply
//!  Ctrl-C ────────────▶ end
//! ```
//!
//! Notification and sound failures are logged and never stop the timer.

pub mod command;

use std::io::BufRead;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::cli::Display;
use crate::engine::{Clock, MonotonicClock, TimerEngine};
use crate::notification::{dispatch_phase_end, Notifier};
use crate::settings::{Settings, SettingsRecord, SettingsStore};
use crate::sound::{SoundPlayer, SoundSource};
use crate::types::{PhaseEnded, TimerSnapshot};

pub use command::{parse_switch, CommandError, SessionCommand, SettingChange, SETTING_KEYS};

/// How often the engine is sampled.
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Outcome of a handled command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Current timer state
    Status(TimerSnapshot),
    /// Settings were saved; carries the values now in effect
    SettingsSaved(Settings),
    Help,
    Quit,
}

// ============================================================================
// Session
// ============================================================================

/// Runs the timer against injected collaborators.
pub struct Session<'a, C: Clock = MonotonicClock> {
    engine: TimerEngine<C>,
    store: &'a dyn SettingsStore,
    notifier: &'a dyn Notifier,
    player: &'a dyn SoundPlayer,
    sound: SoundSource,
    /// Values from the command line that apply to this session only
    overrides: SettingsRecord,
    permission_requested: bool,
}

impl<'a, C: Clock> Session<'a, C> {
    /// Loads the stored settings, overlays `overrides` and builds an idle engine.
    pub fn new(
        clock: C,
        store: &'a dyn SettingsStore,
        notifier: &'a dyn Notifier,
        player: &'a dyn SoundPlayer,
        overrides: SettingsRecord,
    ) -> Self {
        let settings = store.load().merge(&overrides);
        debug!(?settings, "Session created");

        Self {
            engine: TimerEngine::with_clock(settings, clock),
            store,
            notifier,
            player,
            sound: SoundSource::Chime,
            overrides,
            permission_requested: false,
        }
    }

    /// Sets the sound played when a phase ends.
    #[must_use]
    pub fn with_sound(mut self, sound: SoundSource) -> Self {
        debug!(sound = sound.name(), "Phase-end sound selected");
        self.sound = sound;
        self
    }

    pub fn engine(&self) -> &TimerEngine<C> {
        &self.engine
    }

    pub fn sound(&self) -> &SoundSource {
        &self.sound
    }

    /// Applies a user command to the engine.
    ///
    /// The first command also asks the notifier for permission.
    ///
    /// # Errors
    ///
    /// Returns an error if a changed setting cannot be saved. The engine is
    /// left untouched in that case.
    pub fn handle_command(&mut self, command: SessionCommand) -> Result<Reply> {
        self.request_permission_once();

        match command {
            SessionCommand::Start => self.engine.start(),
            SessionCommand::Pause => self.engine.pause(),
            SessionCommand::Resume => self.engine.resume(),
            SessionCommand::Reset => {
                self.reload_settings();
                self.engine.reset();
            }
            SessionCommand::Set(change) => return self.change_setting(change),
            SessionCommand::Status => {}
            SessionCommand::Help => return Ok(Reply::Help),
            SessionCommand::Quit => return Ok(Reply::Quit),
        }

        Ok(Reply::Status(self.engine.snapshot()))
    }

    /// Samples the engine and reacts to a phase end.
    ///
    /// Settings are re-read right before a phase ends, so the next phase
    /// picks up edits saved from another process.
    pub fn on_tick(&mut self) -> Option<PhaseEnded> {
        let now = self.engine.clock().now();
        if self.engine.is_due_at(now) {
            self.reload_settings();
        }
        let event = self.engine.tick_at(now).phase_ended()?;

        match dispatch_phase_end(self.notifier, event) {
            Ok(shown) => debug!(shown, "Phase end notification handled"),
            Err(e) => warn!("Notification failed: {}; {}", e, e.suggestion()),
        }

        if self.engine.settings().sound_enabled() {
            if let Err(e) = self.player.play(&self.sound) {
                warn!("Sound failed: {}; {}", e, e.suggestion());
            }
        }

        Some(event)
    }

    /// Runs until `quit`, end of input or Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if listening for Ctrl-C fails.
    pub async fn run(&mut self, mut lines: mpsc::UnboundedReceiver<String>) -> Result<()> {
        let mut ticker = interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Display::show_session_intro(&self.engine.snapshot());
        let mut countdown = CountdownLine::default();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Some(event) = self.on_tick() {
                        countdown.finish();
                        Display::show_phase_ended(event, &self.engine.snapshot());
                    } else if self.engine.is_running() {
                        countdown.draw(&self.engine.snapshot());
                    }
                }
                line = lines.recv() => {
                    countdown.finish();
                    let Some(line) = line else {
                        debug!("Input closed, ending session");
                        break;
                    };
                    if !self.handle_line(&line) {
                        break;
                    }
                }
                result = tokio::signal::ctrl_c() => {
                    countdown.finish();
                    result.context("Failed to listen for Ctrl-C")?;
                    debug!("Interrupted, ending session");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Handles one input line. Returns false when the session should end.
    fn handle_line(&mut self, line: &str) -> bool {
        if line.trim().is_empty() {
            return true;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(e) => {
                Display::show_error(&format!("{} ({})", e, e.suggestion()));
                return true;
            }
        };

        match self.handle_command(command) {
            Ok(Reply::Quit) => false,
            Ok(reply) => {
                Display::show_reply(&reply);
                true
            }
            Err(e) => {
                Display::show_error(&format!("{:#}", e));
                true
            }
        }
    }

    /// Saves one changed setting, reloads and applies it.
    fn change_setting(&mut self, change: SettingChange) -> Result<Reply> {
        let stored = change.apply(self.store.load());
        self.store
            .save(&stored)
            .context("Failed to save settings")?;

        change.clear_override(&mut self.overrides);
        let settings = self.reload_settings();

        Ok(Reply::SettingsSaved(settings))
    }

    /// Applies the stored settings with this session's overrides on top.
    fn reload_settings(&mut self) -> Settings {
        let settings = self.store.load().merge(&self.overrides);
        self.engine.apply_settings_change(settings);
        settings
    }

    fn request_permission_once(&mut self) {
        if self.permission_requested {
            return;
        }
        self.permission_requested = true;
        let permission = self.notifier.request_permission();
        debug!(?permission, "Notification permission requested");
    }
}

/// The status line redrawn in place while a phase runs.
#[derive(Debug, Default)]
struct CountdownLine {
    drawn: Option<String>,
}

impl CountdownLine {
    /// Redraws when the visible text changed. Returns true if it drew.
    fn draw(&mut self, snapshot: &TimerSnapshot) -> bool {
        let line = Display::format_countdown(snapshot);
        if self.drawn.as_ref() == Some(&line) {
            return false;
        }
        Display::show_countdown(&line);
        self.drawn = Some(line);
        true
    }

    /// Moves past a drawn line so other output starts on its own line.
    fn finish(&mut self) {
        if self.drawn.take().is_some() {
            Display::end_countdown();
        }
    }
}

/// Reads stdin lines on a plain thread and forwards them to a session.
///
/// A blocking read cannot be cancelled, so it stays off the runtime and
/// never holds up shutdown. The channel closes at end of input.
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

// ============================================================================
// Tests
// ============================================================================
