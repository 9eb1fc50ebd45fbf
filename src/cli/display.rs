//! Display utilities for the Pomodoro Timer CLI.
//!
//! This module provides formatted output for:
//! - The session status line
//! - Phase-end announcements
//! - Settings listings
//! - Error messages
//!
//! Every `show_*` method prints the text built by a matching `format_*`
//! function, which is what the tests check.

use std::io::Write;
use std::path::Path;

use crate::session::Reply;
use crate::settings::Settings;
use crate::types::{DisplayState, PhaseEnded, TimerSnapshot};

/// Interactive command reference.
const HELP_TEXT: &str = "\
Commands:
  s, start          start the current phase
  p, pause          pause the countdown
  r, resume         resume a paused countdown
  x, reset          back to an idle work phase, cycles cleared
  set <key> <value> change a setting (work, short, long, cycles, sound)
  status            show the timer
  h, help           show this help
  q, quit           end the session";

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the status line and a hint on how to start.
    pub fn show_session_intro(snapshot: &TimerSnapshot) {
        println!("{}", Self::format_status(snapshot));
        println!("Type 's' to start, 'h' for help.");
    }

    /// Shows the current timer status.
    pub fn show_status(snapshot: &TimerSnapshot) {
        println!("{}", Self::format_status(snapshot));
    }

    /// Prints a countdown line built by [`Display::format_countdown`] without a newline.
    pub fn show_countdown(line: &str) {
        print!("{}", line);
        let _ = std::io::stdout().flush();
    }

    /// Ends an in-place countdown line so later output starts fresh.
    pub fn end_countdown() {
        println!();
    }

    /// Announces a finished phase and what comes next.
    pub fn show_phase_ended(event: PhaseEnded, snapshot: &TimerSnapshot) {
        println!("{}", Self::format_phase_ended(event, snapshot));
    }

    /// Shows the outcome of an interactive command.
    pub fn show_reply(reply: &Reply) {
        match reply {
            Reply::Status(snapshot) => Self::show_status(snapshot),
            Reply::SettingsSaved(settings) => Self::show_settings_saved(settings),
            Reply::Help => println!("{}", HELP_TEXT),
            Reply::Quit => {}
        }
    }

    /// Shows the stored settings.
    pub fn show_settings(settings: &Settings) {
        println!("{}", Self::format_settings(settings));
    }

    /// Shows a success message after saving settings.
    pub fn show_settings_saved(settings: &Settings) {
        println!("* Settings saved");
        println!("{}", Self::format_settings(settings));
    }

    /// Shows where the settings file lives.
    pub fn show_settings_path(path: &Path) {
        println!("{}", path.display());
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    /// `Work  24:59  running  (cycles: 0)`
    pub fn format_status(snapshot: &TimerSnapshot) -> String {
        let display = DisplayState::from_snapshot(snapshot);
        let state = if display.can_pause { "running" } else { "stopped" };
        format!(
            "{}  {}  {}  (cycles: {})",
            display.phase_label, display.remaining_formatted, state, snapshot.cycle_count
        )
    }

    /// The status line prefixed with `\r`, padded to cover a shorter previous draw.
    pub fn format_countdown(snapshot: &TimerSnapshot) -> String {
        format!("\r{}  ", Self::format_status(snapshot))
    }

    /// `Work finished. Next: Short break 05:00 (type 's' to start)`
    pub fn format_phase_ended(event: PhaseEnded, snapshot: &TimerSnapshot) -> String {
        let display = DisplayState::from_snapshot(snapshot);
        format!(
            "{} finished. Next: {} {} (type 's' to start)",
            event.ended_phase.label(),
            display.phase_label,
            display.remaining_formatted
        )
    }

    /// One `key: value` line per setting.
    pub fn format_settings(settings: &Settings) -> String {
        format!(
            "work:   {} min\nshort:  {} min\nlong:   {} min\ncycles: {}\nsound:  {}",
            settings.work_minutes(),
            settings.short_break_minutes(),
            settings.long_break_minutes(),
            settings.cycles_per_long_break(),
            if settings.sound_enabled() { "on" } else { "off" }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;
    use std::time::Duration;

    fn snapshot(phase: Phase, running: bool, remaining_secs: u64) -> TimerSnapshot {
        TimerSnapshot {
            phase,
            running,
            remaining: Duration::from_secs(remaining_secs),
            cycle_count: 1,
        }
    }

    // ------------------------------------------------------------------------
    // Status Tests
    // ------------------------------------------------------------------------

    mod status_tests {
        use super::*;

        #[test]
        fn test_format_running() {
            let line = Display::format_status(&snapshot(Phase::Work, true, 1499));
            assert_eq!(line, "Work  24:59  running  (cycles: 1)");
        }

        #[test]
        fn test_format_stopped() {
            let line = Display::format_status(&snapshot(Phase::ShortBreak, false, 300));
            assert_eq!(line, "Short break  05:00  stopped  (cycles: 1)");

            let line = Display::format_status(&snapshot(Phase::LongBreak, false, 754));
            assert_eq!(line, "Long break  12:34  stopped  (cycles: 1)");
        }

        #[test]
        fn test_format_truncates_seconds() {
            let mut snap = snapshot(Phase::Work, true, 59);
            snap.remaining += Duration::from_millis(999);
            assert!(Display::format_status(&snap).contains("00:59"));
        }

        #[test]
        fn test_format_countdown_redraws_in_place() {
            let line = Display::format_countdown(&snapshot(Phase::Work, true, 1499));
            assert_eq!(line, "\rWork  24:59  running  (cycles: 1)  ");
            assert!(!line.contains('\n'));
        }
    }

    // ------------------------------------------------------------------------
    // Message Tests
    // ------------------------------------------------------------------------

    mod message_tests {
        use super::*;

        #[test]
        fn test_format_phase_ended() {
            let event = PhaseEnded {
                ended_phase: Phase::Work,
            };
            let text = Display::format_phase_ended(event, &snapshot(Phase::ShortBreak, false, 300));
            assert_eq!(
                text,
                "Work finished. Next: Short break 05:00 (type 's' to start)"
            );
        }

        #[test]
        fn test_format_settings() {
            let text = Display::format_settings(&Settings::default());
            assert!(text.contains("work:   25 min"));
            assert!(text.contains("short:  5 min"));
            assert!(text.contains("long:   15 min"));
            assert!(text.contains("cycles: 4"));
            assert!(text.contains("sound:  on"));
        }

        #[test]
        fn test_format_settings_fractional_minutes() {
            let text = Display::format_settings(&Settings::default().with_work_minutes(1.5));
            assert!(text.contains("work:   1.5 min"));
        }

        #[test]
        fn test_help_lists_commands() {
            for command in ["start", "pause", "resume", "reset", "set", "status", "quit"] {
                assert!(HELP_TEXT.contains(command), "{}", command);
            }
        }

        #[test]
        fn test_show_functions_do_not_panic() {
            let snap = snapshot(Phase::Work, false, 1500);
            Display::show_session_intro(&snap);
            Display::show_reply(&Reply::Status(snap));
            Display::show_reply(&Reply::Help);
            Display::show_reply(&Reply::Quit);
            Display::show_countdown(&Display::format_countdown(&snapshot(Phase::Work, true, 90)));
            Display::end_countdown();
            Display::show_settings(&Settings::default());
            Display::show_settings_path(Path::new("/tmp/settings.json"));
            Display::show_error("something went wrong");
        }
    }
}
