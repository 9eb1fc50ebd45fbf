//! Parsing of interactive session commands.
//!
//! One command per input line:
//!
//! | Input                     | Command            |
//! |---------------------------|--------------------|
//! | `s`, `start`              | start              |
//! | `p`, `pause`              | pause              |
//! | `r`, `resume`             | resume             |
//! | `x`, `reset`              | reset              |
//! | `set <key> <value>`       | change a setting   |
//! | `status`                  | print status       |
//! | `h`, `help`, `?`          | print help         |
//! | `q`, `quit`, `exit`       | end the session    |

use std::str::FromStr;

use thiserror::Error;

use crate::settings::{Settings, SettingsRecord};

/// Keys accepted by `set`.
pub const SETTING_KEYS: &[&str] = &["work", "short", "long", "cycles", "sound"];

// ============================================================================
// SessionCommand
// ============================================================================

/// A command typed by the user during a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionCommand {
    Start,
    Pause,
    Resume,
    Reset,
    /// Change one setting and save it
    Set(SettingChange),
    Status,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match name.to_lowercase().as_str() {
            "s" | "start" => Self::Start,
            "p" | "pause" => Self::Pause,
            "r" | "resume" => Self::Resume,
            "x" | "reset" => Self::Reset,
            "status" => Self::Status,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            "set" => {
                let key = words.next().ok_or(CommandError::MissingKey)?;
                let value = words
                    .next()
                    .ok_or_else(|| CommandError::MissingValue(key.to_string()))?;
                Self::Set(SettingChange::parse(key, value)?)
            }
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        if let Some(extra) = words.next() {
            return Err(CommandError::UnexpectedArgument(extra.to_string()));
        }
        Ok(command)
    }
}

// ============================================================================
// SettingChange
// ============================================================================

/// A single setting edit. Numeric values are clamped when applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingChange {
    WorkMinutes(f64),
    ShortBreakMinutes(f64),
    LongBreakMinutes(f64),
    CyclesPerLongBreak(f64),
    Sound(bool),
}

impl SettingChange {
    /// Parses a `<key> <value>` pair.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown key or a value of the wrong type.
    pub fn parse(key: &str, value: &str) -> Result<Self, CommandError> {
        let number = || {
            value
                .parse::<f64>()
                .map_err(|_| CommandError::InvalidNumber {
                    key: key.to_string(),
                    value: value.to_string(),
                })
        };

        match key.to_lowercase().as_str() {
            "work" => Ok(Self::WorkMinutes(number()?)),
            "short" => Ok(Self::ShortBreakMinutes(number()?)),
            "long" => Ok(Self::LongBreakMinutes(number()?)),
            "cycles" => Ok(Self::CyclesPerLongBreak(number()?)),
            "sound" => parse_switch(value)
                .map(Self::Sound)
                .ok_or_else(|| CommandError::InvalidSwitch(value.to_string())),
            other => Err(CommandError::UnknownSetting(other.to_string())),
        }
    }

    /// Returns `settings` with this change applied.
    #[must_use]
    pub fn apply(self, settings: Settings) -> Settings {
        match self {
            Self::WorkMinutes(minutes) => settings.with_work_minutes(minutes),
            Self::ShortBreakMinutes(minutes) => settings.with_short_break_minutes(minutes),
            Self::LongBreakMinutes(minutes) => settings.with_long_break_minutes(minutes),
            Self::CyclesPerLongBreak(cycles) => settings.with_cycles_per_long_break(cycles),
            Self::Sound(enabled) => settings.with_sound(enabled),
        }
    }

    /// Drops the session override for the field this change sets.
    pub fn clear_override(self, overrides: &mut SettingsRecord) {
        match self {
            Self::WorkMinutes(_) => overrides.work = None,
            Self::ShortBreakMinutes(_) => overrides.short = None,
            Self::LongBreakMinutes(_) => overrides.long = None,
            Self::CyclesPerLongBreak(_) => overrides.cycles = None,
            Self::Sound(_) => overrides.sound = None,
        }
    }
}

/// Parses an on/off value.
pub fn parse_switch(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

// ============================================================================
// CommandError
// ============================================================================

/// Why an input line could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("set needs a setting name")]
    MissingKey,

    #[error("set {0} needs a value")]
    MissingValue(String),

    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    #[error("{key} expects a number, got '{value}'")]
    InvalidNumber { key: String, value: String },

    #[error("sound expects on or off, got '{0}'")]
    InvalidSwitch(String),

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

impl CommandError {
    /// Returns a hint for the user.
    #[must_use]
    pub fn suggestion(&self) -> String {
        match self {
            Self::MissingKey | Self::UnknownSetting(_) => {
                format!("settings: {}", SETTING_KEYS.join(", "))
            }
            _ => "type 'help' for the list of commands".to_string(),
        }
    }
}
