//! Command definitions for the Pomodoro Timer CLI.
//!
//! Uses clap derive macro for argument parsing. Durations and cycle counts
//! are accepted as any number and clamped later, so out-of-range input never
//! fails to parse.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::session::parse_switch;
use crate::settings::SettingsRecord;

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Timer CLI
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro",
    version,
    about = "Pomodoro timer for the terminal",
    long_about = "A Pomodoro timer that runs in the terminal.\n\
                  Work and break phases alternate, with a long break after every Nth work phase.\n\
                  Phase ends are announced with a desktop notification and a sound.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Read and write settings at this path instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub settings_file: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interactive timer session
    Run(RunArgs),

    /// Show or change the stored settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// `settings` subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SettingsAction {
    /// Print the stored settings
    Show,

    /// Change stored settings (out-of-range values are clamped)
    Set(SetArgs),

    /// Restore the default settings
    Reset,

    /// Print the settings file location
    Path,
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command. Overrides last for this session only.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Work duration in minutes (1-600)
    #[arg(long, value_name = "MINUTES", allow_hyphen_values = true)]
    pub work: Option<f64>,

    /// Short break duration in minutes (1-600)
    #[arg(long, value_name = "MINUTES", allow_hyphen_values = true)]
    pub short: Option<f64>,

    /// Long break duration in minutes (1-600)
    #[arg(long, value_name = "MINUTES", allow_hyphen_values = true)]
    pub long: Option<f64>,

    /// Work phases per long break (1-20)
    #[arg(long, value_name = "COUNT", allow_hyphen_values = true)]
    pub cycles: Option<f64>,

    /// Disable phase-end sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Disable desktop notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Audio file to play when a phase ends
    #[arg(long, value_name = "PATH", conflicts_with = "no_sound")]
    pub sound: Option<PathBuf>,
}

impl RunArgs {
    /// Session-only overrides for the stored settings.
    #[must_use]
    pub fn overrides(&self) -> SettingsRecord {
        SettingsRecord {
            work: self.work,
            short: self.short,
            long: self.long,
            cycles: self.cycles,
            sound: self.no_sound.then_some(false),
        }
    }
}

// ============================================================================
// Settings Set Arguments
// ============================================================================

/// Arguments for `settings set`
#[derive(Args, Debug, Clone, Default)]
#[command(group(
    clap::ArgGroup::new("fields")
        .required(true)
        .multiple(true)
        .args(["work", "short", "long", "cycles", "sound"])
))]
pub struct SetArgs {
    /// Work duration in minutes (1-600)
    #[arg(long, value_name = "MINUTES", allow_hyphen_values = true)]
    pub work: Option<f64>,

    /// Short break duration in minutes (1-600)
    #[arg(long, value_name = "MINUTES", allow_hyphen_values = true)]
    pub short: Option<f64>,

    /// Long break duration in minutes (1-600)
    #[arg(long, value_name = "MINUTES", allow_hyphen_values = true)]
    pub long: Option<f64>,

    /// Work phases per long break (1-20)
    #[arg(long, value_name = "COUNT", allow_hyphen_values = true)]
    pub cycles: Option<f64>,

    /// Play a sound when a phase ends (on/off)
    #[arg(long, value_name = "BOOL", value_parser = validate_switch)]
    pub sound: Option<bool>,
}

impl SetArgs {
    /// The fields given on the command line.
    #[must_use]
    pub fn to_record(&self) -> SettingsRecord {
        SettingsRecord {
            work: self.work,
            short: self.short,
            long: self.long,
            cycles: self.cycles,
            sound: self.sound,
        }
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Accepts on/off, true/false, yes/no and 1/0.
fn validate_switch(s: &str) -> Result<bool, String> {
    parse_switch(s).ok_or_else(|| format!("expected on or off, got '{}'", s))
}

// ============================================================================
// Tests
// ============================================================================
