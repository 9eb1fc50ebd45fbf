//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the Pomodoro Timer CLI.
//! It includes:
//! - Timer engine: phases, countdown and cycle counting
//! - Validated, persisted settings
//! - Interactive session driver on tokio
//! - Desktop notifications and sound cues for finished phases
//! - CLI command parsing and display utilities

pub mod cli;
pub mod engine;
pub mod notification;
pub mod session;
pub mod settings;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use engine::{Clock, ManualClock, MonotonicClock, TimerEngine};
pub use types::{format_remaining, DisplayState, Phase, PhaseEnded, Tick, TimerSnapshot};

pub use settings::{
    JsonFileStore, MemoryStore, Settings, SettingsError, SettingsRecord, SettingsStore,
};

pub use notification::{
    DesktopNotifier, MockNotifier, NotificationError, NotificationPermission, Notifier,
};

pub use session::{Reply, Session, SessionCommand};

pub use sound::{MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer, SoundSource};
