//! Settings storage backends.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use super::error::SettingsError;
use super::Settings;

/// Directory name under the platform config dir.
const APP_DIR_NAME: &str = "pomodoro";

/// File name of the settings record.
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Holds the last-saved settings record.
pub trait SettingsStore {
    /// Loads settings, falling back to defaults when nothing usable is stored.
    fn load(&self) -> Settings;

    /// Persists `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn save(&self, settings: &Settings) -> Result<(), SettingsError>;
}

/// Parses a stored record; malformed data yields the defaults.
pub fn parse_settings(raw: &str) -> Settings {
    if raw.trim().is_empty() {
        return Settings::default();
    }
    match serde_json::from_str(raw) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Stored settings are malformed, using defaults: {}", e);
            Settings::default()
        }
    }
}

// ============================================================================
// JsonFileStore
// ============================================================================

/// Stores settings as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at `<config_dir>/pomodoro/settings.json`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::NoConfigDir` if the platform has no config dir.
    pub fn at_default_location() -> Result<Self, SettingsError> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Returns the default settings file path.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let config_dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(config_dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Returns the settings file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Settings {
        match fs::read_to_string(&self.path) {
            Ok(raw) => parse_settings(&raw),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings file at {}, using defaults", self.path.display());
                Settings::default()
            }
            Err(e) => {
                warn!(
                    "Could not read settings file {}, using defaults: {}",
                    self.path.display(),
                    e
                );
                Settings::default()
            }
        }
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!("Settings saved to {}", self.path.display());
        Ok(())
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory store holding the raw record text, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: Mutex<Option<String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with raw record text.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }

    /// Returns the raw record text currently stored.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.raw
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Settings {
        self.raw().map_or_else(Settings::default, |raw| parse_settings(&raw))
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let json = serde_json::to_string(settings)?;
        *self.raw.lock().unwrap_or_else(PoisonError::into_inner) = Some(json);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
