//! Settings persistence error types.
//!
//! Loading never fails (bad data falls back to defaults), so these errors
//! only surface from saving or from locating the settings file.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while locating or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The platform has no per-user configuration directory.
    #[error("no configuration directory is available on this system")]
    NoConfigDir,

    /// The settings directory could not be created.
    #[error("failed to create settings directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file could not be written.
    #[error("failed to write settings file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings could not be encoded as JSON.
    #[error("failed to encode settings: {0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_path() {
        let err = SettingsError::Write {
            path: PathBuf::from("/tmp/pomodoro/settings.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("/tmp/pomodoro/settings.json"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_create_dir_error_keeps_source() {
        use std::error::Error as _;

        let err = SettingsError::CreateDir {
            path: PathBuf::from("/tmp/blocked"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "not a directory"),
        };
        assert!(err.to_string().contains("/tmp/blocked"));
        assert!(err.source().is_some());
        assert!(SettingsError::NoConfigDir.source().is_none());
    }
}
