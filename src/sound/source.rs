//! Sound source management.
//!
//! A phase-end sound is either an audio file on disk (user-selected or a
//! well-known system sound) or a synthesized chime that needs no file.

use std::path::{Path, PathBuf};

use super::error::SoundError;

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// An audio file on disk.
    File {
        /// Display name (the file stem).
        name: String,
        /// Full path to the sound file.
        path: PathBuf,
    },
    /// The synthesized two-tone chime.
    Chime,
}

impl SoundSource {
    /// Creates a file source named after the file stem.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::File { name, path }
    }

    /// Creates a file source after checking that the file is usable.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::FileNotFound` if the file does not exist and
    /// `SoundError::UnsupportedFormat` if its extension is not a known
    /// audio format.
    pub fn file_validated(path: impl Into<PathBuf>) -> Result<Self, SoundError> {
        let path = path.into();
        if !is_supported(&path) {
            return Err(SoundError::UnsupportedFormat(path.display().to_string()));
        }
        if !path.is_file() {
            return Err(SoundError::FileNotFound(path.display().to_string()));
        }
        Ok(Self::file(path))
    }

    #[must_use]
    pub fn chime() -> Self {
        Self::Chime
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } => name,
            Self::Chime => "chime",
        }
    }

}

/// Audio file extensions rodio decodes with its default features.
const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "oga", "flac"];

/// Well-known system sounds, in order of preference.
const SYSTEM_SOUND_CANDIDATES: &[&str] = &[
    "/usr/share/sounds/freedesktop/stereo/complete.oga",
    "/usr/share/sounds/freedesktop/stereo/bell.oga",
];

fn is_supported(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Picks the sound to play when a phase ends.
///
/// Uses `preferred` when it is a usable file, otherwise the first installed
/// system sound, otherwise the chime.
#[must_use]
pub fn resolve_sound(preferred: Option<&Path>) -> SoundSource {
    if let Some(path) = preferred {
        match SoundSource::file_validated(path) {
            Ok(source) => return source,
            Err(e) => tracing::warn!("{}; {}", e, e.suggestion()),
        }
    }

    SYSTEM_SOUND_CANDIDATES
        .iter()
        .find_map(|candidate| SoundSource::file_validated(*candidate).ok())
        .unwrap_or(SoundSource::Chime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_source_name_from_stem() {
        let source = SoundSource::file("/sounds/ding.mp3");
        assert_eq!(source.name(), "ding");
        assert_eq!(
            source,
            SoundSource::File {
                name: "ding".to_string(),
                path: PathBuf::from("/sounds/ding.mp3"),
            }
        );
    }

    #[test]
    fn test_chime_source() {
        let source = SoundSource::chime();
        assert_eq!(source, SoundSource::Chime);
        assert_eq!(source.name(), "chime");
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported(Path::new("a.wav")));
        assert!(is_supported(Path::new("a.MP3")));
        assert!(is_supported(Path::new("a.oga")));
        assert!(!is_supported(Path::new("a.txt")));
        assert!(!is_supported(Path::new("Glass.aiff")));
        assert!(!is_supported(Path::new("noext")));
    }

    #[test]
    fn test_file_validated_missing_file() {
        let result = SoundSource::file_validated("/nonexistent/ding.mp3");
        assert!(matches!(result, Err(SoundError::FileNotFound(_))));
    }

    #[test]
    fn test_file_validated_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let result = SoundSource::file_validated(&path);
        assert!(matches!(result, Err(SoundError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_file_validated_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ding.wav");
        std::fs::write(&path, b"RIFF").unwrap();

        let source = SoundSource::file_validated(&path).unwrap();
        assert_eq!(source.name(), "ding");
    }

    #[test]
    fn test_resolve_prefers_given_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bell.wav");
        std::fs::write(&path, b"RIFF").unwrap();

        assert_eq!(resolve_sound(Some(&path)), SoundSource::file(&path));
    }

    #[test]
    fn test_resolve_falls_back_without_panic() {
        let source = resolve_sound(Some(Path::new("/nonexistent/bell.wav")));
        assert!(!source.name().is_empty());
    }
}
