//! Sound sources and the cue-to-sound mapping.

use std::path::PathBuf;

use super::embedded::{default_tone, find_embedded_tone, EmbeddedTone, DEFAULT_TONE};
use crate::presentation::AudioCue;

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// An audio file on disk chosen by the user.
    File {
        /// Display name (the file stem)
        name: String,
        /// Full path to the sound file
        path: PathBuf,
        /// Embedded tone played when the file cannot be played
        fallback: String,
    },
    /// A synthesized tone compiled into the binary.
    Embedded {
        /// Name of the tone (e.g., "work")
        name: String,
    },
}

impl SoundSource {
    /// Creates a file source named after the file stem.
    ///
    /// The fallback is the default tone; see [`with_fallback`](Self::with_fallback).
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::File {
            name,
            path,
            fallback: DEFAULT_TONE.to_string(),
        }
    }

    /// Sets the embedded tone a file source falls back to.
    ///
    /// Embedded sources are returned unchanged.
    #[must_use]
    pub fn with_fallback(self, tone: impl Into<String>) -> Self {
        match self {
            Self::File { name, path, .. } => Self::File {
                name,
                path,
                fallback: tone.into(),
            },
            embedded @ Self::Embedded { .. } => embedded,
        }
    }

    /// Creates an embedded tone source.
    #[must_use]
    pub fn embedded(name: impl Into<String>) -> Self {
        Self::Embedded { name: name.into() }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Embedded { name } => name,
        }
    }

    /// Returns true if this is a file on disk.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Returns true if this is an embedded tone.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded { .. })
    }

    /// Returns the file path for file sources.
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Embedded { .. } => None,
        }
    }

    /// Embedded tone to play when this source itself cannot be played.
    ///
    /// Unknown tone names resolve to the default tone.
    #[must_use]
    pub fn fallback_tone(&self) -> &'static EmbeddedTone {
        let name = match self {
            Self::File { fallback, .. } => fallback,
            Self::Embedded { name } => name,
        };
        find_embedded_tone(name).unwrap_or_else(default_tone)
    }
}

// ============================================================================
// CueSounds
// ============================================================================

/// Which sound plays for each audio cue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueSounds {
    /// Played when work starts
    pub work: SoundSource,
    /// Played when a regular break starts
    pub rest: SoundSource,
    /// Played when the long break starts
    pub long_rest: SoundSource,
}

impl Default for CueSounds {
    fn default() -> Self {
        Self {
            work: SoundSource::embedded("work"),
            rest: SoundSource::embedded("break"),
            long_rest: SoundSource::embedded("long_break"),
        }
    }
}

impl CueSounds {
    /// Overrides the embedded defaults with any files given.
    ///
    /// A file that cannot be played falls back to the embedded tone of its
    /// own cue.
    #[must_use]
    pub fn with_files(
        work: Option<PathBuf>,
        rest: Option<PathBuf>,
        long_rest: Option<PathBuf>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            work: file_or(work, defaults.work),
            rest: file_or(rest, defaults.rest),
            long_rest: file_or(long_rest, defaults.long_rest),
        }
    }

    /// Returns the source for `cue`.
    #[must_use]
    pub fn source_for(&self, cue: AudioCue) -> &SoundSource {
        match cue {
            AudioCue::WorkStarted => &self.work,
            AudioCue::BreakStarted => &self.rest,
            AudioCue::LongBreakStarted => &self.long_rest,
        }
    }
}

fn file_or(path: Option<PathBuf>, embedded: SoundSource) -> SoundSource {
    match path {
        Some(path) => SoundSource::file(path).with_fallback(embedded.name()),
        None => embedded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_source_named_after_stem() {
        let source = SoundSource::file("/home/me/sounds/bell.wav");
        assert!(source.is_file());
        assert_eq!(source.name(), "bell");
        assert_eq!(
            source.path(),
            Some(&PathBuf::from("/home/me/sounds/bell.wav"))
        );
    }

    #[test]
    fn test_embedded_source() {
        let source = SoundSource::embedded("break");
        assert!(source.is_embedded());
        assert_eq!(source.name(), "break");
        assert!(source.path().is_none());
    }

    #[test]
    fn test_default_cue_sounds_are_embedded() {
        let cues = CueSounds::default();
        assert_eq!(cues.source_for(AudioCue::WorkStarted).name(), "work");
        assert_eq!(cues.source_for(AudioCue::BreakStarted).name(), "break");
        assert_eq!(
            cues.source_for(AudioCue::LongBreakStarted).name(),
            "long_break"
        );
    }

    #[test]
    fn test_with_files_overrides_only_given() {
        let cues = CueSounds::with_files(None, Some(PathBuf::from("/tmp/rest.ogg")), None);
        assert!(cues.work.is_embedded());
        assert!(cues.rest.is_file());
        assert_eq!(cues.rest.name(), "rest");
        assert!(cues.long_rest.is_embedded());
    }

    #[test]
    fn test_file_falls_back_to_its_own_cue_tone() {
        let cues = CueSounds::with_files(
            Some(PathBuf::from("/missing/work.wav")),
            Some(PathBuf::from("/missing/rest.wav")),
            Some(PathBuf::from("/missing/long.wav")),
        );

        assert_eq!(cues.source_for(AudioCue::WorkStarted).fallback_tone().name, "work");
        assert_eq!(cues.source_for(AudioCue::BreakStarted).fallback_tone().name, "break");
        assert_eq!(
            cues.source_for(AudioCue::LongBreakStarted)
                .fallback_tone()
                .name,
            "long_break"
        );
    }

    #[test]
    fn test_plain_file_falls_back_to_default_tone() {
        let source = SoundSource::file("/missing/bell.wav");
        assert_eq!(source.fallback_tone().name, DEFAULT_TONE);
    }

    #[test]
    fn test_unknown_fallback_resolves_to_default() {
        let source = SoundSource::file("/missing/bell.wav").with_fallback("kazoo");
        assert_eq!(source.fallback_tone().name, DEFAULT_TONE);
    }

    #[test]
    fn test_with_fallback_keeps_embedded_source() {
        let source = SoundSource::embedded("break").with_fallback("work");
        assert_eq!(source, SoundSource::embedded("break"));
        assert_eq!(source.fallback_tone().name, "break");
    }
}
