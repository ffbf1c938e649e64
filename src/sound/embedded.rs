//! Embedded cue tones.
//!
//! The binary ships no audio files. Each cue is a short sine tone synthesized
//! at playback time; the table below describes them.

use std::time::Duration;

/// A synthesized tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbeddedTone {
    /// Lookup name
    pub name: &'static str,
    /// Pitch in hertz
    pub frequency_hz: f32,
    /// Length in milliseconds
    pub duration_ms: u64,
    /// Output gain in `(0, 1]`
    pub amplitude: f32,
}

impl EmbeddedTone {
    /// Playback length.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Name of the tone used when nothing else can be played.
pub const DEFAULT_TONE: &str = "work";

/// All embedded tones.
pub const EMBEDDED_TONES: &[EmbeddedTone] = &[
    // A5: bright, short
    EmbeddedTone {
        name: "work",
        frequency_hz: 880.0,
        duration_ms: 350,
        amplitude: 0.20,
    },
    // C5
    EmbeddedTone {
        name: "break",
        frequency_hz: 523.25,
        duration_ms: 500,
        amplitude: 0.20,
    },
    // G4: low, long
    EmbeddedTone {
        name: "long_break",
        frequency_hz: 392.0,
        duration_ms: 900,
        amplitude: 0.25,
    },
];

/// Looks up an embedded tone by name.
#[must_use]
pub fn find_embedded_tone(name: &str) -> Option<&'static EmbeddedTone> {
    EMBEDDED_TONES.iter().find(|tone| tone.name == name)
}

/// Returns the fallback tone.
#[must_use]
pub fn default_tone() -> &'static EmbeddedTone {
    &EMBEDDED_TONES[0]
}
