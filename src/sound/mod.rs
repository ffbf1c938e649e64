//! Sound playback for period cues.
//!
//! This module provides the audio side of the presentation layer:
//!
//! - Synthesized embedded tones (no audio files are shipped)
//! - Optional user-supplied sound files with fallback to the embedded tone
//! - A dedicated audio thread so playback never blocks the frame loop
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐  AudioCmd   ┌──────────────────┐     ┌──────────────────┐
//! │   AudioBridge    │────────────▶│ RodioSoundPlayer │────▶│  Sound files     │
//! │  (frame thread)  │  crossbeam  │  (audio thread)  │     ├──────────────────┤
//! └──────────────────┘             └──────────────────┘────▶│ Embedded tones   │
//!                                                           └──────────────────┘
//! ```

mod bridge;
mod embedded;
mod error;
mod player;
mod source;

pub use bridge::{AudioBridge, AudioCmd};
pub use embedded::{default_tone, find_embedded_tone, EmbeddedTone, DEFAULT_TONE, EMBEDDED_TONES};
pub use error::SoundError;
pub use player::RodioSoundPlayer;
pub use source::{CueSounds, SoundSource};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., the audio thread bridge, mock for testing).
pub trait SoundPlayer {
    /// Plays a sound from the given source.
    ///
    /// This method should be non-blocking; the sound plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if playback cannot be requested.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;

    /// Returns true if the audio system is available.
    fn is_available(&self) -> bool;

    /// Returns true if sound playback is disabled.
    fn is_disabled(&self) -> bool;

    /// Enables sound playback.
    fn enable(&self);

    /// Disables sound playback.
    fn disable(&self);
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn is_disabled(&self) -> bool {
        RodioSoundPlayer::is_disabled(self)
    }

    fn enable(&self) {
        RodioSoundPlayer::enable(self)
    }

    fn disable(&self) {
        RodioSoundPlayer::disable(self)
    }
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for Arc<T> {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        (**self).play(source)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn is_disabled(&self) -> bool {
        (**self).is_disabled()
    }

    fn enable(&self) {
        (**self).enable()
    }

    fn disable(&self) {
        (**self).disable()
    }
}

/// Mock sound player for testing.
#[derive(Debug)]
pub struct MockSoundPlayer {
    played: Mutex<Vec<SoundSource>>,
    disabled: AtomicBool,
    should_fail: AtomicBool,
}

impl Default for MockSoundPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            played: Mutex::new(Vec::new()),
            disabled: AtomicBool::new(false),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Names of the sources played so far, in order.
    #[must_use]
    pub fn played_names(&self) -> Vec<String> {
        self.played
            .lock()
            .map(|played| played.iter().map(|s| s.name().to_string()).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.played.lock().map(|played| played.len()).unwrap_or(0)
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        if self.disabled.load(Ordering::SeqCst) {
            return Ok(());
        }
        if let Ok(mut played) = self.played.lock() {
            played.push(source.clone());
        }
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    fn enable(&self) {
        self.disabled.store(false, Ordering::SeqCst);
    }

    fn disable(&self) {
        self.disabled.store(true, Ordering::SeqCst);
    }
}
