//! Sound player implementation using rodio.
//!
//! `RodioSoundPlayer` owns the output stream and must stay on the thread that
//! created it; see [`AudioBridge`](super::AudioBridge) for use from the frame loop.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::embedded::{find_embedded_tone, EmbeddedTone};
use super::error::SoundError;
use super::source::SoundSource;

/// A sound player that uses rodio for audio playback.
///
/// Sound playback is non-blocking; sinks are detached and keep playing after
/// `play` returns.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// Whether sound playback is disabled.
    disabled: AtomicBool,
}

impl RodioSoundPlayer {
    /// Creates a new sound player.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(disabled: bool) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            disabled: AtomicBool::new(disabled),
        })
    }

    /// Plays a sound from the given source.
    ///
    /// A file that cannot be opened or decoded falls back to its cue's
    /// embedded tone (see [`SoundSource::fallback_tone`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded tone is unknown or no sink can be
    /// created on the output stream.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.disabled.load(Ordering::Relaxed) {
            debug!("Sound playback disabled, skipping");
            return Ok(());
        }

        match source {
            SoundSource::File { path, name, .. } => {
                debug!("Playing sound file: {}", name);
                match self.play_file(path) {
                    Ok(()) => Ok(()),
                    Err(e) if e.should_fallback_to_embedded() => {
                        warn!(
                            "Failed to play sound file '{}': {}, falling back to embedded tone",
                            name, e
                        );
                        self.play_tone(source.fallback_tone())
                    }
                    Err(e) => Err(e),
                }
            }
            SoundSource::Embedded { name } => {
                debug!("Playing embedded tone: {}", name);
                let tone =
                    find_embedded_tone(name).ok_or_else(|| SoundError::UnknownTone(name.clone()))?;
                self.play_tone(tone)
            }
        }
    }

    /// Plays a sound file from the filesystem.
    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;

        let sink = self.new_sink()?;
        sink.append(decoder);
        sink.detach();
        Ok(())
    }

    /// Synthesizes and plays an embedded tone.
    fn play_tone(&self, tone: &EmbeddedTone) -> Result<(), SoundError> {
        let wave = SineWave::new(tone.frequency_hz)
            .take_duration(tone.duration())
            .amplify(tone.amplitude);

        let sink = self.new_sink()?;
        sink.append(wave);
        sink.detach();
        debug!("Tone '{}' started (detached)", tone.name);
        Ok(())
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(|e| SoundError::StreamError(e.to_string()))
    }

    /// Returns true if sound playback is currently disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    /// Enables sound playback.
    pub fn enable(&self) {
        self.disabled.store(false, Ordering::Relaxed);
    }

    /// Disables sound playback.
    pub fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("disabled", &self.disabled.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests skip themselves when no audio device exists (e.g. CI).

    #[test]
    fn test_disabled_player_skips_playback() {
        let player = match RodioSoundPlayer::new(true) {
            Ok(p) => p,
            Err(_) => return,
        };

        assert!(player.is_disabled());
        // Unknown tones are not even looked up while disabled
        assert!(player.play(&SoundSource::embedded("kazoo")).is_ok());
    }

    #[test]
    fn test_enable_disable() {
        let player = match RodioSoundPlayer::new(true) {
            Ok(p) => p,
            Err(_) => return,
        };

        player.enable();
        assert!(!player.is_disabled());
        player.disable();
        assert!(player.is_disabled());
    }

    #[test]
    fn test_unknown_tone_is_error() {
        let player = match RodioSoundPlayer::new(false) {
            Ok(p) => p,
            Err(_) => return,
        };

        let result = player.play(&SoundSource::embedded("kazoo"));
        assert!(matches!(result, Err(SoundError::UnknownTone(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let source = SoundSource::file("/nonexistent/path/to/chime.wav").with_fallback("break");
        assert_eq!(source.fallback_tone().name, "break");

        let player = match RodioSoundPlayer::new(false) {
            Ok(p) => p,
            Err(_) => return,
        };
        assert!(player.play(&source).is_ok());
    }

    #[test]
    fn test_missing_file_is_fallback_error() {
        let player = match RodioSoundPlayer::new(false) {
            Ok(p) => p,
            Err(_) => return,
        };

        let result = player.play_file(Path::new("/nonexistent/path/to/chime.wav"));
        assert!(matches!(result, Err(SoundError::FileNotFound(_))));
        assert!(result.unwrap_err().should_fallback_to_embedded());
    }

    #[test]
    fn test_debug_impl() {
        let player = match RodioSoundPlayer::new(true) {
            Ok(p) => p,
            Err(_) => return,
        };

        assert!(format!("{:?}", player).contains("RodioSoundPlayer"));
    }
}
