//! Dedicated audio thread.
//!
//! rodio's output stream cannot leave the thread that opened it, and decoding
//! a file must not stall the frame loop. The bridge owns a background thread
//! holding a [`RodioSoundPlayer`] and forwards play requests to it over a
//! crossbeam channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, warn};

use super::error::SoundError;
use super::player::RodioSoundPlayer;
use super::source::SoundSource;
use super::SoundPlayer;

/// Longest time the audio thread lingers after a shutdown request.
const MAX_DRAIN: Duration = Duration::from_secs(2);

/// Commands sent to the audio thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCmd {
    /// Play a sound once
    Play(SoundSource),
    /// Stop the thread
    Shutdown,
}

/// Handle to the background audio thread.
#[derive(Debug)]
pub struct AudioBridge {
    tx_cmd: Sender<AudioCmd>,
    handle: Option<JoinHandle<()>>,
    disabled: AtomicBool,
}

impl AudioBridge {
    /// Spawns the audio thread.
    ///
    /// The thread opens the output device itself; if that fails it logs a
    /// warning and exits, after which `play` reports `ThreadUnavailable`.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::ThreadUnavailable` if the thread cannot be spawned.
    pub fn spawn() -> Result<Self, SoundError> {
        let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();

        let handle = std::thread::Builder::new()
            .name("audio".to_string())
            .spawn(move || audio_thread(rx_cmd))
            .map_err(|e| SoundError::ThreadUnavailable(e.to_string()))?;

        Ok(Self {
            tx_cmd,
            handle: Some(handle),
            disabled: AtomicBool::new(false),
        })
    }

    /// Stops the thread and waits for it to exit.
    ///
    /// A cue still playing is allowed to finish, for at most two seconds.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.tx_cmd.send(AudioCmd::Shutdown);
            if handle.join().is_err() {
                warn!("Audio thread panicked");
            }
        }
    }
}

impl SoundPlayer for AudioBridge {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.is_disabled() {
            return Ok(());
        }
        self.tx_cmd
            .send(AudioCmd::Play(source.clone()))
            .map_err(|_| SoundError::ThreadUnavailable("audio thread has exited".to_string()))
    }

    fn is_available(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    fn enable(&self) {
        self.disabled.store(false, Ordering::Relaxed);
    }

    fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
    }
}

impl Drop for AudioBridge {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Body of the audio thread.
fn audio_thread(rx_cmd: Receiver<AudioCmd>) {
    let player = match RodioSoundPlayer::new(false) {
        Ok(player) => player,
        Err(e) => {
            warn!("Audio not available, sound disabled: {}", e);
            return;
        }
    };
    debug!("Audio thread started");

    let mut playing_until: Option<Instant> = None;
    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::Play(source) => match player.play(&source) {
                Ok(()) => {
                    let until = Instant::now() + play_length(&source);
                    playing_until = Some(playing_until.map_or(until, |current| current.max(until)));
                }
                Err(e) => warn!("Failed to play '{}': {}", source.name(), e),
            },
            AudioCmd::Shutdown => {
                // Dropping the player cuts off detached sinks
                let wait = remaining_playback(playing_until, Instant::now());
                if !wait.is_zero() {
                    debug!("Letting the last cue finish ({:?})", wait);
                    std::thread::sleep(wait);
                }
                break;
            }
        }
    }

    debug!("Audio thread stopped");
}

/// Expected playback length of `source`; file lengths are not probed.
fn play_length(source: &SoundSource) -> Duration {
    match source {
        SoundSource::Embedded { .. } => source.fallback_tone().duration(),
        SoundSource::File { .. } => MAX_DRAIN,
    }
}

/// Time left until the last started cue ends, capped at [`MAX_DRAIN`].
fn remaining_playback(playing_until: Option<Instant>, now: Instant) -> Duration {
    playing_until
        .map_or(Duration::ZERO, |until| until.saturating_duration_since(now))
        .min(MAX_DRAIN)
}
