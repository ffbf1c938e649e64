//! Pomodoro Ladder Library
//!
//! An escalating Pomodoro timer: work periods grow from 1 minute to 5 minutes
//! to a full 25-minute pomodoro, with a long break after every fourth
//! pomodoro. It includes:
//! - Pure period transitions and the deterministic period sequence
//! - A frame-polled timer engine emitting presentation events
//! - A presenter driving labels, progress, highlights, a spinner and audio cues
//! - Sound playback on a dedicated audio thread
//! - CLI command parsing, the terminal adapter and the frame loop

pub mod cli;
pub mod engine;
pub mod presentation;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{ClockReading, Language, Level, Period, Phase, RunConfig, ScheduleEntry};

// Re-export engine types
pub use engine::{advance, periods, schedule, TimerEngine, TimerEvent};

// Re-export presentation types
pub use presentation::{
    AudioCue, FastRandSource, HighlightBoard, PresentationAdapter, Presenter, RandomSource,
    RecordingAdapter, SequenceSource, SlotColor, Spinner, StatusLabels,
};

// Re-export sound types
pub use sound::{
    AudioBridge, CueSounds, MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer,
    SoundSource,
};
