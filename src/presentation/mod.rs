//! Presentation layer for the Pomodoro ladder.
//!
//! The timer engine knows nothing about labels, sounds or decorations. The
//! [`Presenter`] reacts to engine events and pushes rendering instructions to a
//! [`PresentationAdapter`]:
//!
//! ```text
//! ┌──────────────┐  TimerEvent   ┌──────────────┐  set_* / play_cue  ┌─────────────────────┐
//! │ TimerEngine  │──────────────▶│  Presenter   │───────────────────▶│ PresentationAdapter │
//! └──────────────┘               │ (board, rng, │                    │ (terminal, mock...) │
//!        │ ClockReading          │  spinner)    │                    └─────────────────────┘
//!        └──────────────────────▶└──────────────┘
//! ```
//!
//! Adapters only implement the elements they actually have; every optional
//! element defaults to a no-op.

mod format;
mod highlight;
mod spinner;

pub use format::{format_remaining, StatusLabels};
pub use highlight::{FastRandSource, HighlightBoard, RandomSource, SequenceSource, SlotColor};
pub use spinner::{glyph_for, Spinner};

use anyhow::Result;
use tracing::trace;

use crate::engine::TimerEvent;
use crate::types::{ClockReading, Period, Phase};

// ============================================================================
// AudioCue
// ============================================================================

/// Audio cue selected when a period starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// A work period started
    WorkStarted,
    /// A regular break started
    BreakStarted,
    /// The long break started
    LongBreakStarted,
}

impl AudioCue {
    /// Selects the cue for a period that is starting.
    pub fn for_period(period: &Period) -> Self {
        match period.phase {
            Phase::Work => AudioCue::WorkStarted,
            Phase::Break if period.long_break => AudioCue::LongBreakStarted,
            Phase::Break => AudioCue::BreakStarted,
        }
    }
}

// ============================================================================
// PresentationAdapter
// ============================================================================

/// Rendering surface driven by the [`Presenter`].
pub trait PresentationAdapter {
    /// Sets the status label ("作業中", "Resting", ...).
    fn set_status(&mut self, label: &str);

    /// Sets the `mm:ss` countdown text.
    fn set_time_text(&mut self, text: &str);

    /// Sets the circular progress fill in `[0, 1]`.
    fn set_fill(&mut self, _ratio: f64) {}

    /// Sets the colors of the decorative slots.
    fn set_highlights(&mut self, _slots: &[SlotColor]) {}

    /// Sets the rotation of the spinning icon in degrees.
    fn set_rotation(&mut self, _degrees: f32) {}

    /// Requests a one-shot audio cue. Fire-and-forget.
    fn play_cue(&mut self, _cue: AudioCue) {}

    /// Called once at the end of each frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter fails to present the frame.
    fn commit(&mut self) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// Presenter
// ============================================================================

/// Translates engine events and clock readings into adapter calls.
pub struct Presenter<A, R> {
    adapter: A,
    rng: R,
    labels: StatusLabels,
    board: HighlightBoard,
    spinner: Spinner,
    /// Minutes seen so far in the current work period
    minute_counter: u32,
}

impl<A: PresentationAdapter, R: RandomSource> Presenter<A, R> {
    /// Creates a presenter with `decorations` highlight slots.
    pub fn new(adapter: A, rng: R, labels: StatusLabels, decorations: usize) -> Self {
        Self {
            adapter,
            rng,
            labels,
            board: HighlightBoard::new(decorations),
            spinner: Spinner::default(),
            minute_counter: 0,
        }
    }

    /// Replaces the spinner (e.g. to change its speed).
    pub fn with_spinner(mut self, spinner: Spinner) -> Self {
        self.spinner = spinner;
        self
    }

    /// Reacts to a single engine event.
    pub fn handle_event(&mut self, event: &TimerEvent) {
        match event {
            TimerEvent::PeriodStarted { period } => {
                self.adapter.play_cue(AudioCue::for_period(period));
                match period.phase {
                    Phase::Work => {
                        self.minute_counter = 0;
                        self.board.randomize(&mut self.rng);
                    }
                    Phase::Break => self.board.clear(),
                }
                self.adapter.set_highlights(self.board.slots());
            }
            TimerEvent::MinuteElapsed { minutes } => {
                if *minutes > self.minute_counter {
                    self.minute_counter = *minutes;
                    let chosen = self.board.randomize(&mut self.rng);
                    trace!(minutes, ?chosen, "highlight re-randomized");
                    self.adapter.set_highlights(self.board.slots());
                }
            }
            TimerEvent::PeriodCompleted { .. } => {}
        }
    }

    /// Pushes one frame of state to the adapter.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter fails to commit the frame.
    pub fn render(
        &mut self,
        reading: &ClockReading,
        period: &Period,
        delta_seconds: f64,
    ) -> Result<()> {
        self.adapter.set_status(self.labels.label(period));
        self.adapter.set_time_text(&format_remaining(reading.remaining_seconds));
        self.adapter.set_fill(reading.fill_ratio());
        let degrees = self.spinner.advance(delta_seconds);
        self.adapter.set_rotation(degrees);
        self.adapter.commit()
    }

    /// Returns the highlight board.
    pub fn board(&self) -> &HighlightBoard {
        &self.board
    }

    /// Returns the adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Returns the adapter mutably.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Consumes the presenter, returning the adapter.
    pub fn into_adapter(self) -> A {
        self.adapter
    }
}

// ============================================================================
// RecordingAdapter
// ============================================================================

/// Adapter that records everything it is told, for testing.
#[derive(Debug, Default, Clone)]
pub struct RecordingAdapter {
    /// Last status label
    pub status: String,
    /// Last countdown text
    pub time_text: String,
    /// Every fill ratio received
    pub fills: Vec<f64>,
    /// Last highlight slots
    pub highlights: Vec<SlotColor>,
    /// Last rotation
    pub rotation: f32,
    /// Every cue requested, in order
    pub cues: Vec<AudioCue>,
    /// Number of committed frames
    pub frames: usize,
}

impl RecordingAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresentationAdapter for RecordingAdapter {
    fn set_status(&mut self, label: &str) {
        self.status = label.to_string();
    }

    fn set_time_text(&mut self, text: &str) {
        self.time_text = text.to_string();
    }

    fn set_fill(&mut self, ratio: f64) {
        self.fills.push(ratio);
    }

    fn set_highlights(&mut self, slots: &[SlotColor]) {
        self.highlights = slots.to_vec();
    }

    fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    fn play_cue(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }

    fn commit(&mut self) -> Result<()> {
        self.frames += 1;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
