//! Frame-polled timer engine.
//!
//! This module provides the stateful side of the ladder:
//! - Countdown driven by per-frame elapsed-time deltas
//! - Period replacement via the pure `advance` transition
//! - Event firing for the presentation layer (period starts, minute ticks)

use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::transition;
use crate::types::{ClockReading, Period};

// ============================================================================
// TimerEvent
// ============================================================================

/// Events consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    /// A new period started (including the very first one)
    PeriodStarted {
        /// The period that just started
        period: Period,
    },
    /// The current period ran out and was advanced
    PeriodCompleted {
        /// The period that just expired
        period: Period,
    },
    /// Another whole minute of work has elapsed
    MinuteElapsed {
        /// Whole minutes elapsed in the current work period
        minutes: u32,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine owning the current period and its clock reading.
///
/// The engine never schedules itself; a frame driver calls [`update`](Self::update)
/// (or [`tick`](Self::tick) and [`advance`](Self::advance)) with the time elapsed
/// since the previous frame.
pub struct TimerEngine {
    /// Current period
    period: Period,
    /// Remaining time and duration of the current period
    reading: ClockReading,
    /// Minutes already reported for the current work period
    minutes_reported: u32,
    /// Number of periods that have run out
    completed_periods: u32,
    /// Whether the initial period start has been announced
    started: bool,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates a new engine at the initial period.
    pub fn new(event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        let period = Period::initial();
        Self {
            period,
            reading: ClockReading::full(period.duration_seconds),
            minutes_reported: 0,
            completed_periods: 0,
            started: false,
            event_tx,
        }
    }

    /// Announces the initial period.
    ///
    /// Calling this more than once has no effect.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        debug!(
            level = self.period.level.as_str(),
            phase = self.period.phase.as_str(),
            duration = self.period.duration_seconds,
            "timer started"
        );
        self.emit(TimerEvent::PeriodStarted {
            period: self.period,
        });
    }

    /// Decrements the remaining time by `delta_seconds`, clamped at zero.
    ///
    /// Negative or non-finite deltas are treated as zero. Returns true once
    /// the current period has expired; the caller decides when to call
    /// [`advance`](Self::advance).
    pub fn tick(&mut self, delta_seconds: f64) -> bool {
        let delta = if delta_seconds.is_finite() {
            delta_seconds.max(0.0)
        } else {
            0.0
        };

        self.reading.remaining_seconds = (self.reading.remaining_seconds - delta).max(0.0);

        if self.period.is_work() {
            let minutes = self.reading.minutes_elapsed();
            while self.minutes_reported < minutes {
                self.minutes_reported += 1;
                trace!(minutes = self.minutes_reported, "minute elapsed");
                self.emit(TimerEvent::MinuteElapsed {
                    minutes: self.minutes_reported,
                });
            }
        }

        self.reading.is_expired()
    }

    /// Replaces the current period with its successor and restarts the clock.
    pub fn advance(&mut self) {
        let finished = self.period;
        self.completed_periods += 1;
        self.emit(TimerEvent::PeriodCompleted { period: finished });

        self.period = transition::advance(finished);
        self.reading = ClockReading::full(self.period.duration_seconds);
        self.minutes_reported = 0;

        debug!(
            level = self.period.level.as_str(),
            phase = self.period.phase.as_str(),
            duration = self.period.duration_seconds,
            repeat_count = self.period.repeat_count,
            long_break = self.period.long_break,
            "period started"
        );
        self.emit(TimerEvent::PeriodStarted {
            period: self.period,
        });
    }

    /// Per-frame poll: ticks and advances on expiry.
    ///
    /// Time left over past zero is not carried into the next period.
    /// Returns true if a transition happened this frame.
    pub fn update(&mut self, delta_seconds: f64) -> bool {
        if self.tick(delta_seconds) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Returns the current period.
    pub fn period(&self) -> Period {
        self.period
    }

    /// Returns the current clock reading.
    pub fn reading(&self) -> ClockReading {
        self.reading
    }

    /// Returns the remaining seconds of the current period.
    pub fn remaining_seconds(&self) -> f64 {
        self.reading.remaining_seconds
    }

    /// Returns the fraction of the current period still remaining.
    pub fn fill_ratio(&self) -> f64 {
        self.reading.fill_ratio()
    }

    /// Returns how many periods have run out since the engine was created.
    pub fn completed_periods(&self) -> u32 {
        self.completed_periods
    }

    /// Sends an event, ignoring a dropped receiver.
    fn emit(&self, event: TimerEvent) {
        if self.event_tx.send(event).is_err() {
            trace!("event receiver dropped, skipping event");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
