//! Core data types for the Pomodoro ladder.
//!
//! This module defines the data structures used for:
//! - Escalation levels and their duration tables
//! - Work/break phases
//! - The immutable `Period` value replaced on every transition
//! - Clock readings derived from the remaining time
//! - Run configuration with validation

use serde::{Deserialize, Serialize};

/// Long break duration in seconds (20 minutes).
pub const LONG_BREAK_SECONDS: u32 = 20 * 60;

/// Default number of decorative highlight slots.
pub const DEFAULT_DECORATIONS: usize = 6;

// ============================================================================
// Level
// ============================================================================

/// Escalation tier determining period durations.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// 1 minute of work, 30 seconds of break
    #[default]
    Small,
    /// 5 minutes of work, 1 minute of break
    Medium,
    /// 25 minutes of work, 5 minutes of break
    Pomodoro,
}

impl Level {
    /// Returns the string representation of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Small => "small",
            Level::Medium => "medium",
            Level::Pomodoro => "pomodoro",
        }
    }

    /// Work period duration in seconds.
    pub fn work_seconds(&self) -> u32 {
        match self {
            Level::Small => 60,
            Level::Medium => 5 * 60,
            Level::Pomodoro => 25 * 60,
        }
    }

    /// Regular break duration in seconds.
    pub fn break_seconds(&self) -> u32 {
        match self {
            Level::Small => 30,
            Level::Medium => 60,
            Level::Pomodoro => 5 * 60,
        }
    }

    /// Number of work+break cycles completed before escalating
    /// (or, at Pomodoro, before a long break).
    pub fn repeat_limit(&self) -> u32 {
        match self {
            Level::Small => 2,
            Level::Medium => 2,
            Level::Pomodoro => 4,
        }
    }

    /// Returns the next level, saturating at Pomodoro.
    pub fn next(&self) -> Level {
        match self {
            Level::Small => Level::Medium,
            Level::Medium | Level::Pomodoro => Level::Pomodoro,
        }
    }
}

// ============================================================================
// Phase
// ============================================================================

/// Whether the current period is for working or resting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Focused work
    Work,
    /// Rest between work periods
    Break,
}

impl Phase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Break => "break",
        }
    }

    /// Returns true for the work phase.
    pub fn is_work(&self) -> bool {
        matches!(self, Phase::Work)
    }
}

// ============================================================================
// Period
// ============================================================================

/// One contiguous work or break interval at a given level.
///
/// A `Period` is never mutated in place; the transition function returns a
/// fresh value for the next interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// Escalation tier
    pub level: Level,
    /// Work or break
    pub phase: Phase,
    /// Length of this period in seconds
    pub duration_seconds: u32,
    /// Completed work+break cycles at the current level
    pub repeat_count: u32,
    /// True only for the extended break after a full Pomodoro set
    pub long_break: bool,
}

impl Period {
    /// The period every timer starts with: Small work, no cycles completed.
    pub fn initial() -> Self {
        Self::work(Level::Small, 0)
    }

    /// Creates a work period at `level`.
    pub fn work(level: Level, repeat_count: u32) -> Self {
        Self {
            level,
            phase: Phase::Work,
            duration_seconds: level.work_seconds(),
            repeat_count,
            long_break: false,
        }
    }

    /// Creates a regular break period at `level`.
    pub fn rest(level: Level, repeat_count: u32) -> Self {
        Self {
            level,
            phase: Phase::Break,
            duration_seconds: level.break_seconds(),
            repeat_count,
            long_break: false,
        }
    }

    /// Creates the long break that follows a full set of Pomodoro cycles.
    ///
    /// The repeat count is already reset when the long break begins.
    pub fn long_rest() -> Self {
        Self {
            level: Level::Pomodoro,
            phase: Phase::Break,
            duration_seconds: LONG_BREAK_SECONDS,
            repeat_count: 0,
            long_break: true,
        }
    }

    /// Returns true if this is a work period.
    pub fn is_work(&self) -> bool {
        self.phase.is_work()
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::initial()
    }
}

// ============================================================================
// ClockReading
// ============================================================================

/// Remaining time of the current period plus its total duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockReading {
    /// Seconds left in the current period (never negative)
    pub remaining_seconds: f64,
    /// Total duration of the current period (never below 1.0)
    pub duration_seconds: f64,
}

impl ClockReading {
    /// Creates a reading for a freshly started period of `duration_seconds`.
    pub fn full(duration_seconds: u32) -> Self {
        let duration = f64::from(duration_seconds).max(1.0);
        Self {
            remaining_seconds: f64::from(duration_seconds),
            duration_seconds: duration,
        }
    }

    /// Fraction of the period still remaining, clamped to `[0, 1]`.
    pub fn fill_ratio(&self) -> f64 {
        (self.remaining_seconds / self.duration_seconds.max(1.0)).clamp(0.0, 1.0)
    }

    /// Whole minutes elapsed since the period started.
    pub fn minutes_elapsed(&self) -> u32 {
        let elapsed = (self.duration_seconds - self.remaining_seconds).max(0.0);
        (elapsed / 60.0).floor() as u32
    }

    /// Returns true once the remaining time has reached zero.
    pub fn is_expired(&self) -> bool {
        self.remaining_seconds <= 0.0
    }
}

// ============================================================================
// ScheduleEntry
// ============================================================================

/// One row of the deterministic period sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Zero-based position in the sequence
    pub index: usize,
    /// Escalation tier
    pub level: Level,
    /// Work or break
    pub phase: Phase,
    /// Whether this is the long break
    #[serde(rename = "longBreak")]
    pub long_break: bool,
    /// Period length in seconds
    #[serde(rename = "durationSeconds")]
    pub duration_seconds: u32,
    /// Completed cycles at the level when the period starts
    #[serde(rename = "repeatCount")]
    pub repeat_count: u32,
    /// Offset from timer start, assuming every period runs to completion
    #[serde(rename = "startsAtSeconds")]
    pub starts_at_seconds: u64,
}

// ============================================================================
// Language
// ============================================================================

/// Language used for the status label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// 作業中 / 休憩中
    #[default]
    Ja,
    /// Working / Resting
    En,
}

// ============================================================================
// RunConfig
// ============================================================================

/// Configuration for an interactive run.
///
/// Period durations are fixed; this only covers the frame driver and the
/// presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of decorative highlight slots (1-32)
    pub decorations: usize,
    /// Frames per second for the polling loop (1-240)
    pub fps: u32,
    /// Multiplier applied to real elapsed time (0 < scale <= 10000)
    pub time_scale: f64,
    /// Whether audio cues are played
    pub sound: bool,
    /// Status label language
    pub language: Language,
    /// Seed for the highlight random source
    pub seed: Option<u64>,
    /// Stop after this many completed periods
    pub max_periods: Option<u32>,
    /// Rotation speed of the spinner icon
    pub spin_degrees_per_second: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            decorations: DEFAULT_DECORATIONS,
            fps: 60,
            time_scale: 1.0,
            sound: true,
            language: Language::Ja,
            seed: None,
            max_periods: None,
            spin_degrees_per_second: 90.0,
        }
    }
}

impl RunConfig {
    /// Sets the number of decorative slots.
    pub fn with_decorations(mut self, decorations: usize) -> Self {
        self.decorations = decorations;
        self
    }

    /// Sets the frame rate.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Sets the time multiplier.
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the completed-period limit.
    pub fn with_max_periods(mut self, max_periods: Option<u32>) -> Self {
        self.max_periods = max_periods;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.decorations < 1 || self.decorations > 32 {
            return Err("装飾の数は1-32の範囲で指定してください".to_string());
        }
        if self.fps < 1 || self.fps > 240 {
            return Err("フレームレートは1-240の範囲で指定してください".to_string());
        }
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 || self.time_scale > 10_000.0 {
            return Err("時間倍率は0より大きく10000以下で指定してください".to_string());
        }
        if !self.spin_degrees_per_second.is_finite() {
            return Err("回転速度が不正です".to_string());
        }
        if self.max_periods == Some(0) {
            return Err("期間数は1以上で指定してください".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Level Tests
    // ------------------------------------------------------------------------

    mod level_tests {
        use super::*;

        #[test]
        fn test_default_is_small() {
            assert_eq!(Level::default(), Level::Small);
        }

        #[test]
        fn test_work_durations() {
            assert_eq!(Level::Small.work_seconds(), 60);
            assert_eq!(Level::Medium.work_seconds(), 300);
            assert_eq!(Level::Pomodoro.work_seconds(), 1500);
        }

        #[test]
        fn test_break_durations() {
            assert_eq!(Level::Small.break_seconds(), 30);
            assert_eq!(Level::Medium.break_seconds(), 60);
            assert_eq!(Level::Pomodoro.break_seconds(), 300);
        }

        #[test]
        fn test_repeat_limits() {
            assert_eq!(Level::Small.repeat_limit(), 2);
            assert_eq!(Level::Medium.repeat_limit(), 2);
            assert_eq!(Level::Pomodoro.repeat_limit(), 4);
        }

        #[test]
        fn test_next_saturates() {
            assert_eq!(Level::Small.next(), Level::Medium);
            assert_eq!(Level::Medium.next(), Level::Pomodoro);
            assert_eq!(Level::Pomodoro.next(), Level::Pomodoro);
        }

        #[test]
        fn test_ordering_follows_escalation() {
            assert!(Level::Small < Level::Medium);
            assert!(Level::Medium < Level::Pomodoro);
        }

        #[test]
        fn test_serialize() {
            let json = serde_json::to_string(&Level::Pomodoro).unwrap();
            assert_eq!(json, "\"pomodoro\"");
        }
    }

    // ------------------------------------------------------------------------
    // Period Tests
    // ------------------------------------------------------------------------

    mod period_tests {
        use super::*;

        #[test]
        fn test_initial_period() {
            let period = Period::initial();
            assert_eq!(period.level, Level::Small);
            assert_eq!(period.phase, Phase::Work);
            assert_eq!(period.duration_seconds, 60);
            assert_eq!(period.repeat_count, 0);
            assert!(!period.long_break);
        }

        #[test]
        fn test_rest_uses_break_table() {
            let period = Period::rest(Level::Medium, 1);
            assert_eq!(period.phase, Phase::Break);
            assert_eq!(period.duration_seconds, 60);
            assert_eq!(period.repeat_count, 1);
        }

        #[test]
        fn test_long_rest() {
            let period = Period::long_rest();
            assert_eq!(period.level, Level::Pomodoro);
            assert_eq!(period.phase, Phase::Break);
            assert_eq!(period.duration_seconds, 1200);
            assert_eq!(period.repeat_count, 0);
            assert!(period.long_break);
        }

        #[test]
        fn test_serialize_roundtrip() {
            let period = Period::rest(Level::Pomodoro, 3);
            let json = serde_json::to_string(&period).unwrap();
            assert!(json.contains("\"phase\":\"break\""));
            let back: Period = serde_json::from_str(&json).unwrap();
            assert_eq!(back, period);
        }
    }

    // ------------------------------------------------------------------------
    // ClockReading Tests
    // ------------------------------------------------------------------------

    mod clock_reading_tests {
        use super::*;

        #[test]
        fn test_full_reading_fill_is_one() {
            let reading = ClockReading::full(60);
            assert_eq!(reading.fill_ratio(), 1.0);
            assert_eq!(reading.minutes_elapsed(), 0);
        }

        #[test]
        fn test_zero_duration_is_floored() {
            let reading = ClockReading::full(0);
            assert_eq!(reading.duration_seconds, 1.0);
            assert_eq!(reading.fill_ratio(), 0.0);
            assert!(reading.is_expired());
        }

        #[test]
        fn test_fill_ratio_midway() {
            let reading = ClockReading {
                remaining_seconds: 30.0,
                duration_seconds: 60.0,
            };
            assert!((reading.fill_ratio() - 0.5).abs() < f64::EPSILON);
        }

        #[test]
        fn test_fill_ratio_clamped() {
            let reading = ClockReading {
                remaining_seconds: 120.0,
                duration_seconds: 60.0,
            };
            assert_eq!(reading.fill_ratio(), 1.0);
        }

        #[test]
        fn test_minutes_elapsed() {
            let reading = ClockReading {
                remaining_seconds: 1500.0 - 125.0,
                duration_seconds: 1500.0,
            };
            assert_eq!(reading.minutes_elapsed(), 2);
        }
    }

    // ------------------------------------------------------------------------
    // RunConfig Tests
    // ------------------------------------------------------------------------

    mod run_config_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let config = RunConfig::default();
            assert_eq!(config.decorations, 6);
            assert_eq!(config.fps, 60);
            assert_eq!(config.time_scale, 1.0);
            assert!(config.sound);
            assert_eq!(config.language, Language::Ja);
            assert!(config.seed.is_none());
            assert!(config.max_periods.is_none());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_builder_methods() {
            let config = RunConfig::default()
                .with_decorations(8)
                .with_fps(30)
                .with_time_scale(2.5)
                .with_seed(Some(7))
                .with_max_periods(Some(3));
            assert_eq!(config.decorations, 8);
            assert_eq!(config.fps, 30);
            assert_eq!(config.time_scale, 2.5);
            assert_eq!(config.seed, Some(7));
            assert_eq!(config.max_periods, Some(3));
        }

        #[test]
        fn test_validate_decorations_out_of_range() {
            let err = RunConfig::default().with_decorations(0).validate();
            assert!(err.unwrap_err().contains("装飾"));
            assert!(RunConfig::default().with_decorations(33).validate().is_err());
            assert!(RunConfig::default().with_decorations(32).validate().is_ok());
        }

        #[test]
        fn test_validate_fps_out_of_range() {
            assert!(RunConfig::default().with_fps(0).validate().is_err());
            assert!(RunConfig::default().with_fps(241).validate().is_err());
            assert!(RunConfig::default().with_fps(240).validate().is_ok());
        }

        #[test]
        fn test_validate_time_scale() {
            assert!(RunConfig::default().with_time_scale(0.0).validate().is_err());
            assert!(RunConfig::default().with_time_scale(-1.0).validate().is_err());
            assert!(RunConfig::default().with_time_scale(f64::NAN).validate().is_err());
            assert!(RunConfig::default()
                .with_time_scale(10_001.0)
                .validate()
                .is_err());
            assert!(RunConfig::default()
                .with_time_scale(10_000.0)
                .validate()
                .is_ok());
        }

        #[test]
        fn test_validate_max_periods_zero() {
            assert!(RunConfig::default()
                .with_max_periods(Some(0))
                .validate()
                .is_err());
        }
    }
}
