//! Period transition function.
//!
//! `advance` is pure: given the period that just expired it returns the next
//! one. The whole ladder is therefore a deterministic sequence that can be
//! enumerated without a clock (see [`periods`] and [`schedule`]).

use crate::types::{Level, Period, Phase, ScheduleEntry};

/// Returns the period that follows `period` once it has expired.
pub fn advance(period: Period) -> Period {
    match period.phase {
        Phase::Work => Period::rest(period.level, period.repeat_count),
        // The count was reset before the long break began; resume work
        // without counting the long break as another cycle.
        Phase::Break if period.long_break => Period::work(Level::Pomodoro, 0),
        Phase::Break => {
            let completed = period.repeat_count + 1;
            match period.level {
                Level::Pomodoro if completed >= Level::Pomodoro.repeat_limit() => {
                    Period::long_rest()
                }
                Level::Pomodoro => Period::work(Level::Pomodoro, completed),
                level if completed >= level.repeat_limit() => Period::work(level.next(), 0),
                level => Period::work(level, completed),
            }
        }
    }
}

/// Infinite iterator over the period sequence, starting at the initial period.
pub fn periods() -> impl Iterator<Item = Period> {
    std::iter::successors(Some(Period::initial()), |period| Some(advance(*period)))
}

/// Returns the first `count` periods with their cumulative start offsets.
pub fn schedule(count: usize) -> Vec<ScheduleEntry> {
    let mut starts_at = 0u64;
    periods()
        .take(count)
        .enumerate()
        .map(|(index, period)| {
            let entry = ScheduleEntry {
                index,
                level: period.level,
                phase: period.phase,
                long_break: period.long_break,
                duration_seconds: period.duration_seconds,
                repeat_count: period.repeat_count,
                starts_at_seconds: starts_at,
            };
            starts_at += u64::from(period.duration_seconds);
            entry
        })
        .collect()
}
