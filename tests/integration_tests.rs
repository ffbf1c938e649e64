//! Integration tests for the period state machine.
//!
//! These tests drive the public engine API the way a frame loop would and
//! check the ladder's observable properties:
//! - Starting state and escalation Small → Medium → Pomodoro
//! - Long break after 4 Pomodoro cycles and resumption afterwards
//! - Clock invariants (remaining time, fill ratio) under arbitrary deltas

use proptest::prelude::*;
use tokio::sync::mpsc;

use pomodoro_ladder::engine::{advance, periods, TimerEngine, TimerEvent};
use pomodoro_ladder::types::{Level, Period, Phase};

// ============================================================================
// Test Helpers
// ============================================================================

/// Creates an engine with its event receiver.
fn create_engine() -> (TimerEngine, mpsc::UnboundedReceiver<TimerEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (TimerEngine::new(tx), rx)
}

/// Feeds 60 fps frames until the current period expires and advances.
fn run_period_at_60fps(engine: &mut TimerEngine) {
    let frames_needed = (engine.remaining_seconds() * 60.0).ceil() as usize + 2;
    for _ in 0..frames_needed {
        if engine.update(1.0 / 60.0) {
            return;
        }
    }
    panic!("period did not expire within {} frames", frames_needed);
}

/// Runs one complete work+break cycle.
fn run_cycle(engine: &mut TimerEngine) {
    assert_eq!(engine.period().phase, Phase::Work);
    run_period_at_60fps(engine);
    assert_eq!(engine.period().phase, Phase::Break);
    run_period_at_60fps(engine);
}

/// Summarizes a period as (level, phase, duration).
fn shape(period: Period) -> (Level, Phase, u32) {
    (period.level, period.phase, period.duration_seconds)
}

// ============================================================================
// Sequence Properties
// ============================================================================

#[test]
fn starting_state_is_small_work() {
    let (engine, _rx) = create_engine();
    assert_eq!(shape(engine.period()), (Level::Small, Phase::Work, 60));
    assert_eq!(engine.period().repeat_count, 0);
}

#[test]
fn small_work_expiry_starts_small_break() {
    let (mut engine, _rx) = create_engine();
    run_period_at_60fps(&mut engine);
    assert_eq!(shape(engine.period()), (Level::Small, Phase::Break, 30));
}

#[test]
fn two_small_cycles_escalate_to_medium() {
    let (mut engine, _rx) = create_engine();
    run_cycle(&mut engine);
    assert_eq!(shape(engine.period()), (Level::Small, Phase::Work, 60));
    run_cycle(&mut engine);
    assert_eq!(shape(engine.period()), (Level::Medium, Phase::Work, 300));
    assert_eq!(engine.period().repeat_count, 0);
}

#[test]
fn two_medium_cycles_escalate_to_pomodoro() {
    let (mut engine, _rx) = create_engine();
    for _ in 0..4 {
        run_cycle(&mut engine);
    }
    assert_eq!(shape(engine.period()), (Level::Pomodoro, Phase::Work, 1500));
}

#[test]
fn four_pomodoro_cycles_reach_long_break_then_resume() {
    let (mut engine, _rx) = create_engine();
    for _ in 0..4 {
        run_cycle(&mut engine);
    }
    for _ in 0..3 {
        run_cycle(&mut engine);
        assert_eq!(shape(engine.period()), (Level::Pomodoro, Phase::Work, 1500));
    }
    run_cycle(&mut engine);

    assert_eq!(shape(engine.period()), (Level::Pomodoro, Phase::Break, 1200));
    assert!(engine.period().long_break);
    assert_eq!(engine.period().repeat_count, 0);

    run_period_at_60fps(&mut engine);
    assert_eq!(shape(engine.period()), (Level::Pomodoro, Phase::Work, 1500));
    assert_eq!(engine.period().repeat_count, 0);
}

#[test]
fn long_break_does_not_count_as_a_cycle() {
    // After a long break, a full set of 4 cycles is needed again
    let mut period = Period::long_rest();
    let mut periods_until_next_long_break = 0;
    loop {
        period = advance(period);
        periods_until_next_long_break += 1;
        if period.long_break {
            break;
        }
    }
    assert_eq!(periods_until_next_long_break, 9);
}

#[test]
fn engine_follows_pure_sequence() {
    let (mut engine, _rx) = create_engine();
    for expected in periods().take(30) {
        assert_eq!(engine.period(), expected);
        let remaining = engine.remaining_seconds();
        engine.update(remaining);
    }
}

#[test]
fn events_mirror_transitions() {
    let (mut engine, mut rx) = create_engine();
    engine.start();
    for _ in 0..3 {
        let remaining = engine.remaining_seconds();
        engine.update(remaining);
    }

    let starts: Vec<Period> = std::iter::from_fn(|| rx.try_recv().ok())
        .filter_map(|event| match event {
            TimerEvent::PeriodStarted { period } => Some(period),
            _ => None,
        })
        .collect();
    let expected: Vec<Period> = periods().take(4).collect();
    assert_eq!(starts, expected);
}

#[test]
fn fill_ratio_is_one_at_start_and_zero_at_end() {
    let (mut engine, _rx) = create_engine();
    for _ in 0..10 {
        assert_eq!(engine.fill_ratio(), 1.0);
        let remaining = engine.remaining_seconds();
        engine.tick(remaining);
        assert_eq!(engine.fill_ratio(), 0.0);
        engine.advance();
    }
}

// ============================================================================
// Clock Invariants
// ============================================================================

proptest! {
    #[test]
    fn remaining_never_increases_within_period(deltas in prop::collection::vec(-5.0f64..120.0, 1..200)) {
        let (mut engine, _rx) = create_engine();
        let mut previous = engine.remaining_seconds();
        let mut period = engine.period();

        for delta in deltas {
            let advanced = engine.update(delta);
            let remaining = engine.remaining_seconds();
            prop_assert!(remaining >= 0.0);
            if advanced {
                prop_assert_eq!(engine.period(), advance(period));
                prop_assert_eq!(remaining, f64::from(engine.period().duration_seconds));
                period = engine.period();
            } else {
                prop_assert!(remaining <= previous);
            }
            previous = remaining;
        }
    }

    #[test]
    fn fill_ratio_stays_in_unit_interval(deltas in prop::collection::vec(0.0f64..90.0, 1..200)) {
        let (mut engine, _rx) = create_engine();
        for delta in deltas {
            engine.update(delta);
            let fill = engine.fill_ratio();
            prop_assert!((0.0..=1.0).contains(&fill));
        }
    }

    #[test]
    fn transition_sequence_ignores_timing(deltas in prop::collection::vec(0.01f64..400.0, 1..300)) {
        let (mut engine, _rx) = create_engine();
        let mut seen = vec![engine.period()];
        for delta in deltas {
            if engine.update(delta) {
                seen.push(engine.period());
            }
        }
        let expected: Vec<Period> = periods().take(seen.len()).collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn repeat_count_within_level_limit(steps in 0usize..500) {
        let period = periods().nth(steps).unwrap();
        prop_assert!(period.repeat_count <= period.level.repeat_limit());
    }
}
