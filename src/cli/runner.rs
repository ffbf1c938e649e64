//! Frame loop for the `run` command.
//!
//! The engine is polled once per frame:
//! - `tokio::time::interval` paces the frames
//! - real elapsed time (times the configured scale) is fed to the engine
//! - queued engine events are drained into the presenter
//! - the presenter renders the frame
//!
//! The loop ends on Ctrl-C or after the configured number of periods.

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::terminal::TerminalAdapter;
use crate::engine::{TimerEngine, TimerEvent};
use crate::presentation::{
    FastRandSource, PresentationAdapter, Presenter, RandomSource, Spinner, StatusLabels,
};
use crate::sound::{AudioBridge, CueSounds, SoundPlayer};
use crate::types::RunConfig;

// ============================================================================
// FrameLoop
// ============================================================================

/// Engine, event queue and presenter driven together one frame at a time.
pub struct FrameLoop<A, R> {
    engine: TimerEngine,
    event_rx: mpsc::UnboundedReceiver<TimerEvent>,
    presenter: Presenter<A, R>,
    time_scale: f64,
    max_periods: Option<u32>,
}

impl<A: PresentationAdapter, R: RandomSource> FrameLoop<A, R> {
    /// Creates a loop and announces the initial period.
    pub fn new(presenter: Presenter<A, R>, time_scale: f64, max_periods: Option<u32>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let mut engine = TimerEngine::new(event_tx);
        engine.start();
        Self {
            engine,
            event_rx,
            presenter,
            time_scale,
            max_periods,
        }
    }

    /// Runs one frame with `real_delta_seconds` of wall-clock time.
    ///
    /// Returns true once the period limit has been reached.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter fails to present the frame.
    pub fn step(&mut self, real_delta_seconds: f64) -> Result<bool> {
        self.engine.update(real_delta_seconds * self.time_scale);

        while let Ok(event) = self.event_rx.try_recv() {
            self.presenter.handle_event(&event);
        }

        // Decorations animate in real time regardless of the time scale
        self.presenter.render(
            &self.engine.reading(),
            &self.engine.period(),
            real_delta_seconds,
        )?;

        Ok(self.is_finished())
    }

    /// Runs frames at `fps` until Ctrl-C or the period limit.
    ///
    /// Returns the number of completed periods.
    ///
    /// # Errors
    ///
    /// Returns an error if a frame fails or Ctrl-C cannot be watched.
    pub async fn run(&mut self, fps: u32) -> Result<u32> {
        let mut ticker = interval(Duration::from_secs_f64(1.0 / f64::from(fps.max(1))));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let mut last_frame = Instant::now();
        loop {
            tokio::select! {
                result = &mut ctrl_c => {
                    result.context("Failed to listen for Ctrl-C")?;
                    info!("Interrupted, stopping timer");
                    break;
                }
                _ = ticker.tick() => {
                    let now = Instant::now();
                    let delta = now.duration_since(last_frame).as_secs_f64();
                    last_frame = now;

                    if self.step(delta)? {
                        debug!(completed = self.engine.completed_periods(), "period limit reached");
                        break;
                    }
                }
            }
        }

        Ok(self.engine.completed_periods())
    }

    /// Returns true once the period limit has been reached.
    pub fn is_finished(&self) -> bool {
        self.max_periods
            .is_some_and(|limit| self.engine.completed_periods() >= limit)
    }

    /// Returns the engine.
    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    /// Returns the presenter.
    pub fn presenter(&self) -> &Presenter<A, R> {
        &self.presenter
    }

    /// Returns the presenter mutably.
    pub fn presenter_mut(&mut self) -> &mut Presenter<A, R> {
        &mut self.presenter
    }
}

// ============================================================================
// Entry point
// ============================================================================

/// Runs the timer in the terminal.
///
/// Returns the number of completed periods.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the terminal cannot
/// be written.
pub async fn run(config: RunConfig, cues: CueSounds) -> Result<u32> {
    config.validate().map_err(anyhow::Error::msg)?;

    let sound: Option<Box<dyn SoundPlayer>> = if config.sound {
        match AudioBridge::spawn() {
            Ok(bridge) => Some(Box::new(bridge)),
            Err(e) => {
                warn!("Audio not available, sound disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let adapter: TerminalAdapter<Stdout> = TerminalAdapter::new(io::stdout(), sound, cues);
    let presenter = Presenter::new(
        adapter,
        FastRandSource::new(config.seed),
        StatusLabels::for_language(config.language),
        config.decorations,
    )
    .with_spinner(Spinner::new(config.spin_degrees_per_second));

    let mut frame_loop = FrameLoop::new(presenter, config.time_scale, config.max_periods);
    let result = frame_loop.run(config.fps).await;
    frame_loop.presenter_mut().adapter_mut().finish()?;
    result
}

// ============================================================================
// Tests
// ============================================================================
