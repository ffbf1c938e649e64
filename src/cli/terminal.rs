//! Terminal presentation adapter.
//!
//! Renders the timer as a single status line that is redrawn in place:
//!
//! ```text
//! / 作業中 00:42 [██████████████░░░░░░]  70% ○○●○○○
//! ```

use std::io::Write;

use anyhow::{Context, Result};
use tracing::debug;

use crate::presentation::{glyph_for, AudioCue, PresentationAdapter, SlotColor};
use crate::sound::{CueSounds, SoundPlayer};

/// Width of the progress bar in cells.
const BAR_WIDTH: usize = 20;

/// Adapter drawing to a terminal (or any writer).
pub struct TerminalAdapter<W: Write> {
    out: W,
    sound: Option<Box<dyn SoundPlayer>>,
    cues: CueSounds,
    status: String,
    time_text: String,
    fill: f64,
    highlights: Vec<SlotColor>,
    rotation: f32,
    /// Last line written, to skip identical redraws
    last_line: String,
}

impl<W: Write> TerminalAdapter<W> {
    /// Creates an adapter writing to `out`. Without a player, cues are ignored.
    pub fn new(out: W, sound: Option<Box<dyn SoundPlayer>>, cues: CueSounds) -> Self {
        Self {
            out,
            sound,
            cues,
            status: String::new(),
            time_text: String::new(),
            fill: 0.0,
            highlights: Vec::new(),
            rotation: 0.0,
            last_line: String::new(),
        }
    }

    /// Builds the status line from the current state.
    pub fn line(&self) -> String {
        let fill = self.fill.clamp(0.0, 1.0);
        let filled = ((fill * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        let bar: String = "█".repeat(filled) + &"░".repeat(BAR_WIDTH - filled);
        let slots: String = self
            .highlights
            .iter()
            .map(|slot| match slot {
                SlotColor::Highlighted => '●',
                SlotColor::Neutral => '○',
            })
            .collect();
        format!(
            "{} {} {} [{}] {:>3}% {}",
            glyph_for(self.rotation),
            self.status,
            self.time_text,
            bar,
            (fill * 100.0).round() as u32,
            slots
        )
    }

    /// Ends the status line so later output starts on a fresh line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn finish(&mut self) -> Result<()> {
        if !self.last_line.is_empty() {
            writeln!(self.out).context("Failed to write to terminal")?;
            self.out.flush().context("Failed to flush terminal")?;
            self.last_line.clear();
        }
        Ok(())
    }

    /// Returns the underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> PresentationAdapter for TerminalAdapter<W> {
    fn set_status(&mut self, label: &str) {
        if self.status != label {
            self.status = label.to_string();
        }
    }

    fn set_time_text(&mut self, text: &str) {
        if self.time_text != text {
            self.time_text = text.to_string();
        }
    }

    fn set_fill(&mut self, ratio: f64) {
        self.fill = ratio;
    }

    fn set_highlights(&mut self, slots: &[SlotColor]) {
        self.highlights = slots.to_vec();
    }

    fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    fn play_cue(&mut self, cue: AudioCue) {
        let Some(sound) = &self.sound else {
            return;
        };
        let source = self.cues.source_for(cue);
        if let Err(e) = sound.play(source) {
            debug!("Cue {:?} not played: {} ({})", cue, e, e.suggestion());
        }
    }

    fn commit(&mut self) -> Result<()> {
        let line = self.line();
        if line == self.last_line {
            return Ok(());
        }

        // Pad with spaces so a shorter line fully covers the previous one
        let previous_width = self.last_line.chars().count();
        let width = line.chars().count();
        let padding = " ".repeat(previous_width.saturating_sub(width));

        write!(self.out, "\r{}{}", line, padding).context("Failed to write to terminal")?;
        self.out.flush().context("Failed to flush terminal")?;
        self.last_line = line;
        Ok(())
    }
}
