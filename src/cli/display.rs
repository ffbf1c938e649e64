//! Display utilities for the Pomodoro ladder CLI.
//!
//! This module provides formatted output for:
//! - The period schedule (table and JSON)
//! - Run summaries
//! - Error messages

use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::presentation::format_remaining;
use crate::types::{Phase, ScheduleEntry};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Prints the schedule as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub fn show_schedule(entries: &[ScheduleEntry]) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        Self::write_schedule(&mut out, entries).context("Failed to write schedule")?;
        out.flush().context("Failed to flush stdout")
    }

    /// Prints the schedule as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or stdout cannot be written.
    pub fn show_schedule_json(entries: &[ScheduleEntry]) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        Self::write_schedule_json(&mut out, entries)?;
        out.flush().context("Failed to flush stdout")
    }

    /// Writes the schedule as pretty JSON to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_schedule_json<W: Write>(out: &mut W, entries: &[ScheduleEntry]) -> Result<()> {
        let json =
            serde_json::to_string_pretty(entries).context("Failed to serialize schedule")?;
        writeln!(out, "{}", json).context("Failed to write schedule")
    }

    /// Returns true if `error` was caused by the reader closing the pipe
    /// (e.g. `| head`).
    pub fn is_broken_pipe(error: &anyhow::Error) -> bool {
        error.chain().any(|cause| {
            cause
                .downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
        })
    }

    /// Writes the schedule table to `out`.
    pub fn write_schedule<W: Write>(out: &mut W, entries: &[ScheduleEntry]) -> io::Result<()> {
        writeln!(out, "  #  開始      レベル      フェーズ    時間   回数")?;
        writeln!(out, "─────────────────────────────────────────────────")?;
        for entry in entries {
            writeln!(
                out,
                "{:>3}  {:>8}  {:<10}  {:<10}  {}  {}/{}",
                entry.index,
                Self::format_offset(entry.starts_at_seconds),
                entry.level.as_str(),
                Self::phase_name(entry.phase, entry.long_break),
                format_remaining(f64::from(entry.duration_seconds)),
                entry.repeat_count,
                entry.level.repeat_limit(),
            )?;
        }
        Ok(())
    }

    /// Shows how the run ended.
    pub fn show_run_summary(completed_periods: u32) {
        println!();
        println!("[] タイマーを終了しました (完了した期間: {})", completed_periods);
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    /// Formats an offset in seconds as `h:mm:ss`.
    fn format_offset(total_seconds: u64) -> String {
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    }

    fn phase_name(phase: Phase, long_break: bool) -> &'static str {
        match phase {
            Phase::Work => "作業",
            Phase::Break if long_break => "長い休憩",
            Phase::Break => "休憩",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
