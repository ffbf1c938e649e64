//! Command definitions for the Pomodoro ladder CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::sound::CueSounds;
use crate::types::{Language, RunConfig, DEFAULT_DECORATIONS};

// ============================================================================
// CLI Structure
// ============================================================================

/// Escalating Pomodoro timer: 1 min → 5 min → 25 min work periods
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-ladder",
    version,
    about = "段階的に長くなるポモドーロタイマー",
    long_about = "1分の作業から始まり、5分、25分と段階的に作業時間が伸びるポモドーロタイマー。\n\
                  25分の作業を4回終えるごとに20分の長い休憩が入ります。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the timer in this terminal
    Run(RunArgs),

    /// Print the sequence of periods the timer goes through
    Schedule(ScheduleArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Number of decorative highlight slots (1-32)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_DECORATIONS,
        value_parser = parse_decorations
    )]
    pub decorations: usize,

    /// Frames per second (1-240)
    #[arg(
        short,
        long,
        default_value = "60",
        value_parser = clap::value_parser!(u32).range(1..=240)
    )]
    pub fps: u32,

    /// Speed multiplier applied to real time (e.g. 60 runs a minute per second)
    #[arg(short, long, default_value = "1", value_parser = parse_time_scale)]
    pub time_scale: f64,

    /// Status label language
    #[arg(short, long, value_enum, default_value_t = Language::Ja)]
    pub lang: Language,

    /// Seed for the highlight randomizer
    #[arg(long)]
    pub seed: Option<u64>,

    /// Exit after this many periods have completed
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub periods: Option<u32>,

    /// Disable audio cues
    #[arg(long)]
    pub no_sound: bool,

    /// Sound file played when work starts
    #[arg(long, value_name = "PATH")]
    pub work_sound: Option<PathBuf>,

    /// Sound file played when a break starts
    #[arg(long, value_name = "PATH")]
    pub break_sound: Option<PathBuf>,

    /// Sound file played when the long break starts
    #[arg(long, value_name = "PATH")]
    pub long_break_sound: Option<PathBuf>,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            decorations: DEFAULT_DECORATIONS,
            fps: 60,
            time_scale: 1.0,
            lang: Language::Ja,
            seed: None,
            periods: None,
            no_sound: false,
            work_sound: None,
            break_sound: None,
            long_break_sound: None,
        }
    }
}

impl RunArgs {
    /// Builds the run configuration from the parsed arguments.
    pub fn to_config(&self) -> RunConfig {
        RunConfig {
            decorations: self.decorations,
            fps: self.fps,
            time_scale: self.time_scale,
            sound: !self.no_sound,
            language: self.lang,
            seed: self.seed,
            max_periods: self.periods,
            ..RunConfig::default()
        }
    }

    /// Builds the cue sound table from the parsed arguments.
    pub fn cue_sounds(&self) -> CueSounds {
        CueSounds::with_files(
            self.work_sound.clone(),
            self.break_sound.clone(),
            self.long_break_sound.clone(),
        )
    }
}

// ============================================================================
// Schedule Command Arguments
// ============================================================================

/// Arguments for the schedule command
#[derive(Args, Debug, Clone)]
pub struct ScheduleArgs {
    /// Number of periods to print (1-500)
    #[arg(
        short = 'n',
        long,
        default_value = "12",
        value_parser = clap::value_parser!(u16).range(1..=500)
    )]
    pub count: u16,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates the number of decorative slots.
fn parse_decorations(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("数値を指定してください: {}", s))?;
    if !(1..=32).contains(&value) {
        return Err("装飾の数は1-32の範囲で指定してください".to_string());
    }
    Ok(value)
}

/// Validates the time multiplier.
///
/// - Must be a finite number
/// - Must be greater than 0 and at most 10000
fn parse_time_scale(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("数値を指定してください: {}", s))?;
    if !value.is_finite() || value <= 0.0 || value > 10_000.0 {
        return Err("時間倍率は0より大きく10000以下で指定してください".to_string());
    }
    Ok(value)
}

// ============================================================================
// Tests
// ============================================================================
