//! CLI module for the Pomodoro ladder.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `display`: Output formatting for schedules, summaries and errors
//! - `terminal`: Presentation adapter drawing a status line
//! - `runner`: Frame loop driving the engine and presenter

pub mod commands;
pub mod display;
pub mod runner;
pub mod terminal;

pub use commands::{Cli, Commands, RunArgs, ScheduleArgs};
pub use display::Display;
pub use runner::FrameLoop;
pub use terminal::TerminalAdapter;
