//! Timer engine module for the Pomodoro ladder.
//!
//! This module contains the core timer functionality:
//! - `transition`: Pure period transition function and sequence helpers
//! - `timer`: Frame-polled engine with countdown and event firing

pub mod timer;
pub mod transition;

pub use timer::{TimerEngine, TimerEvent};
pub use transition::{advance, periods, schedule};
