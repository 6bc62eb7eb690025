//! Focus Clock - a full-screen clock with a gesture-driven countdown timer
//!
//! This library provides the countdown state machine and its 1 Hz tick task,
//! the drag mappers that turn gestures into countdown values, wall-clock
//! formatting and themes, and a console surface to drive them.

pub mod clock;
pub mod config;
pub mod console;
pub mod gesture;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use console::run_console;
pub use gesture::{DragControl, RangeMapper, RulerMapper};
pub use state::{AppState, Countdown, CountdownTimer, TimerSnapshot, TimerState};
pub use utils::signals::shutdown_signal;
