//! State management module
//!
//! This module contains the countdown state machine, the timer that drives
//! it, display settings, and the per-session state that ties them together.

pub mod app_state;
pub mod countdown;
pub mod settings;
pub mod timer;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use countdown::Countdown;
pub use settings::{Settings, Theme};
pub use timer::CountdownTimer;
pub use timer_state::{TimerSnapshot, TimerState};
