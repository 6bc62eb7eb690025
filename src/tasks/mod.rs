//! Background tasks module
//!
//! This module contains the tick tasks and watchers that run alongside the
//! console session.

pub mod clock_tick;
pub mod completion_alert;
pub mod control_follow;
pub mod ticker;

// Re-export main functions
pub use clock_tick::clock_tick_task;
pub use completion_alert::completion_alert_task;
pub use control_follow::control_follow_task;
pub use ticker::{countdown_ticker_task, spawn_ticker};
