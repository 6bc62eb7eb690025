//! Timer state and the snapshot published to observers

use serde::{Deserialize, Serialize};

/// Lifecycle of a countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

impl TimerState {
    /// Icon affordance the UI shows for this state
    pub fn affordance(&self) -> &'static str {
        match self {
            TimerState::Running => "pause",
            TimerState::Idle | TimerState::Paused => "play",
            TimerState::Completed => "stop",
        }
    }
}

/// Point-in-time view of a countdown, sent on every mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub remaining_seconds: u64,
    pub total_seconds: u64,
    pub progress: f64,
    pub formatted: String,
}

impl TimerSnapshot {
    /// Snapshot of a fresh idle timer holding `remaining_seconds`
    pub fn idle(remaining_seconds: u64) -> Self {
        Self {
            state: TimerState::Idle,
            remaining_seconds,
            total_seconds: 0,
            progress: 0.0,
            formatted: format_mm_ss(remaining_seconds),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, TimerState::Running | TimerState::Paused)
    }
}

/// Format seconds as zero-padded `MM:SS`. Minutes are not wrapped into hours.
pub fn format_mm_ss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Whole minutes left, rounding any partial minute up
pub fn minutes_ceil(seconds: u64) -> u64 {
    seconds.div_ceil(60)
}
