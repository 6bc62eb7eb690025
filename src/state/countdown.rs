//! Countdown state machine
//!
//! `Countdown` holds the remaining/total seconds and the lifecycle state. It
//! owns no timer: every operation reports what the tick source must do next
//! through [`TickCommand`], and the owner feeds ticks back in through
//! [`Countdown::tick`].
//!
//! ```text
//! Idle -> Running -> (Paused | Completed)
//! Paused -> Running
//! any --reset/stop--> Idle
//! ```

use tracing::{debug, info};

use super::timer_state::{format_mm_ss, minutes_ceil, TimerSnapshot, TimerState};

/// Instruction for whoever drives the 1 Hz tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickCommand {
    /// Leave the tick source as it is
    Unchanged,
    /// Cancel any pending tick and arm a new one tagged with this generation
    Arm(u64),
    /// Cancel any pending tick
    Disarm,
}

/// Result of feeding one tick into the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick was stale or the countdown is not running
    Ignored,
    /// One second elapsed, this many remain
    Decremented(u64),
    /// The countdown reached zero; the tick source must stop
    Completed,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: u64,
    total: u64,
    state: TimerState,
    /// Bumped every time the tick source is armed or disarmed.
    generation: u64,
}

impl Countdown {
    /// Create an idle countdown holding `remaining` seconds
    pub fn new(remaining: u64) -> Self {
        Self {
            remaining,
            total: 0,
            state: TimerState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fraction of the countdown already elapsed, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.state == TimerState::Completed {
            return 1.0;
        }
        if self.total == 0 {
            return 0.0;
        }
        let elapsed = self.total as f64 - self.remaining as f64;
        (elapsed / self.total as f64).clamp(0.0, 1.0)
    }

    pub fn formatted_remaining(&self) -> String {
        format_mm_ss(self.remaining)
    }

    pub fn formatted_minutes_remaining(&self) -> u64 {
        minutes_ceil(self.remaining)
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == TimerState::Paused
    }

    pub fn is_completed(&self) -> bool {
        self.state == TimerState::Completed
    }

    pub fn can_start(&self) -> bool {
        self.state == TimerState::Idle
    }

    pub fn can_pause(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn can_resume(&self) -> bool {
        self.state == TimerState::Paused
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state,
            remaining_seconds: self.remaining,
            total_seconds: self.total,
            progress: self.progress(),
            formatted: self.formatted_remaining(),
        }
    }

    // Commands. Invalid transitions are silent no-ops.

    pub fn start(&mut self) -> TickCommand {
        if !self.can_start() {
            debug!("start ignored in state {:?}", self.state);
            return TickCommand::Unchanged;
        }
        self.total = self.remaining;
        self.state = TimerState::Running;
        info!("Countdown started with {}", self.formatted_remaining());
        self.arm()
    }

    pub fn pause(&mut self) -> TickCommand {
        if !self.can_pause() {
            debug!("pause ignored in state {:?}", self.state);
            return TickCommand::Unchanged;
        }
        self.state = TimerState::Paused;
        info!("Countdown paused at {}", self.formatted_remaining());
        self.disarm()
    }

    pub fn resume(&mut self) -> TickCommand {
        if !self.can_resume() {
            debug!("resume ignored in state {:?}", self.state);
            return TickCommand::Unchanged;
        }
        self.state = TimerState::Running;
        info!("Countdown resumed at {}", self.formatted_remaining());
        self.arm()
    }

    /// Tap semantics: start, pause or resume depending on the current state
    pub fn toggle(&mut self) -> TickCommand {
        match self.state {
            TimerState::Idle => self.start(),
            TimerState::Running => self.pause(),
            TimerState::Paused => self.resume(),
            TimerState::Completed => TickCommand::Unchanged,
        }
    }

    /// Force `Idle` and clear remaining, total and progress
    pub fn stop(&mut self) -> TickCommand {
        self.state = TimerState::Idle;
        self.remaining = 0;
        self.total = 0;
        info!("Countdown stopped");
        self.disarm()
    }

    /// Return to `Idle` holding `seconds`, whatever the current state
    pub fn reset(&mut self, seconds: u64) -> TickCommand {
        self.state = TimerState::Idle;
        self.remaining = seconds;
        self.total = 0;
        info!("Countdown reset to {}", self.formatted_remaining());
        self.disarm()
    }

    /// Overwrite the remaining time without touching the state
    pub fn update_remaining(&mut self, seconds: i64) {
        self.remaining = seconds.max(0) as u64;
        debug!("Remaining time set to {}", self.formatted_remaining());
    }

    /// Apply one tick from the tick source armed with `generation`
    pub fn tick(&mut self, generation: u64) -> TickOutcome {
        if generation != self.generation || self.state != TimerState::Running {
            return TickOutcome::Ignored;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return TickOutcome::Decremented(self.remaining);
        }

        self.state = TimerState::Completed;
        self.remaining = 0;
        self.disarm();
        info!("Countdown completed");
        TickOutcome::Completed
    }

    fn arm(&mut self) -> TickCommand {
        self.generation += 1;
        TickCommand::Arm(self.generation)
    }

    fn disarm(&mut self) -> TickCommand {
        self.generation += 1;
        TickCommand::Disarm
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MINUTES * 60)
    }
}
