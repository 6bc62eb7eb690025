//! Screen session state management

use std::{
    sync::{Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use super::{CountdownTimer, Settings, Theme, TimerSnapshot, TimerState};
use crate::{
    clock,
    gesture::{DragControl, PressClassifier, PressKind},
};

/// Everything one screen session owns: the countdown, the drag surface
/// that sets it, and the display settings
#[derive(Debug)]
pub struct AppState {
    pub timer: Mutex<CountdownTimer>,
    pub control: Mutex<DragControl>,
    pub settings: Mutex<Settings>,
    pub press: PressClassifier,
    /// Duration a long-press resets to
    pub default_seconds: u64,
    /// Channel for wall-clock updates
    pub clock_tx: watch::Sender<NaiveDateTime>,
    /// Keep the receiver alive to prevent channel closure
    pub _clock_rx: watch::Receiver<NaiveDateTime>,
    /// Session metadata
    pub start_time: Instant,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create a session holding an idle countdown of `default_seconds`
    pub fn new(default_seconds: u64, control: DragControl, settings: Settings) -> Self {
        let (clock_tx, clock_rx) = watch::channel(Local::now().naive_local());
        let default_seconds = default_seconds.min(control.max_minutes().saturating_mul(60));

        Self {
            timer: Mutex::new(CountdownTimer::new(default_seconds)),
            control: Mutex::new(control),
            settings: Mutex::new(settings),
            press: PressClassifier::default(),
            default_seconds,
            clock_tx,
            _clock_rx: clock_rx,
            start_time: Instant::now(),
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    fn lock_timer(&self) -> Result<MutexGuard<'_, CountdownTimer>, String> {
        self.timer.lock()
            .map_err(|e| format!("Failed to lock timer: {}", e))
    }

    fn lock_control(&self) -> Result<MutexGuard<'_, DragControl>, String> {
        self.control.lock()
            .map_err(|e| format!("Failed to lock drag control: {}", e))
    }

    fn lock_settings(&self) -> Result<MutexGuard<'_, Settings>, String> {
        self.settings.lock()
            .map_err(|e| format!("Failed to lock settings: {}", e))
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Run a timer operation and record it as the last action
    pub fn control_timer<F>(&self, action: &str, op: F) -> Result<TimerSnapshot, String>
    where
        F: FnOnce(&mut CountdownTimer) -> TimerSnapshot,
    {
        let mut timer = self.lock_timer()?;
        let snapshot = op(&mut *timer);
        drop(timer);

        self.record_action(action);
        Ok(snapshot)
    }

    pub fn start(&self) -> Result<TimerSnapshot, String> {
        self.control_timer("start", CountdownTimer::start)
    }

    pub fn pause(&self) -> Result<TimerSnapshot, String> {
        self.control_timer("pause", CountdownTimer::pause)
    }

    pub fn resume(&self) -> Result<TimerSnapshot, String> {
        self.control_timer("resume", CountdownTimer::resume)
    }

    pub fn toggle(&self) -> Result<TimerSnapshot, String> {
        self.control_timer("toggle", CountdownTimer::toggle)
    }

    pub fn stop(&self) -> Result<TimerSnapshot, String> {
        self.control_timer("stop", CountdownTimer::stop)
    }

    /// Reset the countdown to `minutes`, or to the default duration.
    ///
    /// Minutes beyond the drag surface's range are clamped to its upper end.
    pub fn reset(&self, minutes: Option<u64>) -> Result<TimerSnapshot, String> {
        let max_minutes = self.lock_control()?.max_minutes();
        let seconds = minutes
            .map_or(self.default_seconds, |m| m.min(max_minutes).saturating_mul(60));
        let snapshot = self.control_timer("reset", |timer| timer.reset(seconds))?;
        self.lock_control()?.set_minutes(seconds / 60);
        Ok(snapshot)
    }

    /// Handle a completed press on the timer display
    pub fn press(&self, held: Duration, movement: f64) -> Result<(PressKind, TimerSnapshot), String> {
        let kind = self.press.classify(held, movement);
        debug!("Press held {:?}, moved {}px: {:?}", held, movement, kind);

        let snapshot = match kind {
            PressKind::Tap => self.toggle()?,
            PressKind::LongPress => self.reset(None)?,
            PressKind::Cancelled => self.timer_snapshot()?,
        };
        Ok((kind, snapshot))
    }

    /// Live drag update: preview the value without starting the countdown.
    ///
    /// Ignored while the countdown is running.
    pub fn drag(&self, translation: f64) -> Result<TimerSnapshot, String> {
        let mut timer = self.lock_timer()?;
        if timer.snapshot().state == TimerState::Running {
            debug!("Drag ignored while the countdown is running");
            return Ok(timer.snapshot());
        }

        let seconds = self.lock_control()?.changed(translation);
        Ok(timer.update_remaining(seconds))
    }

    /// Drag release: commit the value as the base for the next drag
    pub fn release(&self, translation: f64) -> Result<TimerSnapshot, String> {
        let mut timer = self.lock_timer()?;
        if timer.snapshot().state == TimerState::Running {
            debug!("Release ignored while the countdown is running");
            return Ok(timer.snapshot());
        }

        let seconds = self.lock_control()?.ended(translation);
        let snapshot = timer.update_remaining(seconds);
        drop(timer);

        info!("Countdown set to {}", snapshot.formatted);
        self.record_action("release");
        Ok(snapshot)
    }

    /// Keep the drag surface in step with a published snapshot
    pub fn follow(&self, snapshot: &TimerSnapshot) -> Result<(), String> {
        if snapshot.is_active() {
            self.lock_control()?.follow(snapshot.remaining_seconds);
        }
        Ok(())
    }

    /// Get current timer snapshot
    pub fn timer_snapshot(&self) -> Result<TimerSnapshot, String> {
        Ok(self.lock_timer()?.snapshot())
    }

    pub fn subscribe_timer(&self) -> Result<watch::Receiver<TimerSnapshot>, String> {
        Ok(self.lock_timer()?.subscribe())
    }

    pub fn subscribe_completion(&self) -> Result<broadcast::Receiver<TimerSnapshot>, String> {
        Ok(self.lock_timer()?.subscribe_completion())
    }

    /// Current position of the drag surface in minutes
    pub fn control_minutes(&self) -> Result<f64, String> {
        Ok(self.lock_control()?.minutes())
    }

    /// Get current display settings
    pub fn get_settings(&self) -> Result<Settings, String> {
        Ok(self.lock_settings()?.clone())
    }

    pub fn set_theme(&self, theme: Theme) -> Result<Settings, String> {
        let mut settings = self.lock_settings()?;
        settings.set_theme(theme);
        let new_settings = settings.clone();
        drop(settings);

        self.record_action("theme");
        Ok(new_settings)
    }

    pub fn set_brightness(&self, brightness: f32) -> Result<Settings, String> {
        let mut settings = self.lock_settings()?;
        settings.set_brightness(brightness);
        let new_settings = settings.clone();
        drop(settings);

        self.record_action("brightness");
        Ok(new_settings)
    }

    /// Clock lines for the latest wall-clock time
    pub fn clock_lines(&self) -> Result<Vec<String>, String> {
        let now = *self.clock_tx.borrow();
        let settings = self.lock_settings()?;
        Ok(clock::clock_lines(&now, &settings))
    }

    /// Calculate session uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
