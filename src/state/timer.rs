//! Countdown timer bound to a 1 Hz tick task

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tracing::{debug, info};

use super::{
    countdown::{Countdown, TickCommand, TickOutcome},
    TimerSnapshot,
};
use crate::tasks::spawn_ticker;

/// State shared between a `CountdownTimer` and its tick task.
///
/// The tick task only ever holds a `Weak` to this, so dropping the timer
/// invalidates any tick still in flight.
#[derive(Debug)]
pub struct TimerShared {
    countdown: Mutex<Countdown>,
    /// Channel for snapshot updates, sent after every mutation
    update_tx: watch::Sender<TimerSnapshot>,
    /// Channel for completion notifications
    completion_tx: broadcast::Sender<TimerSnapshot>,
}

impl TimerShared {
    fn lock(&self) -> MutexGuard<'_, Countdown> {
        self.countdown.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, snapshot: TimerSnapshot) {
        self.update_tx.send_replace(snapshot);
    }

    /// Feed one tick from the tick source armed with `generation`
    pub fn tick(&self, generation: u64) -> TickOutcome {
        let mut countdown = self.lock();
        let outcome = countdown.tick(generation);
        let snapshot = countdown.snapshot();
        drop(countdown);

        match outcome {
            TickOutcome::Ignored => {}
            TickOutcome::Decremented(remaining) => {
                debug!("Tick: {} seconds remaining", remaining);
                self.publish(snapshot);
            }
            TickOutcome::Completed => {
                self.publish(snapshot.clone());
                if self.completion_tx.send(snapshot).is_err() {
                    debug!("Countdown completed with no completion listeners");
                }
            }
        }
        outcome
    }
}

/// A countdown plus the tick task that drives it while running.
///
/// Operations that arm the tick spawn onto the current tokio runtime.
#[derive(Debug)]
pub struct CountdownTimer {
    shared: Arc<TimerShared>,
    ticker: Option<JoinHandle<()>>,
}

impl CountdownTimer {
    /// Create an idle timer holding `seconds`
    pub fn new(seconds: u64) -> Self {
        let countdown = Countdown::new(seconds);
        let (update_tx, _) = watch::channel(countdown.snapshot());
        let (completion_tx, _) = broadcast::channel(16);

        Self {
            shared: Arc::new(TimerShared {
                countdown: Mutex::new(countdown),
                update_tx,
                completion_tx,
            }),
            ticker: None,
        }
    }

    /// Watch every snapshot the timer publishes
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.shared.update_tx.subscribe()
    }

    /// Receive a snapshot each time a countdown completes
    pub fn subscribe_completion(&self) -> broadcast::Receiver<TimerSnapshot> {
        self.shared.completion_tx.subscribe()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.shared.lock().snapshot()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    pub fn start(&mut self) -> TimerSnapshot {
        self.apply(Countdown::start)
    }

    pub fn pause(&mut self) -> TimerSnapshot {
        self.apply(Countdown::pause)
    }

    pub fn resume(&mut self) -> TimerSnapshot {
        self.apply(Countdown::resume)
    }

    pub fn toggle(&mut self) -> TimerSnapshot {
        self.apply(Countdown::toggle)
    }

    pub fn stop(&mut self) -> TimerSnapshot {
        self.apply(Countdown::stop)
    }

    pub fn reset(&mut self, seconds: u64) -> TimerSnapshot {
        self.apply(|countdown| countdown.reset(seconds))
    }

    /// Preview a new remaining time without touching the state or the tick
    pub fn update_remaining(&mut self, seconds: i64) -> TimerSnapshot {
        self.apply(|countdown| {
            countdown.update_remaining(seconds);
            TickCommand::Unchanged
        })
    }

    #[cfg(test)]
    pub(crate) fn shared_for_tests(&self) -> Weak<TimerShared> {
        Arc::downgrade(&self.shared)
    }

    fn apply<F>(&mut self, op: F) -> TimerSnapshot
    where
        F: FnOnce(&mut Countdown) -> TickCommand,
    {
        let mut countdown = self.shared.lock();
        let command = op(&mut *countdown);
        let snapshot = countdown.snapshot();
        drop(countdown); // Release the lock before touching the tick task

        match command {
            TickCommand::Unchanged => {}
            TickCommand::Arm(generation) => {
                self.cancel_ticker();
                self.ticker = Some(spawn_ticker(Arc::downgrade(&self.shared), generation));
            }
            TickCommand::Disarm => self.cancel_ticker(),
        }

        self.shared.publish(snapshot.clone());
        snapshot
    }

    fn cancel_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        if self.ticker.is_some() {
            info!("Releasing countdown tick task");
        }
        self.cancel_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TimerState;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second_while_running() {
        let mut timer = CountdownTimer::new(10);
        timer.start();
        assert!(timer.is_ticking());

        sleep(Duration::from_millis(3500)).await;
        assert_eq!(timer.snapshot().remaining_seconds, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn paused_timer_does_not_tick() {
        let mut timer = CountdownTimer::new(10);
        timer.start();
        sleep(Duration::from_millis(2500)).await;
        timer.pause();
        assert!(!timer.is_ticking());

        sleep(Duration::from_secs(5)).await;
        assert_eq!(timer.snapshot().remaining_seconds, 8);
        assert_eq!(timer.snapshot().state, TimerState::Paused);

        timer.resume();
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(timer.snapshot().remaining_seconds, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_resume_never_double_ticks() {
        let mut timer = CountdownTimer::new(30);
        timer.start();
        for _ in 0..3 {
            timer.pause();
            timer.resume();
        }
        sleep(Duration::from_millis(2500)).await;
        assert_eq!(timer.snapshot().remaining_seconds, 28);
    }

    #[tokio::test(start_paused = true)]
    async fn completion_stops_the_tick_and_notifies() {
        let mut timer = CountdownTimer::new(2);
        let mut completions = timer.subscribe_completion();
        timer.start();

        let completed = completions.recv().await.unwrap();
        assert_eq!(completed.state, TimerState::Completed);
        assert_eq!(completed.remaining_seconds, 0);
        assert_eq!(completed.progress, 1.0);

        sleep(Duration::from_secs(3)).await;
        assert!(!timer.is_ticking());
        assert_eq!(timer.snapshot().state, TimerState::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_mid_countdown_cancels_the_tick() {
        let mut timer = CountdownTimer::new(60);
        timer.start();
        sleep(Duration::from_millis(1500)).await;

        let snapshot = timer.reset(600);
        assert_eq!(snapshot.state, TimerState::Idle);
        assert!(!timer.is_ticking());

        sleep(Duration::from_secs(3)).await;
        assert_eq!(timer.snapshot().remaining_seconds, 600);
    }

    #[tokio::test(start_paused = true)]
    async fn watchers_see_every_update() {
        let mut timer = CountdownTimer::new(5);
        let updates = timer.subscribe();

        timer.update_remaining(-5);
        assert_eq!(updates.borrow().remaining_seconds, 0);

        timer.update_remaining(3);
        timer.start();
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(updates.borrow().remaining_seconds, 2);
        assert_eq!(updates.borrow().state, TimerState::Running);
    }
}
