//! Countdown tick background task

use std::{sync::Weak, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

use crate::state::{countdown::TickOutcome, timer::TimerShared};

/// Period between two countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Spawn the tick task for the countdown armed with `generation`
pub fn spawn_ticker(shared: Weak<TimerShared>, generation: u64) -> JoinHandle<()> {
    tokio::spawn(countdown_ticker_task(shared, generation))
}

/// Background task that feeds one tick per second into the countdown.
///
/// Exits when the countdown completes, when its generation is superseded, or
/// when the owning timer has been dropped.
pub async fn countdown_ticker_task(shared: Weak<TimerShared>, generation: u64) {
    debug!("Starting countdown ticker (generation {})", generation);

    // The first tick lands one full period after arming
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

    loop {
        interval.tick().await;

        let Some(shared) = shared.upgrade() else {
            debug!("Countdown dropped, ticker {} exiting", generation);
            break;
        };

        match shared.tick(generation) {
            TickOutcome::Decremented(_) => {}
            TickOutcome::Completed => {
                debug!("Countdown completed, ticker {} exiting", generation);
                break;
            }
            TickOutcome::Ignored => {
                debug!("Ticker {} superseded, exiting", generation);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CountdownTimer;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn stale_generation_exits_without_ticking() {
        let mut timer = CountdownTimer::new(10);
        timer.start();
        timer.pause();

        // hand-arm a ticker with a generation the countdown no longer uses
        let handle = spawn_ticker(timer.shared_for_tests(), 1);
        sleep(Duration::from_millis(1500)).await;

        assert!(handle.is_finished());
        assert_eq!(timer.snapshot().remaining_seconds, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_timer_ends_the_ticker() {
        let handle = {
            let mut timer = CountdownTimer::new(10);
            timer.start();
            spawn_ticker(timer.shared_for_tests(), 1)
        };

        sleep(Duration::from_millis(1500)).await;
        assert!(handle.is_finished());
    }
}
