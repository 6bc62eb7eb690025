//! Wall-clock background task

use chrono::Local;
use std::{sync::Arc, time::Duration};
use tokio::time::interval;
use tracing::info;

use crate::state::AppState;

/// Background task that publishes the local wall-clock time once per second
pub async fn clock_tick_task(state: Arc<AppState>) {
    info!("Starting wall-clock task");

    let mut interval = interval(Duration::from_secs(1));

    loop {
        interval.tick().await;
        state.clock_tx.send_replace(Local::now().naive_local());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gesture::{DragControl, RangeMapper},
        state::Settings,
    };

    #[tokio::test(start_paused = true)]
    async fn publishes_every_second() {
        let slider = DragControl::Slider(RangeMapper::new(0..=120, 20.0, 10));
        let state = Arc::new(AppState::new(600, slider, Settings::new()));
        let mut clock_rx = state.clock_tx.subscribe();
        let handle = tokio::spawn(clock_tick_task(Arc::clone(&state)));

        clock_rx.changed().await.unwrap();
        clock_rx.borrow_and_update();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(clock_rx.has_changed().unwrap());

        handle.abort();
    }
}
