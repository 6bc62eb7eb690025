//! Drag surface follow background task

use std::sync::Arc;
use tracing::{info, warn};

use crate::state::AppState;

/// Background task that keeps the drag surface aligned with the countdown
/// while it runs or is paused
pub async fn control_follow_task(state: Arc<AppState>) {
    info!("Starting control follow task");

    let mut timer_rx = match state.subscribe_timer() {
        Ok(rx) => rx,
        Err(e) => {
            warn!("Control follow task could not subscribe: {}", e);
            return;
        }
    };

    while timer_rx.changed().await.is_ok() {
        let snapshot = timer_rx.borrow_and_update().clone();
        if let Err(e) = state.follow(&snapshot) {
            warn!("Failed to follow countdown: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gesture::{DragControl, RulerMapper},
        state::Settings,
    };
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn ruler_tracks_the_ticking_countdown() {
        let ruler = DragControl::Ruler(RulerMapper::new(800.0, 1.0));
        let state = Arc::new(AppState::new(60, ruler, Settings::new()));
        tokio::spawn(control_follow_task(Arc::clone(&state)));
        tokio::task::yield_now().await;

        state.start().unwrap();
        tokio::time::sleep(Duration::from_millis(30_500)).await;

        assert_eq!(state.timer_snapshot().unwrap().remaining_seconds, 30);
        assert_eq!(state.control_minutes().unwrap(), 0.5);
    }
}
