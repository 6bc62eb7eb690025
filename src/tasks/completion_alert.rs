//! Completion alert background task

use std::io::Write;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use crate::state::TimerSnapshot;

/// Background task that signals each completed countdown.
///
/// Rings the terminal bell when `bell` is set. Ends when the timer is dropped.
pub async fn completion_alert_task(mut completion_rx: broadcast::Receiver<TimerSnapshot>, bell: bool) {
    info!("Starting completion alert task");

    loop {
        match completion_rx.recv().await {
            Ok(snapshot) => {
                info!("Timer completed! ({} total seconds)", snapshot.total_seconds);
                if bell {
                    let mut stdout = std::io::stdout();
                    if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
                        warn!("Failed to ring terminal bell: {}", e);
                    }
                }
            }
            Err(RecvError::Lagged(missed)) => {
                warn!("Missed {} completion notifications", missed);
            }
            Err(RecvError::Closed) => {
                info!("Completion channel closed, alert task exiting");
                break;
            }
        }
    }
}
