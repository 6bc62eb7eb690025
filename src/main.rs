//! Focus Clock - a full-screen clock with a gesture-driven countdown timer
//!
//! This is the main entry point for the focus-clock console.

use std::{io::IsTerminal, sync::Arc};
use tokio::io::{stdin, stdout, BufReader};
use tracing::info;

use focus_clock::{
    config::Config,
    console::{run_console, OutputMode},
    state::AppState,
    tasks::{clock_tick_task, completion_alert_task, control_follow_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout carries only console responses
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_clock={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting focus-clock v1.0.0");
    info!("Configuration: minutes={}, control={:?}, theme={:?}",
          config.minutes, config.control, config.theme);

    // Create session state
    let state = Arc::new(AppState::new(
        config.default_seconds(),
        config.drag_control(),
        config.settings(),
    ));

    // Start background tasks
    let clock_state = Arc::clone(&state);
    tokio::spawn(async move {
        clock_tick_task(clock_state).await;
    });

    let completion_rx = state.subscribe_completion().map_err(anyhow::Error::msg)?;
    let bell = !config.no_bell;
    tokio::spawn(async move {
        completion_alert_task(completion_rx, bell).await;
    });

    let follow_state = Arc::clone(&state);
    tokio::spawn(async move {
        control_follow_task(follow_state).await;
    });

    let mode = if config.json {
        OutputMode::Json
    } else if std::io::stdout().is_terminal() {
        OutputMode::Color
    } else {
        OutputMode::Plain
    };

    let console = run_console(Arc::clone(&state), BufReader::new(stdin()), stdout(), mode);

    let interrupted = tokio::select! {
        result = console => {
            if let Err(e) = result {
                tracing::error!("Console error: {}", e);
            }
            false
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
            true
        }
    };

    // Release the countdown tick before the runtime goes away
    state.stop().map_err(anyhow::Error::msg)?;

    info!("Session ended");
    if interrupted {
        // A pending stdin read would otherwise hold up runtime shutdown
        std::process::exit(0);
    }
    Ok(())
}
