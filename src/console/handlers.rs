//! Console command handlers

use tracing::{error, info};

use crate::state::{AppState, TimerSnapshot, TimerState};
use crate::gesture::PressKind;
use super::{
    commands::{Command, HELP},
    responses::{Response, StatusResponse, TimerResponse},
};

/// Apply one command to the session and build the response.
///
/// `Quit` is handled by the console loop and answers with help text here.
pub fn handle_command(state: &AppState, command: Command) -> Response {
    match command {
        Command::Start => transition(state, "start", TimerState::Running, AppState::start),
        Command::Pause => transition(state, "pause", TimerState::Paused, AppState::pause),
        Command::Resume => transition(state, "resume", TimerState::Running, AppState::resume),
        Command::Tap => timer_response("tap", state.toggle(), |snapshot| {
            format!("Countdown {:?}", snapshot.state).to_lowercase()
        }),
        Command::Stop => timer_response("stop", state.stop(), |_| "Countdown stopped".to_string()),
        Command::Reset(minutes) => timer_response("reset", state.reset(minutes), |snapshot| {
            format!("Countdown reset to {}", snapshot.formatted)
        }),
        Command::Press { held, movement } => press_handler(state, held, movement),
        Command::Drag(translation) => timer_response("drag", state.drag(translation), |snapshot| {
            format!("Previewing {}", snapshot.formatted)
        }),
        Command::Release(translation) => {
            timer_response("release", state.release(translation), |snapshot| {
                format!("Countdown set to {}", snapshot.formatted)
            })
        }
        Command::Status => status_handler(state),
        Command::Clock => match state.clock_lines() {
            Ok(lines) => Response::Clock { lines },
            Err(e) => failure("clock", e),
        },
        Command::Theme(theme) => match state.set_theme(theme) {
            Ok(settings) => Response::Settings {
                message: format!("Theme set to {:?}", theme),
                settings,
            },
            Err(e) => failure("theme", e),
        },
        Command::Brightness(brightness) => match state.set_brightness(brightness) {
            Ok(settings) => Response::Settings {
                message: format!("Brightness set to {:.2}", settings.brightness),
                settings,
            },
            Err(e) => failure("brightness", e),
        },
        Command::Help | Command::Quit => Response::Help {
            text: HELP.to_string(),
        },
    }
}

/// Handle a guarded transition, reporting when it was a no-op
fn transition<F>(state: &AppState, action: &str, target: TimerState, op: F) -> Response
where
    F: FnOnce(&AppState) -> Result<TimerSnapshot, String>,
{
    let before = match state.timer_snapshot() {
        Ok(snapshot) => snapshot.state,
        Err(e) => return failure(action, e),
    };

    timer_response(action, op(state), |snapshot| {
        if before != target && snapshot.state == target {
            format!("Countdown {}", past_tense(action))
        } else {
            format!("Cannot {} while {:?}, ignored", action, before).to_lowercase()
        }
    })
}

fn press_handler(state: &AppState, held: std::time::Duration, movement: f64) -> Response {
    match state.press(held, movement) {
        Ok((kind, snapshot)) => {
            let message = match kind {
                PressKind::Tap => format!("Tap: countdown {:?}", snapshot.state).to_lowercase(),
                PressKind::LongPress => format!("Long-press: countdown reset to {}", snapshot.formatted),
                PressKind::Cancelled => "Press moved too far, cancelled".to_string(),
            };
            info!("{}", message);
            Response::Timer(TimerResponse::new("press", message, snapshot))
        }
        Err(e) => failure("press", e),
    }
}

fn status_handler(state: &AppState) -> Response {
    let build = || -> Result<StatusResponse, String> {
        let timer = state.timer_snapshot()?;
        let (last_action, last_action_time) = state.get_last_action();
        Ok(StatusResponse {
            formatted_minutes_remaining: crate::state::timer_state::minutes_ceil(timer.remaining_seconds),
            timer,
            control_minutes: state.control_minutes()?,
            settings: state.get_settings()?,
            clock: state.clock_lines()?,
            uptime: state.get_uptime(),
            last_action,
            last_action_time,
        })
    };

    match build() {
        Ok(status) => Response::Status(status),
        Err(e) => failure("status", e),
    }
}

fn timer_response<M>(action: &str, result: Result<TimerSnapshot, String>, message: M) -> Response
where
    M: FnOnce(&TimerSnapshot) -> String,
{
    match result {
        Ok(snapshot) => {
            let message = message(&snapshot);
            Response::Timer(TimerResponse::new(action, message, snapshot))
        }
        Err(e) => failure(action, e),
    }
}

fn failure(action: &str, e: String) -> Response {
    error!("Failed to {}: {}", action, e);
    Response::error(e)
}

fn past_tense(action: &str) -> &'static str {
    match action {
        "start" => "started",
        "pause" => "paused",
        "resume" => "resumed",
        _ => "updated",
    }
}
