//! Console response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{Settings, TimerSnapshot};

/// Response to a command that touched the countdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    pub action: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl TimerResponse {
    pub fn new(action: &str, message: String, timer: TimerSnapshot) -> Self {
        Self {
            action: action.to_string(),
            message,
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Full session status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub formatted_minutes_remaining: u64,
    pub control_minutes: f64,
    pub settings: Settings,
    pub clock: Vec<String>,
    pub uptime: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Every response the console prints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
    Timer(TimerResponse),
    Status(StatusResponse),
    Clock { lines: Vec<String> },
    Settings { message: String, settings: Settings },
    Help { text: String },
    Error { message: String },
}

impl Response {
    pub fn error(message: String) -> Self {
        Response::Error { message }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }

    /// Plain-text rendering for an interactive terminal
    pub fn to_text(&self) -> String {
        match self {
            Response::Timer(timer) => format!(
                "[{}] {} ({})",
                timer.timer.formatted,
                timer.message,
                timer.timer.state.affordance()
            ),
            Response::Status(status) => {
                let mut lines = status.clock.clone();
                lines.push(format!(
                    "timer: {} {:?} progress {:.0}%",
                    status.timer.formatted,
                    status.timer.state,
                    status.timer.progress * 100.0
                ));
                lines.push(format!("control: {:.2} min", status.control_minutes));
                lines.push(format!(
                    "theme: {:?}, brightness {:.2}",
                    status.settings.theme, status.settings.brightness
                ));
                lines.push(format!("uptime: {}", status.uptime));
                if let Some(action) = &status.last_action {
                    lines.push(format!("last action: {}", action));
                }
                lines.join("\n")
            }
            Response::Clock { lines } => lines.join("\n"),
            Response::Settings { message, .. } => message.clone(),
            Response::Help { text } => text.clone(),
            Response::Error { message } => format!("error: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_is_tagged_by_kind() {
        let response = Response::Timer(TimerResponse::new(
            "start",
            "Countdown started".to_string(),
            TimerSnapshot::idle(600),
        ));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["kind"], "timer");
        assert_eq!(json["action"], "start");
        assert_eq!(json["timer"]["formatted"], "10:00");

        let json = serde_json::to_value(Response::error("boom".to_string())).unwrap();
        assert_eq!(json["kind"], "error");
        assert_eq!(json["message"], "boom");
    }

    #[test]
    fn text_shows_time_and_affordance() {
        let response = Response::Timer(TimerResponse::new(
            "pause",
            "Countdown paused".to_string(),
            TimerSnapshot::idle(65),
        ));
        assert_eq!(response.to_text(), "[01:05] Countdown paused (play)");
        assert_eq!(Response::error("x".to_string()).to_text(), "error: x");
    }
}
