//! Wall-clock formatting

use chrono::NaiveDateTime;

use crate::state::Settings;

/// `HH:mm[:ss]` in 24-hour format, `hh:mm[:ss]` otherwise
pub fn time_string(time: &NaiveDateTime, format_24h: bool, show_seconds: bool) -> String {
    let pattern = match (format_24h, show_seconds) {
        (true, true) => "%H:%M:%S",
        (true, false) => "%H:%M",
        (false, true) => "%I:%M:%S",
        (false, false) => "%I:%M",
    };
    time.format(pattern).to_string()
}

/// `AM` or `PM`
pub fn am_pm_string(time: &NaiveDateTime) -> String {
    time.format("%p").to_string()
}

/// Day, abbreviated month, year and weekday, e.g. `5 Jun, 2025 Thu`
pub fn date_string(time: &NaiveDateTime) -> String {
    time.format("%-d %b, %Y %a").to_string()
}

/// Clock lines as the screen shows them: AM/PM marker (12-hour only), time,
/// then the date when enabled
pub fn clock_lines(time: &NaiveDateTime, settings: &Settings) -> Vec<String> {
    let mut lines = Vec::with_capacity(3);
    if !settings.time_format_24h {
        lines.push(am_pm_string(time));
    }
    lines.push(time_string(time, settings.time_format_24h, settings.show_seconds));
    if settings.show_date {
        lines.push(date_string(time));
    }
    lines
}
