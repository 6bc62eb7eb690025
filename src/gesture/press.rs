//! Tap and long-press classification

use std::time::Duration;

/// Minimum hold time for a long-press
pub const LONG_PRESS_MIN_DURATION: Duration = Duration::from_secs(1);
/// Maximum finger movement, in pixels, for a press to count
pub const LONG_PRESS_MAX_DISTANCE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    /// Toggles the countdown
    Tap,
    /// Resets the countdown to its default duration
    LongPress,
    /// Moved too far to be a press
    Cancelled,
}

#[derive(Debug, Clone, Copy)]
pub struct PressClassifier {
    pub min_duration: Duration,
    pub max_distance: f64,
}

impl PressClassifier {
    pub fn classify(&self, held: Duration, movement: f64) -> PressKind {
        if movement.abs() > self.max_distance {
            PressKind::Cancelled
        } else if held >= self.min_duration {
            PressKind::LongPress
        } else {
            PressKind::Tap
        }
    }
}

impl Default for PressClassifier {
    fn default() -> Self {
        Self {
            min_duration: LONG_PRESS_MIN_DURATION,
            max_distance: LONG_PRESS_MAX_DISTANCE,
        }
    }
}
