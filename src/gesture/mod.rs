//! Gesture mapping module
//!
//! Turns drag, tap and long-press input into countdown values and commands.

pub mod press;
pub mod range_mapper;
pub mod ruler;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use press::{PressClassifier, PressKind};
pub use range_mapper::{DragFrame, RangeMapper};
pub use ruler::RulerMapper;

/// Which drag surface sets the countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    /// Tick strip dragged vertically, whole minutes, rubber-banded
    #[default]
    Slider,
    /// Vertical ruler, continuous minutes, hard stops
    Ruler,
}

/// The active drag surface
#[derive(Debug, Clone)]
pub enum DragControl {
    Slider(RangeMapper),
    Ruler(RulerMapper),
}

impl DragControl {
    pub fn kind(&self) -> ControlKind {
        match self {
            DragControl::Slider(_) => ControlKind::Slider,
            DragControl::Ruler(_) => ControlKind::Ruler,
        }
    }

    /// Handle a drag update; returns the remaining seconds to preview
    pub fn changed(&mut self, translation: f64) -> i64 {
        match self {
            DragControl::Slider(slider) => slider.drag_changed(translation).value as i64 * 60,
            DragControl::Ruler(ruler) => {
                ruler.drag_changed(translation);
                ruler.preview_seconds()
            }
        }
    }

    /// Handle the end of a drag; returns the committed remaining seconds
    pub fn ended(&mut self, translation: f64) -> i64 {
        match self {
            DragControl::Slider(slider) => slider.drag_ended(translation) as i64 * 60,
            DragControl::Ruler(ruler) => {
                ruler.drag_ended(translation);
                ruler.preview_seconds()
            }
        }
    }

    pub fn set_minutes(&mut self, minutes: u64) {
        match self {
            DragControl::Slider(slider) => {
                slider.set_value(i32::try_from(minutes).unwrap_or(i32::MAX))
            }
            DragControl::Ruler(ruler) => ruler.set_value(minutes as f64),
        }
    }

    /// Keep the surface in step with a ticking countdown
    pub fn follow(&mut self, remaining_seconds: u64) {
        // The slider stays on the committed value while counting down
        if let DragControl::Ruler(ruler) = self {
            ruler.follow(remaining_seconds);
        }
    }

    pub fn is_dragging(&self) -> bool {
        match self {
            DragControl::Slider(slider) => slider.is_dragging(),
            DragControl::Ruler(ruler) => ruler.is_dragging(),
        }
    }

    /// Upper end of the surface's range in minutes
    pub fn max_minutes(&self) -> u64 {
        match self {
            DragControl::Slider(slider) => u64::try_from(*slider.range().end()).unwrap_or(0),
            DragControl::Ruler(_) => ruler::RULER_MAX_MINUTES as u64,
        }
    }

    /// Current position in minutes
    pub fn minutes(&self) -> f64 {
        match self {
            DragControl::Slider(slider) => slider.provisional() as f64,
            DragControl::Ruler(ruler) => ruler.value(),
        }
    }
}
