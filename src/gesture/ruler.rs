//! Vertical ruler drag mapping

use tracing::debug;

use super::range_mapper::finite_or_zero;

/// Upper end of the ruler, in minutes
pub const RULER_MAX_MINUTES: f64 = 60.0;
/// Labelled ticks every this many minutes
pub const RULER_MAJOR_INTERVAL: u32 = 5;

const TOP_PADDING: f64 = 5.0;
const BOTTOM_PADDING: f64 = 5.0;
/// Share of the viewport the ruler occupies
const RULER_HEIGHT_RATIO: f64 = 0.8;
const MIN_POINTS_PER_MINUTE: f64 = 8.0;
const MAX_POINTS_PER_MINUTE: f64 = 20.0;

/// Ruler spacing for a viewport of `viewport_height` points
pub fn points_per_minute(viewport_height: f64) -> f64 {
    let available = viewport_height * RULER_HEIGHT_RATIO - TOP_PADDING - BOTTOM_PADDING;
    let ideal = available / (RULER_MAX_MINUTES * RULER_HEIGHT_RATIO);
    ideal.clamp(MIN_POINTS_PER_MINUTE, MAX_POINTS_PER_MINUTE)
}

/// Maps a drag on the vertical ruler to a continuous minute value.
///
/// Unlike the slider there is no rubber-banding: the value stops hard at
/// `[0, 60]`, and it is not rounded to whole minutes.
#[derive(Debug, Clone)]
pub struct RulerMapper {
    viewport_height: f64,
    points_per_minute: f64,
    committed: f64,
    value: f64,
    dragging: bool,
}

impl RulerMapper {
    pub fn new(viewport_height: f64, initial_minutes: f64) -> Self {
        let initial = initial_minutes.clamp(0.0, RULER_MAX_MINUTES);
        Self {
            viewport_height,
            points_per_minute: points_per_minute(viewport_height),
            committed: initial,
            value: initial,
            dragging: false,
        }
    }

    pub fn points_per_minute(&self) -> f64 {
        self.points_per_minute
    }

    /// Current value in minutes
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn committed(&self) -> f64 {
        self.committed
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Handle a drag-update event; dragging down lowers the value.
    ///
    /// Non-finite translations count as no movement.
    pub fn drag_changed(&mut self, translation: f64) -> f64 {
        self.dragging = true;
        let translation = finite_or_zero(translation);
        self.value = (self.committed - translation / self.points_per_minute)
            .clamp(0.0, RULER_MAX_MINUTES);
        self.value
    }

    /// Handle the end of a drag, committing the value reached
    pub fn drag_ended(&mut self, translation: f64) -> f64 {
        let value = self.drag_changed(translation);
        debug!("Ruler committed {:.2} minutes", value);
        self.committed = value;
        self.dragging = false;
        value
    }

    /// Remaining seconds the current value stands for
    pub fn preview_seconds(&self) -> i64 {
        (self.value * 60.0).round() as i64
    }

    /// Jump to `minutes` outside of a drag
    pub fn set_value(&mut self, minutes: f64) {
        let minutes = minutes.clamp(0.0, RULER_MAX_MINUTES);
        self.committed = minutes;
        self.value = minutes;
        self.dragging = false;
    }

    /// Track a running countdown; ignored while the user is dragging
    pub fn follow(&mut self, remaining_seconds: u64) {
        if !self.dragging {
            self.set_value(remaining_seconds as f64 / 60.0);
        }
    }

    /// Vertical offset placing the current value under the centre arrow
    pub fn scroll_offset(&self) -> f64 {
        let arrow = self.viewport_height / 2.0;
        arrow - (self.value * self.points_per_minute + TOP_PADDING)
    }

    /// Labelled ticks as `(minutes, y)` in ruler coordinates
    pub fn major_ticks(&self) -> Vec<(u32, f64)> {
        (0..=RULER_MAX_MINUTES as u32)
            .step_by(RULER_MAJOR_INTERVAL as usize)
            .map(|minute| (minute, minute as f64 * self.points_per_minute + TOP_PADDING))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_is_clamped() {
        assert_eq!(points_per_minute(100.0), MIN_POINTS_PER_MINUTE);
        assert_eq!(points_per_minute(5000.0), MAX_POINTS_PER_MINUTE);
        // (800 * 0.8 - 10) / 48
        assert!((points_per_minute(800.0) - 13.125).abs() < 1e-9);
    }

    #[test]
    fn drag_maps_linearly_and_clamps() {
        let mut ruler = RulerMapper::new(5000.0, 10.0);
        assert_eq!(ruler.drag_changed(-100.0), 15.0);
        assert_eq!(ruler.preview_seconds(), 900);
        assert_eq!(ruler.drag_changed(10_000.0), 0.0);
        assert_eq!(ruler.drag_changed(-10_000.0), RULER_MAX_MINUTES);
    }

    #[test]
    fn release_commits() {
        let mut ruler = RulerMapper::new(5000.0, 10.0);
        ruler.drag_changed(-30.0);
        assert_eq!(ruler.drag_ended(-30.0), 11.5);
        assert_eq!(ruler.committed(), 11.5);
        assert_eq!(ruler.preview_seconds(), 690);
        assert_eq!(ruler.drag_changed(0.0), 11.5);
    }

    #[test]
    fn non_finite_release_keeps_the_value() {
        let mut ruler = RulerMapper::new(5000.0, 10.0);
        assert_eq!(ruler.drag_ended(f64::NAN), 10.0);
        assert_eq!(ruler.drag_changed(f64::INFINITY), 10.0);
        assert_eq!(ruler.drag_ended(-100.0), 15.0);
        assert_eq!(ruler.preview_seconds(), 900);
    }

    #[test]
    fn follows_countdown_unless_dragging() {
        let mut ruler = RulerMapper::new(800.0, 10.0);
        ruler.follow(300);
        assert_eq!(ruler.value(), 5.0);

        ruler.drag_changed(0.0);
        ruler.follow(60);
        assert_eq!(ruler.value(), 5.0);
    }

    #[test]
    fn offset_aligns_value_with_arrow() {
        let ruler = RulerMapper::new(5000.0, 10.0);
        assert_eq!(ruler.scroll_offset(), 2500.0 - (200.0 + 5.0));
        let ticks = ruler.major_ticks();
        assert_eq!(ticks.len(), 13);
        assert_eq!(ticks[2], (10, 205.0));
    }
}
