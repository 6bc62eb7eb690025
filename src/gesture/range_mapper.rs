//! Slider drag mapping with rubber-banding at the range limits

use std::ops::RangeInclusive;
use tracing::debug;

/// Scale of the logarithmic overshoot damping
pub const DAMPING: f64 = 2.0;

/// Ticks at multiples of this are drawn as major ticks
pub const MAJOR_TICK_EVERY: i32 = 5;

/// Result of one drag-update event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragFrame {
    /// Damped real-valued position, may lie outside the range
    pub projected: f64,
    /// Legal value the countdown previews
    pub value: i32,
    /// Visual offset of the tick strip, in pixels
    pub offset: f64,
}

/// One tick of the slider as laid out relative to the centre line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderTick {
    pub value: i32,
    pub offset: f64,
    pub major: bool,
    pub selected: bool,
}

/// Maps a vertical drag distance to a clamped integer value.
///
/// Non-finite translations count as no movement.
///
/// Values are relative to the value committed at the end of the previous
/// drag. Beyond the range the visual position is damped logarithmically while
/// the value itself is clamped.
#[derive(Debug, Clone)]
pub struct RangeMapper {
    lo: i32,
    hi: i32,
    /// Pixels per unit
    step_width: f64,
    committed: i32,
    provisional: i32,
    offset: f64,
    dragging: bool,
}

impl RangeMapper {
    /// Create a mapper over `range` holding `initial` (clamped into range).
    ///
    /// A non-positive `step_width` is treated as one pixel per unit.
    pub fn new(range: RangeInclusive<i32>, step_width: f64, initial: i32) -> Self {
        let (lo, hi) = (*range.start(), *range.end());
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let step_width = if step_width > 0.0 { step_width } else { 1.0 };
        let initial = initial.clamp(lo, hi);

        Self {
            lo,
            hi,
            step_width,
            committed: initial,
            provisional: initial,
            offset: 0.0,
            dragging: false,
        }
    }

    pub fn range(&self) -> RangeInclusive<i32> {
        self.lo..=self.hi
    }

    pub fn step_width(&self) -> f64 {
        self.step_width
    }

    /// Value committed at the end of the last drag
    pub fn committed(&self) -> i32 {
        self.committed
    }

    /// Live value, equal to `committed` outside a drag
    pub fn provisional(&self) -> i32 {
        self.provisional
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Damped position for a drag of `translation` pixels since drag start
    pub fn project(&self, translation: f64) -> f64 {
        let steps = finite_or_zero(translation) / self.step_width;
        let projected = self.committed as f64 - steps;
        let (lo, hi) = (self.lo as f64, self.hi as f64);

        if projected < lo {
            let overshoot = lo - projected;
            lo - (overshoot + 1.0).ln() * DAMPING
        } else if projected > hi {
            let overshoot = projected - hi;
            hi + (overshoot + 1.0).ln() * DAMPING
        } else {
            projected
        }
    }

    /// Handle a drag-update event
    pub fn drag_changed(&mut self, translation: f64) -> DragFrame {
        let projected = self.project(translation);
        self.dragging = true;
        self.offset = (self.committed as f64 - projected) * self.step_width;
        self.provisional = self.clamp_round(projected);

        DragFrame {
            projected,
            value: self.provisional,
            offset: self.offset,
        }
    }

    /// Handle the end of a drag and commit the final value
    pub fn drag_ended(&mut self, translation: f64) -> i32 {
        let undamped = self.committed as f64 - finite_or_zero(translation) / self.step_width;
        let value = self.clamp_round(undamped);
        debug!("Slider committed {} (was {})", value, self.committed);

        self.committed = value;
        self.provisional = value;
        self.offset = 0.0;
        self.dragging = false;
        value
    }

    /// Jump to `value` outside of a drag, e.g. after a reset
    pub fn set_value(&mut self, value: i32) {
        let value = value.clamp(self.lo, self.hi);
        self.committed = value;
        self.provisional = value;
        self.offset = 0.0;
        self.dragging = false;
    }

    /// Every tick of the range, positioned relative to the centre line
    pub fn visible_ticks(&self) -> impl Iterator<Item = SliderTick> + '_ {
        (self.lo..=self.hi).map(move |value| SliderTick {
            value,
            offset: (value - self.committed) as f64 * self.step_width + self.offset,
            major: value % MAJOR_TICK_EVERY == 0,
            selected: value == self.provisional,
        })
    }

    fn clamp_round(&self, position: f64) -> i32 {
        (position.round() as i32).clamp(self.lo, self.hi)
    }
}

/// Treat NaN and infinite drag distances as no movement
pub(crate) fn finite_or_zero(translation: f64) -> f64 {
    if translation.is_finite() { translation } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider() -> RangeMapper {
        RangeMapper::new(0..=120, 20.0, 10)
    }

    #[test]
    fn in_range_drag_is_linear() {
        let mut mapper = slider();
        let frame = mapper.drag_changed(-400.0);
        assert_eq!(frame.projected, 30.0);
        assert_eq!(frame.value, 30);
        assert_eq!(frame.offset, -400.0);
        assert!(mapper.is_dragging());
    }

    #[test]
    fn overshoot_below_is_damped_but_value_clamps() {
        let mut mapper = slider();
        // 15 steps down from 10 projects to -5
        let frame = mapper.drag_changed(300.0);
        let expected = -(6.0f64.ln() * DAMPING);
        assert!((frame.projected - expected).abs() < 1e-9);
        assert!((frame.projected + 3.58).abs() < 0.01);
        assert_eq!(frame.value, 0);
        assert!((frame.offset - (10.0 - expected) * 20.0).abs() < 1e-9);
    }

    #[test]
    fn overshoot_above_is_damped() {
        let mut mapper = RangeMapper::new(0..=120, 20.0, 118);
        let frame = mapper.drag_changed(-20.0 * 12.0);
        assert!(frame.projected > 120.0);
        assert!(frame.projected < 120.0 + 3.0 * DAMPING);
        assert_eq!(frame.value, 120);
    }

    #[test]
    fn damping_grows_slower_than_the_drag() {
        let mapper = slider();
        let near = mapper.project(20.0 * 20.0);
        let far = mapper.project(20.0 * 1000.0);
        assert!(far < near);
        assert!(far > -20.0);
    }

    #[test]
    fn exact_boundary_is_not_damped() {
        let mapper = slider();
        assert_eq!(mapper.project(200.0), 0.0);
        let top = RangeMapper::new(0..=120, 20.0, 100);
        assert_eq!(top.project(-400.0), 120.0);
    }

    #[test]
    fn provisional_value_never_leaves_range() {
        let mut mapper = slider();
        for translation in (-5000..=5000).step_by(37) {
            let frame = mapper.drag_changed(translation as f64);
            assert!((0..=120).contains(&frame.value));
        }
    }

    #[test]
    fn release_commits_and_recenters() {
        let mut mapper = slider();
        mapper.drag_changed(-190.0);
        let value = mapper.drag_ended(-190.0);
        assert_eq!(value, 20);
        assert_eq!(mapper.committed(), 20);
        assert_eq!(mapper.offset(), 0.0);
        assert!(!mapper.is_dragging());

        // the next drag is relative to the new commit
        assert_eq!(mapper.drag_changed(-20.0).value, 21);
    }

    #[test]
    fn zero_drag_after_commit_reproduces_value() {
        let mut mapper = slider();
        mapper.drag_changed(-130.0);
        let committed = mapper.drag_ended(-130.0);
        assert_eq!(mapper.drag_changed(0.0).value, committed);
    }

    #[test]
    fn release_past_the_limit_clamps() {
        let mut mapper = slider();
        assert_eq!(mapper.drag_ended(10_000.0), 0);
        assert_eq!(mapper.drag_ended(-100_000.0), 120);
    }

    #[test]
    fn half_steps_round_away_from_zero() {
        let mut mapper = slider();
        assert_eq!(mapper.drag_changed(-10.0).value, 11);
        assert_eq!(mapper.drag_changed(10.0).value, 10);
    }

    #[test]
    fn ticks_follow_the_drag() {
        let mut mapper = RangeMapper::new(0..=10, 20.0, 5);
        mapper.drag_changed(-40.0);
        let ticks: Vec<_> = mapper.visible_ticks().collect();
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[5].offset, -40.0);
        assert!(ticks[5].major);
        assert!(ticks[7].selected);
        assert!(!ticks[6].major);
    }

    #[test]
    fn non_finite_drag_is_no_movement() {
        let mut mapper = slider();
        for translation in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let frame = mapper.drag_changed(translation);
            assert_eq!(frame.value, 10);
            assert_eq!(frame.offset, 0.0);
            assert!(mapper.visible_ticks().all(|tick| tick.offset.is_finite()));
            assert_eq!(mapper.drag_ended(translation), 10);
        }
    }

    #[test]
    fn set_value_clamps() {
        let mut mapper = slider();
        mapper.set_value(500);
        assert_eq!(mapper.committed(), 120);
        assert_eq!(mapper.provisional(), 120);
    }
}
