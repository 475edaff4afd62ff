//! Confidence gauge interpolation and radial geometry.
//!
//! The gauge displays an integer percentage that climbs from 0 to a target on a
//! fixed [`Tween`] schedule, together with the stroke offset of a radial arc of
//! radius 54. The offset is recomputed from the displayed value on every frame,
//! so the two can never drift apart.
//!
//! # Generations
//!
//! Every restart bumps a generation counter. Tick events are stamped with the
//! generation that scheduled them and [`ConfidenceGauge::apply_step`] drops any
//! tick from an older generation. A restarted or reset gauge is therefore never
//! written by a superseded schedule, even if some of its ticks were already
//! queued when it was cancelled.

use super::tween::Tween;
use std::f64::consts::PI;

/// Radius of the radial gauge arc.
pub const GAUGE_RADIUS: f64 = 54.0;

/// Circumference of the radial gauge arc, `2π·54`.
pub const GAUGE_CIRCUMFERENCE: f64 = 2.0 * PI * GAUGE_RADIUS;

/// Highest displayable confidence.
pub const MAX_CONFIDENCE: u8 = 100;

/// Displayed confidence value plus arc geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceGauge {
    target: u8,
    current: u8,
    offset: f64,
    steps: u32,
    generation: u64,
}

impl Default for ConfidenceGauge {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfidenceGauge {
    /// An idle gauge showing 0 with a fully retracted arc.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            target: 0,
            current: 0,
            offset: GAUGE_CIRCUMFERENCE,
            steps: 1,
            generation: 0,
        }
    }

    /// Stroke offset for a displayed value: `C - (value / 100) * C`.
    #[must_use]
    pub fn offset_for(value: u8) -> f64 {
        GAUGE_CIRCUMFERENCE - (f64::from(value) / 100.0) * GAUGE_CIRCUMFERENCE
    }

    /// Starts a new animation toward `target` over `tween`, superseding any
    /// running one. Targets above 100 are clamped.
    ///
    /// # Returns
    ///
    /// The generation number that tick events for this animation must carry.
    pub fn restart(&mut self, target: u8, tween: &Tween) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.target = target.min(MAX_CONFIDENCE);
        self.steps = tween.steps();
        self.set_current(0);

        tracing::debug!(
            generation = self.generation,
            target = self.target,
            steps = self.steps,
            "confidence animation restarted"
        );

        self.generation
    }

    /// Clears the gauge and invalidates any scheduled ticks.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.target = 0;
        self.steps = 1;
        self.set_current(0);
    }

    /// Applies tick `step` of animation `generation`.
    ///
    /// The displayed value is `round(target · step / steps)`, never decreases
    /// within a generation, and is exactly `target` from the final step on.
    ///
    /// # Returns
    ///
    /// `true` if the tick belonged to the current animation and was applied.
    pub fn apply_step(&mut self, generation: u64, step: u32) -> bool {
        if generation != self.generation {
            tracing::trace!(
                stale_generation = generation,
                current_generation = self.generation,
                "dropping stale confidence tick"
            );
            return false;
        }

        let value = if step >= self.steps {
            self.target
        } else {
            let fraction = f64::from(step) / f64::from(self.steps);
            let interpolated = (f64::from(self.target) * fraction).round();
            // interpolated lies in 0..=target, so the cast cannot truncate
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let value = interpolated as u8;
            value.min(self.target)
        };

        self.set_current(value.max(self.current));
        true
    }

    fn set_current(&mut self, value: u8) {
        self.current = value;
        self.offset = Self::offset_for(value);
    }

    #[must_use]
    pub const fn target(&self) -> u8 {
        self.target
    }

    /// Currently displayed percentage.
    #[must_use]
    pub const fn current(&self) -> u8 {
        self.current
    }

    /// Current stroke offset of the arc.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the displayed value has reached the target.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn tween() -> Tween {
        Tween::new(50, Duration::from_millis(20))
    }

    #[test]
    fn test_animation_ends_exactly_at_target() {
        let mut gauge = ConfidenceGauge::new();
        let generation = gauge.restart(85, &tween());

        for step in 1..=50 {
            assert!(gauge.apply_step(generation, step));
        }

        assert_eq!(gauge.current(), 85);
        assert!(gauge.is_settled());
        let expected = GAUGE_CIRCUMFERENCE - 0.85 * GAUGE_CIRCUMFERENCE;
        assert!((gauge.offset() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_values_are_monotonic_and_offset_tracks_value() {
        let mut gauge = ConfidenceGauge::new();
        let generation = gauge.restart(92, &tween());
        let mut previous = 0;

        for step in 0..=50 {
            gauge.apply_step(generation, step);
            assert!(gauge.current() >= previous);
            assert!(gauge.current() <= 92);
            assert!((gauge.offset() - ConfidenceGauge::offset_for(gauge.current())).abs() < f64::EPSILON);
            previous = gauge.current();
        }

        assert_eq!(previous, 92);
    }

    #[test]
    fn test_restart_supersedes_previous_generation() {
        let mut gauge = ConfidenceGauge::new();
        let first = gauge.restart(85, &tween());
        for step in 1..=20 {
            gauge.apply_step(first, step);
        }
        assert!(gauge.current() > 0);

        let second = gauge.restart(92, &tween());
        assert_eq!(gauge.current(), 0);
        assert!(!gauge.apply_step(first, 21));
        assert_eq!(gauge.current(), 0);

        assert!(gauge.apply_step(second, 50));
        assert_eq!(gauge.current(), 92);
    }

    #[test]
    fn test_reset_invalidates_pending_ticks() {
        let mut gauge = ConfidenceGauge::new();
        let generation = gauge.restart(85, &tween());
        gauge.reset();

        assert!(!gauge.apply_step(generation, 50));
        assert_eq!(gauge.current(), 0);
        assert!((gauge.offset() - GAUGE_CIRCUMFERENCE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_targets_above_one_hundred_are_clamped() {
        let mut gauge = ConfidenceGauge::new();
        let generation = gauge.restart(250, &tween());
        gauge.apply_step(generation, 50);
        assert_eq!(gauge.current(), 100);
        assert!(gauge.offset().abs() < 1e-9);
    }

    #[test]
    fn test_circumference_matches_radius() {
        assert!((GAUGE_CIRCUMFERENCE - 339.292_006_587_697_6).abs() < 1e-9);
    }
}
