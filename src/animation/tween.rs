//! Discrete tick schedules.

use std::time::Duration;

/// Smallest tick interval a schedule accepts.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// A fixed number of steps spaced by a fixed interval.
///
/// Step `0` is the starting frame (progress 0). Step `steps` is the final frame
/// (progress exactly 1). Steps past the end clamp to the final frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tween {
    steps: u32,
    interval: Duration,
}

impl Tween {
    /// Creates a schedule. `steps` is raised to at least 1 and `interval` to at
    /// least one millisecond.
    #[must_use]
    pub fn new(steps: u32, interval: Duration) -> Self {
        Self {
            steps: steps.max(1),
            interval: interval.max(MIN_INTERVAL),
        }
    }

    /// Schedule covering `duration` with ticks every `interval`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use threatscope::animation::Tween;
    ///
    /// let tween = Tween::over(Duration::from_millis(2000), Duration::from_millis(40));
    /// assert_eq!(tween.steps(), 50);
    /// ```
    #[must_use]
    pub fn over(duration: Duration, interval: Duration) -> Self {
        let interval = interval.max(MIN_INTERVAL);
        let steps = duration.as_nanos().div_ceil(interval.as_nanos());
        Self::new(u32::try_from(steps).unwrap_or(u32::MAX), interval)
    }

    #[must_use]
    pub const fn steps(&self) -> u32 {
        self.steps
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Total wall time from the first to the final tick.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.interval.saturating_mul(self.steps)
    }

    #[must_use]
    pub const fn is_final(&self, step: u32) -> bool {
        step >= self.steps
    }

    /// Fraction of the schedule completed at `step`, in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self, step: u32) -> f64 {
        if self.is_final(step) {
            1.0
        } else {
            f64::from(step) / f64::from(self.steps)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_runs_from_zero_to_exactly_one() {
        let tween = Tween::new(50, Duration::from_millis(20));
        assert!(tween.progress(0).abs() < f64::EPSILON);
        assert!((tween.progress(25) - 0.5).abs() < f64::EPSILON);
        assert!((tween.progress(50) - 1.0).abs() < f64::EPSILON);
        assert!((tween.progress(80) - 1.0).abs() < f64::EPSILON);
        assert_eq!(tween.duration(), Duration::from_millis(1000));
    }

    #[test]
    fn test_degenerate_schedules_are_clamped() {
        let tween = Tween::new(0, Duration::ZERO);
        assert_eq!(tween.steps(), 1);
        assert_eq!(tween.interval(), MIN_INTERVAL);
        assert!(tween.is_final(1));
    }

    #[test]
    fn test_over_rounds_step_count_up() {
        let tween = Tween::over(Duration::from_millis(1001), Duration::from_millis(20));
        assert_eq!(tween.steps(), 51);
    }
}
