//! Stat-card counters that count up to the latest snapshot.

use super::tween::Tween;
use crate::domain::StatsSnapshot;

/// Displayed values of the three stat cards (total, threats, safe).
///
/// Uses the same generation scheme as the confidence gauge: a restart
/// invalidates every tick scheduled for an earlier target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CounterBoard {
    target: StatsSnapshot,
    displayed: StatsSnapshot,
    steps: u32,
    generation: u64,
}

impl CounterBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restarts the count-up from zero toward `target`.
    ///
    /// # Returns
    ///
    /// The generation that tick events for this count-up must carry.
    pub fn restart(&mut self, target: StatsSnapshot, tween: &Tween) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.target = target;
        self.steps = tween.steps();
        self.displayed = StatsSnapshot::default();
        self.generation
    }

    /// Applies tick `step`; each card shows `floor(target · progress)` and lands
    /// exactly on its target at the final step.
    pub fn apply_step(&mut self, generation: u64, step: u32) -> bool {
        if generation != self.generation {
            return false;
        }

        if step >= self.steps {
            self.displayed = self.target;
            return true;
        }

        let scale = |value: u64| -> u64 {
            let scaled = u128::from(value) * u128::from(step) / u128::from(self.steps);
            u64::try_from(scaled).unwrap_or(value)
        };

        self.displayed = StatsSnapshot {
            total_count: scale(self.target.total_count),
            threat_count: scale(self.target.threat_count),
            safe_count: scale(self.target.safe_count),
        };
        true
    }

    /// Jumps to the target and invalidates every scheduled tick.
    pub fn settle(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.displayed = self.target;
    }

    #[must_use]
    pub const fn displayed(&self) -> StatsSnapshot {
        self.displayed
    }

    #[must_use]
    pub const fn target(&self) -> StatsSnapshot {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_counters_floor_then_land_on_target() {
        let tween = Tween::new(4, Duration::from_millis(40));
        let mut board = CounterBoard::new();
        let target = StatsSnapshot::new(1247, 89, 1158).unwrap();
        let generation = board.restart(target, &tween);

        assert!(board.apply_step(generation, 1));
        assert_eq!(board.displayed().total_count, 311);
        assert_eq!(board.displayed().threat_count, 22);

        assert!(board.apply_step(generation, 4));
        assert_eq!(board.displayed(), target);
    }

    #[test]
    fn test_stale_counter_ticks_are_ignored() {
        let tween = Tween::new(10, Duration::from_millis(40));
        let mut board = CounterBoard::new();
        let old = board.restart(StatsSnapshot::new(10, 5, 5).unwrap(), &tween);
        let fresh = board.restart(StatsSnapshot::new(20, 5, 5).unwrap(), &tween);

        assert!(!board.apply_step(old, 10));
        assert_eq!(board.displayed(), StatsSnapshot::default());
        assert!(board.apply_step(fresh, 10));
        assert_eq!(board.displayed().total_count, 20);
    }

    #[test]
    fn test_settle_lands_on_target_and_drops_pending_ticks() {
        let tween = Tween::new(10, Duration::from_millis(40));
        let mut board = CounterBoard::new();
        let target = StatsSnapshot::new(40, 10, 30).unwrap();
        let generation = board.restart(target, &tween);
        board.apply_step(generation, 2);

        board.settle();
        assert_eq!(board.displayed(), target);
        assert!(!board.apply_step(generation, 3));
        assert_eq!(board.displayed(), target);
    }
}
