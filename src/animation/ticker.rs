//! Cancellable tick schedules backed by tokio tasks.

use super::tween::Tween;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Owns at most one running tick schedule.
///
/// Starting a new schedule aborts the previous one first, and dropping the ticker
/// aborts whatever is still running, so a ticker never has two schedules alive.
#[derive(Debug, Default)]
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Runs `on_tick(step)` for steps `1..=tween.steps()`, one per interval.
    ///
    /// The schedule stops early when `on_tick` returns `false` (the receiving end
    /// is gone). Must be called from within a tokio runtime.
    pub fn start<F>(&mut self, tween: Tween, mut on_tick: F)
    where
        F: FnMut(u32) -> bool + Send + 'static,
    {
        self.cancel();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tween.interval());
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick of a tokio interval completes immediately
            interval.tick().await;

            for step in 1..=tween.steps() {
                interval.tick().await;
                if !on_tick(step) {
                    tracing::trace!(step, "tick receiver dropped, stopping schedule");
                    break;
                }
            }
        });

        self.handle = Some(handle);
    }

    /// Aborts the running schedule, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether a schedule is still producing ticks.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_ticker_emits_every_step_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = Ticker::new();
        ticker.start(Tween::new(5, Duration::from_millis(20)), move |step| tx.send(step).is_ok());

        let mut steps = vec![];
        while let Some(step) = rx.recv().await {
            steps.push(step);
        }

        assert_eq!(steps, vec![1, 2, 3, 4, 5]);
        assert!(!ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_aborts_previous_schedule() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = Ticker::new();

        let first = tx.clone();
        ticker.start(Tween::new(100, Duration::from_millis(20)), move |step| first.send(("first", step)).is_ok());
        tokio::time::sleep(Duration::from_millis(50)).await;

        let second = tx;
        ticker.start(Tween::new(3, Duration::from_millis(20)), move |step| second.send(("second", step)).is_ok());

        let mut seen = vec![];
        while let Some(item) = rx.recv().await {
            seen.push(item);
        }

        let firsts = seen.iter().filter(|(name, _)| *name == "first").count();
        assert!(firsts < 100);
        let seconds: Vec<u32> = seen.iter().filter(|(name, _)| *name == "second").map(|(_, s)| *s).collect();
        assert_eq!(seconds, vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = Ticker::new();
        ticker.start(Tween::new(50, Duration::from_millis(20)), move |step| tx.send(step).is_ok());
        ticker.cancel();

        assert!(!ticker.is_running());
        assert_eq!(rx.recv().await, None);
    }
}
