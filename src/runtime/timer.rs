//! Debounce and periodic timers that post events into the loop.

use crate::app::Event;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Trailing-edge debounce: each restart replaces the pending fire.
#[derive(Debug)]
pub struct DebounceTimer {
    delay: Duration,
    handle: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay, handle: None }
    }

    /// Posts `event` once `delay` passes without another restart.
    pub fn restart(&mut self, tx: UnboundedSender<Event>, event: Event) {
        self.cancel();

        let delay = self.delay;
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(event).is_err() {
                tracing::trace!("event loop gone, dropping debounced event");
            }
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Repeating timer posting a fresh event every `period`.
///
/// The first event is posted immediately. Stops once the loop is gone.
#[derive(Debug)]
pub struct PeriodicTimer {
    handle: JoinHandle<()>,
}

impl PeriodicTimer {
    pub fn start<F>(period: Duration, tx: UnboundedSender<Event>, mut make_event: F) -> Self
    where
        F: FnMut() -> Event + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                if tx.send(make_event()).is_err() {
                    break;
                }
            }
        });

        Self { handle }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for PeriodicTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_debounce_fires_once_after_last_restart() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = DebounceTimer::new(Duration::from_millis(300));

        timer.restart(tx.clone(), Event::DebounceElapsed);
        tokio::time::sleep(Duration::from_millis(200)).await;
        timer.restart(tx.clone(), Event::DebounceElapsed);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(rx.try_recv().is_err());
        assert!(timer.is_pending());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(rx.try_recv().unwrap(), Event::DebounceElapsed);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_debounce_never_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = DebounceTimer::new(Duration::from_millis(300));

        timer.restart(tx, Event::DebounceElapsed);
        timer.cancel();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_timer_fires_immediately_then_every_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = PeriodicTimer::start(Duration::from_secs(30), tx, || Event::FeedRefreshTick);

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(rx.try_recv().unwrap(), Event::FeedRefreshTick);

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(rx.try_recv().unwrap(), Event::FeedRefreshTick);
        assert_eq!(rx.try_recv().unwrap(), Event::FeedRefreshTick);
        assert!(rx.try_recv().is_err());

        timer.cancel();
    }
}
