//! Periodic wall-clock ticker used for the time display and day/night choice.

use chrono::{DateTime, Local};
use std::time::Duration;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};
use tracing::debug;

/// Ticking local timestamp.
///
/// The ticker runs on its own task and never waits on anything else, so an
/// in-flight fetch cannot stall it. Dropping the clock stops the task.
#[derive(Debug)]
pub struct Clock {
    rx: watch::Receiver<DateTime<Local>>,
    task: Option<JoinHandle<()>>,
}

impl Clock {
    /// Start ticking every `period`. Must be called inside a tokio runtime.
    pub fn start(period: Duration) -> Self {
        let (tx, rx) = watch::channel(Local::now());

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; the initial value is already set.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if tx.send(Local::now()).is_err() {
                    break;
                }
            }
        });

        debug!(?period, "Clock started");
        Self { rx, task: Some(task) }
    }

    /// Latest published time.
    pub fn now(&self) -> DateTime<Local> {
        *self.rx.borrow()
    }

    /// Independent receiver for another consumer.
    pub fn subscribe(&self) -> watch::Receiver<DateTime<Local>> {
        self.rx.clone()
    }

    /// Wait for the next tick. Returns `None` once the clock is stopped.
    pub async fn changed(&mut self) -> Option<DateTime<Local>> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Clock stopped");
        }
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn publishes_on_every_period() {
        let mut clock = Clock::start(Duration::from_secs(1));
        let mut rx = clock.subscribe();
        rx.borrow_and_update();

        for _ in 0..3 {
            tokio::time::advance(Duration::from_secs(1)).await;
            assert!(clock.changed().await.is_some());
        }
        assert!(rx.has_changed().unwrap());
        assert!(clock.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_ends_ticks() {
        let mut clock = Clock::start(Duration::from_secs(1));
        clock.stop();
        tokio::task::yield_now().await;

        assert!(!clock.is_running());
        assert!(clock.changed().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_clock_closes_subscribers() {
        let clock = Clock::start(Duration::from_secs(1));
        let mut rx = clock.subscribe();
        drop(clock);

        assert!(rx.changed().await.is_err());
    }
}
