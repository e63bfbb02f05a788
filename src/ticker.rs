//! The live uptime ticker.
//!
//! A background task that sends [`Update::Tick`] once per second. The
//! presenter owns exactly one [`UptimeTicker`]; starting it while it runs is a
//! no-op, and dropping it cancels the task.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::source::Update;

/// Period between uptime ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Owned handle to the repeating uptime timer (Idle or Running).
#[derive(Debug, Default)]
pub struct UptimeTicker {
    task: Option<JoinHandle<()>>,
}

impl UptimeTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a timer task is active.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Start ticking on `runtime`, sending [`Update::Tick`] on `tx` every
    /// [`TICK_PERIOD`].
    ///
    /// Returns `false` without doing anything if a timer is already running.
    pub fn start(&mut self, runtime: &Handle, tx: mpsc::UnboundedSender<Update>) -> bool {
        if self.is_running() {
            return false;
        }

        // First tick is one period after arming, not after the task is first polled
        let first_tick = Instant::now() + TICK_PERIOD;
        self.task = Some(runtime.spawn(async move {
            let mut interval = interval_at(first_tick, TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Update::Tick).is_err() {
                    break;
                }
            }
        }));
        tracing::debug!("uptime ticker started");
        true
    }

    /// Cancel the timer. Safe to call when idle.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("uptime ticker stopped");
        }
    }
}

impl Drop for UptimeTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(rx: &mut mpsc::UnboundedReceiver<Update>) -> usize {
        let mut ticks = 0;
        while let Ok(update) = rx.try_recv() {
            assert_eq!(update, Update::Tick);
            ticks += 1;
        }
        ticks
    }

    async fn advance_secs(secs: u64) {
        for _ in 0..secs {
            tokio::time::advance(TICK_PERIOD).await;
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_second() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = UptimeTicker::new();
        assert!(!ticker.is_running());

        assert!(ticker.start(&Handle::current(), tx));
        assert!(ticker.is_running());

        tokio::task::yield_now().await;
        assert_eq!(drain(&mut rx), 0);

        advance_secs(3).await;
        assert_eq!(drain(&mut rx), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_is_ignored() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = UptimeTicker::new();

        assert!(ticker.start(&Handle::current(), tx.clone()));
        assert!(!ticker.start(&Handle::current(), tx.clone()));
        assert!(!ticker.start(&Handle::current(), tx));

        advance_secs(4).await;
        assert_eq!(drain(&mut rx), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = UptimeTicker::new();
        ticker.start(&Handle::current(), tx);

        advance_secs(2).await;
        ticker.stop();
        assert!(!ticker.is_running());
        let before = drain(&mut rx);

        advance_secs(5).await;
        assert_eq!(drain(&mut rx), 0);
        assert_eq!(before, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut ticker = UptimeTicker::new();
            ticker.start(&Handle::current(), tx);
        }
        advance_secs(3).await;
        assert_eq!(drain(&mut rx), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_stop() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = UptimeTicker::new();
        ticker.start(&Handle::current(), tx.clone());
        ticker.stop();
        assert!(ticker.start(&Handle::current(), tx));

        advance_secs(2).await;
        assert_eq!(drain(&mut rx), 2);
    }
}
