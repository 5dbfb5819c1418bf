//! Repeating timer that drives the simulation
//!
//! Wraps a tokio [`Interval`] so it can be stopped and restarted. While
//! stopped, [`TickTimer::tick`] never completes, which lets it sit in a
//! `tokio::select!` next to the input stream without a separate flag.

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

pub struct TickTimer {
    period: Duration,
    interval: Option<Interval>,
}

impl TickTimer {
    /// Create a stopped timer
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    /// Start (or restart) the timer. The first tick fires one period from now.
    pub fn start(&mut self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    pub fn stop(&mut self) {
        self.interval = None;
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Wait for the next tick. Cancel-safe.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    // The paused clock only moves to timer deadlines, which are rounded to
    // whole milliseconds.
    fn assert_elapsed(since: Instant, millis: u64) {
        let elapsed = since.elapsed();
        assert!(elapsed >= Duration::from_millis(millis), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(millis + 5), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_timer_never_ticks() {
        let mut timer = TickTimer::new(Duration::from_millis(200));
        assert!(!timer.is_running());

        let waited = timeout(Duration::from_secs(5), timer.tick()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period() {
        let mut timer = TickTimer::new(Duration::from_millis(200));
        timer.start();
        let started = Instant::now();

        timer.tick().await;
        assert_elapsed(started, 200);

        timer.tick().await;
        assert_elapsed(started, 400);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_and_restart() {
        let mut timer = TickTimer::new(Duration::from_millis(200));
        timer.start();
        timer.tick().await;

        timer.stop();
        assert!(!timer.is_running());
        assert!(timeout(Duration::from_secs(1), timer.tick()).await.is_err());

        timer.start();
        let restarted = Instant::now();
        timer.tick().await;
        assert_elapsed(restarted, 200);
    }
}
