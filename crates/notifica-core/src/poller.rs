//! Recurring background refresh.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Owns at most one timer task. Each tick spawns the job as its own task, so
/// a slow job never delays the next tick and overlapping runs are allowed.
///
/// Must be armed from within a tokio runtime.
#[derive(Debug, Default)]
pub struct PollScheduler {
    timer: Option<JoinHandle<()>>,
    period: Option<Duration>,
}

impl PollScheduler {
    pub const fn new() -> Self {
        Self {
            timer: None,
            period: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }

    /// Period of the armed timer.
    pub fn period(&self) -> Option<Duration> {
        self.period.filter(|_| self.is_armed())
    }

    /// Start ticking every `period`, replacing any armed timer.
    ///
    /// The first run happens one full period after arming. A missing or zero
    /// period disarms instead. Returns whether a timer is now armed.
    pub fn arm<F, Fut>(&mut self, period: Option<Duration>, job: F) -> bool
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.disarm();
        let Some(period) = period.filter(|period| !period.is_zero()) else {
            return false;
        };

        let timer = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tracing::trace!(?period, "Poll tick");
                tokio::spawn(job());
            }
        });
        tracing::info!(?period, "Polling armed");
        self.timer = Some(timer);
        self.period = Some(period);
        true
    }

    /// Like `arm`, but keeps the running timer when the period is unchanged.
    pub fn rearm<F, Fut>(&mut self, period: Option<Duration>, job: F) -> bool
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let period = period.filter(|period| !period.is_zero());
        if period.is_some() && self.period() == period {
            return true;
        }
        self.arm(period, job)
    }

    /// Stop the timer. Job runs already spawned are left to finish.
    pub fn disarm(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            tracing::info!(period = ?self.period, "Polling disarmed");
        }
        self.period = None;
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        self.disarm();
    }
}
