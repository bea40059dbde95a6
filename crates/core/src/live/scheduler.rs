//! Periodic backstop refresh.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use log::{debug, info};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Handle to a live recurring refresh task.
///
/// Owned exclusively by the scheduler; aborting the handle cancels the
/// task between ticks.
struct RefreshTimer {
    handle: JoinHandle<()>,
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Drives the fallback pull on a fixed interval, independent of push
/// health. It does not coordinate with the dispatcher and may redundantly
/// re-pull data already delivered via push.
#[derive(Default)]
pub struct RefreshScheduler {
    timer: Mutex<Option<RefreshTimer>>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins invoking `tick` every `every`, with the first invocation a
    /// full period after this call. Starting while already running
    /// cancels the previous timer first.
    pub fn start<F, Fut>(&self, every: Duration, mut tick: F)
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let first_tick = Instant::now() + every;
        let handle = tokio::spawn(async move {
            let mut timer = interval_at(first_tick, every);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                timer.tick().await;
                tick().await;
            }
        });

        let previous = self
            .timer
            .lock()
            .unwrap()
            .replace(RefreshTimer { handle });
        if previous.is_some() {
            debug!("Refresh scheduler restarted; previous timer cancelled");
        }
        info!("Backstop refresh started (every {:?})", every);
    }

    /// Cancels the recurring invocation. Safe to call when not started
    /// or already stopped; no tick runs after this returns.
    pub fn stop(&self) {
        if self.timer.lock().unwrap().take().is_some() {
            info!("Backstop refresh stopped");
        }
    }

    /// Whether a timer is currently scheduled.
    pub fn is_running(&self) -> bool {
        self.timer.lock().unwrap().is_some()
    }
}
