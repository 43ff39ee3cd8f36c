use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::session::SessionStore;

/// Background task that drops idle sessions on a fixed interval.
///
/// The task lives until [`SessionReaper::stop`] is called; dropping the
/// reaper without stopping it also ends the task once the stop channel
/// closes.
pub struct SessionReaper {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

impl SessionReaper {
    pub fn start(
        store: Arc<Mutex<SessionStore>>,
        idle_timeout: Duration,
        sweep_interval: Duration,
    ) -> Self {
        let (stop_tx, stop_rx) = oneshot::channel();
        let join = tokio::spawn(run_reaper_loop(store, idle_timeout, sweep_interval, stop_rx));
        log::debug!(
            "Session reaper started (idle timeout {:?}, sweep every {:?})",
            idle_timeout,
            sweep_interval
        );
        Self { stop_tx, join }
    }

    pub async fn stop(self) {
        let _ = self.stop_tx.send(());
        if let Err(e) = self.join.await {
            log::error!("Session reaper task failed: {}", e);
        }
        log::debug!("Session reaper stopped");
    }
}

async fn run_reaper_loop(
    store: Arc<Mutex<SessionStore>>,
    idle_timeout: Duration,
    sweep_interval: Duration,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let idle_timeout = match chrono::Duration::from_std(idle_timeout) {
        Ok(d) => d,
        Err(e) => {
            log::error!("Invalid session idle timeout: {}", e);
            return;
        }
    };

    if sweep_interval.is_zero() {
        log::error!("Session sweep interval must be non-zero, idle sessions will not be reaped");
        return;
    }

    let mut ticker = interval(sweep_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                store.lock().await.reap_idle(Utc::now(), idle_timeout);
            }
            _ = &mut stop_rx => break,
        }
    }
}
