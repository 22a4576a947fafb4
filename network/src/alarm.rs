//! Periodic timer with a stop signal.

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Runs an async task on a fixed cadence until stopped.
///
/// The first tick fires immediately. The stop signal unblocks the worker
/// before its next tick; a tick already in flight completes first.
pub struct Alarm {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Alarm {
    pub fn start<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let (stop, mut stopped) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = interval.tick() => tick().await,
                    _ = stopped.changed() => return,
                }
            }
        });
        Self { stop, handle }
    }

    /// Signal the timer and wait for its worker to wind down.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        let _ = self.handle.await;
    }
}
