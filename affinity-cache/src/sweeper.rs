//! Periodic background sweeper for a [`TtlCache`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TtlCache;

/// Periodic sweeper bound to one cache instance.
///
/// `start` consumes the sweeper and `stop` consumes the handle, so a
/// sweeper cannot be started twice nor stopped twice.
pub struct Sweeper<V> {
    name: String,
    cache: Arc<TtlCache<V>>,
    interval: Duration,
}

impl<V: Clone + Send + Sync + 'static> Sweeper<V> {
    /// Creates a sweeper for `cache` that fires every `interval`.
    ///
    /// `name` only appears in log output.
    pub fn new(name: impl Into<String>, cache: Arc<TtlCache<V>>, interval: Duration) -> Self {
        Self {
            name: name.into(),
            cache,
            interval,
        }
    }

    /// Spawns the periodic sweep task and returns its handle.
    pub fn start(self) -> SweeperHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let Sweeper {
            name,
            cache,
            interval,
        } = self;

        info!(cache = %name, ?interval, "Started sweeper");

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it so the schedule
            // starts one interval from now, like the original.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        debug!(cache = %name, "Running sweeper");
                        let removed = cache.sweep();
                        info!(cache = %name, removed, "Sweep complete");
                    }
                    _ = shutdown_rx.changed() => {
                        info!(cache = %name, "Stopping sweeper");
                        break;
                    }
                }
            }
        });

        SweeperHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Handle to a running sweeper task.
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signals shutdown and waits for the sweep task to finish.
    ///
    /// An in-flight sweep completes before this returns.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }

    /// Aborts the sweep task without waiting.
    pub fn abort(self) {
        self.task.abort();
    }
}
