//! Crisis surface adapters.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::ports::CrisisSurface;

/// Publishes the crisis flag on a watch channel for a UI to observe.
///
/// The flag stays raised until the UI acknowledges it.
#[derive(Debug)]
pub struct WatchCrisisSurface {
    sender: watch::Sender<bool>,
}

impl Default for WatchCrisisSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchCrisisSurface {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    /// Returns a receiver that sees every raise and acknowledgment.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }

    pub fn is_raised(&self) -> bool {
        *self.sender.borrow()
    }

    /// Lowers the flag after the user has seen the resources.
    pub fn acknowledge(&self) {
        self.sender.send_replace(false);
    }

    /// Spawns a task that calls `show` as soon as the flag is raised, then
    /// acknowledges it.
    ///
    /// The task reacts while a turn is still waiting on the generator. It ends
    /// once the surface is dropped.
    pub fn spawn_alert_listener<F>(self: &Arc<Self>, mut show: F) -> JoinHandle<()>
    where
        F: FnMut() + Send + 'static,
    {
        let surface = Arc::downgrade(self);
        let mut alerts = self.subscribe();
        tokio::spawn(async move {
            while alerts.changed().await.is_ok() {
                if !*alerts.borrow_and_update() {
                    continue;
                }
                show();
                match surface.upgrade() {
                    Some(surface) => surface.acknowledge(),
                    None => break,
                }
            }
            debug!("Crisis alert listener stopped");
        })
    }
}

impl CrisisSurface for WatchCrisisSurface {
    fn raise(&self) {
        self.sender.send_replace(true);
    }
}

/// Records crisis detections in the log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingCrisisSurface;

impl CrisisSurface for LoggingCrisisSurface {
    fn raise(&self) {
        warn!("Crisis language detected; crisis resources should be shown");
    }
}
