//! Synchronization cycle — the single shared polling loop.
//!
//! One recurring task fetches the cloud inventory once per tick and fans
//! the snapshot out to every registered accessory. The loop is strictly
//! serialized: the next tick cannot start while a previous one is still
//! updating accessories, and no accessory polls independently — the cloud
//! sees exactly two requests per tick regardless of accessory count.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use remobridge_domain::error::MappingError;

use crate::ports::RemoteApi;
use crate::registry::Bridge;

/// Default polling period.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(60);

/// The recurring snapshot-and-fan-out task.
pub struct SyncCycle<A> {
    api: Arc<A>,
    bridge: Arc<Bridge<A>>,
    period: Duration,
}

impl<A: RemoteApi + 'static> SyncCycle<A> {
    /// Create a cycle over the given registry.
    pub fn new(api: Arc<A>, bridge: Arc<Bridge<A>>, period: Duration) -> Self {
        Self {
            api,
            bridge,
            period,
        }
    }

    /// Spawn the polling loop.
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first interval tick completes immediately; the registry was
        // just built from a fresh snapshot, so consume it.
        interval.tick().await;

        loop {
            interval.tick().await;
            if let Err(err) = self.tick().await {
                // A mapping fault has no defined recovery; surface it here
                // and keep polling.
                tracing::error!(%err, "synchronization tick raised a mapping fault");
            }
        }
    }

    /// Run one synchronization pass.
    ///
    /// A fetch failure is logged and skips the whole tick — no partial
    /// updates, every accessory keeps its previous values.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when the fetched snapshot carries values
    /// outside the mapper domains.
    pub async fn tick(&self) -> Result<(), MappingError> {
        let snapshot = match self.api.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(%err, "snapshot fetch failed, skipping this tick");
                return Ok(());
            }
        };
        self.bridge.update_all(&snapshot)
    }
}
