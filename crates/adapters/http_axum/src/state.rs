//! Shared application state for axum handlers.

use std::sync::Arc;

use remobridge_app::event_bus::EventBus;
use remobridge_app::ports::RemoteApi;
use remobridge_app::registry::Bridge;

/// Application state shared across all axum handlers.
///
/// Generic over the remote API client to avoid dynamic dispatch. `Clone` is
/// implemented manually so the client itself does not need to be `Clone` —
/// only the `Arc` wrapper is cloned.
pub struct AppState<A> {
    /// Accessory registry built from the cloud inventory.
    pub bridge: Arc<Bridge<A>>,
    /// Broadcast bus carrying characteristic change events.
    pub events: EventBus,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            bridge: Arc::clone(&self.bridge),
            events: self.events.clone(),
        }
    }
}

impl<A> AppState<A>
where
    A: RemoteApi + 'static,
{
    /// Create a new application state from a pre-wrapped registry.
    ///
    /// The registry is shared with the background refresh cycle, so it
    /// arrives already inside an `Arc`.
    pub fn new(bridge: Arc<Bridge<A>>, events: EventBus) -> Self {
        Self { bridge, events }
    }
}
