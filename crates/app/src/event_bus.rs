//! In-process event bus backed by a tokio broadcast channel.
//!
//! Carries characteristic value changes from the projections to the
//! transport layer (the "publish value change" operation).

use serde::Serialize;
use tokio::sync::broadcast;

/// A characteristic value change, as observed by subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacteristicEvent {
    /// Accessory display name.
    pub accessory: String,
    /// Characteristic type tag (e.g. `CurrentTemperature`).
    pub characteristic: &'static str,
    /// The new value, JSON-encoded.
    pub value: serde_json::Value,
}

/// In-process event bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped).
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CharacteristicEvent>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events on this bus.
    ///
    /// Returns a receiver that will get all events published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CharacteristicEvent> {
        self.sender.subscribe()
    }

    /// Publish a value change.
    pub fn publish(&self, event: CharacteristicEvent) {
        // broadcast::send fails only when there are zero receivers,
        // which is fine — the event is simply dropped.
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(characteristic: &'static str) -> CharacteristicEvent {
        CharacteristicEvent {
            accessory: "Living Room".to_string(),
            characteristic,
            value: serde_json::json!(21.5),
        }
    }

    #[tokio::test]
    async fn should_deliver_event_to_subscriber() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(event("CurrentTemperature"));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.characteristic, "CurrentTemperature");
        assert_eq!(received.value, serde_json::json!(21.5));
    }

    #[tokio::test]
    async fn should_deliver_event_to_multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(event("On"));

        assert_eq!(rx1.recv().await.unwrap().characteristic, "On");
        assert_eq!(rx2.recv().await.unwrap().characteristic, "On");
    }

    #[test]
    fn should_succeed_when_no_subscribers() {
        let bus = EventBus::new(16);
        bus.publish(event("Mute"));
    }

    #[tokio::test]
    async fn should_not_deliver_events_published_before_subscription() {
        let bus = EventBus::new(16);
        bus.publish(event("CurrentTemperature"));

        let mut rx = bus.subscribe();
        bus.publish(event("TargetTemperature"));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.characteristic, "TargetTemperature");
    }
}
