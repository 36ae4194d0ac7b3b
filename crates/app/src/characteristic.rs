//! Characteristic — one live, locally-held accessory value.
//!
//! Each characteristic is logically owned by exactly one projection. Its
//! value is mutated by the synchronization cycle's `update` and by the
//! projection's own setter callbacks; the race between the two is accepted
//! staleness, not a correctness violation.

use std::sync::{Mutex, PoisonError};

use remobridge_domain::accessory::{HeatingCoolingState, TemperatureDisplayUnit};

use crate::event_bus::{CharacteristicEvent, EventBus};

/// A value type that can live in a characteristic.
pub trait CharacteristicValue: Copy + PartialEq + Send {
    /// JSON encoding published on the event bus and the REST surface.
    fn to_json(self) -> serde_json::Value;
}

impl CharacteristicValue for f64 {
    fn to_json(self) -> serde_json::Value {
        serde_json::Value::from(self)
    }
}

impl CharacteristicValue for bool {
    fn to_json(self) -> serde_json::Value {
        serde_json::Value::from(self)
    }
}

impl CharacteristicValue for u8 {
    fn to_json(self) -> serde_json::Value {
        serde_json::Value::from(self)
    }
}

impl CharacteristicValue for HeatingCoolingState {
    fn to_json(self) -> serde_json::Value {
        serde_json::Value::from(self.as_u8())
    }
}

impl CharacteristicValue for TemperatureDisplayUnit {
    fn to_json(self) -> serde_json::Value {
        serde_json::Value::from(self.as_u8())
    }
}

/// One registered accessory characteristic.
#[derive(Debug)]
pub struct Characteristic<T> {
    kind: &'static str,
    accessory: String,
    value: Mutex<T>,
    bus: EventBus,
}

impl<T: CharacteristicValue> Characteristic<T> {
    /// Register a characteristic with its initial value.
    pub fn new(bus: EventBus, accessory: impl Into<String>, kind: &'static str, initial: T) -> Self {
        Self {
            kind,
            accessory: accessory.into(),
            value: Mutex::new(initial),
            bus,
        }
    }

    /// Characteristic type tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Current value.
    pub fn get(&self) -> T {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a new value, publishing a change event when it differs from
    /// the previous one.
    pub fn set(&self, value: T) {
        let changed = {
            let mut guard = self.value.lock().unwrap_or_else(PoisonError::into_inner);
            let changed = *guard != value;
            *guard = value;
            changed
        };
        if changed {
            self.bus.publish(CharacteristicEvent {
                accessory: self.accessory.clone(),
                characteristic: self.kind,
                value: value.to_json(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_initial_value() {
        let bus = EventBus::new(4);
        let characteristic = Characteristic::new(bus, "Living Room", "CurrentTemperature", 21.5);
        assert_eq!(characteristic.get(), 21.5);
    }

    #[tokio::test]
    async fn should_publish_event_when_value_changes() {
        let bus = EventBus::new(4);
        let mut rx = bus.subscribe();
        let characteristic = Characteristic::new(bus, "Living Room", "CurrentTemperature", 21.5);

        characteristic.set(22.0);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.accessory, "Living Room");
        assert_eq!(event.characteristic, "CurrentTemperature");
        assert_eq!(event.value, serde_json::json!(22.0));
        assert_eq!(characteristic.get(), 22.0);
    }

    #[test]
    fn should_not_publish_event_when_value_unchanged() {
        let bus = EventBus::new(4);
        let mut rx = bus.subscribe();
        let characteristic = Characteristic::new(bus, "Ceiling", "On", true);

        characteristic.set(true);

        assert!(matches!(
            rx.try_recv(),
            Err(tokio::sync::broadcast::error::TryRecvError::Empty)
        ));
    }

    #[test]
    fn should_encode_enum_values_as_numbers() {
        assert_eq!(
            HeatingCoolingState::Auto.to_json(),
            serde_json::json!(3)
        );
        assert_eq!(
            TemperatureDisplayUnit::Fahrenheit.to_json(),
            serde_json::json!(1)
        );
    }
}
