//! Sensor projection — temperature, plus humidity and illuminance when the
//! backing device reported them at construction time.

use remobridge_domain::device::{RemoteDevice, SensorKind};
use remobridge_domain::error::{MappingError, WriteError};
use remobridge_domain::id::DeviceId;

use crate::characteristic::Characteristic;
use crate::event_bus::EventBus;
use crate::projections::reject_write;

const READ_ONLY: &[&str] = &[
    "CurrentTemperature",
    "CurrentRelativeHumidity",
    "CurrentAmbientLightLevel",
];

/// Local projection of one sensor hub.
///
/// A characteristic absent at construction is never added later, even if
/// the device begins reporting the corresponding value.
pub struct SensorProjection {
    name: String,
    device_id: DeviceId,
    temperature: Characteristic<f64>,
    humidity: Option<Characteristic<f64>>,
    illuminance: Option<Characteristic<f64>>,
}

impl SensorProjection {
    /// Build the projection from the device's construction-time snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::MissingReading`] when the device violates
    /// the always-has-a-temperature precondition.
    pub fn new(bus: &EventBus, device: &RemoteDevice) -> Result<Self, MappingError> {
        let temperature = Characteristic::new(
            bus.clone(),
            device.name.clone(),
            "CurrentTemperature",
            device.temperature()?,
        );
        let humidity = device.reading(SensorKind::Humidity).map(|value| {
            Characteristic::new(
                bus.clone(),
                device.name.clone(),
                "CurrentRelativeHumidity",
                value,
            )
        });
        let illuminance = device.reading(SensorKind::Illuminance).map(|value| {
            Characteristic::new(
                bus.clone(),
                device.name.clone(),
                "CurrentAmbientLightLevel",
                value,
            )
        });

        Ok(Self {
            name: device.name.clone(),
            device_id: device.id,
            temperature,
            humidity,
            illuminance,
        })
    }

    /// Accessory display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Backing device id (the join key).
    #[must_use]
    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    /// Overwrite the temperature unconditionally; overwrite humidity and
    /// illuminance only when the characteristic exists and the snapshot
    /// carries the reading.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::MissingReading`] when the snapshot violates
    /// the temperature precondition.
    pub fn update(&self, device: &RemoteDevice) -> Result<(), MappingError> {
        self.temperature.set(device.temperature()?);

        if let (Some(humidity), Some(value)) =
            (&self.humidity, device.reading(SensorKind::Humidity))
        {
            humidity.set(value);
        }
        if let (Some(illuminance), Some(value)) =
            (&self.illuminance, device.reading(SensorKind::Illuminance))
        {
            illuminance.set(value);
        }
        Ok(())
    }

    /// All sensor characteristics are read-only.
    ///
    /// # Errors
    ///
    /// Always returns a [`WriteError`].
    pub fn write(&self, characteristic: &str) -> Result<(), WriteError> {
        Err(reject_write(READ_ONLY, characteristic))
    }

    /// Current characteristic values.
    #[must_use]
    pub fn characteristics(&self) -> Vec<(&'static str, serde_json::Value)> {
        let mut values = vec![(
            self.temperature.kind(),
            serde_json::Value::from(self.temperature.get()),
        )];
        if let Some(humidity) = &self.humidity {
            values.push((humidity.kind(), serde_json::Value::from(humidity.get())));
        }
        if let Some(illuminance) = &self.illuminance {
            values.push((
                illuminance.kind(),
                serde_json::Value::from(illuminance.get()),
            ));
        }
        values
    }
}
