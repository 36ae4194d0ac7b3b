//! Light projection — a single on/off characteristic.
//!
//! No absolute-brightness control exists in the remote protocol.

use std::sync::Arc;

use remobridge_domain::appliance::{ApplianceKind, LightState, RemoteAppliance};
use remobridge_domain::error::{BridgeError, MappingError};
use remobridge_domain::id::{ApplianceId, DeviceId};
use remobridge_domain::mapping::power;

use crate::characteristic::Characteristic;
use crate::event_bus::EventBus;
use crate::ports::RemoteApi;
use crate::projections::{reject_write, value_as_bool};

/// Local projection of one infrared-controlled light.
pub struct LightProjection<A> {
    name: String,
    api: Arc<A>,
    device_id: DeviceId,
    appliance_id: ApplianceId,
    on: Characteristic<bool>,
}

impl<A: RemoteApi> LightProjection<A> {
    /// Build the projection from the construction-time snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when the reported power state is outside
    /// `{on, off}` or the light sub-record is missing.
    pub fn new(
        bus: &EventBus,
        api: Arc<A>,
        device_id: DeviceId,
        appliance: &RemoteAppliance,
    ) -> Result<Self, MappingError> {
        let light = require_light(appliance)?;
        let name = appliance.nickname.clone();
        let on = Characteristic::new(bus.clone(), name.clone(), "On", power::to_local(&light.power)?);

        Ok(Self {
            name,
            api,
            device_id,
            appliance_id: appliance.id,
            on,
        })
    }

    /// Accessory display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Backing device id.
    #[must_use]
    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    /// Backing appliance id (the join key).
    #[must_use]
    pub fn appliance_id(&self) -> ApplianceId {
        self.appliance_id
    }

    /// Push the freshly fetched power state into the On characteristic.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when the snapshot carries a power state
    /// outside `{on, off}`.
    pub fn update(&self, appliance: &RemoteAppliance) -> Result<(), MappingError> {
        let light = require_light(appliance)?;
        self.on.set(power::to_local(&light.power)?);
        Ok(())
    }

    /// On/off setter. The local write is accepted; a remote failure is
    /// logged only.
    pub async fn set_on(&self, value: bool) {
        self.on.set(value);

        if let Err(err) = self
            .api
            .send_light_infrared_signal(self.appliance_id, power::to_remote(value))
            .await
        {
            tracing::warn!(
                %err,
                accessory = %self.name,
                appliance_id = %self.appliance_id,
                "light power write failed"
            );
        }
    }

    /// Dispatch a transport-initiated characteristic write.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError`] for unknown or mistyped characteristics.
    pub async fn write(
        &self,
        characteristic: &str,
        value: &serde_json::Value,
    ) -> Result<(), BridgeError> {
        match characteristic {
            "On" => {
                self.set_on(value_as_bool("On", value)?).await;
                Ok(())
            }
            other => Err(reject_write(&[], other).into()),
        }
    }

    /// Current characteristic values.
    #[must_use]
    pub fn characteristics(&self) -> Vec<(&'static str, serde_json::Value)> {
        vec![(self.on.kind(), serde_json::Value::from(self.on.get()))]
    }

    #[cfg(test)]
    pub(crate) fn is_on(&self) -> bool {
        self.on.get()
    }
}

fn require_light(appliance: &RemoteAppliance) -> Result<&LightState, MappingError> {
    appliance
        .light
        .as_ref()
        .ok_or(MappingError::MissingApplianceState {
            appliance_id: appliance.id,
            kind: ApplianceKind::Light,
        })
}
