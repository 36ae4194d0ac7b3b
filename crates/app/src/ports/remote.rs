//! Remote API port — the cloud inventory and command interface.
//!
//! The concrete client lives in an adapter crate; every component that talks
//! to the cloud receives a handle to an implementation of this trait, which
//! also makes substitution with a test double trivial.

use std::future::Future;

use remobridge_domain::appliance::RemoteAppliance;
use remobridge_domain::device::RemoteDevice;
use remobridge_domain::error::RemoteError;
use remobridge_domain::id::ApplianceId;
use remobridge_domain::snapshot::Snapshot;
use remobridge_domain::user::RemoteUser;

/// Partial climate settings update sent to the cloud.
///
/// Only the populated fields are transmitted; the cloud keeps the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AirconSettingsUpdate {
    /// Operation mode (`warm`, `cool`, `auto`, …).
    pub operation_mode: Option<String>,
    /// Override button (empty string clears it, `power-off` powers down).
    pub button: Option<String>,
    /// Target temperature in the appliance's native unit, integer text.
    pub temperature: Option<String>,
}

/// The cloud smart-remote API client.
///
/// All calls are synchronous from the caller's perspective and may block on
/// the network; failures surface as [`RemoteError`] and are caught at every
/// call site. No retries happen at this layer.
pub trait RemoteApi: Send + Sync {
    /// Fetch the account owner.
    fn get_user(&self) -> impl Future<Output = Result<RemoteUser, RemoteError>> + Send;

    /// Fetch all sensor hubs visible to the account.
    fn get_devices(&self) -> impl Future<Output = Result<Vec<RemoteDevice>, RemoteError>> + Send;

    /// Fetch all registered appliances.
    fn get_appliances(
        &self,
    ) -> impl Future<Output = Result<Vec<RemoteAppliance>, RemoteError>> + Send;

    /// Apply a partial climate settings update.
    fn update_aircon_settings(
        &self,
        appliance_id: ApplianceId,
        update: AirconSettingsUpdate,
    ) -> impl Future<Output = Result<(), RemoteError>> + Send;

    /// Fire a one-shot television infrared signal.
    fn send_tv_infrared_signal(
        &self,
        appliance_id: ApplianceId,
        button: &str,
    ) -> impl Future<Output = Result<(), RemoteError>> + Send;

    /// Fire a one-shot light infrared signal.
    fn send_light_infrared_signal(
        &self,
        appliance_id: ApplianceId,
        button: &str,
    ) -> impl Future<Output = Result<(), RemoteError>> + Send;

    /// Fetch one atomic [`Snapshot`] — devices first, then appliances.
    ///
    /// Exactly two API calls, regardless of how many accessories consume
    /// the result.
    fn fetch_snapshot(&self) -> impl Future<Output = Result<Snapshot, RemoteError>> + Send {
        async {
            let devices = self.get_devices().await?;
            let appliances = self.get_appliances().await?;
            Ok(Snapshot {
                devices,
                appliances,
            })
        }
    }
}
