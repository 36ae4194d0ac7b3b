//! # remobridge-adapter-cloud-http
//!
//! Concrete [`RemoteApi`] implementation over the smart-remote cloud's REST
//! API: bearer-token auth, JSON reads, form-encoded command posts.
//!
//! ## Dependency rule
//!
//! Depends on `remobridge-app` (port traits) and `remobridge-domain` only.

mod error;
mod models;

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use remobridge_app::ports::{AirconSettingsUpdate, RemoteApi};
use remobridge_domain::appliance::RemoteAppliance;
use remobridge_domain::device::RemoteDevice;
use remobridge_domain::error::RemoteError;
use remobridge_domain::id::ApplianceId;
use remobridge_domain::user::RemoteUser;

pub use error::CloudError;

/// Production cloud endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.nature.global/";

/// How long bodies attached to error reports may grow.
const ERROR_BODY_LIMIT: usize = 512;

/// Connection settings for the cloud client.
#[derive(Debug, Clone)]
pub struct CloudConfig {
    /// API base URL.
    pub base_url: Url,
    /// Personal access token, sent as a bearer credential.
    pub access_token: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl CloudConfig {
    /// Build a config for the given base URL and token.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Url`] when `base_url` does not parse.
    pub fn new(base_url: &str, access_token: impl Into<String>) -> Result<Self, CloudError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            access_token: access_token.into(),
            timeout: Duration::from_secs(30),
        })
    }
}

/// The cloud smart-remote API client.
pub struct CloudClient {
    http: reqwest::Client,
    base_url: Url,
    access_token: String,
}

impl CloudClient {
    /// Build a client from the given config.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: &CloudConfig) -> Result<Self, CloudError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("remobridge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CloudError::Transport)?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            access_token: config.access_token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CloudError> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CloudError> {
        tracing::debug!(path, "cloud GET");
        let response = self
            .http
            .get(self.endpoint(path)?)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(CloudError::Transport)?;
        let response = check_status(response).await?;
        response.json().await.map_err(CloudError::Decode)
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<(), CloudError> {
        tracing::debug!(path, "cloud POST");
        let response = self
            .http
            .post(self.endpoint(path)?)
            .bearer_auth(&self.access_token)
            .form(form)
            .send()
            .await
            .map_err(CloudError::Transport)?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, CloudError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let mut body = response.text().await.unwrap_or_default();
    truncate_on_char_boundary(&mut body, ERROR_BODY_LIMIT);
    Err(CloudError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Truncate to at most `limit` bytes without splitting a multibyte
/// character; `String::truncate` panics on a non-boundary index.
fn truncate_on_char_boundary(text: &mut String, limit: usize) {
    if text.len() <= limit {
        return;
    }
    let end = (0..=limit)
        .rev()
        .find(|index| text.is_char_boundary(*index))
        .unwrap_or(0);
    text.truncate(end);
}

impl RemoteApi for CloudClient {
    async fn get_user(&self) -> Result<RemoteUser, RemoteError> {
        let dto: models::UserDto = self.get_json("1/users/me").await?;
        Ok(dto.into())
    }

    async fn get_devices(&self) -> Result<Vec<RemoteDevice>, RemoteError> {
        let dtos: Vec<models::DeviceDto> = self.get_json("1/devices").await?;
        Ok(dtos.into_iter().map(Into::into).collect())
    }

    async fn get_appliances(&self) -> Result<Vec<RemoteAppliance>, RemoteError> {
        let dtos: Vec<models::ApplianceDto> = self.get_json("1/appliances").await?;
        Ok(dtos.into_iter().map(Into::into).collect())
    }

    async fn update_aircon_settings(
        &self,
        appliance_id: ApplianceId,
        update: AirconSettingsUpdate,
    ) -> Result<(), RemoteError> {
        let mut form: Vec<(&str, &str)> = Vec::new();
        if let Some(mode) = update.operation_mode.as_deref() {
            form.push(("operation_mode", mode));
        }
        if let Some(button) = update.button.as_deref() {
            form.push(("button", button));
        }
        if let Some(temperature) = update.temperature.as_deref() {
            form.push(("temperature", temperature));
        }
        self.post_form(&format!("1/appliances/{appliance_id}/aircon_settings"), &form)
            .await?;
        Ok(())
    }

    async fn send_tv_infrared_signal(
        &self,
        appliance_id: ApplianceId,
        button: &str,
    ) -> Result<(), RemoteError> {
        self.post_form(
            &format!("1/appliances/{appliance_id}/tv"),
            &[("button", button)],
        )
        .await?;
        Ok(())
    }

    async fn send_light_infrared_signal(
        &self,
        appliance_id: ApplianceId,
        button: &str,
    ) -> Result<(), RemoteError> {
        self.post_form(
            &format!("1/appliances/{appliance_id}/light"),
            &[("button", button)],
        )
        .await?;
        Ok(())
    }
}
