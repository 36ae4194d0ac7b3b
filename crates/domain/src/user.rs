//! Cloud account owner — supplies the bridge display name.

use serde::{Deserialize, Serialize};

/// The account the access token belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    /// Display name; used as the bridge accessory name.
    pub nickname: String,
}
