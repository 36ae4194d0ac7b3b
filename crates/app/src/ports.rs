//! Port definitions — traits implemented by adapter crates.

pub mod remote;

pub use remote::{AirconSettingsUpdate, RemoteApi};
