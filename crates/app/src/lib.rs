//! # remobridge-app
//!
//! Application layer for the remobridge cloud-to-local accessory bridge.
//!
//! ## Responsibilities
//! - Define the **ports** (traits) the adapters implement, most notably the
//!   [`RemoteApi`](ports::remote::RemoteApi) cloud client interface
//! - Hold the **accessory projections** — local accessory objects that
//!   mirror a subset of remote state and proxy control writes back through
//!   the cloud
//! - Own the **registry** ([`registry::Bridge`]) built once at startup, and
//!   the **synchronization cycle** ([`sync::SyncCycle`]) that refreshes it
//! - Publish characteristic value changes on the in-process
//!   [`event_bus::EventBus`] for the transport layer to consume
//!
//! ## Dependency rule
//! Depends only on `remobridge-domain`. Never imports adapter crates; all
//! IO happens behind the port traits.

pub mod characteristic;
pub mod event_bus;
pub mod ports;
pub mod projections;
pub mod registry;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_support;
