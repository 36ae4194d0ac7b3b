//! # remobridge-domain
//!
//! Pure domain model for the remobridge cloud-to-local accessory bridge.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define the **cloud inventory** (`RemoteDevice`, `RemoteAppliance`,
//!   `Snapshot`) as fetched by each poll
//! - Define the **local accessory vocabulary** (heating/cooling states,
//!   display units, volume steps, category tags)
//! - Contain the **value mappers** translating between the two vocabularies,
//!   including the documented lossy cases
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! It must never import anything from `app`, adapters, or IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod accessory;
pub mod appliance;
pub mod device;
pub mod error;
pub mod id;
pub mod mapping;
pub mod snapshot;
pub mod user;
