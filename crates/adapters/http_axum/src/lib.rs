//! # remobridge-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **REST JSON API** over the accessory registry
//!   (`/api/accessories`, characteristic reads and writes)
//! - Stream characteristic changes as **Server-Sent Events**
//!   (`/api/events/stream`)
//! - Map HTTP requests into projection calls (driving adapter)
//! - Map projection results into HTTP responses
//!
//! ## Dependency rule
//! Depends on `remobridge-app` (registry, projections, event bus) and
//! `remobridge-domain` (error taxonomy). Never leaks axum types into the
//! domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
