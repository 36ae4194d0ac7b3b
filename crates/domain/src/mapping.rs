//! Value mappers — pure, deterministic translations between the cloud
//! vocabulary and the local characteristic domains.
//!
//! Every mapper is total on its declared input domain and returns
//! [`MappingError`](crate::error::MappingError) outside it. No mapper
//! performs IO.

pub mod climate;
pub mod power;
pub mod temperature;
pub mod volume;
