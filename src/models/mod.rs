//! Data models for the airport weather service
//!
//! This module contains the core domain models organized by concern:
//! - Airport: immutable airport metadata and coordinates
//! - Measurement: measurement kinds and individual samples
//! - Snapshot: the per-airport set of latest samples

pub mod airport;
pub mod measurement;
pub mod snapshot;

// Re-export all public types for convenient access
pub use airport::{AirportRecord, Coordinates, Dst};
pub use measurement::{MeasurementKind, MeasurementSample};
pub use snapshot::WeatherSnapshot;
