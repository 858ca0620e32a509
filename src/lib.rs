//! Airport weather service
//!
//! This library keeps the latest atmospheric readings for a set of airports,
//! answers point and radius weather queries, and reports data freshness and
//! request statistics.

pub mod api;
pub mod config;
pub mod distance;
pub mod error;
pub mod frequency;
pub mod health;
pub mod loader;
pub mod models;
pub mod query;
pub mod registry;
pub mod service;
pub mod store;
pub mod validation;
pub mod web;

// Re-export core types for public API
pub use config::{DuplicatePolicy, WeatherServiceConfig};
pub use distance::distance_km;
pub use error::WeatherError;
pub use frequency::FrequencyTracker;
pub use health::HealthReport;
pub use loader::{AirportLoader, LoadSummary};
pub use models::{AirportRecord, Coordinates, Dst, MeasurementKind, MeasurementSample, WeatherSnapshot};
pub use query::QueryEngine;
pub use registry::AirportRegistry;
pub use service::WeatherService;
pub use store::AtmosphericStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherError>;
