//! Airport weather service
//!
//! The single entry point used by the HTTP layer and the bulk loader. One
//! instance owns the registry, store and frequency counters; clones share
//! them.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument};

use crate::config::{DuplicatePolicy, HealthConfig, WeatherServiceConfig};
use crate::frequency::FrequencyTracker;
use crate::health::HealthReport;
use crate::models::{AirportRecord, MeasurementKind, MeasurementSample, WeatherSnapshot};
use crate::query::QueryEngine;
use crate::registry::AirportRegistry;
use crate::store::AtmosphericStore;
use crate::{Result, WeatherError};

/// Facade over the airport registry, atmospheric store and usage counters
#[derive(Debug, Clone)]
pub struct WeatherService {
    registry: Arc<AirportRegistry>,
    store: Arc<AtmosphericStore>,
    frequency: Arc<FrequencyTracker>,
    query: QueryEngine,
    duplicate_policy: DuplicatePolicy,
    health: HealthConfig,
}

impl Default for WeatherService {
    fn default() -> Self {
        Self::new(&WeatherServiceConfig::default())
    }
}

impl WeatherService {
    /// Create a service with fresh, empty stores
    #[must_use]
    pub fn new(config: &WeatherServiceConfig) -> Self {
        let registry = Arc::new(AirportRegistry::new());
        let store = Arc::new(AtmosphericStore::new(Arc::clone(&registry)));
        let query = QueryEngine::new(Arc::clone(&registry), Arc::clone(&store));

        Self {
            registry,
            store,
            frequency: Arc::new(FrequencyTracker::new()),
            query,
            duplicate_policy: config.store.duplicate_policy,
            health: config.health.clone(),
        }
    }

    /// Create a service with default settings and the given duplicate policy
    #[must_use]
    pub fn with_duplicate_policy(policy: DuplicatePolicy) -> Self {
        let mut config = WeatherServiceConfig::default();
        config.store.duplicate_policy = policy;
        Self::new(&config)
    }

    /// Register an airport together with an empty weather snapshot
    #[instrument(skip(self, record), fields(iata = %record.iata))]
    pub fn add_airport(&self, record: AirportRecord) -> Result<AirportRecord> {
        let store = &self.store;
        match self.duplicate_policy {
            DuplicatePolicy::Replace => {
                Ok(self.registry.add_with(record, |r| store.register(&r.iata)))
            }
            DuplicatePolicy::Reject => self
                .registry
                .add_new_with(record, |r| store.register(&r.iata)),
        }
    }

    /// Remove an airport with its snapshot and request counter
    #[instrument(skip(self))]
    pub fn remove_airport(&self, iata: &str) -> Result<AirportRecord> {
        self.registry.remove_with(iata, |r| {
            self.store.remove(&r.iata);
            self.frequency.remove_airport(&r.iata);
        })
    }

    #[must_use]
    pub fn get_airport(&self, iata: &str) -> Option<AirportRecord> {
        self.registry.get(iata)
    }

    #[must_use]
    pub fn list_airports(&self) -> Vec<AirportRecord> {
        self.registry.list()
    }

    #[must_use]
    pub fn list_airport_codes(&self) -> Vec<String> {
        self.registry.list_identifiers()
    }

    /// Merge a measurement into an airport's snapshot
    #[instrument(skip(self, sample))]
    pub fn submit_measurement(
        &self,
        iata: &str,
        kind: MeasurementKind,
        sample: MeasurementSample,
    ) -> Result<()> {
        self.store.update(iata, kind, sample)
    }

    /// Weather at `iata` (radius 0) or at every airport within `radius_km`.
    ///
    /// The request is counted once its arguments are known to be valid,
    /// before the query runs, whether or not the airport exists.
    #[instrument(skip(self))]
    pub fn query_weather(&self, iata: &str, radius_km: f64) -> Result<Vec<WeatherSnapshot>> {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(WeatherError::invalid_argument(format!(
                "radius must be a decimal number greater or equal to 0, got {radius_km}"
            )));
        }

        self.frequency.record_airport_request(iata);
        self.frequency.record_radius_request(radius_km);

        let snapshots = self.query.query_radius(iata, radius_km)?;
        debug!(count = snapshots.len(), "Weather query answered");
        Ok(snapshots)
    }

    /// Latest weather for one airport; empty when the airport is unknown
    #[must_use]
    pub fn latest_weather(&self, iata: &str) -> WeatherSnapshot {
        self.query.query_point(iata)
    }

    /// Health and usage statistics as of now
    #[must_use]
    pub fn health_report(&self) -> HealthReport {
        self.health_report_at(Utc::now().timestamp_millis())
    }

    /// Health and usage statistics as of `now_ms`
    #[must_use]
    pub fn health_report_at(&self, now_ms: i64) -> HealthReport {
        HealthReport::build(
            &self.registry,
            &self.store,
            &self.frequency,
            &self.health,
            now_ms,
        )
    }

    #[must_use]
    pub fn frequency(&self) -> &FrequencyTracker {
        &self.frequency
    }
}
