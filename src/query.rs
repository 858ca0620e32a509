//! Point and radius weather queries

use std::sync::Arc;

use tracing::debug;

use crate::distance::distance_km;
use crate::models::{AirportRecord, Coordinates, WeatherSnapshot};
use crate::registry::AirportRegistry;
use crate::store::AtmosphericStore;
use crate::{Result, WeatherError};

/// Answers weather queries from the registry and the atmospheric store
#[derive(Debug, Clone)]
pub struct QueryEngine {
    registry: Arc<AirportRegistry>,
    store: Arc<AtmosphericStore>,
}

impl QueryEngine {
    #[must_use]
    pub fn new(registry: Arc<AirportRegistry>, store: Arc<AtmosphericStore>) -> Self {
        Self { registry, store }
    }

    /// Latest weather for an airport; empty for unknown airports
    #[must_use]
    pub fn query_point(&self, iata: &str) -> WeatherSnapshot {
        self.store.get(iata)
    }

    /// Weather at every airport within `radius_km` of the reference airport.
    ///
    /// A zero radius returns the reference snapshot alone, even when empty.
    /// Otherwise airports without any recorded measurement are left out.
    /// Result order is unspecified.
    pub fn query_radius(&self, iata: &str, radius_km: f64) -> Result<Vec<WeatherSnapshot>> {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(WeatherError::invalid_argument(format!(
                "radius must be a decimal number greater or equal to 0, got {radius_km}"
            )));
        }

        let reference = self
            .registry
            .get(iata)
            .ok_or_else(|| WeatherError::not_found(iata))?;

        if radius_km == 0.0 {
            return Ok(vec![self.query_point(iata)]);
        }

        let snapshots: Vec<WeatherSnapshot> = self
            .airports_within_radius(&reference.coordinates(), radius_km)
            .into_iter()
            .map(|(airport, _)| self.store.get(&airport.iata))
            .filter(|snapshot| !snapshot.is_empty())
            .collect();

        debug!(
            iata,
            radius_km,
            matches = snapshots.len(),
            "Radius query resolved"
        );
        Ok(snapshots)
    }

    /// Registered airports within `radius_km` of `center`, with their distance
    #[must_use]
    pub fn airports_within_radius(
        &self,
        center: &Coordinates,
        radius_km: f64,
    ) -> Vec<(AirportRecord, f64)> {
        self.registry
            .list()
            .into_iter()
            .filter_map(|airport| {
                let distance = distance_km(center, &airport.coordinates());
                (distance <= radius_km).then_some((airport, distance))
            })
            .collect()
    }
}
