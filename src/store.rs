//! Atmospheric store
//!
//! Holds one [`WeatherSnapshot`] per registered airport. Each snapshot sits
//! behind its own lock so an update only ever holds one airport's lock for the
//! duration of a single slot replacement. Two concurrent updates to different
//! kinds of the same airport therefore both survive; concurrent updates to the
//! same kind resolve last-write-wins.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::models::{MeasurementKind, MeasurementSample, WeatherSnapshot};
use crate::registry::AirportRegistry;
use crate::validation;
use crate::{Result, WeatherError};

type SnapshotCell = Arc<RwLock<WeatherSnapshot>>;

/// Per-airport weather snapshots with a validated merge protocol
#[derive(Debug)]
pub struct AtmosphericStore {
    registry: Arc<AirportRegistry>,
    snapshots: DashMap<String, SnapshotCell>,
}

impl AtmosphericStore {
    #[must_use]
    pub fn new(registry: Arc<AirportRegistry>) -> Self {
        Self {
            registry,
            snapshots: DashMap::new(),
        }
    }

    /// Create an empty snapshot for an airport; re-registering resets it
    pub fn register(&self, iata: &str) {
        self.snapshots
            .insert(iata.to_string(), Arc::new(RwLock::new(WeatherSnapshot::empty())));
        debug!(iata, "Snapshot registered");
    }

    /// Delete an airport's snapshot, returning its last state
    pub fn remove(&self, iata: &str) -> Option<WeatherSnapshot> {
        self.snapshots
            .remove(iata)
            .map(|(_, cell)| cell.read().clone())
    }

    #[must_use]
    pub fn contains(&self, iata: &str) -> bool {
        self.snapshots.contains_key(iata)
    }

    /// Current snapshot for an airport, or an empty one if it is unknown
    #[must_use]
    pub fn get(&self, iata: &str) -> WeatherSnapshot {
        match self.cell(iata) {
            Some(cell) => cell.read().clone(),
            None => WeatherSnapshot::empty(),
        }
    }

    /// Merge one sample into an airport's snapshot.
    ///
    /// Fails with `NotFound` for unknown airports and `InvalidSample` for
    /// implausible samples; in both cases nothing is changed.
    pub fn update(&self, iata: &str, kind: MeasurementKind, sample: MeasurementSample) -> Result<()> {
        // no store lock is held while consulting the registry
        if !self.registry.contains(iata) {
            return Err(WeatherError::not_found(iata));
        }

        let violations = validation::violations(kind, &sample);
        if !violations.is_empty() {
            let message = violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            warn!(iata, %kind, %message, "Rejected sample");
            return Err(WeatherError::invalid_sample(kind, message));
        }

        let cell = self.cell(iata).ok_or_else(|| WeatherError::not_found(iata))?;
        let now_ms = Utc::now().timestamp_millis();
        cell.write().merge(kind, sample, now_ms);

        debug!(iata, %kind, mean = sample.mean, "Merged sample");
        Ok(())
    }

    /// Point-in-time copy of every stored snapshot
    #[must_use]
    pub fn list_snapshots(&self) -> Vec<WeatherSnapshot> {
        self.cells()
            .into_iter()
            .map(|cell| cell.read().clone())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    // Clones the handle so the map shard is released before the snapshot lock is taken
    fn cell(&self, iata: &str) -> Option<SnapshotCell> {
        self.snapshots.get(iata).map(|entry| Arc::clone(entry.value()))
    }

    fn cells(&self) -> Vec<SnapshotCell> {
        self.snapshots
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }
}
