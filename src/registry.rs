//! Airport registry
//!
//! Concurrent map from IATA code to airport metadata. The registry is the only
//! place where identifier uniqueness is enforced.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, info};

use crate::models::AirportRecord;
use crate::{Result, WeatherError};

/// Concurrent airport registry keyed by IATA code
#[derive(Debug, Default)]
pub struct AirportRegistry {
    airports: DashMap<String, AirportRecord>,
}

impl AirportRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record, returning the stored record
    pub fn add(&self, record: AirportRecord) -> AirportRecord {
        self.add_with(record, |_| {})
    }

    /// Insert or replace a record, running `on_insert` while the identifier's
    /// entry is held so dependent state changes together with the registry.
    ///
    /// `on_insert` must not call back into the registry.
    pub fn add_with<F>(&self, record: AirportRecord, on_insert: F) -> AirportRecord
    where
        F: FnOnce(&AirportRecord),
    {
        match self.airports.entry(record.iata.clone()) {
            Entry::Occupied(mut occupied) => {
                on_insert(&record);
                occupied.insert(record.clone());
                info!(iata = %record.iata, "Replaced airport");
            }
            Entry::Vacant(vacant) => {
                on_insert(&record);
                vacant.insert(record.clone());
                info!(iata = %record.iata, "Registered airport");
            }
        }
        record
    }

    /// Insert a record only if its identifier is not registered yet
    pub fn add_new_with<F>(&self, record: AirportRecord, on_insert: F) -> Result<AirportRecord>
    where
        F: FnOnce(&AirportRecord),
    {
        match self.airports.entry(record.iata.clone()) {
            Entry::Occupied(_) => Err(WeatherError::duplicate_airport(record.iata)),
            Entry::Vacant(vacant) => {
                on_insert(&record);
                vacant.insert(record.clone());
                info!(iata = %record.iata, "Registered airport");
                Ok(record)
            }
        }
    }

    /// Remove a record, failing with `NotFound` if it is absent
    pub fn remove(&self, iata: &str) -> Result<AirportRecord> {
        self.remove_with(iata, |_| {})
    }

    /// Remove a record, running `on_remove` while the identifier's entry is held.
    ///
    /// `on_remove` must not call back into the registry.
    pub fn remove_with<F>(&self, iata: &str, on_remove: F) -> Result<AirportRecord>
    where
        F: FnOnce(&AirportRecord),
    {
        match self.airports.entry(iata.to_string()) {
            Entry::Occupied(occupied) => {
                on_remove(occupied.get());
                let record = occupied.remove();
                info!(iata = %record.iata, "Removed airport");
                Ok(record)
            }
            Entry::Vacant(_) => {
                debug!(iata, "Remove requested for unknown airport");
                Err(WeatherError::not_found(iata))
            }
        }
    }

    #[must_use]
    pub fn get(&self, iata: &str) -> Option<AirportRecord> {
        self.airports.get(iata).map(|entry| entry.value().clone())
    }

    #[must_use]
    pub fn contains(&self, iata: &str) -> bool {
        self.airports.contains_key(iata)
    }

    /// Copy of all current records
    #[must_use]
    pub fn list(&self) -> Vec<AirportRecord> {
        self.airports
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Copy of all current identifiers
    #[must_use]
    pub fn list_identifiers(&self) -> Vec<String> {
        self.airports.iter().map(|entry| entry.key().clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}
