//! Request frequency counters
//!
//! Two independently sharded maps count weather queries per airport and per
//! queried radius. Counters are created on first use and incremented
//! atomically, so concurrent callers never lose an update.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

/// Map key for a radius; `-0.0` and `0.0` share one counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RadiusKey(u64);

impl RadiusKey {
    fn new(radius: f64) -> Self {
        let radius = if radius == 0.0 { 0.0 } else { radius };
        Self(radius.to_bits())
    }

    fn radius(self) -> f64 {
        f64::from_bits(self.0)
    }
}

/// Request volume per airport and per radius
#[derive(Debug, Default)]
pub struct FrequencyTracker {
    airports: DashMap<String, AtomicU64>,
    radii: DashMap<RadiusKey, AtomicU64>,
}

impl FrequencyTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_airport_request(&self, iata: &str) {
        if let Some(counter) = self.airports.get(iata) {
            counter.fetch_add(1, Ordering::Relaxed);
            return;
        }
        self.airports
            .entry(iata.to_string())
            .or_default()
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_radius_request(&self, radius: f64) {
        let key = RadiusKey::new(radius);
        if let Some(counter) = self.radii.get(&key) {
            counter.fetch_add(1, Ordering::Relaxed);
            return;
        }
        self.radii
            .entry(key)
            .or_default()
            .fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn airport_request_count(&self, iata: &str) -> u64 {
        self.airports
            .get(iata)
            .map_or(0, |counter| counter.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn radius_request_count(&self, radius: f64) -> u64 {
        self.radii
            .get(&RadiusKey::new(radius))
            .map_or(0, |counter| counter.load(Ordering::Relaxed))
    }

    /// Sum of all per-airport counters
    #[must_use]
    pub fn total_airport_requests(&self) -> u64 {
        self.airports
            .iter()
            .map(|entry| entry.value().load(Ordering::Relaxed))
            .sum()
    }

    /// Every recorded radius with its request count
    #[must_use]
    pub fn radius_counts(&self) -> Vec<(f64, u64)> {
        self.radii
            .iter()
            .map(|entry| (entry.key().radius(), entry.value().load(Ordering::Relaxed)))
            .collect()
    }

    /// Drop an airport's counter. Radius counters are kept.
    pub fn remove_airport(&self, iata: &str) {
        self.airports.remove(iata);
    }
}
