//! Service health report
//!
//! Combines data freshness from the atmospheric store with the request
//! frequency counters. Radii are bucketed by truncated division by ten, so
//! bucket `i` counts requests with `10 * i <= radius < 10 * (i + 1)`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::HealthConfig;
use crate::frequency::FrequencyTracker;
use crate::registry::AirportRegistry;
use crate::store::AtmosphericStore;

/// Width of one radius histogram bucket in kilometers
pub const RADIUS_BUCKET_WIDTH_KM: f64 = 10.0;

/// Health and usage statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Airports holding data updated within the freshness window
    #[serde(rename = "datasize")]
    pub fresh_data_count: usize,
    /// Share of all airport requests per registered airport
    #[serde(rename = "iata_freq")]
    pub request_fraction_by_airport: BTreeMap<String, f64>,
    /// Request counts per radius bucket
    #[serde(rename = "radius_freq")]
    pub radius_histogram: Vec<u64>,
}

impl HealthReport {
    /// Build the report as of `now_ms` (milliseconds since the Unix epoch)
    #[must_use]
    pub fn build(
        registry: &AirportRegistry,
        store: &AtmosphericStore,
        frequency: &FrequencyTracker,
        config: &HealthConfig,
        now_ms: i64,
    ) -> Self {
        let cutoff = now_ms.saturating_sub(config.freshness_window_ms);
        let fresh_data_count = store
            .list_snapshots()
            .iter()
            .filter(|snapshot| snapshot.is_fresh(cutoff))
            .count();

        let total = frequency.total_airport_requests();
        let request_fraction_by_airport = registry
            .list_identifiers()
            .into_iter()
            .map(|iata| {
                let fraction = if total > 0 {
                    frequency.airport_request_count(&iata) as f64 / total as f64
                } else {
                    0.0
                };
                (iata, fraction)
            })
            .collect();

        let radius_histogram = radius_histogram(&frequency.radius_counts(), config.histogram_buckets);

        Self {
            fresh_data_count,
            request_fraction_by_airport,
            radius_histogram,
        }
    }
}

/// Histogram bucket for a radius
#[must_use]
pub fn radius_bucket(radius_km: f64) -> usize {
    // float-to-int casts saturate; negative and NaN radii land in bucket 0
    (radius_km / RADIUS_BUCKET_WIDTH_KM).trunc() as usize
}

/// Sum request counts per bucket. The histogram is as long as the highest
/// occupied bucket, capped at `max_buckets`.
#[must_use]
pub fn radius_histogram(counts: &[(f64, u64)], max_buckets: usize) -> Vec<u64> {
    let Some(highest) = counts.iter().map(|(radius, _)| radius_bucket(*radius)).max() else {
        return Vec::new();
    };
    if max_buckets == 0 {
        return Vec::new();
    }

    let len = highest.saturating_add(1).min(max_buckets);
    let mut histogram = vec![0; len];
    for (radius, count) in counts {
        let bucket = radius_bucket(*radius).min(len - 1);
        histogram[bucket] += count;
    }
    histogram
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AirportRecord, MeasurementKind, MeasurementSample};
    use chrono::Utc;
    use std::sync::Arc;

    struct Fixture {
        registry: Arc<AirportRegistry>,
        store: AtmosphericStore,
        frequency: FrequencyTracker,
    }

    fn fixture(codes: &[&str]) -> Fixture {
        let registry = Arc::new(AirportRegistry::new());
        let store = AtmosphericStore::new(Arc::clone(&registry));
        for code in codes {
            registry.add(AirportRecord::new(*code, 40.0, -73.0).unwrap());
            store.register(code);
        }
        Fixture {
            registry,
            store,
            frequency: FrequencyTracker::new(),
        }
    }

    impl Fixture {
        fn report_at(&self, now_ms: i64) -> HealthReport {
            HealthReport::build(
                &self.registry,
                &self.store,
                &self.frequency,
                &HealthConfig::default(),
                now_ms,
            )
        }
    }

    #[test]
    fn test_radius_bucket() {
        assert_eq!(radius_bucket(0.0), 0);
        assert_eq!(radius_bucket(9.99), 0);
        assert_eq!(radius_bucket(10.0), 1);
        assert_eq!(radius_bucket(255.5), 25);
    }

    #[test]
    fn test_radius_histogram() {
        let histogram = radius_histogram(&[(0.0, 2), (5.0, 1), (25.0, 4)], 100);
        assert_eq!(histogram, vec![3, 0, 4]);
    }

    #[test]
    fn test_radius_histogram_caps_length() {
        let histogram = radius_histogram(&[(15.0, 1), (5_000.0, 2), (900.0, 3)], 10);
        assert_eq!(histogram.len(), 10);
        assert_eq!(histogram[1], 1);
        assert_eq!(histogram[9], 5);
    }

    #[test]
    fn test_radius_histogram_empty() {
        assert!(radius_histogram(&[], 100).is_empty());
    }

    #[test]
    fn test_fresh_data_count() {
        let fixture = fixture(&["BOS", "EWR", "JFK"]);
        fixture
            .store
            .update("BOS", MeasurementKind::Wind, MeasurementSample::new(22.0, 10, 20, 30, 10))
            .unwrap();

        let now = Utc::now().timestamp_millis();
        assert_eq!(fixture.report_at(now).fresh_data_count, 1);
        // a day later the reading is stale
        assert_eq!(fixture.report_at(now + 86_400_000 + 1_000).fresh_data_count, 0);
    }

    #[test]
    fn test_request_fractions_cover_registered_airports() {
        let fixture = fixture(&["BOS", "JFK"]);
        let report = fixture.report_at(0);
        assert_eq!(report.request_fraction_by_airport.len(), 2);
        assert!(report.request_fraction_by_airport.values().all(|f| *f == 0.0));

        fixture.frequency.record_airport_request("BOS");
        fixture.frequency.record_airport_request("BOS");
        fixture.frequency.record_airport_request("BOS");
        fixture.frequency.record_airport_request("JFK");
        // unknown airports count towards the total but are not listed
        fixture.frequency.record_airport_request("ZZZ");

        let report = fixture.report_at(0);
        assert_eq!(report.request_fraction_by_airport["BOS"], 0.6);
        assert_eq!(report.request_fraction_by_airport["JFK"], 0.2);
        assert!(!report.request_fraction_by_airport.contains_key("ZZZ"));
    }

    #[test]
    fn test_report_serialization() {
        let fixture = fixture(&["BOS"]);
        fixture.frequency.record_airport_request("BOS");
        fixture.frequency.record_radius_request(12.0);

        let json = serde_json::to_value(fixture.report_at(0)).unwrap();
        assert_eq!(json["datasize"], 0);
        assert_eq!(json["iata_freq"]["BOS"], 1.0);
        assert_eq!(json["radius_freq"], serde_json::json!([0, 1]));
    }
}
