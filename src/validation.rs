//! Physical plausibility checks for measurement samples
//!
//! Every kind has a fixed range for the sample mean (inclusive lower,
//! exclusive upper). Independently of the kind, the quartile markers and the
//! observation count must not be negative.

use std::fmt;
use std::ops::{Bound, RangeBounds};

use crate::models::{MeasurementKind, MeasurementSample};

/// A single failed check on a sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Wire name of the offending field
    pub field: &'static str,
    pub reason: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Accepted range of the mean for a measurement kind
#[must_use]
pub fn mean_bounds(kind: MeasurementKind) -> (Bound<f64>, Bound<f64>) {
    match kind {
        MeasurementKind::Wind => (Bound::Included(0.0), Bound::Unbounded),
        MeasurementKind::Temperature => (Bound::Included(-50.0), Bound::Excluded(100.0)),
        MeasurementKind::Pressure => (Bound::Included(650.0), Bound::Excluded(800.0)),
        MeasurementKind::Humidity
        | MeasurementKind::CloudCover
        | MeasurementKind::Precipitation => (Bound::Included(0.0), Bound::Excluded(100.0)),
    }
}

fn describe_bounds(bounds: (Bound<f64>, Bound<f64>)) -> String {
    match bounds {
        (Bound::Included(low), Bound::Unbounded) => format!("greater than or equal to {low}"),
        (Bound::Included(low), Bound::Excluded(high)) => {
            format!("at least {low} and below {high}")
        }
        (low, high) => format!("within {low:?}..{high:?}"),
    }
}

/// All checks the sample fails for the given kind; empty when the sample is valid
#[must_use]
pub fn violations(kind: MeasurementKind, sample: &MeasurementSample) -> Vec<Violation> {
    let mut violations = Vec::new();

    let bounds = mean_bounds(kind);
    if !sample.mean.is_finite() || !bounds.contains(&sample.mean) {
        violations.push(Violation {
            field: "mean",
            reason: format!(
                "{} mean must be a decimal number {}",
                kind,
                describe_bounds(bounds)
            ),
        });
    }

    let markers = [
        ("first", sample.low),
        ("second", sample.median),
        ("third", sample.high),
        ("count", sample.count),
    ];
    for (field, value) in markers {
        if value < 0 {
            violations.push(Violation {
                field,
                reason: format!("must be an integer greater than or equal to 0, got {value}"),
            });
        }
    }

    violations
}

/// Whether a sample is physically plausible for its kind
#[must_use]
pub fn is_valid(kind: MeasurementKind, sample: &MeasurementSample) -> bool {
    violations(kind, sample).is_empty()
}
