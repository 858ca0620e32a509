//! Measurement kinds and samples reported by airport weather collectors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::WeatherError;

/// The physical quantity a sample describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    Wind,
    Temperature,
    Humidity,
    Pressure,
    #[serde(rename = "cloudcover")]
    CloudCover,
    Precipitation,
}

impl MeasurementKind {
    pub const ALL: [MeasurementKind; 6] = [
        MeasurementKind::Wind,
        MeasurementKind::Temperature,
        MeasurementKind::Humidity,
        MeasurementKind::Pressure,
        MeasurementKind::CloudCover,
        MeasurementKind::Precipitation,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MeasurementKind::Wind => "wind",
            MeasurementKind::Temperature => "temperature",
            MeasurementKind::Humidity => "humidity",
            MeasurementKind::Pressure => "pressure",
            MeasurementKind::CloudCover => "cloudcover",
            MeasurementKind::Precipitation => "precipitation",
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementKind {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wind" => Ok(MeasurementKind::Wind),
            "temperature" => Ok(MeasurementKind::Temperature),
            // collectors still send the old misspelled name
            "humidity" | "humidty" => Ok(MeasurementKind::Humidity),
            "pressure" => Ok(MeasurementKind::Pressure),
            "cloudcover" | "cloud-cover" | "cloud_cover" => Ok(MeasurementKind::CloudCover),
            "precipitation" => Ok(MeasurementKind::Precipitation),
            other => Err(WeatherError::invalid_argument(format!(
                "unknown measurement kind '{other}', expected one of: {}",
                MeasurementKind::ALL
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

/// One aggregated observation of a physical quantity.
///
/// On the wire the three markers are `first`, `second` and `third`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSample {
    /// Mean value of the underlying observations
    pub mean: f64,
    /// First quartile
    #[serde(rename = "first", alias = "low")]
    pub low: i64,
    /// Second quartile (median)
    #[serde(rename = "second", alias = "median")]
    pub median: i64,
    /// Third quartile
    #[serde(rename = "third", alias = "high")]
    pub high: i64,
    /// Number of underlying observations
    pub count: i64,
}

impl MeasurementSample {
    #[must_use]
    pub fn new(mean: f64, low: i64, median: i64, high: i64, count: i64) -> Self {
        Self {
            mean,
            low,
            median,
            high,
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing_is_case_insensitive() {
        assert_eq!("WIND".parse::<MeasurementKind>().unwrap(), MeasurementKind::Wind);
        assert_eq!(
            "CloudCover".parse::<MeasurementKind>().unwrap(),
            MeasurementKind::CloudCover
        );
        assert_eq!(
            "humidty".parse::<MeasurementKind>().unwrap(),
            MeasurementKind::Humidity
        );
    }

    #[test]
    fn test_unknown_kind_lists_alternatives() {
        let err = "fog".parse::<MeasurementKind>().unwrap_err();
        assert!(err.to_string().contains("precipitation"));
    }

    #[test]
    fn test_sample_wire_format() {
        let sample: MeasurementSample = serde_json::from_str(
            r#"{"mean": 22.0, "first": 10, "second": 20, "third": 30, "count": 10}"#,
        )
        .unwrap();
        assert_eq!(sample, MeasurementSample::new(22.0, 10, 20, 30, 10));

        let json = serde_json::to_value(sample).unwrap();
        assert_eq!(json["second"], 20);
    }

    #[test]
    fn test_sample_accepts_quantile_aliases() {
        let sample: MeasurementSample = serde_json::from_str(
            r#"{"mean": 1.5, "low": 1, "median": 2, "high": 3, "count": 4}"#,
        )
        .unwrap();
        assert_eq!(sample.median, 2);
        assert_eq!(sample.count, 4);
    }
}
