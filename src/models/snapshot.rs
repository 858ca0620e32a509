//! Latest weather per airport

use serde::{Deserialize, Serialize};

use super::{MeasurementKind, MeasurementSample};

/// One optional sample per measurement kind plus the time of the last change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub wind: Option<MeasurementSample>,
    pub temperature: Option<MeasurementSample>,
    pub humidity: Option<MeasurementSample>,
    pub pressure: Option<MeasurementSample>,
    pub cloud_cover: Option<MeasurementSample>,
    pub precipitation: Option<MeasurementSample>,
    /// Milliseconds since the Unix epoch; 0 when nothing was ever recorded
    pub last_update_time: i64,
}

impl WeatherSnapshot {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no measurement slot is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        MeasurementKind::ALL.iter().all(|kind| self.sample(*kind).is_none())
    }

    #[must_use]
    pub fn sample(&self, kind: MeasurementKind) -> Option<&MeasurementSample> {
        match kind {
            MeasurementKind::Wind => self.wind.as_ref(),
            MeasurementKind::Temperature => self.temperature.as_ref(),
            MeasurementKind::Humidity => self.humidity.as_ref(),
            MeasurementKind::Pressure => self.pressure.as_ref(),
            MeasurementKind::CloudCover => self.cloud_cover.as_ref(),
            MeasurementKind::Precipitation => self.precipitation.as_ref(),
        }
    }

    /// Replace a single slot and stamp the snapshot. Other slots are untouched.
    pub fn merge(&mut self, kind: MeasurementKind, sample: MeasurementSample, now_ms: i64) {
        let slot = match kind {
            MeasurementKind::Wind => &mut self.wind,
            MeasurementKind::Temperature => &mut self.temperature,
            MeasurementKind::Humidity => &mut self.humidity,
            MeasurementKind::Pressure => &mut self.pressure,
            MeasurementKind::CloudCover => &mut self.cloud_cover,
            MeasurementKind::Precipitation => &mut self.precipitation,
        };
        *slot = Some(sample);
        self.last_update_time = now_ms;
    }

    /// Builder-style variant of [`WeatherSnapshot::merge`]
    #[must_use]
    pub fn with_sample(mut self, kind: MeasurementKind, sample: MeasurementSample, now_ms: i64) -> Self {
        self.merge(kind, sample, now_ms);
        self
    }

    /// Whether the snapshot holds data updated after `cutoff_ms`
    #[must_use]
    pub fn is_fresh(&self, cutoff_ms: i64) -> bool {
        !self.is_empty() && self.last_update_time > cutoff_ms
    }
}
