//! Bulk airport loader
//!
//! Reads the comma-separated airport dataset (row id, name, city, country,
//! IATA, ICAO, latitude, longitude, altitude, UTC offset, DST) and registers
//! every usable row with the service. Malformed rows are skipped, not fatal.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{info, warn};

use crate::models::{AirportRecord, Dst};
use crate::service::WeatherService;
use crate::{Result, WeatherError};

const NAME_IDX: usize = 1;
const CITY_IDX: usize = 2;
const COUNTRY_IDX: usize = 3;
const IATA_IDX: usize = 4;
const ICAO_IDX: usize = 5;
const LATITUDE_IDX: usize = 6;
const LONGITUDE_IDX: usize = 7;
const ALTITUDE_IDX: usize = 8;
const TIMEZONE_IDX: usize = 9;
const DST_IDX: usize = 10;

/// Outcome of a bulk load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: usize,
}

/// Loads airport rows into a [`WeatherService`]
pub struct AirportLoader<'a> {
    service: &'a WeatherService,
}

impl<'a> AirportLoader<'a> {
    #[must_use]
    pub fn new(service: &'a WeatherService) -> Self {
        Self { service }
    }

    /// Load every row of the file at `path`
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<LoadSummary> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let summary = self.load_reader(file)?;
        info!(
            path = %path.display(),
            loaded = summary.loaded,
            skipped = summary.skipped,
            "Airport dataset loaded"
        );
        Ok(summary)
    }

    /// Load every row readable from `reader`
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<LoadSummary> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut summary = LoadSummary::default();
        for (line, row) in csv_reader.records().enumerate() {
            let line = line + 1;
            let record = row
                .map_err(|e| WeatherError::parse(e.to_string()))
                .and_then(|row| parse_record(&row));

            match record.and_then(|record| self.service.add_airport(record)) {
                Ok(_) => summary.loaded += 1,
                Err(e) => {
                    warn!(line, error = %e, "Skipping airport row");
                    summary.skipped += 1;
                }
            }
        }
        Ok(summary)
    }
}

/// Convenience wrapper around [`AirportLoader::load_file`]
pub fn load_file<P: AsRef<Path>>(path: P, service: &WeatherService) -> Result<LoadSummary> {
    AirportLoader::new(service).load_file(path)
}

/// Build an airport record from one dataset row
pub fn parse_record(row: &StringRecord) -> Result<AirportRecord> {
    let iata = field(row, IATA_IDX)
        .ok_or_else(|| WeatherError::parse("missing IATA code"))?;
    let latitude = required_number(row, LATITUDE_IDX, "latitude")?;
    let longitude = required_number(row, LONGITUDE_IDX, "longitude")?;

    let mut record = AirportRecord::new(iata, latitude, longitude)?;
    record.name = field(row, NAME_IDX).map(str::to_string);
    record.city = field(row, CITY_IDX).map(str::to_string);
    record.country = field(row, COUNTRY_IDX).map(str::to_string);
    record.icao = field(row, ICAO_IDX).map(str::to_string);
    record.altitude = optional_number(row, ALTITUDE_IDX);
    record.timezone = optional_number(row, TIMEZONE_IDX);
    record.dst = field(row, DST_IDX)
        .and_then(|code| code.chars().next())
        .map(Dst::from_code);

    Ok(record)
}

/// Trim a field and drop one quote character from each end
#[must_use]
pub fn remove_quotes(value: &str) -> &str {
    let value = value.trim();
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

fn field(row: &StringRecord, index: usize) -> Option<&str> {
    row.get(index)
        .map(remove_quotes)
        .filter(|value| !value.is_empty())
}

fn required_number(row: &StringRecord, index: usize, name: &str) -> Result<f64> {
    let raw = field(row, index).ok_or_else(|| WeatherError::parse(format!("missing {name}")))?;
    raw.parse()
        .map_err(|_| WeatherError::parse(format!("{name} '{raw}' is not a decimal number")))
}

fn optional_number(row: &StringRecord, index: usize) -> Option<f64> {
    field(row, index).and_then(|raw| raw.parse().ok())
}
