//! Airport model: identifier, coordinates and descriptive metadata

use serde::{Deserialize, Serialize};

use crate::{Result, WeatherError};

/// Geographic coordinates in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Daylight saving time zone category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dst {
    Europe,
    UsCanada,
    SouthAmerica,
    Australia,
    NewZealand,
    None,
    Unknown,
}

impl Dst {
    /// Map the single-letter dataset code to a category; unrecognized letters are `Unknown`
    #[must_use]
    pub fn from_code(code: char) -> Self {
        match code.to_ascii_uppercase() {
            'E' => Dst::Europe,
            'A' => Dst::UsCanada,
            'S' => Dst::SouthAmerica,
            'O' => Dst::Australia,
            'Z' => Dst::NewZealand,
            'N' => Dst::None,
            _ => Dst::Unknown,
        }
    }

    #[must_use]
    pub fn code(self) -> char {
        match self {
            Dst::Europe => 'E',
            Dst::UsCanada => 'A',
            Dst::SouthAmerica => 'S',
            Dst::Australia => 'O',
            Dst::NewZealand => 'Z',
            Dst::None => 'N',
            Dst::Unknown => 'U',
        }
    }
}

/// Basic airport information, keyed by IATA code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    /// Three letter IATA code
    pub iata: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Full name of the airport
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Main city served by the airport
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Country or territory where the airport is located
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Four letter ICAO code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icao: Option<String>,
    /// Altitude in feet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// Hours offset from UTC, fractional hours as decimals (India is 5.5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst: Option<Dst>,
}

impl AirportRecord {
    /// Create an airport record with the mandatory fields.
    ///
    /// Rejects a blank identifier, non-finite coordinates and coordinates
    /// outside the valid latitude/longitude ranges.
    pub fn new<S: Into<String>>(iata: S, latitude: f64, longitude: f64) -> Result<Self> {
        let iata = iata.into().trim().to_string();
        if iata.is_empty() {
            return Err(WeatherError::invalid_airport(
                "iata, latitude and longitude are mandatory",
            ));
        }
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(WeatherError::invalid_airport(format!(
                "latitude {latitude} for {iata} is outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::invalid_airport(format!(
                "longitude {longitude} for {iata} is outside [-180, 180]"
            )));
        }

        Ok(Self {
            iata,
            latitude,
            longitude,
            name: None,
            city: None,
            country: None,
            icao: None,
            altitude: None,
            timezone: None,
            dst: None,
        })
    }

    #[must_use]
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_city<S: Into<String>>(mut self, city: S) -> Self {
        self.city = Some(city.into());
        self
    }

    #[must_use]
    pub fn with_country<S: Into<String>>(mut self, country: S) -> Self {
        self.country = Some(country.into());
        self
    }

    #[must_use]
    pub fn with_icao<S: Into<String>>(mut self, icao: S) -> Self {
        self.icao = Some(icao.into());
        self
    }

    #[must_use]
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: f64) -> Self {
        self.timezone = Some(timezone);
        self
    }

    #[must_use]
    pub fn with_dst(mut self, dst: Dst) -> Self {
        self.dst = Some(dst);
        self
    }

    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}
