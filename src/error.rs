//! Error types and handling for the airport weather service

use thiserror::Error;

/// Main error type for the airport weather service
#[derive(Error, Debug)]
pub enum WeatherError {
    /// The airport identifier is not registered
    #[error("Airport not found: {iata}")]
    NotFound { iata: String },

    /// A measurement failed the physical plausibility checks
    #[error("Invalid sample for {kind}: {message}")]
    InvalidSample { kind: String, message: String },

    /// A query argument is out of range (e.g. a negative radius)
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// An airport record could not be constructed
    #[error("Invalid airport: {message}")]
    InvalidAirport { message: String },

    /// The airport is already registered and the duplicate policy rejects it
    #[error("Airport already registered: {iata}")]
    DuplicateAirport { iata: String },

    /// A loader row could not be parsed
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherError {
    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(iata: S) -> Self {
        Self::NotFound { iata: iata.into() }
    }

    /// Create a new invalid-sample error
    pub fn invalid_sample<K: ToString, S: Into<String>>(kind: K, message: S) -> Self {
        Self::InvalidSample {
            kind: kind.to_string(),
            message: message.into(),
        }
    }

    /// Create a new invalid-argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new invalid-airport error
    pub fn invalid_airport<S: Into<String>>(message: S) -> Self {
        Self::InvalidAirport {
            message: message.into(),
        }
    }

    /// Create a new duplicate-airport error
    pub fn duplicate_airport<S: Into<String>>(iata: S) -> Self {
        Self::DuplicateAirport { iata: iata.into() }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::NotFound { iata } => format!("Airport {iata} not found"),
            WeatherError::InvalidSample { kind, message } => {
                format!("Invalid {kind} data point: {message}")
            }
            WeatherError::InvalidArgument { message }
            | WeatherError::InvalidAirport { message } => message.clone(),
            WeatherError::DuplicateAirport { iata } => {
                format!("Airport {iata} is already registered")
            }
            WeatherError::Parse { message } => format!("Malformed input: {message}"),
            WeatherError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            WeatherError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
