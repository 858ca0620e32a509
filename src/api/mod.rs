//! HTTP routes
//!
//! `/collect` receives airports and measurements, `/query` answers weather
//! and health requests. Path segments are checked here before anything
//! reaches the [`WeatherService`].

mod error;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use tracing::debug;

use crate::health::HealthReport;
use crate::models::{AirportRecord, MeasurementKind, MeasurementSample, WeatherSnapshot};
use crate::service::WeatherService;
use crate::{Result, WeatherError};

pub fn router(service: WeatherService) -> Router {
    Router::new()
        .route("/collect/ping", get(collect_ping))
        .route("/collect/weather/{iata}/{kind}", post(update_weather))
        .route("/collect/airports", get(list_airports))
        .route("/collect/airport/{iata}", get(get_airport).delete(delete_airport))
        .route("/collect/airport/{iata}/{lat}/{long}", post(add_airport))
        .route("/query/ping", get(query_ping))
        .route("/query/weather/{iata}/{radius}", get(query_weather))
        .with_state(service)
}

/// Accept only three upper-case ASCII letters
pub fn validate_iata(iata: &str) -> Result<()> {
    if iata.len() == 3 && iata.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(WeatherError::invalid_argument(format!(
            "'{iata}' is not a valid IATA code, expected three upper-case letters"
        )))
    }
}

fn parse_decimal(name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse()
        .map_err(|_| WeatherError::invalid_argument(format!("{name} '{raw}' is not a decimal number")))
}

async fn collect_ping() -> &'static str {
    "ready"
}

async fn update_weather(
    State(service): State<WeatherService>,
    Path((iata, kind)): Path<(String, String)>,
    body: String,
) -> Result<StatusCode> {
    validate_iata(&iata)?;
    let kind: MeasurementKind = kind.parse()?;
    let sample: MeasurementSample = serde_json::from_str(&body)
        .map_err(|e| WeatherError::parse(format!("sample body: {e}")))?;

    service.submit_measurement(&iata, kind, sample)?;
    Ok(StatusCode::OK)
}

async fn list_airports(State(service): State<WeatherService>) -> Json<Vec<String>> {
    let mut codes = service.list_airport_codes();
    codes.sort();
    Json(codes)
}

async fn get_airport(
    State(service): State<WeatherService>,
    Path(iata): Path<String>,
) -> Result<Json<AirportRecord>> {
    validate_iata(&iata)?;
    service
        .get_airport(&iata)
        .map(Json)
        .ok_or_else(|| WeatherError::not_found(iata))
}

async fn add_airport(
    State(service): State<WeatherService>,
    Path((iata, lat, long)): Path<(String, String, String)>,
) -> Result<(StatusCode, Json<AirportRecord>)> {
    validate_iata(&iata)?;
    let latitude = parse_decimal("latitude", &lat)?;
    let longitude = parse_decimal("longitude", &long)?;

    let record = service.add_airport(AirportRecord::new(iata, latitude, longitude)?)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn delete_airport(
    State(service): State<WeatherService>,
    Path(iata): Path<String>,
) -> Result<Json<AirportRecord>> {
    validate_iata(&iata)?;
    Ok(Json(service.remove_airport(&iata)?))
}

async fn query_ping(State(service): State<WeatherService>) -> Json<HealthReport> {
    Json(service.health_report())
}

async fn query_weather(
    State(service): State<WeatherService>,
    Path((iata, radius)): Path<(String, String)>,
) -> Result<Json<Vec<WeatherSnapshot>>> {
    validate_iata(&iata)?;
    let radius = parse_decimal("radius", &radius)?;

    let snapshots = service.query_weather(&iata, radius)?;
    debug!(iata = %iata, radius, count = snapshots.len(), "Weather query served");
    Ok(Json(snapshots))
}
