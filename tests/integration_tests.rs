//! End-to-end tests for the airport weather service
//!
//! Router tests drive the axum app through `tower::ServiceExt::oneshot`
//! without binding a socket.

use airport_weather::{
    AirportRecord, MeasurementKind, MeasurementSample, WeatherError, WeatherService, distance_km,
    web,
};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

const BOS: (&str, f64, f64) = ("BOS", 42.364_347, -71.005_181);
const EWR: (&str, f64, f64) = ("EWR", 40.6925, -74.168_667);
const JFK: (&str, f64, f64) = ("JFK", 40.639_751, -73.778_925);
const LGA: (&str, f64, f64) = ("LGA", 40.777_245, -73.872_608);
const MMU: (&str, f64, f64) = ("MMU", 40.799_35, -74.414_874_7);

fn seeded_service() -> WeatherService {
    let service = WeatherService::default();
    for (iata, latitude, longitude) in [BOS, EWR, JFK, LGA, MMU] {
        service
            .add_airport(AirportRecord::new(iata, latitude, longitude).unwrap())
            .unwrap();
    }
    service
}

fn wind() -> MeasurementSample {
    MeasurementSample::new(22.0, 10, 20, 30, 10)
}

fn plausible(kind: MeasurementKind) -> MeasurementSample {
    let mean = match kind {
        MeasurementKind::Pressure => 700.0,
        _ => 50.0,
    };
    MeasurementSample::new(mean, 1, 2, 3, 4)
}

async fn send(service: &WeatherService, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let response = web::app(service.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, json)
}

#[tokio::test]
async fn test_collect_ping() {
    let service = seeded_service();
    let (status, body) = send(&service, Method::GET, "/collect/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ready".into()));
}

#[tokio::test]
async fn test_airport_lifecycle() {
    let service = WeatherService::default();

    let (status, body) = send(&service, Method::POST, "/collect/airport/BOS/42.364347/-71.005181", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["iata"], "BOS");
    assert_eq!(body["latitude"], 42.364_347);

    let (status, body) = send(&service, Method::GET, "/collect/airports", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!(["BOS"]));

    let (status, body) = send(&service, Method::GET, "/collect/airport/BOS", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["longitude"], -71.005_181);

    let (status, _) = send(&service, Method::DELETE, "/collect/airport/BOS", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&service, Method::GET, "/collect/airport/BOS", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);

    let (status, _) = send(&service, Method::DELETE, "/collect/airport/BOS", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_airport_rejects_bad_input() {
    let service = WeatherService::default();

    for uri in [
        "/collect/airport/bos/42.0/-71.0",
        "/collect/airport/BOST/42.0/-71.0",
        "/collect/airport/BOS/north/-71.0",
        "/collect/airport/BOS/95.0/-71.0",
    ] {
        let (status, body) = send(&service, Method::POST, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["status"], 400);
        assert!(body["error"].is_string());
    }
    assert!(service.list_airports().is_empty());
}

#[tokio::test]
async fn test_submit_and_query_weather() {
    let service = seeded_service();
    let sample = r#"{"mean": 22.0, "first": 10, "second": 20, "third": 30, "count": 10}"#;

    let (status, _) = send(&service, Method::POST, "/collect/weather/BOS/wind", Some(sample)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&service, Method::GET, "/query/weather/BOS/0", None).await;
    assert_eq!(status, StatusCode::OK);
    let snapshots = body.as_array().unwrap();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0]["wind"]["mean"], 22.0);
    assert_eq!(snapshots[0]["wind"]["third"], 30);
    assert!(snapshots[0]["lastUpdateTime"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_submit_weather_errors() {
    let service = seeded_service();
    let valid = r#"{"mean": 22.0, "first": 10, "second": 20, "third": 30, "count": 10}"#;
    let low_pressure = r#"{"mean": 400.0, "first": 10, "second": 20, "third": 30, "count": 10}"#;

    let (status, _) = send(&service, Method::POST, "/collect/weather/ZZZ/wind", Some(valid)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&service, Method::POST, "/collect/weather/BOS/fog", Some(valid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&service, Method::POST, "/collect/weather/BOS/wind", Some("not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&service, Method::POST, "/collect/weather/BOS/pressure", Some(low_pressure)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(service.latest_weather("BOS").is_empty());
}

#[tokio::test]
async fn test_query_weather_errors() {
    let service = seeded_service();

    let (status, _) = send(&service, Method::GET, "/query/weather/BOS/-5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&service, Method::GET, "/query/weather/BOS/wide", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&service, Method::GET, "/query/weather/ZZZ/10", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_query_ping_reports_health() {
    let service = seeded_service();
    service.submit_measurement("BOS", MeasurementKind::Wind, wind()).unwrap();
    service.query_weather("BOS", 0.0).unwrap();
    service.query_weather("JFK", 25.0).unwrap();

    let (status, body) = send(&service, Method::GET, "/query/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["datasize"], 1);
    assert_eq!(body["iata_freq"]["BOS"], 0.5);
    assert_eq!(body["iata_freq"]["MMU"], 0.0);
    assert_eq!(body["iata_freq"].as_object().unwrap().len(), 5);
    assert_eq!(body["radius_freq"], serde_json::json!([1, 0, 1]));
}

#[test]
fn test_new_york_radius_scenario() {
    let service = seeded_service();
    let jfk = AirportRecord::new(JFK.0, JFK.1, JFK.2).unwrap().coordinates();
    let bos = AirportRecord::new(BOS.0, BOS.1, BOS.2).unwrap().coordinates();
    let radius = distance_km(&jfk, &bos) + 1.0;

    // BOS has no data yet
    assert!(service.query_weather("JFK", radius).unwrap().is_empty());

    service.submit_measurement("BOS", MeasurementKind::Wind, wind()).unwrap();
    assert_eq!(service.health_report().fresh_data_count, 1);

    let result = service.query_weather("JFK", radius).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].wind, Some(wind()));

    // just short of Boston
    assert!(service.query_weather("JFK", radius - 2.0).unwrap().is_empty());
}

#[test]
fn test_rejected_sample_leaves_point_query_unchanged() {
    let service = seeded_service();
    service.submit_measurement("EWR", MeasurementKind::Temperature, MeasurementSample::new(20.0, 1, 2, 3, 4)).unwrap();
    let before = service.query_weather("EWR", 0.0).unwrap();

    for (kind, mean) in [
        (MeasurementKind::Wind, -1.0),
        (MeasurementKind::Temperature, 100.0),
        (MeasurementKind::Humidity, 100.0),
        (MeasurementKind::Pressure, 649.9),
        (MeasurementKind::CloudCover, 101.0),
        (MeasurementKind::Precipitation, 100.0),
    ] {
        let result = service.submit_measurement("EWR", kind, MeasurementSample::new(mean, 1, 2, 3, 4));
        assert!(matches!(result, Err(WeatherError::InvalidSample { .. })), "{kind}");
    }

    assert_eq!(service.query_weather("EWR", 0.0).unwrap(), before);
}

#[test]
fn test_concurrent_kinds_all_merge() {
    let service = seeded_service();

    for _ in 0..100 {
        service.add_airport(AirportRecord::new(LGA.0, LGA.1, LGA.2).unwrap()).unwrap();

        std::thread::scope(|scope| {
            for kind in MeasurementKind::ALL {
                let service = service.clone();
                scope.spawn(move || {
                    service.submit_measurement("LGA", kind, plausible(kind)).unwrap();
                });
            }
        });

        let snapshot = service.query_weather("LGA", 0.0).unwrap().remove(0);
        for kind in MeasurementKind::ALL {
            assert_eq!(snapshot.sample(kind), Some(&plausible(kind)), "{kind} missing");
        }
    }
}

#[test]
fn test_removed_airport_disappears() {
    let service = seeded_service();
    service.submit_measurement("MMU", MeasurementKind::Wind, wind()).unwrap();
    service.remove_airport("MMU").unwrap();

    assert!(matches!(
        service.query_weather("MMU", 0.0),
        Err(WeatherError::NotFound { .. })
    ));
    assert!(service.list_airports().iter().all(|a| a.iata != "MMU"));
    assert!(
        service
            .query_weather("EWR", 100.0)
            .unwrap()
            .iter()
            .all(|s| s.wind != Some(wind()))
    );
}
