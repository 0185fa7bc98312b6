//! Integration tests for the geocoding client and weather provider
//! using wiremock.

use serde_json::json;
use userdeck_core::config::WeatherConfig;
use userdeck_weather::{Coordinates, GeocodingClient, GeocodingError, WeatherError, WeatherProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: &str) -> WeatherConfig {
    WeatherConfig {
        geocoding_base_url: base_url.to_string(),
        forecast_base_url: base_url.to_string(),
        request_timeout_secs: 5,
    }
}

fn geocoding_body(lat: f64, lng: f64) -> serde_json::Value {
    json!({
        "results": [
            { "latitude": lat, "longitude": lng, "name": "Oslo", "country": "Norway" }
        ]
    })
}

fn forecast_body(temperature: f64, humidity: f64, weather_code: i64) -> serde_json::Value {
    json!({
        "current": {
            "time": "2026-08-23T12:00",
            "temperature_2m": temperature,
            "relative_humidity_2m": humidity,
            "weather_code": weather_code
        }
    })
}

#[tokio::test]
async fn test_geocode_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Oslo, Norway"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoding_body(59.91, 10.75)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GeocodingClient::new(&test_config(&mock_server.uri())).unwrap();
    let coords = client.get_coordinates("Oslo, Norway").await.unwrap();

    assert!((coords.lat - 59.91).abs() < f64::EPSILON);
    assert!((coords.lng - 10.75).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_geocode_no_match_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = GeocodingClient::new(&test_config(&mock_server.uri())).unwrap();
    let err = client.get_coordinates("Nowhere, Atlantis").await.unwrap_err();

    match err {
        GeocodingError::NotFound(query) => assert_eq!(query, "Nowhere, Atlantis"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_geocode_empty_results_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&mock_server)
        .await;

    let client = GeocodingClient::new(&test_config(&mock_server.uri())).unwrap();
    assert!(matches!(
        client.get_coordinates("Nowhere").await.unwrap_err(),
        GeocodingError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_geocode_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1) // single attempt, no retry on the geocoding path
        .mount(&mock_server)
        .await;

    let client = GeocodingClient::new(&test_config(&mock_server.uri())).unwrap();
    assert!(matches!(
        client.get_coordinates("Oslo").await.unwrap_err(),
        GeocodingError::Status(500)
    ));
}

#[tokio::test]
async fn test_current_weather_maps_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(12.5, 81.0, 61)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = WeatherProvider::new(&test_config(&mock_server.uri())).unwrap();
    let data = provider
        .get_current_weather(Coordinates { lat: 59.91, lng: 10.75 })
        .await
        .unwrap();

    assert!((data.temperature - 12.5).abs() < f64::EPSILON);
    assert!((data.humidity - 81.0).abs() < f64::EPSILON);
    assert_eq!(data.condition, "Rain");
    assert!(!data.stale);
}

#[tokio::test]
async fn test_failed_fetch_falls_back_to_stale_reading() {
    let mock_server = MockServer::start().await;

    // First call succeeds, everything after that fails.
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(20.0, 50.0, 0)))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let provider = WeatherProvider::new(&test_config(&mock_server.uri())).unwrap();
    let coords = Coordinates { lat: 59.91, lng: 10.75 };

    let live = provider.get_current_weather(coords).await.unwrap();
    assert!(!live.stale);

    let stale = provider.get_current_weather(coords).await.unwrap();
    assert!(stale.stale);
    assert!((stale.temperature - 20.0).abs() < f64::EPSILON);
    assert_eq!(stale.condition, "Clear");
}

#[tokio::test]
async fn test_cold_failure_propagates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let provider = WeatherProvider::new(&test_config(&mock_server.uri())).unwrap();
    let err = provider
        .get_current_weather(Coordinates { lat: 0.0, lng: 0.0 })
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Status(503)));
}

#[tokio::test]
async fn test_nearby_coordinates_share_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(18.0, 60.0, 3)))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let provider = WeatherProvider::new(&test_config(&mock_server.uri())).unwrap();

    provider
        .get_current_weather(Coordinates { lat: 59.9139, lng: 10.7522 })
        .await
        .unwrap();

    // Within rounding distance of the first lookup, so the remembered
    // reading applies.
    let stale = provider
        .get_current_weather(Coordinates { lat: 59.9141, lng: 10.7519 })
        .await
        .unwrap();

    assert!(stale.stale);
    assert_eq!(stale.condition, "Cloudy");
}
