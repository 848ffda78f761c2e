//! Integration tests for the OpenWeather client against a mock
//! upstream.

use mapweather_core::error::ProviderError;
use mapweather_core::model::Coordinate;
use mapweather_core::provider::WeatherProvider;
use mapweather_core::provider::openweather::OpenWeatherClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_weather_body() -> serde_json::Value {
    serde_json::json!({
        "name": "London",
        "dt": 1_700_000_000,
        "timezone": 0,
        "visibility": 10000,
        "main": {
            "temp": 11.2,
            "feels_like": 10.1,
            "temp_min": 9.0,
            "temp_max": 13.0,
            "pressure": 1012,
            "humidity": 72
        },
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "wind": {"speed": 4.6, "deg": 240},
        "clouds": {"all": 75},
        "sys": {"country": "GB", "sunrise": 1_699_970_000, "sunset": 1_700_002_000}
    })
}

fn client_for(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::with_base_url("test-key".to_string(), server.uri())
}

#[tokio::test]
async fn current_weather_injects_key_and_metric_units() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "51.5"))
        .and(query_param("lon", "-0.12"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_body()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let coord = Coordinate::new(51.5, -0.12).unwrap();
    let snap = client.current_weather(coord).await.unwrap();

    assert_eq!(snap.place_name, "London");
    assert_eq!(snap.country, "GB");
    assert_eq!(snap.temperature_c, 11.2);
    assert_eq!(snap.condition, "Rain");
    assert_eq!(snap.humidity_pct, 72);
    assert_eq!(snap.visibility_m, 10000);
}

#[tokio::test]
async fn current_weather_raw_returns_provider_body_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_body()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let body = client
        .current_weather_raw(Some("51.5"), Some("-0.12"))
        .await
        .unwrap();

    assert_eq!(body, current_weather_body());
}

#[tokio::test]
async fn absent_parameters_are_forwarded_as_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "cod": "400", "message": "Nothing to geocode"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.current_weather_raw(None, None).await.unwrap_err();

    assert!(matches!(err, ProviderError::Status { status: 400, .. }));

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query.contains("lat="));
    assert!(!query.contains("lon="));
    assert!(query.contains("appid=test-key"));
}

#[tokio::test]
async fn search_requests_at_most_five_matches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Paris"))
        .and(query_param("limit", "5"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"name": "Paris", "lat": 48.85, "lon": 2.35, "country": "FR"},
            {"name": "Paris", "lat": 33.66, "lon": -95.55, "country": "US", "state": "Texas"}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cities = client.search_cities("Paris").await.unwrap();

    assert_eq!(cities.len(), 2);
    assert_eq!(cities[0].name, "Paris");
    assert_eq!(cities[0].latitude, 48.85);
    assert_eq!(cities[0].country, "FR");
}

#[tokio::test]
async fn empty_query_is_forwarded_unmodified() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let body = client.search_raw(Some("")).await.unwrap();

    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn upstream_error_status_becomes_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401, "message": "Invalid API key"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let coord = Coordinate::new(0.0, 0.0).unwrap();
    let err = client.current_weather(coord).await.unwrap_err();

    assert!(matches!(err, ProviderError::Status { status: 401, .. }));
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn malformed_body_becomes_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .current_weather_raw(Some("1"), Some("2"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Decode(_)));
}
