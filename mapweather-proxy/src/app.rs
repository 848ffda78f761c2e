//! Router and handlers for the key-hiding proxy.
//!
//! Both endpoints are stateless pass-throughs: query parameters are
//! forwarded to the provider exactly as received (no validation), the
//! provider's JSON body is relayed on success, and every failure
//! collapses to a fixed 500 body so upstream detail never reaches the
//! client.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use mapweather_core::OpenWeatherClient;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

const WEATHER_ERROR: &str = "Failed to fetch weather data";
const SEARCH_ERROR: &str = "Failed to fetch city data";

#[derive(Clone)]
struct AppState {
    client: OpenWeatherClient,
}

/// Build the proxy router. Cross-origin requests are permitted from
/// any origin; the browser client is served from elsewhere.
pub fn router(client: OpenWeatherClient) -> Router {
    Router::new()
        .route("/api/weather", get(weather))
        .route("/api/search", get(search))
        .layer(CorsLayer::permissive())
        .with_state(AppState { client })
}

#[derive(Debug, Deserialize)]
struct WeatherParams {
    lat: Option<String>,
    lon: Option<String>,
}

async fn weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> (StatusCode, Json<Value>) {
    match state
        .client
        .current_weather_raw(params.lat.as_deref(), params.lon.as_deref())
        .await
    {
        Ok(body) => (StatusCode::OK, Json(body)),
        Err(e) => {
            tracing::error!("Error fetching weather data: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": WEATHER_ERROR })),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> (StatusCode, Json<Value>) {
    match state.client.search_raw(params.q.as_deref()).await {
        Ok(body) => (StatusCode::OK, Json(body)),
        Err(e) => {
            tracing::error!("Error fetching city data: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": SEARCH_ERROR })),
            )
        }
    }
}
