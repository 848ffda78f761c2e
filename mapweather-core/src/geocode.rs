//! Reverse geocoding: coordinates to a human-readable "City, Country"
//! label for the header display. Uses BigDataCloud's client endpoint,
//! which needs no API key.

use crate::model::Coordinate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const BIGDATACLOUD_URL: &str = "https://api.bigdatacloud.net/data/reverse-geocode-client";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReverseGeocodeResponse {
    city: Option<String>,
    locality: Option<String>,
    country_name: Option<String>,
}

/// Look up a display label for a coordinate.
///
/// Returns `None` on any failure; the caller falls back to a generic
/// "Unknown Location" label. A failed lookup is cosmetic only and must
/// never block a weather fetch.
pub async fn reverse_geocode(coord: Coordinate) -> Option<String> {
    reverse_geocode_at(BIGDATACLOUD_URL, coord).await
}

async fn reverse_geocode_at(endpoint: &str, coord: Coordinate) -> Option<String> {
    let client = match Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to create reverse-geocoding client: {e}");
            return None;
        }
    };

    let response = match client
        .get(endpoint)
        .query(&[
            ("latitude", coord.latitude.to_string()),
            ("longitude", coord.longitude.to_string()),
            ("localityLanguage", "en".to_string()),
        ])
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("Reverse geocode request failed: {e}");
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::debug!("Reverse geocode returned status {}", response.status());
        return None;
    }

    let body: ReverseGeocodeResponse = match response.json().await {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!("Reverse geocode parse error: {e}");
            return None;
        }
    };

    format_label(body)
}

fn format_label(body: ReverseGeocodeResponse) -> Option<String> {
    let place = body
        .city
        .filter(|c| !c.is_empty())
        .or(body.locality.filter(|l| !l.is_empty()))?;

    match body.country_name.filter(|c| !c.is_empty()) {
        Some(country) => Some(format!("{place}, {country}")),
        None => Some(place),
    }
}
