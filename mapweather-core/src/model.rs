use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point on the map, as produced by a click, a marker drag or a
/// geocoding result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Validated constructor used by the session layer. The proxy never
    /// validates: it forwards whatever the client sent and lets the
    /// upstream rejection surface as the generic failure.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            bail!("Latitude {latitude} is outside [-90, 90]");
        }
        if !(-180.0..=180.0).contains(&longitude) {
            bail!("Longitude {longitude} is outside [-180, 180]");
        }

        Ok(Self { latitude, longitude })
    }
}

/// One geocoding match. Ephemeral; the session layer only ever uses the
/// first element of the returned sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitySearchResult {
    pub name: String,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    pub country: String,
}

/// Current conditions at one coordinate at one instant, in metric units.
///
/// Replaced wholesale on every successful fetch; never merged with or
/// diffed against a previous snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub place_name: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: u16,
    pub condition: String,
    pub description: String,
    pub sunrise_unix: i64,
    pub sunset_unix: i64,
    pub timezone_offset_secs: i32,
    pub visibility_m: u32,
    pub cloud_cover_pct: u8,
    pub observed_at: DateTime<Utc>,
}

/// Explicit light/dark selection, passed down to whatever renders the
/// map rather than living in ambient shared state. Toggling produces a
/// new value; callers propagate it through their own callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Style URL for the map surface.
    pub fn map_style(self) -> &'static str {
        match self {
            Theme::Light => "mapbox://styles/mapbox/light-v11",
            Theme::Dark => "mapbox://styles/mapbox/dark-v11",
        }
    }
}
