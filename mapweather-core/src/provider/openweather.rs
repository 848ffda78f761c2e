use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::ProviderError,
    model::{CitySearchResult, Coordinate, WeatherSnapshot},
};

use super::WeatherProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const WEATHER_PATH: &str = "/data/2.5/weather";
const GEOCODE_PATH: &str = "/geo/1.0/direct";

/// Maximum number of geocoding matches requested; callers only ever
/// use the first one.
const SEARCH_LIMIT: &str = "5";

/// Client for OpenWeather's current-weather and direct-geocoding
/// endpoints. Holds the API key so nothing downstream of it has to.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different host, e.g. a mock server in
    /// tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    /// Fetch current weather, forwarding `lat`/`lon` exactly as
    /// received: an absent parameter stays absent, an unparseable one
    /// goes through untouched. The provider's rejection then surfaces
    /// as a [`ProviderError::Status`]. Returns the raw JSON body.
    pub async fn current_weather_raw(
        &self,
        lat: Option<&str>,
        lon: Option<&str>,
    ) -> Result<Value, ProviderError> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(lat) = lat {
            params.push(("lat", lat));
        }
        if let Some(lon) = lon {
            params.push(("lon", lon));
        }
        params.push(("appid", self.api_key.as_str()));
        params.push(("units", "metric"));

        self.get_json(WEATHER_PATH, &params).await
    }

    /// Geocode a free-text city query, limit fixed at five. Same
    /// pass-through contract as [`Self::current_weather_raw`].
    pub async fn search_raw(&self, query: Option<&str>) -> Result<Value, ProviderError> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(q) = query {
            params.push(("q", q));
        }
        params.push(("limit", SEARCH_LIMIT));
        params.push(("appid", self.api_key.as_str()));

        self.get_json(GEOCODE_PATH, &params).await
    }

    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, ProviderError> {
        let url = format!("{}{}", self.base_url, path);

        let res = self.http.get(&url).query(params).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ProviderError::from_status(status, &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize, Default)]
struct OwWind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: u16,
}

#[derive(Debug, Deserialize, Default)]
struct OwClouds {
    #[serde(default)]
    all: u8,
}

#[derive(Debug, Deserialize, Default)]
struct OwSys {
    country: Option<String>,
    #[serde(default)]
    sunrise: i64,
    #[serde(default)]
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: Option<i64>,
    #[serde(default)]
    timezone: i32,
    #[serde(default)]
    visibility: u32,
    main: OwMain,
    weather: Vec<OwCondition>,
    #[serde(default)]
    wind: OwWind,
    #[serde(default)]
    clouds: OwClouds,
    #[serde(default)]
    sys: OwSys,
}

impl From<OwCurrentResponse> for WeatherSnapshot {
    fn from(raw: OwCurrentResponse) -> Self {
        let (condition, description) = raw
            .weather
            .into_iter()
            .next()
            .map(|w| (w.main, w.description))
            .unwrap_or_else(|| ("Unknown".to_string(), "Unknown".to_string()));

        let observed_at = raw
            .dt
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .unwrap_or_else(Utc::now);

        WeatherSnapshot {
            place_name: raw.name,
            country: raw.sys.country.unwrap_or_default(),
            temperature_c: raw.main.temp,
            feels_like_c: raw.main.feels_like,
            temp_min_c: raw.main.temp_min,
            temp_max_c: raw.main.temp_max,
            humidity_pct: raw.main.humidity,
            wind_speed_mps: raw.wind.speed,
            wind_direction_deg: raw.wind.deg,
            condition,
            description,
            sunrise_unix: raw.sys.sunrise,
            sunset_unix: raw.sys.sunset,
            timezone_offset_secs: raw.timezone,
            visibility_m: raw.visibility,
            cloud_cover_pct: raw.clouds.all,
            observed_at,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(
        &self,
        coord: Coordinate,
    ) -> Result<WeatherSnapshot, ProviderError> {
        let lat = coord.latitude.to_string();
        let lon = coord.longitude.to_string();

        let body = self
            .current_weather_raw(Some(lat.as_str()), Some(lon.as_str()))
            .await?;

        let parsed: OwCurrentResponse = serde_json::from_value(body)?;
        Ok(parsed.into())
    }

    async fn search_cities(&self, query: &str) -> Result<Vec<CitySearchResult>, ProviderError> {
        let body = self.search_raw(Some(query)).await?;
        Ok(serde_json::from_value(body)?)
    }
}
