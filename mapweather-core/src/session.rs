//! Interaction layer: converts map clicks, marker drags and search
//! submissions into weather fetches, and owns the UI-visible state.

use crate::{
    model::{Coordinate, WeatherSnapshot},
    provider::WeatherProvider,
};

/// One of the three user actions that initiates a weather fetch.
#[derive(Debug, Clone)]
pub enum Trigger {
    MapClick(Coordinate),
    MarkerDragEnd(Coordinate),
    SearchSubmit(String),
}

/// Alert-style outcome surfaced to the user. Deliberately carries no
/// upstream detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    CityNotFound,
    SearchFailed,
    WeatherUnavailable,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::CityNotFound => "City not found. Please try again.",
            Notice::SearchFailed => "Failed to fetch city data. Please try again.",
            Notice::WeatherUnavailable => "Failed to fetch weather data. Please try again.",
        }
    }
}

/// State read by the presentation layer. At most one snapshot is held
/// at a time; a new fetch replaces it, never appends.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub is_loading: bool,
    pub is_modal_open: bool,
    pub map_center: Option<Coordinate>,
    pub snapshot: Option<WeatherSnapshot>,
}

impl UiState {
    /// Re-centre on the selected coordinate and enter the loading
    /// state.
    pub fn begin_fetch(&mut self, coord: Coordinate) {
        self.map_center = Some(coord);
        self.is_loading = true;
    }

    /// Apply a completed fetch. The last completion to arrive wins:
    /// with no cancellation, a superseded in-flight fetch that resolves
    /// later simply overwrites the snapshot. Accepted for single-user,
    /// low-frequency interaction.
    pub fn finish_fetch(&mut self, snapshot: WeatherSnapshot) {
        self.snapshot = Some(snapshot);
        self.is_modal_open = true;
        self.is_loading = false;
    }

    pub fn fail_fetch(&mut self) {
        self.is_loading = false;
    }

    /// Close the weather panel. Keeps the map centre (used to
    /// re-centre, never to re-fetch); any new trigger performs a fresh
    /// fetch rather than reusing the stale snapshot.
    pub fn close_panel(&mut self) {
        self.is_modal_open = false;
    }
}

/// Drives the three triggers against a provider and applies the
/// resulting transitions to [`UiState`].
#[derive(Debug)]
pub struct Session {
    provider: Box<dyn WeatherProvider>,
    state: UiState,
}

impl Session {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            state: UiState::default(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn close_panel(&mut self) {
        self.state.close_panel();
    }

    /// Handle one trigger, performing at most one weather fetch.
    /// Returns a notice when the user should be told something went
    /// wrong (or nothing was found); `None` means success or no-op.
    pub async fn dispatch(&mut self, trigger: Trigger) -> Option<Notice> {
        match trigger {
            Trigger::MapClick(coord) | Trigger::MarkerDragEnd(coord) => {
                self.fetch_weather(coord, None).await
            }
            Trigger::SearchSubmit(query) => {
                if query.is_empty() {
                    return None;
                }

                self.state.is_loading = true;
                let cities = match self.provider.search_cities(&query).await {
                    Ok(cities) => cities,
                    Err(e) => {
                        tracing::warn!("City search failed: {e}");
                        self.state.fail_fetch();
                        return Some(Notice::SearchFailed);
                    }
                };

                // Provider order is trusted; the first match is the
                // best match.
                let Some(city) = cities.into_iter().next() else {
                    self.state.fail_fetch();
                    return Some(Notice::CityNotFound);
                };

                let coord = Coordinate {
                    latitude: city.latitude,
                    longitude: city.longitude,
                };
                self.fetch_weather(coord, Some(city.name)).await
            }
        }
    }

    async fn fetch_weather(
        &mut self,
        coord: Coordinate,
        name_override: Option<String>,
    ) -> Option<Notice> {
        self.state.begin_fetch(coord);

        match self.provider.current_weather(coord).await {
            Ok(mut snapshot) => {
                // A search displays the city name the user asked for,
                // not whatever station name the provider reports.
                if let Some(name) = name_override {
                    snapshot.place_name = name;
                }
                self.state.finish_fetch(snapshot);
                None
            }
            Err(e) => {
                tracing::warn!("Weather fetch failed: {e}");
                self.state.fail_fetch();
                Some(Notice::WeatherUnavailable)
            }
        }
    }
}
