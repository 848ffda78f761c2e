//! Core library for the `mapweather` lookup service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client (current weather + city geocoding)
//! - Reverse geocoding for the "current location" label
//! - The interaction layer turning map/search events into fetches
//! - Shared domain models (coordinates, search results, snapshots)
//!
//! It is used by `mapweather-proxy`, but can also be reused by other
//! binaries or services.

pub mod config;
pub mod error;
pub mod geocode;
pub mod model;
pub mod provider;
pub mod session;

pub use config::Config;
pub use error::ProviderError;
pub use model::{CitySearchResult, Coordinate, Theme, WeatherSnapshot};
pub use provider::{WeatherProvider, openweather::OpenWeatherClient, provider_from_config};
pub use session::{Notice, Session, Trigger, UiState};
