//! Weather lookup for Userdeck.
//!
//! Provides forward geocoding and current conditions via the Open-Meteo
//! APIs, with a stale-tolerant fallback inside the provider.

pub mod geocode;
pub mod provider;
pub mod types;

pub use geocode::GeocodingClient;
pub use provider::WeatherProvider;
pub use types::{condition_from_wmo, Coordinates, GeocodingError, WeatherData, WeatherError};
