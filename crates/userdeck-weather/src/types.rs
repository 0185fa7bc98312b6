use serde::{Deserialize, Serialize};

/// Geographic coordinates from a geocoding lookup. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Current conditions for one location.
///
/// `stale` marks a reading served from the provider's own fallback
/// cache instead of a live fetch; consumers pass it through unchanged
/// and the rendering layer shows it as a cached-data warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub temperature: f64,
    pub condition: String,
    pub humidity: f64,
    pub stale: bool,
}

/// Map a WMO weather code to a display condition.
/// See: https://open-meteo.com/en/docs#weathervariables
pub fn condition_from_wmo(code: i64) -> &'static str {
    match code {
        0 => "Clear",
        1..=2 => "Partly Cloudy",
        3 => "Cloudy",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 | 66 | 67 => "Sleet", // Freezing drizzle and rain
        61 | 63 | 80 => "Rain",
        65 | 81 | 82 => "Heavy Rain",
        71 | 73 | 75 | 77 | 85 | 86 => "Snow",
        95 | 96 | 99 => "Thunderstorm",
        _ => "Clear", // Unknown codes default to clear
    }
}

/// Geocoding failures.
#[derive(Debug, thiserror::Error)]
pub enum GeocodingError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {0} from geocoding service")]
    Status(u16),

    #[error("No match for location query: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Weather provider failures.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {0} from weather service")]
    Status(u16),

    #[error("Parse error: {0}")]
    Parse(String),
}
