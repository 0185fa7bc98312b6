//! Current-conditions provider with a stale-tolerant fallback.
//! Uses the Open-Meteo forecast API.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;
use userdeck_core::config::WeatherConfig;

use crate::types::{condition_from_wmo, Coordinates, WeatherData, WeatherError};

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    weather_code: i64,
}

/// Fallback-cache key: coordinates rounded to two decimals, close
/// enough to treat repeat lookups for the same city as the same place.
fn cache_key(coords: Coordinates) -> (i64, i64) {
    (
        (coords.lat * 100.0).round() as i64,
        (coords.lng * 100.0).round() as i64,
    )
}

/// Fetches current conditions, remembering the last good reading per
/// place so a transient outage degrades to stale data instead of an
/// error.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    last_good: Arc<Mutex<HashMap<(i64, i64), WeatherData>>>,
}

impl WeatherProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.forecast_base_url.clone(),
            last_good: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Fetch current conditions for `coords`.
    ///
    /// A live reading is remembered; if a later fetch for the same
    /// place fails, the remembered reading is returned with
    /// `stale: true` instead of an error.
    #[instrument(skip(self), level = "info")]
    pub async fn get_current_weather(
        &self,
        coords: Coordinates,
    ) -> Result<WeatherData, WeatherError> {
        match self.fetch_current(coords).await {
            Ok(data) => {
                self.last_good.lock().insert(cache_key(coords), data.clone());
                Ok(data)
            }
            Err(e) => {
                let cached = self.last_good.lock().get(&cache_key(coords)).cloned();
                if let Some(mut reading) = cached {
                    tracing::warn!("Live weather fetch failed, serving cached reading: {}", e);
                    reading.stale = true;
                    return Ok(reading);
                }
                Err(e)
            }
        }
    }

    async fn fetch_current(&self, coords: Coordinates) -> Result<WeatherData, WeatherError> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&current=temperature_2m,relative_humidity_2m,weather_code",
            self.base_url, coords.lat, coords.lng
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        Ok(WeatherData {
            temperature: body.current.temperature_2m,
            condition: condition_from_wmo(body.current.weather_code).to_string(),
            humidity: body.current.relative_humidity_2m,
            stale: false,
        })
    }
}
