//! Forward geocoding: convert a free-text place query to coordinates.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;
use userdeck_core::config::WeatherConfig;

use crate::types::{Coordinates, GeocodingError};

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingMatch>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingMatch {
    latitude: f64,
    longitude: f64,
}

/// Client for the forward-geocoding endpoint.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

impl GeocodingClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.geocoding_base_url.clone(),
        })
    }

    /// Resolve `query` (e.g. `"Oslo, Norway"`) to coordinates.
    ///
    /// Fails with `NotFound` when the service has no match for the
    /// query; callers decide whether that is fatal.
    #[instrument(skip(self), level = "info")]
    pub async fn get_coordinates(&self, query: &str) -> Result<Coordinates, GeocodingError> {
        let url = format!(
            "{}/v1/search?name={}&count=1&format=json",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::Status(status.as_u16()));
        }

        let body: GeocodingResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::Parse(e.to_string()))?;

        let first = body
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| GeocodingError::NotFound(query.to_string()))?;

        tracing::debug!(
            "Geocoded {:?} to ({}, {})",
            query,
            first.latitude,
            first.longitude
        );

        Ok(Coordinates {
            lat: first.latitude,
            lng: first.longitude,
        })
    }
}
