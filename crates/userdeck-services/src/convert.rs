//! Combine user profiles with weather lookups into card data.
//!
//! Conversion never fails per user: any validation, geocoding, or
//! weather failure degrades to a card with `weather: None` so the
//! rendering layer always has something to show.

use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;
use userdeck_users::validate::validate_user;
use userdeck_users::{User, ValidationError};
use userdeck_weather::{GeocodingClient, WeatherData, WeatherProvider};

/// The user on a card: validated when possible, otherwise the raw
/// input preserved for display and debugging.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CardUser {
    Valid(User),
    Raw(Value),
}

/// One card's worth of data for the rendering layer.
///
/// `weather` is `None` exactly when validation, geocoding, or the
/// weather fetch failed for this user. A reading with `stale: true`
/// came from the provider's fallback and is shown with a warning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserWeatherData {
    pub user: CardUser,
    pub weather: Option<WeatherData>,
}

/// Turns raw user objects into card data, one weather lookup per user.
pub struct UserWeatherConverter {
    geocoder: GeocodingClient,
    weather: WeatherProvider,
}

impl UserWeatherConverter {
    pub fn new(geocoder: GeocodingClient, weather: WeatherProvider) -> Self {
        Self { geocoder, weather }
    }

    /// Convert one raw user into card data. Never fails.
    ///
    /// A user that fails validation keeps its raw form and skips the
    /// weather lookup entirely; geocoding and weather failures keep
    /// the validated user and drop only the weather.
    #[instrument(skip(self, raw), level = "info")]
    pub async fn convert(&self, raw: &Value) -> UserWeatherData {
        let user = match validate_user(raw) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("User failed validation, skipping weather: {}", e);
                return UserWeatherData {
                    user: CardUser::Raw(raw.clone()),
                    weather: None,
                };
            }
        };

        let weather = self.lookup_weather(&user).await;
        UserWeatherData {
            user: CardUser::Valid(user),
            weather,
        }
    }

    /// Convert a whole batch concurrently, preserving input order.
    ///
    /// Fails only when the batch itself is malformed (not an array, or
    /// empty); individual elements degrade as in [`Self::convert`].
    #[instrument(skip(self, raw), level = "info")]
    pub async fn convert_all(&self, raw: &Value) -> Result<Vec<UserWeatherData>, ValidationError> {
        let Some(items) = raw.as_array() else {
            return Err(ValidationError::single("", "batch input must be an array"));
        };
        if items.is_empty() {
            return Err(ValidationError::single("", "batch input must not be empty"));
        }

        Ok(join_all(items.iter().map(|item| self.convert(item))).await)
    }

    /// Convert users that already passed the user service's validation,
    /// skipping re-validation.
    pub async fn convert_validated(&self, users: Vec<User>) -> Vec<UserWeatherData> {
        join_all(users.into_iter().map(|user| async move {
            let weather = self.lookup_weather(&user).await;
            UserWeatherData {
                user: CardUser::Valid(user),
                weather,
            }
        }))
        .await
    }

    /// Geocode the user's location, then fetch current conditions.
    /// Any failure along the way becomes `None`.
    async fn lookup_weather(&self, user: &User) -> Option<WeatherData> {
        let query = user.location_query();

        let coords = match self.geocoder.get_coordinates(&query).await {
            Ok(coords) => coords,
            Err(e) => {
                tracing::warn!("Geocoding failed for {:?}: {}", query, e);
                return None;
            }
        };

        match self.weather.get_current_weather(coords).await {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!("Weather fetch failed for {:?}: {}", query, e);
                None
            }
        }
    }
}
