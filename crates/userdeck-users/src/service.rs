//! User service: cache-first retrieval of validated user lists.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::instrument;
use userdeck_core::cache::CacheStore;
use userdeck_core::config::UsersConfig;
use userdeck_core::retry::retry;

use crate::error::UserError;
use crate::fetch::fetch_json;
use crate::types::User;
use crate::validate::{validate_api_response, validate_users};

/// Cache key for the validated user list.
pub const USERS_CACHE_KEY: &str = "users";

/// Fields requested from the listing endpoint.
const INCLUDE_FIELDS: &str = "name,location,picture";

/// Produces validated user lists, preferring the cache over the
/// network.
///
/// Cache policy: the entry is cleared before every network attempt
/// (freshness over availability; a failed fetch leaves no stale list
/// behind) and removed on a corrupt read.
pub struct UserService {
    client: reqwest::Client,
    cache: Arc<dyn CacheStore>,
    config: UsersConfig,
}

impl UserService {
    pub fn new(config: UsersConfig, cache: Arc<dyn CacheStore>) -> Result<Self, UserError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            cache,
            config,
        })
    }

    /// Read the cached user list, re-validating it first.
    ///
    /// A cached value that fails validation is removed immediately and
    /// reported as a miss, never returned.
    pub fn get_cached_users(&self) -> Option<Vec<User>> {
        let raw = self.cache.get(USERS_CACHE_KEY)?;

        match validate_users(&raw) {
            Ok(users) => Some(users),
            Err(e) => {
                tracing::warn!("Cached users failed validation, dropping entry: {}", e);
                if let Err(e) = self.cache.remove(USERS_CACHE_KEY) {
                    tracing::warn!("Failed to remove corrupt cache entry: {}", e);
                }
                None
            }
        }
    }

    /// Fetch `count` validated users.
    ///
    /// A validated cache entry with at least `count` users is served
    /// directly. Otherwise the cache is invalidated, the listing
    /// endpoint is fetched under the retry policy, and the validated
    /// result is written back before being returned.
    #[instrument(skip(self), level = "info")]
    pub async fn get_users(&self, count: usize) -> Result<Vec<User>, UserError> {
        if let Some(cached) = self.get_cached_users() {
            if cached.len() >= count {
                tracing::info!("Serving {} users from cache", count);
                return Ok(cached.into_iter().take(count).collect());
            }
            tracing::info!("Cache has {} users, need {}; refetching", cached.len(), count);
        }

        // Invalidate before fetching so a failed fetch can never leave
        // a stale list to be served by a later read.
        self.cache.remove(USERS_CACHE_KEY)?;

        let users = retry(&self.config.retry, "user fetch", || self.fetch_users(count)).await?;

        match serde_json::to_value(&users) {
            Ok(value) => {
                if let Err(e) = self.cache.set(USERS_CACHE_KEY, value) {
                    tracing::warn!("Failed to cache users: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize users for cache: {}", e),
        }

        Ok(users)
    }

    /// One fetch-and-validate attempt against the listing endpoint.
    async fn fetch_users(&self, count: usize) -> Result<Vec<User>, UserError> {
        let url = format!(
            "{}/api/?results={}&inc={}",
            self.config.api_base_url, count, INCLUDE_FIELDS
        );

        let raw: Value = fetch_json(&self.client, &url).await?;
        let response = validate_api_response(&raw)?;
        Ok(response.results)
    }
}
