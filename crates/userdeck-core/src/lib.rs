//! Shared infrastructure for Userdeck: configuration, the retry
//! executor, and the key-value cache backing the user service.

pub mod cache;
pub mod config;
pub mod retry;

pub use cache::{store_for, CacheError, CacheStore, JsonFileCache, MemoryCache};
pub use config::{Config, UsersConfig, WeatherConfig};
pub use retry::{retry, RetryConfig};
