//! Orchestration layer that joins validated users with weather lookups
//! to produce renderable card data.

pub mod convert;

pub use convert::{CardUser, UserWeatherConverter, UserWeatherData};
