//! Core library for the weather + air quality service.
//!
//! This crate defines:
//! - City-name geocoding with a primary/fallback source chain
//! - Fetchers for the Open-Meteo forecast and air-quality APIs
//! - The normalizer that merges both payloads into one report
//! - Configuration & the bundled WMO code table
//!
//! It is used by `weather-server`, but can also be reused by other binaries
//! or services.

pub mod air_quality;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod model;
pub mod normalize;
pub mod wmo;

pub use air_quality::AirQualityClient;
pub use config::Config;
pub use error::WeatherError;
pub use forecast::ForecastClient;
pub use geocode::{Geocoder, resolve};
pub use model::{Coordinates, RawAirQuality, RawForecast, WeatherReport};
pub use normalize::normalize;
pub use wmo::WmoTable;
