//! City-name geocoding with a two-stage fallback.
//!
//! The primary source (Open-Meteo) needs no credentials and returns decimal
//! coordinates directly. When it has no match or fails outright, the
//! secondary source (OpenCage) is consulted; it reports coordinates as DMS
//! strings that must be converted to signed decimal degrees.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::WeatherError;
use crate::model::Coordinates;

pub mod open_meteo;
pub mod opencage;

/// One geocoding source. `Ok(None)` means "no match for this city";
/// `Err` means the source itself failed (network, bad status, bad JSON).
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn lookup(&self, city: &str) -> Result<Option<Coordinates>, WeatherError>;
}

/// Resolve a city through the primary geocoder, falling back to the
/// secondary on no-match or error. If neither yields usable coordinates the
/// city is reported as not found; a failing fallback source is never
/// surfaced as an upstream error.
pub async fn resolve(
    primary: &dyn Geocoder,
    secondary: &dyn Geocoder,
    city: &str,
) -> Result<Coordinates, WeatherError> {
    match primary.lookup(city).await {
        Ok(Some(coords)) => return Ok(coords),
        Ok(None) => {
            tracing::debug!(city, "primary geocoder had no match, trying fallback");
        }
        Err(err) => {
            tracing::warn!(city, error = %err, "primary geocoder failed, trying fallback");
        }
    }

    match secondary.lookup(city).await {
        Ok(Some(coords)) => Ok(coords),
        Ok(None) => Err(WeatherError::CityNotFound),
        Err(err) => {
            tracing::warn!(city, error = %err, "fallback geocoder failed");
            Err(WeatherError::CityNotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum Stub {
        Match(Coordinates),
        NoMatch,
        Failure,
    }

    #[async_trait]
    impl Geocoder for Stub {
        async fn lookup(&self, _city: &str) -> Result<Option<Coordinates>, WeatherError> {
            match self {
                Stub::Match(coords) => Ok(Some(coords.clone())),
                Stub::NoMatch => Ok(None),
                Stub::Failure => Err(WeatherError::CityNotFound),
            }
        }
    }

    fn delhi() -> Coordinates {
        Coordinates {
            latitude: 28.61,
            longitude: 77.23,
            timezone: "Asia/Kolkata".to_string(),
            elevation: Some(216.0),
            name: "Delhi".to_string(),
        }
    }

    #[tokio::test]
    async fn primary_match_short_circuits() {
        let primary = Stub::Match(delhi());
        let secondary = Stub::Failure;

        let coords = resolve(&primary, &secondary, "Delhi")
            .await
            .expect("primary match should resolve");
        assert_eq!(coords, delhi());
    }

    #[tokio::test]
    async fn no_match_falls_back() {
        let primary = Stub::NoMatch;
        let secondary = Stub::Match(delhi());

        let coords = resolve(&primary, &secondary, "Delhi")
            .await
            .expect("fallback match should resolve");
        assert_eq!(coords.timezone, "Asia/Kolkata");
    }

    #[tokio::test]
    async fn primary_error_falls_back() {
        let primary = Stub::Failure;
        let secondary = Stub::Match(delhi());

        let coords = resolve(&primary, &secondary, "Delhi")
            .await
            .expect("fallback match should resolve");
        assert_eq!(coords.name, "Delhi");
    }

    #[tokio::test]
    async fn both_empty_is_city_not_found() {
        let err = resolve(&Stub::NoMatch, &Stub::NoMatch, "Atlantis")
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::CityNotFound));
    }

    #[tokio::test]
    async fn failing_fallback_is_city_not_found() {
        let err = resolve(&Stub::NoMatch, &Stub::Failure, "Atlantis")
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::CityNotFound));
    }
}
