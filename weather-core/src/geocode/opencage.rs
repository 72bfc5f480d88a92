use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{WeatherError, truncate_body};
use crate::model::Coordinates;

use super::Geocoder;

const OPENCAGE_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

/// Fallback geocoder: OpenCage. Requires an API key and scopes every query
/// with a country bias. Coordinates come back as DMS annotation strings
/// (`28° 37' 3.0'' N`) and are converted to signed decimal degrees.
#[derive(Debug, Clone)]
pub struct OpenCageGeocoder {
    http: Client,
    api_key: Option<String>,
    country_bias: String,
    base_url: String,
}

impl OpenCageGeocoder {
    pub fn new(http: Client, api_key: Option<String>, country_bias: impl Into<String>) -> Self {
        Self {
            http,
            api_key,
            country_bias: country_bias.into(),
            base_url: OPENCAGE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct OcResponse {
    #[serde(default)]
    results: Vec<OcResult>,
}

#[derive(Debug, Deserialize)]
struct OcResult {
    annotations: OcAnnotations,
}

#[derive(Debug, Deserialize)]
struct OcAnnotations {
    #[serde(rename = "DMS")]
    dms: OcDms,
    timezone: OcTimezone,
}

#[derive(Debug, Deserialize)]
struct OcDms {
    lat: String,
    lng: String,
}

#[derive(Debug, Deserialize)]
struct OcTimezone {
    name: String,
}

#[async_trait]
impl Geocoder for OpenCageGeocoder {
    async fn lookup(&self, city: &str) -> Result<Option<Coordinates>, WeatherError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!("no OpenCage API key configured, skipping fallback geocoder");
            return Ok(None);
        };

        tracing::debug!(city, "querying OpenCage fallback geocoder");

        let query = format!("{city},{}", self.country_bias);
        let res = self
            .http
            .get(&self.base_url)
            .query(&[("q", query.as_str()), ("key", api_key)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::UpstreamStatus {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OcResponse = serde_json::from_str(&body)?;
        let Some(result) = parsed.results.into_iter().next() else {
            return Ok(None);
        };

        // A malformed DMS string is a no-match, not a numeric error.
        let (Some(latitude), Some(longitude)) = (
            dms_to_decimal(&result.annotations.dms.lat),
            dms_to_decimal(&result.annotations.dms.lng),
        ) else {
            tracing::warn!(city, "OpenCage result had unparseable DMS coordinates");
            return Ok(None);
        };

        // Same policy for coordinates outside the valid ranges.
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            tracing::warn!(
                city,
                latitude,
                longitude,
                "OpenCage result had out-of-range coordinates"
            );
            return Ok(None);
        }

        Ok(Some(Coordinates {
            latitude,
            longitude,
            timezone: result.annotations.timezone.name,
            elevation: None,
            name: city.to_string(),
        }))
    }
}

/// Convert a DMS coordinate string like `28° 37' 3.0'' N` to signed decimal
/// degrees: `deg + min/60 + sec/3600`, negated for the S and W hemispheres.
pub fn dms_to_decimal(dms: &str) -> Option<f64> {
    let mut parts = dms.split_whitespace();

    let degrees: f64 = parts.next()?.trim_end_matches('°').parse().ok()?;
    let minutes: f64 = parts.next()?.trim_end_matches('\'').parse().ok()?;
    let seconds: f64 = parts.next()?.trim_end_matches('\'').parse().ok()?;

    let decimal = degrees + minutes / 60.0 + seconds / 3600.0;

    match parts.next()? {
        "N" | "E" => Some(decimal),
        "S" | "W" => Some(-decimal),
        _ => None,
    }
}
