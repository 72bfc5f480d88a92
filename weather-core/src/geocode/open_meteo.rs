use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{WeatherError, truncate_body};
use crate::model::Coordinates;

use super::Geocoder;

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Primary geocoder: the Open-Meteo geocoding API. No credentials,
/// coordinates arrive as decimal degrees.
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
    base_url: String,
}

impl OpenMeteoGeocoder {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: GEOCODING_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    latitude: f64,
    longitude: f64,
    name: String,
    timezone: String,
    #[serde(default)]
    elevation: Option<f64>,
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn lookup(&self, city: &str) -> Result<Option<Coordinates>, WeatherError> {
        tracing::debug!(city, "querying Open-Meteo geocoder");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[("name", city), ("count", "1")])
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

        let parsed: SearchResponse = serde_json::from_str(&body)?;

        Ok(parsed.results.into_iter().next().map(|r| Coordinates {
            latitude: r.latitude,
            longitude: r.longitude,
            timezone: r.timezone,
            elevation: r.elevation,
            name: r.name,
        }))
    }
}
