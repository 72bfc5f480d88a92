//! Open-Meteo air-quality fetcher: current European AQI, US AQI and UV
//! index for a coordinate pair.

use reqwest::Client;

use crate::error::{WeatherError, truncate_body};
use crate::model::RawAirQuality;

const AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";

const CURRENT_FIELDS: &[&str] = &["european_aqi", "us_aqi", "uv_index"];

#[derive(Debug, Clone)]
pub struct AirQualityClient {
    http: Client,
    base_url: String,
}

impl AirQualityClient {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: AIR_QUALITY_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn fetch(&self, latitude: f64, longitude: f64) -> Result<RawAirQuality, WeatherError> {
        tracing::debug!(latitude, longitude, "fetching air quality");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.join(",")),
            ])
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

        let parsed: RawAirQuality = serde_json::from_str(&body)?;
        Ok(parsed)
    }
}
