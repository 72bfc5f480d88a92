//! Open-Meteo forecast fetcher.
//!
//! One GET requesting the daily, hourly and current field groups together,
//! each serialized as a comma-joined list. No retries; any failure maps to
//! the upstream error kind.

use reqwest::Client;

use crate::error::{WeatherError, truncate_body};
use crate::model::RawForecast;

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const DAILY_FIELDS: &[&str] = &[
    "weather_code",
    "temperature_2m_max",
    "temperature_2m_min",
    "sunrise",
    "sunset",
    "uv_index_max",
    "rain_sum",
    "wind_speed_10m_max",
    "wind_gusts_10m_max",
    "wind_direction_10m_dominant",
    "shortwave_radiation_sum",
    "et0_fao_evapotranspiration",
    "apparent_temperature_max",
    "daylight_duration",
];

const HOURLY_FIELDS: &[&str] = &[
    "temperature_2m",
    "weather_code",
    "relative_humidity_2m",
    "wind_speed_10m",
    "rain",
    "apparent_temperature",
    "soil_moisture_1_to_3cm",
    "soil_temperature_6cm",
    "visibility",
    "cloud_cover",
    "wind_gusts_10m",
    "wind_direction_10m",
];

const CURRENT_FIELDS: &[&str] = &[
    "temperature_2m",
    "relative_humidity_2m",
    "apparent_temperature",
    "is_day",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
    "precipitation",
    "rain",
    "weather_code",
    "cloud_cover",
    "pressure_msl",
    "surface_pressure",
];

#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: FORECAST_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<RawForecast, WeatherError> {
        tracing::debug!(latitude, longitude, timezone, "fetching forecast");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("daily", DAILY_FIELDS.join(",")),
                ("hourly", HOURLY_FIELDS.join(",")),
                ("current", CURRENT_FIELDS.join(",")),
                ("timezone", timezone.to_string()),
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

        let parsed: RawForecast = serde_json::from_str(&body)?;
        Ok(parsed)
    }
}
