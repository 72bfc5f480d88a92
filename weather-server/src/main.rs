//! Binary crate for the weather + air quality HTTP service.
//!
//! Startup order: logging, configuration, shared HTTP client with a bounded
//! timeout, WMO table, then bind and serve.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use weather_core::geocode::open_meteo::OpenMeteoGeocoder;
use weather_core::geocode::opencage::OpenCageGeocoder;
use weather_core::{AirQualityClient, Config, ForecastClient, WmoTable};

mod app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let state = Arc::new(app::AppState {
        primary_geocoder: OpenMeteoGeocoder::new(http.clone()),
        fallback_geocoder: OpenCageGeocoder::new(
            http.clone(),
            config.opencage_api_key.clone(),
            config.country_bias.clone(),
        ),
        forecast: ForecastClient::new(http.clone()),
        air_quality: AirQualityClient::new(http),
        wmo: WmoTable::bundled().context("Failed to parse bundled WMO code table")?,
    });

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("weather server listening on http://{addr}");

    axum::serve(listener, app::router(state))
        .await
        .context("Server error")?;

    Ok(())
}
