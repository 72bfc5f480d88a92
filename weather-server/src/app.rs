//! HTTP surface: one route, `GET /weather?city=<name>`.
//!
//! The handler owns the full pipeline for a request: resolve coordinates,
//! fetch forecast and air quality concurrently, normalize. It is also the
//! single place where error kinds become HTTP statuses.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use weather_core::geocode::open_meteo::OpenMeteoGeocoder;
use weather_core::geocode::opencage::OpenCageGeocoder;
use weather_core::{AirQualityClient, ForecastClient, WeatherError, WeatherReport, WmoTable};

/// Read-only per-process state: HTTP clients and the WMO table.
#[derive(Debug, Clone)]
pub struct AppState {
    pub primary_geocoder: OpenMeteoGeocoder,
    pub fallback_geocoder: OpenCageGeocoder,
    pub forecast: ForecastClient,
    pub air_quality: AirQualityClient,
    pub wmo: WmoTable,
}

pub fn router(state: Arc<AppState>) -> Router {
    // Both unknown paths and unsupported methods answer 404 with the same
    // body, so the method router gets its own fallback.
    Router::new()
        .route("/weather", get(get_weather).fallback(endpoint_not_found))
        .fallback(endpoint_not_found)
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    city: Option<String>,
}

async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WeatherQuery>,
) -> Response {
    let Some(city) = params
        .city
        .as_deref()
        .map(str::trim)
        .filter(|city| !city.is_empty())
    else {
        return error_response(StatusCode::BAD_REQUEST, "city query parameter is required");
    };

    match weather_for_city(&state, city).await {
        Ok(report) => (StatusCode::OK, Json(json!({ "results": report }))).into_response(),
        Err(err) => {
            tracing::error!(city, error = %err, "weather request failed");
            error_response(status_for(&err), &err.to_string())
        }
    }
}

async fn weather_for_city(state: &AppState, city: &str) -> Result<WeatherReport, WeatherError> {
    let coords =
        weather_core::resolve(&state.primary_geocoder, &state.fallback_geocoder, city).await?;

    tracing::debug!(
        city,
        latitude = coords.latitude,
        longitude = coords.longitude,
        timezone = %coords.timezone,
        "resolved coordinates"
    );

    // The two fetches only depend on the coordinates; run them together.
    let (forecast, air_quality) = tokio::try_join!(
        state
            .forecast
            .fetch(coords.latitude, coords.longitude, &coords.timezone),
        state.air_quality.fetch(coords.latitude, coords.longitude),
    )?;

    let now_hour = forecast.current_hour().unwrap_or(0) as usize;

    Ok(weather_core::normalize(
        &forecast,
        &air_quality,
        &state.wmo,
        now_hour,
    ))
}

async fn endpoint_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Endpoint not found")
}

fn status_for(err: &WeatherError) -> StatusCode {
    match err {
        WeatherError::CityNotFound => StatusCode::NOT_FOUND,
        WeatherError::Upstream(_) | WeatherError::Parse(_) | WeatherError::UpstreamStatus { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
