//! Domain models: resolved coordinates, raw upstream payloads, and the
//! normalized report returned to API clients.

use std::collections::HashMap;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Field name -> unit string, as delivered by the `*_units` sections.
pub type UnitMap = HashMap<String, String>;

/// Result of geocoding a city name. Produced once per request and consumed
/// by both upstream fetchers.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub elevation: Option<f64>,
    /// City name as resolved by the geocoder (may differ from the query).
    pub name: String,
}

/// Forecast payload from the Open-Meteo forecast API.
///
/// Every leaf the normalizer reads is optional so a field missing upstream
/// stays representable instead of failing the whole parse. Arrays within one
/// section are index-aligned (`daily.time[i]` pairs with
/// `daily.temperature_2m_min[i]`).
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecast {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: Option<f64>,
    pub timezone: String,
    #[serde(default)]
    pub current: ForecastCurrent,
    #[serde(default)]
    pub current_units: UnitMap,
    #[serde(default)]
    pub daily: ForecastDaily,
    #[serde(default)]
    pub daily_units: UnitMap,
    #[serde(default)]
    pub hourly: ForecastHourly,
    #[serde(default)]
    pub hourly_units: UnitMap,
}

impl RawForecast {
    /// Hour of day (0-23) of the payload's `current.time`, which Open-Meteo
    /// expresses in the requested timezone. `None` when the timestamp is
    /// absent or unparseable.
    pub fn current_hour(&self) -> Option<u32> {
        let time = self.current.time.as_deref()?;
        NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
            .ok()
            .map(|dt| dt.hour())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastCurrent {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub temperature_2m: Option<f64>,
    #[serde(default)]
    pub relative_humidity_2m: Option<f64>,
    #[serde(default)]
    pub apparent_temperature: Option<f64>,
    #[serde(default)]
    pub weather_code: Option<i64>,
    #[serde(default)]
    pub cloud_cover: Option<f64>,
    #[serde(default)]
    pub wind_speed_10m: Option<f64>,
    #[serde(default)]
    pub wind_gusts_10m: Option<f64>,
    #[serde(default)]
    pub wind_direction_10m: Option<f64>,
    #[serde(default)]
    pub pressure_msl: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastDaily {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub apparent_temperature_max: Vec<Option<f64>>,
    #[serde(default)]
    pub sunrise: Vec<Option<String>>,
    #[serde(default)]
    pub sunset: Vec<Option<String>>,
    #[serde(default)]
    pub uv_index_max: Vec<Option<f64>>,
    #[serde(default)]
    pub rain_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_gusts_10m_max: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastHourly {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub apparent_temperature: Vec<Option<f64>>,
    #[serde(default)]
    pub rain: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_gusts_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub visibility: Vec<Option<f64>>,
    #[serde(default)]
    pub relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_direction_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub weather_code: Vec<Option<i64>>,
    #[serde(default)]
    pub cloud_cover: Vec<Option<f64>>,
    #[serde(default)]
    pub soil_moisture_1_to_3cm: Vec<Option<f64>>,
    #[serde(default)]
    pub soil_temperature_6cm: Vec<Option<f64>>,
}

/// Payload from the Open-Meteo air-quality API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAirQuality {
    #[serde(default)]
    pub current: AirQualityCurrent,
    #[serde(default)]
    pub current_units: UnitMap,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirQualityCurrent {
    #[serde(default)]
    pub european_aqi: Option<f64>,
    #[serde(default)]
    pub us_aqi: Option<f64>,
    #[serde(default)]
    pub uv_index: Option<f64>,
}

/// WMO weather code expanded to a human description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherCode {
    pub code: Option<i64>,
    pub description: String,
}

/// Location block of the normalized report: forecast passthrough.
#[derive(Debug, Clone, Serialize)]
pub struct LocationInfo {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub timezone: String,
}

/// Current conditions, unit-suffixed. A field missing upstream serializes
/// as `null` rather than a fabricated value.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentConditions {
    pub time: Option<String>,
    pub temperature: Option<String>,
    pub feels_like: Option<String>,
    pub humidity: Option<String>,
    pub weather_code: WeatherCode,
    pub cloud_cover: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_gusts: Option<String>,
    pub wind_direction: Option<String>,
    pub pressure: Option<String>,
    pub uv_index: Option<String>,
    pub us_aqi: Option<String>,
    pub european_aqi: Option<String>,
}

/// One normalized day, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct DailyEntry {
    pub date: String,
    pub min: Option<String>,
    pub max: Option<String>,
    pub feels_like_max: Option<String>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub uv_index: Option<f64>,
    pub rain: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_gusts: Option<String>,
}

/// One normalized hour from the forward window.
#[derive(Debug, Clone, Serialize)]
pub struct HourlyEntry {
    pub time: String,
    pub temperature: Option<String>,
    pub feels_like: Option<String>,
    pub rain: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_gusts: Option<String>,
    pub visibility: Option<String>,
    pub humidity: Option<String>,
    pub wind_direction: Option<String>,
    pub weather_code: WeatherCode,
    pub cloud_cover: Option<String>,
    pub soil_moisture: Option<String>,
    pub soil_temperature_6cm: Option<String>,
}

/// The full normalized response served under `{"results": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub location: LocationInfo,
    pub current: CurrentConditions,
    pub daily: Vec<DailyEntry>,
    pub hourly: Vec<HourlyEntry>,
}
