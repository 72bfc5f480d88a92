//! Reshapes the raw forecast and air-quality payloads into the simplified,
//! unit-annotated report served to API clients.
//!
//! `normalize` is a pure function of its inputs plus the current hour of
//! day, which callers pass explicitly, so the same inputs always produce the
//! same report.

use crate::model::{
    CurrentConditions, DailyEntry, HourlyEntry, LocationInfo, RawAirQuality, RawForecast,
    UnitMap, WeatherReport,
};
use crate::wmo::WmoTable;

/// Number of forward hourly entries, starting at the current hour.
pub const HOURLY_WINDOW: usize = 26;

/// Render a numeric value with its measurement unit appended ("32.1°C").
/// A missing value or unit yields `None`, which serializes as JSON null.
pub fn with_unit(value: Option<f64>, unit: Option<&str>) -> Option<String> {
    Some(format!("{}{}", value?, unit?))
}

fn unit<'a>(units: &'a UnitMap, field: &str) -> Option<&'a str> {
    units.get(field).map(String::as_str)
}

fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

fn text_at(values: &[Option<String>], index: usize) -> Option<String> {
    values.get(index).cloned().flatten()
}

/// Merge forecast and air-quality payloads into one report: location
/// passthrough, unit-suffixed current conditions, one entry per forecast
/// day, and a window of at most [`HOURLY_WINDOW`] hours starting at
/// `now_hour`. The window is truncated at the end of the hourly arrays; it
/// never wraps or pads.
pub fn normalize(
    forecast: &RawForecast,
    air_quality: &RawAirQuality,
    wmo: &WmoTable,
    now_hour: usize,
) -> WeatherReport {
    let location = LocationInfo {
        latitude: forecast.latitude,
        longitude: forecast.longitude,
        elevation: forecast.elevation,
        timezone: forecast.timezone.clone(),
    };

    let cur = &forecast.current;
    let cur_units = &forecast.current_units;
    let aqi = &air_quality.current;
    let aqi_units = &air_quality.current_units;

    let current = CurrentConditions {
        time: cur.time.clone(),
        temperature: with_unit(cur.temperature_2m, unit(cur_units, "temperature_2m")),
        feels_like: with_unit(
            cur.apparent_temperature,
            unit(cur_units, "apparent_temperature"),
        ),
        humidity: with_unit(
            cur.relative_humidity_2m,
            unit(cur_units, "relative_humidity_2m"),
        ),
        weather_code: wmo.expand(cur.weather_code),
        cloud_cover: with_unit(cur.cloud_cover, unit(cur_units, "cloud_cover")),
        wind_speed: with_unit(cur.wind_speed_10m, unit(cur_units, "wind_speed_10m")),
        wind_gusts: with_unit(cur.wind_gusts_10m, unit(cur_units, "wind_gusts_10m")),
        wind_direction: with_unit(
            cur.wind_direction_10m,
            unit(cur_units, "wind_direction_10m"),
        ),
        pressure: with_unit(cur.pressure_msl, unit(cur_units, "pressure_msl")),
        uv_index: with_unit(aqi.uv_index, unit(aqi_units, "uv_index")),
        us_aqi: with_unit(aqi.us_aqi, unit(aqi_units, "us_aqi")),
        european_aqi: with_unit(aqi.european_aqi, unit(aqi_units, "european_aqi")),
    };

    let daily_sec = &forecast.daily;
    let daily_units = &forecast.daily_units;
    let daily = daily_sec
        .time
        .iter()
        .enumerate()
        .map(|(i, date)| DailyEntry {
            date: date.clone(),
            min: with_unit(
                value_at(&daily_sec.temperature_2m_min, i),
                unit(daily_units, "temperature_2m_min"),
            ),
            max: with_unit(
                value_at(&daily_sec.temperature_2m_max, i),
                unit(daily_units, "temperature_2m_max"),
            ),
            feels_like_max: with_unit(
                value_at(&daily_sec.apparent_temperature_max, i),
                unit(daily_units, "apparent_temperature_max"),
            ),
            sunrise: text_at(&daily_sec.sunrise, i),
            sunset: text_at(&daily_sec.sunset, i),
            uv_index: value_at(&daily_sec.uv_index_max, i),
            rain: with_unit(value_at(&daily_sec.rain_sum, i), unit(daily_units, "rain_sum")),
            wind_speed: with_unit(
                value_at(&daily_sec.wind_speed_10m_max, i),
                unit(daily_units, "wind_speed_10m_max"),
            ),
            wind_gusts: with_unit(
                value_at(&daily_sec.wind_gusts_10m_max, i),
                unit(daily_units, "wind_gusts_10m_max"),
            ),
        })
        .collect();

    let hourly_sec = &forecast.hourly;
    let hourly_units = &forecast.hourly_units;
    let end = hourly_sec.time.len().min(now_hour.saturating_add(HOURLY_WINDOW));
    let hourly = (now_hour..end)
        .map(|i| HourlyEntry {
            time: hourly_sec.time[i].clone(),
            temperature: with_unit(
                value_at(&hourly_sec.temperature_2m, i),
                unit(hourly_units, "temperature_2m"),
            ),
            feels_like: with_unit(
                value_at(&hourly_sec.apparent_temperature, i),
                unit(hourly_units, "apparent_temperature"),
            ),
            rain: with_unit(value_at(&hourly_sec.rain, i), unit(hourly_units, "rain")),
            wind_speed: with_unit(
                value_at(&hourly_sec.wind_speed_10m, i),
                unit(hourly_units, "wind_speed_10m"),
            ),
            wind_gusts: with_unit(
                value_at(&hourly_sec.wind_gusts_10m, i),
                unit(hourly_units, "wind_gusts_10m"),
            ),
            visibility: with_unit(
                value_at(&hourly_sec.visibility, i),
                unit(hourly_units, "visibility"),
            ),
            humidity: with_unit(
                value_at(&hourly_sec.relative_humidity_2m, i),
                unit(hourly_units, "relative_humidity_2m"),
            ),
            wind_direction: with_unit(
                value_at(&hourly_sec.wind_direction_10m, i),
                unit(hourly_units, "wind_direction_10m"),
            ),
            weather_code: wmo.expand(hourly_sec.weather_code.get(i).copied().flatten()),
            cloud_cover: with_unit(
                value_at(&hourly_sec.cloud_cover, i),
                unit(hourly_units, "cloud_cover"),
            ),
            soil_moisture: with_unit(
                value_at(&hourly_sec.soil_moisture_1_to_3cm, i),
                unit(hourly_units, "soil_moisture_1_to_3cm"),
            ),
            soil_temperature_6cm: with_unit(
                value_at(&hourly_sec.soil_temperature_6cm, i),
                unit(hourly_units, "soil_temperature_6cm"),
            ),
        })
        .collect();

    WeatherReport {
        location,
        current,
        daily,
        hourly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture_forecast(hours: usize) -> RawForecast {
        let times: Vec<String> = (0..hours).map(|h| format!("2025-07-12T{h:02}:00")).collect();
        let temps: Vec<f64> = (0..hours).map(|h| 20.0 + h as f64).collect();
        let codes: Vec<i64> = (0..hours).map(|h| if h % 2 == 0 { 3 } else { 0 }).collect();

        serde_json::from_value(json!({
            "latitude": 28.61,
            "longitude": 77.23,
            "elevation": 216.0,
            "timezone": "Asia/Kolkata",
            "current": {
                "time": "2025-07-12T08:00",
                "temperature_2m": 32.1,
                "relative_humidity_2m": 60.0,
                "apparent_temperature": 35.0,
                "weather_code": 3,
                "cloud_cover": 40.0,
                "wind_speed_10m": 12.4,
                "wind_gusts_10m": 22.1,
                "wind_direction_10m": 180.0,
                "pressure_msl": 1012.0
            },
            "current_units": {
                "time": "iso8601",
                "temperature_2m": "°C",
                "relative_humidity_2m": "%",
                "apparent_temperature": "°C",
                "cloud_cover": "%",
                "wind_speed_10m": "km/h",
                "wind_gusts_10m": "km/h",
                "wind_direction_10m": "°",
                "pressure_msl": "hPa"
            },
            "daily": {
                "time": ["2025-07-12", "2025-07-13"],
                "temperature_2m_min": [27.0, 26.5],
                "temperature_2m_max": [35.2, 34.8],
                "apparent_temperature_max": [39.0, 38.1],
                "sunrise": ["2025-07-12T05:31", "2025-07-13T05:32"],
                "sunset": ["2025-07-12T19:21", "2025-07-13T19:21"],
                "uv_index_max": [8.5, 8.0],
                "rain_sum": [0.0, 1.2],
                "wind_speed_10m_max": [18.0, 16.3],
                "wind_gusts_10m_max": [30.0, 27.7]
            },
            "daily_units": {
                "temperature_2m_min": "°C",
                "temperature_2m_max": "°C",
                "apparent_temperature_max": "°C",
                "rain_sum": "mm",
                "wind_speed_10m_max": "km/h",
                "wind_gusts_10m_max": "km/h"
            },
            "hourly": {
                "time": times,
                "temperature_2m": temps,
                "weather_code": codes
            },
            "hourly_units": {
                "temperature_2m": "°C"
            }
        }))
        .expect("fixture forecast should parse")
    }

    fn fixture_air_quality() -> RawAirQuality {
        serde_json::from_value(json!({
            "current": { "european_aqi": 38.0, "us_aqi": 45.0, "uv_index": 6.3 },
            "current_units": { "european_aqi": "EAQI", "us_aqi": "USAQI", "uv_index": "" }
        }))
        .expect("fixture air quality should parse")
    }

    fn table() -> WmoTable {
        WmoTable::bundled().expect("bundled table must parse")
    }

    #[test]
    fn with_unit_requires_both_parts() {
        assert_eq!(with_unit(Some(32.1), Some("°C")), Some("32.1°C".to_string()));
        assert_eq!(with_unit(Some(40.0), Some("%")), Some("40%".to_string()));
        assert_eq!(with_unit(None, Some("°C")), None);
        assert_eq!(with_unit(Some(32.1), None), None);
    }

    #[test]
    fn current_block_is_unit_suffixed_and_merged() {
        let report = normalize(&fixture_forecast(24), &fixture_air_quality(), &table(), 8);

        assert_eq!(report.location.timezone, "Asia/Kolkata");
        assert_eq!(report.location.elevation, Some(216.0));

        let current = &report.current;
        assert_eq!(current.temperature.as_deref(), Some("32.1°C"));
        assert_eq!(current.feels_like.as_deref(), Some("35°C"));
        assert_eq!(current.humidity.as_deref(), Some("60%"));
        assert_eq!(current.pressure.as_deref(), Some("1012hPa"));
        assert_eq!(current.weather_code.code, Some(3));
        assert_eq!(current.weather_code.description, "Partly cloudy");
        // Air-quality fields come from the second payload.
        assert_eq!(current.us_aqi.as_deref(), Some("45USAQI"));
        assert_eq!(current.european_aqi.as_deref(), Some("38EAQI"));
        assert_eq!(current.uv_index.as_deref(), Some("6.3"));
    }

    #[test]
    fn daily_entries_follow_input_order_and_length() {
        let report = normalize(&fixture_forecast(24), &fixture_air_quality(), &table(), 8);

        assert_eq!(report.daily.len(), 2);
        let day = &report.daily[0];
        assert_eq!(day.date, "2025-07-12");
        assert_eq!(day.min.as_deref(), Some("27°C"));
        assert_eq!(day.max.as_deref(), Some("35.2°C"));
        assert_eq!(day.sunrise.as_deref(), Some("2025-07-12T05:31"));
        assert_eq!(day.uv_index, Some(8.5));
        assert_eq!(day.rain.as_deref(), Some("0mm"));
    }

    #[test]
    fn hourly_window_starts_at_now_hour_and_stays_aligned() {
        let report = normalize(&fixture_forecast(48), &fixture_air_quality(), &table(), 8);

        assert_eq!(report.hourly.len(), HOURLY_WINDOW);
        let first = &report.hourly[0];
        assert_eq!(first.time, "2025-07-12T08:00");
        // temperature_2m[8] is 28.0; values must track the window, not
        // restart at index 0.
        assert_eq!(first.temperature.as_deref(), Some("28°C"));
        assert_eq!(first.weather_code.code, Some(3));
    }

    #[test]
    fn hourly_window_truncates_at_array_end() {
        let report = normalize(&fixture_forecast(24), &fixture_air_quality(), &table(), 23);

        assert_eq!(report.hourly.len(), 1);
        assert_eq!(report.hourly[0].time, "2025-07-12T23:00");
    }

    #[test]
    fn now_hour_past_the_end_yields_an_empty_window() {
        let report = normalize(&fixture_forecast(4), &fixture_air_quality(), &table(), 10);
        assert!(report.hourly.is_empty());
    }

    #[test]
    fn missing_fields_become_null_not_text() {
        let report = normalize(&fixture_forecast(24), &fixture_air_quality(), &table(), 8);

        // The fixture's hourly section has no rain array or rain unit.
        assert_eq!(report.hourly[0].rain, None);
        let rendered = serde_json::to_string(&report.hourly[0]).expect("serializable");
        assert!(rendered.contains("\"rain\":null"));
        assert!(!rendered.contains("undefined"));
    }

    #[test]
    fn normalize_is_deterministic() {
        let forecast = fixture_forecast(48);
        let air_quality = fixture_air_quality();
        let wmo = table();

        let a = serde_json::to_string(&normalize(&forecast, &air_quality, &wmo, 8))
            .expect("serializable");
        let b = serde_json::to_string(&normalize(&forecast, &air_quality, &wmo, 8))
            .expect("serializable");
        assert_eq!(a, b);
    }
}
