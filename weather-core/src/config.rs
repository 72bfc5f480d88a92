use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Service configuration.
///
/// Loaded from an optional TOML file in the platform config directory, then
/// overridden by environment variables so deployments never hard-code
/// secrets or ports:
///
/// - `WEATHER_PORT`
/// - `OPENCAGE_API_KEY`
/// - `WEATHER_COUNTRY_BIAS`
/// - `WEATHER_UPSTREAM_TIMEOUT_SECS`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listening port for the HTTP server.
    pub port: u16,

    /// API key for the OpenCage fallback geocoder. Without it the fallback
    /// is skipped and an unresolved city surfaces as "City not found".
    pub opencage_api_key: Option<String>,

    /// Country suffix appended to fallback geocoding queries.
    pub country_bias: String,

    /// Bounded timeout applied to every outbound HTTP call.
    pub upstream_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            opencage_api_key: None,
            country_bias: "India".to_string(),
            upstream_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load config from disk (missing file means defaults), then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        cfg.apply_env()?;
        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-service", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(port) = env::var("WEATHER_PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("WEATHER_PORT is not a valid port: {port}"))?;
        }

        if let Ok(key) = env::var("OPENCAGE_API_KEY") {
            self.opencage_api_key = Some(key);
        }

        if let Ok(bias) = env::var("WEATHER_COUNTRY_BIAS") {
            self.country_bias = bias;
        }

        if let Ok(secs) = env::var("WEATHER_UPSTREAM_TIMEOUT_SECS") {
            self.upstream_timeout_secs = secs.parse().with_context(|| {
                format!("WEATHER_UPSTREAM_TIMEOUT_SECS is not a valid duration: {secs}")
            })?;
        }

        Ok(())
    }
}
