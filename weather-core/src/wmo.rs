//! WMO weather code descriptions.
//!
//! The table ships as a bundled JSON resource, is parsed once at startup and
//! then shared immutably; the normalizer receives it by reference.

use std::collections::HashMap;

use crate::model::WeatherCode;

static WMO_JSON: &str = include_str!("../resources/wmo.json");

/// Read-only WMO code -> description lookup.
#[derive(Debug, Clone)]
pub struct WmoTable {
    codes: HashMap<i64, String>,
}

impl WmoTable {
    /// Parse the bundled resource. Call once at process start.
    pub fn bundled() -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, String> = serde_json::from_str(WMO_JSON)?;
        let codes = raw
            .into_iter()
            .filter_map(|(k, v)| k.parse::<i64>().ok().map(|code| (code, v)))
            .collect();
        Ok(Self { codes })
    }

    /// Description for a code; unmapped codes read "Unknown".
    pub fn describe(&self, code: i64) -> &str {
        self.codes.get(&code).map_or("Unknown", String::as_str)
    }

    /// Expand an optional raw code into the `{code, description}` shape used
    /// throughout the normalized report.
    pub fn expand(&self, code: Option<i64>) -> WeatherCode {
        WeatherCode {
            code,
            description: code.map_or_else(|| "Unknown".to_string(), |c| self.describe(c).to_string()),
        }
    }
}
