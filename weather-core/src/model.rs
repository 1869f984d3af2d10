use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse weather classification reported by the provider (`weather[0].main`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionCategory {
    Clear,
    Clouds,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
    Fog,
    Other,
}

impl ConditionCategory {
    /// Parse the provider label. Unknown labels (Haze, Dust, Drizzle, ...) become `Other`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Clear" => ConditionCategory::Clear,
            "Clouds" => ConditionCategory::Clouds,
            "Rain" => ConditionCategory::Rain,
            "Thunderstorm" => ConditionCategory::Thunderstorm,
            "Snow" => ConditionCategory::Snow,
            "Mist" => ConditionCategory::Mist,
            "Fog" => ConditionCategory::Fog,
            _ => ConditionCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionCategory::Clear => "Clear",
            ConditionCategory::Clouds => "Clouds",
            ConditionCategory::Rain => "Rain",
            ConditionCategory::Thunderstorm => "Thunderstorm",
            ConditionCategory::Snow => "Snow",
            ConditionCategory::Mist => "Mist",
            ConditionCategory::Fog => "Fog",
            ConditionCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current conditions for one location, as of one fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub country_code: String,
    pub condition: ConditionCategory,
    /// Provider label as received, e.g. "Haze" for an `Other` condition.
    pub condition_label: String,
    pub description: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: u32,
    /// Metres; the provider omits it for some stations.
    pub visibility_m: Option<u32>,
    pub observation_time: DateTime<Utc>,
}

/// One element of the provider's 3-hourly forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub condition: ConditionCategory,
    pub condition_label: String,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub timestamp: DateTime<Utc>,
    pub condition: ConditionCategory,
    pub condition_label: String,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
}

impl From<&RawForecastEntry> for ForecastDay {
    fn from(entry: &RawForecastEntry) -> Self {
        Self {
            timestamp: entry.timestamp,
            condition: entry.condition,
            condition_label: entry.condition_label.clone(),
            temp_max_c: entry.temp_max_c,
            temp_min_c: entry.temp_min_c,
        }
    }
}

/// Result of one successful fetch cycle.
///
/// Snapshot and forecast are only ever stored or replaced together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub snapshot: WeatherSnapshot,
    pub forecast: Vec<ForecastDay>,
    pub fetched_at: DateTime<Utc>,
}
