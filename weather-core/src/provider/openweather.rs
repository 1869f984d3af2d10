use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

use crate::{
    config::{Config, DEFAULT_BASE_URL},
    error::FetchError,
    model::{ConditionCategory, RawForecastEntry, WeatherSnapshot},
};

use super::WeatherProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    fn path(self) -> &'static str {
        match self {
            Endpoint::Current => "weather",
            Endpoint::Forecast => "forecast",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Endpoint::Current => "current weather",
            Endpoint::Forecast => "5-day forecast",
        }
    }
}

/// Client for the OpenWeather 2.5 `weather` and `forecast` endpoints.
///
/// Requests use metric units and the transport's default timeout.
#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

// Hand-written so the key never ends up in logs.
impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Build a provider from config, resolving the API key from the
    /// environment or the config file.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.api_key()?;
        Ok(Self::with_base_url(api_key, config.base_url.as_str()))
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    #[instrument(skip(self, endpoint), fields(endpoint = endpoint.path()))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        city: &str,
    ) -> Result<T, FetchError> {
        let res = self
            .http
            .get(self.url(endpoint))
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                FetchError::provider(format!(
                    "Failed to send request to OpenWeather ({}): {e}",
                    endpoint.label()
                ))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            FetchError::provider(format!(
                "Failed to read OpenWeather {} response body: {e}",
                endpoint.label()
            ))
        })?;

        debug!(%status, bytes = body.len(), "OpenWeather response");

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::CityNotFound { city: city.to_string() });
        }

        if !status.is_success() {
            warn!(%status, "OpenWeather request failed");
            return Err(FetchError::provider(format!(
                "OpenWeather {} request failed with status {}: {}",
                endpoint.label(),
                status,
                truncate_body(&body),
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            FetchError::provider(format!(
                "Failed to parse OpenWeather {} JSON: {e}",
                endpoint.label()
            ))
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwCondition>,
    wind: OwWind,
    sys: OwSys,
    visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_max: f64,
    temp_min: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwCondition>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl TryFrom<OwCurrentResponse> for WeatherSnapshot {
    type Error = FetchError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let condition = parsed.weather.into_iter().next().ok_or_else(|| {
            FetchError::provider("OpenWeather current response contained no weather condition")
        })?;

        Ok(WeatherSnapshot {
            location_name: parsed.name,
            country_code: parsed.sys.country,
            condition: ConditionCategory::from_label(&condition.main),
            condition_label: condition.main,
            description: condition.description,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            pressure_hpa: parsed.main.pressure,
            visibility_m: parsed.visibility,
            observation_time: unix_to_utc(parsed.dt)?,
        })
    }
}

impl TryFrom<OwForecastEntry> for RawForecastEntry {
    type Error = FetchError;

    fn try_from(entry: OwForecastEntry) -> Result<Self, Self::Error> {
        let condition = entry.weather.into_iter().next().ok_or_else(|| {
            FetchError::provider("OpenWeather forecast entry contained no weather condition")
        })?;

        Ok(RawForecastEntry {
            timestamp: unix_to_utc(entry.dt)?,
            condition: ConditionCategory::from_label(&condition.main),
            condition_label: condition.main,
            temp_max_c: entry.main.temp_max,
            temp_min_c: entry.main.temp_min,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let parsed: OwCurrentResponse = self.get_json(Endpoint::Current, city).await?;
        WeatherSnapshot::try_from(parsed)
    }

    async fn fetch_forecast(&self, city: &str) -> Result<Vec<RawForecastEntry>, FetchError> {
        let parsed: OwForecastResponse = self.get_json(Endpoint::Forecast, city).await?;
        parsed.list.into_iter().map(RawForecastEntry::try_from).collect()
    }
}

fn unix_to_utc(ts: i64) -> Result<DateTime<Utc>, FetchError> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| FetchError::provider(format!("OpenWeather timestamp out of range: {ts}")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
