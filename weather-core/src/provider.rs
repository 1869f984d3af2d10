use async_trait::async_trait;
use chrono::Utc;
use std::fmt::Debug;
use tracing::debug;

use crate::{
    error::FetchError,
    forecast::reduce_to_daily,
    model::{RawForecastEntry, WeatherReport, WeatherSnapshot},
};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`.
    async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;

    /// Full multi-day series for `city`, in chronological order.
    async fn fetch_forecast(&self, city: &str) -> Result<Vec<RawForecastEntry>, FetchError>;

    /// One fetch cycle: current conditions, then (only if that succeeded)
    /// the forecast, reduced to one entry per day.
    ///
    /// A failure of either request fails the whole cycle, so callers never
    /// see a snapshot without its forecast.
    async fn fetch_current_and_forecast(&self, city: &str) -> Result<WeatherReport, FetchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FetchError::EmptyCity);
        }

        let snapshot = self.fetch_current(city).await?;
        let series = self.fetch_forecast(city).await?;
        let forecast = reduce_to_daily(&series);

        debug!(city, raw = series.len(), days = forecast.len(), "Fetch cycle complete");

        Ok(WeatherReport { snapshot, forecast, fetched_at: Utc::now() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConditionCategory;
    use chrono::DateTime;
    use parking_lot::Mutex;

    #[derive(Debug, Default)]
    struct Scripted {
        calls: Mutex<Vec<String>>,
        fail_current: bool,
        fail_forecast: bool,
    }

    fn snapshot(city: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            location_name: city.to_string(),
            country_code: "NP".into(),
            condition: ConditionCategory::Clear,
            condition_label: "Clear".into(),
            description: "clear sky".into(),
            temperature_c: 20.0,
            feels_like_c: 19.0,
            humidity_pct: 40,
            wind_speed_mps: 2.0,
            pressure_hpa: 1012,
            visibility_m: Some(10_000),
            observation_time: Utc::now(),
        }
    }

    #[async_trait]
    impl WeatherProvider for Scripted {
        async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
            self.calls.lock().push(format!("current:{city}"));
            if self.fail_current {
                return Err(FetchError::CityNotFound { city: city.into() });
            }
            Ok(snapshot(city))
        }

        async fn fetch_forecast(&self, city: &str) -> Result<Vec<RawForecastEntry>, FetchError> {
            self.calls.lock().push(format!("forecast:{city}"));
            if self.fail_forecast {
                return Err(FetchError::provider("forecast down"));
            }
            Ok((0..40)
                .map(|i| RawForecastEntry {
                    timestamp: DateTime::from_timestamp(i * 10_800, 0).unwrap(),
                    condition: ConditionCategory::Rain,
                    condition_label: "Rain".into(),
                    temp_max_c: 10.0,
                    temp_min_c: 5.0,
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn cycle_is_sequential_and_reduced() {
        let p = Scripted::default();
        let report = p.fetch_current_and_forecast("  Pokhara ").await.unwrap();

        assert_eq!(report.snapshot.location_name, "Pokhara");
        assert_eq!(report.forecast.len(), 5);
        assert_eq!(*p.calls.lock(), vec!["current:Pokhara", "forecast:Pokhara"]);
    }

    #[tokio::test]
    async fn forecast_not_requested_when_current_fails() {
        let p = Scripted { fail_current: true, ..Default::default() };
        let err = p.fetch_current_and_forecast("Atlantis").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(*p.calls.lock(), vec!["current:Atlantis"]);
    }

    #[tokio::test]
    async fn forecast_failure_fails_whole_cycle() {
        let p = Scripted { fail_forecast: true, ..Default::default() };
        let err = p.fetch_current_and_forecast("Pokhara").await.unwrap_err();

        assert!(matches!(err, FetchError::Provider(_)));
    }

    #[tokio::test]
    async fn blank_city_is_rejected_without_requests() {
        let p = Scripted::default();
        let err = p.fetch_current_and_forecast("   ").await.unwrap_err();

        assert!(matches!(err, FetchError::EmptyCity));
        assert!(p.calls.lock().is_empty());
    }
}
