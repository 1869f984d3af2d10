//! Core library for the `weather-dash` terminal dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the `WeatherProvider` trait
//! - Forecast downsampling and the condition → icon/background mapping
//! - The query controller, the ticking clock and the render-ready view model
//!
//! It is used by `weather-dash`, but can also be reused by other front ends.

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod forecast;
pub mod model;
pub mod presentation;
pub mod provider;
pub mod view;

pub use clock::Clock;
pub use config::Config;
pub use controller::{FetchOutcome, Phase, QueryController, QueryState, SubmitOutcome};
pub use error::FetchError;
pub use forecast::reduce_to_daily;
pub use model::{ConditionCategory, ForecastDay, RawForecastEntry, WeatherReport, WeatherSnapshot};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use view::{DashboardView, ViewBody};
