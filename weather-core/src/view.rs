//! Render-ready values derived from [`QueryState`] and the current time.

use chrono::{DateTime, Local, TimeZone, Timelike};
use serde::Serialize;

use crate::{
    controller::QueryState,
    model::{ForecastDay, WeatherReport},
    presentation::{
        background_for_report, capitalize_first, format_clock, format_forecast_date,
        format_long_date, icon_for, is_night, round_half_up, visibility_km,
    },
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub background: &'static str,
    pub is_night: bool,
    pub date_line: String,
    pub clock_line: String,
    pub body: ViewBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ViewBody {
    /// Nothing fetched yet.
    Empty,
    Loading,
    /// Shown instead of any weather, stale or not.
    Error(String),
    Weather(WeatherView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub location: String,
    pub icon: &'static str,
    pub glyph: &'static str,
    pub temperature: i64,
    pub feels_like: i64,
    pub description: String,
    pub humidity_pct: u8,
    pub wind_mps: i64,
    pub pressure_hpa: u32,
    pub visibility_km: Option<u32>,
    pub forecast: Vec<ForecastDayView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDayView {
    pub date: String,
    pub icon: &'static str,
    pub glyph: &'static str,
    pub max: i64,
    pub min: i64,
    pub label: String,
}

impl DashboardView {
    pub fn build(state: &QueryState, now: &DateTime<Local>) -> Self {
        Self::build_in(state, now, &Local)
    }

    /// Same as [`build`](Self::build) with forecast dates shown in `tz`.
    pub fn build_in<Tz: TimeZone>(state: &QueryState, now: &DateTime<Tz>, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let hour = now.hour();

        let body = if let Some(message) = &state.error {
            ViewBody::Error(message.clone())
        } else if state.loading {
            ViewBody::Loading
        } else if let Some(report) = &state.report {
            ViewBody::Weather(WeatherView::from_report(report, tz))
        } else {
            ViewBody::Empty
        };

        Self {
            background: background_for_report(state.report.as_ref(), hour),
            is_night: is_night(hour),
            date_line: format_long_date(now),
            clock_line: format_clock(now),
            body,
        }
    }
}

impl WeatherView {
    fn from_report<Tz: TimeZone>(report: &WeatherReport, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let s = &report.snapshot;
        let icon = icon_for(s.condition);

        let location = if s.country_code.is_empty() {
            s.location_name.clone()
        } else {
            format!("{}, {}", s.location_name, s.country_code)
        };

        Self {
            location,
            icon: icon.as_str(),
            glyph: icon.glyph(),
            temperature: round_half_up(s.temperature_c),
            feels_like: round_half_up(s.feels_like_c),
            description: capitalize_first(&s.description),
            humidity_pct: s.humidity_pct,
            wind_mps: round_half_up(s.wind_speed_mps),
            pressure_hpa: s.pressure_hpa,
            visibility_km: s.visibility_m.map(visibility_km),
            forecast: report.forecast.iter().map(|d| ForecastDayView::from_day(d, tz)).collect(),
        }
    }
}

impl ForecastDayView {
    fn from_day<Tz: TimeZone>(day: &ForecastDay, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let icon = icon_for(day.condition);
        Self {
            date: format_forecast_date(&day.timestamp.with_timezone(tz)),
            icon: icon.as_str(),
            glyph: icon.glyph(),
            max: round_half_up(day.temp_max_c),
            min: round_half_up(day.temp_min_c),
            label: day.condition_label.clone(),
        }
    }
}
