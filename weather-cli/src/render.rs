//! Plain-text drawing of a [`DashboardView`].

use std::fmt::Write;

use weather_core::{
    DashboardView, ViewBody,
    view::{ForecastDayView, WeatherView},
};

const RULE: &str = "────────────────────────────────────────────────";

pub fn render(view: &DashboardView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}  {}   [{}]", view.date_line, view.clock_line, view.background);
    let _ = writeln!(out, "{RULE}");

    match &view.body {
        ViewBody::Empty => {
            let _ = writeln!(out, "No weather loaded yet.");
        }
        ViewBody::Loading => {
            let _ = writeln!(out, "Loading weather data...");
        }
        ViewBody::Error(message) => {
            let _ = writeln!(out, "✖ {message}");
        }
        ViewBody::Weather(w) => render_weather(&mut out, w),
    }

    out
}

fn render_weather(out: &mut String, w: &WeatherView) {
    let _ = writeln!(out, "📍 {}", w.location);
    let _ = writeln!(out);
    let _ = writeln!(out, "   {}  {}°", w.glyph, w.temperature);
    let _ = writeln!(out, "   {}", w.description);
    let _ = writeln!(out, "   Feels like {}°", w.feels_like);
    let _ = writeln!(out);

    let visibility = w.visibility_km.map_or_else(|| "n/a".to_string(), |km| format!("{km} km"));
    let _ = writeln!(
        out,
        "Humidity {}%   Wind {} m/s   Pressure {} hPa   Visibility {}",
        w.humidity_pct, w.wind_mps, w.pressure_hpa, visibility
    );

    if !w.forecast.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "5-Day Forecast");
        for day in &w.forecast {
            render_day(out, day);
        }
    }
}

fn render_day(out: &mut String, day: &ForecastDayView) {
    let _ = writeln!(
        out,
        "  {:<12} {}  {:>4}° / {:>4}°  {}",
        day.date, day.glyph, day.max, day.min, day.label
    );
}
