//! Pure mappings from weather data and local time to display values.

use chrono::{DateTime, Datelike, TimeZone, Timelike};

use crate::model::{ConditionCategory, WeatherReport};

/// Icon identifiers (boxicons names) for each condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconId {
    Sun,
    Cloud,
    CloudRain,
    CloudLightning,
    CloudSnow,
    Water,
}

impl IconId {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconId::Sun => "bx-sun",
            IconId::Cloud => "bx-cloud",
            IconId::CloudRain => "bx-cloud-rain",
            IconId::CloudLightning => "bx-cloud-lightning",
            IconId::CloudSnow => "bx-cloud-snow",
            IconId::Water => "bx-water",
        }
    }

    /// Terminal stand-in for the icon.
    pub fn glyph(&self) -> &'static str {
        match self {
            IconId::Sun => "☀",
            IconId::Cloud => "☁",
            IconId::CloudRain => "☂",
            IconId::CloudLightning => "⚡",
            IconId::CloudSnow => "❄",
            IconId::Water => "≋",
        }
    }
}

impl std::fmt::Display for IconId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const BG_CLEAR: &str = "assets/clear.jpg";
pub const BG_CLOUDS: &str = "assets/clouds.jpg";
pub const BG_RAIN: &str = "assets/rain.jpg";
pub const BG_THUNDERSTORM: &str = "assets/thunderstorm.jpg";
pub const BG_SNOW: &str = "assets/snow.jpg";
pub const BG_MIST: &str = "assets/mist.jpg";
pub const BG_NIGHT_CLEAR: &str = "assets/night_clear.jpg";
pub const BG_NIGHT_CLOUDS: &str = "assets/night_clouds.jpg";

pub fn icon_for(condition: ConditionCategory) -> IconId {
    match condition {
        ConditionCategory::Clear => IconId::Sun,
        ConditionCategory::Clouds => IconId::Cloud,
        ConditionCategory::Rain => IconId::CloudRain,
        ConditionCategory::Thunderstorm => IconId::CloudLightning,
        ConditionCategory::Snow => IconId::CloudSnow,
        ConditionCategory::Mist | ConditionCategory::Fog => IconId::Water,
        ConditionCategory::Other => IconId::Sun,
    }
}

/// Same as [`icon_for`] but straight from a provider label.
pub fn icon_for_label(label: &str) -> IconId {
    icon_for(ConditionCategory::from_label(label))
}

/// Night variants exist only for Clear and Clouds; every other condition
/// falls back to the clear night sky.
pub fn background_for(condition: ConditionCategory, is_night: bool) -> &'static str {
    if is_night {
        return match condition {
            ConditionCategory::Clouds => BG_NIGHT_CLOUDS,
            _ => BG_NIGHT_CLEAR,
        };
    }

    match condition {
        ConditionCategory::Clear => BG_CLEAR,
        ConditionCategory::Clouds => BG_CLOUDS,
        ConditionCategory::Rain => BG_RAIN,
        ConditionCategory::Thunderstorm => BG_THUNDERSTORM,
        ConditionCategory::Snow => BG_SNOW,
        ConditionCategory::Mist | ConditionCategory::Fog => BG_MIST,
        ConditionCategory::Other => BG_CLEAR,
    }
}

pub fn background_for_label(label: &str, is_night: bool) -> &'static str {
    background_for(ConditionCategory::from_label(label), is_night)
}

/// Background for the whole dashboard. Without any weather loaded the day
/// clear background is used whatever the hour.
pub fn background_for_report(report: Option<&WeatherReport>, hour: u32) -> &'static str {
    match report {
        Some(r) => background_for(r.snapshot.condition, is_night(hour)),
        None => BG_CLEAR,
    }
}

/// Hours 18..=23 and 0..=6 count as night. Both 6 and 18 are night.
pub fn is_night(hour: u32) -> bool {
    hour >= 18 || hour <= 6
}

pub fn is_night_at<Tz: TimeZone>(time: &DateTime<Tz>) -> bool {
    is_night(time.hour())
}

/// Nearest integer, halves toward positive infinity: `-4.5 -> -4`, `2.5 -> 3`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// "light rain" -> "Light rain".
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Visibility in whole kilometres, rounded.
pub fn visibility_km(metres: u32) -> u32 {
    (f64::from(metres) / 1000.0).round() as u32
}

/// Short label for a forecast day, e.g. "Mon, Jan 5".
pub fn format_forecast_date<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}, {}", time.format("%a"), format_month_day(time))
}

/// Long date line, e.g. "Monday, January 5, 2026".
pub fn format_long_date<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}, {} {}, {}", time.format("%A"), time.format("%B"), time.day(), time.year())
}

/// Clock line, e.g. "07:04:09 PM".
pub fn format_clock<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%I:%M:%S %p").to_string()
}

fn format_month_day<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{} {}", time.format("%b"), time.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn night_hours_include_both_boundaries() {
        for hour in (0..=6).chain(18..=23) {
            assert!(is_night(hour), "hour {hour} should be night");
        }
        for hour in 7..=17 {
            assert!(!is_night(hour), "hour {hour} should be day");
        }
    }

    #[test]
    fn rain_has_no_night_variant() {
        assert_eq!(background_for(ConditionCategory::Rain, false), BG_RAIN);
        assert_eq!(background_for(ConditionCategory::Rain, true), BG_NIGHT_CLEAR);
    }

    #[test]
    fn clear_and_clouds_have_night_variants() {
        assert_eq!(background_for(ConditionCategory::Clear, true), BG_NIGHT_CLEAR);
        assert_eq!(background_for(ConditionCategory::Clouds, true), BG_NIGHT_CLOUDS);
        assert_eq!(background_for(ConditionCategory::Clouds, false), BG_CLOUDS);
    }

    #[test]
    fn mist_and_fog_share_assets() {
        assert_eq!(background_for(ConditionCategory::Fog, false), BG_MIST);
        assert_eq!(background_for(ConditionCategory::Mist, false), BG_MIST);
        assert_eq!(icon_for(ConditionCategory::Fog), IconId::Water);
        assert_eq!(icon_for(ConditionCategory::Mist), IconId::Water);
    }

    #[test]
    fn unknown_label_maps_like_clear() {
        assert_eq!(icon_for_label("Tornado"), icon_for(ConditionCategory::Clear));
        assert_eq!(background_for_label("Haze", false), BG_CLEAR);
        assert_eq!(background_for_label("Haze", true), BG_NIGHT_CLEAR);
    }

    #[test]
    fn icon_names() {
        assert_eq!(icon_for(ConditionCategory::Thunderstorm).as_str(), "bx-cloud-lightning");
        assert_eq!(icon_for(ConditionCategory::Snow).as_str(), "bx-cloud-snow");
        assert_eq!(icon_for(ConditionCategory::Rain).to_string(), "bx-cloud-rain");
    }

    #[test]
    fn no_report_means_day_clear_background() {
        assert_eq!(background_for_report(None, 23), BG_CLEAR);
        assert_eq!(background_for_report(None, 12), BG_CLEAR);
    }

    #[test]
    fn text_helpers() {
        assert_eq!(capitalize_first("light rain"), "Light rain");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(visibility_km(10_000), 10);
        assert_eq!(visibility_km(1_500), 2);
    }

    #[test]
    fn halves_round_up_on_both_sides_of_zero() {
        assert_eq!(round_half_up(21.5), 22);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-0.4), 0);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-4.5), -4);
        assert_eq!(round_half_up(-4.6), -5);
    }

    #[test]
    fn date_formats() {
        let t = Utc.with_ymd_and_hms(2026, 1, 5, 19, 4, 9).unwrap();
        assert_eq!(format_forecast_date(&t), "Mon, Jan 5");
        assert_eq!(format_long_date(&t), "Monday, January 5, 2026");
        assert_eq!(format_clock(&t), "07:04:09 PM");
        assert!(is_night_at(&t));
    }
}
