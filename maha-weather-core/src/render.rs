//! Mapping from a validated [`ForecastReport`] to display strings.
//!
//! Everything here is pure: the same report and date always produce the
//! same presentation.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use crate::{
    model::{Badge, CurrentConditions, DailyForecastEntry, ForecastReport},
    registry::City,
    weather_code::WeatherCode,
};

/// Display strings for the current-conditions block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentView {
    pub temperature: String,
    pub wind_speed: String,
    pub condition: String,
    pub last_updated: String,
}

/// Display strings for one forecast day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayView {
    pub badge_class: &'static str,
    pub badge_text: &'static str,
    pub weekday: String,
    pub short_date: String,
    pub condition: String,
    pub max_temp: String,
    pub min_temp: String,
    pub precipitation: String,
}

/// A full render of one successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    pub city_name: String,
    pub current: CurrentView,
    pub forecast: Vec<DayView>,
}

/// Output ports written by the widget.
///
/// Results are either fully present or fully absent; `error` and results
/// are never shown together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub loading: bool,
    pub error: Option<String>,
    pub city_name: Option<String>,
    pub current: Option<CurrentView>,
    pub forecast: Vec<DayView>,
}

impl ViewState {
    pub fn clear(&mut self) {
        self.error = None;
        self.clear_results();
    }

    pub fn clear_results(&mut self) {
        self.city_name = None;
        self.current = None;
        self.forecast.clear();
    }

    pub fn show(&mut self, view: RenderedView) {
        self.error = None;
        self.city_name = Some(view.city_name);
        self.current = Some(view.current);
        self.forecast = view.forecast;
    }

    pub fn show_error(&mut self, message: &str) {
        self.clear_results();
        self.error = Some(message.to_string());
    }

    pub fn has_results(&self) -> bool {
        self.current.is_some()
    }
}

pub fn render(city: &City, report: &ForecastReport, today: NaiveDate) -> RenderedView {
    let today = today.format("%Y-%m-%d").to_string();
    RenderedView {
        city_name: city.name.to_string(),
        current: render_current(&report.current),
        forecast: report.daily.iter().map(|d| render_day(d, &today)).collect(),
    }
}

fn render_current(current: &CurrentConditions) -> CurrentView {
    CurrentView {
        temperature: format_temperature(current.temperature_c),
        wind_speed: format_wind_speed(current.wind_speed_kmh),
        condition: condition_label(current.weather_code),
        last_updated: format!("Last updated: {}", format_observation_time(&current.time)),
    }
}

fn render_day(day: &DailyForecastEntry, today: &str) -> DayView {
    let badge = Badge::classify(&day.date, today);
    let (weekday, short_date) = match NaiveDate::parse_from_str(&day.date, "%Y-%m-%d") {
        Ok(date) => (date.format("%a").to_string(), date.format("%b %-d").to_string()),
        Err(_) => (String::new(), day.date.clone()),
    };

    DayView {
        badge_class: badge.css_class(),
        badge_text: badge.text(),
        weekday,
        short_date,
        condition: condition_label(day.weather_code),
        max_temp: format_temperature(day.temperature_max_c),
        min_temp: format_temperature(day.temperature_min_c),
        precipitation: format_precipitation(day.precipitation_mm),
    }
}

fn condition_label(code: WeatherCode) -> String {
    if !code.is_known() {
        debug!(code = code.0, "Unrecognised weather code");
    }
    code.label().to_string()
}

/// Round half up, so -0.5 becomes 0 rather than -1.
///
/// `value - floor(value)` is exact, so values just below a tie stay below it.
fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{}°C", round_half_up(celsius))
}

pub fn format_wind_speed(kmh: f64) -> String {
    format!("{} km/h", round_half_up(kmh))
}

pub fn format_precipitation(mm: f64) -> String {
    let tenths = round_half_up(mm * 10.0);
    let sign = if tenths < 0 { "-" } else { "" };
    let tenths = tenths.unsigned_abs();
    format!("{sign}{}.{} mm", tenths / 10, tenths % 10)
}

/// Format a provider timestamp as `HH:MM:SS`, or return it unchanged if it
/// cannot be parsed.
pub fn format_observation_time(raw: &str) -> String {
    let parsed = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.naive_local()));

    match parsed {
        Ok(dt) => dt.format("%H:%M:%S").to_string(),
        Err(e) => {
            debug!(raw, error = %e, "Unparsable observation time; showing it as-is");
            raw.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    fn report() -> ForecastReport {
        let day = |date: &str, max, min, code, precip| DailyForecastEntry {
            date: date.to_string(),
            temperature_max_c: max,
            temperature_min_c: min,
            weather_code: WeatherCode(code),
            precipitation_mm: precip,
        };
        ForecastReport {
            current: CurrentConditions {
                temperature_c: 21.6,
                wind_speed_kmh: 13.4,
                weather_code: WeatherCode(3),
                time: "2024-06-10T14:15".into(),
            },
            daily: vec![
                day("2024-06-08", 30.4, 22.5, 0, 0.0),
                day("2024-06-10", 29.5, 21.49, 63, 2.34),
                day("2024-06-12", 27.0, 20.0, 42, 12.05),
            ],
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[test]
    fn rounding_rules() {
        assert_eq!(format_temperature(21.6), "22°C");
        assert_eq!(format_wind_speed(13.4), "13 km/h");
        assert_eq!(format_precipitation(2.34), "2.3 mm");
    }

    #[test]
    fn precipitation_ties_round_up() {
        assert_eq!(format_precipitation(0.25), "0.3 mm");
        assert_eq!(format_precipitation(0.75), "0.8 mm");
        assert_eq!(format_precipitation(1.25), "1.3 mm");
        assert_eq!(format_precipitation(0.0), "0.0 mm");
        assert_eq!(format_precipitation(31.5), "31.5 mm");
    }

    #[test]
    fn tiny_negative_precipitation_has_no_negative_zero() {
        assert_eq!(format_precipitation(-0.01), "0.0 mm");
        assert_eq!(format_precipitation(-0.26), "-0.3 mm");
    }

    #[test]
    fn value_just_below_a_tie_rounds_down() {
        let below_half = 0.499_999_999_999_999_94_f64;
        assert!(below_half < 0.5);
        assert_eq!(format_temperature(below_half), "0°C");
        assert_eq!(format_wind_speed(12.499_999_999_999_998), "12 km/h");
    }

    #[test]
    fn negative_temperatures_round_half_up_without_negative_zero() {
        assert_eq!(format_temperature(-0.4), "0°C");
        assert_eq!(format_temperature(-0.5), "0°C");
        assert_eq!(format_temperature(-2.6), "-3°C");
        assert_eq!(format_temperature(2.5), "3°C");
    }

    #[test]
    fn current_block() {
        let view = render(registry::resolve("mumbai").unwrap(), &report(), today());

        assert_eq!(view.city_name, "Mumbai");
        assert_eq!(view.current.temperature, "22°C");
        assert_eq!(view.current.wind_speed, "13 km/h");
        assert_eq!(view.current.condition, "Overcast");
        assert_eq!(view.current.last_updated, "Last updated: 14:15:00");
    }

    #[test]
    fn forecast_list_keeps_provider_order_and_badges() {
        let view = render(registry::resolve("mumbai").unwrap(), &report(), today());
        let badges: Vec<_> = view.forecast.iter().map(|d| d.badge_text).collect();
        assert_eq!(badges, ["Past", "Today", "Forecast"]);

        let today = &view.forecast[1];
        assert_eq!(today.badge_class, "today");
        assert_eq!(today.weekday, "Mon");
        assert_eq!(today.short_date, "Jun 10");
        assert_eq!(today.condition, "Moderate rain");
        assert_eq!(today.max_temp, "30°C");
        assert_eq!(today.min_temp, "21°C");
        assert_eq!(today.precipitation, "2.3 mm");

        assert_eq!(view.forecast[2].condition, "Unknown");
    }

    #[test]
    fn rendering_is_idempotent() {
        let city = registry::resolve("latur").unwrap();
        let report = report();
        assert_eq!(render(city, &report, today()), render(city, &report, today()));
    }

    #[test]
    fn observation_time_formats() {
        assert_eq!(format_observation_time("2024-06-10T09:05"), "09:05:00");
        assert_eq!(format_observation_time("2024-06-10T09:05:30"), "09:05:30");
        assert_eq!(format_observation_time("2024-06-10T09:05:30+05:30"), "09:05:30");
    }

    #[test]
    fn unparsable_observation_time_is_shown_raw() {
        assert_eq!(format_observation_time("yesterday-ish"), "yesterday-ish");
        assert_eq!(format_observation_time(""), "");
    }

    #[test]
    fn unparsable_day_keeps_raw_date() {
        let mut report = report();
        report.daily[0].date = "someday".into();
        let view = render(registry::resolve("pune").unwrap(), &report, today());

        assert_eq!(view.forecast[0].weekday, "");
        assert_eq!(view.forecast[0].short_date, "someday");
    }

    #[test]
    fn view_state_error_replaces_results() {
        let mut state = ViewState::default();
        state.show(render(registry::resolve("pune").unwrap(), &report(), today()));
        assert!(state.has_results());

        state.show_error("boom");
        assert!(!state.has_results());
        assert!(state.forecast.is_empty());
        assert!(state.city_name.is_none());
        assert_eq!(state.error.as_deref(), Some("boom"));
    }
}
