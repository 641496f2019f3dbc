use serde::{Deserialize, Serialize};

use crate::weather_code::WeatherCode;

/// Current conditions as reported by the provider, in the city's local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub weather_code: WeatherCode,
    /// Observation time exactly as the provider sent it.
    pub time: String,
}

/// One day of the forecast window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    /// `YYYY-MM-DD` in the city's local time.
    pub date: String,
    pub temperature_max_c: f64,
    pub temperature_min_c: f64,
    pub weather_code: WeatherCode,
    pub precipitation_mm: f64,
}

/// A validated provider response: current conditions plus the daily window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecastEntry>,
}

/// Temporal position of a forecast day relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Past,
    Today,
    Forecast,
}

impl Badge {
    /// Classify by comparing `YYYY-MM-DD` strings, which sort chronologically.
    pub fn classify(date: &str, today: &str) -> Self {
        match date.cmp(today) {
            std::cmp::Ordering::Less => Self::Past,
            std::cmp::Ordering::Equal => Self::Today,
            std::cmp::Ordering::Greater => Self::Forecast,
        }
    }

    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Past => "past",
            Self::Today => "today",
            Self::Forecast => "forecast",
        }
    }

    pub const fn text(self) -> &'static str {
        match self {
            Self::Past => "Past",
            Self::Today => "Today",
            Self::Forecast => "Forecast",
        }
    }
}
