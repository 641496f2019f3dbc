use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    config::ProviderSettings,
    error::WeatherError,
    model::{CurrentConditions, DailyForecastEntry, ForecastReport},
    registry::City,
    weather_code::WeatherCode,
};

use super::ForecastProvider;

const CURRENT_FIELDS: &str = "temperature_2m,weather_code,wind_speed_10m";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weather_code,precipitation_sum";

/// Client for the keyless Open-Meteo forecast endpoint.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    endpoint: Url,
    past_days: u8,
    forecast_days: u8,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(settings: &ProviderSettings) -> anyhow::Result<Self> {
        let base = settings.base_url.trim_end_matches('/');
        let endpoint = Url::parse(&format!("{base}/forecast"))
            .with_context(|| format!("Invalid provider base URL: {}", settings.base_url))?;

        let mut builder = Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            endpoint,
            past_days: settings.past_days,
            forecast_days: settings.forecast_days,
            http,
        })
    }

    fn query(&self, city: &City) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", city.latitude.to_string()),
            ("longitude", city.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
            ("past_days", self.past_days.to_string()),
            ("forecast_days", self.forecast_days.to_string()),
        ]
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    #[instrument(skip(self, city), fields(city = city.id))]
    async fn fetch_forecast(&self, city: &City) -> Result<ForecastReport, WeatherError> {
        debug!(
            endpoint = %self.endpoint,
            lat = city.latitude,
            lon = city.longitude,
            "Requesting forecast"
        );

        let res = self
            .http
            .get(self.endpoint.clone())
            .query(&self.query(city))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::Network { status: status.as_u16() });
        }

        let body = res.text().await?;
        parse_report(&body)
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    time: String,
    temperature_2m: f64,
    wind_speed_10m: f64,
    weather_code: WeatherCode,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    weather_code: Vec<WeatherCode>,
    precipitation_sum: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current: Option<OmCurrent>,
    daily: Option<OmDaily>,
}

/// Validate a response body against the expected schema.
pub(crate) fn parse_report(body: &str) -> Result<ForecastReport, WeatherError> {
    let parsed: OmResponse = serde_json::from_str(body)
        .map_err(|e| WeatherError::MalformedResponse(format!("invalid JSON body: {e}")))?;

    let current = parsed
        .current
        .ok_or_else(|| WeatherError::MalformedResponse("missing `current` section".into()))?;
    let daily = parsed
        .daily
        .ok_or_else(|| WeatherError::MalformedResponse("missing `daily` section".into()))?;

    let days = daily.time.len();
    let lengths = [
        ("temperature_2m_max", daily.temperature_2m_max.len()),
        ("temperature_2m_min", daily.temperature_2m_min.len()),
        ("weather_code", daily.weather_code.len()),
        ("precipitation_sum", daily.precipitation_sum.len()),
    ];
    if let Some((field, len)) = lengths.iter().find(|(_, len)| *len != days) {
        return Err(WeatherError::MalformedResponse(format!(
            "daily `{field}` has {len} values for {days} days"
        )));
    }

    let entries = daily
        .time
        .into_iter()
        .enumerate()
        .map(|(i, date)| DailyForecastEntry {
            date,
            temperature_max_c: daily.temperature_2m_max[i],
            temperature_min_c: daily.temperature_2m_min[i],
            weather_code: daily.weather_code[i],
            precipitation_mm: daily.precipitation_sum[i],
        })
        .collect();

    Ok(ForecastReport {
        current: CurrentConditions {
            temperature_c: current.temperature_2m,
            wind_speed_kmh: current.wind_speed_10m,
            weather_code: current.weather_code,
            time: current.time,
        },
        daily: entries,
    })
}
