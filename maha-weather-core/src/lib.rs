//! Core library for the `maha-weather` CLI.
//!
//! This crate defines:
//! - The registry of supported Maharashtra cities
//! - The Open-Meteo forecast provider and its response validation
//! - Rendering of a forecast into display strings
//! - The select / fetch / render state machine
//! - Configuration handling
//!
//! It is used by `maha-weather-cli`, but can also back other front-ends.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod registry;
pub mod render;
pub mod weather_code;
pub mod widget;

pub use config::{Config, ProviderSettings};
pub use error::WeatherError;
pub use model::{Badge, CurrentConditions, DailyForecastEntry, ForecastReport};
pub use provider::{ForecastProvider, open_meteo::OpenMeteoProvider, provider_from_config};
pub use registry::City;
pub use render::{CurrentView, DayView, RenderedView, ViewState};
pub use weather_code::WeatherCode;
pub use widget::{FetchOutcome, FetchTicket, Phase, Widget};
