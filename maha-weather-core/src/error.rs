use thiserror::Error;

/// Shown when a fetch is triggered with no city selected.
pub const SELECT_CITY_MESSAGE: &str = "Please select a city first.";

/// Shown for every network or response failure.
pub const FETCH_FAILED_MESSAGE: &str =
    "Could not load weather data. Check your connection and try again.";

/// Failures of a single fetch-and-render cycle.
///
/// The variants are kept apart for logging; the user only ever sees
/// [`WeatherError::user_message`].
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("No city selected")]
    NoCitySelected,

    #[error("Unknown city '{0}'")]
    UnknownCity(String),

    #[error("Weather provider responded with HTTP {status}")]
    Network { status: u16 },

    #[error("Request to weather provider failed: {0}")]
    Transport(String),

    #[error("Malformed response from weather provider: {0}")]
    MalformedResponse(String),
}

impl WeatherError {
    /// True for errors raised before any network activity.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::NoCitySelected | Self::UnknownCity(_))
    }

    pub fn user_message(&self) -> &'static str {
        if self.is_validation() {
            SELECT_CITY_MESSAGE
        } else {
            FETCH_FAILED_MESSAGE
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Network { status: status.as_u16() },
            None => Self::Transport(err.to_string()),
        }
    }
}
