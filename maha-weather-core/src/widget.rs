//! Selection, fetch and render cycle.
//!
//! A fetch is split into [`Widget::begin_fetch`] and [`Widget::complete_fetch`]
//! around the single network call. Each ticket carries the selection
//! generation it was issued under; a result that arrives after the selection
//! changed is dropped instead of overwriting the newer view.

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::{
    error::WeatherError,
    model::ForecastReport,
    provider::ForecastProvider,
    registry::{self, City},
    render::{self, ViewState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Rendered,
    ErrorShown,
}

/// Proof that a fetch was started for a given selection.
#[derive(Debug, Clone, Copy)]
pub struct FetchTicket {
    city: &'static City,
    generation: u64,
}

impl FetchTicket {
    pub fn city(&self) -> &'static City {
        self.city
    }
}

/// What happened to a completed fetch.
#[derive(Debug)]
pub enum FetchOutcome {
    Rendered,
    Failed(WeatherError),
    /// The selection changed while the request was in flight.
    Discarded,
}

#[derive(Debug)]
pub struct Widget {
    provider: Box<dyn ForecastProvider>,
    selected: Option<String>,
    generation: u64,
    phase: Phase,
    view: ViewState,
}

impl Widget {
    pub fn new(provider: Box<dyn ForecastProvider>) -> Self {
        Self {
            provider,
            selected: None,
            generation: 0,
            phase: Phase::Idle,
            view: ViewState::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Change the selected city; `None` or `""` clears the selection.
    ///
    /// Always returns to `Idle` and clears any shown result or error.
    /// Requests already in flight are not cancelled, but their results will
    /// be discarded.
    pub fn select_city(&mut self, id: Option<&str>) {
        self.selected = id.filter(|s| !s.is_empty()).map(str::to_string);
        self.generation += 1;
        self.view.clear();
        self.view.loading = false;
        self.phase = Phase::Idle;
        debug!(selected = ?self.selected, generation = self.generation, "Selection changed");
    }

    /// Validate the selection and enter `Loading`.
    ///
    /// With no valid selection, the validation message is shown and no
    /// ticket is issued, so no request can be made.
    pub fn begin_fetch(&mut self) -> Result<FetchTicket, WeatherError> {
        let city = match self.selected.as_deref() {
            None => Err(WeatherError::NoCitySelected),
            Some(id) => registry::resolve(id).ok_or_else(|| WeatherError::UnknownCity(id.into())),
        };

        let city = match city {
            Ok(city) => city,
            Err(err) => {
                warn!(error = %err, "Fetch rejected before any request");
                self.view.show_error(err.user_message());
                self.view.loading = false;
                self.phase = Phase::ErrorShown;
                return Err(err);
            }
        };

        self.view.clear();
        self.view.loading = true;
        self.phase = Phase::Loading;

        Ok(FetchTicket { city, generation: self.generation })
    }

    /// Apply a finished request, using the local calendar date for badges.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<ForecastReport, WeatherError>,
    ) -> FetchOutcome {
        self.complete_fetch_on(ticket, result, Local::now().date_naive())
    }

    pub fn complete_fetch_on(
        &mut self,
        ticket: FetchTicket,
        result: Result<ForecastReport, WeatherError>,
        today: NaiveDate,
    ) -> FetchOutcome {
        if ticket.generation != self.generation {
            debug!(
                city = ticket.city.id,
                ticket = ticket.generation,
                current = self.generation,
                "Discarding result for a previous selection"
            );
            return FetchOutcome::Discarded;
        }

        let outcome = match result {
            Ok(report) => {
                self.view.show(render::render(ticket.city, &report, today));
                self.phase = Phase::Rendered;
                info!(city = ticket.city.id, days = report.daily.len(), "Forecast rendered");
                FetchOutcome::Rendered
            }
            Err(err) => {
                match &err {
                    WeatherError::Network { status } => warn!(
                        city = ticket.city.id,
                        status = *status,
                        "Provider returned an error status"
                    ),
                    WeatherError::MalformedResponse(reason) => warn!(
                        city = ticket.city.id,
                        reason = %reason,
                        "Provider response failed validation"
                    ),
                    other => {
                        warn!(city = ticket.city.id, error = %other, "Forecast request failed")
                    }
                }
                self.view.show_error(err.user_message());
                self.phase = Phase::ErrorShown;
                FetchOutcome::Failed(err)
            }
        };

        self.view.loading = false;
        outcome
    }

    /// Run one full cycle for the current selection.
    pub async fn fetch_and_render(&mut self) -> Result<(), WeatherError> {
        let ticket = self.begin_fetch()?;
        let result = self.provider.fetch_forecast(ticket.city).await;
        match self.complete_fetch(ticket, result) {
            FetchOutcome::Failed(err) => Err(err),
            FetchOutcome::Rendered | FetchOutcome::Discarded => Ok(()),
        }
    }

    /// Select `id` and immediately fetch it.
    pub async fn show_city(&mut self, id: &str) -> Result<(), WeatherError> {
        self.select_city(Some(id));
        self.fetch_and_render().await
    }
}
