use tracing::{debug, warn};

use crate::{
    error::FetchError,
    location::LocationResolver,
    model::{Coordinate, Forecast},
    provider::ForecastProvider,
};

/// Outcome of the most recent fetch, as seen by the presentation layer.
///
/// Exactly one of the three cases holds at any observable instant; a
/// forecast and an error can never coexist.
#[derive(Debug, Default)]
pub enum SessionState {
    /// No fetch has completed yet.
    #[default]
    Empty,
    Ready(Forecast),
    Failed(FetchError),
}

impl SessionState {
    pub fn forecast(&self) -> Option<&Forecast> {
        match self {
            SessionState::Ready(forecast) => Some(forecast),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            SessionState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Display text of the current error, if the last fetch failed.
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SessionState::Empty)
    }
}

/// Holder of the latest fetch outcome, owned by one presentation scope.
///
/// Created when a forecast view opens and dropped when it closes. Fetches
/// are serialized: `fetch_forecast` takes `&mut self`, so a second fetch on
/// the same session cannot start until the first completes or its future is
/// dropped. Dropping the future cancels the request at the network boundary
/// and leaves the previous state intact.
pub struct ForecastSession {
    provider: Box<dyn ForecastProvider>,
    state: SessionState,
}

impl ForecastSession {
    pub fn new(provider: Box<dyn ForecastProvider>) -> Self {
        Self { provider, state: SessionState::Empty }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Fetches a forecast for `coordinate` and replaces the session state
    /// wholesale with the outcome.
    pub async fn fetch_forecast(&mut self, coordinate: Coordinate) {
        match self.provider.fetch_forecast(coordinate).await {
            Ok(forecast) => {
                debug!(intervals = forecast.intervals.len(), "forecast fetch succeeded");
                self.state = SessionState::Ready(forecast);
            }
            Err(err) => {
                warn!(%err, "forecast fetch failed");
                self.state = SessionState::Failed(err);
            }
        }
    }

    /// Resolves the device location exactly once, then fetches for it.
    ///
    /// When the resolver reports unavailability the session fails without
    /// touching the network.
    pub async fn fetch_forecast_from_location(&mut self, resolver: &dyn LocationResolver) {
        match resolver.resolve().await {
            Ok(coordinate) => self.fetch_forecast(coordinate).await,
            Err(cause) => {
                warn!(%cause, "location resolver produced no coordinate");
                self.state = SessionState::Failed(FetchError::Location(cause));
            }
        }
    }
}
