//! Query controller: owns the dashboard state and drives fetch cycles.
//!
//! Overlapping submissions resolve as "latest wins": every fetch takes a new
//! generation number, and a response is applied only if its generation is
//! still the newest when it arrives. Older responses are dropped.
//!
//! Phase changes are published on a `watch` channel so a front end can
//! redraw as soon as a fetch starts, not only when it finishes.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{model::WeatherReport, provider::WeatherProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failure,
}

/// Everything the dashboard renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    /// Last city fetched successfully (or the initial default).
    pub city: String,
    pub loading: bool,
    pub error: Option<String>,
    /// Pending text in the search box.
    pub search_text: String,
    pub report: Option<WeatherReport>,
    pub generation: u64,
}

impl QueryState {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            loading: false,
            error: None,
            search_text: String::new(),
            report: None,
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failure
        } else if self.report.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// New report stored and city updated.
    Applied,
    /// Error message stored; city and report left as they were.
    Failed(String),
    /// A newer fetch started meanwhile; this result was discarded.
    Superseded,
    /// Blank city; no request was made and the state is untouched.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank search text; nothing happened.
    Ignored,
    Fetched(FetchOutcome),
}

#[derive(Debug)]
pub struct QueryController {
    provider: Arc<dyn WeatherProvider>,
    state: Mutex<QueryState>,
    phase_tx: watch::Sender<Phase>,
}

impl QueryController {
    pub fn new(provider: Arc<dyn WeatherProvider>, default_city: impl Into<String>) -> Self {
        let (phase_tx, _) = watch::channel(Phase::Idle);
        Self { provider, state: Mutex::new(QueryState::new(default_city)), phase_tx }
    }

    /// Receiver notified on every phase transition, including each new
    /// Loading even when the previous phase was already Loading.
    pub fn subscribe_phase(&self) -> watch::Receiver<Phase> {
        self.phase_tx.subscribe()
    }

    /// Copy of the current state for rendering.
    pub fn snapshot_state(&self) -> QueryState {
        self.state.lock().clone()
    }

    pub fn phase(&self) -> Phase {
        self.state.lock().phase()
    }

    pub fn city(&self) -> String {
        self.state.lock().city.clone()
    }

    pub fn set_search_text(&self, text: impl Into<String>) {
        self.state.lock().search_text = text.into();
    }

    /// Submit the search box. Whitespace-only input is a no-op.
    pub async fn submit(&self) -> SubmitOutcome {
        let query = {
            let mut state = self.state.lock();
            let query = state.search_text.trim().to_string();
            if query.is_empty() {
                return SubmitOutcome::Ignored;
            }
            state.search_text.clear();
            query
        };

        SubmitOutcome::Fetched(self.fetch(&query).await)
    }

    /// Fetch the city the controller was created with.
    pub async fn load_initial(&self) -> FetchOutcome {
        let city = self.city();
        self.fetch(&city).await
    }

    /// Blank or whitespace-only cities are a no-op, like a blank search.
    pub async fn fetch(&self, city: &str) -> FetchOutcome {
        let city = city.trim().to_string();
        if city.is_empty() {
            debug!("Ignoring fetch for blank city");
            return FetchOutcome::Ignored;
        }
        let generation = self.begin(&city);

        let result = self.provider.fetch_current_and_forecast(&city).await;

        let mut state = self.state.lock();
        if state.generation != generation {
            debug!(%city, generation, latest = state.generation, "Discarding superseded response");
            return FetchOutcome::Superseded;
        }

        state.loading = false;
        let outcome = match result {
            Ok(report) => {
                info!(%city, days = report.forecast.len(), "Weather updated");
                state.report = Some(report);
                state.city = city;
                state.error = None;
                FetchOutcome::Applied
            }
            Err(err) => {
                warn!(%city, error = %err, "Weather fetch failed");
                let message = err.to_string();
                state.error = Some(message.clone());
                FetchOutcome::Failed(message)
            }
        };
        self.phase_tx.send_replace(state.phase());
        outcome
    }

    fn begin(&self, city: &str) -> u64 {
        let mut state = self.state.lock();
        state.generation += 1;
        state.loading = true;
        state.error = None;
        debug!(city, generation = state.generation, "Fetch started");
        self.phase_tx.send_replace(Phase::Loading);
        state.generation
    }
}
