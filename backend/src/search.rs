use std::sync::Arc;

use crate::distance::distance_between;
use crate::geocoding::{GeocodeError, Geocoder};
use crate::models::{ErrorKind, ResolvedRoute, SearchState};

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("both city names are required")]
    MissingInput,
    #[error("no match for {}", .0.join(", "))]
    NotFound(Vec<String>),
    #[error("city lookup service unavailable: {0}")]
    ServiceUnavailable(#[source] GeocodeError),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::MissingInput => ErrorKind::MissingInput,
            SearchError::NotFound(_) => ErrorKind::NotFound,
            SearchError::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Searching,
    Resolved,
    ValidationFailed,
    NotFound,
    ServiceError,
}

impl SearchPhase {
    fn settled(outcome: &Result<SearchState, SearchError>) -> Self {
        match outcome {
            Ok(_) => SearchPhase::Resolved,
            Err(SearchError::MissingInput) => SearchPhase::ValidationFailed,
            Err(SearchError::NotFound(_)) => SearchPhase::NotFound,
            Err(SearchError::ServiceUnavailable(_)) => SearchPhase::ServiceError,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, SearchPhase::Idle | SearchPhase::Searching)
    }
}

/// Runs city-pair searches and owns the last published [`SearchState`].
///
/// `search` takes `&mut self`, so one orchestrator never runs two searches at
/// once. The published snapshot only changes when a search settles; on any
/// failure it is replaced by a cleared state so no unpaired marker survives.
pub struct SearchOrchestrator {
    geocoder: Arc<dyn Geocoder>,
    phase: SearchPhase,
    published: Option<SearchState>,
}

impl SearchOrchestrator {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            phase: SearchPhase::Idle,
            published: None,
        }
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn latest(&self) -> Option<&SearchState> {
        self.published.as_ref()
    }

    pub async fn search(&mut self, city1: &str, city2: &str) -> Result<SearchState, SearchError> {
        self.phase = SearchPhase::Searching;
        let outcome = self.run(city1, city2).await;
        self.phase = SearchPhase::settled(&outcome);

        match &outcome {
            Ok(state) => {
                if let Some(route) = state.route {
                    tracing::info!(city1, city2, distance_km = %route.distance_km, "search resolved");
                }
                self.published = Some(state.clone());
            }
            Err(err) => {
                match err {
                    SearchError::ServiceUnavailable(_) => tracing::warn!(city1, city2, "search failed: {err}"),
                    _ => tracing::info!(city1, city2, "search rejected: {err}"),
                }
                self.published = Some(SearchState::cleared(city1, city2));
            }
        }
        outcome
    }

    async fn run(&self, city1: &str, city2: &str) -> Result<SearchState, SearchError> {
        if city1.trim().is_empty() || city2.trim().is_empty() {
            return Err(SearchError::MissingInput);
        }

        let (first, second) = tokio::join!(
            self.geocoder.resolve(city1),
            self.geocoder.resolve(city2)
        );

        match (first, second) {
            (Err(err), _) | (_, Err(err)) => Err(SearchError::ServiceUnavailable(err)),
            (Ok(Some(origin)), Ok(Some(destination))) => Ok(SearchState::resolved(
                city1,
                city2,
                ResolvedRoute {
                    origin,
                    destination,
                    distance_km: distance_between(origin, destination),
                },
            )),
            (Ok(first), Ok(second)) => {
                let missing = [(city1, first), (city2, second)]
                    .into_iter()
                    .filter(|(_, coord)| coord.is_none())
                    .map(|(name, _)| name.to_owned())
                    .collect();
                Err(SearchError::NotFound(missing))
            }
        }
    }
}
