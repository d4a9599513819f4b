use chrono::{DateTime, Utc};

use crate::core::search::{SearchEngine, SearchOutcome};
use crate::models::{Coordinates, SearchCriteria, SortMode};
use crate::services::{LocationError, LocationProvider};

/// State held for one user between queries
///
/// The last known coordinates survive failed location requests.
#[derive(Debug, Clone)]
pub struct SearchSession {
    engine: SearchEngine,
    pub criteria: SearchCriteria,
    location: Option<Coordinates>,
    located_at: Option<DateTime<Utc>>,
}

impl SearchSession {
    pub fn new(engine: SearchEngine) -> Self {
        Self {
            engine,
            criteria: SearchCriteria::default(),
            location: None,
            located_at: None,
        }
    }

    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    pub fn located_at(&self) -> Option<DateTime<Utc>> {
        self.located_at
    }

    /// Request the current position and keep it for later queries
    ///
    /// On success the sort switches to distance. Holding `&mut self` across
    /// the request keeps a session from issuing overlapping requests.
    pub async fn locate(&mut self, provider: &LocationProvider) -> Result<Coordinates, LocationError> {
        let coords = provider.acquire_location().await?;

        self.location = Some(coords);
        self.located_at = Some(Utc::now());
        self.criteria.sort_by = SortMode::Distance;

        Ok(coords)
    }

    /// Forget the held position
    pub fn clear_location(&mut self) {
        self.location = None;
        self.located_at = None;
        if self.criteria.sort_by == SortMode::Distance {
            self.criteria.sort_by = SortMode::default();
        }
    }

    /// Reset query, state, city and budget; procedure and sort are kept
    pub fn clear_filters(&mut self) {
        self.criteria.query.clear();
        self.criteria.state = None;
        self.criteria.city = None;
        self.criteria.max_budget = None;
    }

    /// Run the current criteria against the held location
    pub fn results(&self) -> SearchOutcome {
        self.engine.search(&self.criteria, self.location)
    }
}
