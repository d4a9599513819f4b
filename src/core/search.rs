use std::cmp::Ordering;
use std::sync::Arc;

use rand::Rng;

use crate::core::{distance::distance, filters::matches_criteria, metrics::derive_metrics};
use crate::models::{AnnotatedHospital, Coordinates, RankedHospital, SearchCriteria, SortMode};
use crate::services::Catalog;

/// Maximum number of hospitals returned by a search
pub const MAX_RESULTS: usize = 50;

/// Result of the search process
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub hospitals: Vec<RankedHospital>,
    /// Number of hospitals that passed the filters, before truncation
    pub total_matches: usize,
    pub truncated: bool,
}

/// Search orchestrator - runs the annotate / filter / rank / truncate pipeline
///
/// # Pipeline Stages
/// 1. Distance annotation against the user's location, if known
/// 2. Filtering on text, state, city and budget
/// 3. Metric snapshot and ranking by the selected sort mode
/// 4. Truncation to [`MAX_RESULTS`]
#[derive(Debug, Clone)]
pub struct SearchEngine {
    catalog: Arc<Catalog>,
}

impl SearchEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Search the catalog using the thread-local random source for ratings
    pub fn search(&self, criteria: &SearchCriteria, user_location: Option<Coordinates>) -> SearchOutcome {
        self.search_with_rng(criteria, user_location, &mut rand::thread_rng())
    }

    /// Search the catalog, drawing rating estimates from `rng`
    ///
    /// Each hospital's metrics are derived exactly once per call, so the
    /// rating comparator sees a fixed value for every record.
    pub fn search_with_rng<R: Rng + ?Sized>(
        &self,
        criteria: &SearchCriteria,
        user_location: Option<Coordinates>,
        rng: &mut R,
    ) -> SearchOutcome {
        let mut ranked: Vec<RankedHospital> = self
            .catalog
            .records()
            .iter()
            // Stage 1: Distance annotation
            .map(|record| AnnotatedHospital {
                distance_km: user_location.map(|origin| distance(origin, record.coordinates())),
                record: record.clone(),
            })
            // Stage 2: Filtering
            .filter(|hospital| matches_criteria(&hospital.record, criteria))
            // Stage 3a: Metric snapshot
            .map(|hospital| {
                let metrics = derive_metrics(&hospital.record, &criteria.procedure, &mut *rng);
                RankedHospital { hospital, metrics }
            })
            .collect();

        let total_matches = ranked.len();
        tracing::debug!(
            "{} of {} hospitals passed filters (sort: {})",
            total_matches,
            self.catalog.len(),
            criteria.sort_by.as_str()
        );

        // Stage 3b: Ranking
        ranked.sort_by(|a, b| compare(criteria.sort_by, a, b));

        // Stage 4: Truncation
        ranked.truncate(MAX_RESULTS);

        SearchOutcome {
            hospitals: ranked,
            total_matches,
            truncated: total_matches > MAX_RESULTS,
        }
    }
}

/// Compare two hits under a sort mode; `sort_by` is stable so ties keep catalog order
fn compare(mode: SortMode, a: &RankedHospital, b: &RankedHospital) -> Ordering {
    match mode {
        SortMode::Rating => b
            .metrics
            .estimated_rating
            .partial_cmp(&a.metrics.estimated_rating)
            .unwrap_or(Ordering::Equal),
        SortMode::Cost => a.metrics.estimated_cost.cmp(&b.metrics.estimated_cost),
        SortMode::Beds => b
            .hospital
            .record
            .beds_for_ranking()
            .cmp(&a.hospital.record.beds_for_ranking()),
        SortMode::Distance => match (a.hospital.distance_km, b.hospital.distance_km) {
            (Some(da), Some(db)) => da.partial_cmp(&db).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
    }
}
