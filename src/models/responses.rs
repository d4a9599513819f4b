use serde::{Deserialize, Serialize};

use crate::core::search::SearchOutcome;
use crate::models::domain::{Coordinates, RankedHospital};
use crate::services::LocationError;

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub hospitals: Vec<RankedHospital>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    pub truncated: bool,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        Self {
            hospitals: outcome.hospitals,
            total_results: outcome.total_matches,
            truncated: outcome.truncated,
        }
    }
}

/// Values available to the search form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersResponse {
    pub states: Vec<String>,
    pub cities: Vec<String>,
    pub procedures: Vec<String>,
    #[serde(rename = "sortModes")]
    pub sort_modes: Vec<String>,
}

/// Outcome of a location request; exactly one of `coords` and `error` is set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResponse {
    pub coords: Option<Coordinates>,
    pub error: Option<LocationError>,
    pub message: Option<String>,
}

impl From<Result<Coordinates, LocationError>> for LocationResponse {
    fn from(result: Result<Coordinates, LocationError>) -> Self {
        match result {
            Ok(coords) => Self {
                coords: Some(coords),
                error: None,
                message: None,
            },
            Err(e) => Self {
                coords: None,
                error: Some(e),
                message: Some(e.to_string()),
            },
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub hospitals: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
