//! MediPlan Search - hospital discovery for MediPlan
//!
//! This library provides the search-and-ranking pipeline behind the hospital
//! finder: distance annotation, filtering, metric estimation and ranking over
//! a fixed hospital catalog, plus acquisition of the user's position.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance::distance, SearchEngine, SearchOutcome, SearchSession};
pub use models::{AnnotatedHospital, Coordinates, HospitalRecord, RankedHospital, SearchCriteria, SortMode};
pub use error::AppError;
pub use services::{Catalog, LocationError, LocationProvider};
