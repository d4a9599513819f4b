// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AnnotatedHospital, Coordinates, DerivedMetrics, FacilityType, HospitalRecord, OwnershipClass, RankedHospital,
    SearchCriteria, SortMode,
};
pub use requests::SearchRequest;
pub use responses::{ErrorResponse, FiltersResponse, HealthResponse, LocationResponse, SearchResponse};
