use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{SearchEngine, PROCEDURES};
use crate::models::{
    ErrorResponse, FiltersResponse, HealthResponse, LocationResponse, SearchRequest, SearchResponse, SortMode,
};
use crate::services::LocationProvider;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: SearchEngine,
    pub locator: LocationProvider,
}

/// Configure all hospital-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/hospitals/search", web::post().to(search_hospitals))
        .route("/hospitals/filters", web::get().to(list_filters))
        .route("/hospitals/{id}", web::get().to(get_hospital))
        .route("/location", web::post().to(locate));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let hospitals = state.engine.catalog().len();
    let status = if hospitals > 0 { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        hospitals,
        timestamp: chrono::Utc::now(),
    })
}

/// Search hospitals endpoint
///
/// POST /api/v1/hospitals/search
///
/// Request body:
/// ```json
/// {
///   "query": "string",
///   "state": "string | All States",
///   "city": "string | All Cities",
///   "procedure": "All Procedures",
///   "maxBudget": 5000,
///   "sortBy": "rating|cost|beds|distance",
///   "latitude": 16.78,
///   "longitude": 96.15
/// }
/// ```
async fn search_hospitals(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let (criteria, location) = req.into_inner().into_criteria();
    if criteria.sort_by == SortMode::Distance && location.is_none() {
        tracing::debug!("Distance sort requested without a location, keeping catalog order");
    }

    let outcome = state.engine.search(&criteria, location);

    tracing::info!(
        "Returning {} hospitals (of {} matches) for query {:?}",
        outcome.hospitals.len(),
        outcome.total_matches,
        criteria.query
    );

    HttpResponse::Ok().json(SearchResponse::from(outcome))
}

/// Filter values endpoint
///
/// GET /api/v1/hospitals/filters
async fn list_filters(state: web::Data<AppState>) -> impl Responder {
    let catalog = state.engine.catalog();

    HttpResponse::Ok().json(FiltersResponse {
        states: catalog.states(),
        cities: catalog.cities(),
        procedures: PROCEDURES.iter().map(|p| p.to_string()).collect(),
        sort_modes: SortMode::ALL.iter().map(|m| m.as_str().to_string()).collect(),
    })
}

/// Single hospital endpoint
///
/// GET /api/v1/hospitals/{id}
async fn get_hospital(state: web::Data<AppState>, path: web::Path<u32>) -> impl Responder {
    let id = path.into_inner();

    match state.engine.catalog().get(id) {
        Some(record) => HttpResponse::Ok().json(record),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "Hospital not found".to_string(),
            message: format!("No hospital with id {}", id),
            status_code: 404,
        }),
    }
}

/// Server-side location endpoint
///
/// POST /api/v1/location
///
/// Always answers 200; failures are reported in the `error` field.
async fn locate(state: web::Data<AppState>) -> impl Responder {
    let result = state.locator.acquire_location().await;
    HttpResponse::Ok().json(LocationResponse::from(result))
}
