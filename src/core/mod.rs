// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod metrics;
pub mod search;
pub mod session;

pub use distance::{distance, haversine_distance};
pub use filters::{matches_budget, matches_criteria, matches_region, matches_text};
pub use metrics::{derive_metrics, estimated_cost, estimated_rating, estimated_wait_time, ALL_PROCEDURES, PROCEDURES};
pub use search::{SearchEngine, SearchOutcome, MAX_RESULTS};
pub use session::SearchSession;
