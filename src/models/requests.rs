use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::core::metrics::ALL_PROCEDURES;
use crate::models::domain::{Coordinates, SearchCriteria, SortMode};

/// Request to search the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_location_pair"))]
pub struct SearchRequest {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub query: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub procedure: Option<String>,
    #[serde(alias = "max_budget", rename = "maxBudget", default, deserialize_with = "lenient_budget")]
    pub max_budget: Option<u32>,
    #[serde(alias = "sort_by", rename = "sortBy", default)]
    pub sort_by: SortMode,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

fn validate_location_pair(req: &SearchRequest) -> Result<(), ValidationError> {
    if req.latitude.is_some() != req.longitude.is_some() {
        return Err(ValidationError::new("latitude_and_longitude_required_together"));
    }
    Ok(())
}

/// Accept a budget as a number or numeric string
///
/// Empty, negative or unparseable values leave the budget filter off.
fn lenient_budget<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Budget {
        Number(f64),
        Text(String),
    }

    let budget = match Option::<Budget>::deserialize(deserializer)? {
        Some(Budget::Number(n)) if n.is_finite() && n >= 0.0 && n <= u32::MAX as f64 => Some(n as u32),
        Some(Budget::Text(text)) => text.trim().parse().ok(),
        _ => None,
    };
    Ok(budget)
}

impl SearchRequest {
    /// Split into pipeline criteria and the caller's location
    ///
    /// Placeholder region values such as "All States" disable the filter.
    pub fn into_criteria(self) -> (SearchCriteria, Option<Coordinates>) {
        let location = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        };

        let criteria = SearchCriteria {
            query: self.query,
            state: region_filter(self.state, "All States"),
            city: region_filter(self.city, "All Cities"),
            procedure: self
                .procedure
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| ALL_PROCEDURES.to_string()),
            max_budget: self.max_budget,
            sort_by: self.sort_by,
        };

        (criteria, location)
    }
}

fn region_filter(value: Option<String>, placeholder: &str) -> Option<String> {
    value.filter(|v| !(v.is_empty() || v.eq_ignore_ascii_case("any") || v.eq_ignore_ascii_case(placeholder)))
}
