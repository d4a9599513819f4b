use serde::{Deserialize, Serialize};

/// A point on the WGS84 ellipsoid in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Whether both axes fall inside their valid degree ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Who runs a hospital
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnershipClass {
    Government,
    Private,
}

/// Kind of facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacilityType {
    #[serde(rename = "General Hospital")]
    GeneralHospital,
    #[serde(rename = "Multi-Specialty")]
    MultiSpecialty,
    #[serde(rename = "Teaching Hospital")]
    TeachingHospital,
}

/// Hospital entry of the catalog
///
/// Records are built once by the catalog loader and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalRecord {
    pub id: u32,
    pub name: String,
    pub city: String,
    pub state: String,
    /// `None` when the source reported the bed count as unknown
    #[serde(rename = "bedCount")]
    pub bed_count: Option<u32>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "ownershipClass")]
    pub ownership_class: OwnershipClass,
    #[serde(rename = "facilityType")]
    pub facility_type: FacilityType,
}

impl HospitalRecord {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn is_private(&self) -> bool {
        self.ownership_class == OwnershipClass::Private
    }

    /// Bed count used for wait-time estimation (unknown counts as 100)
    pub fn beds_for_wait_time(&self) -> u32 {
        self.bed_count.unwrap_or(100)
    }

    /// Bed count used for ranking (unknown counts as 0)
    pub fn beds_for_ranking(&self) -> u32 {
        self.bed_count.unwrap_or(0)
    }
}

/// Catalog record annotated with its distance to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedHospital {
    #[serde(flatten)]
    pub record: HospitalRecord,
    /// Kilometres to the user, rounded to one decimal; `None` without a known location
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

/// Per-query estimates for one hospital
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    #[serde(rename = "estimatedCost")]
    pub estimated_cost: u32,
    #[serde(rename = "estimatedRating")]
    pub estimated_rating: f64,
    #[serde(rename = "estimatedWaitTime")]
    pub estimated_wait_time: &'static str,
}

/// Search hit: the annotated hospital and the metrics it was ranked on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedHospital {
    #[serde(flatten)]
    pub hospital: AnnotatedHospital,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

/// Ranking criterion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Rating,
    Cost,
    #[serde(alias = "bedcount", alias = "bedCount")]
    Beds,
    Distance,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [Self::Rating, Self::Cost, Self::Beds, Self::Distance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Cost => "cost",
            Self::Beds => "beds",
            Self::Distance => "distance",
        }
    }
}

/// User criteria for one search
///
/// `None` on `state`, `city` and `max_budget` means the filter is inactive.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub query: String,
    pub state: Option<String>,
    pub city: Option<String>,
    pub procedure: String,
    pub max_budget: Option<u32>,
    pub sort_by: SortMode,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            state: None,
            city: None,
            procedure: crate::core::metrics::ALL_PROCEDURES.to_string(),
            max_budget: None,
            sort_by: SortMode::default(),
        }
    }
}
