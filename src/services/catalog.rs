use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use thiserror::Error;

use crate::models::{FacilityType, HospitalRecord, OwnershipClass};

/// Hospital list compiled into the binary
const EMBEDDED_CATALOG: &str = include_str!("../../data/hospitals.json");

/// Sentinel the source uses for an unknown bed count
const UNKNOWN_BEDS: &str = "NA";

/// Errors that can occur while loading the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate hospital id: {0}")]
    DuplicateId(u32),

    #[error("Hospital ids must be positive, got 0 for {0:?}")]
    InvalidId(String),

    #[error("Hospital {id} has {len} coordinate values, expected [longitude, latitude]")]
    InvalidCoordinates { id: u32, len: usize },
}

/// Hospital entry as stored in the source asset
///
/// Coordinates come as a GeoJSON-style `[longitude, latitude]` pair.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHospital {
    pub id: u32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub beds: String,
    pub coordinates: Vec<f64>,
}

impl RawHospital {
    /// Convert a source entry into a catalog record
    ///
    /// Swaps the coordinate axes and derives ownership and facility type from
    /// the bed count: unknown or under 200 beds is a private general hospital,
    /// up to 500 a government multi-specialty, above that a teaching hospital.
    pub fn into_record(self) -> Result<HospitalRecord, CatalogError> {
        if self.id == 0 {
            return Err(CatalogError::InvalidId(self.name));
        }

        let [longitude, latitude] = <[f64; 2]>::try_from(self.coordinates.as_slice())
            .map_err(|_| CatalogError::InvalidCoordinates {
                id: self.id,
                len: self.coordinates.len(),
            })?;

        let bed_count = parse_beds(&self.beds);
        let (ownership_class, facility_type) = classify(bed_count);

        Ok(HospitalRecord {
            id: self.id,
            name: self.name,
            city: self.city,
            state: self.state,
            bed_count,
            latitude,
            longitude,
            ownership_class,
            facility_type,
        })
    }
}

/// Parse a source bed count; the sentinel and malformed values are unknown
fn parse_beds(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case(UNKNOWN_BEDS) {
        return None;
    }
    raw.parse().ok()
}

fn classify(bed_count: Option<u32>) -> (OwnershipClass, FacilityType) {
    match bed_count {
        None => (OwnershipClass::Private, FacilityType::GeneralHospital),
        Some(beds) if beds < 200 => (OwnershipClass::Private, FacilityType::GeneralHospital),
        Some(beds) if beds <= 500 => (OwnershipClass::Government, FacilityType::MultiSpecialty),
        Some(_) => (OwnershipClass::Government, FacilityType::TeachingHospital),
    }
}

/// Immutable, ordered list of hospitals
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<HospitalRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate or zero ids
    pub fn new(records: Vec<HospitalRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if record.id == 0 {
                return Err(CatalogError::InvalidId(record.name.clone()));
            }
            if !seen.insert(record.id) {
                return Err(CatalogError::DuplicateId(record.id));
            }
        }

        Ok(Self { records })
    }

    /// Parse a catalog from the source JSON format
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawHospital> = serde_json::from_str(json)?;
        let records = raw
            .into_iter()
            .map(RawHospital::into_record)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(records)
    }

    /// Load a catalog file in the source JSON format
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json(&json)?;
        tracing::info!("Loaded {} hospitals from {}", catalog.len(), path.as_ref().display());
        Ok(catalog)
    }

    /// The hospital list shipped with the binary
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn records(&self) -> &[HospitalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&HospitalRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Distinct states, sorted
    pub fn states(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().map(|record| record.state.as_str()))
    }

    /// Distinct cities, sorted
    pub fn cities(&self) -> Vec<String> {
        distinct_sorted(self.records.iter().map(|record| record.city.as_str()))
    }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: u32, beds: &str, coordinates: Vec<f64>) -> RawHospital {
        RawHospital {
            id,
            name: format!("Hospital {}", id),
            city: "Yangon".to_string(),
            state: "Yangon Region".to_string(),
            beds: beds.to_string(),
            coordinates,
        }
    }

    #[test]
    fn test_coordinates_are_swapped() {
        let record = raw(1, "1500", vec![96.1561, 16.7784]).into_record().unwrap();
        assert_eq!(record.latitude, 16.7784);
        assert_eq!(record.longitude, 96.1561);
    }

    #[test]
    fn test_ownership_derivation() {
        let derive = |beds: &str| {
            let record = raw(1, beds, vec![96.1, 16.8]).into_record().unwrap();
            (record.ownership_class, record.facility_type)
        };

        assert_eq!(derive("NA"), (OwnershipClass::Private, FacilityType::GeneralHospital));
        assert_eq!(derive("199"), (OwnershipClass::Private, FacilityType::GeneralHospital));
        assert_eq!(derive("200"), (OwnershipClass::Government, FacilityType::MultiSpecialty));
        assert_eq!(derive("500"), (OwnershipClass::Government, FacilityType::MultiSpecialty));
        assert_eq!(derive("501"), (OwnershipClass::Government, FacilityType::TeachingHospital));
    }

    #[test]
    fn test_malformed_beds_are_unknown() {
        assert_eq!(parse_beds("NA"), None);
        assert_eq!(parse_beds("about 300"), None);
        assert_eq!(parse_beds(""), None);
        assert_eq!(parse_beds(" 350 "), Some(350));
    }

    #[test]
    fn test_rejects_bad_coordinates() {
        let err = raw(4, "100", vec![96.1]).into_record().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCoordinates { id: 4, len: 1 }));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = r#"[
            {"id": 1, "name": "A", "city": "X", "state": "Y", "beds": "100", "coordinates": [96.1, 16.8]},
            {"id": 1, "name": "B", "city": "X", "state": "Y", "beds": "100", "coordinates": [96.1, 16.8]}
        ]"#;
        assert!(matches!(Catalog::from_json(json), Err(CatalogError::DuplicateId(1))));
    }

    #[test]
    fn test_rejects_zero_id() {
        let json = r#"[{"id": 0, "name": "A", "city": "X", "state": "Y", "beds": "100", "coordinates": [96.1, 16.8]}]"#;
        assert!(matches!(Catalog::from_json(json), Err(CatalogError::InvalidId(_))));
    }

    #[test]
    fn test_embedded_catalog() {
        let catalog = Catalog::embedded().unwrap();

        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.get(1).unwrap().name, "Yangon General Hospital");
        assert_eq!(
            catalog.states(),
            vec!["Bago Region", "Mandalay Region", "Naypyidaw Union Territory", "Yangon Region"]
        );
        assert_eq!(catalog.cities(), vec!["Bago", "Mandalay", "Naypyidaw", "Yangon"]);
    }
}
