// Unit tests for MediPlan Search

use mediplan_search::core::{
    distance::{distance, haversine_distance},
    filters::{matches_budget, matches_criteria, matches_text},
    metrics::{estimated_cost, estimated_rating, estimated_wait_time, ALL_PROCEDURES},
};
use mediplan_search::models::{Coordinates, FacilityType, HospitalRecord, OwnershipClass, SearchCriteria};
use mediplan_search::services::{Catalog, RawHospital};
use rand::{rngs::StdRng, SeedableRng};

fn create_record(beds: Option<u32>, ownership: OwnershipClass) -> HospitalRecord {
    HospitalRecord {
        id: 1,
        name: "Test Hospital".to_string(),
        city: "Yangon".to_string(),
        state: "Yangon Region".to_string(),
        bed_count: beds,
        latitude: 16.8,
        longitude: 96.1,
        ownership_class: ownership,
        facility_type: FacilityType::GeneralHospital,
    }
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(16.7784, 96.1561, 16.7784, 96.1561);
    assert!(distance < 0.01);
}

#[test]
fn test_distance_symmetry_over_grid() {
    let points: Vec<Coordinates> = [-80.0, -33.5, 0.0, 16.7784, 51.5, 89.9]
        .iter()
        .flat_map(|&lat| [-179.0, -74.0, 0.0, 96.1561, 151.2].map(|lon| Coordinates::new(lat, lon)))
        .collect();

    for &a in &points {
        assert_eq!(distance(a, a), 0.0);
        for &b in &points {
            let (ab, ba) = (distance(a, b), distance(b, a));
            assert!((ab - ba).abs() < 1e-9, "asymmetric: {:?} {:?} -> {} vs {}", a, b, ab, ba);
            assert!(ab >= 0.0);
        }
    }
}

#[test]
fn test_quarter_circumference() {
    // A quarter of the equator on a 6371 km sphere
    let d = distance(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 90.0));
    assert!((d - 10007.5).abs() < 0.1, "got {}", d);
}

#[test]
fn test_wait_time_boundaries() {
    let wait = |beds| estimated_wait_time(&create_record(Some(beds), OwnershipClass::Government));

    assert_eq!(wait(800), "30-45 min");
    assert_eq!(wait(400), "20-30 min");
    assert_eq!(wait(200), "15-25 min");
    assert_eq!(wait(201), "20-30 min");
}

#[test]
fn test_cost_table() {
    let private = create_record(None, OwnershipClass::Private);
    let government = create_record(Some(700), OwnershipClass::Government);

    assert_eq!(estimated_cost(&private, ALL_PROCEDURES), 5000);
    assert_eq!(estimated_cost(&government, "Spine Surgery"), 3000);
}

#[test]
fn test_rating_varies_between_calls() {
    let record = create_record(Some(300), OwnershipClass::Government);
    let mut rng = StdRng::seed_from_u64(3);

    let ratings: std::collections::HashSet<u64> = (0..100)
        .map(|_| (estimated_rating(&record, &mut rng) * 10.0).round() as u64)
        .collect();
    assert!(ratings.len() > 1);
}

#[test]
fn test_budget_boundary_is_inclusive() {
    let record = create_record(Some(900), OwnershipClass::Government);
    assert!(matches_budget(&record, ALL_PROCEDURES, Some(2000)));
    assert!(!matches_budget(&record, ALL_PROCEDURES, Some(1999)));
}

#[test]
fn test_text_query_searches_state() {
    let record = create_record(Some(100), OwnershipClass::Private);
    assert!(matches_text(&record, "yangon reg"));
    assert!(!matches_text(&record, "bago"));
}

#[test]
fn test_inactive_filters_match_everything() {
    let catalog = Catalog::embedded().unwrap();
    let criteria = SearchCriteria::default();
    assert!(catalog.records().iter().all(|r| matches_criteria(r, &criteria)));
}

#[test]
fn test_ingestion_swaps_axes() {
    let raw: RawHospital = serde_json::from_str(
        r#"{"id": 7, "name": "Naypyidaw General Hospital", "city": "Naypyidaw",
            "state": "Naypyidaw Union Territory", "beds": "800", "coordinates": [96.0785, 19.7633]}"#,
    )
    .unwrap();
    let record = raw.into_record().unwrap();

    assert_eq!(record.coordinates(), Coordinates::new(19.7633, 96.0785));
    assert_eq!(record.ownership_class, OwnershipClass::Government);
    assert_eq!(record.facility_type, FacilityType::TeachingHospital);
}
