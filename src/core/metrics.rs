use rand::Rng;

use crate::models::{DerivedMetrics, HospitalRecord};

/// Procedure key that applies no cost multiplier
pub const ALL_PROCEDURES: &str = "All Procedures";

/// Procedure keys offered to users
pub const PROCEDURES: [&str; 10] = [
    ALL_PROCEDURES,
    "Knee Replacement",
    "Hip Replacement",
    "Cardiac Surgery",
    "Cataract Surgery",
    "LASIK",
    "Neurosurgery",
    "Cosmetic Surgery",
    "Dental Implants",
    "Spine Surgery",
];

const PRIVATE_BASE_COST: f64 = 5000.0;
const GOVERNMENT_BASE_COST: f64 = 2000.0;
const PROCEDURE_MULTIPLIER: f64 = 1.5;

const PRIVATE_BASE_RATING: f64 = 4.2;
const GOVERNMENT_BASE_RATING: f64 = 3.8;
const RATING_JITTER: f64 = 0.3;

/// Cost multiplier for a procedure key
///
/// Every key other than [`ALL_PROCEDURES`] costs 1.5x, including unknown keys.
#[inline]
pub fn procedure_multiplier(procedure: &str) -> f64 {
    if procedure == ALL_PROCEDURES {
        1.0
    } else {
        PROCEDURE_MULTIPLIER
    }
}

/// Estimated cost of a procedure at a hospital, in whole currency units
pub fn estimated_cost(record: &HospitalRecord, procedure: &str) -> u32 {
    let base = if record.is_private() {
        PRIVATE_BASE_COST
    } else {
        GOVERNMENT_BASE_COST
    };

    (base * procedure_multiplier(procedure)).round() as u32
}

/// Estimated rating drawn around the ownership baseline
///
/// The result moves by up to ±0.3 between calls and is rounded to one decimal.
/// Callers that rank on ratings must draw once per record and reuse the value.
pub fn estimated_rating<R: Rng + ?Sized>(record: &HospitalRecord, rng: &mut R) -> f64 {
    let base = if record.is_private() {
        PRIVATE_BASE_RATING
    } else {
        GOVERNMENT_BASE_RATING
    };
    let jitter = rng.gen_range(-RATING_JITTER..RATING_JITTER);

    ((base + jitter) * 10.0).round() / 10.0
}

/// Wait-time bracket by bed count; thresholds are exclusive
pub fn estimated_wait_time(record: &HospitalRecord) -> &'static str {
    match record.beds_for_wait_time() {
        beds if beds > 800 => "45-60 min",
        beds if beds > 400 => "30-45 min",
        beds if beds > 200 => "20-30 min",
        _ => "15-25 min",
    }
}

/// Snapshot every estimate for a record once
pub fn derive_metrics<R: Rng + ?Sized>(
    record: &HospitalRecord,
    procedure: &str,
    rng: &mut R,
) -> DerivedMetrics {
    DerivedMetrics {
        estimated_cost: estimated_cost(record, procedure),
        estimated_rating: estimated_rating(record, rng),
        estimated_wait_time: estimated_wait_time(record),
    }
}
