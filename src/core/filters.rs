use crate::core::metrics::estimated_cost;
use crate::models::{HospitalRecord, SearchCriteria};

/// Case-insensitive substring match on name, city or state; an empty query matches all
#[inline]
pub fn matches_text(record: &HospitalRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    [&record.name, &record.city, &record.state]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Exact match on a region field; `None` matches all
#[inline]
pub fn matches_region(value: &str, filter: Option<&str>) -> bool {
    filter.map_or(true, |wanted| value == wanted)
}

/// Inclusive upper bound on the estimated cost; `None` matches all
#[inline]
pub fn matches_budget(record: &HospitalRecord, procedure: &str, max_budget: Option<u32>) -> bool {
    max_budget.map_or(true, |budget| estimated_cost(record, procedure) <= budget)
}

/// Check a record against every active filter of the criteria
#[inline]
pub fn matches_criteria(record: &HospitalRecord, criteria: &SearchCriteria) -> bool {
    matches_text(record, &criteria.query)
        && matches_region(&record.state, criteria.state.as_deref())
        && matches_region(&record.city, criteria.city.as_deref())
        && matches_budget(record, &criteria.procedure, criteria.max_budget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metrics::ALL_PROCEDURES;
    use crate::models::{FacilityType, OwnershipClass};

    fn create_test_record(name: &str, city: &str, state: &str, ownership: OwnershipClass) -> HospitalRecord {
        HospitalRecord {
            id: 1,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            bed_count: Some(300),
            latitude: 16.8,
            longitude: 96.1,
            ownership_class: ownership,
            facility_type: FacilityType::MultiSpecialty,
        }
    }

    #[test]
    fn test_text_match_is_case_insensitive() {
        let record = create_test_record("Asia Royal Hospital", "Yangon", "Yangon Region", OwnershipClass::Private);

        assert!(matches_text(&record, ""));
        assert!(matches_text(&record, "royal"));
        assert!(matches_text(&record, "YANGON"));
        assert!(matches_text(&record, "region"));
        assert!(!matches_text(&record, "mandalay"));
    }

    #[test]
    fn test_region_match_is_exact() {
        assert!(matches_region("Yangon", None));
        assert!(matches_region("Yangon", Some("Yangon")));
        assert!(!matches_region("Yangon", Some("yangon")));
        assert!(!matches_region("Yangon Region", Some("Yangon")));
    }

    #[test]
    fn test_budget_is_inclusive() {
        let record = create_test_record("Bago General Hospital", "Bago", "Bago Region", OwnershipClass::Government);

        assert!(matches_budget(&record, ALL_PROCEDURES, None));
        assert!(matches_budget(&record, ALL_PROCEDURES, Some(2000)));
        assert!(!matches_budget(&record, ALL_PROCEDURES, Some(1999)));
        assert!(!matches_budget(&record, "Neurosurgery", Some(2000)));
        assert!(matches_budget(&record, "Neurosurgery", Some(3000)));
    }

    #[test]
    fn test_criteria_conjunction() {
        let record = create_test_record("Victoria Hospital", "Yangon", "Yangon Region", OwnershipClass::Private);
        let mut criteria = SearchCriteria {
            query: "victoria".to_string(),
            state: Some("Yangon Region".to_string()),
            city: Some("Yangon".to_string()),
            max_budget: Some(5000),
            ..SearchCriteria::default()
        };
        assert!(matches_criteria(&record, &criteria));

        criteria.max_budget = Some(4999);
        assert!(!matches_criteria(&record, &criteria));

        criteria.max_budget = None;
        criteria.city = Some("Mandalay".to_string());
        assert!(!matches_criteria(&record, &criteria));
    }
}
