use std::collections::BTreeSet;

use super::models::{Category, MapLocation, UserType};

/// Returns the locations visible for the given query, category filters and viewer, in catalog order.
pub fn filter<'a>(
    locations: &'a [MapLocation],
    query: &str,
    active_filters: &BTreeSet<Category>,
    user_type: UserType,
) -> Vec<&'a MapLocation> {
    let needle = query.to_lowercase();
    locations
        .iter()
        .filter(|loc| matches_query(loc, &needle))
        .filter(|loc| active_filters.is_empty() || active_filters.contains(&loc.category))
        .filter(|loc| user_type == UserType::Passenger || loc.category.visible_to_visitors())
        .collect()
}

fn matches_query(loc: &MapLocation, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    loc.name.to_lowercase().contains(needle)
        || loc.description.as_deref().map(|d| d.to_lowercase().contains(needle)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::catalog::builtin_layout;

    fn ids<'a>(v: &[&'a MapLocation]) -> Vec<&'a str> {
        v.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn query_matches_name_case_insensitively() {
        let locs = vec![
            MapLocation::new("rest1", "Café Central", Category::Restaurant, [-10.0, 0.0, 5.0]),
            MapLocation::new("duty1", "Duty Free Central", Category::Shop, [0.0, 0.0, 0.0]),
        ];
        let none = BTreeSet::new();
        assert_eq!(ids(&filter(&locs, "café", &none, UserType::Passenger)), vec!["rest1"]);
        assert_eq!(ids(&filter(&locs, "CAFÉ", &none, UserType::Passenger)), vec!["rest1"]);
        let restaurants: BTreeSet<_> = [Category::Restaurant].into_iter().collect();
        assert_eq!(ids(&filter(&locs, "café", &restaurants, UserType::Passenger)), vec!["rest1"]);
    }

    #[test]
    fn query_matches_description() {
        let locs = builtin_layout();
        let hits = filter(&locs, "dubai", &BTreeSet::new(), UserType::Passenger);
        assert_eq!(ids(&hits), vec!["B12"]);
    }

    #[test]
    fn empty_query_and_filters_pass_everything_for_passengers() {
        let locs = builtin_layout();
        assert_eq!(filter(&locs, "", &BTreeSet::new(), UserType::Passenger).len(), locs.len());
    }

    #[test]
    fn visitors_never_see_gates_or_security() {
        let locs = builtin_layout();
        let seen = filter(&locs, "", &BTreeSet::new(), UserType::Visitor);
        assert!(!seen.is_empty());
        assert!(seen.iter().all(|l| l.category != Category::Gate && l.category != Category::Security));
        assert!(seen.iter().all(|l| l.category != Category::Exit));
    }

    #[test]
    fn visitor_filter_on_gates_is_empty() {
        let locs = builtin_layout();
        let gates: BTreeSet<_> = [Category::Gate].into_iter().collect();
        assert!(filter(&locs, "", &gates, UserType::Visitor).is_empty());
    }

    #[test]
    fn result_preserves_catalog_order() {
        let locs = builtin_layout();
        let picked: BTreeSet<_> = [Category::Shop, Category::Gate].into_iter().collect();
        let hits = ids(&filter(&locs, "", &picked, UserType::Passenger));
        let expected: Vec<&str> = locs
            .iter()
            .filter(|l| picked.contains(&l.category))
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(hits, expected);
        assert_eq!(hits.first(), Some(&"A1"));
    }
}
