use uuid::Uuid;

use kelpie_domain::{
	compat,
	geo::{self, Coordinates},
	listing::{PlacementStatus, ResourceType, Tier},
	merge, page,
	region::Region,
};

fn strings(values: &[&str]) -> Vec<String> {
	values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn compatibility_requires_age_stage_membership() {
	let ages = strings(&["puppy", "adolescent"]);
	let issues = strings(&["barking"]);

	assert!(compat::is_compatible(&ages, &issues, "puppy", None));
	assert!(!compat::is_compatible(&ages, &issues, "senior", None));
}

#[test]
fn compatibility_is_exact_membership_not_substring() {
	let ages = strings(&["puppy"]);
	let issues = strings(&["separation_anxiety"]);

	assert!(!compat::is_compatible(&ages, &issues, "pup", None));
	assert!(!compat::is_compatible(&ages, &issues, "puppy", Some("anxiety")));
	assert!(compat::is_compatible(&ages, &issues, "puppy", Some("separation_anxiety")));
}

#[test]
fn compatibility_rejects_empty_age_sets() {
	let issues = strings(&["barking"]);

	assert!(!compat::is_compatible(&[], &issues, "puppy", None));
}

#[test]
fn compatibility_ignores_behaviour_issues_when_not_requested() {
	let ages = strings(&["adult"]);

	assert!(compat::is_compatible(&ages, &[], "adult", None));
	assert!(!compat::is_compatible(&ages, &[], "adult", Some("barking")));
}

#[test]
fn haversine_of_identical_points_is_zero() {
	let point = Coordinates { latitude: -37.82, longitude: 145.0 };

	assert!(geo::haversine_km(point, point).abs() < 1e-9);
}

#[test]
fn haversine_matches_one_degree_of_latitude() {
	let a = Coordinates { latitude: 0.0, longitude: 0.0 };
	let b = Coordinates { latitude: 1.0, longitude: 0.0 };
	let distance = geo::haversine_km(a, b);

	// One degree of latitude on a 6371 km sphere is ~111.19 km.
	assert!((distance - 111.19).abs() < 0.05, "unexpected distance: {distance}");
}

#[test]
fn haversine_is_symmetric() {
	let a = Coordinates { latitude: -37.8136, longitude: 144.9631 };
	let b = Coordinates { latitude: -37.82, longitude: 145.0 };

	assert!((geo::haversine_km(a, b) - geo::haversine_km(b, a)).abs() < 1e-9);
}

#[test]
fn radius_boundary_is_inclusive() {
	let a = Coordinates { latitude: 0.0, longitude: 0.0 };
	let b = Coordinates { latitude: 1.0, longitude: 0.0 };
	let exact = geo::haversine_km(a, b);

	assert!(geo::within_radius(a, b, exact));
	assert!(!geo::within_radius(a, b, exact - 0.01));
}

#[test]
fn merge_keeps_featured_first_and_drops_duplicates() {
	let b1 = Uuid::new_v4();
	let b2 = Uuid::new_v4();
	let b3 = Uuid::new_v4();
	let b4 = Uuid::new_v4();
	let merged = merge::merge_tiers(vec![b1], vec![b3, b1, b2], vec![b4, b1], |id| *id);

	assert_eq!(merged, vec![b1, b3, b2, b4]);
}

#[test]
fn merge_of_empty_featured_tier_preserves_lower_tiers() {
	let b2 = Uuid::new_v4();
	let b3 = Uuid::new_v4();
	let merged = merge::merge_tiers(Vec::new(), vec![b3, b2], Vec::new(), |id| *id);

	assert_eq!(merged, vec![b3, b2]);
}

#[test]
fn paginate_slices_and_reports_totals() {
	let slice = page::paginate(vec![1, 2, 3, 4], 1, 2);

	assert_eq!(slice.items, vec![1, 2]);
	assert_eq!(slice.total, 4);
	assert!(slice.has_more);

	let slice = page::paginate(vec![1, 2, 3, 4], 2, 2);

	assert_eq!(slice.items, vec![3, 4]);
	assert_eq!(slice.total, 4);
	assert!(!slice.has_more);
}

#[test]
fn paginate_past_the_end_yields_an_empty_slice() {
	let slice = page::paginate(vec![1, 2, 3], 5, 2);

	assert!(slice.items.is_empty());
	assert_eq!(slice.total, 3);
	assert!(!slice.has_more);
}

#[test]
fn paginate_non_positive_pages_yield_empty_slices() {
	let slice = page::paginate(vec![1, 2, 3], 0, 2);

	assert!(slice.items.is_empty());
	assert_eq!(slice.total, 3);

	let slice = page::paginate(vec![1, 2, 3], -1, 2);

	assert!(slice.items.is_empty());
	assert_eq!(slice.total, 3);
}

#[test]
fn paginate_survives_absurd_page_numbers() {
	let slice = page::paginate(vec![1, 2, 3], i64::MAX, 50);

	assert!(slice.items.is_empty());
	assert_eq!(slice.total, 3);
	assert!(!slice.has_more);
}

#[test]
fn enums_round_trip_their_wire_values() {
	for region in [
		Region::MetroNorth,
		Region::MetroSouth,
		Region::MetroEast,
		Region::MetroWest,
		Region::Regional,
	] {
		assert_eq!(Region::parse(region.as_str()), Some(region));
	}
	for ty in
		[ResourceType::Trainer, ResourceType::BehaviourConsultant, ResourceType::EmergencyService]
	{
		assert_eq!(ResourceType::parse(ty.as_str()), Some(ty));
	}
	for tier in [Tier::Basic, Tier::Pro] {
		assert_eq!(Tier::parse(tier.as_str()), Some(tier));
	}
	for status in [
		PlacementStatus::Queued,
		PlacementStatus::Active,
		PlacementStatus::Expired,
		PlacementStatus::Cancelled,
	] {
		assert_eq!(PlacementStatus::parse(status.as_str()), Some(status));
	}

	assert_eq!(Region::parse("outer_space"), None);
	assert_eq!(Tier::parse("platinum"), None);
}

#[test]
fn enum_serde_uses_snake_case() {
	let json = serde_json::to_string(&ResourceType::BehaviourConsultant).expect("serialize");

	assert_eq!(json, "\"behaviour_consultant\"");

	let region: Region = serde_json::from_str("\"metro_east\"").expect("deserialize");

	assert_eq!(region, Region::MetroEast);
}
