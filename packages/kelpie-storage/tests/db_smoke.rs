use time::OffsetDateTime;
use uuid::Uuid;

use kelpie_config::Postgres;
use kelpie_storage::{
	db::Db,
	models::{Business, CouncilSeed, SuburbSeed},
	queries::{self, BusinessFilter},
};
use kelpie_testkit::TestDatabase;

#[tokio::test]
#[ignore = "Requires external Postgres. Set KELPIE_PG_DSN to run."]
async fn db_connects_and_bootstraps() {
	let Some(base_dsn) = kelpie_testkit::env_dsn() else {
		eprintln!("Skipping db_connects_and_bootstraps; set KELPIE_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");
	// Bootstrapping twice must be a no-op.
	db.ensure_schema().await.expect("Failed to re-ensure schema.");

	for table in ["councils", "suburbs", "businesses", "featured_placements"] {
		let count: i64 = sqlx::query_scalar(
			"SELECT count(*) FROM information_schema.tables WHERE table_name = $1",
		)
		.bind(table)
		.fetch_one(&db.pool)
		.await
		.expect("Failed to query schema tables.");

		assert_eq!(count, 1, "missing table {table}");
	}

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set KELPIE_PG_DSN to run."]
async fn reference_and_listing_round_trip() {
	let Some(base_dsn) = kelpie_testkit::env_dsn() else {
		eprintln!("Skipping reference_and_listing_round_trip; set KELPIE_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	let council = queries::upsert_council(
		&db,
		&CouncilSeed {
			name: "City of Yarra".to_string(),
			region: "metro_north".to_string(),
			is_shire: false,
		},
	)
	.await
	.expect("Failed to upsert council.");
	// Upserting the same name must not create a second row.
	let again = queries::upsert_council(
		&db,
		&CouncilSeed {
			name: "city of yarra".to_string(),
			region: "metro_north".to_string(),
			is_shire: false,
		},
	)
	.await
	.expect("Failed to re-upsert council.");

	assert_eq!(council.council_id, again.council_id);

	let suburb = queries::upsert_suburb(
		&db,
		&SuburbSeed {
			council_id: council.council_id,
			name: "Richmond".to_string(),
			region: "metro_north".to_string(),
			latitude: Some(-37.82),
			longitude: Some(145.0),
		},
	)
	.await
	.expect("Failed to upsert suburb.");
	let resolved = queries::suburb_by_name(&db, "richmond")
		.await
		.expect("Failed to resolve suburb.")
		.expect("Suburb must resolve case-insensitively.");

	assert_eq!(resolved.suburb_id, suburb.suburb_id);

	let now = OffsetDateTime::now_utc();
	let business = Business {
		business_id: Uuid::new_v4(),
		suburb_id: suburb.suburb_id,
		council_id: council.council_id,
		region: council.region.clone(),
		name: "Calm Canine Training".to_string(),
		resource_type: "trainer".to_string(),
		tier: "pro".to_string(),
		email: Some("hello@calmcanine.example".to_string()),
		phone: None,
		website: None,
		description: "Positive reinforcement training.".to_string(),
		age_specialties: vec!["puppy".to_string(), "adult".to_string()],
		behaviour_issues: vec!["barking".to_string()],
		primary_service: Some("group_classes".to_string()),
		secondary_services: vec!["private_sessions".to_string()],
		claimed: true,
		deleted: false,
		created_at: now,
		updated_at: now,
	};

	queries::insert_business(&db, &business).await.expect("Failed to insert business.");

	let filter = BusinessFilter {
		council_id: Some(council.council_id),
		tier: Some("pro".to_string()),
		..Default::default()
	};
	let listed = queries::list_businesses(&db, &filter).await.expect("Failed to list businesses.");

	assert_eq!(listed.len(), 1);
	assert_eq!(listed[0].business_id, business.business_id);
	assert_eq!(listed[0].age_specialties, business.age_specialties);

	assert!(
		queries::soft_delete_business(&db, business.business_id, now)
			.await
			.expect("Failed to soft delete.")
	);

	let listed = queries::list_businesses(&db, &filter).await.expect("Failed to list businesses.");

	assert!(listed.is_empty(), "soft-deleted business must not list");

	// Soft delete is idempotent at the storage layer: the second call
	// matches no live row.
	assert!(
		!queries::soft_delete_business(&db, business.business_id, now)
			.await
			.expect("Failed to re-delete.")
	);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
