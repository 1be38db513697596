use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Error, Result,
	db::Db,
	models::{Business, Council, CouncilSeed, FeaturedPlacement, Suburb, SuburbSeed},
};

const SUBURB_COLUMNS: &str =
	"suburb_id, council_id, name, region, latitude, longitude, created_at";
const COUNCIL_COLUMNS: &str = "council_id, name, region, is_shire, created_at";
const BUSINESS_COLUMNS: &str = "\
business_id, suburb_id, council_id, region, name, resource_type, tier, email, phone, website, \
description, age_specialties, behaviour_issues, primary_service, secondary_services, claimed, \
deleted, created_at, updated_at";
const PLACEMENT_COLUMNS: &str = "\
placement_id, business_id, council_id, starts_at, ends_at, status, queue_position, \
queue_activated_at, created_at";

/// Optional predicates for business listings. `Default` selects every
/// non-deleted business.
#[derive(Clone, Debug, Default)]
pub struct BusinessFilter {
	pub council_id: Option<Uuid>,
	pub suburb_id: Option<Uuid>,
	pub tier: Option<String>,
	pub resource_type: Option<String>,
	pub include_deleted: bool,
}

pub async fn suburb_by_name(db: &Db, name: &str) -> Result<Option<Suburb>> {
	// At most one record resolves; creation order then id is the tie-break
	// when several suburbs share a name.
	let suburb = sqlx::query_as::<_, Suburb>(&format!(
		"\
SELECT {SUBURB_COLUMNS}
FROM suburbs
WHERE lower(name) = lower($1)
ORDER BY created_at, suburb_id
LIMIT 1"
	))
	.bind(name)
	.fetch_optional(&db.pool)
	.await?;

	Ok(suburb)
}

pub async fn suburb_by_id(db: &Db, suburb_id: Uuid) -> Result<Option<Suburb>> {
	let suburb = sqlx::query_as::<_, Suburb>(&format!(
		"SELECT {SUBURB_COLUMNS} FROM suburbs WHERE suburb_id = $1"
	))
	.bind(suburb_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(suburb)
}

pub async fn suburbs_by_ids(db: &Db, suburb_ids: &[Uuid]) -> Result<Vec<Suburb>> {
	if suburb_ids.is_empty() {
		return Ok(Vec::new());
	}

	let suburbs = sqlx::query_as::<_, Suburb>(&format!(
		"SELECT {SUBURB_COLUMNS} FROM suburbs WHERE suburb_id = ANY($1)"
	))
	.bind(suburb_ids)
	.fetch_all(&db.pool)
	.await?;

	Ok(suburbs)
}

pub async fn list_suburbs(
	db: &Db,
	query: Option<&str>,
	council_id: Option<Uuid>,
) -> Result<Vec<Suburb>> {
	let mut builder = sqlx::QueryBuilder::new(format!(
		"SELECT {SUBURB_COLUMNS} FROM suburbs WHERE 1 = 1"
	));

	if let Some(query) = query {
		builder.push(" AND lower(name) LIKE lower(");
		builder.push_bind(query.to_string());
		builder.push(") || '%'");
	}
	if let Some(council_id) = council_id {
		builder.push(" AND council_id = ");
		builder.push_bind(council_id);
	}

	builder.push(" ORDER BY name, created_at");

	let suburbs = builder.build_query_as().fetch_all(&db.pool).await?;

	Ok(suburbs)
}

pub async fn council_by_id(db: &Db, council_id: Uuid) -> Result<Option<Council>> {
	let council = sqlx::query_as::<_, Council>(&format!(
		"SELECT {COUNCIL_COLUMNS} FROM councils WHERE council_id = $1"
	))
	.bind(council_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(council)
}

pub async fn council_by_name(db: &Db, name: &str) -> Result<Option<Council>> {
	let council = sqlx::query_as::<_, Council>(&format!(
		"SELECT {COUNCIL_COLUMNS} FROM councils WHERE lower(name) = lower($1) LIMIT 1"
	))
	.bind(name)
	.fetch_optional(&db.pool)
	.await?;

	Ok(council)
}

pub async fn upsert_council(db: &Db, seed: &CouncilSeed) -> Result<Council> {
	if seed.name.trim().is_empty() {
		return Err(Error::InvalidArgument("council name must not be empty".to_string()));
	}
	if let Some(existing) = council_by_name(db, &seed.name).await? {
		let council = sqlx::query_as::<_, Council>(&format!(
			"\
UPDATE councils
SET name = $1, region = $2, is_shire = $3
WHERE council_id = $4
RETURNING {COUNCIL_COLUMNS}"
		))
		.bind(&seed.name)
		.bind(&seed.region)
		.bind(seed.is_shire)
		.bind(existing.council_id)
		.fetch_one(&db.pool)
		.await?;

		return Ok(council);
	}

	let council = sqlx::query_as::<_, Council>(&format!(
		"\
INSERT INTO councils (council_id, name, region, is_shire)
VALUES ($1, $2, $3, $4)
RETURNING {COUNCIL_COLUMNS}"
	))
	.bind(Uuid::new_v4())
	.bind(&seed.name)
	.bind(&seed.region)
	.bind(seed.is_shire)
	.fetch_one(&db.pool)
	.await?;

	Ok(council)
}

pub async fn upsert_suburb(db: &Db, seed: &SuburbSeed) -> Result<Suburb> {
	if seed.name.trim().is_empty() {
		return Err(Error::InvalidArgument("suburb name must not be empty".to_string()));
	}

	let existing = sqlx::query_as::<_, Suburb>(&format!(
		"\
SELECT {SUBURB_COLUMNS}
FROM suburbs
WHERE council_id = $1 AND lower(name) = lower($2)
LIMIT 1"
	))
	.bind(seed.council_id)
	.bind(&seed.name)
	.fetch_optional(&db.pool)
	.await?;

	if let Some(existing) = existing {
		let suburb = sqlx::query_as::<_, Suburb>(&format!(
			"\
UPDATE suburbs
SET name = $1, region = $2, latitude = $3, longitude = $4
WHERE suburb_id = $5
RETURNING {SUBURB_COLUMNS}"
		))
		.bind(&seed.name)
		.bind(&seed.region)
		.bind(seed.latitude)
		.bind(seed.longitude)
		.bind(existing.suburb_id)
		.fetch_one(&db.pool)
		.await?;

		return Ok(suburb);
	}

	let suburb = sqlx::query_as::<_, Suburb>(&format!(
		"\
INSERT INTO suburbs (suburb_id, council_id, name, region, latitude, longitude)
VALUES ($1, $2, $3, $4, $5, $6)
RETURNING {SUBURB_COLUMNS}"
	))
	.bind(Uuid::new_v4())
	.bind(seed.council_id)
	.bind(&seed.name)
	.bind(&seed.region)
	.bind(seed.latitude)
	.bind(seed.longitude)
	.fetch_one(&db.pool)
	.await?;

	Ok(suburb)
}

pub async fn business_by_id(db: &Db, business_id: Uuid) -> Result<Option<Business>> {
	let business = sqlx::query_as::<_, Business>(&format!(
		"SELECT {BUSINESS_COLUMNS} FROM businesses WHERE business_id = $1"
	))
	.bind(business_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(business)
}

pub async fn businesses_by_ids(db: &Db, business_ids: &[Uuid]) -> Result<Vec<Business>> {
	if business_ids.is_empty() {
		return Ok(Vec::new());
	}

	let businesses = sqlx::query_as::<_, Business>(&format!(
		"SELECT {BUSINESS_COLUMNS} FROM businesses WHERE business_id = ANY($1) AND deleted = FALSE"
	))
	.bind(business_ids)
	.fetch_all(&db.pool)
	.await?;

	Ok(businesses)
}

pub async fn list_businesses(db: &Db, filter: &BusinessFilter) -> Result<Vec<Business>> {
	let mut builder = sqlx::QueryBuilder::new(format!(
		"SELECT {BUSINESS_COLUMNS} FROM businesses WHERE 1 = 1"
	));

	if !filter.include_deleted {
		builder.push(" AND deleted = FALSE");
	}
	if let Some(council_id) = filter.council_id {
		builder.push(" AND council_id = ");
		builder.push_bind(council_id);
	}
	if let Some(suburb_id) = filter.suburb_id {
		builder.push(" AND suburb_id = ");
		builder.push_bind(suburb_id);
	}
	if let Some(tier) = &filter.tier {
		builder.push(" AND tier = ");
		builder.push_bind(tier.clone());
	}
	if let Some(resource_type) = &filter.resource_type {
		builder.push(" AND resource_type = ");
		builder.push_bind(resource_type.clone());
	}

	builder.push(" ORDER BY created_at DESC, business_id DESC");

	let businesses = builder.build_query_as().fetch_all(&db.pool).await?;

	Ok(businesses)
}

pub async fn insert_business(db: &Db, business: &Business) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO businesses (
	business_id,
	suburb_id,
	council_id,
	region,
	name,
	resource_type,
	tier,
	email,
	phone,
	website,
	description,
	age_specialties,
	behaviour_issues,
	primary_service,
	secondary_services,
	claimed,
	deleted,
	created_at,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)",
	)
	.bind(business.business_id)
	.bind(business.suburb_id)
	.bind(business.council_id)
	.bind(&business.region)
	.bind(&business.name)
	.bind(&business.resource_type)
	.bind(&business.tier)
	.bind(&business.email)
	.bind(&business.phone)
	.bind(&business.website)
	.bind(&business.description)
	.bind(&business.age_specialties)
	.bind(&business.behaviour_issues)
	.bind(&business.primary_service)
	.bind(&business.secondary_services)
	.bind(business.claimed)
	.bind(business.deleted)
	.bind(business.created_at)
	.bind(business.updated_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn update_business(db: &Db, business: &Business) -> Result<()> {
	let result = sqlx::query(
		"\
UPDATE businesses
SET
	name = $1,
	resource_type = $2,
	tier = $3,
	email = $4,
	phone = $5,
	website = $6,
	description = $7,
	age_specialties = $8,
	behaviour_issues = $9,
	primary_service = $10,
	secondary_services = $11,
	claimed = $12,
	updated_at = $13
WHERE business_id = $14",
	)
	.bind(&business.name)
	.bind(&business.resource_type)
	.bind(&business.tier)
	.bind(&business.email)
	.bind(&business.phone)
	.bind(&business.website)
	.bind(&business.description)
	.bind(&business.age_specialties)
	.bind(&business.behaviour_issues)
	.bind(&business.primary_service)
	.bind(&business.secondary_services)
	.bind(business.claimed)
	.bind(business.updated_at)
	.bind(business.business_id)
	.execute(&db.pool)
	.await?;

	if result.rows_affected() == 0 {
		return Err(Error::NotFound(format!(
			"business not found; business_id={}",
			business.business_id
		)));
	}

	Ok(())
}

pub async fn soft_delete_business(db: &Db, business_id: Uuid, now: OffsetDateTime) -> Result<bool> {
	let result = sqlx::query(
		"UPDATE businesses SET deleted = TRUE, updated_at = $2 WHERE business_id = $1 AND deleted = FALSE",
	)
	.bind(business_id)
	.bind(now)
	.execute(&db.pool)
	.await?;

	Ok(result.rows_affected() > 0)
}

pub async fn active_placements(
	db: &Db,
	council_id: Uuid,
	now: OffsetDateTime,
) -> Result<Vec<FeaturedPlacement>> {
	// Earliest-activated placements rank first.
	let placements = sqlx::query_as::<_, FeaturedPlacement>(&format!(
		"\
SELECT {PLACEMENT_COLUMNS}
FROM featured_placements
WHERE council_id = $1 AND status = 'active' AND ends_at > $2
ORDER BY queue_activated_at ASC NULLS LAST, placement_id ASC"
	))
	.bind(council_id)
	.bind(now)
	.fetch_all(&db.pool)
	.await?;

	Ok(placements)
}

pub async fn insert_placement(db: &Db, placement: &FeaturedPlacement) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO featured_placements (
	placement_id,
	business_id,
	council_id,
	starts_at,
	ends_at,
	status,
	queue_position,
	queue_activated_at,
	created_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
	)
	.bind(placement.placement_id)
	.bind(placement.business_id)
	.bind(placement.council_id)
	.bind(placement.starts_at)
	.bind(placement.ends_at)
	.bind(&placement.status)
	.bind(placement.queue_position)
	.bind(placement.queue_activated_at)
	.bind(placement.created_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn list_placements(
	db: &Db,
	council_id: Uuid,
	status: Option<&str>,
) -> Result<Vec<FeaturedPlacement>> {
	let mut builder = sqlx::QueryBuilder::new(format!(
		"SELECT {PLACEMENT_COLUMNS} FROM featured_placements WHERE council_id = "
	));

	builder.push_bind(council_id);

	if let Some(status) = status {
		builder.push(" AND status = ");
		builder.push_bind(status.to_string());
	}

	builder.push(" ORDER BY queue_position, created_at");

	let placements = builder.build_query_as().fetch_all(&db.pool).await?;

	Ok(placements)
}
