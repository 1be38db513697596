use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Council {
	pub council_id: Uuid,
	pub name: String,
	pub region: String,
	pub is_shire: bool,
	pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Suburb {
	pub suburb_id: Uuid,
	pub council_id: Uuid,
	pub name: String,
	pub region: String,
	pub latitude: Option<f64>,
	pub longitude: Option<f64>,
	pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Business {
	pub business_id: Uuid,
	pub suburb_id: Uuid,
	pub council_id: Uuid,
	pub region: String,
	pub name: String,
	pub resource_type: String,
	pub tier: String,
	pub email: Option<String>,
	pub phone: Option<String>,
	pub website: Option<String>,
	pub description: String,
	pub age_specialties: Vec<String>,
	pub behaviour_issues: Vec<String>,
	pub primary_service: Option<String>,
	pub secondary_services: Vec<String>,
	pub claimed: bool,
	pub deleted: bool,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct FeaturedPlacement {
	pub placement_id: Uuid,
	pub business_id: Uuid,
	pub council_id: Uuid,
	pub starts_at: OffsetDateTime,
	pub ends_at: OffsetDateTime,
	pub status: String,
	pub queue_position: i32,
	pub queue_activated_at: Option<OffsetDateTime>,
	pub created_at: OffsetDateTime,
}

/// Seed payload for the administrative reference load.
#[derive(Clone, Debug)]
pub struct CouncilSeed {
	pub name: String,
	pub region: String,
	pub is_shire: bool,
}

#[derive(Clone, Debug)]
pub struct SuburbSeed {
	pub council_id: Uuid,
	pub name: String,
	pub region: String,
	pub latitude: Option<f64>,
	pub longitude: Option<f64>,
}
