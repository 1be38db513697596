pub mod admin;
pub mod delete;
pub mod list;
pub mod register;
pub mod search;
pub mod suburbs;
pub mod time_serde;
pub mod update;

mod error;

pub use error::{Error, Result};

use std::{future::Future, pin::Pin, sync::Arc};

use time::OffsetDateTime;
use uuid::Uuid;

pub use admin::{
	CouncilEntry, CreatePlacementRequest, CreatePlacementResponse, LoadReferenceRequest,
	LoadReferenceResponse, PlacementItem, PlacementsRequest, PlacementsResponse, SuburbEntry,
};
pub use delete::{DeleteRequest, DeleteResponse};
pub use list::{ListItem, ListRequest, ListResponse};
pub use register::{RegisterRequest, RegisterResponse};
pub use search::{
	BusinessRecord, CouncilRecord, SearchMeta, SearchRequest, SearchResponse, SuburbRecord,
};
pub use suburbs::{SuburbItem, SuburbsRequest, SuburbsResponse};
pub use update::{UpdateRequest, UpdateResponse};

use kelpie_config::Config;
use kelpie_domain::{
	listing::{PlacementStatus, ResourceType, Tier},
	region::Region,
};
use kelpie_storage::{
	db::Db,
	models::{Business, Council, CouncilSeed, FeaturedPlacement, Suburb, SuburbSeed},
	queries::{self, BusinessFilter},
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type CatalogResult<T> = kelpie_storage::Result<T>;

/// Read/write surface of the directory catalog. The service is handed a
/// catalog explicitly so tests can substitute an in-memory double for the
/// Postgres-backed default.
pub trait Catalog
where
	Self: Send + Sync,
{
	fn suburb_by_name<'a>(&'a self, name: &'a str)
	-> BoxFuture<'a, CatalogResult<Option<Suburb>>>;
	fn suburb_by_id(&self, suburb_id: Uuid) -> BoxFuture<'_, CatalogResult<Option<Suburb>>>;
	fn suburbs_by_ids<'a>(
		&'a self,
		suburb_ids: &'a [Uuid],
	) -> BoxFuture<'a, CatalogResult<Vec<Suburb>>>;
	fn list_suburbs<'a>(
		&'a self,
		query: Option<&'a str>,
		council_id: Option<Uuid>,
	) -> BoxFuture<'a, CatalogResult<Vec<Suburb>>>;
	fn council_by_id(&self, council_id: Uuid) -> BoxFuture<'_, CatalogResult<Option<Council>>>;
	fn council_by_name<'a>(
		&'a self,
		name: &'a str,
	) -> BoxFuture<'a, CatalogResult<Option<Council>>>;
	fn upsert_council<'a>(&'a self, seed: &'a CouncilSeed)
	-> BoxFuture<'a, CatalogResult<Council>>;
	fn upsert_suburb<'a>(&'a self, seed: &'a SuburbSeed) -> BoxFuture<'a, CatalogResult<Suburb>>;
	fn business_by_id(&self, business_id: Uuid) -> BoxFuture<'_, CatalogResult<Option<Business>>>;
	fn businesses_by_ids<'a>(
		&'a self,
		business_ids: &'a [Uuid],
	) -> BoxFuture<'a, CatalogResult<Vec<Business>>>;
	fn list_businesses<'a>(
		&'a self,
		filter: &'a BusinessFilter,
	) -> BoxFuture<'a, CatalogResult<Vec<Business>>>;
	fn insert_business<'a>(&'a self, business: &'a Business) -> BoxFuture<'a, CatalogResult<()>>;
	fn update_business<'a>(&'a self, business: &'a Business) -> BoxFuture<'a, CatalogResult<()>>;
	fn soft_delete_business(
		&self,
		business_id: Uuid,
		now: OffsetDateTime,
	) -> BoxFuture<'_, CatalogResult<bool>>;
	fn active_placements(
		&self,
		council_id: Uuid,
		now: OffsetDateTime,
	) -> BoxFuture<'_, CatalogResult<Vec<FeaturedPlacement>>>;
	fn insert_placement<'a>(
		&'a self,
		placement: &'a FeaturedPlacement,
	) -> BoxFuture<'a, CatalogResult<()>>;
	fn list_placements<'a>(
		&'a self,
		council_id: Uuid,
		status: Option<&'a str>,
	) -> BoxFuture<'a, CatalogResult<Vec<FeaturedPlacement>>>;
}

/// Postgres-backed catalog, delegating to `kelpie_storage::queries`.
pub struct PgCatalog {
	pub db: Db,
}
impl Catalog for PgCatalog {
	fn suburb_by_name<'a>(
		&'a self,
		name: &'a str,
	) -> BoxFuture<'a, CatalogResult<Option<Suburb>>> {
		Box::pin(queries::suburb_by_name(&self.db, name))
	}

	fn suburb_by_id(&self, suburb_id: Uuid) -> BoxFuture<'_, CatalogResult<Option<Suburb>>> {
		Box::pin(queries::suburb_by_id(&self.db, suburb_id))
	}

	fn suburbs_by_ids<'a>(
		&'a self,
		suburb_ids: &'a [Uuid],
	) -> BoxFuture<'a, CatalogResult<Vec<Suburb>>> {
		Box::pin(queries::suburbs_by_ids(&self.db, suburb_ids))
	}

	fn list_suburbs<'a>(
		&'a self,
		query: Option<&'a str>,
		council_id: Option<Uuid>,
	) -> BoxFuture<'a, CatalogResult<Vec<Suburb>>> {
		Box::pin(queries::list_suburbs(&self.db, query, council_id))
	}

	fn council_by_id(&self, council_id: Uuid) -> BoxFuture<'_, CatalogResult<Option<Council>>> {
		Box::pin(queries::council_by_id(&self.db, council_id))
	}

	fn council_by_name<'a>(
		&'a self,
		name: &'a str,
	) -> BoxFuture<'a, CatalogResult<Option<Council>>> {
		Box::pin(queries::council_by_name(&self.db, name))
	}

	fn upsert_council<'a>(
		&'a self,
		seed: &'a CouncilSeed,
	) -> BoxFuture<'a, CatalogResult<Council>> {
		Box::pin(queries::upsert_council(&self.db, seed))
	}

	fn upsert_suburb<'a>(&'a self, seed: &'a SuburbSeed) -> BoxFuture<'a, CatalogResult<Suburb>> {
		Box::pin(queries::upsert_suburb(&self.db, seed))
	}

	fn business_by_id(&self, business_id: Uuid) -> BoxFuture<'_, CatalogResult<Option<Business>>> {
		Box::pin(queries::business_by_id(&self.db, business_id))
	}

	fn businesses_by_ids<'a>(
		&'a self,
		business_ids: &'a [Uuid],
	) -> BoxFuture<'a, CatalogResult<Vec<Business>>> {
		Box::pin(queries::businesses_by_ids(&self.db, business_ids))
	}

	fn list_businesses<'a>(
		&'a self,
		filter: &'a BusinessFilter,
	) -> BoxFuture<'a, CatalogResult<Vec<Business>>> {
		Box::pin(queries::list_businesses(&self.db, filter))
	}

	fn insert_business<'a>(&'a self, business: &'a Business) -> BoxFuture<'a, CatalogResult<()>> {
		Box::pin(queries::insert_business(&self.db, business))
	}

	fn update_business<'a>(&'a self, business: &'a Business) -> BoxFuture<'a, CatalogResult<()>> {
		Box::pin(queries::update_business(&self.db, business))
	}

	fn soft_delete_business(
		&self,
		business_id: Uuid,
		now: OffsetDateTime,
	) -> BoxFuture<'_, CatalogResult<bool>> {
		Box::pin(queries::soft_delete_business(&self.db, business_id, now))
	}

	fn active_placements(
		&self,
		council_id: Uuid,
		now: OffsetDateTime,
	) -> BoxFuture<'_, CatalogResult<Vec<FeaturedPlacement>>> {
		Box::pin(queries::active_placements(&self.db, council_id, now))
	}

	fn insert_placement<'a>(
		&'a self,
		placement: &'a FeaturedPlacement,
	) -> BoxFuture<'a, CatalogResult<()>> {
		Box::pin(queries::insert_placement(&self.db, placement))
	}

	fn list_placements<'a>(
		&'a self,
		council_id: Uuid,
		status: Option<&'a str>,
	) -> BoxFuture<'a, CatalogResult<Vec<FeaturedPlacement>>> {
		Box::pin(queries::list_placements(&self.db, council_id, status))
	}
}

pub struct KelpieService {
	pub cfg: Config,
	pub catalog: Arc<dyn Catalog>,
}
impl KelpieService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, catalog: Arc::new(PgCatalog { db }) }
	}

	pub fn with_catalog(cfg: Config, catalog: Arc<dyn Catalog>) -> Self {
		Self { cfg, catalog }
	}
}

pub(crate) fn parse_region(value: &str) -> Result<Region> {
	Region::parse(value)
		.ok_or_else(|| Error::Storage { message: format!("Unknown region value {value:?}.") })
}

pub(crate) fn parse_resource_type(value: &str) -> Result<ResourceType> {
	ResourceType::parse(value).ok_or_else(|| Error::Storage {
		message: format!("Unknown resource_type value {value:?}."),
	})
}

pub(crate) fn parse_tier(value: &str) -> Result<Tier> {
	Tier::parse(value)
		.ok_or_else(|| Error::Storage { message: format!("Unknown tier value {value:?}.") })
}

pub(crate) fn parse_placement_status(value: &str) -> Result<PlacementStatus> {
	PlacementStatus::parse(value)
		.ok_or_else(|| Error::Storage { message: format!("Unknown placement status {value:?}.") })
}

/// Trim a tag set, drop the casing-preserved duplicates, and enforce the
/// configured size bounds. Tags are stored verbatim; matching is exact.
pub(crate) fn normalize_tag_set(
	values: &[String],
	label: &str,
	min: usize,
	max: usize,
) -> Result<Vec<String>> {
	let mut out = Vec::with_capacity(values.len());

	for value in values {
		let trimmed = value.trim();

		if trimmed.is_empty() {
			return Err(Error::InvalidRequest {
				message: format!("{label} entries must be non-empty."),
			});
		}
		if !out.iter().any(|existing: &String| existing == trimmed) {
			out.push(trimmed.to_string());
		}
	}

	if out.len() < min || out.len() > max {
		return Err(Error::InvalidRequest {
			message: format!("{label} must contain between {min} and {max} entries."),
		});
	}

	Ok(out)
}

pub(crate) fn clean_opt(value: Option<String>) -> Option<String> {
	value.map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}
