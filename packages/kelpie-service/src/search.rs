use std::collections::{HashMap, HashSet};

use tracing::warn;
use uuid::Uuid;

use kelpie_domain::{
	compat,
	geo::{self, Coordinates},
	listing::{ResourceType, Tier},
	merge, page,
	region::Region,
};
use kelpie_storage::{
	models::{Business, Council, Suburb},
	queries::BusinessFilter,
};

use crate::{Error, KelpieService, Result, parse_region, parse_resource_type, parse_tier};

/// Resource kinds the public search surfaces. Emergency services are listed
/// elsewhere and never ranked.
const SEARCH_RESOURCE_TYPES: [ResourceType; 2] =
	[ResourceType::Trainer, ResourceType::BehaviourConsultant];

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
	pub suburb: String,
	pub age_stage: String,
	pub behaviour_issue: Option<String>,
	pub radius_km: Option<f64>,
	pub page: Option<i64>,
	pub limit: Option<u32>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SuburbRecord {
	pub suburb_id: Uuid,
	pub name: String,
	pub latitude: Option<f64>,
	pub longitude: Option<f64>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CouncilRecord {
	pub council_id: Uuid,
	pub name: String,
	pub region: Region,
	pub is_shire: bool,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BusinessRecord {
	pub business_id: Uuid,
	pub name: String,
	pub resource_type: ResourceType,
	pub tier: Tier,
	pub email: Option<String>,
	pub phone: Option<String>,
	pub website: Option<String>,
	pub description: String,
	pub age_specialties: Vec<String>,
	pub behaviour_issues: Vec<String>,
	pub primary_service: Option<String>,
	pub secondary_services: Vec<String>,
	pub claimed: bool,
	pub suburb: SuburbRecord,
	pub council: CouncilRecord,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchMeta {
	pub suburb: String,
	pub age_stage: String,
	pub behaviour_issue: Option<String>,
	pub radius_km: Option<f64>,
	pub council_id: Uuid,
	pub region: Region,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
	pub results: Vec<BusinessRecord>,
	pub total: u64,
	pub page: i64,
	pub limit: u32,
	pub has_more: bool,
	pub meta: SearchMeta,
}

impl KelpieService {
	/// Public search: resolve the suburb, fetch the featured/pro/basic
	/// candidate tiers, merge them featured-first without duplicates, apply
	/// the optional radius filter, and paginate.
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let suburb_name = req.suburb.trim();

		if suburb_name.is_empty() {
			return Err(Error::InvalidRequest { message: "suburb is required.".to_string() });
		}

		let age_stage = req.age_stage.trim();

		if age_stage.is_empty() {
			return Err(Error::InvalidRequest { message: "age_stage is required.".to_string() });
		}

		let behaviour_issue =
			req.behaviour_issue.as_deref().map(str::trim).filter(|value| !value.is_empty());
		let radius_km = match req.radius_km {
			None => None,
			Some(value) if !value.is_finite() || value <= 0.0 => {
				return Err(Error::InvalidRequest {
					message: "radius_km must be a positive number.".to_string(),
				});
			},
			Some(value) => Some(value.min(self.cfg.search.max_radius_km)),
		};
		let page = req.page.unwrap_or(1);
		let limit =
			req.limit.unwrap_or(self.cfg.search.default_limit).clamp(1, self.cfg.search.max_limit);
		let now = time::OffsetDateTime::now_utc();

		let Some(origin) = self.catalog.suburb_by_name(suburb_name).await? else {
			return Err(Error::NotFound {
				message: format!("No suburb matches {suburb_name:?}."),
			});
		};
		let council =
			self.catalog.council_by_id(origin.council_id).await?.ok_or_else(|| Error::Storage {
				message: format!("Suburb {} references a missing council.", origin.suburb_id),
			})?;

		// Each tier read is supplementary to the others; a failed read
		// degrades to an empty tier instead of failing the whole search.
		let featured = match self
			.fetch_featured(council.council_id, age_stage, behaviour_issue, now)
			.await
		{
			Ok(businesses) => businesses,
			Err(err) => {
				warn!(error = %err, tier = "featured", "Tier fetch failed; treating it as empty.");

				Vec::new()
			},
		};
		let pro =
			match self.fetch_tier(council.council_id, Tier::Pro, age_stage, behaviour_issue).await {
				Ok(businesses) => businesses,
				Err(err) => {
					warn!(error = %err, tier = "pro", "Tier fetch failed; treating it as empty.");

					Vec::new()
				},
			};
		let basic = match self
			.fetch_tier(council.council_id, Tier::Basic, age_stage, behaviour_issue)
			.await
		{
			Ok(businesses) => businesses,
			Err(err) => {
				warn!(error = %err, tier = "basic", "Tier fetch failed; treating it as empty.");

				Vec::new()
			},
		};

		let merged = merge::merge_tiers(featured, pro, basic, |business| business.business_id);

		let suburb_ids: Vec<Uuid> = merged
			.iter()
			.map(|business| business.suburb_id)
			.collect::<HashSet<_>>()
			.into_iter()
			.collect();
		let suburb_map: HashMap<Uuid, Suburb> = self
			.catalog
			.suburbs_by_ids(&suburb_ids)
			.await?
			.into_iter()
			.map(|suburb| (suburb.suburb_id, suburb))
			.collect();

		let filtered = match (radius_km, coordinates_of(&origin)) {
			(Some(radius), Some(origin_coords)) => merged
				.into_iter()
				.filter(|business| {
					suburb_map
						.get(&business.suburb_id)
						.and_then(coordinates_of)
						.map(|coords| geo::within_radius(origin_coords, coords, radius))
						.unwrap_or(false)
				})
				.collect(),
			// Without a radius, or without origin coordinates, the distance
			// filter is a pass-through.
			_ => merged,
		};

		let slice = page::paginate(filtered, page, limit);
		let results = slice
			.items
			.into_iter()
			.map(|business| {
				let suburb =
					suburb_map.get(&business.suburb_id).ok_or_else(|| Error::Storage {
						message: format!(
							"Business {} references a missing suburb.",
							business.business_id
						),
					})?;

				business_record(business, suburb, &council)
			})
			.collect::<Result<Vec<_>>>()?;
		let meta = SearchMeta {
			suburb: origin.name.clone(),
			age_stage: age_stage.to_string(),
			behaviour_issue: behaviour_issue.map(str::to_string),
			radius_km,
			council_id: council.council_id,
			region: parse_region(&council.region)?,
		};

		Ok(SearchResponse {
			results,
			total: slice.total as u64,
			page,
			limit,
			has_more: slice.has_more,
			meta,
		})
	}

	/// Currently active featured placements for the council, earliest
	/// activation first. Placements whose business is gone, soft-deleted, or
	/// incompatible with the request are silently dropped; a business with
	/// several active placements appears once.
	async fn fetch_featured(
		&self,
		council_id: Uuid,
		age_stage: &str,
		behaviour_issue: Option<&str>,
		now: time::OffsetDateTime,
	) -> kelpie_storage::Result<Vec<Business>> {
		let placements = self.catalog.active_placements(council_id, now).await?;

		if placements.is_empty() {
			return Ok(Vec::new());
		}

		let business_ids: Vec<Uuid> =
			placements.iter().map(|placement| placement.business_id).collect();
		let by_id: HashMap<Uuid, Business> = self
			.catalog
			.businesses_by_ids(&business_ids)
			.await?
			.into_iter()
			.map(|business| (business.business_id, business))
			.collect();
		let mut seen = HashSet::new();
		let mut featured = Vec::new();

		for placement in placements {
			if !seen.insert(placement.business_id) {
				continue;
			}

			let Some(business) = by_id.get(&placement.business_id) else {
				continue;
			};

			if is_searchable(business)
				&& compat::is_compatible(
					&business.age_specialties,
					&business.behaviour_issues,
					age_stage,
					behaviour_issue,
				) {
				featured.push(business.clone());
			}
		}

		Ok(featured)
	}

	/// Non-deleted businesses of one tier in the council, newest first,
	/// narrowed to compatible search-visible listings.
	async fn fetch_tier(
		&self,
		council_id: Uuid,
		tier: Tier,
		age_stage: &str,
		behaviour_issue: Option<&str>,
	) -> kelpie_storage::Result<Vec<Business>> {
		let filter = BusinessFilter {
			council_id: Some(council_id),
			tier: Some(tier.as_str().to_string()),
			..Default::default()
		};
		let businesses = self.catalog.list_businesses(&filter).await?;

		Ok(businesses
			.into_iter()
			.filter(|business| {
				is_searchable(business)
					&& compat::is_compatible(
						&business.age_specialties,
						&business.behaviour_issues,
						age_stage,
						behaviour_issue,
					)
			})
			.collect())
	}
}

fn is_searchable(business: &Business) -> bool {
	if business.deleted {
		return false;
	}

	ResourceType::parse(&business.resource_type)
		.map(|ty| SEARCH_RESOURCE_TYPES.contains(&ty))
		.unwrap_or(false)
}

fn coordinates_of(suburb: &Suburb) -> Option<Coordinates> {
	match (suburb.latitude, suburb.longitude) {
		(Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
		_ => None,
	}
}

fn business_record(
	business: Business,
	suburb: &Suburb,
	council: &Council,
) -> Result<BusinessRecord> {
	Ok(BusinessRecord {
		business_id: business.business_id,
		name: business.name,
		resource_type: parse_resource_type(&business.resource_type)?,
		tier: parse_tier(&business.tier)?,
		email: business.email,
		phone: business.phone,
		website: business.website,
		description: business.description,
		age_specialties: business.age_specialties,
		behaviour_issues: business.behaviour_issues,
		primary_service: business.primary_service,
		secondary_services: business.secondary_services,
		claimed: business.claimed,
		suburb: SuburbRecord {
			suburb_id: suburb.suburb_id,
			name: suburb.name.clone(),
			latitude: suburb.latitude,
			longitude: suburb.longitude,
		},
		council: CouncilRecord {
			council_id: council.council_id,
			name: council.name.clone(),
			region: parse_region(&council.region)?,
			is_shire: council.is_shire,
		},
	})
}
