use std::collections::HashMap;

use time::OffsetDateTime;
use uuid::Uuid;

use kelpie_domain::{listing::PlacementStatus, region::Region};
use kelpie_storage::models::{Council, CouncilSeed, FeaturedPlacement, SuburbSeed};

use crate::{Error, KelpieService, Result, parse_placement_status};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CouncilEntry {
	pub name: String,
	pub region: String,
	pub is_shire: Option<bool>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SuburbEntry {
	pub council: String,
	pub name: String,
	pub latitude: Option<f64>,
	pub longitude: Option<f64>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoadReferenceRequest {
	#[serde(default)]
	pub councils: Vec<CouncilEntry>,
	#[serde(default)]
	pub suburbs: Vec<SuburbEntry>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoadReferenceResponse {
	pub councils: usize,
	pub suburbs: usize,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreatePlacementRequest {
	pub business_id: Uuid,
	#[serde(with = "crate::time_serde")]
	pub starts_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub ends_at: OffsetDateTime,
	pub queue_position: Option<i32>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreatePlacementResponse {
	pub placement_id: Uuid,
	pub status: PlacementStatus,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlacementsRequest {
	pub council_id: Uuid,
	pub status: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlacementItem {
	pub placement_id: Uuid,
	pub business_id: Uuid,
	pub council_id: Uuid,
	#[serde(with = "crate::time_serde")]
	pub starts_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub ends_at: OffsetDateTime,
	pub status: PlacementStatus,
	pub queue_position: i32,
	#[serde(with = "crate::time_serde::option")]
	pub queue_activated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlacementsResponse {
	pub placements: Vec<PlacementItem>,
}

impl KelpieService {
	/// Idempotent administrative load of councils and suburbs. Councils are
	/// matched by lowercased name; suburbs by name within their council and
	/// inherit its region.
	pub async fn load_reference(
		&self,
		req: LoadReferenceRequest,
	) -> Result<LoadReferenceResponse> {
		let mut councils_by_name: HashMap<String, Council> = HashMap::new();
		let mut councils_loaded = 0;

		for entry in &req.councils {
			let name = entry.name.trim();

			if name.is_empty() {
				return Err(Error::InvalidRequest {
					message: "Council names must be non-empty.".to_string(),
				});
			}

			let region = Region::parse(entry.region.trim()).ok_or_else(|| {
				Error::InvalidRequest {
					message: format!("Unknown region {:?} for council {name:?}.", entry.region),
				}
			})?;
			let seed = CouncilSeed {
				name: name.to_string(),
				region: region.as_str().to_string(),
				is_shire: entry.is_shire.unwrap_or(false),
			};
			let council = self.catalog.upsert_council(&seed).await?;

			councils_by_name.insert(name.to_lowercase(), council);
			councils_loaded += 1;
		}

		let mut suburbs_loaded = 0;

		for entry in &req.suburbs {
			let name = entry.name.trim();

			if name.is_empty() {
				return Err(Error::InvalidRequest {
					message: "Suburb names must be non-empty.".to_string(),
				});
			}

			let council_name = entry.council.trim().to_lowercase();
			let council = match councils_by_name.get(&council_name) {
				Some(council) => council.clone(),
				None => {
					let Some(council) = self.catalog.council_by_name(&council_name).await? else {
						return Err(Error::InvalidRequest {
							message: format!(
								"Unknown council {:?} for suburb {name:?}.",
								entry.council
							),
						});
					};

					councils_by_name.insert(council_name, council.clone());

					council
				},
			};
			let seed = SuburbSeed {
				council_id: council.council_id,
				name: name.to_string(),
				region: council.region.clone(),
				latitude: entry.latitude,
				longitude: entry.longitude,
			};

			self.catalog.upsert_suburb(&seed).await?;

			suburbs_loaded += 1;
		}

		Ok(LoadReferenceResponse { councils: councils_loaded, suburbs: suburbs_loaded })
	}

	/// Queue a featured placement for a live business. Activation, expiry,
	/// and queue advancement belong to the placement cron, not this service.
	pub async fn create_placement(
		&self,
		req: CreatePlacementRequest,
	) -> Result<CreatePlacementResponse> {
		let business = match self.catalog.business_by_id(req.business_id).await? {
			Some(business) if !business.deleted => business,
			_ => {
				return Err(Error::NotFound {
					message: format!("No business matches {}.", req.business_id),
				});
			},
		};

		if req.ends_at <= req.starts_at {
			return Err(Error::InvalidRequest {
				message: "ends_at must be after starts_at.".to_string(),
			});
		}

		let placement = FeaturedPlacement {
			placement_id: Uuid::new_v4(),
			business_id: business.business_id,
			council_id: business.council_id,
			starts_at: req.starts_at,
			ends_at: req.ends_at,
			status: PlacementStatus::Queued.as_str().to_string(),
			queue_position: req.queue_position.unwrap_or(0),
			queue_activated_at: None,
			created_at: time::OffsetDateTime::now_utc(),
		};

		self.catalog.insert_placement(&placement).await?;

		Ok(CreatePlacementResponse {
			placement_id: placement.placement_id,
			status: PlacementStatus::Queued,
		})
	}

	pub async fn placements(&self, req: PlacementsRequest) -> Result<PlacementsResponse> {
		let status = match req.status.as_deref().map(str::trim) {
			None | Some("") => None,
			Some(value) => Some(
				PlacementStatus::parse(value)
					.ok_or_else(|| Error::InvalidRequest {
						message: "status must be one of queued, active, expired, or cancelled."
							.to_string(),
					})?
					.as_str(),
			),
		};
		let placements = self.catalog.list_placements(req.council_id, status).await?;
		let placements = placements
			.into_iter()
			.map(|placement| {
				Ok(PlacementItem {
					placement_id: placement.placement_id,
					business_id: placement.business_id,
					council_id: placement.council_id,
					starts_at: placement.starts_at,
					ends_at: placement.ends_at,
					status: parse_placement_status(&placement.status)?,
					queue_position: placement.queue_position,
					queue_activated_at: placement.queue_activated_at,
				})
			})
			.collect::<Result<Vec<_>>>()?;

		Ok(PlacementsResponse { placements })
	}
}
