use time::OffsetDateTime;
use uuid::Uuid;

use kelpie_domain::{
	listing::{ResourceType, Tier},
	region::Region,
};
use kelpie_storage::queries::BusinessFilter;

use crate::{Error, KelpieService, Result, parse_region, parse_resource_type, parse_tier};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ListRequest {
	pub council_id: Option<Uuid>,
	pub suburb_id: Option<Uuid>,
	pub tier: Option<String>,
	pub resource_type: Option<String>,
	pub include_deleted: Option<bool>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ListItem {
	pub business_id: Uuid,
	pub name: String,
	pub resource_type: ResourceType,
	pub tier: Tier,
	pub suburb_id: Uuid,
	pub council_id: Uuid,
	pub region: Region,
	pub email: Option<String>,
	pub phone: Option<String>,
	pub website: Option<String>,
	pub claimed: bool,
	pub deleted: bool,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ListResponse {
	pub items: Vec<ListItem>,
}

impl KelpieService {
	/// Filterable listing view, newest first. `include_deleted` exists for
	/// the back office; the public directory leaves it unset.
	pub async fn list(&self, req: ListRequest) -> Result<ListResponse> {
		let tier = match req.tier.as_deref().map(str::trim) {
			None | Some("") => None,
			Some(value) => Some(
				Tier::parse(value)
					.ok_or_else(|| Error::InvalidRequest {
						message: "tier must be one of basic or pro.".to_string(),
					})?
					.as_str()
					.to_string(),
			),
		};
		let resource_type = match req.resource_type.as_deref().map(str::trim) {
			None | Some("") => None,
			Some(value) => Some(
				ResourceType::parse(value)
					.ok_or_else(|| Error::InvalidRequest {
						message:
							"resource_type must be one of trainer, behaviour_consultant, or emergency_service."
								.to_string(),
					})?
					.as_str()
					.to_string(),
			),
		};
		let filter = BusinessFilter {
			council_id: req.council_id,
			suburb_id: req.suburb_id,
			tier,
			resource_type,
			include_deleted: req.include_deleted.unwrap_or(false),
		};
		let businesses = self.catalog.list_businesses(&filter).await?;
		let items = businesses
			.into_iter()
			.map(|business| {
				Ok(ListItem {
					business_id: business.business_id,
					name: business.name,
					resource_type: parse_resource_type(&business.resource_type)?,
					tier: parse_tier(&business.tier)?,
					suburb_id: business.suburb_id,
					council_id: business.council_id,
					region: parse_region(&business.region)?,
					email: business.email,
					phone: business.phone,
					website: business.website,
					claimed: business.claimed,
					deleted: business.deleted,
					created_at: business.created_at,
					updated_at: business.updated_at,
				})
			})
			.collect::<Result<Vec<_>>>()?;

		Ok(ListResponse { items })
	}
}
