use time::OffsetDateTime;
use uuid::Uuid;

use kelpie_domain::listing::{ResourceType, Tier};

use crate::{Error, KelpieService, Result, clean_opt, normalize_tag_set};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateRequest {
	pub business_id: Uuid,
	pub name: Option<String>,
	pub resource_type: Option<String>,
	pub tier: Option<String>,
	pub email: Option<String>,
	pub phone: Option<String>,
	pub website: Option<String>,
	pub description: Option<String>,
	pub age_specialties: Option<Vec<String>>,
	pub behaviour_issues: Option<Vec<String>>,
	pub primary_service: Option<String>,
	pub secondary_services: Option<Vec<String>>,
	pub claimed: Option<bool>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateResponse {
	pub business_id: Uuid,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}

impl KelpieService {
	/// Partial update of a listing by its owner or an admin. Absent fields
	/// stay unchanged; the owning suburb and council never change.
	pub async fn update(&self, req: UpdateRequest) -> Result<UpdateResponse> {
		let existing = self.catalog.business_by_id(req.business_id).await?;
		let mut business = match existing {
			Some(business) if !business.deleted => business,
			_ => {
				return Err(Error::NotFound {
					message: format!("No business matches {}.", req.business_id),
				});
			},
		};

		if let Some(name) = req.name {
			let name = name.trim().to_string();

			if name.is_empty() {
				return Err(Error::InvalidRequest {
					message: "name must be non-empty.".to_string(),
				});
			}

			business.name = name;
		}
		if let Some(resource_type) = req.resource_type {
			let resource_type = ResourceType::parse(resource_type.trim()).ok_or_else(|| {
				Error::InvalidRequest {
					message:
						"resource_type must be one of trainer, behaviour_consultant, or emergency_service."
							.to_string(),
				}
			})?;

			business.resource_type = resource_type.as_str().to_string();
		}
		if let Some(tier) = req.tier {
			let tier = Tier::parse(tier.trim()).ok_or_else(|| Error::InvalidRequest {
				message: "tier must be one of basic or pro.".to_string(),
			})?;

			business.tier = tier.as_str().to_string();
		}
		if let Some(age_specialties) = req.age_specialties {
			business.age_specialties = normalize_tag_set(
				&age_specialties,
				"age_specialties",
				1,
				self.cfg.listings.max_age_stages as usize,
			)?;
		}
		if let Some(behaviour_issues) = req.behaviour_issues {
			business.behaviour_issues = normalize_tag_set(
				&behaviour_issues,
				"behaviour_issues",
				0,
				self.cfg.listings.max_behaviour_issues as usize,
			)?;
		}
		if let Some(secondary_services) = req.secondary_services {
			business.secondary_services =
				normalize_tag_set(&secondary_services, "secondary_services", 0, usize::MAX)?;
		}
		if let Some(description) = req.description {
			let description = description.trim().to_string();

			if description.chars().count() > self.cfg.listings.max_description_chars as usize {
				return Err(Error::InvalidRequest {
					message: format!(
						"description must be at most {} characters.",
						self.cfg.listings.max_description_chars
					),
				});
			}

			business.description = description;
		}
		if let Some(email) = clean_opt(req.email) {
			business.email = Some(email);
		}
		if let Some(phone) = clean_opt(req.phone) {
			business.phone = Some(phone);
		}
		if let Some(website) = clean_opt(req.website) {
			business.website = Some(website);
		}
		if let Some(primary_service) = clean_opt(req.primary_service) {
			business.primary_service = Some(primary_service);
		}
		if let Some(claimed) = req.claimed {
			business.claimed = claimed;
		}

		business.updated_at = time::OffsetDateTime::now_utc();

		self.catalog.update_business(&business).await?;

		Ok(UpdateResponse { business_id: business.business_id, updated_at: business.updated_at })
	}
}
