use uuid::Uuid;

use kelpie_domain::listing::{ResourceType, Tier};
use kelpie_storage::models::Business;

use crate::{Error, KelpieService, Result, clean_opt, normalize_tag_set};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterRequest {
	pub name: String,
	pub resource_type: String,
	pub suburb_id: Uuid,
	pub tier: Option<String>,
	pub email: Option<String>,
	pub phone: Option<String>,
	pub website: Option<String>,
	pub description: Option<String>,
	pub age_specialties: Vec<String>,
	pub behaviour_issues: Option<Vec<String>>,
	pub primary_service: Option<String>,
	pub secondary_services: Option<Vec<String>>,
	pub claimed: Option<bool>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegisterResponse {
	pub business_id: Uuid,
}

impl KelpieService {
	/// Trainer self-registration, also used for admin-entered listings
	/// (which start unclaimed).
	pub async fn register(&self, req: RegisterRequest) -> Result<RegisterResponse> {
		let name = req.name.trim();

		if name.is_empty() {
			return Err(Error::InvalidRequest { message: "name is required.".to_string() });
		}

		let resource_type =
			ResourceType::parse(req.resource_type.trim()).ok_or_else(|| Error::InvalidRequest {
				message:
					"resource_type must be one of trainer, behaviour_consultant, or emergency_service."
						.to_string(),
			})?;
		let tier = match req.tier.as_deref().map(str::trim) {
			None | Some("") => Tier::Basic,
			Some(value) => Tier::parse(value).ok_or_else(|| Error::InvalidRequest {
				message: "tier must be one of basic or pro.".to_string(),
			})?,
		};
		let age_specialties = normalize_tag_set(
			&req.age_specialties,
			"age_specialties",
			1,
			self.cfg.listings.max_age_stages as usize,
		)?;
		let behaviour_issues = normalize_tag_set(
			req.behaviour_issues.as_deref().unwrap_or(&[]),
			"behaviour_issues",
			0,
			self.cfg.listings.max_behaviour_issues as usize,
		)?;
		let secondary_services = normalize_tag_set(
			req.secondary_services.as_deref().unwrap_or(&[]),
			"secondary_services",
			0,
			usize::MAX,
		)?;
		let description = req.description.map(|value| value.trim().to_string()).unwrap_or_default();

		if description.chars().count() > self.cfg.listings.max_description_chars as usize {
			return Err(Error::InvalidRequest {
				message: format!(
					"description must be at most {} characters.",
					self.cfg.listings.max_description_chars
				),
			});
		}

		let Some(suburb) = self.catalog.suburb_by_id(req.suburb_id).await? else {
			return Err(Error::InvalidRequest { message: "Unknown suburb_id.".to_string() });
		};
		let now = time::OffsetDateTime::now_utc();
		let business = Business {
			business_id: Uuid::new_v4(),
			suburb_id: suburb.suburb_id,
			council_id: suburb.council_id,
			region: suburb.region.clone(),
			name: name.to_string(),
			resource_type: resource_type.as_str().to_string(),
			tier: tier.as_str().to_string(),
			email: clean_opt(req.email),
			phone: clean_opt(req.phone),
			website: clean_opt(req.website),
			description,
			age_specialties,
			behaviour_issues,
			primary_service: clean_opt(req.primary_service),
			secondary_services,
			claimed: req.claimed.unwrap_or(false),
			deleted: false,
			created_at: now,
			updated_at: now,
		};

		self.catalog.insert_business(&business).await?;

		Ok(RegisterResponse { business_id: business.business_id })
	}
}
