use uuid::Uuid;

use kelpie_domain::region::Region;

use crate::{KelpieService, Result, parse_region};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SuburbsRequest {
	pub query: Option<String>,
	pub council_id: Option<Uuid>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SuburbItem {
	pub suburb_id: Uuid,
	pub council_id: Uuid,
	pub name: String,
	pub region: Region,
	pub latitude: Option<f64>,
	pub longitude: Option<f64>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SuburbsResponse {
	pub suburbs: Vec<SuburbItem>,
}

impl KelpieService {
	/// Suburb lookup behind the public search box: case-insensitive prefix
	/// match, optionally scoped to one council, name-ordered.
	pub async fn suburbs(&self, req: SuburbsRequest) -> Result<SuburbsResponse> {
		let query = req.query.as_deref().map(str::trim).filter(|value| !value.is_empty());
		let suburbs = self.catalog.list_suburbs(query, req.council_id).await?;
		let suburbs = suburbs
			.into_iter()
			.map(|suburb| {
				Ok(SuburbItem {
					suburb_id: suburb.suburb_id,
					council_id: suburb.council_id,
					name: suburb.name,
					region: parse_region(&suburb.region)?,
					latitude: suburb.latitude,
					longitude: suburb.longitude,
				})
			})
			.collect::<Result<Vec<_>>>()?;

		Ok(SuburbsResponse { suburbs })
	}
}
