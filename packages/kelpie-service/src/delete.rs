use uuid::Uuid;

use crate::{Error, KelpieService, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DeleteRequest {
	pub business_id: Uuid,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DeleteResponse {
	pub business_id: Uuid,
	pub deleted: bool,
}

impl KelpieService {
	/// Soft delete. The row stays behind for the back office; search and
	/// listings stop returning it immediately.
	pub async fn delete(&self, req: DeleteRequest) -> Result<DeleteResponse> {
		let now = time::OffsetDateTime::now_utc();
		let deleted = self.catalog.soft_delete_business(req.business_id, now).await?;

		if !deleted {
			return Err(Error::NotFound {
				message: format!("No business matches {}.", req.business_id),
			});
		}

		Ok(DeleteResponse { business_id: req.business_id, deleted: true })
	}
}
