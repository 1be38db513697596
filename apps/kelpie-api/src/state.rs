use std::sync::Arc;

use kelpie_service::KelpieService;
use kelpie_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<KelpieService>,
}
impl AppState {
	pub async fn new(config: kelpie_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = KelpieService::new(config, db);

		Ok(Self { service: Arc::new(service) })
	}
}
