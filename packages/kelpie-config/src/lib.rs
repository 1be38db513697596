mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Listings, Postgres, Search, Security, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|source| Error::Read { path: path.to_path_buf(), source })?;
	let cfg: Config = toml::from_str(&raw)
		.map_err(|source| Error::Parse { path: path.to_path_buf(), source })?;

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.admin_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.admin_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.search.default_limit == 0 {
		return Err(Error::Validation {
			message: "search.default_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_limit < cfg.search.default_limit {
		return Err(Error::Validation {
			message: "search.max_limit must be at least search.default_limit.".to_string(),
		});
	}
	if !cfg.search.max_radius_km.is_finite() {
		return Err(Error::Validation {
			message: "search.max_radius_km must be a finite number.".to_string(),
		});
	}
	if cfg.search.max_radius_km <= 0.0 {
		return Err(Error::Validation {
			message: "search.max_radius_km must be greater than zero.".to_string(),
		});
	}
	if cfg.listings.max_age_stages == 0 {
		return Err(Error::Validation {
			message: "listings.max_age_stages must be greater than zero.".to_string(),
		});
	}
	if cfg.listings.max_description_chars == 0 {
		return Err(Error::Validation {
			message: "listings.max_description_chars must be greater than zero.".to_string(),
		});
	}

	Ok(())
}
