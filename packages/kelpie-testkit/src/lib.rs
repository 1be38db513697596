mod error;

pub use error::{Error, Result};

use std::{env, str::FromStr, thread};

use sqlx::{
	ConnectOptions, Connection, Executor,
	postgres::{PgConnectOptions, PgConnection},
};
use tokio::runtime;
use uuid::Uuid;

/// Environment variable pointing integration tests at a Postgres server.
/// The DSN's role must be allowed to create and drop databases.
pub const DSN_VAR: &str = "KELPIE_PG_DSN";

const MAINTENANCE_DATABASES: [&str; 2] = ["postgres", "template1"];

pub fn env_dsn() -> Option<String> {
	env::var(DSN_VAR).ok()
}

/// A throwaway database on a shared Postgres server. Every test gets its own
/// freshly named database; `cleanup` drops it, and `Drop` is the fallback
/// when a test panics before reaching cleanup.
pub struct TestDatabase {
	name: String,
	dsn: String,
	admin: PgConnectOptions,
	dropped: bool,
}
impl TestDatabase {
	pub async fn new(base_dsn: &str) -> Result<Self> {
		let base = PgConnectOptions::from_str(base_dsn)
			.map_err(|source| Error::BadDsn { var: DSN_VAR, source })?;
		let (admin, mut conn) = maintenance_connect(&base).await?;
		let name = format!("kelpie_test_{}", Uuid::new_v4().simple());

		conn.execute(format!(r#"CREATE DATABASE "{name}""#).as_str()).await.map_err(|source| {
			Error::Database { action: "create", name: name.clone(), source }
		})?;

		let dsn = base.database(&name).to_url_lossy().to_string();

		Ok(Self { name, dsn, admin, dropped: false })
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	pub async fn cleanup(mut self) -> Result<()> {
		self.dropped = true;

		drop_database(&self.admin, &self.name).await
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.dropped {
			return;
		}

		let name = std::mem::take(&mut self.name);
		let admin = self.admin.clone();
		// A panicking async test lands here inside a live runtime, where
		// blocking is not allowed; a scratch thread with its own runtime
		// issues the final DROP DATABASE.
		let outcome = thread::spawn(move || {
			let rt = runtime::Builder::new_current_thread().enable_all().build()?;

			rt.block_on(drop_database(&admin, &name)).map_err(std::io::Error::other)
		})
		.join();

		match outcome {
			Ok(Ok(())) => {},
			Ok(Err(err)) => eprintln!("Leaked a kelpie test database: {err}"),
			Err(_) => eprintln!("Leaked a kelpie test database: cleanup thread panicked."),
		}
	}
}

async fn maintenance_connect(
	base: &PgConnectOptions,
) -> Result<(PgConnectOptions, PgConnection)> {
	let mut last = None;

	for database in MAINTENANCE_DATABASES {
		let options = base.clone().database(database);

		match PgConnection::connect_with(&options).await {
			Ok(conn) => return Ok((options, conn)),
			Err(source) => last = Some(source),
		}
	}

	Err(Error::NoMaintenanceDatabase { source: last })
}

async fn drop_database(admin: &PgConnectOptions, name: &str) -> Result<()> {
	let mut conn = PgConnection::connect_with(admin).await.map_err(|source| Error::Database {
		action: "reconnect for",
		name: name.to_string(),
		source,
	})?;

	// Sessions left over from a failed test would otherwise block the drop.
	let _ = sqlx::query(
		"\
SELECT pg_terminate_backend(pid)
FROM pg_stat_activity
WHERE datname = $1 AND pid <> pg_backend_pid()",
	)
	.bind(name)
	.execute(&mut conn)
	.await;

	conn.execute(format!(r#"DROP DATABASE IF EXISTS "{name}""#).as_str())
		.await
		.map_err(|source| Error::Database { action: "drop", name: name.to_string(), source })?;

	Ok(())
}
