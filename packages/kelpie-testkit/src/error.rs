pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{var} is not a valid Postgres DSN.")]
	BadDsn { var: &'static str, source: sqlx::Error },
	#[error("No maintenance database accepted a connection.")]
	NoMaintenanceDatabase { source: Option<sqlx::Error> },
	#[error("Failed to {action} test database {name:?}.")]
	Database { action: &'static str, name: String, source: sqlx::Error },
}
