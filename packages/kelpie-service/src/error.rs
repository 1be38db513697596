pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<kelpie_storage::Error> for Error {
	fn from(err: kelpie_storage::Error) -> Self {
		match err {
			kelpie_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			kelpie_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			kelpie_storage::Error::NotFound(message) => Self::NotFound { message },
		}
	}
}
