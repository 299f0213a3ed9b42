pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Document store unavailable: {message}")]
	StoreUnavailable { message: String },
	#[error("Malformed store response: {message}")]
	Decode { message: String },
	/// A single search hit that cannot be displayed. Callers skip the hit.
	#[error("Malformed hit {id}: {message}")]
	MalformedHit { id: String, message: String },
	#[error("Render error: {message}")]
	Render { message: String },
}
impl From<nzbidx_storage::Error> for Error {
	fn from(err: nzbidx_storage::Error) -> Self {
		match err {
			nzbidx_storage::Error::StoreUnavailable { message } => Self::StoreUnavailable { message },
			nzbidx_storage::Error::Decode { message } => Self::Decode { message },
			nzbidx_storage::Error::NotFound { message } => Self::NotFound { message },
			nzbidx_storage::Error::InvalidConfig { message } => Self::StoreUnavailable { message },
		}
	}
}
