#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Document store unavailable: {message}")]
	StoreUnavailable { message: String },
	#[error("Failed to decode store response: {message}")]
	Decode { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Invalid store configuration: {message}")]
	InvalidConfig { message: String },
}
impl From<reqwest::Error> for Error {
	fn from(err: reqwest::Error) -> Self {
		if err.is_decode() {
			return Self::Decode { message: err.to_string() };
		}

		Self::StoreUnavailable { message: err.to_string() }
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Decode { message: err.to_string() }
	}
}
