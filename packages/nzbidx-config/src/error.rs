use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Startup failures of the nzbidx config file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read nzbidx config at {path:?}.")]
	ReadConfig { path: PathBuf, source: std::io::Error },
	#[error("Failed to parse nzbidx config at {path:?}: {source}")]
	ParseConfig { path: PathBuf, source: toml::de::Error },
	#[error("Invalid nzbidx config: {message}")]
	Validation { message: String },
}
