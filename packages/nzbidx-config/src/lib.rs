mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Feed, Search, Service, Store};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (label, value) in [
		("service.http_bind", &cfg.service.http_bind),
		("service.html_dir", &cfg.service.html_dir),
		("store.url", &cfg.store.url),
		("store.index", &cfg.store.index),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if !is_http_url(&cfg.store.url) {
		return Err(Error::Validation {
			message: "store.url must start with http:// or https://.".to_string(),
		});
	}
	if cfg.store.index.contains('/') {
		return Err(Error::Validation {
			message: "store.index must not contain '/'.".to_string(),
		});
	}
	if cfg.store.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "store.timeout_ms must be greater than zero.".to_string(),
		});
	}

	if let Some(base_url) = cfg.service.base_url.as_deref()
		&& !is_http_url(base_url)
	{
		return Err(Error::Validation {
			message: "service.base_url must start with http:// or https://.".to_string(),
		});
	}

	if cfg.search.page_size == 0 {
		return Err(Error::Validation {
			message: "search.page_size must be greater than zero.".to_string(),
		});
	}
	if !cfg.search.complete_threshold.is_finite() {
		return Err(Error::Validation {
			message: "search.complete_threshold must be a finite number.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.search.complete_threshold) {
		return Err(Error::Validation {
			message: "search.complete_threshold must be in the range 0.0-1.0.".to_string(),
		});
	}
	if cfg.feed.max_items == 0 {
		return Err(Error::Validation {
			message: "feed.max_items must be greater than zero.".to_string(),
		});
	}
	if cfg.feed.default_max > cfg.feed.max_items {
		return Err(Error::Validation {
			message: "feed.default_max must be less than or equal to feed.max_items.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.service.base_url.as_deref().map(|url| url.trim().is_empty()).unwrap_or(false) {
		cfg.service.base_url = None;
	}
	if let Some(base_url) = cfg.service.base_url.as_mut() {
		*base_url = base_url.trim().trim_end_matches('/').to_string();
	}

	cfg.store.url = cfg.store.url.trim().trim_end_matches('/').to_string();
	cfg.store.index = cfg.store.index.trim().to_string();
}

fn is_http_url(url: &str) -> bool {
	url.starts_with("http://") || url.starts_with("https://")
}
