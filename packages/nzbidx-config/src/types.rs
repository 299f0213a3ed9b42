use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub store: Store,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub feed: Feed,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
	/// Directory holding `home.html`, the landing page served for an empty query.
	pub html_dir: String,
	/// Optional. Absolute origin used for links in feeds, e.g. "https://example.org". When
	/// absent, the request's `Host` header is used.
	pub base_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Store {
	/// Base URL of the document store, e.g. "http://localhost:9200".
	pub url: String,
	pub index: String,
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	pub page_size: u32,
	/// Minimum completion ratio for results when incomplete uploads are excluded.
	pub complete_threshold: f64,
}
impl Default for Search {
	fn default() -> Self {
		Self { page_size: 200, complete_threshold: 0.9 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Feed {
	pub default_max: u32,
	pub max_items: u32,
	pub site_name: String,
	pub description: String,
	pub language: String,
}
impl Default for Feed {
	fn default() -> Self {
		Self {
			default_max: 50,
			max_items: 500,
			site_name: "Animezb".to_string(),
			description: "Usenet Indexer for Japanese Media".to_string(),
			language: "en-us".to_string(),
		}
	}
}
