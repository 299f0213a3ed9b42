use std::{future::Future, pin::Pin, time::Duration as StdDuration};

use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::{Error, Result};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Document types of the index hierarchy. Files route to their upload and segments to their
/// file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocType {
	Upload,
	File,
	Segment,
}
impl DocType {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Upload => "upload",
			Self::File => "file",
			Self::Segment => "segment",
		}
	}
}

/// Query/response exchange with the document store. Both calls return the raw response body so
/// decoding failures surface as [`Error::Decode`] in one place.
pub trait DocumentStore
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		doc_type: DocType,
		body: &'a Value,
		params: &'a [(&'a str, &'a str)],
	) -> BoxFuture<'a, Result<Value>>;

	fn get<'a>(
		&'a self,
		doc_type: DocType,
		id: &'a str,
		params: &'a [(&'a str, &'a str)],
	) -> BoxFuture<'a, Result<Value>>;
}

pub struct HttpStore {
	client: Client,
	base: Url,
	index: String,
}
impl HttpStore {
	pub fn new(cfg: &nzbidx_config::Store) -> Result<Self> {
		let client = Client::builder().timeout(StdDuration::from_millis(cfg.timeout_ms)).build()?;
		let base = Url::parse(&cfg.url)
			.map_err(|err| Error::InvalidConfig { message: format!("store.url: {err}.") })?;

		if base.cannot_be_a_base() {
			return Err(Error::InvalidConfig {
				message: "store.url must be a hierarchical URL.".to_string(),
			});
		}

		Ok(Self { client, base, index: cfg.index.clone() })
	}

	pub fn endpoint(&self, doc_type: DocType, tail: &str) -> Result<Url> {
		let mut url = self.base.clone();

		url.path_segments_mut()
			.map_err(|_| Error::InvalidConfig {
				message: "store.url must be a hierarchical URL.".to_string(),
			})?
			.pop_if_empty()
			.extend([self.index.as_str(), doc_type.as_str(), tail]);

		Ok(url)
	}

	async fn post_search(
		&self,
		doc_type: DocType,
		body: &Value,
		params: &[(&str, &str)],
	) -> Result<Value> {
		let url = self.endpoint(doc_type, "_search")?;

		tracing::debug!(%url, "Searching document store.");

		let res = self.client.post(url).query(params).json(body).send().await?;
		let json: Value = res.error_for_status()?.json().await?;

		Ok(json)
	}

	async fn get_document(
		&self,
		doc_type: DocType,
		id: &str,
		params: &[(&str, &str)],
	) -> Result<Value> {
		let url = self.endpoint(doc_type, id)?;

		tracing::debug!(%url, "Fetching document.");

		let res = self.client.get(url).query(params).send().await?;

		// A missing document still carries a `found: false` body worth decoding.
		if res.status() == StatusCode::NOT_FOUND {
			return Ok(res.json().await?);
		}

		let json: Value = res.error_for_status()?.json().await?;

		Ok(json)
	}
}

impl DocumentStore for HttpStore {
	fn search<'a>(
		&'a self,
		doc_type: DocType,
		body: &'a Value,
		params: &'a [(&'a str, &'a str)],
	) -> BoxFuture<'a, Result<Value>> {
		Box::pin(self.post_search(doc_type, body, params))
	}

	fn get<'a>(
		&'a self,
		doc_type: DocType,
		id: &'a str,
		params: &'a [(&'a str, &'a str)],
	) -> BoxFuture<'a, Result<Value>> {
		Box::pin(self.get_document(doc_type, id, params))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn store(url: &str) -> HttpStore {
		let cfg =
			nzbidx_config::Store { url: url.to_string(), index: "nzb".to_string(), timeout_ms: 1_000 };

		HttpStore::new(&cfg).expect("Failed to build store.")
	}

	#[test]
	fn builds_type_scoped_endpoints() {
		let store = store("http://localhost:9200");
		let url = store.endpoint(DocType::File, "_search").expect("endpoint");

		assert_eq!(url.as_str(), "http://localhost:9200/nzb/file/_search");
	}

	#[test]
	fn escapes_document_ids() {
		let store = store("http://es.internal:9200/proxy");
		let url = store.endpoint(DocType::Upload, "a b/c").expect("endpoint");

		assert_eq!(url.as_str(), "http://es.internal:9200/proxy/nzb/upload/a%20b%2Fc");
	}

	#[test]
	fn rejects_unparseable_urls() {
		let cfg = nzbidx_config::Store {
			url: "not a url".to_string(),
			index: "nzb".to_string(),
			timeout_ms: 1_000,
		};

		assert!(matches!(HttpStore::new(&cfg), Err(Error::InvalidConfig { .. })));
	}
}
