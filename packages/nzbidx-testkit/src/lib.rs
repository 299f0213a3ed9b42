//! In-memory document store for tests.
//!
//! [`FakeStore`] answers the same query shapes the gateway sends: upload searches return the
//! scripted hit page, file and segment searches are resolved through the `_routing` filter, and
//! upload lookups return `found`/`_source.fileprefix`. Every exchange is recorded.

pub mod fixtures;

use std::{collections::HashMap, sync::Mutex};

use serde_json::Value;

use nzbidx_storage::{BoxFuture, DocType, DocumentStore, Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
	pub doc_type: DocType,
	/// Document id for lookups.
	pub id: Option<String>,
	pub body: Option<Value>,
	pub params: Vec<(String, String)>,
}

#[derive(Default)]
pub struct FakeStore {
	upload_hits: Vec<Value>,
	upload_total: Option<u64>,
	prefixes: HashMap<String, String>,
	files: HashMap<String, Vec<Value>>,
	segments: HashMap<String, Vec<Value>>,
	unavailable: bool,
	requests: Mutex<Vec<RecordedRequest>>,
}
impl FakeStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Hits returned by every upload search. The reported total defaults to the hit count.
	pub fn with_upload_hits(mut self, hits: Vec<Value>) -> Self {
		self.upload_hits = hits;

		self
	}

	pub fn with_upload_total(mut self, total: u64) -> Self {
		self.upload_total = Some(total);

		self
	}

	pub fn with_upload(mut self, upload_id: &str, fileprefix: &str) -> Self {
		self.prefixes.insert(upload_id.to_string(), fileprefix.to_string());

		self
	}

	/// Adds a file hit (`_id` + `_source`) routed to `upload_id`.
	pub fn with_file(mut self, upload_id: &str, hit: Value) -> Self {
		self.files.entry(upload_id.to_string()).or_default().push(hit);

		self
	}

	/// Adds a segment hit routed to `file_id`.
	pub fn with_segment(mut self, file_id: &str, hit: Value) -> Self {
		self.segments.entry(file_id.to_string()).or_default().push(hit);

		self
	}

	/// Fails every exchange as if the store could not be reached.
	pub fn unavailable(mut self) -> Self {
		self.unavailable = true;

		self
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	fn record(&self, request: RecordedRequest) {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).push(request);
	}

	fn answer_search(&self, doc_type: DocType, body: &Value) -> Result<Value> {
		if self.unavailable {
			return Err(unavailable());
		}

		let routing = body["filter"]["term"]["_routing"].as_str().unwrap_or_default();
		let hits = match doc_type {
			DocType::Upload => self.upload_hits.clone(),
			DocType::File => self.files.get(routing).cloned().unwrap_or_default(),
			DocType::Segment => self.segments.get(routing).cloned().unwrap_or_default(),
		};
		let total = match doc_type {
			DocType::Upload => self.upload_total.unwrap_or(hits.len() as u64),
			_ => hits.len() as u64,
		};

		Ok(serde_json::json!({ "took": 1, "hits": { "total": total, "hits": hits } }))
	}

	fn answer_get(&self, doc_type: DocType, id: &str) -> Result<Value> {
		if self.unavailable {
			return Err(unavailable());
		}

		match (doc_type, self.prefixes.get(id)) {
			(DocType::Upload, Some(prefix)) => Ok(serde_json::json!({
				"_id": id,
				"found": true,
				"_source": { "fileprefix": prefix },
			})),
			_ => Ok(serde_json::json!({ "_id": id, "found": false })),
		}
	}
}

impl DocumentStore for FakeStore {
	fn search<'a>(
		&'a self,
		doc_type: DocType,
		body: &'a Value,
		params: &'a [(&'a str, &'a str)],
	) -> BoxFuture<'a, Result<Value>> {
		self.record(RecordedRequest {
			doc_type,
			id: None,
			body: Some(body.clone()),
			params: owned_params(params),
		});

		let response = self.answer_search(doc_type, body);

		Box::pin(async move { response })
	}

	fn get<'a>(
		&'a self,
		doc_type: DocType,
		id: &'a str,
		params: &'a [(&'a str, &'a str)],
	) -> BoxFuture<'a, Result<Value>> {
		self.record(RecordedRequest {
			doc_type,
			id: Some(id.to_string()),
			body: None,
			params: owned_params(params),
		});

		let response = self.answer_get(doc_type, id);

		Box::pin(async move { response })
	}
}

fn owned_params(params: &[(&str, &str)]) -> Vec<(String, String)> {
	params.iter().map(|(key, value)| (key.to_string(), value.to_string())).collect()
}

fn unavailable() -> Error {
	Error::StoreUnavailable { message: "connection refused".to_string() }
}
