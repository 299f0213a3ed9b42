//! Typed queries over the upload → file → segment hierarchy.
//!
//! The store has no joins. Children are selected with an exact-match filter on `_routing`,
//! which holds the parent document id.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
	DocType, DocumentStore, Error, Result,
	models::{FileDoc, SearchResponse, SegmentDoc, SourceHit, UploadLookup, UploadPage},
};

/// Upper bound on files fetched for one upload.
pub const FILE_LISTING_SIZE: u32 = 16_384;
/// Upper bound on segments fetched for one file.
pub const SEGMENT_LISTING_SIZE: u32 = 65_536;

#[derive(Debug, Clone)]
pub struct UploadQuery<'a> {
	pub query: &'a str,
	/// Zero-based.
	pub page: u32,
	pub page_size: u32,
	/// Restricts hits to `completion >= threshold` when set.
	pub complete_threshold: Option<f64>,
}

pub fn upload_search_body(query: &UploadQuery<'_>) -> Value {
	let mut body = serde_json::json!({
		"query": {
			"query_string": {
				"query": query.query,
				"default_operator": "AND",
			}
		},
		"from": u64::from(query.page) * u64::from(query.page_size),
		"size": query.page_size,
		"sort": [{ "date": "desc" }],
		"fields": "*",
	});

	if let Some(threshold) = query.complete_threshold {
		body["filter"] = serde_json::json!({ "range": { "completion": { "gte": threshold } } });
	}

	body
}

pub fn routing_body(parent_id: &str, size: u32) -> Value {
	serde_json::json!({
		"filter": { "term": { "_routing": parent_id } },
		"size": size,
	})
}

pub async fn search_uploads(
	store: &dyn DocumentStore,
	query: &UploadQuery<'_>,
) -> Result<UploadPage> {
	let body = upload_search_body(query);
	let raw = store.search(DocType::Upload, &body, &[]).await?;
	let response: SearchResponse<Value> = decode(raw)?;

	Ok(UploadPage { total: response.hits.total, hits: response.hits.hits })
}

/// Stored `fileprefix` of an upload, as-is.
pub async fn upload_file_prefix(store: &dyn DocumentStore, upload_id: &str) -> Result<String> {
	let raw = store.get(DocType::Upload, upload_id, &[("_source_include", "fileprefix")]).await?;
	let lookup: UploadLookup = decode(raw)?;

	if !lookup.found {
		return Err(Error::NotFound { message: format!("Upload {upload_id} does not exist.") });
	}

	Ok(lookup.source.map(|source| source.fileprefix).unwrap_or_default())
}

/// Files of an upload in store order, without their embedded segment lists.
pub async fn files_for_upload(
	store: &dyn DocumentStore,
	upload_id: &str,
) -> Result<Vec<SourceHit<FileDoc>>> {
	let body = routing_body(upload_id, FILE_LISTING_SIZE);
	let raw = store.search(DocType::File, &body, &[("_source_exclude", "segments")]).await?;
	let response: SearchResponse<SourceHit<FileDoc>> = decode(raw)?;

	Ok(response.hits.hits)
}

pub async fn segments_for_file(store: &dyn DocumentStore, file_id: &str) -> Result<Vec<SegmentDoc>> {
	let body = routing_body(file_id, SEGMENT_LISTING_SIZE);
	let raw = store.search(DocType::Segment, &body, &[]).await?;
	let response: SearchResponse<SourceHit<SegmentDoc>> = decode(raw)?;

	Ok(response.hits.hits.into_iter().map(|hit| hit.source).collect())
}

fn decode<T>(raw: Value) -> Result<T>
where
	T: DeserializeOwned,
{
	Ok(serde_json::from_value(raw)?)
}
