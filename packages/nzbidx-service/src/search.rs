use serde_json::{Map, Value};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use nzbidx_domain::{
	age::age_bucket,
	bytes::format_bytes,
	category::{self, Category},
	completion,
	pagination::{self, PageMarker},
};
use nzbidx_storage::queries::{self, UploadQuery};

use crate::{Error, NzbService, Result};

const TYPE_PREFIX: &str = "types.";

#[derive(Debug, Clone)]
pub struct SearchRequest {
	pub query: String,
	/// Zero-based.
	pub page: u32,
	pub only_complete: bool,
}

/// Display projection of one upload hit.
#[derive(Debug, Clone)]
pub struct SearchResult {
	pub name: String,
	pub subject: String,
	pub poster: String,
	pub upload_id: String,
	pub size: String,
	pub bytes: u64,
	pub completed_parts: u64,
	pub total_parts: u64,
	pub completion: String,
	pub completion_class: Option<&'static str>,
	pub category: Category,
	pub age: String,
	pub types: Vec<String>,
	pub ext_types: String,
	pub date: OffsetDateTime,
	/// Sorted, comma-joined newsgroups.
	pub full_group: String,
	/// First newsgroup as stored.
	pub group: String,
}

#[derive(Debug, Clone)]
pub struct SearchPage {
	pub query: String,
	pub results: Vec<SearchResult>,
	pub total: u64,
	/// Zero-based.
	pub page: u32,
	/// One-based count of pages.
	pub last_page: u32,
	pub pagination: Vec<PageMarker>,
}

impl NzbService {
	pub async fn search(&self, req: SearchRequest) -> Result<SearchPage> {
		let query = req.query.trim();

		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "Search query is empty.".to_string() });
		}

		let page_size = self.cfg.search.page_size;
		let mut page = req.page;
		let (mut results, mut total) =
			self.search_uploads(query, page, page_size, req.only_complete).await?;
		let mut last_page = pagination::last_page(total, page_size);

		// The total is only known after the first query; re-read the last page when the
		// requested one lies beyond it.
		if page >= last_page {
			page = last_page.saturating_sub(1);
			(results, total) =
				self.search_uploads(query, page, page_size, req.only_complete).await?;
			last_page = pagination::last_page(total, page_size);
			page = page.min(last_page.saturating_sub(1));
		}

		tracing::debug!(query, page, total, "Search completed.");

		Ok(SearchPage {
			query: query.to_string(),
			results,
			total,
			page,
			last_page,
			pagination: pagination::plan(page, last_page),
		})
	}

	pub(crate) async fn search_uploads(
		&self,
		query: &str,
		page: u32,
		page_size: u32,
		only_complete: bool,
	) -> Result<(Vec<SearchResult>, u64)> {
		let upload_query = UploadQuery {
			query,
			page,
			page_size,
			complete_threshold: only_complete.then_some(self.cfg.search.complete_threshold),
		};
		let upload_page = queries::search_uploads(self.store.as_ref(), &upload_query).await?;
		let results = collect_results(&upload_page.hits, OffsetDateTime::now_utc());

		Ok((results, upload_page.total))
	}
}

/// Parses the one-based `p` parameter into a zero-based page. Garbage and values below one
/// land on the first page.
pub fn page_index(raw: Option<&str>) -> u32 {
	let Some(page) = raw.and_then(|raw| raw.trim().parse::<i64>().ok()) else {
		return 0;
	};

	u32::try_from((page - 1).max(0)).unwrap_or(u32::MAX)
}

/// Formats every displayable hit, dropping malformed ones.
pub fn collect_results(hits: &[Value], now: OffsetDateTime) -> Vec<SearchResult> {
	hits.iter()
		.filter_map(|hit| match format_hit(hit, now) {
			Ok(result) => Some(result),
			Err(err) => {
				tracing::warn!(error = %err, "Skipping search hit.");

				None
			},
		})
		.collect()
}

/// Maps one upload hit from the `fields` projection into a [`SearchResult`].
pub fn format_hit(hit: &Value, now: OffsetDateTime) -> Result<SearchResult> {
	let id = hit.get("_id").and_then(Value::as_str).unwrap_or_default();
	let fields = hit
		.get("fields")
		.and_then(Value::as_object)
		.filter(|fields| !fields.is_empty())
		.ok_or_else(|| malformed(id, "hit has no fields"))?;

	if id.is_empty() {
		return Err(malformed(id, "hit has no _id"));
	}

	let filename = required_str(fields, id, "filename")?;
	let subject = required_str(fields, id, "subject")?;
	let bytes = required_u64(fields, id, "size")?;
	let complete = required_u64(fields, id, "complete")?;
	let length = required_u64(fields, id, "length")?;
	let raw_date = required_str(fields, id, "date")?;
	let date = OffsetDateTime::parse(raw_date, &Rfc3339)
		.map_err(|err| malformed(id, &format!("date {raw_date:?} is not RFC 3339: {err}")))?;
	let ratio = first(fields, "completion")
		.and_then(Value::as_f64)
		.unwrap_or_else(|| completion::ratio(complete, length));
	let completion = completion::completion(complete, length, ratio);
	let mut groups: Vec<String> = all_str(fields, "group");
	let group = groups.first().cloned().ok_or_else(|| malformed(id, "hit has no group"))?;
	let types = type_tags(fields);

	groups.sort();

	Ok(SearchResult {
		name: filename.strip_suffix('.').unwrap_or(filename).to_string(),
		subject: subject.to_string(),
		poster: first(fields, "poster").and_then(Value::as_str).unwrap_or_default().to_string(),
		upload_id: id.to_string(),
		size: format_bytes(bytes),
		bytes,
		completed_parts: complete,
		total_parts: length,
		completion_class: completion.css_class(),
		completion: completion.label,
		category: category::categorize(&group),
		age: age_bucket((now - date).whole_seconds()),
		ext_types: types.join(", "),
		types,
		date,
		full_group: groups.join(", "),
		group,
	})
}

/// `types.<ext>` counters rendered as `"<count> <ext>"`, ordered by key.
fn type_tags(fields: &Map<String, Value>) -> Vec<String> {
	let mut keys: Vec<&String> = fields.keys().filter(|key| key.starts_with(TYPE_PREFIX)).collect();

	keys.sort();

	keys.into_iter()
		.filter_map(|key| {
			let count = first(fields, key).and_then(Value::as_f64)?;
			let ext = &key[TYPE_PREFIX.len()..];

			Some(format!("{count:.0} {ext}"))
		})
		.collect()
}

/// First value of a field. The `fields` projection wraps values in arrays.
fn first<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
	match fields.get(key)? {
		Value::Array(values) => values.first(),
		value => Some(value),
	}
}

fn all_str(fields: &Map<String, Value>, key: &str) -> Vec<String> {
	match fields.get(key) {
		Some(Value::Array(values)) =>
			values.iter().filter_map(Value::as_str).map(str::to_string).collect(),
		Some(Value::String(value)) => vec![value.clone()],
		_ => Vec::new(),
	}
}

fn required_str<'a>(fields: &'a Map<String, Value>, id: &str, key: &str) -> Result<&'a str> {
	first(fields, key).and_then(Value::as_str).ok_or_else(|| malformed(id, &format!("missing {key}")))
}

fn required_u64(fields: &Map<String, Value>, id: &str, key: &str) -> Result<u64> {
	first(fields, key)
		.and_then(|value| value.as_u64().or_else(|| value.as_f64().map(|value| value as u64)))
		.ok_or_else(|| malformed(id, &format!("missing {key}")))
}

fn malformed(id: &str, message: &str) -> Error {
	Error::MalformedHit { id: id.to_string(), message: message.to_string() }
}
