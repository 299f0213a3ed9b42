use serde::{Deserialize, Deserializer};
use serde_json::Value;
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct SearchResponse<H> {
	pub hits: Hits<H>,
}

#[derive(Debug, Deserialize)]
pub struct Hits<H> {
	#[serde(default, deserialize_with = "deserialize_total")]
	pub total: u64,
	#[serde(default = "Vec::new")]
	pub hits: Vec<H>,
}

/// A hit carrying its document under `_source`.
#[derive(Debug, Deserialize)]
pub struct SourceHit<T> {
	#[serde(rename = "_id")]
	pub id: String,
	#[serde(rename = "_source")]
	pub source: T,
}

/// One page of upload hits. Hits stay raw so a malformed one can be skipped on its own.
#[derive(Debug)]
pub struct UploadPage {
	pub total: u64,
	pub hits: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UploadLookup {
	#[serde(default)]
	pub found: bool,
	#[serde(rename = "_source")]
	pub source: Option<UploadSource>,
}

#[derive(Debug, Deserialize)]
pub struct UploadSource {
	#[serde(default)]
	pub fileprefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileDoc {
	#[serde(default)]
	pub filename: String,
	#[serde(default)]
	pub subject: String,
	#[serde(default)]
	pub poster: String,
	#[serde(with = "crate::time_serde")]
	pub date: OffsetDateTime,
	#[serde(default)]
	pub group: Vec<String>,
	/// Parts present in the index.
	#[serde(default)]
	pub complete: u32,
	/// Parts the poster announced.
	#[serde(default)]
	pub length: u32,
	#[serde(default)]
	pub size: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentDoc {
	#[serde(default)]
	pub bytes: u64,
	pub part: u32,
	#[serde(alias = "msgid", alias = "messageid")]
	pub message_id: String,
}

fn deserialize_total<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Total {
		Count(u64),
		Tracked { value: u64 },
	}

	Ok(match Total::deserialize(deserializer)? {
		Total::Count(value) | Total::Tracked { value } => value,
	})
}
