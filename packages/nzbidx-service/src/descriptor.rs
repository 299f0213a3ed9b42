use nzbidx_domain::subject::ensure_first_part;
use nzbidx_storage::{
	models::{FileDoc, SegmentDoc, SourceHit},
	queries,
};

use crate::{Error, NzbService, Result};

const NZB_SUFFIX: &str = ".nzb";

#[derive(Debug, Clone, Default)]
pub struct DescriptorRequest {
	pub uploads: Vec<String>,
	/// Explicit output file name. Resolved from the first upload when absent.
	pub name: Option<String>,
}

/// File and segment hierarchy of one or more uploads, ready for serialization.
#[derive(Debug, Clone)]
pub struct Descriptor {
	/// Output file name, always ending in `.nzb`.
	pub name: String,
	pub files: Vec<NzbFile>,
}

#[derive(Debug, Clone)]
pub struct NzbFile {
	pub id: String,
	pub name: String,
	pub parts: u32,
	pub length: u32,
	pub bytes: u64,
	pub poster: String,
	/// Epoch seconds.
	pub date: i64,
	/// Subject with its part marker rewritten to one.
	pub subject: String,
	pub groups: Vec<String>,
	pub segments: Vec<NzbSegment>,
}
impl NzbFile {
	fn from_hit(hit: SourceHit<FileDoc>) -> Self {
		let SourceHit { id, source } = hit;

		Self {
			id,
			name: source.filename,
			parts: source.complete,
			length: source.length,
			bytes: source.size,
			poster: source.poster,
			date: source.date.unix_timestamp(),
			subject: ensure_first_part(&source.subject),
			groups: source.group,
			segments: Vec::new(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NzbSegment {
	pub bytes: u64,
	pub number: u32,
	/// Message id without its angle brackets.
	pub message_id: String,
}
impl From<SegmentDoc> for NzbSegment {
	fn from(doc: SegmentDoc) -> Self {
		let message_id = doc.message_id.trim();
		let message_id = message_id.strip_prefix('<').unwrap_or(message_id);
		let message_id = message_id.strip_suffix('>').unwrap_or(message_id);

		Self { bytes: doc.bytes, number: doc.part, message_id: message_id.to_string() }
	}
}

impl NzbService {
	/// Assembles the descriptor for `req.uploads`. Store queries run one after another: the name
	/// lookup, then per upload its files, then per file its segments.
	pub async fn descriptor(&self, req: DescriptorRequest) -> Result<Descriptor> {
		let Some(first) = req.uploads.first() else {
			return Err(Error::InvalidRequest { message: "No upload ids were given.".to_string() });
		};
		let mut name = match req.name.as_deref().map(str::trim).filter(|name| !name.is_empty()) {
			Some(name) => name.to_string(),
			None => upload_name(&queries::upload_file_prefix(self.store.as_ref(), first).await?),
		};
		let mut files = Vec::new();

		for upload_id in &req.uploads {
			for hit in queries::files_for_upload(self.store.as_ref(), upload_id).await? {
				let mut file = NzbFile::from_hit(hit);

				if name.is_empty() {
					name = file.name.clone();
				}

				let mut segments: Vec<NzbSegment> =
					queries::segments_for_file(self.store.as_ref(), &file.id)
						.await?
						.into_iter()
						.map(NzbSegment::from)
						.collect();

				segments.sort_by_key(|segment| segment.number);

				file.segments = segments;

				files.push(file);
			}
		}

		tracing::debug!(uploads = req.uploads.len(), files = files.len(), "Descriptor assembled.");

		Ok(Descriptor { name: descriptor_file_name(&name), files })
	}
}

/// Display name from a stored file prefix, minus one trailing separator.
pub fn upload_name(fileprefix: &str) -> String {
	fileprefix.strip_suffix('.').unwrap_or(fileprefix).to_string()
}

pub fn descriptor_file_name(name: &str) -> String {
	if name.ends_with(NZB_SUFFIX) {
		return name.to_string();
	}

	format!("{name}{NZB_SUFFIX}")
}
