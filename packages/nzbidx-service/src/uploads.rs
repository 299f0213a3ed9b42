use serde::Serialize;
use time::{UtcOffset, macros::format_description};

use nzbidx_domain::{bytes::format_bytes, subject::ensure_first_part};
use nzbidx_storage::{
	models::{FileDoc, SourceHit},
	queries,
};

use crate::{Error, NzbService, Result};

#[derive(Debug, Clone, Serialize)]
pub struct UploadInfo {
	pub files: Vec<FileInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
	/// `YYYY-MM-DD` in UTC.
	pub date: String,
	/// Epoch seconds.
	pub time: i64,
	pub subject: String,
	pub parts: u32,
	pub length: u32,
	pub size: String,
}
impl FileInfo {
	fn from_doc(doc: &FileDoc) -> Result<Self> {
		let date = doc
			.date
			.to_offset(UtcOffset::UTC)
			.format(format_description!("[year]-[month]-[day]"))
			.map_err(|err| Error::Render { message: err.to_string() })?;

		Ok(Self {
			date,
			time: doc.date.unix_timestamp(),
			subject: ensure_first_part(&doc.subject),
			parts: doc.complete,
			length: doc.length,
			size: format_bytes(doc.size),
		})
	}
}

impl NzbService {
	/// Files of one upload, ordered by subject.
	pub async fn upload_info(&self, upload_id: &str) -> Result<UploadInfo> {
		let hits = queries::files_for_upload(self.store.as_ref(), upload_id).await?;

		upload_info(&hits)
	}
}

pub fn upload_info(hits: &[SourceHit<FileDoc>]) -> Result<UploadInfo> {
	let mut files =
		hits.iter().map(|hit| FileInfo::from_doc(&hit.source)).collect::<Result<Vec<_>>>()?;

	files.sort_by(|a, b| a.subject.cmp(&b.subject));

	Ok(UploadInfo { files })
}
