pub mod descriptor;
pub mod links;
pub mod nzb;
pub mod rss;
pub mod search;
pub mod uploads;

mod error;
mod xml;

pub use descriptor::{Descriptor, DescriptorRequest, NzbFile, NzbSegment};
pub use error::{Error, Result};
pub use rss::{Feed, FeedItem, FeedRequest};
pub use search::{SearchPage, SearchRequest, SearchResult};
pub use uploads::{FileInfo, UploadInfo};

use std::sync::Arc;

use nzbidx_config::Config;
use nzbidx_storage::{DocumentStore, HttpStore};

/// Request-scoped operations over the index. Holds only immutable configuration and the store
/// handle, so one instance serves every request.
pub struct NzbService {
	pub cfg: Config,
	pub store: Arc<dyn DocumentStore>,
}
impl NzbService {
	pub fn new(cfg: Config, store: Arc<dyn DocumentStore>) -> Self {
		Self { cfg, store }
	}

	pub fn connect(cfg: Config) -> Result<Self> {
		let store = HttpStore::new(&cfg.store)?;

		Ok(Self::new(cfg, Arc::new(store)))
	}
}
