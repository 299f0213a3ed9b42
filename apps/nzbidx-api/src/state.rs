use std::sync::Arc;

use nzbidx_config::Config;
use nzbidx_service::NzbService;
use nzbidx_storage::DocumentStore;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<NzbService>,
}
impl AppState {
	pub fn new(config: Config) -> color_eyre::Result<Self> {
		let service = NzbService::connect(config)?;

		Ok(Self { service: Arc::new(service) })
	}

	pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Self {
		Self { service: Arc::new(NzbService::new(config, store)) }
	}
}
