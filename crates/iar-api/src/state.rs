//! Application state shared by every handler.

use iar_core::Config;
use iar_db::IarRepository;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    /// Destination writes and the connectivity probe. Boxed behind the trait so tests can
    /// run the router without a database.
    pub repository: Arc<dyn IarRepository>,
}

impl AppState {
    pub fn new(config: Config, repository: Arc<dyn IarRepository>) -> Self {
        Self { config, repository }
    }
}
