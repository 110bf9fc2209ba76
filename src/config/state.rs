// Application state module
// Read-only state shared by every connection of one process

use super::types::Config;
use crate::handler::Endpoint;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Which endpoint this process serves on `/`
    pub endpoint: Endpoint,
}

impl AppState {
    pub fn new(config: &Config, endpoint: Endpoint) -> Self {
        Self {
            config: config.clone(),
            endpoint,
        }
    }
}
