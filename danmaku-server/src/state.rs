//! Application state shared across all handlers

use crate::config::ServerConfig;
use crate::metrics::Metrics;

pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,

    pub metrics: Metrics,
}

impl AppState {
    /// Create a new AppState with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            metrics: Metrics::new(),
        }
    }
}
