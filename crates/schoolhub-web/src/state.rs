//! Application state management

use crate::api_client::ApiClient;
use schoolhub_core::{Config, Result};

/// Application state holding configuration and the backend client
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Unauthenticated backend client, specialised per request
    pub api_client: ApiClient,
}

impl AppState {
    /// Create new application state
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from the backend
    /// configuration.
    pub fn new(config: Config) -> Result<Self> {
        let api_client = ApiClient::from_config(&config.backend)?;
        Ok(Self { config, api_client })
    }
}
