//! Shared per-process state handed to every handler.

use std::sync::Arc;

use relay_upstream::{http_client, GeminiClient, LanguageModel, OpenMeteoClient, WeatherSource};

use crate::config::GatewayConfig;

/// Read-only state cloned into each request.
///
/// Holds no mutable data: requests never observe each other.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub weather: Arc<dyn WeatherSource>,
    pub llm: Arc<dyn LanguageModel>,
}

impl AppState {
    /// Assemble state from explicit upstream implementations.
    #[must_use]
    pub fn new(
        config: GatewayConfig,
        weather: Arc<dyn WeatherSource>,
        llm: Arc<dyn LanguageModel>,
    ) -> Self {
        Self { config: Arc::new(config), weather, llm }
    }

    /// Build the production upstream clients over one shared HTTP client.
    ///
    /// # Errors
    /// Returns the reqwest error if the HTTP client cannot be built.
    pub fn from_config(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let http = http_client()?;
        let weather = Arc::new(OpenMeteoClient::new(http.clone(), &config.upstream));
        let llm = Arc::new(GeminiClient::new(http, &config.upstream));
        Ok(Self::new(config, weather, llm))
    }
}
