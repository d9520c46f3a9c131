//! Upstream endpoints and per-call timeouts.

use std::time::Duration;

/// Default Open-Meteo forecast endpoint.
pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Default Generative Language API root.
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model used for chat completions.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Default bound on a weather lookup.
pub const DEFAULT_WEATHER_TIMEOUT: Duration = Duration::from_secs(10);

/// Default bound on a chat completion. Generation is slow, so this is larger.
pub const DEFAULT_CHAT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the upstream services live and how long a single call may take.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct UpstreamConfig {
    /// Full URL of the forecast endpoint.
    pub weather_url: String,

    /// API root; `/models/{model}:generateContent` is appended.
    pub gemini_url: String,

    /// Model path segment.
    pub gemini_model: String,

    /// Timeout for the weather call, from connect until the body is read.
    pub weather_timeout: Duration,

    /// Timeout for the chat call, from connect until the body is read.
    pub chat_timeout: Duration,
}

impl UpstreamConfig {
    /// Config pointing at the public Open-Meteo and Gemini endpoints.
    #[must_use]
    pub fn new() -> Self {
        Self {
            weather_url: DEFAULT_WEATHER_URL.to_owned(),
            gemini_url: DEFAULT_GEMINI_URL.to_owned(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_owned(),
            weather_timeout: DEFAULT_WEATHER_TIMEOUT,
            chat_timeout: DEFAULT_CHAT_TIMEOUT,
        }
    }

    /// Full `generateContent` URL for the configured model, without the key.
    #[must_use]
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.gemini_url.trim_end_matches('/'),
            self.gemini_model
        )
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new()
    }
}
