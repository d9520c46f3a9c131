//! Process configuration, read once at startup.

use std::{fmt, net::SocketAddr, time::Duration};

use axum::http::HeaderValue;
use relay_upstream::UpstreamConfig;

/// Address bound when `RELAY_LISTEN_ADDR` is unset.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";

/// Browser origins allowed to call the API when `RELAY_ALLOWED_ORIGINS` is unset.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://andrewilkinson.com",
    "https://www.andrewilkinson.com",
    "http://localhost:3000",
];

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The listen address is not a `host:port` socket address.
    #[error("invalid listen address '{value}': {source}")]
    InvalidListenAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    /// An allowed origin is not a valid header value.
    #[error("invalid allowed origin '{value}'")]
    InvalidOrigin { value: String },

    /// A timeout is not a positive whole number of seconds.
    #[error("{var} must be a positive number of seconds, got '{value}'")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Gateway configuration shared by every request.
#[derive(Clone)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// Socket address the HTTP listener binds.
    pub listen_addr: SocketAddr,

    /// Exact origins allowed by the CORS policy.
    pub allowed_origins: Vec<HeaderValue>,

    /// Upstream endpoints and timeouts.
    pub upstream: UpstreamConfig,

    gemini_api_key: Option<String>,
}

impl GatewayConfig {
    /// Configuration with every default applied and no credential.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .copied()
                .map(HeaderValue::from_static)
                .collect(),
            upstream: UpstreamConfig::new(),
            gemini_api_key: None,
        }
    }

    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// See [`GatewayConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    ///
    /// A missing or empty `GEMINI_API_KEY` is not an error here: the chat
    /// endpoint reports it on each request instead.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if an address, origin or timeout cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::new();

        if let Some(value) = lookup("RELAY_LISTEN_ADDR") {
            config.listen_addr = value
                .parse()
                .map_err(|source| ConfigError::InvalidListenAddr { value, source })?;
        }

        if let Some(value) = lookup("RELAY_ALLOWED_ORIGINS") {
            config.allowed_origins = parse_origins(&value)?;
        }

        if let Some(url) = lookup("RELAY_WEATHER_URL") {
            config.upstream.weather_url = url;
        }
        if let Some(url) = lookup("RELAY_GEMINI_URL") {
            config.upstream.gemini_url = url;
        }
        if let Some(model) = lookup("RELAY_GEMINI_MODEL") {
            config.upstream.gemini_model = model;
        }
        if let Some(value) = lookup("RELAY_WEATHER_TIMEOUT_SECS") {
            config.upstream.weather_timeout = parse_timeout("RELAY_WEATHER_TIMEOUT_SECS", value)?;
        }
        if let Some(value) = lookup("RELAY_CHAT_TIMEOUT_SECS") {
            config.upstream.chat_timeout = parse_timeout("RELAY_CHAT_TIMEOUT_SECS", value)?;
        }

        config.gemini_api_key = lookup("GEMINI_API_KEY").filter(|key| !key.is_empty());
        Ok(config)
    }

    /// Replace the language-model credential.
    #[must_use]
    pub fn with_gemini_api_key(mut self, key: Option<String>) -> Self {
        self.gemini_api_key = key.filter(|key| !key.is_empty());
        self
    }

    /// The language-model credential, if one was supplied.
    #[must_use]
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini_api_key.as_deref()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("listen_addr", &self.listen_addr)
            .field("allowed_origins", &self.allowed_origins)
            .field("upstream", &self.upstream)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn parse_origins(value: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| ConfigError::InvalidOrigin { value: origin.to_owned() })
        })
        .collect()
}

fn parse_timeout(var: &'static str, value: String) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = match GatewayConfig::from_lookup(lookup_from(&[])) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(config.listen_addr.to_string(), DEFAULT_LISTEN_ADDR);
        assert_eq!(config.allowed_origins.len(), DEFAULT_ALLOWED_ORIGINS.len());
        assert_eq!(config.upstream, UpstreamConfig::new());
        assert!(config.gemini_api_key().is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = match GatewayConfig::from_lookup(lookup_from(&[
            ("RELAY_LISTEN_ADDR", "0.0.0.0:9000"),
            ("RELAY_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("RELAY_WEATHER_TIMEOUT_SECS", "12"),
            ("RELAY_GEMINI_MODEL", "gemini-test"),
            ("GEMINI_API_KEY", "k-123"),
        ])) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(config.listen_addr.port(), 9000);
        assert_eq!(config.allowed_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.upstream.weather_timeout, Duration::from_secs(12));
        assert_eq!(config.upstream.gemini_model, "gemini-test");
        assert_eq!(config.gemini_api_key(), Some("k-123"));
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let config = match GatewayConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "")])) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert!(config.gemini_api_key().is_none());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_addr = GatewayConfig::from_lookup(lookup_from(&[("RELAY_LISTEN_ADDR", "nope")]));
        assert!(matches!(bad_addr, Err(ConfigError::InvalidListenAddr { .. })));

        let zero = GatewayConfig::from_lookup(lookup_from(&[("RELAY_CHAT_TIMEOUT_SECS", "0")]));
        assert!(matches!(zero, Err(ConfigError::InvalidTimeout { .. })));

        let origin =
            GatewayConfig::from_lookup(lookup_from(&[("RELAY_ALLOWED_ORIGINS", "bad\norigin")]));
        assert!(matches!(origin, Err(ConfigError::InvalidOrigin { .. })));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = GatewayConfig::new().with_gemini_api_key(Some("top-secret".to_owned()));
        let debug = format!("{config:?}");
        assert!(!debug.contains("top-secret"), "credential leaked into Debug output");
        assert!(debug.contains("<redacted>"));
    }
}
