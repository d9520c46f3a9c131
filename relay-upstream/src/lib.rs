//! Outbound side of the relay API gateway.
//!
//! Implements the single-attempt upstream call protocol and the two
//! concrete upstream clients (Open-Meteo weather and Gemini chat), each
//! behind a trait so the HTTP handlers can be exercised with fakes.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod gemini;
pub mod protocol;
pub mod weather;

pub use config::UpstreamConfig;
pub use gemini::{GeminiClient, LanguageModel};
pub use weather::{OpenMeteoClient, WeatherSource};

/// Build the outbound HTTP client shared by every upstream.
///
/// Timeouts are applied per request, so the client itself has none.
/// Redirects are not followed: a 3xx is reported like any other non-2xx
/// status, and the credential in the query string is never re-sent.
///
/// # Errors
/// Returns the reqwest error if the TLS backend cannot be initialised.
pub fn http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(concat!("relay-gateway/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::none())
        .build()
}
