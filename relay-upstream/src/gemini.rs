//! Gemini `generateContent` client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use relay_core::UpstreamOutcome;

use crate::{protocol, UpstreamConfig};

const UPSTREAM: &str = "llm";

/// A generative language model that answers a single prompt.
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a reply to `prompt`, authenticating with `api_key`.
    async fn generate(&self, api_key: &str, prompt: &str) -> UpstreamOutcome<String>;
}

/// Request body of `models/{model}:generateContent`.
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Part<'a> {
    pub text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    /// A single-turn request whose only content part is `prompt`.
    #[must_use]
    pub fn single_prompt(prompt: &'a str) -> Self {
        Self { contents: vec![Content { parts: vec![Part { text: prompt }] }] }
    }
}

/// [`LanguageModel`] backed by the Gemini Generative Language API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    url: String,
    timeout: std::time::Duration,
}

impl GeminiClient {
    #[must_use]
    pub fn new(http: Client, config: &UpstreamConfig) -> Self {
        Self {
            http,
            url: config.generate_content_url(),
            timeout: config.chat_timeout,
        }
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, api_key: &str, prompt: &str) -> UpstreamOutcome<String> {
        let request = self
            .http
            .post(&self.url)
            .query(&[("key", api_key)])
            .json(&GenerateContentRequest::single_prompt(prompt))
            .timeout(self.timeout);

        protocol::execute(UPSTREAM, request)
            .await
            .and_then(|body| extract_text(&body))
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a response.
///
/// Every level must be present with the expected JSON type; anything else
/// is a malformed response, never an empty or partial success.
#[must_use]
pub fn extract_text(body: &Value) -> UpstreamOutcome<String> {
    let text = body
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .and_then(|part| part.get("text"))
        .and_then(Value::as_str);

    match text {
        Some(text) => UpstreamOutcome::Success(text.to_owned()),
        None => protocol::malformed(UPSTREAM, "missing candidates[0].content.parts[0].text", body),
    }
}
