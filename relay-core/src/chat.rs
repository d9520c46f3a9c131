//! Request and response bodies of the chat endpoint.

use serde::{Deserialize, Serialize};

/// Number of prompt characters that may appear in logs.
pub const PROMPT_PREVIEW_CHARS: usize = 30;

/// Body of `POST /api/chat`.
///
/// The prompt is forwarded as-is; an empty string is a valid prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
}

impl ChatRequest {
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into() }
    }

    /// The first [`PROMPT_PREVIEW_CHARS`] characters of the prompt.
    ///
    /// Cuts on a character boundary, never inside a multi-byte sequence.
    #[must_use]
    pub fn prompt_preview(&self) -> &str {
        match self.prompt.char_indices().nth(PROMPT_PREVIEW_CHARS) {
            Some((idx, _)) => &self.prompt[..idx],
            None => &self.prompt,
        }
    }
}

/// Body returned by `POST /api/chat` on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

impl ChatResponse {
    #[must_use]
    pub fn new(response: impl Into<String>) -> Self {
        Self { response: response.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_long_prompts() {
        let req = ChatRequest::new("a".repeat(100));
        assert_eq!(req.prompt_preview().len(), PROMPT_PREVIEW_CHARS);
    }

    #[test]
    fn preview_keeps_short_prompts_whole() {
        let req = ChatRequest::new("hello");
        assert_eq!(req.prompt_preview(), "hello");
        assert_eq!(ChatRequest::new("").prompt_preview(), "");
    }

    #[test]
    fn preview_respects_multibyte_boundaries() {
        let req = ChatRequest::new("é".repeat(40));
        let preview = req.prompt_preview();
        assert_eq!(preview.chars().count(), PROMPT_PREVIEW_CHARS);
        assert_eq!(preview.len(), PROMPT_PREVIEW_CHARS * 2, "each 'é' is two bytes");
    }

    #[test]
    fn request_ignores_unknown_keys() {
        let req: ChatRequest = match serde_json::from_str(r#"{"prompt":"hi","temperature":0.2}"#) {
            Ok(r) => r,
            Err(e) => panic!("deserialization failed: {e}"),
        };
        assert_eq!(req.prompt, "hi");
    }

    #[test]
    fn request_requires_prompt_string() {
        assert!(serde_json::from_str::<ChatRequest>("{}").is_err());
        assert!(serde_json::from_str::<ChatRequest>(r#"{"prompt":42}"#).is_err());
    }

    #[test]
    fn response_serializes_single_field() {
        let json = match serde_json::to_string(&ChatResponse::new("hi there")) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, r#"{"response":"hi there"}"#);
    }
}
