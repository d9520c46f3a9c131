//! Fuzz target: JSON deserialization of `ChatRequest`.
//!
//! Arbitrary bytes fed to the chat body decoder must never panic, and any
//! accepted body must yield a preview that is a prefix of the prompt.

#![no_main]

use libfuzzer_sys::fuzz_target;
use relay_core::ChatRequest;

fuzz_target!(|data: &[u8]| {
    if let Ok(req) = serde_json::from_slice::<ChatRequest>(data) {
        assert!(req.prompt.starts_with(req.prompt_preview()));
    }
});
