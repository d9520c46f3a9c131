//! Fuzz target: text extraction from language-model responses.
//!
//! Any JSON value, however shaped, must classify as success or malformed
//! without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use relay_core::UpstreamOutcome;
use relay_upstream::gemini::extract_text;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        match extract_text(&value) {
            UpstreamOutcome::Success(_) | UpstreamOutcome::MalformedResponse(_) => {}
            other => panic!("extraction produced {other:?}"),
        }
    }
});
