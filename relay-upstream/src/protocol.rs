//! The shared upstream call protocol.
//!
//! One request, one attempt. The outcome is classified as:
//! - transport failure: nothing usable came back (connect, DNS, TLS,
//!   timeout, or the body could not be read)
//! - upstream error: any non-2xx status, with the body text kept verbatim
//! - malformed response: 2xx whose body is not JSON
//! - success: 2xx with a decoded JSON body
//!
//! # Cancel Safety
//! Cancel safe. Dropping the future drops the in-flight reqwest request,
//! which closes the connection.

use std::error::Error as _;

use reqwest::RequestBuilder;
use serde_json::Value;

use relay_core::UpstreamOutcome;

/// Send `request` once and classify the result.
///
/// `upstream` names the service in log events only.
pub async fn execute(upstream: &'static str, request: RequestBuilder) -> UpstreamOutcome<Value> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => return transport_failure(upstream, e),
    };

    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return transport_failure(upstream, e),
    };

    if !status.is_success() {
        tracing::warn!(upstream, status = status.as_u16(), %body, "upstream returned error status");
        return UpstreamOutcome::UpstreamError { status: status.as_u16(), body };
    }

    match serde_json::from_str(&body) {
        Ok(value) => UpstreamOutcome::Success(value),
        Err(e) => {
            tracing::warn!(upstream, error = %e, %body, "upstream body is not valid JSON");
            UpstreamOutcome::MalformedResponse(format!("invalid JSON body: {e}"))
        }
    }
}

/// Log a payload that decoded as JSON but had the wrong shape, and classify it.
pub(crate) fn malformed<T>(upstream: &'static str, reason: &str, payload: &Value) -> UpstreamOutcome<T> {
    tracing::warn!(upstream, reason, body = %payload, "unexpected upstream response structure");
    UpstreamOutcome::MalformedResponse(reason.to_owned())
}

fn transport_failure<T>(upstream: &'static str, error: reqwest::Error) -> UpstreamOutcome<T> {
    let description = describe(error);
    tracing::error!(upstream, error = %description, "upstream call failed");
    UpstreamOutcome::TransportFailure(description)
}

/// Human-readable transport error, including its cause chain.
///
/// The URL is stripped first: it can carry a credential in its query string.
fn describe(error: reqwest::Error) -> String {
    let stage = if error.is_timeout() {
        "timed out"
    } else if error.is_connect() {
        "connection failed"
    } else if error.is_body() || error.is_decode() {
        "reading response body failed"
    } else {
        "request failed"
    };
    let error = error.without_url();
    let mut detail = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    format!("{stage}: {detail}")
}
