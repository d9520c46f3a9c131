//! Classification of a single outbound upstream call.

use std::fmt;

/// Result of one call to an upstream service.
///
/// Every call lands in exactly one variant. Handlers refine a
/// [`UpstreamOutcome::Success`] payload with [`UpstreamOutcome::and_then`],
/// turning shape problems into [`UpstreamOutcome::MalformedResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamOutcome<T> {
    /// The upstream answered 2xx and the payload had the expected shape.
    Success(T),
    /// The upstream answered with a non-2xx status.
    UpstreamError {
        /// Status code exactly as the upstream sent it.
        status: u16,
        /// Raw response body text.
        body: String,
    },
    /// The upstream answered 2xx but the body was not understood.
    MalformedResponse(String),
    /// No usable response: connect, DNS, TLS, timeout or body-read failure.
    TransportFailure(String),
}

impl<T> UpstreamOutcome<T> {
    /// Transforms the success payload, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> UpstreamOutcome<U> {
        self.and_then(|value| UpstreamOutcome::Success(f(value)))
    }

    /// Chains a fallible step onto the success payload.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> UpstreamOutcome<U>) -> UpstreamOutcome<U> {
        match self {
            Self::Success(value) => f(value),
            Self::UpstreamError { status, body } => UpstreamOutcome::UpstreamError { status, body },
            Self::MalformedResponse(reason) => UpstreamOutcome::MalformedResponse(reason),
            Self::TransportFailure(reason) => UpstreamOutcome::TransportFailure(reason),
        }
    }

    /// Short label of the variant, used as a structured log field.
    #[must_use]
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Success(_) => OutcomeKind::Success,
            Self::UpstreamError { .. } => OutcomeKind::UpstreamError,
            Self::MalformedResponse(_) => OutcomeKind::MalformedResponse,
            Self::TransportFailure(_) => OutcomeKind::TransportFailure,
        }
    }
}

/// Payload-free tag of an [`UpstreamOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Success,
    UpstreamError,
    MalformedResponse,
    TransportFailure,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::UpstreamError => "upstream_error",
            Self::MalformedResponse => "malformed_response",
            Self::TransportFailure => "transport_failure",
        })
    }
}
