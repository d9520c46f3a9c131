//! Error types for the gateway crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use relay_core::{CoreError, UpstreamOutcome};

/// Message returned when the language-model credential is not configured.
pub const MISSING_API_KEY: &str = "Server is missing API configuration.";

/// Errors that can occur during gateway request handling.
///
/// Every variant renders as `{"detail": "<message>"}`. Only
/// [`GatewayError::Upstream`] carries text that originated elsewhere.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The request is missing a field or a field has an invalid value.
    #[error("{0}")]
    InvalidRequest(String),

    /// The server lacks configuration needed to serve this request.
    #[error("{}", MISSING_API_KEY)]
    ServerMisconfigured,

    /// The upstream answered with a non-success status.
    #[error("{detail}")]
    Upstream { status: StatusCode, detail: String },

    /// The upstream answered successfully with a body the gateway does not understand.
    #[error("{0}")]
    MalformedUpstream(&'static str),

    /// The upstream could not be reached or did not answer in time.
    #[error("{0}")]
    Transport(&'static str),
}

impl From<CoreError> for GatewayError {
    fn from(err: CoreError) -> Self {
        GatewayError::InvalidRequest(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::Upstream { status, .. } => *status,
            GatewayError::ServerMisconfigured
            | GatewayError::MalformedUpstream(_)
            | GatewayError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({"detail": self.to_string()}))).into_response()
    }
}

/// Which client-facing endpoint an upstream outcome belongs to.
///
/// Selects the fixed wording of client messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Weather,
    Chat,
}

impl Endpoint {
    fn upstream_prefix(self) -> &'static str {
        match self {
            Endpoint::Weather => "Failed to fetch weather data",
            Endpoint::Chat => "Failed to get response from LLM",
        }
    }

    fn malformed_message(self) -> &'static str {
        match self {
            Endpoint::Weather => "Invalid data format from weather API.",
            Endpoint::Chat => "Received an invalid response from the LLM.",
        }
    }

    fn transport_message(self) -> &'static str {
        match self {
            Endpoint::Weather => "Internal server error while fetching weather.",
            Endpoint::Chat => "Internal server error while contacting LLM.",
        }
    }

    /// Turn an upstream outcome into the handler's result.
    ///
    /// Upstream status codes are mirrored; one that is not a valid HTTP
    /// status becomes 502. Malformed and transport reasons stay server-side:
    /// the client sees only the fixed message for this endpoint.
    ///
    /// # Errors
    /// Returns the [`GatewayError`] matching any non-success outcome.
    pub fn resolve<T>(self, outcome: UpstreamOutcome<T>) -> Result<T, GatewayError> {
        match outcome {
            UpstreamOutcome::Success(value) => Ok(value),
            UpstreamOutcome::UpstreamError { status, body } => Err(GatewayError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                detail: format!("{}: {body}", self.upstream_prefix()),
            }),
            UpstreamOutcome::MalformedResponse(_) => {
                Err(GatewayError::MalformedUpstream(self.malformed_message()))
            }
            UpstreamOutcome::TransportFailure(_) => {
                Err(GatewayError::Transport(self.transport_message()))
            }
        }
    }
}
