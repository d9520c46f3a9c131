//! Typed request decoding.
//!
//! These extractors run before any handler logic. Every decode or
//! validation failure becomes [`GatewayError::InvalidRequest`], so a bad
//! request is rejected with the same JSON body shape as every other error
//! and never reaches an upstream.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header, request::Parts},
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};

use relay_core::{ChatRequest, WeatherQuery};

use crate::error::GatewayError;

/// Raw `lat` / `lon` query-string values before validation.
#[derive(Debug, Deserialize)]
struct RawWeatherParams {
    lat: Option<String>,
    lon: Option<String>,
}

/// Validated coordinates from `?lat=<float>&lon=<float>`.
#[derive(Debug, Clone, Copy)]
pub struct WeatherParams(pub WeatherQuery);

impl<S> FromRequestParts<S> for WeatherParams
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawWeatherParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))?;
        let query = WeatherQuery::parse(raw.lat.as_deref(), raw.lon.as_deref())?;
        Ok(Self(query))
    }
}

/// A JSON `{"prompt": "<string>"}` body.
///
/// The body must be a JSON object. A body sent without a `Content-Type`
/// header is still parsed as JSON; any other non-JSON content type is
/// rejected.
#[derive(Debug, Clone)]
pub struct ChatBody(pub ChatRequest);

impl<S> FromRequest<S> for ChatBody
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let object = if req.headers().contains_key(header::CONTENT_TYPE) {
            let Json(object) = Json::<Map<String, Value>>::from_request(req, state)
                .await
                .map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))?;
            object
        } else {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))?;
            serde_json::from_slice(&bytes).map_err(|e| {
                GatewayError::InvalidRequest(format!("body is not a JSON object: {e}"))
            })?
        };
        let body = serde_json::from_value(Value::Object(object))
            .map_err(|e| GatewayError::InvalidRequest(format!("invalid chat request: {e}")))?;
        Ok(Self(body))
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request as HttpRequest};

    use super::*;

    async fn weather_params(uri: &str) -> Result<WeatherParams, GatewayError> {
        let req = match HttpRequest::builder().uri(uri).body(Body::empty()) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        let (mut parts, _) = req.into_parts();
        WeatherParams::from_request_parts(&mut parts, &()).await
    }

    async fn chat_body(content_type: Option<&str>, body: &'static str) -> Result<ChatBody, GatewayError> {
        let mut builder = HttpRequest::builder().method("POST").uri("/api/chat");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let req = match builder.body(Body::from(body)) {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };
        ChatBody::from_request(req, &()).await
    }

    #[tokio::test]
    async fn weather_params_accept_valid_coordinates() {
        let WeatherParams(query) = match weather_params("/api/weather?lat=47.6&lon=-122.3").await {
            Ok(p) => p,
            Err(e) => panic!("unexpected rejection: {e}"),
        };
        assert!((query.latitude.value() - 47.6).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn weather_params_name_the_offending_field() {
        let missing = weather_params("/api/weather?lat=47.6").await.expect_err("must reject");
        assert_eq!(missing.to_string(), "lon: field required");

        let garbage = weather_params("/api/weather?lat=abc&lon=1").await.expect_err("must reject");
        assert!(garbage.to_string().starts_with("lat:"), "got: {garbage}");

        let range = weather_params("/api/weather?lat=10&lon=181").await.expect_err("must reject");
        assert!(range.to_string().starts_with("lon:"), "got: {range}");
    }

    #[tokio::test]
    async fn chat_body_accepts_empty_prompt() {
        let ChatBody(req) = match chat_body(Some("application/json"), r#"{"prompt":""}"#).await {
            Ok(b) => b,
            Err(e) => panic!("unexpected rejection: {e}"),
        };
        assert_eq!(req.prompt, "");
    }

    #[tokio::test]
    async fn chat_body_rejects_bad_shapes() {
        for body in ["{}", r#"{"prompt": 5}"#, "not json", r#"["hello"]"#] {
            let err = chat_body(Some("application/json"), body).await.expect_err("must reject");
            assert!(
                matches!(err, GatewayError::InvalidRequest(_)),
                "{body} should be an invalid request, got {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn chat_body_without_content_type_is_parsed_as_json() {
        let ChatBody(req) = match chat_body(None, r#"{"prompt":"hi"}"#).await {
            Ok(b) => b,
            Err(e) => panic!("unexpected rejection: {e}"),
        };
        assert_eq!(req.prompt, "hi");

        let err = chat_body(None, r#"["hi"]"#).await.expect_err("must reject");
        assert!(matches!(err, GatewayError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn chat_body_rejects_non_json_content_type() {
        let err = chat_body(Some("text/plain"), r#"{"prompt":"hi"}"#).await.expect_err("must reject");
        assert!(matches!(err, GatewayError::InvalidRequest(_)));
    }
}
