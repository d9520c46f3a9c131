//! Axum route handlers for the relay gateway API.

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use relay_core::{ChatResponse, CurrentWeather, RequestId};

use crate::{
    error::{Endpoint, GatewayError},
    extract::{ChatBody, WeatherParams},
    state::AppState,
};

/// Response header echoing the [`RequestId`] assigned to a request.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router over the given state.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);
    Router::new()
        .route("/api/weather", get(get_weather))
        .route("/api/chat", post(post_chat))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
            let request_id = req.extensions().get::<RequestId>().copied().unwrap_or_default();
            tracing::info_span!(
                "request",
                method = %req.method(),
                path = %req.uri().path(),
                request_id = %request_id
            )
        }))
        .layer(middleware::from_fn(assign_request_id))
        .layer(cors)
}

/// Cross-origin policy: exact origin allow-list, `GET` and `POST` only,
/// credentials allowed, any request header.
///
/// Credentialed CORS cannot use a `*` header wildcard, so requested headers
/// are mirrored back instead.
#[must_use]
pub fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins.iter().cloned()))
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true)
        .allow_headers(AllowHeaders::mirror_request())
}

async fn assign_request_id(mut req: Request, next: Next) -> Response {
    let request_id = RequestId::new();
    req.extensions_mut().insert(request_id);
    let mut resp = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        resp.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    resp
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health`: liveness check.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `GET /api/weather?lat=..&lon=..`: current conditions at a coordinate.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] (via the extractor) for missing
/// or invalid coordinates, and the errors of [`Endpoint::resolve`] otherwise.
pub async fn get_weather(
    State(state): State<AppState>,
    WeatherParams(query): WeatherParams,
) -> Result<Json<CurrentWeather>, GatewayError> {
    tracing::info!(lat = %query.latitude, lon = %query.longitude, "fetching weather");
    let outcome = state.weather.current_weather(&query).await;
    tracing::info!(outcome = %outcome.kind(), "weather upstream answered");
    Endpoint::Weather.resolve(outcome).map(Json)
}

/// `POST /api/chat`: forward a prompt to the language model.
///
/// The credential is checked on every request, before any outbound call.
///
/// # Errors
/// Returns [`GatewayError::ServerMisconfigured`] if no credential is
/// configured, and the errors of [`Endpoint::resolve`] otherwise.
pub async fn post_chat(
    State(state): State<AppState>,
    ChatBody(request): ChatBody,
) -> Result<Json<ChatResponse>, GatewayError> {
    let Some(api_key) = state.config.gemini_api_key() else {
        tracing::warn!("GEMINI_API_KEY is not set");
        return Err(GatewayError::ServerMisconfigured);
    };

    tracing::info!(prompt = %request.prompt_preview(), "sending prompt to LLM");
    let outcome = state.llm.generate(api_key, &request.prompt).await;
    tracing::info!(outcome = %outcome.kind(), "LLM upstream answered");
    Endpoint::Chat.resolve(outcome).map(|text| Json(ChatResponse::new(text)))
}
