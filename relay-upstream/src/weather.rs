//! Open-Meteo current-conditions client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use relay_core::{CurrentWeather, UpstreamOutcome, WeatherQuery};

use crate::{protocol, UpstreamConfig};

const UPSTREAM: &str = "weather";

/// Reason recorded when a 2xx body lacks the `current_weather` key.
pub const MISSING_CURRENT_WEATHER: &str = "missing current_weather field";

/// A source of current weather conditions.
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch the current conditions at `query`.
    async fn current_weather(&self, query: &WeatherQuery) -> UpstreamOutcome<CurrentWeather>;
}

/// [`WeatherSource`] backed by the Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    url: String,
    timeout: std::time::Duration,
}

impl OpenMeteoClient {
    #[must_use]
    pub fn new(http: Client, config: &UpstreamConfig) -> Self {
        Self {
            http,
            url: config.weather_url.clone(),
            timeout: config.weather_timeout,
        }
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn current_weather(&self, query: &WeatherQuery) -> UpstreamOutcome<CurrentWeather> {
        let request = self
            .http
            .get(&self.url)
            .query(&[
                ("latitude", query.latitude.to_string()),
                ("longitude", query.longitude.to_string()),
                ("current_weather", "true".to_owned()),
                ("temperature_unit", "fahrenheit".to_owned()),
            ])
            .timeout(self.timeout);

        protocol::execute(UPSTREAM, request)
            .await
            .and_then(|body| extract_current_weather(&body))
    }
}

/// Pull the `current_weather` object out of a forecast response.
#[must_use]
pub fn extract_current_weather(body: &Value) -> UpstreamOutcome<CurrentWeather> {
    let Some(current) = body.get("current_weather") else {
        return protocol::malformed(UPSTREAM, MISSING_CURRENT_WEATHER, body);
    };
    match CurrentWeather::from_value(current.clone()) {
        Ok(current) => UpstreamOutcome::Success(current),
        Err(e) => protocol::malformed(UPSTREAM, &format!("current_weather: {e}"), body),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extracts_sub_object_verbatim() {
        let body = json!({
            "latitude": 47.6,
            "current_weather": {"temperature": 52.1, "windspeed": 5.0}
        });
        match extract_current_weather(&body) {
            UpstreamOutcome::Success(current) => {
                assert_eq!(current.get("temperature"), Some(&json!(52.1)));
                assert_eq!(current.as_map().len(), 2, "no extra fields may appear");
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn missing_key_is_malformed() {
        let body = json!({"latitude": 47.6});
        assert_eq!(
            extract_current_weather(&body),
            UpstreamOutcome::MalformedResponse(MISSING_CURRENT_WEATHER.to_owned())
        );
    }

    #[test]
    fn non_object_current_weather_is_malformed() {
        for current in [json!([1, 2, 3]), json!("sunny"), json!(null)] {
            let body = json!({ "current_weather": current.clone() });
            assert!(
                matches!(extract_current_weather(&body), UpstreamOutcome::MalformedResponse(_)),
                "{current} must not pass as current weather"
            );
        }
    }

    #[test]
    fn non_object_body_is_malformed() {
        let body = json!(["current_weather"]);
        assert!(matches!(extract_current_weather(&body), UpstreamOutcome::MalformedResponse(_)));
    }
}
