//! Current-conditions payload passed through from the weather upstream.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// The upstream's `current_weather` object, forwarded without interpretation.
///
/// Only the top-level shape is checked: the value must be a JSON object.
/// Keys and values inside it are never renamed or converted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrentWeather(Map<String, Value>);

impl CurrentWeather {
    /// Wraps an upstream value, rejecting anything that is not an object.
    ///
    /// # Errors
    /// Returns [`CoreError::NotAnObject`] for arrays, scalars and `null`.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CoreError::NotAnObject { found: json_kind(&other) }),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Short name of a JSON value's type, for diagnostics.
#[must_use]
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
