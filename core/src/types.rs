//! Request parameter bags and the normalized response envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConstructionError;
use crate::http::HttpMethod;

/// Normalized response wrapper.
///
/// `success` mirrors the transport OK flag. `is_json_parsing_failed` is only
/// ever set by the normalizer when the body could not be decoded, in which
/// case `data` holds the `JSON_PARSING_FAILED` sentinel object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub success: bool,
    pub status: u16,
    #[serde(default)]
    pub status_text: String,
    pub data: Value,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_json_parsing_failed: bool,
}

/// Method override, header override and the remaining key/value parameters
/// for a single call.
///
/// `headers`, when present, replaces the client's default headers rather
/// than merging with them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams {
    pub method: Option<HttpMethod>,
    pub headers: Option<Vec<(String, String)>>,
    pub params: Map<String, Value>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Set the method only if none was given yet.
    pub fn default_method(mut self, method: HttpMethod) -> Self {
        self.method.get_or_insert(method);
        self
    }

    /// Add a header to the override list, starting one if needed.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.into()));
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Split a loose JSON parameter bag into its parts.
    ///
    /// `method` and `headers` are pulled out of the object; every other key
    /// becomes a parameter. `null` stands for an empty bag.
    pub fn from_value(value: Value) -> Result<Self, ConstructionError> {
        let mut map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            other => {
                return Err(ConstructionError::InvalidParams(format!(
                    "expected an object, got {}",
                    kind_of(&other)
                )))
            }
        };

        let method = match map.shift_remove("method") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name.parse()?),
            Some(other) => {
                return Err(ConstructionError::InvalidParams(format!(
                    "`method` must be a string, got {}",
                    kind_of(&other)
                )))
            }
        };

        let headers = match map.shift_remove("headers") {
            None | Some(Value::Null) => None,
            Some(Value::Object(headers)) => Some(
                headers
                    .into_iter()
                    .map(|(name, value)| match value {
                        Value::String(value) => Ok((name, value)),
                        other => Err(ConstructionError::InvalidParams(format!(
                            "header {name:?} must be a string, got {}",
                            kind_of(&other)
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Some(other) => {
                return Err(ConstructionError::InvalidParams(format!(
                    "`headers` must be an object, got {}",
                    kind_of(&other)
                )))
            }
        };

        Ok(Self {
            method,
            headers,
            params: map,
        })
    }
}

impl From<Map<String, Value>> for RequestParams {
    fn from(params: Map<String, Value>) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }
}

impl TryFrom<Value> for RequestParams {
    type Error = ConstructionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
