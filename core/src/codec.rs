//! Value encoding for request bodies and non-scalar query values.

use serde_json::Value;

/// Encode a value for the wire: strings pass through untouched, anything
/// else becomes compact JSON.
pub fn encode_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `null`, `false`, numeric zero and `""`. Containers are never falsy.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Parse a JSON document back into a value.
pub fn decode_value(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}
