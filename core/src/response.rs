//! Response normalization and validation.
//!
//! `normalize` never fails: an undecodable body becomes an envelope carrying
//! the `JSON_PARSING_FAILED` sentinel. `validate` is where parse and status
//! failures turn into errors.

use log::warn;
use serde_json::{json, Value};

use crate::codec::{decode_value, is_falsy};
use crate::error::RequestError;
use crate::http::HttpResponse;
use crate::types::Envelope;

pub const JSON_PARSING_FAILED: &str = "JSON_PARSING_FAILED";

const JSON_PARSING_FAILED_MESSAGE: &str = "Response json parsing failed!";

/// Wrap a raw response in an `Envelope`.
pub fn normalize(response: &HttpResponse) -> Envelope {
    let (data, is_json_parsing_failed) = match decode_value(&response.body) {
        Ok(data) => (empty_if_falsy(data), false),
        Err(err) => {
            warn!("HTTP {}: response body is not JSON: {err}", response.status);
            (
                json!({
                    "code": JSON_PARSING_FAILED,
                    "message": JSON_PARSING_FAILED_MESSAGE,
                }),
                true,
            )
        }
    };

    Envelope {
        success: response.ok(),
        status: response.status,
        status_text: response.status_text.clone(),
        data,
        is_json_parsing_failed,
    }
}

/// Pass a successful envelope through; reject anything else.
///
/// A non-2xx status takes precedence over a parse failure.
pub fn validate(envelope: Envelope) -> Result<Envelope, RequestError> {
    if !envelope.success {
        return Err(RequestError::Semantic(envelope));
    }
    if envelope.is_json_parsing_failed {
        return Err(RequestError::Parse(envelope));
    }
    Ok(envelope)
}

// A decoded `null`, `false`, `0` or `""` payload is reported as `{}`.
fn empty_if_falsy(data: Value) -> Value {
    if is_falsy(&data) {
        Value::Object(Default::default())
    } else {
        data
    }
}
