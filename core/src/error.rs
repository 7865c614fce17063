//! Error types for the request façade.
//!
//! # Design
//! One variant per pipeline stage. Construction problems surface before any
//! I/O; transport problems come straight from `Fetch`; parse and semantic
//! failures carry the full `Envelope` so callers can inspect status and
//! payload the same way regardless of which check tripped.

use thiserror::Error;

use crate::types::Envelope;

/// Errors returned by `RequestClient`.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request could not be assembled. No I/O was attempted.
    #[error("invalid request: {0}")]
    Construction(#[from] ConstructionError),

    /// The fetch primitive failed to produce a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body was not valid JSON.
    #[error("HTTP {}: response body is not valid JSON", .0.status)]
    Parse(Envelope),

    /// The server answered with a non-2xx status.
    #[error("HTTP {} {}", .0.status, .0.status_text)]
    Semantic(Envelope),

    /// The payload was valid JSON but did not match the requested type.
    #[error("response data did not match the expected shape: {0}")]
    Decode(#[source] serde_json::Error),
}

impl RequestError {
    /// The normalized response, for failures that got as far as a response.
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            RequestError::Parse(envelope) | RequestError::Semantic(envelope) => Some(envelope),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.envelope().map(|e| e.status)
    }
}

/// Synchronous failures while turning a path and parameters into a request.
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported HTTP method {0:?}")]
    UnsupportedMethod(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A failure reported by the fetch primitive.
#[derive(Debug, Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(status: u16) -> Envelope {
        Envelope {
            success: false,
            status,
            status_text: "Not Found".to_string(),
            data: json!({}),
            is_json_parsing_failed: false,
        }
    }

    #[test]
    fn semantic_error_exposes_envelope_and_status() {
        let err = RequestError::Semantic(envelope(404));
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "HTTP 404 Not Found");
    }

    #[test]
    fn transport_error_has_no_envelope() {
        let err = RequestError::from(TransportError::new("connection refused"));
        assert!(err.envelope().is_none());
        assert_eq!(err.to_string(), "transport error: connection refused");
    }

    #[test]
    fn transport_error_keeps_its_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = TransportError::with_source("connect failed", io);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.message(), "connect failed");
    }
}
