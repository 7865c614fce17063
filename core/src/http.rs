//! HTTP transport types and the fetch seam.
//!
//! # Design
//! Requests and responses are plain data. The façade builds an `HttpRequest`,
//! hands it to a `Fetch` implementation supplied by the caller, and parses
//! the `HttpResponse` that comes back. DNS, TLS, pooling and the wire itself
//! all live behind `Fetch`, so the core never touches the network and stays
//! executor-agnostic.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConstructionError, TransportError};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Read-style verbs carry their parameters in the query string; the rest
    /// carry them as a JSON body.
    pub fn uses_query(self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(ConstructionError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = ConstructionError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// An HTTP request described as plain data.
///
/// Built by `RequestClient::build_request`. `url` is absolute and already
/// carries any serialized query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by a `Fetch` implementation after executing an `HttpRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: String::new(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    /// Transport-level OK flag: any 2xx status.
    pub fn ok(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// The fetch primitive the façade delegates to.
///
/// Implementations perform exactly one round-trip per call. A response with
/// a non-2xx status is still `Ok`; only failures to obtain a response at all
/// (connection refused, TLS, malformed reply) are `TransportError`s.
pub trait Fetch {
    fn fetch(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<F: Fetch + Sync> Fetch for &F {
    fn fetch(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).fetch(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("patch".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
        assert_eq!("DELETE".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
    }

    #[test]
    fn unknown_method_is_rejected() {
        let err = "HEAD".parse::<HttpMethod>().unwrap_err();
        assert!(matches!(err, ConstructionError::UnsupportedMethod(m) if m == "HEAD"));
    }

    #[test]
    fn method_deserializes_in_any_case() {
        let method: HttpMethod = serde_json::from_str(r#""patch""#).unwrap();
        assert_eq!(method, HttpMethod::Patch);
        let method: HttpMethod = serde_json::from_str(r#""Delete""#).unwrap();
        assert_eq!(method, HttpMethod::Delete);
        assert!(serde_json::from_str::<HttpMethod>(r#""TRACE""#).is_err());
    }

    #[test]
    fn method_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&HttpMethod::Patch).unwrap(), r#""PATCH""#);
    }

    #[test]
    fn only_get_and_delete_use_query() {
        assert!(HttpMethod::Get.uses_query());
        assert!(HttpMethod::Delete.uses_query());
        assert!(!HttpMethod::Post.uses_query());
        assert!(!HttpMethod::Put.uses_query());
        assert!(!HttpMethod::Patch.uses_query());
    }

    #[test]
    fn ok_covers_the_2xx_range() {
        assert!(HttpResponse::new(200, "").ok());
        assert!(HttpResponse::new(204, "").ok());
        assert!(!HttpResponse::new(199, "").ok());
        assert!(!HttpResponse::new(304, "").ok());
        assert!(!HttpResponse::new(404, "").ok());
    }
}
