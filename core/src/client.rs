//! The request façade.
//!
//! # Design
//! `RequestClient` owns an immutable `ClientConfig` and a `Fetch`
//! implementation, and carries no other state between calls. Each call runs
//! the same linear pipeline: build the request, fetch, normalize, validate,
//! unwrap `data`. The build and parse halves are public on their own so a
//! host that prefers to do its own I/O can skip `Fetch` entirely.

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::codec::encode_value;
use crate::config::ClientConfig;
use crate::error::{ConstructionError, RequestError};
use crate::http::{Fetch, HttpMethod, HttpRequest, HttpResponse};
use crate::query::QuerySerializer;
use crate::response;
use crate::types::{Envelope, RequestParams};

/// JSON request façade over an injected fetch primitive.
#[derive(Debug, Clone)]
pub struct RequestClient<F> {
    config: ClientConfig,
    query: QuerySerializer,
    fetch: F,
}

impl<F> RequestClient<F> {
    pub fn new(config: ClientConfig, fetch: F) -> Self {
        Self {
            query: QuerySerializer::new(config.falsy_policy),
            config,
            fetch,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetch
    }

    /// Absolute `http(s)://` URLs are used as given; anything else is
    /// appended to the configured origin.
    pub fn resolve_url(&self, path: &str) -> Result<Url, ConstructionError> {
        let path = if path.is_empty() { "/" } else { path };
        let raw = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.config.origin(), path)
        };
        Url::parse(&raw).map_err(|source| ConstructionError::InvalidUrl { url: raw, source })
    }

    /// Assemble the request a call to `path` with `params` would send.
    ///
    /// GET and DELETE put the parameters in the query string; POST, PUT and
    /// PATCH send them as a JSON object body, `{}` when there are none.
    pub fn build_request(
        &self,
        path: &str,
        params: RequestParams,
    ) -> Result<HttpRequest, ConstructionError> {
        let RequestParams {
            method,
            headers,
            params,
        } = params;
        let method = method.unwrap_or(self.config.default_method);
        let headers = headers.unwrap_or_else(|| self.config.default_headers.clone());
        let mut url = self.resolve_url(path)?;

        let body = if method.uses_query() {
            self.query.append_all(&mut url, &params);
            None
        } else {
            Some(encode_value(&Value::Object(params)))
        };

        Ok(HttpRequest {
            method,
            url: url.into(),
            headers,
            body,
        })
    }

    /// Normalize and validate a response, yielding its `data` on success.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, RequestError> {
        self.parse_envelope(response).map(|envelope| envelope.data)
    }

    /// Like `parse_response`, but keeps the whole envelope.
    pub fn parse_envelope(&self, response: HttpResponse) -> Result<Envelope, RequestError> {
        response::validate(response::normalize(&response))
    }
}

impl<F: Fetch> RequestClient<F> {
    /// Generic entry point. The method comes from `params`, falling back to
    /// the configured default.
    pub async fn request(&self, path: &str, params: RequestParams) -> Result<Value, RequestError> {
        let request = self.build_request(path, params)?;
        let method = request.method;
        let url = request.url.clone();
        debug!("{method} {url}");

        let response = self.fetch.fetch(request).await?;
        debug!("{method} {url} -> {} {}", response.status, response.status_text);

        self.parse_response(response)
    }

    pub async fn get(&self, path: &str, params: RequestParams) -> Result<Value, RequestError> {
        self.request(path, params.default_method(HttpMethod::Get)).await
    }

    pub async fn post(&self, path: &str, params: RequestParams) -> Result<Value, RequestError> {
        self.request(path, params.default_method(HttpMethod::Post)).await
    }

    pub async fn put(&self, path: &str, params: RequestParams) -> Result<Value, RequestError> {
        self.request(path, params.default_method(HttpMethod::Put)).await
    }

    pub async fn patch(&self, path: &str, params: RequestParams) -> Result<Value, RequestError> {
        self.request(path, params.default_method(HttpMethod::Patch)).await
    }

    pub async fn delete(&self, path: &str, params: RequestParams) -> Result<Value, RequestError> {
        self.request(path, params.default_method(HttpMethod::Delete)).await
    }

    /// `request`, with `data` deserialized into `T`.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        path: &str,
        params: RequestParams,
    ) -> Result<T, RequestError> {
        let data = self.request(path, params).await?;
        serde_json::from_value(data).map_err(RequestError::Decode)
    }

    pub async fn get_as<T: DeserializeOwned>(
        &self,
        path: &str,
        params: RequestParams,
    ) -> Result<T, RequestError> {
        self.request_as(path, params.default_method(HttpMethod::Get)).await
    }

    pub async fn post_as<T: DeserializeOwned>(
        &self,
        path: &str,
        params: RequestParams,
    ) -> Result<T, RequestError> {
        self.request_as(path, params.default_method(HttpMethod::Post)).await
    }

    pub async fn put_as<T: DeserializeOwned>(
        &self,
        path: &str,
        params: RequestParams,
    ) -> Result<T, RequestError> {
        self.request_as(path, params.default_method(HttpMethod::Put)).await
    }

    pub async fn patch_as<T: DeserializeOwned>(
        &self,
        path: &str,
        params: RequestParams,
    ) -> Result<T, RequestError> {
        self.request_as(path, params.default_method(HttpMethod::Patch)).await
    }

    pub async fn delete_as<T: DeserializeOwned>(
        &self,
        path: &str,
        params: RequestParams,
    ) -> Result<T, RequestError> {
        self.request_as(path, params.default_method(HttpMethod::Delete)).await
    }
}
