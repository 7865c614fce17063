//! Client configuration.
//!
//! Everything the façade would otherwise read from its environment (the
//! origin relative paths resolve against, default method and headers, how
//! falsy query values are treated) is supplied here at construction time.

use serde::Deserialize;

use crate::http::HttpMethod;
use crate::query::FalsyPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Scheme, host and port that relative paths are appended to. May be
    /// empty, in which case only absolute URLs can be requested. Set through
    /// `with_origin` so a trailing `/` is always trimmed.
    origin: String,
    pub default_method: HttpMethod,
    pub default_headers: Vec<(String, String)>,
    pub falsy_policy: FalsyPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: String::new(),
            default_method: HttpMethod::Get,
            default_headers: vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            falsy_policy: FalsyPolicy::Skip,
        }
    }
}

impl ClientConfig {
    pub fn new(origin: &str) -> Self {
        Self::default().with_origin(origin)
    }

    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(text)?;
        let origin = config.origin.clone();
        Ok(config.with_origin(&origin))
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin = origin.trim_end_matches('/').to_string();
        self
    }

    pub fn with_default_method(mut self, method: HttpMethod) -> Self {
        self.default_method = method;
        self
    }

    pub fn with_default_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.default_headers = headers;
        self
    }

    pub fn with_falsy_policy(mut self, policy: FalsyPolicy) -> Self {
        self.falsy_policy = policy;
        self
    }
}
