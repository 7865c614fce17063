//! JSON request façade over an injected fetch primitive.
//!
//! # Overview
//! Serializes parameters into query strings or JSON bodies, hands the
//! assembled request to a caller-supplied `Fetch`, and normalizes whatever
//! comes back into an `Envelope` before unwrapping its `data`.
//!
//! # Design
//! - `RequestClient` holds only its `ClientConfig` and the `Fetch` it was
//!   given; calls share nothing else.
//! - The pipeline is split into `build_request` and `parse_response` so the
//!   I/O boundary is explicit and either half can be used alone.
//! - Every failure is a `RequestError` variant naming the stage that failed.
//! - No executor dependency: `Fetch` returns a plain `Send` future.

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod response;
pub mod types;

pub use client::RequestClient;
pub use config::ClientConfig;
pub use error::{ConstructionError, RequestError, TransportError};
pub use http::{Fetch, HttpMethod, HttpRequest, HttpResponse};
pub use query::{FalsyPolicy, QuerySerializer, QueryValue, Scalar};
pub use types::{Envelope, RequestParams};
