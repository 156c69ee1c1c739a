//! The network boundary.
//!
//! The repository only ever talks to a [`Transport`]; [`HttpTransport`] is the
//! reqwest-backed implementation and tests substitute their own.

mod http;
mod retry;

use std::future::Future;

use reqwest::Method;
use serde_json::Value;

use crate::error::TransportError;

pub use http::{HttpTransport, DEFAULT_HEADERS};

/// One upstream call. `path` is joined to the transport's base URL unless it
/// is already absolute.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub method: Method,
    pub path: String,
    /// Extra headers; these replace defaults of the same name.
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl UpstreamRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            headers: Vec::new(),
            body: Some(body),
        }
    }

    #[must_use]
    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Value of a header set on this request, matched case-insensitively.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A 2xx answer. `data` is `null` for 204 and empty bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub data: Value,
}

/// Performs upstream calls. Non-2xx answers are reported as
/// [`TransportError::Status`].
pub trait Transport: Send + Sync {
    fn perform(
        &self,
        request: UpstreamRequest,
    ) -> impl Future<Output = Result<UpstreamResponse, TransportError>> + Send;
}
