//! reqwest-backed [`Transport`].

use std::time::Duration;

use csapi_core::ClientConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use super::retry::retry_with_backoff;
use super::{Transport, UpstreamRequest, UpstreamResponse};
use crate::error::TransportError;

/// Headers the upstream expects on every call. Request headers of the same
/// name take precedence.
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[
    ("content-type", "application/json"),
    ("x-application-type", "Web"),
    ("x-loblaw-tenant-id", "ONLINE_GROCERIES"),
    ("accept-language", "en"),
];

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Sends [`UpstreamRequest`]s over HTTP and decodes JSON answers.
///
/// Network failures and 5xx answers are retried `max_retries` times with
/// jittered exponential back-off. Any other non-2xx answer is returned
/// immediately as [`TransportError::Status`].
pub struct HttpTransport {
    client: Client,
    base_url: String,
    max_retries: u32,
    retry_backoff_ms: u64,
}

impl HttpTransport {
    /// Builds a transport from the client configuration's base URL, timeout
    /// and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            retry_backoff_ms: config.retry_backoff_ms,
        })
    }

    /// Absolute paths are used as given; anything else is appended to the
    /// base URL.
    fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        let raw = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        };
        Url::parse(&raw).map_err(|e| TransportError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })
    }

    async fn send_once(
        &self,
        request: &UpstreamRequest,
        url: &Url,
        headers: &HeaderMap,
    ) -> Result<UpstreamResponse, TransportError> {
        tracing::debug!(method = %request.method, url = %url, "upstream request");

        let mut builder = self
            .client
            .request(request.method.clone(), url.clone())
            .headers(headers.clone());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), url = %url, "upstream returned error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: serde_json::from_str(&text).unwrap_or(Value::Null),
            });
        }

        if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            return Ok(UpstreamResponse {
                status: status.as_u16(),
                data: Value::Null,
            });
        }

        let data = serde_json::from_str(&text).map_err(|e| TransportError::Deserialize {
            context: format!("{} {}", request.method, url.path()),
            source: e,
        })?;
        Ok(UpstreamResponse {
            status: status.as_u16(),
            data,
        })
    }
}

/// Defaults first, then the request's own headers replacing any default of
/// the same name.
fn headers_for(request: &UpstreamRequest) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::new();
    let pairs = DEFAULT_HEADERS
        .iter()
        .map(|(name, value)| (*name, *value))
        .chain(
            request
                .headers
                .iter()
                .map(|(name, value)| (*name, value.as_str())),
        );
    for (name, value) in pairs {
        let invalid = || TransportError::InvalidHeader {
            name: name.to_string(),
        };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

impl Transport for HttpTransport {
    async fn perform(&self, request: UpstreamRequest) -> Result<UpstreamResponse, TransportError> {
        let url = self.url_for(&request.path)?;
        let headers = headers_for(&request)?;
        retry_with_backoff(self.max_retries, self.retry_backoff_ms, || {
            self.send_once(&request, &url, &headers)
        })
        .await
    }
}
