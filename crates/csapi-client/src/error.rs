use thiserror::Error;

/// Failures raised by the HTTP transport before any payload reaches the
/// normalization pipeline.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a non-2xx status. `body` is the parsed JSON
    /// error body, or `null` when it was empty or not JSON.
    #[error("unexpected HTTP status {status}")]
    Status {
        status: u16,
        body: serde_json::Value,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid upstream URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A header value could not be encoded, e.g. an API key containing a
    /// newline. The value itself is never included.
    #[error("invalid value for header {name}")]
    InvalidHeader { name: String },
}

impl TransportError {
    /// HTTP status carried by the error, if the upstream answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Http(e) => e.status().map(|s| s.as_u16()),
            TransportError::Deserialize { .. }
            | TransportError::InvalidUrl { .. }
            | TransportError::InvalidHeader { .. } => None,
        }
    }
}
