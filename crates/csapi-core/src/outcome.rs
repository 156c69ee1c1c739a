//! Error taxonomy and the tagged success/failure envelope returned by every
//! public operation.
//!
//! Operations return `Result<T, ApiError>`; [`Envelope`] is the serialized
//! form (`{"ok":true,"value":…}` / `{"ok":false,"error":…}`) handed to
//! callers that consume JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed classification of every failure a caller can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Caller arguments failed a local precondition; no upstream call was made.
    InvalidParams,
    /// Credentials are missing locally or were rejected upstream (401/403).
    Unauthorized,
    /// The entity does not exist in the requested scope (404 / no content).
    NotFound,
    /// The upstream throttled the caller (429).
    RateLimited,
    /// The upstream answered in a way the client does not understand.
    UpstreamChange,
    /// Anything else, including extraction defects.
    Unknown,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidParams => "invalid-params",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::NotFound => "not-found",
            ErrorKind::RateLimited => "rate-limited",
            ErrorKind::UpstreamChange => "upstream-change",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct ApiError {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            retryable: None,
            message: message.into(),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParams, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }
}

/// Serialized Result envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> Envelope<T> {
    /// Converts back into a `Result`. An envelope with `ok: false` and no
    /// error body becomes an `unknown` error.
    ///
    /// # Errors
    ///
    /// Returns the carried [`ApiError`] when the envelope is not `ok`.
    pub fn into_result(self) -> Result<T, ApiError> {
        match (self.ok, self.value, self.error) {
            (true, Some(value), _) => Ok(value),
            (_, _, Some(error)) => Err(error),
            _ => Err(ApiError::new(
                ErrorKind::Unknown,
                "envelope carries neither a value nor an error",
            )),
        }
    }
}

impl<T> From<Result<T, ApiError>> for Envelope<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self {
                ok: true,
                value: Some(value),
                error: None,
            },
            Err(error) => Self {
                ok: false,
                value: None,
                error: Some(error),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&ErrorKind::InvalidParams).unwrap();
        assert_eq!(json, "\"invalid-params\"");
        let json = serde_json::to_string(&ErrorKind::UpstreamChange).unwrap();
        assert_eq!(json, "\"upstream-change\"");
    }

    #[test]
    fn ok_envelope_serializes_value_only() {
        let envelope: Envelope<u32> = Ok(7).into();
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json, serde_json::json!({ "ok": true, "value": 7 }));
    }

    #[test]
    fn error_envelope_serializes_type_and_message() {
        let envelope: Envelope<u32> =
            Err(ApiError::invalid_params("storeId is required")).into();
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ok": false,
                "error": { "type": "invalid-params", "message": "storeId is required" }
            })
        );
    }

    #[test]
    fn error_envelope_includes_code_and_retryable_when_set() {
        let error = ApiError::new(ErrorKind::RateLimited, "slow down")
            .with_code("http-429")
            .with_retryable(true);
        let json = serde_json::to_value(Envelope::<()>::from(Err(error))).unwrap();
        assert_eq!(json["error"]["code"], "http-429");
        assert_eq!(json["error"]["retryable"], true);
    }

    #[test]
    fn envelope_into_result_roundtrips() {
        let envelope: Envelope<&str> = Ok("x").into();
        assert_eq!(envelope.into_result().unwrap(), "x");

        let envelope: Envelope<&str> = Err(ApiError::not_found("gone")).into();
        assert_eq!(envelope.into_result().unwrap_err().kind, ErrorKind::NotFound);
    }

    #[test]
    fn api_error_display_includes_kind() {
        let error = ApiError::new(ErrorKind::Unauthorized, "key rejected");
        assert_eq!(error.to_string(), "unauthorized: key rejected");
    }
}
