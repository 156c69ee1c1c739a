//! Reclassifies transport failures and pipeline defects into the public
//! error taxonomy.

use csapi_core::{ApiError, ErrorKind};
use serde_json::Value;

use crate::error::TransportError;
use crate::schema::SchemaViolation;

/// Maps a failed upstream call onto [`ApiError`]. `operation` names the call
/// in the message, e.g. `"product search"`.
///
/// Search handles 429 itself before reaching this function; here it is
/// always a hard `rate-limited` error.
#[must_use]
pub fn classify_transport(error: &TransportError, operation: &str) -> ApiError {
    match error {
        TransportError::Status { status, body } => classify_status(*status, body, operation),
        TransportError::Http(e) => match e.status() {
            Some(status) => classify_status(status.as_u16(), &Value::Null, operation),
            None if e.is_timeout() => {
                ApiError::new(ErrorKind::Unknown, format!("{operation} timed out"))
                    .with_code("timeout")
                    .with_retryable(true)
            }
            None => ApiError::new(ErrorKind::Unknown, format!("{operation} failed: {e}"))
                .with_code("network")
                .with_retryable(true),
        },
        TransportError::Deserialize { context, .. } => ApiError::new(
            ErrorKind::UpstreamChange,
            format!("{operation}: upstream returned a body that is not JSON ({context})"),
        )
        .with_code("invalid-json")
        .with_retryable(false),
        TransportError::InvalidUrl { url, reason } => ApiError::new(
            ErrorKind::Unknown,
            format!("{operation}: invalid upstream URL {url}: {reason}"),
        )
        .with_code("invalid-url")
        .with_retryable(false),
        TransportError::InvalidHeader { name } => ApiError::new(
            ErrorKind::Unknown,
            format!("{operation}: header {name} has a value that cannot be sent"),
        )
        .with_code("invalid-header")
        .with_retryable(false),
    }
}

fn classify_status(status: u16, body: &Value, operation: &str) -> ApiError {
    let detail = upstream_message(body)
        .map(|message| format!(": {message}"))
        .unwrap_or_default();

    match status {
        401 | 403 => ApiError::new(
            ErrorKind::Unauthorized,
            format!("{operation} rejected the API key (HTTP {status}){detail}"),
        )
        .with_code("invalid-key")
        .with_retryable(false),
        404 => ApiError::not_found(format!("{operation}: not found{detail}")),
        429 => ApiError::new(
            ErrorKind::RateLimited,
            format!("{operation} was rate limited{detail}"),
        )
        .with_code("http-429")
        .with_retryable(true),
        _ => ApiError::new(
            ErrorKind::UpstreamChange,
            format!("{operation}: unexpected HTTP {status}{detail}"),
        )
        .with_code(format!("http-{status}"))
        .with_retryable(status >= 500),
    }
}

/// Error text from a JSON error body, when the upstream sent one.
fn upstream_message(body: &Value) -> Option<&str> {
    ["message", "error", "errorMessage"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .filter(|message| !message.is_empty())
}

/// A shape violation after extraction is a defect: the extractor's candidate
/// lists no longer match what the upstream sends.
#[must_use]
pub fn schema_defect(violation: &SchemaViolation, operation: &str) -> ApiError {
    ApiError::new(
        ErrorKind::Unknown,
        format!("{operation}: extracted data violates the entity contract ({violation})"),
    )
    .with_code("schema-violation")
    .with_retryable(false)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn status(status: u16, body: Value) -> TransportError {
        TransportError::Status { status, body }
    }

    #[test]
    fn rejected_credentials_are_unauthorized() {
        for code in [401, 403] {
            let err = classify_transport(&status(code, Value::Null), "store lookup");
            assert_eq!(err.kind, ErrorKind::Unauthorized);
            assert_eq!(err.code.as_deref(), Some("invalid-key"));
            assert_eq!(err.retryable, Some(false));
        }
    }

    #[test]
    fn not_found_carries_upstream_message() {
        let err = classify_transport(
            &status(404, json!({ "message": "Product not available" })),
            "product detail",
        );
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "product detail: not found: Product not available");
    }

    #[test]
    fn throttling_is_retryable() {
        let err = classify_transport(&status(429, json!({})), "product detail");
        assert_eq!(err.kind, ErrorKind::RateLimited);
        assert_eq!(err.retryable, Some(true));
    }

    #[test]
    fn server_errors_are_retryable_upstream_changes() {
        let err = classify_transport(&status(503, Value::Null), "product search");
        assert_eq!(err.kind, ErrorKind::UpstreamChange);
        assert_eq!(err.code.as_deref(), Some("http-503"));
        assert_eq!(err.retryable, Some(true));
    }

    #[test]
    fn other_client_errors_are_not_retryable() {
        let err = classify_transport(&status(400, json!({ "error": "bad banner" })), "search");
        assert_eq!(err.kind, ErrorKind::UpstreamChange);
        assert_eq!(err.code.as_deref(), Some("http-400"));
        assert_eq!(err.retryable, Some(false));
        assert!(err.message.ends_with("bad banner"));
    }

    #[test]
    fn non_json_body_is_upstream_change() {
        let source = serde_json::from_str::<Value>("<html>").unwrap_err();
        let err = classify_transport(
            &TransportError::Deserialize {
                context: "GET /api/v1/pickup-locations".to_string(),
                source,
            },
            "store lookup",
        );
        assert_eq!(err.kind, ErrorKind::UpstreamChange);
        assert_eq!(err.code.as_deref(), Some("invalid-json"));
    }

    #[test]
    fn invalid_url_is_unknown() {
        let err = classify_transport(
            &TransportError::InvalidUrl {
                url: "not a url".to_string(),
                reason: "relative URL without a base".to_string(),
            },
            "store lookup",
        );
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert_eq!(err.code.as_deref(), Some("invalid-url"));
    }

    #[test]
    fn schema_violation_is_reported_as_defect() {
        let violation = SchemaViolation {
            path: "$[0].name".to_string(),
            expected: "non-empty string".to_string(),
            found: "empty string".to_string(),
        };
        let err = schema_defect(&violation, "product search");
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert_eq!(err.code.as_deref(), Some("schema-violation"));
        assert!(err.message.contains("$[0].name"));
    }
}
