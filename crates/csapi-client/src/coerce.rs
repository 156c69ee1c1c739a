//! Total coercions from untrusted JSON values to typed scalars.
//!
//! Every function here accepts any [`Value`] and returns `None` ("no value")
//! instead of failing. `None` is distinct from a coerced `false`, `0` or `""`.

use std::collections::BTreeMap;

use serde_json::Value;

/// Strings pass through; numbers and booleans are stringified. Objects,
/// arrays and `null` yield no value.
#[must_use]
pub fn string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        // Float Display drops a zero fraction: 120.0 becomes "120".
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Like [`string`] but also rejects the empty string. Used for identifiers
/// and URLs, where `""` carries no information.
#[must_use]
pub fn non_empty_string(value: &Value) -> Option<String> {
    string(value).filter(|s| !s.is_empty())
}

/// Coerces through [`string`] and parses the result as a finite `f64`.
///
/// Surrounding whitespace is ignored; a blank string, `NaN` and infinities
/// yield no value.
#[must_use]
pub fn number(value: &Value) -> Option<f64> {
    let raw = string(value)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Only literal booleans count; `"true"`, `1` and friends yield no value.
#[must_use]
pub fn boolean(value: &Value) -> Option<bool> {
    value.as_bool()
}

/// Shallow-maps a free-form object through [`string`], keeping every key.
/// Entries whose value does not coerce become `None`. Non-objects yield no
/// value.
#[must_use]
pub fn record(value: &Value) -> Option<BTreeMap<String, Option<String>>> {
    let object = value.as_object()?;
    Some(
        object
            .iter()
            .map(|(key, entry)| (key.clone(), string(entry)))
            .collect(),
    )
}
