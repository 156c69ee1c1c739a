//! Declarative shape checking for extraction results.
//!
//! A [`Shape`] describes the JSON form an entity must take once serialized:
//! which fields are required, which may be `null`, and the primitive kind of
//! each. Checking a DTO against its shape is the gate between the lenient
//! extractors and the typed mapper; a violation means the extractor produced
//! data the public contract does not allow.
//!
//! Unknown extra fields are ignored, so shapes stay valid when the upstream
//! grows new attributes.

mod shapes;

use std::fmt;
use std::ops::Deref;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use shapes::{
    PRODUCT_DETAIL, PRODUCT_DETAIL_DTO, PRODUCT_SUMMARY, PRODUCT_SUMMARY_DTO, SEARCH_PAGE,
    STORE_DTO, STORE_SUMMARY,
};

/// Declared form of one JSON value.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// Any string, including `""`.
    String,
    NonEmptyString,
    /// A finite JSON number.
    Number,
    /// An integer no smaller than `min`.
    Integer { min: i64 },
    Bool,
    /// Exactly this string.
    Literal(&'static str),
    /// `null` or the inner shape.
    Nullable(&'static Shape),
    /// An array whose every element has the inner shape.
    Array(&'static Shape),
    /// An object carrying at least the listed fields.
    Object(&'static [Field]),
    /// A free-form object whose every value has the inner shape.
    Map(&'static Shape),
}

/// A required field of an [`Shape::Object`]. Optional attributes are declared
/// [`Shape::Nullable`]; the key itself must still be present.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub shape: Shape,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::String => f.write_str("string"),
            Shape::NonEmptyString => f.write_str("non-empty string"),
            Shape::Number => f.write_str("finite number"),
            Shape::Integer { min } => write!(f, "integer >= {min}"),
            Shape::Bool => f.write_str("boolean"),
            Shape::Literal(literal) => write!(f, "\"{literal}\""),
            Shape::Nullable(inner) => write!(f, "{inner} or null"),
            Shape::Array(_) => f.write_str("array"),
            Shape::Object(_) | Shape::Map(_) => f.write_str("object"),
        }
    }
}

/// First mismatch found while checking a value against a [`Shape`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema violation at {path}: expected {expected}, found {found}")]
pub struct SchemaViolation {
    /// JSON path of the offending value, e.g. `$.pricing.current`.
    pub path: String,
    pub expected: String,
    pub found: String,
}

/// Data that has passed its shape check. Only [`validate`] constructs one.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T>(T);

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// Serializes `data` and checks it against `shape`, narrowing it to
/// [`Validated`] on success.
///
/// # Errors
///
/// Returns the first [`SchemaViolation`] in document order.
pub fn validate<T: Serialize>(data: T, shape: &Shape) -> Result<Validated<T>, SchemaViolation> {
    let value = serde_json::to_value(&data).map_err(|e| SchemaViolation {
        path: "$".to_string(),
        expected: shape.to_string(),
        found: format!("unserializable value ({e})"),
    })?;
    check(&value, shape)?;
    Ok(Validated(data))
}

/// Checks every element of `items`; the whole batch fails on the first bad
/// element, reported with its index.
///
/// # Errors
///
/// Returns the first [`SchemaViolation`], with the path rooted at `$[index]`.
pub fn validate_all<T: Serialize>(
    items: Vec<T>,
    shape: &Shape,
) -> Result<Vec<Validated<T>>, SchemaViolation> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            validate(item, shape).map_err(|mut violation| {
                violation.path = violation.path.replacen('$', &format!("$[{index}]"), 1);
                violation
            })
        })
        .collect()
}

/// Checks a raw JSON value against `shape`.
///
/// # Errors
///
/// Returns the first [`SchemaViolation`] in document order.
pub fn check(value: &Value, shape: &Shape) -> Result<(), SchemaViolation> {
    check_at(value, shape, "$")
}

fn check_at(value: &Value, shape: &Shape, path: &str) -> Result<(), SchemaViolation> {
    let violation = || SchemaViolation {
        path: path.to_string(),
        expected: shape.to_string(),
        found: kind_of(value).to_string(),
    };

    match (shape, value) {
        (Shape::Nullable(_), Value::Null) => Ok(()),
        (Shape::Nullable(inner), _) => check_at(value, inner, path),
        (Shape::String, Value::String(_)) | (Shape::Bool, Value::Bool(_)) => Ok(()),
        (Shape::NonEmptyString, Value::String(s)) if !s.is_empty() => Ok(()),
        (Shape::Literal(literal), Value::String(s)) if s == literal => Ok(()),
        (Shape::Number, Value::Number(n)) if n.as_f64().is_some_and(f64::is_finite) => Ok(()),
        (Shape::Integer { min }, Value::Number(n)) => {
            let in_range = match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => i >= *min,
                (None, Some(_)) => true,
                (None, None) => false,
            };
            if in_range {
                Ok(())
            } else {
                Err(violation())
            }
        }
        (Shape::Array(inner), Value::Array(items)) => items
            .iter()
            .enumerate()
            .try_for_each(|(index, item)| check_at(item, inner, &format!("{path}[{index}]"))),
        (Shape::Object(fields), Value::Object(object)) => fields.iter().try_for_each(|field| {
            let field_path = format!("{path}.{}", field.name);
            match object.get(field.name) {
                Some(entry) => check_at(entry, &field.shape, &field_path),
                None => Err(SchemaViolation {
                    path: field_path,
                    expected: field.shape.to_string(),
                    found: "missing".to_string(),
                }),
            }
        }),
        (Shape::Map(inner), Value::Object(object)) => object
            .iter()
            .try_for_each(|(key, entry)| check_at(entry, inner, &format!("{path}.{key}"))),
        _ => Err(violation()),
    }
}

/// Short name of a JSON value's kind, used in violation messages. Empty
/// strings are called out since they fail non-empty checks.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(s) if s.is_empty() => "empty string",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
