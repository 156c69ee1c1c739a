//! Priority-list field resolution over untrusted JSON.
//!
//! One logical attribute may live under several upstream names or paths
//! depending on the response variant. An attribute is declared as an ordered
//! list of candidates; the first candidate whose value coerces wins.

use serde_json::Value;

/// A key path from an entity node, e.g. `&["pricing", "price", "value"]`.
pub type FieldPath = &'static [&'static str];

/// Follows `path` through nested objects. Any non-object along the way ends
/// the lookup.
#[must_use]
pub fn lookup<'a>(node: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(node, |current, key| current.as_object()?.get(*key))
}

/// Resolves one attribute: tries each candidate path in order and returns the
/// first value `coerce` accepts.
pub fn first_match<T>(
    node: &Value,
    candidates: &[FieldPath],
    coerce: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    candidates
        .iter()
        .find_map(|path| lookup(node, path).and_then(&coerce))
}

/// Resolves one attribute from arbitrary accessors, evaluated left to right.
/// Used where a candidate is not a plain path (e.g. "first offer, then the
/// flat pricing block").
pub fn first_of<T>(accessors: &[&dyn Fn() -> Option<T>]) -> Option<T> {
    accessors.iter().find_map(|accessor| accessor())
}

/// Returns the first candidate path that holds a JSON object.
#[must_use]
pub fn first_object<'a>(node: &'a Value, candidates: &[FieldPath]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|path| lookup(node, path))
        .find(|value| value.is_object())
}

/// Object entries of a list. Accepts a bare array or an object wrapping one
/// under `items`; anything else is an empty list.
#[must_use]
pub fn records(value: &Value) -> Vec<&Value> {
    let list = match value {
        Value::Array(items) => items,
        Value::Object(object) => match object.get("items") {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    list.iter().filter(|item| item.is_object()).collect()
}

/// First object entry of an array, or the value itself when it already is
/// an object.
#[must_use]
pub fn first_record(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(_) => Some(value),
        Value::Array(items) => items.iter().find(|item| item.is_object()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::coerce;

    const PRICE: &[FieldPath] = &[
        &["pricing", "price", "value"],
        &["pricing", "current"],
        &["currentPrice"],
    ];

    #[test]
    fn lookup_follows_nested_objects() {
        let node = json!({ "a": { "b": { "c": 3 } } });
        assert_eq!(lookup(&node, &["a", "b", "c"]), Some(&json!(3)));
        assert_eq!(lookup(&node, &["a", "x"]), None);
        assert_eq!(lookup(&node, &[]), Some(&node));
    }

    #[test]
    fn lookup_stops_at_non_objects() {
        let node = json!({ "a": [ { "b": 1 } ], "s": "text" });
        assert_eq!(lookup(&node, &["a", "b"]), None);
        assert_eq!(lookup(&node, &["s", "len"]), None);
    }

    #[test]
    fn first_match_prefers_highest_priority_candidate() {
        let node = json!({
            "pricing": { "price": { "value": 1 }, "current": 2 },
            "currentPrice": 3
        });
        assert_eq!(first_match(&node, PRICE, coerce::number), Some(1.0));
    }

    #[test]
    fn first_match_returns_each_lower_priority_candidate_when_alone() {
        let second = json!({ "pricing": { "current": "2.50" } });
        assert_eq!(first_match(&second, PRICE, coerce::number), Some(2.5));

        let third = json!({ "currentPrice": 3 });
        assert_eq!(first_match(&third, PRICE, coerce::number), Some(3.0));
    }

    #[test]
    fn first_match_skips_candidates_that_fail_to_coerce() {
        let node = json!({
            "pricing": { "price": { "value": "n/a" }, "current": null },
            "currentPrice": "4"
        });
        assert_eq!(first_match(&node, PRICE, coerce::number), Some(4.0));
    }

    #[test]
    fn first_match_is_none_when_no_candidate_resolves() {
        assert_eq!(first_match(&json!({}), PRICE, coerce::number), None);
        assert_eq!(first_match(&json!("scalar"), PRICE, coerce::number), None);
    }

    #[test]
    fn first_of_evaluates_accessors_in_order() {
        let result = first_of::<u32>(&[&|| None, &|| Some(2), &|| Some(3)]);
        assert_eq!(result, Some(2));
        assert_eq!(first_of::<u32>(&[&|| None]), None);
    }

    #[test]
    fn first_object_skips_non_object_candidates() {
        let node = json!({ "micros": "n/a", "microNutrients": { "iron": "10%" } });
        let found = first_object(
            &node,
            &[&["micros"], &["microNutrients"], &["micronutrients"]],
        );
        assert_eq!(found, Some(&json!({ "iron": "10%" })));
    }

    #[test]
    fn records_accepts_arrays_and_items_wrappers() {
        let bare = json!([{ "id": 1 }, 2, null, { "id": 2 }]);
        assert_eq!(records(&bare).len(), 2);

        let wrapped = json!({ "items": [{ "id": 1 }, "x"] });
        assert_eq!(records(&wrapped).len(), 1);

        assert!(records(&json!({ "id": 1 })).is_empty());
        assert!(records(&json!("x")).is_empty());
    }

    #[test]
    fn first_record_picks_first_object_entry() {
        let list = json!([null, "x", { "a": 1 }, { "a": 2 }]);
        assert_eq!(first_record(&list), Some(&json!({ "a": 1 })));
        assert_eq!(first_record(&json!({ "a": 3 })), Some(&json!({ "a": 3 })));
        assert_eq!(first_record(&json!([1, 2])), None);
    }
}
