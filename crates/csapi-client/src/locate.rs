//! Structural search: finds named collections anywhere inside a response
//! envelope whose nesting is not guaranteed.
//!
//! Traversal is depth-first in document order and uses an explicit work list,
//! so stack depth stays constant however deep the payload nests.

use serde_json::Value;

/// Returns every array stored under `key` anywhere in `payload`, in
/// depth-first document order. No match yields an empty vector.
///
/// Arrays are walked into (their elements are visited), but an array is only
/// reported when it is the value of an object member named `key`.
#[must_use]
pub fn find_arrays<'a>(payload: &'a Value, key: &str) -> Vec<&'a [Value]> {
    let mut found = Vec::new();
    let mut pending: Vec<&'a Value> = vec![payload];

    while let Some(node) = pending.pop() {
        match node {
            Value::Object(object) => {
                if let Some(Value::Array(items)) = object.get(key) {
                    found.push(items.as_slice());
                }
                // Reverse so the first member is visited first.
                pending.extend(object.values().rev());
            }
            Value::Array(items) => pending.extend(items.iter().rev()),
            _ => {}
        }
    }

    found
}

/// Flattens [`find_arrays`] into the object entries of every matching array,
/// dropping non-object entries.
#[must_use]
pub fn find_records<'a>(payload: &'a Value, key: &str) -> Vec<&'a Value> {
    find_arrays(payload, key)
        .into_iter()
        .flatten()
        .filter(|item| item.is_object())
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn finds_key_at_top_level() {
        let payload = json!({ "productTiles": [{ "productId": "A" }] });
        let found = find_arrays(&payload, "productTiles");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].len(), 1);
    }

    #[test]
    fn finds_key_nested_at_depth_five_through_mixed_arrays() {
        let payload = json!({
            "layout": {
                "sections": {
                    "mainContentCollection": {
                        "components": [
                            { "componentId": "banner" },
                            {
                                "data": {
                                    "productTiles": [
                                        { "productId": "A" },
                                        { "productId": "B" }
                                    ]
                                }
                            }
                        ]
                    }
                }
            }
        });

        let tiles = find_records(&payload, "productTiles");
        let ids: Vec<_> = tiles.iter().map(|t| t["productId"].clone()).collect();
        assert_eq!(ids, vec![json!("A"), json!("B")]);
    }

    #[test]
    fn returns_empty_when_key_absent() {
        let payload = json!({ "layout": { "sections": [1, 2, { "x": [] }] } });
        assert!(find_arrays(&payload, "productTiles").is_empty());
        assert!(find_records(&payload, "productTiles").is_empty());
    }

    #[test]
    fn ignores_scalar_payloads_and_non_array_matches() {
        assert!(find_arrays(&json!("productTiles"), "productTiles").is_empty());
        assert!(find_arrays(&Value::Null, "productTiles").is_empty());
        let payload = json!({ "productTiles": { "items": [] } });
        assert!(find_arrays(&payload, "productTiles").is_empty());
    }

    #[test]
    fn collects_multiple_occurrences_in_document_order() {
        let payload = json!({
            "first": { "productTiles": [{ "productId": "1" }] },
            "second": [
                { "productTiles": [{ "productId": "2" }, "junk", { "productId": "3" }] }
            ]
        });

        let tiles = find_records(&payload, "productTiles");
        let ids: Vec<_> = tiles.iter().map(|t| t["productId"].clone()).collect();
        assert_eq!(ids, vec![json!("1"), json!("2"), json!("3")]);
    }

    #[test]
    fn follows_member_order_not_key_order() {
        let payload = json!({
            "zeta": { "productTiles": [{ "productId": "first" }] },
            "alpha": { "productTiles": [{ "productId": "second" }] },
            "middle": [{ "productTiles": [{ "productId": "third" }] }]
        });

        let tiles = find_records(&payload, "productTiles");
        let ids: Vec<_> = tiles.iter().map(|t| t["productId"].clone()).collect();
        assert_eq!(ids, vec![json!("first"), json!("second"), json!("third")]);
    }

    #[test]
    fn finds_collections_nested_inside_matched_entries() {
        let payload = json!({
            "productTiles": [
                { "productId": "outer", "related": { "productTiles": [{ "productId": "inner" }] } }
            ]
        });
        let tiles = find_records(&payload, "productTiles");
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0]["productId"], "outer");
        assert_eq!(tiles[1]["productId"], "inner");
    }

    #[test]
    fn survives_deeply_nested_payloads() {
        // Built by hand: `json!` would re-serialize the nested value recursively.
        let mut payload = json!({ "productTiles": [{ "productId": "deep" }] });
        for _ in 0..10_000 {
            let mut object = serde_json::Map::new();
            object.insert("child".to_string(), Value::Array(vec![payload]));
            payload = Value::Object(object);
        }

        let tiles = find_records(&payload, "productTiles");
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0]["productId"], "deep");

        // Unwind iteratively so dropping the fixture does not recurse 20k deep.
        let mut current = payload;
        loop {
            let next = match current {
                Value::Object(mut object) => object.remove("child"),
                Value::Array(mut items) => items.pop(),
                _ => None,
            };
            match next {
                Some(value) => current = value,
                None => break,
            }
        }
    }
}
