//! Allow-list filtering of API responses.

use serde_json::{Map, Value};

use super::allow_list::{AllowList, PathTree, RootRule};

/// Filters `raw` down to the fields `allow_list` permits.
///
/// - An empty allow-list returns `raw` unchanged.
/// - Roots missing from `raw` are skipped, never synthesized.
/// - A root with sub-paths keeps only what those paths reach when its value is
///   an object, and is copied unfiltered when it is not.
/// - Arrays met below a root are filtered element by element. Elements and
///   objects that end up empty are dropped.
///
/// `raw` is never modified, and filtering a filtered value changes nothing.
///
/// ```
/// use localuri::{redact, AllowList};
/// use serde_json::json;
///
/// let allow_list = AllowList::new()
///     .allow_paths("indices", ["count", "shards.total"])
///     .unwrap();
/// let raw = json!({
///     "cluster_uuid": "2Zz4",
///     "indices": { "count": 3, "shards": { "total": 6, "primaries": 3 } },
/// });
/// assert_eq!(
///     redact(&raw, &allow_list),
///     json!({ "indices": { "count": 3, "shards": { "total": 6 } } })
/// );
/// ```
pub fn redact(raw: &Value, allow_list: &AllowList) -> Value {
    if allow_list.is_empty() {
        return raw.clone();
    }

    let mut filtered = Map::new();
    let Value::Object(fields) = raw else {
        return Value::Object(filtered);
    };

    for (root, rule) in allow_list.rules() {
        let Some(value) = fields.get(root) else {
            continue;
        };
        let kept = match (rule, value) {
            (RootRule::Paths { tree, .. }, Value::Object(map)) => Value::Object(filter_object(map, &[tree])),
            _ => value.clone(),
        };
        filtered.insert(root.clone(), kept);
    }

    Value::Object(filtered)
}

fn filter_object(map: &Map<String, Value>, nodes: &[&PathTree]) -> Map<String, Value> {
    let mut filtered = Map::new();
    for (key, value) in map {
        let matched: Vec<&PathTree> = nodes.iter().copied().flat_map(|node| node.children_for(key)).collect();
        if matched.is_empty() {
            continue;
        }
        if matched.iter().any(|node| node.is_terminal()) {
            filtered.insert(key.clone(), value.clone());
        } else if let Some(kept) = filter_value(value, &matched) {
            filtered.insert(key.clone(), kept);
        }
    }
    filtered
}

/// Filters a value a path continues into. Scalars cannot hold the rest of
/// the path, so they are dropped.
fn filter_value(value: &Value, nodes: &[&PathTree]) -> Option<Value> {
    match value {
        Value::Object(map) => {
            let filtered = filter_object(map, nodes);
            (!filtered.is_empty()).then_some(Value::Object(filtered))
        }
        Value::Array(items) => {
            let kept: Vec<Value> = items
                .iter()
                .filter(|item| item.is_object())
                .filter_map(|item| filter_value(item, nodes))
                .collect();
            (!kept.is_empty()).then_some(Value::Array(kept))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn path_root_response() -> Value {
        json!({
            "pathRoot1": {
                "pathRoot1_subPath1": 11,
                "pathRoot1_subPath2": {
                    "pathRoot1_subPath2_subPath1": 121,
                    "pathRoot1_subPath2_subPath2": {
                        "pathRoot1_subPath2_subPath2_subPath1": 1221
                    }
                }
            },
            "pathRoot2": {
                "pathRoot2_subPath1": 21,
                "pathRoot2_subPath2": [221, 222, "223string"]
            },
            "pathRoot3": {
                "pathRoot3_subPath1": 31,
                "pathRoot3_subPath2": 32
            },
            "pathRoot4": {
                "pathRoot4_subPath1": 41
            }
        })
    }

    fn path_root_allow_list() -> AllowList {
        AllowList::new()
            .allow_paths(
                "pathRoot1",
                [
                    "pathRoot1_subPath1",
                    "pathRoot1_subPath2.pathRoot1_subPath2_subPath2.pathRoot1_subPath2_subPath2_subPath1",
                ],
            )
            .unwrap()
            .allow_paths("pathRoot2", ["pathRoot2_subPath2"])
            .unwrap()
            .allow_root("pathRoot3")
    }

    /// Filters `raw` twice and returns the first result.
    fn redact_twice(raw: &Value, allow_list: &AllowList) -> Value {
        let once = redact(raw, allow_list);
        assert_eq!(redact(&once, allow_list), once, "second pass changed {once}");
        once
    }

    #[test]
    fn keeps_only_allowed_paths() {
        let filtered = redact(&path_root_response(), &path_root_allow_list());
        assert_eq!(
            filtered,
            json!({
                "pathRoot1": {
                    "pathRoot1_subPath1": 11,
                    "pathRoot1_subPath2": {
                        "pathRoot1_subPath2_subPath2": {
                            "pathRoot1_subPath2_subPath2_subPath1": 1221
                        }
                    }
                },
                "pathRoot2": {
                    "pathRoot2_subPath2": [221, 222, "223string"]
                },
                "pathRoot3": {
                    "pathRoot3_subPath1": 31,
                    "pathRoot3_subPath2": 32
                }
            })
        );
    }

    #[test]
    fn empty_allow_list_passes_everything_through() {
        let raw = json!({ "count": 7, "nested": { "a": [1, 2] } });
        assert_eq!(redact(&raw, &AllowList::new()), raw);
    }

    #[test]
    fn absent_roots_are_not_synthesized() {
        let allow_list = AllowList::new().allow_root("missing").allow_root("status");
        assert_eq!(redact(&json!({ "status": "green" }), &allow_list), json!({ "status": "green" }));
    }

    #[test]
    fn non_object_roots_are_copied_through() {
        let allow_list = AllowList::new()
            .allow_paths("count", ["anything"])
            .unwrap()
            .allow_paths("names", ["anything"])
            .unwrap();
        let raw = json!({ "count": 3, "names": ["a", "b"] });
        assert_eq!(redact_twice(&raw, &allow_list), raw);
    }

    #[test]
    fn non_object_response_yields_empty_object() {
        let allow_list = AllowList::new().allow_root("status");
        assert_eq!(redact(&json!([1, 2, 3]), &allow_list), json!({}));
    }

    #[test]
    fn emptied_root_object_is_kept() {
        let allow_list = AllowList::new().allow_paths("indices", ["docs.count"]).unwrap();
        let raw = json!({ "indices": { "shards": { "total": 1 } } });
        assert_eq!(redact_twice(&raw, &allow_list), json!({ "indices": {} }));
    }

    #[test]
    fn path_through_scalar_is_dropped() {
        let allow_list = AllowList::new().allow_paths("indices", ["docs.count", "count"]).unwrap();
        let raw = json!({ "indices": { "docs": 5, "count": 2 } });
        assert_eq!(redact(&raw, &allow_list), json!({ "indices": { "count": 2 } }));
    }

    #[test]
    fn arrays_below_a_root_are_filtered_per_element() {
        let allow_list = AllowList::new().allow_paths("nodes", ["versions.number"]).unwrap();
        let raw = json!({
            "nodes": {
                "versions": [
                    { "number": "2.4.0", "build": "abc" },
                    { "build": "def" },
                    "bare"
                ]
            }
        });
        assert_eq!(
            redact_twice(&raw, &allow_list),
            json!({ "nodes": { "versions": [{ "number": "2.4.0" }] } })
        );
    }

    #[test]
    fn wildcard_segment_matches_every_key() {
        let allow_list = AllowList::new().allow_paths("nodes", ["*.jvm.mem"]).unwrap();
        let raw = json!({
            "nodes": {
                "n1": { "jvm": { "mem": 1, "gc": 2 }, "os": 3 },
                "n2": { "jvm": { "mem": 4 } }
            }
        });
        assert_eq!(
            redact_twice(&raw, &allow_list),
            json!({ "nodes": { "n1": { "jvm": { "mem": 1 } }, "n2": { "jvm": { "mem": 4 } } } })
        );
    }

    #[test]
    fn redaction_is_idempotent() {
        redact_twice(&path_root_response(), &path_root_allow_list());
        redact_twice(&json!([1, 2, 3]), &path_root_allow_list());
        redact_twice(&json!({ "status": "green" }), &AllowList::new());
    }

    #[test]
    fn raw_value_is_not_modified() {
        let raw = path_root_response();
        let before = raw.clone();
        let _ = redact(&raw, &path_root_allow_list());
        assert_eq!(raw, before);
    }
}
