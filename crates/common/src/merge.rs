//! Recursive merge of JSON objects.
//!
//! Objects are combined key by key. How arrays and conflicting values are
//! resolved is controlled by [`MergePolicy`]; the default reproduces the host
//! framework's `mergeDeep` utility (array union, later scalar wins, objects
//! and arrays never replace a truthy value of another type).

use serde::{Deserialize, Serialize};
use serde_json::map::Entry;
use serde_json::{Map, Value as Json};

use crate::json_util::is_truthy;

/// How two arrays under the same key are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayMerge {
    /// Append source items that are not already present (deep equality).
    #[default]
    Union,
    /// Append every source item.
    Concat,
    /// Source array replaces the target array.
    Replace,
}

/// Which side wins when a key holds a scalar, or values of different types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Host `mergeDeep` rules: an incoming scalar or `null` wins, an incoming
    /// object or array only fills a falsy slot.
    #[default]
    HostCompatible,
    /// The value merged later always wins.
    Overwrite,
    /// The value already in the target wins.
    KeepExisting,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MergePolicy {
    #[serde(default)]
    pub arrays: ArrayMerge,
    #[serde(default)]
    pub conflicts: ConflictPolicy,
}

/// Merge `source` into `target` in place.
///
/// Keys missing from `target` always receive a copy of the source value.
pub fn merge_deep(target: &mut Map<String, Json>, source: &Map<String, Json>, policy: MergePolicy) {
    for (key, incoming) in source {
        match target.entry(key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(incoming.clone());
            }
            Entry::Occupied(mut slot) => merge_value(slot.get_mut(), incoming, policy),
        }
    }
}

fn merge_value(existing: &mut Json, incoming: &Json, policy: MergePolicy) {
    match (existing, incoming) {
        (Json::Object(target), Json::Object(source)) => merge_deep(target, source, policy),
        (Json::Array(target), Json::Array(source)) => match policy.arrays {
            ArrayMerge::Union => {
                for item in source {
                    if !target.contains(item) {
                        target.push(item.clone());
                    }
                }
            }
            ArrayMerge::Concat => target.extend(source.iter().cloned()),
            ArrayMerge::Replace => target.clone_from(source),
        },
        (existing, incoming) => {
            let replace = match policy.conflicts {
                ConflictPolicy::HostCompatible => {
                    !(incoming.is_object() || incoming.is_array()) || !is_truthy(existing)
                }
                ConflictPolicy::Overwrite => true,
                ConflictPolicy::KeepExisting => false,
            };
            if replace {
                *existing = incoming.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Json) -> Map<String, Json> {
        value
            .as_object()
            .cloned()
            .expect("fixture should be an object")
    }

    #[test]
    fn test_merge_into_empty_copies_source() {
        let mut target = Map::new();
        let source = object(json!({"id": "s1", "keywords": ["a", "a"], "pub": {"id": 7}}));

        merge_deep(&mut target, &source, MergePolicy::default());

        assert_eq!(Json::Object(target), Json::Object(source));
    }

    #[test]
    fn test_nested_objects_combine() {
        let mut target = object(json!({"pub": {"id": 7, "name": "a"}}));
        let source = object(json!({"pub": {"name": "b", "domain": "x.com"}}));

        merge_deep(&mut target, &source, MergePolicy::default());

        assert_eq!(
            Json::Object(target),
            json!({"pub": {"id": 7, "name": "b", "domain": "x.com"}})
        );
    }

    #[test]
    fn test_array_union_skips_duplicates() {
        let mut target = object(json!({"cat": ["IAB1", {"k": 1}]}));
        let source = object(json!({"cat": [{"k": 1}, "IAB2", "IAB1"]}));

        merge_deep(&mut target, &source, MergePolicy::default());

        assert_eq!(
            Json::Object(target),
            json!({"cat": ["IAB1", {"k": 1}, "IAB2"]})
        );
    }

    #[test]
    fn test_array_concat_and_replace() {
        let source = object(json!({"cat": ["IAB1", "IAB2"]}));

        let mut concat = object(json!({"cat": ["IAB1"]}));
        merge_deep(
            &mut concat,
            &source,
            MergePolicy {
                arrays: ArrayMerge::Concat,
                ..MergePolicy::default()
            },
        );
        assert_eq!(Json::Object(concat), json!({"cat": ["IAB1", "IAB1", "IAB2"]}));

        let mut replace = object(json!({"cat": ["IAB9"]}));
        merge_deep(
            &mut replace,
            &source,
            MergePolicy {
                arrays: ArrayMerge::Replace,
                ..MergePolicy::default()
            },
        );
        assert_eq!(Json::Object(replace), json!({"cat": ["IAB1", "IAB2"]}));
    }

    #[test]
    fn test_conflict_policies() {
        let source = object(json!({"id": "later", "pub": "flat"}));

        let mut overwrite = object(json!({"id": "first", "pub": {"id": 1}}));
        merge_deep(&mut overwrite, &source, MergePolicy::default());
        assert_eq!(Json::Object(overwrite), json!({"id": "later", "pub": "flat"}));

        let mut keep = object(json!({"id": "first", "pub": {"id": 1}}));
        merge_deep(
            &mut keep,
            &source,
            MergePolicy {
                conflicts: ConflictPolicy::KeepExisting,
                ..MergePolicy::default()
            },
        );
        assert_eq!(Json::Object(keep), json!({"id": "first", "pub": {"id": 1}}));
    }

    #[test]
    fn test_host_compatible_keeps_truthy_value_under_object_or_array() {
        let mut target = object(json!({
            "id": "outer",
            "geo": {"c": "US"},
            "cat": "IAB1",
            "pub": {"id": 1}
        }));
        let source = object(json!({
            "id": {"x": 1},
            "geo": ["x"],
            "cat": ["IAB2"],
            "pub": null
        }));

        merge_deep(&mut target, &source, MergePolicy::default());

        assert_eq!(
            Json::Object(target),
            json!({"id": "outer", "geo": {"c": "US"}, "cat": "IAB1", "pub": null})
        );
    }

    #[test]
    fn test_host_compatible_fills_falsy_slots() {
        let mut target = object(json!({"id": "", "cat": 0, "pub": null, "geo": false}));
        let source = object(json!({
            "id": {"x": 1},
            "cat": ["IAB2"],
            "pub": {"id": 7},
            "geo": "US"
        }));

        merge_deep(&mut target, &source, MergePolicy::default());

        assert_eq!(
            Json::Object(target),
            json!({"id": {"x": 1}, "cat": ["IAB2"], "pub": {"id": 7}, "geo": "US"})
        );
    }

    #[test]
    fn test_overwrite_replaces_any_type() {
        let mut target = object(json!({"id": "outer", "geo": {"c": "US"}}));
        let source = object(json!({"id": {"x": 1}, "geo": ["x"]}));

        merge_deep(
            &mut target,
            &source,
            MergePolicy {
                conflicts: ConflictPolicy::Overwrite,
                ..MergePolicy::default()
            },
        );

        assert_eq!(Json::Object(target), json!({"id": {"x": 1}, "geo": ["x"]}));
    }

    #[test]
    fn test_policy_deserializes_from_snake_case() {
        let policy: MergePolicy =
            serde_json::from_value(json!({"arrays": "concat", "conflicts": "keep_existing"}))
                .expect("should deserialize policy");
        assert_eq!(policy.arrays, ArrayMerge::Concat);
        assert_eq!(policy.conflicts, ConflictPolicy::KeepExisting);

        let defaults: MergePolicy =
            serde_json::from_value(json!({})).expect("should deserialize empty policy");
        assert_eq!(defaults, MergePolicy::default());
        assert_eq!(defaults.conflicts, ConflictPolicy::HostCompatible);

        let host: MergePolicy = serde_json::from_value(json!({"conflicts": "host_compatible"}))
            .expect("should deserialize host policy");
        assert_eq!(host.conflicts, ConflictPolicy::HostCompatible);
    }
}
