//! Schema and value transforms run around the fake-data engine: stripping
//! write-only properties before generation, merging the bundle document the
//! `$ref` resolver reads, and deep-sorting the produced value for canonical,
//! diffable output.

use serde_json::{Map, Value};

/// Key under which the opaque bundle document is merged into the schema so
/// `$ref` pointers of the form `#/__bundled__/..` resolve against it
pub const BUNDLED_KEY: &str = "__bundled__";

/// Remove every property whose subschema carries `writeOnly: true`,
/// recursively, pruning removed names from `required` as well.
///
/// Returns `None` when the root is not a schema object; callers map that
/// absence signal to a "cannot strip write-only properties" error.
pub fn strip_write_only(schema: &Value) -> Option<Value> {
    if !schema.is_object() {
        return None;
    }
    Some(strip_node(schema))
}

fn strip_node(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => {
            let mut stripped = Map::new();
            let mut removed: Vec<String> = Vec::new();

            for (key, value) in map {
                if key == "properties" {
                    if let Value::Object(properties) = value {
                        let mut kept = Map::new();
                        for (name, subschema) in properties {
                            if subschema.get("writeOnly").and_then(Value::as_bool) == Some(true) {
                                removed.push(name.clone());
                            } else {
                                kept.insert(name.clone(), strip_node(subschema));
                            }
                        }
                        stripped.insert(key.clone(), Value::Object(kept));
                        continue;
                    }
                }
                stripped.insert(key.clone(), strip_node(value));
            }

            if !removed.is_empty() {
                if let Some(Value::Array(required)) = stripped.get_mut("required") {
                    required.retain(|name| {
                        name.as_str()
                            .map(|n| !removed.iter().any(|r| r.as_str() == n))
                            .unwrap_or(true)
                    });
                }
            }

            Value::Object(stripped)
        }
        Value::Array(items) => Value::Array(items.iter().map(strip_node).collect()),
        other => other.clone(),
    }
}

/// Rebuild a value with all object keys recursively sorted. Idempotent.
pub fn sort_keys_deep(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sorted = Map::new();
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for key in keys {
                sorted.insert(key.clone(), sort_keys_deep(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys_deep).collect()),
        other => other.clone(),
    }
}

/// Deep-copy the schema and merge the opaque bundle document under
/// [`BUNDLED_KEY`]. A schema that is not an object is returned unchanged;
/// there is nowhere to attach the bundle.
pub fn merge_bundle(schema: &Value, bundle: Option<&Value>) -> Value {
    let mut merged = schema.clone();
    if let (Some(bundle), Some(map)) = (bundle, merged.as_object_mut()) {
        map.insert(BUNDLED_KEY.to_string(), bundle.clone());
    }
    merged
}
