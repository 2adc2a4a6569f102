use super::schema_transform::{merge_bundle, sort_keys_deep, strip_write_only, BUNDLED_KEY};
use serde_json::json;

#[test]
fn test_strip_write_only_removes_properties() {
    let schema = json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "password": { "type": "string", "writeOnly": true }
        },
        "required": ["name", "password"]
    });

    let stripped = strip_write_only(&schema).unwrap();

    assert!(stripped["properties"].get("name").is_some());
    assert!(stripped["properties"].get("password").is_none());
    assert_eq!(stripped["required"], json!(["name"]));
}

#[test]
fn test_strip_write_only_recurses_into_nested_schemas() {
    let schema = json!({
        "type": "object",
        "properties": {
            "account": {
                "type": "object",
                "properties": {
                    "secret": { "type": "string", "writeOnly": true },
                    "id": { "type": "string" }
                }
            },
            "tags": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "internal": { "type": "boolean", "writeOnly": true }
                    }
                }
            }
        }
    });

    let stripped = strip_write_only(&schema).unwrap();

    assert!(stripped["properties"]["account"]["properties"].get("id").is_some());
    assert!(stripped["properties"]["account"]["properties"].get("secret").is_none());
    assert!(stripped["properties"]["tags"]["items"]["properties"].get("internal").is_none());
}

#[test]
fn test_strip_write_only_absence_signal() {
    assert!(strip_write_only(&json!("not a schema")).is_none());
    assert!(strip_write_only(&json!(null)).is_none());
}

#[test]
fn test_sort_keys_deep_is_idempotent() {
    let value = json!({
        "zebra": { "inner_b": 1, "inner_a": [ { "z": 1, "a": 2 } ] },
        "alpha": [3, 2, 1]
    });

    let once = sort_keys_deep(&value);
    let twice = sort_keys_deep(&once);

    assert_eq!(once, twice);
    // Arrays keep their element order
    assert_eq!(once["alpha"], json!([3, 2, 1]));
}

#[test]
fn test_merge_bundle_attaches_document() {
    let schema = json!({ "type": "object" });
    let bundle = json!({ "Pet": { "type": "string" } });

    let merged = merge_bundle(&schema, Some(&bundle));

    assert_eq!(merged[BUNDLED_KEY], bundle);
    // The input schema is untouched
    assert!(schema.get(BUNDLED_KEY).is_none());
}

#[test]
fn test_merge_bundle_without_bundle_is_a_copy() {
    let schema = json!({ "type": "object" });
    let merged = merge_bundle(&schema, None);
    assert_eq!(merged, schema);
}
