use super::example_generator::ExampleGenerator;
use crate::config::FakerOptions;
use crate::domain::error::GenerationError;
use crate::domain::operation::Operation;
use serde_json::json;

#[test]
fn test_generate_const_with_assignment() {
    let schema = json!({
        "type": "object",
        "properties": {
            "a": { "type": "string", "x-generator-opt": "const" }
        }
    });

    let value = ExampleGenerator::default()
        .generate_with(&schema, None, |path| {
            assert_eq!(path, "a");
            Some(json!("assigned"))
        })
        .unwrap();

    assert_eq!(value, json!({ "a": "assigned" }));
}

#[test]
fn test_generate_const_without_assignment_fails() {
    let schema = json!({
        "type": "object",
        "properties": {
            "a": { "type": "string", "x-generator-opt": "const" }
        }
    });

    let err = ExampleGenerator::default().generate(&schema, None).unwrap_err();
    assert!(matches!(err, GenerationError::UnassignedStatic));
}

#[test]
fn test_generate_incremental_array() {
    let schema = json!({
        "type": "object",
        "properties": {
            "pets": {
                "type": "array",
                "x-generator-opt": "sum 4",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer", "x-generator-opt": "incremental" },
                        "name": { "type": "string" }
                    }
                }
            }
        }
    });

    let value = ExampleGenerator::default().generate(&schema, None).unwrap();

    let pets = value["pets"].as_array().unwrap();
    assert_eq!(pets.len(), 4);
    for (index, pet) in pets.iter().enumerate() {
        assert_eq!(pet["id"], json!(index));
        assert!(pet["name"].is_string());
    }
}

#[test]
fn test_generate_val_distribution() {
    let schema = json!({
        "type": "object",
        "properties": {
            "goats": { "type": "integer", "x-generator-opt": "sum 0 \"herd\"" },
            "sheep": { "type": "integer", "x-generator-opt": "sum 0 \"herd\"" },
            "herd": { "type": "integer", "x-generator-opt": "val \"herd\" 100" }
        }
    });

    let value = ExampleGenerator::default().generate(&schema, None).unwrap();

    let goats = value["goats"].as_i64().unwrap();
    let sheep = value["sheep"].as_i64().unwrap();
    assert!((0..=100).contains(&goats));
    assert!((0..=100).contains(&sheep));
    assert!(goats + sheep <= 100);
    // The declaration is not an output field
    assert!(value.get("herd").is_none());
}

#[test]
fn test_generate_strips_write_only() {
    let schema = json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "password": { "type": "string", "writeOnly": true }
        },
        "required": ["name", "password"]
    });

    let value = ExampleGenerator::default().generate(&schema, None).unwrap();

    assert!(value.get("name").is_some());
    assert!(value.get("password").is_none());
}

#[test]
fn test_generate_non_object_schema_fails_stripping() {
    let err = ExampleGenerator::default()
        .generate(&json!(true), None)
        .unwrap_err();
    assert!(matches!(err, GenerationError::WriteOnlyStrip));
}

#[test]
fn test_generate_resolves_bundle_refs() {
    let schema = json!({
        "type": "object",
        "properties": {
            "pet": { "$ref": "#/__bundled__/Pet" }
        }
    });
    let bundle = json!({
        "Pet": {
            "type": "object",
            "properties": { "name": { "type": "string" } },
            "required": ["name"]
        }
    });

    let value = ExampleGenerator::default()
        .generate(&schema, Some(&bundle))
        .unwrap();

    assert!(value["pet"]["name"].is_string());
}

#[test]
fn test_generate_output_keys_sorted() {
    let schema = json!({
        "type": "object",
        "properties": {
            "zebra": { "type": "integer" },
            "alpha": { "type": "integer" },
            "mid": {
                "type": "object",
                "properties": {
                    "z": { "type": "integer" },
                    "a": { "type": "integer" }
                }
            }
        }
    });

    let value = ExampleGenerator::default().generate(&schema, None).unwrap();
    let serialized = serde_json::to_string(&value).unwrap();

    assert!(serialized.find("\"alpha\"").unwrap() < serialized.find("\"mid\"").unwrap());
    assert!(serialized.find("\"mid\"").unwrap() < serialized.find("\"zebra\"").unwrap());
}

#[test]
fn test_generate_array_without_size_directive_fails() {
    let schema = json!({
        "type": "object",
        "properties": {
            "items": {
                "type": "array",
                "items": { "type": "string" }
            }
        }
    });

    let err = ExampleGenerator::default().generate(&schema, None).unwrap_err();
    assert!(matches!(err, GenerationError::UnspecifiedArraySize));
}

#[test]
fn test_generate_unknown_directive_fails() {
    let schema = json!({
        "type": "object",
        "properties": {
            "a": { "type": "string", "x-generator-opt": "foo" }
        }
    });

    let err = ExampleGenerator::default().generate(&schema, None).unwrap_err();
    assert!(matches!(err, GenerationError::UnknownDirective { .. }));
}

#[test]
fn test_sample_too_complex_names_operation() {
    let schema = json!({
        "type": "object",
        "properties": {
            "a": { "type": "string" },
            "b": { "type": "string" },
            "c": { "type": "string" },
            "d": { "type": "string" },
            "e": { "type": "string" },
            "f": { "type": "string" },
            "g": { "type": "string" },
            "h": { "type": "string" },
            "next": { "$ref": "#" }
        }
    });
    let operation = Operation::new("GET", "/pets/{petId}");

    let err = ExampleGenerator::default()
        .sample(&schema, None, &operation)
        .unwrap_err();

    match err {
        GenerationError::SchemaTooComplex { method, path, source } => {
            assert_eq!(method, "GET");
            assert_eq!(path, "/pets/{petId}");
            assert!(source.is_size_exceeded());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_sample_other_failures_pass_through() {
    let err = ExampleGenerator::default()
        .sample(&json!("nope"), None, &Operation::new("GET", "/x"))
        .unwrap_err();
    assert!(matches!(err, GenerationError::Sampler(_)));
}

#[test]
fn test_sample_simple_schema() {
    let schema = json!({
        "type": "object",
        "properties": {
            "id": { "type": "integer" }
        }
    });

    let value = ExampleGenerator::default()
        .sample(&schema, None, &Operation::new("GET", "/pets"))
        .unwrap();
    assert_eq!(value, json!({ "id": 0 }));
}

#[test]
fn test_generate_with_explicit_options() {
    let schema = json!({
        "type": "object",
        "properties": {
            "tags": {
                "type": "array",
                "minItems": 1,
                "maxItems": 2,
                "items": { "type": "string" }
            }
        }
    });
    let mut options = FakerOptions::default();
    options.max_items = 2;

    let value = ExampleGenerator::new(options).generate(&schema, None).unwrap();
    let tags = value["tags"].as_array().unwrap();
    assert!((1..=2).contains(&tags.len()));
}
