//! Bounded structural sampling of a schema: a representative shape, not a
//! fully elaborated payload. Every visited node consumes one tick from a
//! fixed budget, which is the only thing standing between an adversarially
//! self-referential schema and unbounded work.

use std::cell::Cell;

use serde_json::{json, Map, Value};

use crate::domain::error::SamplerError;

/// Tick budget the orchestrator hands the sampler
pub const SAMPLE_TICKS: u32 = 2500;

/// Produce a representative sample of `schema`, spending at most `ticks`
/// node visits. `$ref` pointers resolve against the schema document itself.
pub fn sample(schema: &Value, ticks: u32) -> Result<Value, SamplerError> {
    if !schema.is_object() {
        return Err(SamplerError::InvalidSchema(
            "root schema is not an object".to_string(),
        ));
    }
    let sampler = Sampler {
        root_doc: schema,
        budget: ticks,
        remaining: Cell::new(ticks),
    };
    sampler.sample_node(schema)
}

struct Sampler<'a> {
    root_doc: &'a Value,
    budget: u32,
    remaining: Cell<u32>,
}

impl Sampler<'_> {
    fn tick(&self) -> Result<(), SamplerError> {
        let remaining = self.remaining.get();
        if remaining == 0 {
            return Err(SamplerError::SizeExceeded { ticks: self.budget });
        }
        self.remaining.set(remaining - 1);
        Ok(())
    }

    fn sample_node(&self, schema: &Value) -> Result<Value, SamplerError> {
        self.tick()?;

        if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
            let resolved = reference
                .strip_prefix('#')
                .and_then(|pointer| self.root_doc.pointer(pointer));
            return match resolved {
                Some(target) => self.sample_node(target),
                None => Ok(Value::Null),
            };
        }

        if let Some(constant) = schema.get("const") {
            return Ok(constant.clone());
        }
        if let Some(first) = schema
            .get("enum")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first())
        {
            return Ok(first.clone());
        }

        if let Some(branches) = schema.get("allOf").and_then(Value::as_array) {
            let mut merged = Map::new();
            for branch in branches {
                if let Value::Object(map) = self.sample_node(branch)? {
                    for (key, value) in map {
                        merged.insert(key, value);
                    }
                }
            }
            return Ok(Value::Object(merged));
        }
        for combinator in ["oneOf", "anyOf"] {
            if let Some(first) = schema
                .get(combinator)
                .and_then(Value::as_array)
                .and_then(|branches| branches.first())
            {
                return self.sample_node(first);
            }
        }

        let inferred = schema
            .get("type")
            .and_then(Value::as_str)
            .or_else(|| schema.get("properties").map(|_| "object"))
            .or_else(|| schema.get("items").map(|_| "array"));

        match inferred {
            Some("object") => {
                let mut result = Map::new();
                if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
                    for (name, subschema) in properties {
                        result.insert(name.clone(), self.sample_node(subschema)?);
                    }
                }
                Ok(Value::Object(result))
            }
            Some("array") => match schema.get("items") {
                Some(item_schema) => Ok(Value::Array(vec![self.sample_node(item_schema)?])),
                None => Ok(Value::Array(Vec::new())),
            },
            Some("string") => Ok(json!(placeholder_string(
                schema.get("format").and_then(Value::as_str)
            ))),
            Some("integer") => Ok(json!(0)),
            Some("number") => Ok(json!(0.0)),
            Some("boolean") => Ok(json!(true)),
            _ => Ok(Value::Null),
        }
    }
}

/// Deterministic placeholders so samples diff cleanly between runs
fn placeholder_string(format: Option<&str>) -> &'static str {
    match format {
        Some("uuid") => "00000000-0000-0000-0000-000000000000",
        Some("email") => "user@example.com",
        Some("date-time") => "2024-01-01T00:00:00Z",
        Some("date") => "2024-01-01",
        Some("uri") | Some("url") => "https://example.com",
        Some("hostname") => "example.com",
        Some("ipv4") => "192.0.2.1",
        Some("ipv6") => "2001:db8::1",
        _ => "string",
    }
}
