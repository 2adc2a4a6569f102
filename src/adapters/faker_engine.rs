use fake::faker::internet::en::{SafeEmail, Username, IPv4, IPv6};
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::Name;
use fake::Fake;
use rand::Rng;
use serde_json::{json, Map, Value};

use crate::config::FakerOptions;
use crate::domain::error::GenerationError;
use crate::domain::scaffold::{ScaffoldNode, Slot};

/// Schema-to-fake-data engine: walks a schema and synthesizes a conformant
/// value tree, reading placed generator instances wherever the scaffold
/// carries an override. `$ref` pointers resolve against the merged document
/// handed in at construction, with expansion depth bounded by the options.
pub struct FakerEngine<'a> {
    options: FakerOptions,
    root_doc: &'a Value,
}

impl<'a> FakerEngine<'a> {
    pub fn new(options: FakerOptions, root_doc: &'a Value) -> Self {
        Self { options, root_doc }
    }

    /// Synthesize a value for `schema`, honoring scaffold overrides.
    pub fn generate(
        &self,
        schema: &Value,
        overrides: Option<&Slot>,
    ) -> Result<Value, GenerationError> {
        self.generate_node(schema, overrides, 0)
    }

    fn generate_node(
        &self,
        schema: &Value,
        overrides: Option<&Slot>,
        ref_depth: usize,
    ) -> Result<Value, GenerationError> {
        // A placed generator takes precedence over anything the schema says
        if let Some(slot) = overrides {
            match &*slot.borrow() {
                ScaffoldNode::Generator(generator) => return generator.read(),
                ScaffoldNode::Omitted => return Ok(Value::Null),
                _ => {}
            }
        }

        if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
            return self.generate_ref(reference, overrides, ref_depth);
        }

        if let Some(constant) = schema.get("const") {
            return Ok(constant.clone());
        }
        if let Some(choices) = schema.get("enum").and_then(Value::as_array) {
            if !choices.is_empty() {
                let index = rand::thread_rng().gen_range(0..choices.len());
                return Ok(choices[index].clone());
            }
        }

        if let Some(branches) = schema.get("allOf").and_then(Value::as_array) {
            return self.generate_all_of(branches, overrides, ref_depth);
        }
        for combinator in ["oneOf", "anyOf"] {
            if let Some(branches) = schema.get(combinator).and_then(Value::as_array) {
                if !branches.is_empty() {
                    let index = rand::thread_rng().gen_range(0..branches.len());
                    return self.generate_node(&branches[index], overrides, ref_depth);
                }
            }
        }

        match self.schema_type(schema) {
            Some("object") => self.generate_object(schema, overrides, ref_depth),
            Some("array") => self.generate_array(schema, overrides, ref_depth),
            Some("string") => self.generate_string(schema),
            Some("integer") => Ok(self.generate_integer(schema)),
            Some("number") => Ok(self.generate_number(schema)),
            Some("boolean") => Ok(json!(rand::thread_rng().gen_bool(0.5))),
            Some("null") => Ok(Value::Null),
            Some(other) => {
                if self.options.fail_on_invalid_types {
                    Err(GenerationError::Engine(format!(
                        "unsupported schema type: {other}"
                    )))
                } else {
                    Ok(Value::Null)
                }
            }
            None => {
                if self.options.fail_on_invalid_types {
                    Err(GenerationError::Engine("schema without a type".to_string()))
                } else {
                    Ok(Value::Null)
                }
            }
        }
    }

    /// Infer the type when the keyword is missing but the shape is obvious
    fn schema_type<'s>(&self, schema: &'s Value) -> Option<&'s str> {
        schema
            .get("type")
            .and_then(Value::as_str)
            .or_else(|| schema.get("properties").map(|_| "object"))
            .or_else(|| schema.get("items").map(|_| "array"))
    }

    fn generate_ref(
        &self,
        reference: &str,
        overrides: Option<&Slot>,
        ref_depth: usize,
    ) -> Result<Value, GenerationError> {
        if ref_depth >= self.options.ref_depth_max {
            // Cut the cycle short rather than expanding forever
            return Ok(Value::Null);
        }
        let resolved = reference
            .strip_prefix('#')
            .and_then(|pointer| self.root_doc.pointer(pointer));
        match resolved {
            Some(target) => self.generate_node(target, overrides, ref_depth + 1),
            None if self.options.ignore_missing_refs => {
                tracing::warn!(reference, "ignoring unresolvable $ref");
                Ok(Value::Null)
            }
            None => Err(GenerationError::Engine(format!(
                "unresolvable $ref: {reference}"
            ))),
        }
    }

    fn generate_all_of(
        &self,
        branches: &[Value],
        overrides: Option<&Slot>,
        ref_depth: usize,
    ) -> Result<Value, GenerationError> {
        let mut merged = Map::new();
        for branch in branches {
            let value = self.generate_node(branch, overrides, ref_depth)?;
            if let Value::Object(map) = value {
                for (key, val) in map {
                    merged.insert(key, val);
                }
            }
        }
        Ok(Value::Object(merged))
    }

    fn generate_object(
        &self,
        schema: &Value,
        overrides: Option<&Slot>,
        ref_depth: usize,
    ) -> Result<Value, GenerationError> {
        let mut result = Map::new();
        let properties = match schema.get("properties").and_then(Value::as_object) {
            Some(properties) => properties,
            None => return Ok(Value::Object(result)),
        };
        let required: Vec<&str> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        for (name, subschema) in properties {
            let child_override = overrides.and_then(|slot| match &*slot.borrow() {
                ScaffoldNode::Object(children) => children.get(name).cloned(),
                _ => None,
            });

            // An omitted slot is a directive declaration, never an output
            // field; a generator slot is always produced
            let (omitted, has_generator) = match &child_override {
                Some(slot) => match &*slot.borrow() {
                    ScaffoldNode::Omitted => (true, false),
                    ScaffoldNode::Generator(_) => (false, true),
                    _ => (false, false),
                },
                None => (false, false),
            };
            if omitted {
                continue;
            }

            let include = has_generator
                || required.contains(&name.as_str())
                || self.options.always_fake_optionals
                || rand::thread_rng().gen_bool(self.options.optionals_probability.clamp(0.0, 1.0));
            if !include {
                continue;
            }

            let value = self.generate_node(subschema, child_override.as_ref(), ref_depth)?;
            result.insert(name.clone(), value);
        }

        Ok(Value::Object(result))
    }

    fn generate_array(
        &self,
        schema: &Value,
        overrides: Option<&Slot>,
        ref_depth: usize,
    ) -> Result<Value, GenerationError> {
        let item_schema = schema.get("items");

        // A scaffold array fixes the element count; its per-element slots
        // carry the placed generators
        let element_overrides: Option<Vec<Slot>> =
            overrides.and_then(|slot| match &*slot.borrow() {
                ScaffoldNode::Array(elements) => Some(elements.clone()),
                _ => None,
            });

        if let Some(elements) = element_overrides {
            let null_item = Value::Null;
            let item_schema = item_schema.unwrap_or(&null_item);
            let mut result = Vec::with_capacity(elements.len());
            for element in &elements {
                result.push(self.generate_node(item_schema, Some(element), ref_depth)?);
            }
            return Ok(Value::Array(result));
        }

        let item_schema = match item_schema {
            Some(item_schema) => item_schema,
            None => return Ok(Value::Array(Vec::new())),
        };

        let min = schema
            .get("minItems")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(self.options.min_items);
        let max = schema
            .get("maxItems")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(self.options.max_items)
            .min(self.options.max_items);
        let count = if min >= max {
            min
        } else {
            rand::thread_rng().gen_range(min..=max)
        };

        let mut result = Vec::with_capacity(count);
        for _ in 0..count {
            result.push(self.generate_node(item_schema, None, ref_depth)?);
        }
        Ok(Value::Array(result))
    }

    fn generate_string(&self, schema: &Value) -> Result<Value, GenerationError> {
        if let Some(format) = schema.get("format").and_then(Value::as_str) {
            match format {
                "uuid" => return Ok(json!(uuid::Uuid::new_v4().to_string())),
                "email" => return Ok(json!(SafeEmail().fake::<String>())),
                "date-time" => return Ok(json!(chrono::Utc::now().to_rfc3339())),
                "date" => return Ok(json!(chrono::Utc::now().format("%Y-%m-%d").to_string())),
                "uri" | "url" => {
                    return Ok(json!(format!(
                        "https://example.com/{}",
                        Word().fake::<String>().to_lowercase()
                    )))
                }
                "hostname" => {
                    return Ok(json!(format!(
                        "{}.example.com",
                        Username().fake::<String>().to_lowercase()
                    )))
                }
                "ipv4" => return Ok(json!(IPv4().fake::<String>())),
                "ipv6" => return Ok(json!(IPv6().fake::<String>())),
                "name" => return Ok(json!(Name().fake::<String>())),
                other => {
                    if self.options.fail_on_invalid_format {
                        return Err(GenerationError::Engine(format!(
                            "unsupported string format: {other}"
                        )));
                    }
                    // Fall through to plain text
                }
            }
        }

        let min = schema
            .get("minLength")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(self.options.min_length);
        let max = schema
            .get("maxLength")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(self.options.max_length)
            .min(self.options.max_length);

        let mut text: String = Sentence(1..4).fake();
        while text.chars().count() < min {
            text.push(' ');
            text.push_str(&Word().fake::<String>());
        }
        if text.chars().count() > max {
            text = text.chars().take(max).collect();
        }
        Ok(json!(text))
    }

    fn generate_integer(&self, schema: &Value) -> Value {
        let min = schema.get("minimum").and_then(Value::as_i64).unwrap_or(0);
        let max = schema.get("maximum").and_then(Value::as_i64).unwrap_or(100);
        if min >= max {
            return json!(min);
        }
        json!(rand::thread_rng().gen_range(min..=max))
    }

    fn generate_number(&self, schema: &Value) -> Value {
        let min = schema.get("minimum").and_then(Value::as_f64).unwrap_or(0.0);
        let max = schema
            .get("maximum")
            .and_then(Value::as_f64)
            .unwrap_or(100.0);
        if min >= max {
            return json!(min);
        }
        json!(rand::thread_rng().gen_range(min..max))
    }
}
