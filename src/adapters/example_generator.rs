use serde_json::Value;

use crate::adapters::faker_engine::FakerEngine;
use crate::adapters::sampler::{self, SAMPLE_TICKS};
use crate::adapters::schema_transform::{merge_bundle, sort_keys_deep, strip_write_only};
use crate::config::FakerOptions;
use crate::domain::error::GenerationError;
use crate::domain::operation::Operation;
use crate::domain::placement::place_generators;
use crate::domain::scaffold::{collect_statics, ScaffoldNode};

/// Orchestrates example synthesis for one schema: scaffold construction,
/// generator placement, write-only stripping, bundle merging, fake-data
/// synthesis, and canonical sorting. Every entry point returns a
/// [`GenerationError`] on failure; nothing panics across this boundary.
pub struct ExampleGenerator {
    options: FakerOptions,
}

impl ExampleGenerator {
    pub fn new(options: FakerOptions) -> Self {
        Self { options }
    }

    /// Generate a schema-conformant example. Convenience form of
    /// [`Self::generate_with`] for schemas without `const` directives.
    pub fn generate(
        &self,
        schema: &Value,
        bundle: Option<&Value>,
    ) -> Result<Value, GenerationError> {
        self.generate_with(schema, bundle, |_| None)
    }

    /// Generate a schema-conformant example, letting the caller assign the
    /// values of `const` directives. `assign` is called once per allocated
    /// static generator with a dotted path to its position (e.g.
    /// `items[2].id`); returning `None` leaves the generator unassigned,
    /// which fails the run if synthesis then reads it.
    pub fn generate_with(
        &self,
        schema: &Value,
        bundle: Option<&Value>,
        assign: impl Fn(&str) -> Option<Value>,
    ) -> Result<Value, GenerationError> {
        let scaffold = ScaffoldNode::build(schema)?;
        place_generators(&scaffold)?;

        let statics = collect_statics(&scaffold);
        if !statics.is_empty() {
            tracing::debug!(count = statics.len(), "offering static positions for assignment");
        }
        for (path, generator) in statics {
            if let Some(value) = assign(&path) {
                generator.assign(value);
            }
        }

        let stripped = strip_write_only(schema).ok_or(GenerationError::WriteOnlyStrip)?;
        let merged = merge_bundle(&stripped, bundle);

        // The option record is explicit per invocation, and mocked payloads
        // always carry their optional properties
        let mut options = self.options.clone();
        options.always_fake_optionals = true;

        let engine = FakerEngine::new(options, &merged);
        let value = engine.generate(&merged, Some(&scaffold))?;

        Ok(sort_keys_deep(&value))
    }

    /// Produce a representative structural sample of `schema` within the
    /// fixed tick budget. A budget overflow is reported as
    /// [`GenerationError::SchemaTooComplex`] naming `operation`, so callers
    /// can tell an oversized schema from a genuinely broken one; any other
    /// sampler failure passes through unchanged.
    pub fn sample(
        &self,
        schema: &Value,
        bundle: Option<&Value>,
        operation: &Operation,
    ) -> Result<Value, GenerationError> {
        let merged = merge_bundle(schema, bundle);
        match sampler::sample(&merged, SAMPLE_TICKS) {
            Ok(value) => Ok(value),
            Err(source) if source.is_size_exceeded() => {
                tracing::warn!(%operation, "schema exceeded the sampling budget");
                Err(GenerationError::SchemaTooComplex {
                    method: operation.method.clone(),
                    path: operation.path.clone(),
                    source,
                })
            }
            Err(source) => Err(GenerationError::Sampler(source)),
        }
    }
}

impl Default for ExampleGenerator {
    fn default() -> Self {
        Self::new(FakerOptions::default())
    }
}
