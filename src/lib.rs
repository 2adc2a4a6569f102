//! # Eidolon - Schema Example Synthesis
//!
//! Eidolon synthesizes example values for JSON-Schema-described API payloads,
//! for use by HTTP mocking and documentation tools. It offers two independent
//! capabilities:
//!
//! - **Full value generation**: concrete, schema-conformant sample data,
//!   optionally honoring deterministic placeholder directives embedded in the
//!   schema via the `x-generator-opt` extension keyword
//! - **Structural sampling**: a representative shape produced within a fixed
//!   tick budget, so adversarially recursive schemas fail fast instead of
//!   running away
//!
//! ## Directives
//!
//! A schema node may carry a directive selecting a generator and its
//! arguments:
//!
//! ```yaml
//! type: object
//! properties:
//!   pets:
//!     type: array
//!     x-generator-opt: sum 4
//!     items:
//!       type: object
//!       properties:
//!         id:
//!           type: integer
//!           x-generator-opt: incremental
//! ```
//!
//! Placement is identity-sharing: the four `id` positions above read one
//! shared counter and come out as `0, 1, 2, 3` in element order.
//!
//! ## Quick Start
//!
//! ```rust
//! use eidolon::adapters::example_generator::ExampleGenerator;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": { "name": { "type": "string" } },
//!     "required": ["name"]
//! });
//!
//! let example = ExampleGenerator::default().generate(&schema, None)?;
//! assert!(example["name"].is_string());
//! # Ok::<(), eidolon::domain::error::GenerationError>(())
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: directive parsing, the annotation scaffold, generator
//!   instances, and the two-pass placement engine
//! - **Adapters**: the schema-to-fake-data engine, the bounded structural
//!   sampler, schema transforms, and the generation orchestrator
//! - **Config**: the fake-data engine option record

pub mod adapters;
pub mod config;
pub mod domain;

pub use adapters::example_generator::ExampleGenerator;
pub use config::FakerOptions;
pub use domain::error::{GenerationError, SamplerError};
pub use domain::operation::Operation;
