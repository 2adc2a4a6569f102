//! Fake-data engine configuration.
//!
//! The engine runs with a fixed, documented option record instead of
//! process-wide mutable defaults: callers build a [`FakerOptions`] (or take
//! [`FakerOptions::default`]) and thread it into the generation entry point.
//! The `always_fake_optionals` field is forced on for every full-generation
//! invocation regardless of what the record says, so mocked payloads always
//! carry their optional properties.

use serde::{Deserialize, Serialize};

/// Option record for the schema-to-fake-data engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FakerOptions {
    /// Produce every optional property instead of rolling per property
    #[serde(default = "default_true")]
    pub always_fake_optionals: bool,
    /// Uniform inclusion probability for optional properties when
    /// `always_fake_optionals` is off
    #[serde(default = "default_optionals_probability")]
    pub optionals_probability: f64,
    /// Tolerate unresolvable `$ref` pointers instead of failing
    #[serde(default = "default_true")]
    pub ignore_missing_refs: bool,
    /// Fail on schema nodes whose `type` the engine does not understand
    #[serde(default)]
    pub fail_on_invalid_types: bool,
    /// Fail on string formats the engine does not understand
    #[serde(default)]
    pub fail_on_invalid_format: bool,
    /// Lower bound on synthesized array lengths
    #[serde(default = "default_min_items")]
    pub min_items: usize,
    /// Upper bound on synthesized array lengths
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    /// Lower bound on synthesized string lengths
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Upper bound on synthesized string lengths
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// How many levels of `$ref` expansion to allow before cutting a cycle
    /// short; kept small (0-3) so self-referential schemas stay bounded
    #[serde(default = "default_ref_depth_max")]
    pub ref_depth_max: usize,
}

fn default_true() -> bool {
    true
}

fn default_optionals_probability() -> f64 {
    1.0
}

fn default_min_items() -> usize {
    1
}

fn default_max_items() -> usize {
    20
}

fn default_min_length() -> usize {
    4
}

fn default_max_length() -> usize {
    100
}

fn default_ref_depth_max() -> usize {
    3
}

impl Default for FakerOptions {
    fn default() -> Self {
        Self {
            always_fake_optionals: default_true(),
            optionals_probability: default_optionals_probability(),
            ignore_missing_refs: default_true(),
            fail_on_invalid_types: false,
            fail_on_invalid_format: false,
            min_items: default_min_items(),
            max_items: default_max_items(),
            min_length: default_min_length(),
            max_length: default_max_length(),
            ref_depth_max: default_ref_depth_max(),
        }
    }
}
