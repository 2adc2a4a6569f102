//! Example-generation error types

use thiserror::Error;

/// Errors that can occur while synthesizing example values
#[derive(Debug, Error)]
pub enum GenerationError {
    /// An array-typed schema node carries no directive with a size argument
    #[error("array property with unspecified size")]
    UnspecifiedArraySize,

    /// The extension field's first token is not a known directive kind
    #[error("unknown directive kind: '{kind}'")]
    UnknownDirective { kind: String },

    /// The extension field is present but blank
    #[error("empty generator directive")]
    EmptyDirective,

    /// A directive is missing or carries an unparseable argument
    #[error("malformed {kind} directive: {reason}")]
    MalformedDirective { kind: &'static str, reason: String },

    /// A directive sits in a position its placement policy cannot work with
    #[error("{kind} directive requires an enclosing {scope}")]
    MisplacedDirective {
        kind: &'static str,
        scope: &'static str,
    },

    /// Write-only property stripping returned its absence signal
    #[error("cannot strip write-only properties")]
    WriteOnlyStrip,

    /// The fake-data engine failed while synthesizing values
    #[error("fake-data engine error: {0}")]
    Engine(String),

    /// A static value generator was read before a value was assigned to it
    #[error("static value generator read before assignment")]
    UnassignedStatic,

    /// Structural sampling ran out of ticks; the schema is too complex to
    /// sample for the named operation
    #[error("schema too complex to sample for {method} {path}")]
    SchemaTooComplex {
        method: String,
        path: String,
        #[source]
        source: SamplerError,
    },

    /// Any other sampler failure, passed through unchanged
    #[error("schema sampling failed: {0}")]
    Sampler(#[source] SamplerError),
}

/// Errors raised by the structural schema sampler
#[derive(Debug, Error)]
pub enum SamplerError {
    /// The sampler consumed its whole tick budget before finishing
    #[error("schema sampling exceeded the budget of {ticks} ticks")]
    SizeExceeded { ticks: u32 },

    /// The sampler was handed something it cannot walk
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

impl SamplerError {
    /// True for the distinguished overflow condition that callers remap to
    /// [`GenerationError::SchemaTooComplex`].
    pub fn is_size_exceeded(&self) -> bool {
        matches!(self, Self::SizeExceeded { .. })
    }
}
