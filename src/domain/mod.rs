pub mod directive;
pub mod error;
pub mod generator;
pub mod operation;
pub mod placement;
pub mod scaffold;

pub use directive::{Directive, DirectiveKind, EXTENSION_KEYWORD};
pub use error::{GenerationError, SamplerError};
pub use generator::{Generator, SharedGenerator};
pub use operation::Operation;
pub use placement::place_generators;
pub use scaffold::{collect_statics, ScaffoldNode, Slot};
