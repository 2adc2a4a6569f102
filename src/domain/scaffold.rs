//! The annotation scaffold mirroring a schema's object/array shape.
//!
//! The scaffold is the first of the two passes: it records where directives
//! apply without creating any generator state. Slots are `Rc<RefCell<..>>`
//! so the second pass can write into sibling and ancestor positions while
//! the walk holds only handles. The tree is ephemeral and single-threaded;
//! only the generator handles placed into it outlive it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use crate::domain::directive::{Directive, EXTENSION_KEYWORD};
use crate::domain::error::GenerationError;
use crate::domain::generator::SharedGenerator;

/// A mutable position in the scaffold tree
pub type Slot = Rc<RefCell<ScaffoldNode>>;

/// One node of the annotation tree
#[derive(Debug)]
pub enum ScaffoldNode {
    /// Mirrors an object schema; property insertion order is irrelevant
    Object(HashMap<String, Slot>),
    /// Fixed-length sequence of independent copies of the item scaffold
    Array(Vec<Slot>),
    /// A directive awaiting the placement pass
    Directive(Directive),
    /// A generator instance written during placement
    Generator(SharedGenerator),
    /// A `val` declaration slot nulled out by placement; the property is
    /// absent from final output
    Omitted,
    /// Nothing to place here
    Empty,
}

impl ScaffoldNode {
    fn into_slot(self) -> Slot {
        Rc::new(RefCell::new(self))
    }

    /// Recursively mirror a schema node into a scaffold slot.
    ///
    /// Object schemas recurse into every declared property. Array schemas
    /// require a directive carrying a size argument and replicate the item
    /// scaffold that many times. Anything else becomes a directive leaf when
    /// the extension field is present, an empty leaf otherwise.
    pub fn build(schema: &Value) -> Result<Slot, GenerationError> {
        let directive =
            Directive::parse(schema.get(EXTENSION_KEYWORD).and_then(Value::as_str))?;

        match schema.get("type").and_then(Value::as_str) {
            Some("object") => {
                let mut children = HashMap::new();
                if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
                    for (name, child) in properties {
                        children.insert(name.clone(), Self::build(child)?);
                    }
                }
                Ok(ScaffoldNode::Object(children).into_slot())
            }
            Some("array") => {
                let size = directive
                    .as_ref()
                    .and_then(Directive::size_argument)
                    .ok_or(GenerationError::UnspecifiedArraySize)?;
                let null_item = Value::Null;
                let item = schema.get("items").unwrap_or(&null_item);
                let template = Self::build(item)?;
                let elements = (0..size).map(|_| deep_clone(&template)).collect();
                Ok(ScaffoldNode::Array(elements).into_slot())
            }
            _ => Ok(match directive {
                Some(directive) => ScaffoldNode::Directive(directive).into_slot(),
                None => ScaffoldNode::Empty.into_slot(),
            }),
        }
    }
}

/// Deep-copy a scaffold subtree into structurally independent slots.
/// Generator handles are cloned as handles; their state stays shared.
pub fn deep_clone(slot: &Slot) -> Slot {
    let node = match &*slot.borrow() {
        ScaffoldNode::Object(children) => ScaffoldNode::Object(
            children
                .iter()
                .map(|(name, child)| (name.clone(), deep_clone(child)))
                .collect(),
        ),
        ScaffoldNode::Array(elements) => {
            ScaffoldNode::Array(elements.iter().map(deep_clone).collect())
        }
        ScaffoldNode::Directive(directive) => ScaffoldNode::Directive(directive.clone()),
        ScaffoldNode::Generator(generator) => ScaffoldNode::Generator(generator.clone()),
        ScaffoldNode::Omitted => ScaffoldNode::Omitted,
        ScaffoldNode::Empty => ScaffoldNode::Empty,
    };
    node.into_slot()
}

/// Collect every still-unassigned static generator with a dotted path to its
/// position (e.g. `items[2].id`), so the caller can assign concrete values
/// before synthesis runs.
pub fn collect_statics(root: &Slot) -> Vec<(String, SharedGenerator)> {
    let mut found = Vec::new();
    collect_statics_into(root, String::new(), &mut found);
    found
}

fn collect_statics_into(slot: &Slot, path: String, found: &mut Vec<(String, SharedGenerator)>) {
    match &*slot.borrow() {
        ScaffoldNode::Object(children) => {
            // Sorted for a stable visiting order
            let mut names: Vec<&String> = children.keys().collect();
            names.sort();
            for name in names {
                let child_path = if path.is_empty() {
                    name.clone()
                } else {
                    format!("{path}.{name}")
                };
                collect_statics_into(&children[name], child_path, found);
            }
        }
        ScaffoldNode::Array(elements) => {
            for (index, element) in elements.iter().enumerate() {
                collect_statics_into(element, format!("{path}[{index}]"), found);
            }
        }
        ScaffoldNode::Generator(generator) => {
            if generator.is_unassigned_static() {
                found.push((path, generator.clone()));
            }
        }
        _ => {}
    }
}
