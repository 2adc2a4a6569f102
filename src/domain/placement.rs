//! The placement pass: binding generator instances into the scaffold.
//!
//! This is the second of the two passes. The walk pushes a context level per
//! array element and per object property; directive leaves dispatch to their
//! placement policy; empty leaves are no-ops. Policies may write into
//! positions other than the directive's own (every element of an enclosing
//! array, or sibling properties of the enclosing object), and all such
//! positions receive clones of one shared handle, never value copies.
//!
//! The context chain is an explicit stack of borrowed references built
//! during traversal. Each level exclusively borrows its parent; there are no
//! back-references and no cycles, so ancestor lookup is O(depth) with no
//! re-walk from the root.

use std::rc::Rc;

use crate::domain::directive::{strip_quotes, Directive, DirectiveKind};
use crate::domain::error::GenerationError;
use crate::domain::generator::Generator;
use crate::domain::scaffold::{ScaffoldNode, Slot};

/// One entry of the ancestor chain, alive only while its node is visited
pub struct ContextLevel<'a> {
    pub parent: Option<&'a ContextLevel<'a>>,
    pub node: &'a Slot,
}

impl<'a> ContextLevel<'a> {
    /// The ancestor `levels` steps up the chain, if the chain is that deep
    pub fn up(&self, levels: usize) -> Option<&ContextLevel<'a>> {
        let mut current = self;
        for _ in 0..levels {
            current = current.parent?;
        }
        Some(current)
    }
}

/// Walk the scaffold and place a generator for every directive leaf.
pub fn place_generators(root: &Slot) -> Result<(), GenerationError> {
    visit(root, None, None)
}

/// Children are snapshotted before recursion so no borrow of the current
/// node is held while a policy mutates sibling or ancestor slots.
enum Step {
    Properties(Vec<(String, Slot)>),
    Elements(Vec<Slot>),
    Leaf(Directive),
    Skip,
}

fn visit(
    slot: &Slot,
    key: Option<&str>,
    parent: Option<&ContextLevel>,
) -> Result<(), GenerationError> {
    let level = ContextLevel { parent, node: slot };

    let step = match &*slot.borrow() {
        ScaffoldNode::Object(children) => Step::Properties(
            children
                .iter()
                .map(|(name, child)| (name.clone(), child.clone()))
                .collect(),
        ),
        ScaffoldNode::Array(elements) => Step::Elements(elements.clone()),
        ScaffoldNode::Directive(directive) => Step::Leaf(directive.clone()),
        _ => Step::Skip,
    };

    match step {
        Step::Properties(children) => {
            for (name, child) in children {
                visit(&child, Some(name.as_str()), Some(&level))?;
            }
        }
        Step::Elements(elements) => {
            for element in elements {
                visit(&element, None, Some(&level))?;
            }
        }
        Step::Leaf(directive) => place(&directive, key, &level)?,
        Step::Skip => {}
    }

    Ok(())
}

fn place(
    directive: &Directive,
    key: Option<&str>,
    level: &ContextLevel,
) -> Result<(), GenerationError> {
    match directive.kind {
        DirectiveKind::Const => {
            *level.node.borrow_mut() = ScaffoldNode::Generator(Generator::unassigned());
            Ok(())
        }
        DirectiveKind::Incremental => place_incremental(key, level),
        DirectiveKind::Val => place_val(directive, level),
        // On arrays the size argument was consumed by the scaffold builder;
        // on scalars the leaf is a marker a sibling `val` overwrites. A
        // marker no `val` ever claims never receives a generator.
        DirectiveKind::Sum => Ok(()),
    }
}

/// One counter for the whole enclosing array: the array sits two context
/// levels up (one level is the element's own object, one the array), and the
/// same property name in every element receives the same instance.
fn place_incremental(key: Option<&str>, level: &ContextLevel) -> Result<(), GenerationError> {
    let name = key.ok_or(GenerationError::MisplacedDirective {
        kind: "incremental",
        scope: "object property",
    })?;
    let array_level = level.up(2).ok_or(GenerationError::MisplacedDirective {
        kind: "incremental",
        scope: "array of objects",
    })?;

    let node = array_level.node.borrow();
    let ScaffoldNode::Array(elements) = &*node else {
        return Err(GenerationError::MisplacedDirective {
            kind: "incremental",
            scope: "array of objects",
        });
    };

    let counter = Generator::counter(0);
    for element in elements {
        if let ScaffoldNode::Object(children) = &*element.borrow() {
            if let Some(slot) = children.get(name) {
                *slot.borrow_mut() = ScaffoldNode::Generator(counter.clone());
            }
        }
    }

    tracing::debug!(
        property = name,
        elements = elements.len(),
        "shared one counter across array elements"
    );
    Ok(())
}

/// Distribute a declared total across sibling properties: build a value
/// holder from the total, derive a sum-to-n generator from it, overwrite
/// every sibling whose directive names the same group key, then null out the
/// declaration slot, which is not an output field.
fn place_val(directive: &Directive, level: &ContextLevel) -> Result<(), GenerationError> {
    let target = directive
        .tokens
        .get(1)
        .ok_or_else(|| GenerationError::MalformedDirective {
            kind: "val",
            reason: "missing target key".to_string(),
        })?;
    let total: i64 = directive
        .tokens
        .get(2)
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| GenerationError::MalformedDirective {
            kind: "val",
            reason: "missing or non-numeric total".to_string(),
        })?;

    let holder = Generator::fixed(total);
    let sum = holder.derive_sum()?;

    let object_level = level.up(1).ok_or(GenerationError::MisplacedDirective {
        kind: "val",
        scope: "object",
    })?;

    {
        let node = object_level.node.borrow();
        let ScaffoldNode::Object(children) = &*node else {
            return Err(GenerationError::MisplacedDirective {
                kind: "val",
                scope: "object",
            });
        };

        let target_key = strip_quotes(target);
        for slot in children.values() {
            if Rc::ptr_eq(slot, level.node) {
                continue;
            }
            let matches_group = matches!(
                &*slot.borrow(),
                ScaffoldNode::Directive(sibling) if sibling.group_key() == Some(target_key)
            );
            if matches_group {
                *slot.borrow_mut() = ScaffoldNode::Generator(sum.clone());
            }
        }
    }

    *level.node.borrow_mut() = ScaffoldNode::Omitted;
    Ok(())
}
